use std::fmt::Display;

/// Severity of a [`Message`]. The parser itself only ever records warnings;
/// `Error` exists for consumers that attach their own messages to a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// Stable identifier for every complaint the parser can raise, so consumers
/// can match on kinds instead of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKind {
    EmptyLine,
    UnparseableInput,
    InvalidCatalogNumber,
    NoncompliantFileType,
    NoFlags,
    NoncompliantFlag,
    WrongNumberOfDigits,
    NoncompliantIsrcCode,
    FieldLengthOver80,
    NoncompliantDataType,
    TokenNotUppercase,
    InvalidFramesValue,
    InvalidSecondsValue,
    DatumAppearsTooOften,
    /// Never produced by the parser; the FILE ordering rule is not enforced.
    FileInWrongPlace,
    FlagsInWrongPlace,
    NoFileSpecified,
    NoTrackSpecified,
    InvalidIndexNumber,
    InvalidFirstPosition,
    IsrcInWrongPlace,
    PregapInWrongPlace,
    IndexAfterPostgap,
    InvalidTrackNumber,
    InvalidYear,
}

impl MessageKind {
    pub fn text(self) -> &'static str {
        match self {
            MessageKind::EmptyLine => "Empty lines not allowed. Will ignore.",
            MessageKind::UnparseableInput => "Unparseable line. Will ignore.",
            MessageKind::InvalidCatalogNumber => "Invalid catalog number.",
            MessageKind::NoncompliantFileType => "Noncompliant file type.",
            MessageKind::NoFlags => "No flags specified.",
            MessageKind::NoncompliantFlag => "Noncompliant flag(s) specified.",
            MessageKind::WrongNumberOfDigits => "Wrong number of digits in number.",
            MessageKind::NoncompliantIsrcCode => "ISRC code has noncompliant format.",
            MessageKind::FieldLengthOver80 => {
                "The field is too long to burn as CD-TEXT. The maximum length is 80."
            }
            MessageKind::NoncompliantDataType => "Noncompliant data type specified.",
            MessageKind::TokenNotUppercase => "Token has wrong case. Uppercase was expected.",
            MessageKind::InvalidFramesValue => "Position has invalid frame value. Should be 00-74.",
            MessageKind::InvalidSecondsValue => {
                "Position has invalid seconds value. Should be 00-59."
            }
            MessageKind::DatumAppearsTooOften => "Datum appears too often.",
            MessageKind::FileInWrongPlace => {
                "A FILE datum must come before everything else except REM and CATALOG."
            }
            MessageKind::FlagsInWrongPlace => {
                "A FLAGS datum must come after a TRACK, but before any INDEX of that TRACK."
            }
            MessageKind::NoFileSpecified => "Datum must appear in FILE, but no FILE specified.",
            MessageKind::NoTrackSpecified => "Datum must appear in TRACK, but no TRACK specified.",
            MessageKind::InvalidIndexNumber => {
                "Invalid index number. First number must be 0 or 1; all next ones sequential."
            }
            MessageKind::InvalidFirstPosition => {
                "Invalid position. First index must have position 00:00:00"
            }
            MessageKind::IsrcInWrongPlace => {
                "An ISRC datum must come after TRACK, but before any INDEX of TRACK."
            }
            MessageKind::PregapInWrongPlace => {
                "A PREGAP datum must come after TRACK, but before any INDEX of that TRACK."
            }
            MessageKind::IndexAfterPostgap => {
                "A POSTGAP datum must come after all INDEX data of a TRACK."
            }
            MessageKind::InvalidTrackNumber => {
                "Invalid track number. First number must be 1; all next ones sequential."
            }
            MessageKind::InvalidYear => {
                "Invalid year. Should be a number from 1 to 9999 (inclusive)."
            }
        }
    }
}

impl Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// A raw input line paired with its 1-based line number. Handed to every
/// command handler so messages can point back at their source.
#[derive(Debug, Clone, Copy)]
pub struct LineOfInput<'a> {
    pub line_number: usize,
    pub input: &'a str,
}

impl<'a> LineOfInput<'a> {
    pub fn new(line_number: usize, input: &'a str) -> Self {
        Self { line_number, input }
    }
}

/// A note attached to a cue sheet about one of its lines. Messages never
/// interrupt parsing; they accumulate on the sheet in the order they were
/// raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub kind: MessageKind,
    pub line_number: usize,
    pub input: String,
}

impl Message {
    pub fn warning(line: &LineOfInput, kind: MessageKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            line_number: line.line_number,
            input: line.input.to_string(),
        }
    }

    pub fn error(line: &LineOfInput, kind: MessageKind) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            line_number: line.line_number,
            input: line.input.to_string(),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [Line {}] {}", self.severity, self.line_number, self.kind)
    }
}
