use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

/// The commands a cue sheet line can start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Catalog,
    CdTextFile,
    File,
    Flags,
    Index,
    Isrc,
    Performer,
    Postgap,
    Pregap,
    Rem,
    Songwriter,
    Title,
    Track,
}

impl Command {
    /// Resolves a keyword token case-insensitively. The whole token must be
    /// the keyword; prefixed or suffixed variants do not resolve.
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "CATALOG" => Some(Command::Catalog),
            "CDTEXTFILE" => Some(Command::CdTextFile),
            "FILE" => Some(Command::File),
            "FLAGS" => Some(Command::Flags),
            "INDEX" => Some(Command::Index),
            "ISRC" => Some(Command::Isrc),
            "PERFORMER" => Some(Command::Performer),
            "POSTGAP" => Some(Command::Postgap),
            "PREGAP" => Some(Command::Pregap),
            "REM" => Some(Command::Rem),
            "SONGWRITER" => Some(Command::Songwriter),
            "TITLE" => Some(Command::Title),
            "TRACK" => Some(Command::Track),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Command::Catalog => "CATALOG",
            Command::CdTextFile => "CDTEXTFILE",
            Command::File => "FILE",
            Command::Flags => "FLAGS",
            Command::Index => "INDEX",
            Command::Isrc => "ISRC",
            Command::Performer => "PERFORMER",
            Command::Postgap => "POSTGAP",
            Command::Pregap => "PREGAP",
            Command::Rem => "REM",
            Command::Songwriter => "SONGWRITER",
            Command::Title => "TITLE",
            Command::Track => "TRACK",
        }
    }
}

lazy_static! {
    // Per-command shapes. Free-text arguments are either bare or wrapped in
    // double quotes with no escaping.
    pub static ref POSITION: Regex = Regex::new(r"^([0-9]+):([0-9]+):([0-9]+)$").unwrap();
    pub static ref CATALOG_NUMBER: Regex = Regex::new(r"^[0-9]{13}$").unwrap();
    pub static ref FILE: Regex =
        Regex::new(r#"(?i)^FILE\s+((?:"[^"]*")|\S+)\s+(\S+)\s*$"#).unwrap();
    pub static ref CDTEXTFILE: Regex =
        Regex::new(r#"(?i)^CDTEXTFILE\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref FLAGS: Regex = Regex::new(r"(?i)^FLAGS((?:\s+[0-9A-Za-z_]+)*)\s*$").unwrap();
    pub static ref INDEX: Regex =
        Regex::new(r"(?i)^INDEX\s+([0-9]+)\s+([0-9]*:[0-9]*:[0-9]*)\s*$").unwrap();
    pub static ref ISRC_CODE: Regex = Regex::new(r"^[0-9A-Za-z_]{5}[0-9]{7}$").unwrap();
    pub static ref PERFORMER: Regex =
        Regex::new(r#"(?i)^PERFORMER\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref POSTGAP: Regex =
        Regex::new(r"(?i)^POSTGAP\s+([0-9]*:[0-9]*:[0-9]*)\s*$").unwrap();
    pub static ref PREGAP: Regex =
        Regex::new(r"(?i)^PREGAP\s+([0-9]*:[0-9]*:[0-9]*)\s*$").unwrap();
    pub static ref REM_COMMENT: Regex =
        Regex::new(r#"(?i)^(REM\s+COMMENT)\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref REM_DATE: Regex = Regex::new(r"(?i)^(REM\s+DATE)\s+([0-9]+)\s*$").unwrap();
    pub static ref REM_DISCID: Regex =
        Regex::new(r#"(?i)^(REM\s+DISCID)\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref REM_GENRE: Regex =
        Regex::new(r#"(?i)^(REM\s+GENRE)\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref SONGWRITER: Regex =
        Regex::new(r#"(?i)^SONGWRITER\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref TITLE: Regex =
        Regex::new(r#"(?i)^TITLE\s+((?:"[^"]*")|\S+)\s*$"#).unwrap();
    pub static ref TRACK: Regex = Regex::new(r"(?i)^TRACK\s+([0-9]+)\s+(\S+)\s*$").unwrap();

    // The file types, flags, and track data types the cue sheet format
    // recognizes. Values outside these sets are accepted with a warning.
    pub static ref COMPLIANT_FILE_TYPES: BTreeSet<&'static str> =
        BTreeSet::from(["BINARY", "MOTOROLA", "AIFF", "WAVE", "MP3"]);
    pub static ref COMPLIANT_FLAGS: BTreeSet<&'static str> =
        BTreeSet::from(["DCP", "4CH", "PRE", "SCMS", "DATA"]);
    pub static ref COMPLIANT_DATA_TYPES: BTreeSet<&'static str> = BTreeSet::from([
        "AUDIO",
        "CDG",
        "MODE1/2048",
        "MODE1/2352",
        "MODE2/2336",
        "MODE2/2352",
        "CDI/2336",
        "CDI/2352",
    ]);
}
