//! Line-by-line cue sheet parser. Defective content never aborts a parse; it
//! is recorded as warnings on the sheet while the offending values are still
//! stored. Only I/O failure from the underlying reader ends parsing early.

use crate::messages::{LineOfInput, MessageKind};
use crate::models::{CueSheet, FileData, Index, Position, TrackData};
use crate::parser::error::CueParseResult;
use crate::parser::grammar::Command;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod error;
mod grammar;

/// Parses a cue sheet from a line source. Fails only when the reader fails;
/// everything else lands as warnings on the returned sheet.
pub fn parse(reader: impl BufRead) -> CueParseResult<CueSheet> {
    let mut sheet = CueSheet::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        parse_line(&LineOfInput::new(number + 1, line.trim()), &mut sheet);
    }

    debug!(
        "Parsed cue sheet: {} file(s), {} track(s), {} message(s)",
        sheet.file_data.len(),
        sheet.all_track_data().count(),
        sheet.messages.len()
    );

    Ok(sheet)
}

/// Parses a cue sheet held in memory. Cannot fail.
pub fn parse_str(input: &str) -> CueSheet {
    let mut sheet = CueSheet::new();

    for (number, line) in input.lines().enumerate() {
        parse_line(&LineOfInput::new(number + 1, line.trim()), &mut sheet);
    }

    sheet
}

/// Opens a cue sheet file and parses it.
pub fn parse_file(path: impl AsRef<Path>) -> CueParseResult<CueSheet> {
    let path = path.as_ref();
    debug!("Parsing cue sheet file: {:?}", path);

    let file = File::open(path)?;
    parse(BufReader::new(file))
}

fn parse_line(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    if line.input.is_empty() {
        sheet.add_warning(line, MessageKind::EmptyLine);
        return;
    }
    if line.input.len() < 2 {
        sheet.add_warning(line, MessageKind::UnparseableInput);
        return;
    }

    let token = line.input.split_whitespace().next().unwrap_or_default();
    let command = match Command::from_keyword(token) {
        Some(command) => command,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    if token != command.keyword() {
        sheet.add_warning(line, MessageKind::TokenNotUppercase);
    }

    match command {
        Command::Catalog => parse_catalog(line, sheet),
        Command::CdTextFile => parse_cd_text_file(line, sheet),
        Command::File => parse_file_command(line, sheet),
        Command::Flags => parse_flags(line, sheet),
        Command::Index => parse_index(line, sheet),
        Command::Isrc => parse_isrc(line, sheet),
        Command::Performer => parse_cd_text(line, sheet, CdTextField::Performer),
        Command::Postgap => parse_postgap(line, sheet),
        Command::Pregap => parse_pregap(line, sheet),
        Command::Rem => parse_rem(line, sheet),
        Command::Songwriter => parse_cd_text(line, sheet, CdTextField::Songwriter),
        Command::Title => parse_cd_text(line, sheet, CdTextField::Title),
        Command::Track => parse_track(line, sheet),
    }
}

fn parse_catalog(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let catalog = rest_after_keyword(line.input);

    if !grammar::CATALOG_NUMBER.is_match(catalog) {
        sheet.add_warning(line, MessageKind::InvalidCatalogNumber);
    }
    if sheet.catalog.is_some() {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }

    sheet.catalog = Some(catalog.to_string());
}

fn parse_cd_text_file(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::CDTEXTFILE.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    if sheet.cd_text_file.is_some() {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }

    sheet.cd_text_file = Some(strip_quotes(&captures[1]).to_string());
}

fn parse_file_command(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::FILE.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    if !grammar::COMPLIANT_FILE_TYPES.contains(&captures[2]) {
        sheet.add_warning(line, MessageKind::NoncompliantFileType);
    }

    // The rule that FILE must precede everything but CATALOG and REM is
    // broken by most sheets in circulation, so it goes unchecked.
    let filename = strip_quotes(&captures[1]);
    sheet.file_data.push(FileData::new(filename, &captures[2]));
}

fn parse_flags(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::FLAGS.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let flag_list = captures[1].trim();
    if flag_list.is_empty() {
        sheet.add_warning(line, MessageKind::NoFlags);
        return;
    }

    let (has_indices, has_flags) = {
        let track = last_track_data(line, sheet);
        (!track.indices.is_empty(), !track.flags.is_empty())
    };
    if has_indices {
        sheet.add_warning(line, MessageKind::FlagsInWrongPlace);
    }
    if has_flags {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }

    for flag in flag_list.split_whitespace() {
        if !grammar::COMPLIANT_FLAGS.contains(flag) {
            sheet.add_warning(line, MessageKind::NoncompliantFlag);
        }
    }

    let track = last_track_data(line, sheet);
    for flag in flag_list.split_whitespace() {
        track.flags.insert(flag.to_string());
    }
}

fn parse_index(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::INDEX.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let number_text = &captures[1];
    if number_text.len() != 2 {
        sheet.add_warning(line, MessageKind::WrongNumberOfDigits);
    }

    let (first_index_of_track, after_postgap, previous_number) = {
        let track = last_track_data(line, sheet);
        (
            track.indices.is_empty(),
            track.postgap.is_some(),
            track.indices.last().map(|index| index.number),
        )
    };

    // Postgap data must come after all indices. Warned once, at the first
    // index only.
    if first_index_of_track && after_postgap {
        sheet.add_warning(line, MessageKind::IndexAfterPostgap);
    }

    let number = match number_text.parse::<u32>() {
        Ok(number) => number,
        Err(_) => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let out_of_sequence = match previous_number {
        Some(previous) => u64::from(previous) + 1 != u64::from(number),
        None => number > 1,
    };
    if out_of_sequence {
        sheet.add_warning(line, MessageKind::InvalidIndexNumber);
    }

    let file_has_indices = sheet
        .file_data
        .last()
        .is_some_and(|file| file.all_indices().next().is_some());

    let position = parse_position(line, sheet, &captures[2]);

    if !file_has_indices && position != Position::default() {
        sheet.add_warning(line, MessageKind::InvalidFirstPosition);
    }

    last_track_data(line, sheet)
        .indices
        .push(Index::new(number, position));
}

fn parse_isrc(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let isrc = rest_after_keyword(line.input);

    if !grammar::ISRC_CODE.is_match(isrc) {
        sheet.add_warning(line, MessageKind::NoncompliantIsrcCode);
    }

    let (has_indices, already_set) = {
        let track = last_track_data(line, sheet);
        (!track.indices.is_empty(), track.isrc.is_some())
    };
    if has_indices {
        sheet.add_warning(line, MessageKind::IsrcInWrongPlace);
    }
    if already_set {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }

    last_track_data(line, sheet).isrc = Some(isrc.to_string());
}

/// The three CD-TEXT commands share one shape and one scope rule: before any
/// track of the current file they describe the album, afterwards the track.
#[derive(Debug, Clone, Copy)]
enum CdTextField {
    Performer,
    Songwriter,
    Title,
}

fn parse_cd_text(line: &LineOfInput<'_>, sheet: &mut CueSheet, field: CdTextField) {
    let captures = match field {
        CdTextField::Performer => grammar::PERFORMER.captures(line.input),
        CdTextField::Songwriter => grammar::SONGWRITER.captures(line.input),
        CdTextField::Title => grammar::TITLE.captures(line.input),
    };
    let captures = match captures {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let value = strip_quotes(&captures[1]);
    if value.chars().count() > 80 {
        sheet.add_warning(line, MessageKind::FieldLengthOver80);
    }

    let track_scoped = sheet
        .file_data
        .last()
        .is_some_and(|file| !file.track_data.is_empty());

    let slot = if track_scoped {
        let track = last_track_data(line, sheet);
        match field {
            CdTextField::Performer => &mut track.performer,
            CdTextField::Songwriter => &mut track.songwriter,
            CdTextField::Title => &mut track.title,
        }
    } else {
        match field {
            CdTextField::Performer => &mut sheet.performer,
            CdTextField::Songwriter => &mut sheet.songwriter,
            CdTextField::Title => &mut sheet.title,
        }
    };

    if slot.replace(value.to_string()).is_some() {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }
}

fn parse_pregap(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::PREGAP.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let (already_set, has_indices) = {
        let track = last_track_data(line, sheet);
        (track.pregap.is_some(), !track.indices.is_empty())
    };
    if already_set {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }
    if has_indices {
        sheet.add_warning(line, MessageKind::PregapInWrongPlace);
    }

    let position = parse_position(line, sheet, &captures[1]);
    last_track_data(line, sheet).pregap = Some(position);
}

fn parse_postgap(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::POSTGAP.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let already_set = last_track_data(line, sheet).postgap.is_some();
    if already_set {
        sheet.add_warning(line, MessageKind::DatumAppearsTooOften);
    }

    let position = parse_position(line, sheet, &captures[1]);
    last_track_data(line, sheet).postgap = Some(position);
}

fn parse_rem(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    // Popular rippers store structured data in REM lines. The recognized
    // forms are captured; any other REM content is ignored without a warning.
    let rest = rest_after_keyword(line.input);

    match rest.chars().next().map(|first| first.to_ascii_uppercase()) {
        Some('C') => parse_rem_comment(line, sheet),
        Some('D') => {
            if !parse_rem_date(line, sheet) {
                parse_rem_discid(line, sheet);
            }
        }
        Some('G') => parse_rem_genre(line, sheet),
        _ => {}
    }
}

fn parse_rem_comment(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    if let Some(captures) = grammar::REM_COMMENT.captures(line.input) {
        warn_unless_uppercase(line, sheet, &captures[1]);
        sheet.comment = Some(strip_quotes(&captures[2]).to_string());
    }
}

fn parse_rem_date(line: &LineOfInput<'_>, sheet: &mut CueSheet) -> bool {
    let captures = match grammar::REM_DATE.captures(line.input) {
        Some(captures) => captures,
        None => return false,
    };

    warn_unless_uppercase(line, sheet, &captures[1]);

    match captures[2].parse::<u32>() {
        Ok(year) => {
            if !(1..=9999).contains(&year) {
                sheet.add_warning(line, MessageKind::InvalidYear);
            }
            sheet.year = Some(year);
        }
        Err(_) => sheet.add_warning(line, MessageKind::InvalidYear),
    }

    true
}

fn parse_rem_discid(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    if let Some(captures) = grammar::REM_DISCID.captures(line.input) {
        warn_unless_uppercase(line, sheet, &captures[1]);
        sheet.discid = Some(strip_quotes(&captures[2]).to_string());
    }
}

fn parse_rem_genre(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    if let Some(captures) = grammar::REM_GENRE.captures(line.input) {
        warn_unless_uppercase(line, sheet, &captures[1]);
        sheet.genre = Some(strip_quotes(&captures[2]).to_string());
    }
}

fn parse_track(line: &LineOfInput<'_>, sheet: &mut CueSheet) {
    let captures = match grammar::TRACK.captures(line.input) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let number_text = &captures[1];
    if number_text.len() != 2 {
        sheet.add_warning(line, MessageKind::WrongNumberOfDigits);
    }
    let number = match number_text.parse::<u32>() {
        Ok(number) => number,
        Err(_) => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return;
        }
    };

    let data_type = &captures[2];
    if !grammar::COMPLIANT_DATA_TYPES.contains(data_type) {
        sheet.add_warning(line, MessageKind::NoncompliantDataType);
    }

    // Track numbers run across the whole sheet, not per file.
    let previous_number = sheet.all_track_data().last().map(|track| track.number);
    let out_of_sequence = match previous_number {
        Some(previous) => u64::from(previous) + 1 != u64::from(number),
        None => number != 1,
    };
    if out_of_sequence {
        sheet.add_warning(line, MessageKind::InvalidTrackNumber);
    }

    last_file_data(line, sheet)
        .track_data
        .push(TrackData::new(number, data_type));
}

/// Parses `mm:ss:ff`. Range and digit-width violations are warned about but
/// the parsed values are kept; input that does not have the shape at all
/// yields the zero position.
fn parse_position(line: &LineOfInput<'_>, sheet: &mut CueSheet, text: &str) -> Position {
    let captures = match grammar::POSITION.captures(text) {
        Some(captures) => captures,
        None => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return Position::default();
        }
    };

    let minutes_text = &captures[1];
    let seconds_text = &captures[2];
    let frames_text = &captures[3];

    let (minutes, seconds, frames) = match (
        minutes_text.parse::<u32>(),
        seconds_text.parse::<u32>(),
        frames_text.parse::<u32>(),
    ) {
        (Ok(minutes), Ok(seconds), Ok(frames)) => (minutes, seconds, frames),
        _ => {
            sheet.add_warning(line, MessageKind::UnparseableInput);
            return Position::default();
        }
    };

    if minutes_text.len() != 2 || seconds_text.len() != 2 || frames_text.len() != 2 {
        sheet.add_warning(line, MessageKind::WrongNumberOfDigits);
    }
    if seconds > 59 {
        sheet.add_warning(line, MessageKind::InvalidSecondsValue);
    }
    if frames > 74 {
        sheet.add_warning(line, MessageKind::InvalidFramesValue);
    }

    Position::new(minutes, seconds, frames)
}

/// The last file of the sheet. If there is none, an empty one is created and
/// a warning added.
fn last_file_data<'a>(line: &LineOfInput<'_>, sheet: &'a mut CueSheet) -> &'a mut FileData {
    if sheet.file_data.is_empty() {
        sheet.file_data.push(FileData::default());
        sheet.add_warning(line, MessageKind::NoFileSpecified);
    }
    let index = sheet.file_data.len() - 1;
    &mut sheet.file_data[index]
}

/// The last track of the last file. Missing file and track contexts are
/// synthesized, each with a warning.
fn last_track_data<'a>(line: &LineOfInput<'_>, sheet: &'a mut CueSheet) -> &'a mut TrackData {
    if last_file_data(line, sheet).track_data.is_empty() {
        sheet.add_warning(line, MessageKind::NoTrackSpecified);
        last_file_data(line, sheet)
            .track_data
            .push(TrackData::default());
    }
    let file = last_file_data(line, sheet);
    let index = file.track_data.len() - 1;
    &mut file.track_data[index]
}

/// Everything after the first whitespace run, trimmed. Empty if the line is
/// a lone keyword.
fn rest_after_keyword(input: &str) -> &str {
    match input.find(char::is_whitespace) {
        Some(index) => input[index..].trim(),
        None => "",
    }
}

/// Strips one enclosing double quote from each end, if both are present.
/// Embedded quotes have no escape syntax and pass through untouched.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn warn_unless_uppercase(line: &LineOfInput<'_>, sheet: &mut CueSheet, token: &str) {
    if token != token.to_uppercase() {
        sheet.add_warning(line, MessageKind::TokenNotUppercase);
    }
}
