//! Renders a [`CueSheet`] back to cue sheet text. The output re-parses
//! without ordering diagnostics; no validation happens here.

use crate::models::{CueSheet, FileData, TrackData};

/// Turns a sheet model into cue sheet text. Free-text arguments are always
/// quoted; embedded double quotes have no escape syntax and pass through.
pub struct CueSheetSerializer {
    indentation: String,
}

impl Default for CueSheetSerializer {
    fn default() -> Self {
        Self {
            indentation: "  ".to_string(),
        }
    }
}

impl CueSheetSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A serializer with a custom indentation unit. Tracks are indented one
    /// unit, their contents two.
    pub fn with_indentation(indentation: impl Into<String>) -> Self {
        Self {
            indentation: indentation.into(),
        }
    }

    /// Renders the sheet. Sheet-scoped lines come first, then each file with
    /// its tracks. Within a track everything that must precede the indices
    /// is written before them and POSTGAP after.
    pub fn serialize(&self, sheet: &CueSheet) -> String {
        let mut output = String::new();

        if let Some(genre) = &sheet.genre {
            output.push_str(&format!("REM GENRE \"{}\"\n", genre));
        }
        if let Some(year) = sheet.year {
            output.push_str(&format!("REM DATE {}\n", year));
        }
        if let Some(discid) = &sheet.discid {
            output.push_str(&format!("REM DISCID \"{}\"\n", discid));
        }
        if let Some(comment) = &sheet.comment {
            output.push_str(&format!("REM COMMENT \"{}\"\n", comment));
        }
        if let Some(catalog) = &sheet.catalog {
            output.push_str(&format!("CATALOG {}\n", catalog));
        }
        if let Some(cd_text_file) = &sheet.cd_text_file {
            output.push_str(&format!("CDTEXTFILE \"{}\"\n", cd_text_file));
        }
        if let Some(performer) = &sheet.performer {
            output.push_str(&format!("PERFORMER \"{}\"\n", performer));
        }
        if let Some(songwriter) = &sheet.songwriter {
            output.push_str(&format!("SONGWRITER \"{}\"\n", songwriter));
        }
        if let Some(title) = &sheet.title {
            output.push_str(&format!("TITLE \"{}\"\n", title));
        }

        for file in &sheet.file_data {
            self.serialize_file_data(&mut output, file);
        }

        output
    }

    fn serialize_file_data(&self, output: &mut String, file: &FileData) {
        // A file context synthesized for stray data has no FILE line of its
        // own; only its contents are rendered.
        if !file.filename.is_empty() || !file.file_type.is_empty() {
            output.push_str(&format!("FILE \"{}\" {}\n", file.filename, file.file_type));
        }

        for track in &file.track_data {
            self.serialize_track_data(output, track);
        }
    }

    fn serialize_track_data(&self, output: &mut String, track: &TrackData) {
        let inner = self.indentation.repeat(2);

        // Same rule for a synthesized track context.
        if track.number != 0 || !track.data_type.is_empty() {
            output.push_str(&format!(
                "{}TRACK {:02} {}\n",
                self.indentation, track.number, track.data_type
            ));
        }

        if !track.flags.is_empty() {
            let flags: Vec<&str> = track.flags.iter().map(String::as_str).collect();
            output.push_str(&format!("{}FLAGS {}\n", inner, flags.join(" ")));
        }
        if let Some(isrc) = &track.isrc {
            output.push_str(&format!("{}ISRC {}\n", inner, isrc));
        }
        if let Some(title) = &track.title {
            output.push_str(&format!("{}TITLE \"{}\"\n", inner, title));
        }
        if let Some(performer) = &track.performer {
            output.push_str(&format!("{}PERFORMER \"{}\"\n", inner, performer));
        }
        if let Some(songwriter) = &track.songwriter {
            output.push_str(&format!("{}SONGWRITER \"{}\"\n", inner, songwriter));
        }
        if let Some(pregap) = track.pregap {
            output.push_str(&format!("{}PREGAP {}\n", inner, pregap));
        }
        for index in &track.indices {
            output.push_str(&format!(
                "{}INDEX {:02} {}\n",
                inner, index.number, index.position
            ));
        }
        if let Some(postgap) = track.postgap {
            output.push_str(&format!("{}POSTGAP {}\n", inner, postgap));
        }
    }
}
