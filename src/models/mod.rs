use crate::messages::{LineOfInput, Message, MessageKind};
use std::collections::BTreeSet;
use std::fmt::Display;

/// CD timecode as minutes, seconds, and frames (a frame is 1/75th of a
/// second). Stores whatever was parsed; range checking is the parser's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Position {
    pub fn new(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            minutes,
            seconds,
            frames,
        }
    }

    pub fn total_frames(&self) -> u64 {
        (u64::from(self.minutes) * 60 + u64::from(self.seconds)) * 75 + u64::from(self.frames)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

/// A timecode marker within a track. Index 0 marks the pregap start, index 1
/// the track start, higher numbers are subindices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Index {
    pub number: u32,
    pub position: Position,
}

impl Index {
    pub fn new(number: u32, position: Position) -> Self {
        Self { number, position }
    }
}

/// One TRACK block and everything scoped to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackData {
    pub number: u32,
    pub data_type: String,
    pub flags: BTreeSet<String>,
    pub isrc: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub title: Option<String>,
    pub pregap: Option<Position>,
    pub postgap: Option<Position>,
    pub indices: Vec<Index>,
}

impl TrackData {
    pub fn new(number: u32, data_type: impl Into<String>) -> Self {
        Self {
            number,
            data_type: data_type.into(),
            ..Self::default()
        }
    }
}

/// One FILE block and the tracks laid out in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileData {
    pub filename: String,
    pub file_type: String,
    pub track_data: Vec<TrackData>,
}

impl FileData {
    pub fn new(filename: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            file_type: file_type.into(),
            track_data: Vec::new(),
        }
    }

    /// All indices of all tracks in this file, in sheet order.
    pub fn all_indices(&self) -> impl Iterator<Item = &Index> {
        self.track_data.iter().flat_map(|track| track.indices.iter())
    }
}

/// The parsed cue sheet. Field values are stored as encountered, including
/// ones the parser flagged; consult [`CueSheet::messages`] for defects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    pub catalog: Option<String>,
    pub cd_text_file: Option<String>,
    pub performer: Option<String>,
    pub songwriter: Option<String>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub discid: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub file_data: Vec<FileData>,
    pub messages: Vec<Message>,
}

impl CueSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tracks across all files, in sheet order.
    pub fn all_track_data(&self) -> impl Iterator<Item = &TrackData> {
        self.file_data.iter().flat_map(|file| file.track_data.iter())
    }

    pub fn add_warning(&mut self, line: &LineOfInput, kind: MessageKind) {
        self.messages.push(Message::warning(line, kind));
    }

    pub fn add_error(&mut self, line: &LineOfInput, kind: MessageKind) {
        self.messages.push(Message::error(line, kind));
    }
}
