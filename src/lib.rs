//! A forgiving parser, validator, and serializer for CD cue sheets.
//!
//! Cue sheets in the wild are full of small defects, so the parser never
//! rejects content: every defect is recorded as a [`Message`] on the
//! resulting [`CueSheet`] while the offending value is still stored. Only an
//! I/O failure aborts a parse.
//!
//! ```
//! use cueparse::parse_str;
//!
//! let sheet = parse_str(
//!     "FILE \"disc.bin\" BINARY\n\
//!      TRACK 01 AUDIO\n\
//!      INDEX 01 00:00:00",
//! );
//!
//! assert!(sheet.messages.is_empty());
//! assert_eq!(sheet.file_data[0].track_data[0].number, 1);
//! ```

pub mod messages;
pub mod models;
pub mod parser;
pub mod serializer;

pub use messages::{LineOfInput, Message, MessageKind, Severity};
pub use models::{CueSheet, FileData, Index, Position, TrackData};
pub use parser::error::{CueParseError, CueParseResult};
pub use parser::{parse, parse_file, parse_str};
pub use serializer::CueSheetSerializer;
