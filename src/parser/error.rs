use thiserror::Error;

/// The only fatal condition while parsing. Malformed content never lands
/// here; it degrades to warnings on the sheet instead.
#[derive(Debug, Error)]
pub enum CueParseError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type CueParseResult<T> = Result<T, CueParseError>;
