//! Errors reported for malformed note strings.

use thiserror::Error;

/// Errors that can occur while parsing a note string like "C#4".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// The note string was empty.
    #[error("empty note string")]
    Empty,

    /// No octave number at the end of the note string.
    #[error("missing octave in note {0:?}")]
    MissingOctave(String),

    /// An octave was found but nothing precedes it.
    #[error("missing note name in note {0:?}")]
    MissingName(String),

    /// Octave digits that do not fit an integer.
    #[error("invalid octave in note {0:?}")]
    InvalidOctave(String),

    /// The note name is not one of the known names.
    #[error("unknown note name {0:?}")]
    UnknownName(String),

    /// The two ends of a key range are too far apart.
    #[error("range {start}..{end} spans more than {max} semitones")]
    RangeTooLarge {
        start: String,
        end: String,
        max: i64,
    },
}
