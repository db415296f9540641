//! Crate-level error types.

use std::fmt;

/// Errors produced by the seqr-track crate.
#[derive(Debug)]
pub enum TrackError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Feature record JSON could not be parsed.
    RecordsParse(String),
    /// A residue range that is reversed or leaves the track domain.
    InvalidRange {
        /// First residue of the requested run.
        start: i64,
        /// Last residue of the requested run.
        end: i64,
    },
    /// The external structure viewer rejected or failed a command.
    Viewer(String),
    /// Process-wide options were installed more than once.
    OptionsAlreadyInstalled,
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::RecordsParse(msg) => {
                write!(f, "feature records parse error: {msg}")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "invalid residue range {start}-{end}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::OptionsAlreadyInstalled => {
                write!(f, "options were already installed")
            }
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Why a single feature record was left out of the track.
///
/// Record errors never abort normalization; the offending record is skipped
/// and the rest of the input renders normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A range whose end precedes its start.
    MalformedRange {
        /// Range start.
        start: i64,
        /// Range end.
        end: i64,
    },
    /// A coordinate outside `[0, domain_max]`.
    PositionOutOfDomain {
        /// The offending coordinate.
        position: i64,
        /// Upper bound of the domain.
        domain_max: u32,
    },
    /// The entry is not a `{type, data}` object.
    MalformedRecord(String),
    /// The record names a category the track does not know.
    UnknownCategory(String),
    /// A coordinate that is not an integer (fractional or too large).
    InvalidCoordinate(String),
    /// The extent shape does not match the category (e.g. a point set for
    /// exons, or a range with the wrong number of coordinates).
    ExtentMismatch {
        /// Display name of the category.
        category: String,
        /// Number of coordinates supplied.
        len: usize,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRange { start, end } => {
                write!(f, "range end {end} precedes start {start}")
            }
            Self::PositionOutOfDomain {
                position,
                domain_max,
            } => write!(f, "position {position} outside [0, {domain_max}]"),
            Self::MalformedRecord(msg) => {
                write!(f, "malformed feature record: {msg}")
            }
            Self::UnknownCategory(name) => {
                write!(f, "unknown feature category '{name}'")
            }
            Self::InvalidCoordinate(text) => {
                write!(f, "coordinate {text} is not an integer residue")
            }
            Self::ExtentMismatch { category, len } => write!(
                f,
                "extent with {len} coordinate(s) does not fit category \
                 '{category}'"
            ),
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TrackError::InvalidRange { start: 50, end: 20 };
        assert_eq!(err.to_string(), "invalid residue range 50-20");

        let rec = RecordError::UnknownCategory("Introns".to_owned());
        assert_eq!(rec.to_string(), "unknown feature category 'Introns'");

        let coord = RecordError::InvalidCoordinate("7.5".to_owned());
        assert_eq!(coord.to_string(), "coordinate 7.5 is not an integer residue");
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error as _;
        let err = TrackError::from(std::io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(TrackError::Viewer("down".to_owned()).source().is_none());
    }
}
