use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the plot session
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Lookup of a parameter name that was never registered
    UnknownParameter(String),
    /// Programmatic set with a value that cannot be clamped (NaN, infinity)
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// The display layer could not apply an update
    RenderSurfaceFailure(String),
    /// Invalid settings in the embedded or user config
    Config(String),
    /// A sample grid or time sequence with no points
    EmptySequence(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownParameter(name) => write!(f, "unknown parameter '{}'", name),
            Error::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "value {} for parameter '{}' is outside [{}, {}]",
                value, name, min, max
            ),
            Error::RenderSurfaceFailure(msg) => write!(f, "render surface failure: {}", msg),
            Error::Config(msg) => write!(f, "config error: {}", msg),
            Error::EmptySequence(what) => write!(f, "{} must contain at least one point", what),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::RenderSurfaceFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::UnknownParameter("phase".into()).to_string(),
            "unknown parameter 'phase'"
        );
        let err = Error::OutOfRange {
            name: "speed".into(),
            value: f64::NAN,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "value NaN for parameter 'speed' is outside [0, 10]");
    }

    #[test]
    fn test_io_error_is_surface_failure() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(matches!(err, Error::RenderSurfaceFailure(msg) if msg == "pipe closed"));
    }
}
