use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for fallible TOC operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for floating TOC operations
#[derive(Debug)]
pub enum TocError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Invalid CSS selector
    Selector(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for TocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocError::Io(err) => write!(f, "IO error: {}", err),
            TocError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TocError::Selector(msg) => write!(f, "Selector error: {}", msg),
            TocError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for TocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TocError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TocError {
    fn from(err: io::Error) -> Self {
        TocError::Io(err)
    }
}

impl From<String> for TocError {
    fn from(msg: String) -> Self {
        TocError::Generic(msg)
    }
}

impl From<&str> for TocError {
    fn from(msg: &str) -> Self {
        TocError::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TocError::Config("min_level out of range".to_string()).to_string(),
            "Configuration error: min_level out of range"
        );
        assert_eq!(TocError::from("plain").to_string(), "plain");
        assert!(TocError::Selector("a..b".into()).to_string().starts_with("Selector error"));
    }

    #[test]
    fn test_io_error_source() {
        let err = TocError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing"));
    }
}
