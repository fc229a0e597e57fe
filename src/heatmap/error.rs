use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a sample file into a heatmap
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// Input unreadable or output unwritable
    #[error("File access error for '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sample count incompatible with the declared grid shape
    #[error("Shape error: {0}")]
    Shape(String),

    /// Configuration error (missing grid shape, invalid ranges, unknown palette)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing backend error
    #[error("Render error: {0}")]
    Render(String),

    /// PNG encoder error
    #[error("Encode error: {0}")]
    Encode(String),
}

impl HeatmapError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HeatmapError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn is_shape_error(&self) -> bool {
        matches!(self, HeatmapError::Shape(_))
    }

    pub fn is_file_access_error(&self) -> bool {
        matches!(self, HeatmapError::FileAccess { .. })
    }
}

/// Type alias for Results using HeatmapError
pub type Result<T> = std::result::Result<T, HeatmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_message_names_path() {
        let err = HeatmapError::file_access(
            "testing/MyMesh",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("testing/MyMesh"));
        assert!(msg.contains("no such file"));
        assert!(err.is_file_access_error());
        assert!(!err.is_shape_error());
    }

    #[test]
    fn test_shape_predicate() {
        let err = HeatmapError::Shape("10 samples, expected 10000".to_string());
        assert!(err.is_shape_error());
        assert!(!err.is_file_access_error());
    }
}
