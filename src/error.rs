use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicSplitError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Existing output file has a malformed numeric suffix: {filename}")]
    MalformedOutputFilename { filename: String },

    #[error("Output directory is not writable: {path}")]
    OutputDirectoryUnwritable { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PicSplitError {
    fn user_message(&self) -> String {
        match self {
            PicSplitError::InputNotFound { path } => {
                format!("Input file not found: {}", path)
            }
            PicSplitError::MalformedOutputFilename { filename } => {
                format!(
                    "Existing output file has a malformed numeric suffix: {}",
                    filename
                )
            }
            PicSplitError::OutputDirectoryUnwritable { path } => {
                format!("Cannot write to output directory: {}", path)
            }
            PicSplitError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PicSplitError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            PicSplitError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PicSplitError::InputNotFound { .. } => Some(
                "Check the input path for typos. Remaining input files are still processed."
                    .to_string(),
            ),
            PicSplitError::MalformedOutputFilename { .. } => Some(
                "The file is ignored when resuming numbering. Rename or remove it if it should \
                 be part of the sequence."
                    .to_string(),
            ),
            PicSplitError::OutputDirectoryUnwritable { .. } => Some(
                "Ensure the directory is on a writable filesystem and that you have permission \
                 to create files in it."
                    .to_string(),
            ),
            PicSplitError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PicSplitError {
    fn from(error: toml::de::Error) -> Self {
        PicSplitError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PicSplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = PicSplitError::InputNotFound {
            path: "/no/such/file.pic".to_string(),
        };
        assert!(error.user_message().contains("Input file not found"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_malformed_filename_message() {
        let error = PicSplitError::MalformedOutputFilename {
            filename: "Picture-abc.jpg".to_string(),
        };
        assert!(error.user_message().contains("Picture-abc.jpg"));
        assert!(error.suggestion().unwrap().contains("resuming"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = PicSplitError::from(io_error);
        assert!(matches!(error, PicSplitError::Io(_)));
    }

    #[test]
    fn test_cancelled_has_no_suggestion() {
        assert!(PicSplitError::Cancelled.suggestion().is_none());
    }
}
