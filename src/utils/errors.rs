use std::path::PathBuf;
use thiserror::Error;

/// Extra context attached to configuration errors
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub file_path: Option<PathBuf>,
    pub field: Option<String>,
    pub hint: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum KilnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<ErrorContext>,
    },

    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl KilnError {
    /// Create a configuration error without context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    pub fn config_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context),
        }
    }

    pub fn pattern(pattern: &str, err: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }

    /// Format error with context lines for terminal display
    pub fn format_detailed(&self) -> String {
        match self {
            KilnError::Config {
                message,
                context: Some(ctx),
            } => {
                let mut output = format!("❌ Configuration Error: {}", message);

                if let Some(ref file_path) = ctx.file_path {
                    output.push_str(&format!("\n📁 File: {}", file_path.display()));
                }
                if let Some(ref field) = ctx.field {
                    output.push_str(&format!("\n🔑 Field: {}", field));
                }
                if let Some(ref hint) = ctx.hint {
                    output.push_str(&format!("\n💡 Hint: {}", hint));
                }

                output
            }
            KilnError::FileNotFound(path) => {
                format!("❌ File not found: {}\n💡 Hint: check the path or pass it explicitly on the command line", path.display())
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, KilnError>;
