//! Error handling
//!
//! Errors fall into three categories, given by [ErrorKind]:
//!
//! - structural errors abort the parse. They identify the offending token and its byte offset.
//! - resource errors come from the file loader. By default they are attached to the
//!     node that requested the file and parsing continues; see [LoadError].
//! - definitions errors come from reading a definitions overlay.
//!
//! Unknown command and environment names are never errors.

use crate::token::Token;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unbalanced group: no closing brace for the `{{` at byte {}", .token.position())]
    UnbalancedGroup { token: Token },

    #[error("unexpected closing brace at byte {}", .token.position())]
    UnexpectedEndGroup { token: Token },

    #[error("math mode opened by `{token}` at byte {} is never closed", .token.position())]
    UnterminatedMath { token: Token },

    #[error("display math opened by `$$` at byte {} is not closed by `$$`", .token.position())]
    MismatchedDisplayMath { token: Token },

    #[error("invalid active character `{token}` at byte {}: a single ASCII non-alphanumeric character is required", .token.position())]
    InvalidActiveCharacter { token: Token },

    #[error("{}", invalid_argument_message(.command, .token.as_ref()))]
    InvalidArgument {
        command: String,
        token: Option<Token>,
    },

    #[error("optional argument opened at byte {} is never closed by `]`", .token.position())]
    UnterminatedOptionalArgument { token: Token },

    #[error("{}", malformed_environment_message(.message, .token.as_ref()))]
    MalformedEnvironment {
        token: Option<Token>,
        message: String,
    },

    #[error("expansion of `\\{name}` at byte {} exceeds the maximum depth of {max} nested macro expansions", .token.position())]
    ExpansionDepthExceeded {
        name: String,
        token: Token,
        max: usize,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to read definitions: {0}")]
    Overlay(#[from] serde_json::Error),

    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

fn invalid_argument_message(command: &str, token: Option<&Token>) -> String {
    match token {
        None => format!("missing argument for `{command}` at end of input"),
        Some(token) => format!(
            "token `{}` ({}) at byte {} is not valid as an argument of `{command}`",
            token,
            token.cat_code(),
            token.position()
        ),
    }
}

fn malformed_environment_message(message: &str, token: Option<&Token>) -> String {
    match token {
        None => format!("malformed environment: {message} (at end of input)"),
        Some(token) => format!(
            "malformed environment: {message} (found `{}` at byte {})",
            token,
            token.position()
        ),
    }
}

/// Category of an [Error].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    Resource,
    Definitions,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Load(_) => ErrorKind::Resource,
            Error::Overlay(_) | Error::Io { .. } => ErrorKind::Definitions,
            _ => ErrorKind::Structural,
        }
    }

    /// The token the parser was looking at when the error occurred, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Error::UnbalancedGroup { token }
            | Error::UnexpectedEndGroup { token }
            | Error::UnterminatedMath { token }
            | Error::MismatchedDisplayMath { token }
            | Error::InvalidActiveCharacter { token }
            | Error::UnterminatedOptionalArgument { token }
            | Error::ExpansionDepthExceeded { token, .. } => Some(token),
            Error::InvalidArgument { token, .. } | Error::MalformedEnvironment { token, .. } => {
                token.as_ref()
            }
            _ => None,
        }
    }
}

/// Error returned by a [FileLoader](crate::loader::FileLoader).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum LoadError {
    #[error("file `{path}` could not be loaded: {message}")]
    NotFound { path: String, message: String },

    #[error("file `{path}` not loaded: maximum include depth {max} exceeded")]
    DepthExceeded { path: String, max: usize },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::NotFound { path, .. } | LoadError::DepthExceeded { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::CatCode;

    #[test]
    fn display_includes_position() {
        let err = Error::UnbalancedGroup {
            token: Token::new(CatCode::BeginGroup, "{", 7),
        };
        assert_eq!(
            err.to_string(),
            "unbalanced group: no closing brace for the `{` at byte 7"
        );
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn invalid_argument_at_end_of_input() {
        let err = Error::InvalidArgument {
            command: "textbf".into(),
            token: None,
        };
        assert_eq!(err.to_string(), "missing argument for `textbf` at end of input");
        assert!(err.token().is_none());
    }

    #[test]
    fn load_errors_are_resource_errors() {
        let err: Error = LoadError::NotFound {
            path: "a.tex".into(),
            message: "no such file".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Resource);
    }
}
