use std::io;
use thiserror::Error;

/// Failures surfaced by the pool and the composite tree.
///
/// Registry lookups never fail: a miss simply creates the entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("No available objects in the pool.")]
    EmptyPool,

    #[error("{operation} operation is not supported for {component}.")]
    UnsupportedOperation {
        operation: &'static str,
        component: String,
    },

    #[error("child index {index} is out of range (composite has {len} children)")]
    ChildIndexOutOfRange { index: usize, len: usize },
}

impl PatternError {
    pub fn unsupported(operation: &'static str, component: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation,
            component: component.into(),
        }
    }
}

pub type Result<T, E = PatternError> = std::result::Result<T, E>;

/// Errors raised while loading or validating a [`crate::CatalogConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config at line {line}, column {col}: {message}")]
    Parse {
        line: usize,
        col: usize,
        message: String,
    },

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            line: err.line(),
            col: err.column(),
            message: err.to_string(),
        }
    }
}

// Without the source text there is no way back from a byte span to a
// position, so line and column stay 0. Prefer `ConfigError::from_toml`.
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse {
            line: 0,
            col: 0,
            message: err.message().to_string(),
        }
    }
}

impl ConfigError {
    /// toml reports a byte span, so the source text is needed to recover
    /// a 1-based line and column.
    pub fn from_toml(err: toml::de::Error, source: &str) -> Self {
        let (line, col) = match err.span() {
            Some(span) => {
                let before = &source[..span.start.min(source.len())];
                let line = before.matches('\n').count() + 1;
                let col = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
                (line, col)
            }
            None => (0, 0),
        };
        ConfigError::Parse {
            line,
            col,
            message: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PatternError::EmptyPool.to_string(),
            "No available objects in the pool."
        );
        assert_eq!(
            PatternError::unsupported("Add", "leaf 'A'").to_string(),
            "Add operation is not supported for leaf 'A'."
        );
        assert_eq!(
            PatternError::ChildIndexOutOfRange { index: 3, len: 1 }.to_string(),
            "child index 3 is out of range (composite has 1 children)"
        );
    }

    #[test]
    fn test_json_error_conversion_keeps_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        match ConfigError::from(err) {
            ConfigError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_error_question_mark_conversion() {
        fn parse(source: &str) -> Result<toml::Value, ConfigError> {
            Ok(toml::from_str(source)?)
        }
        match parse("level = ") {
            Err(ConfigError::Parse { line, col, message }) => {
                assert_eq!((line, col), (0, 0));
                assert!(!message.is_empty());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_toml_error_conversion_computes_line() {
        let source = "[logging]\nlevel = \"info\njson = true\n";
        let err = toml::from_str::<toml::Value>(source).unwrap_err();
        match ConfigError::from_toml(err, source) {
            ConfigError::Parse { line, col, .. } => {
                assert!(line >= 2);
                assert!(col >= 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
