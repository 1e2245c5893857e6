use std::fmt;

/// Category of a codec error. Lets callers decide how to react
/// (fail the operation, reject input, fix configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural encoding failed. Unexpected, fatal to the operation.
    Encode,
    /// Stored bytes could not be turned back into a value.
    Decode,
    /// Caller input rejected before any work was done.
    Precondition,
    /// Invalid codec configuration.
    Config,
    /// Row store failure.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Encode => f.write_str("encode"),
            ErrorKind::Decode => f.write_str("decode"),
            ErrorKind::Precondition => f.write_str("precondition"),
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Storage => f.write_str("storage"),
        }
    }
}

/// Failure to reconstruct a value from stored bytes.
///
/// Record-level variants name the offending key so a bad row can be
/// traced back to the entry that broke it.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed column: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("column value is absent")]
    Absent,

    #[error("key '{key}': value tagged '{tag}' must be a string")]
    NotText { key: String, tag: String },

    #[error("key '{key}': cannot read {value:?} as {tag}: {reason}")]
    InvalidValue {
        key: String,
        tag: String,
        value: String,
        reason: String,
    },

    #[error("key '{key}': unrecognized type tag '{tag}'")]
    UnknownTag { key: String, tag: String },
}

/// Error returned by every codec and row store operation.
///
/// There is no `From<serde_json::Error>`: the same JSON error means
/// different things on the encode and decode paths.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A value has no canonical text that decodes back to it.
    #[error("encode error: key '{key}': cannot write {tag} value: {reason}")]
    Unencodable {
        key: String,
        tag: String,
        reason: String,
    },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Encode(_) | CodecError::Unencodable { .. } => ErrorKind::Encode,
            CodecError::Decode(_) => ErrorKind::Decode,
            CodecError::Precondition(_) => ErrorKind::Precondition,
            CodecError::Config(_) => ErrorKind::Config,
            CodecError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Add context to the error.
    ///
    /// Message-carrying variants get the context prepended. Variants that
    /// wrap a source error are returned unchanged.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            CodecError::Precondition(msg) => CodecError::Precondition(format!("{ctx}: {msg}")),
            CodecError::Config(msg) => CodecError::Config(format!("{ctx}: {msg}")),
            CodecError::Storage(msg) => CodecError::Storage(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        let malformed = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert_eq!(
            CodecError::from(DecodeError::Malformed(malformed)).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            CodecError::Precondition("id".into()).kind(),
            ErrorKind::Precondition
        );
        assert_eq!(CodecError::Storage("x".into()).kind(), ErrorKind::Storage);
        assert_eq!(
            CodecError::Unencodable {
                key: "ts".into(),
                tag: "Time".into(),
                reason: "year 12000 is outside 0000-9999".into(),
            }
            .kind(),
            ErrorKind::Encode
        );
    }

    #[test]
    fn messages_name_the_key() {
        let err = CodecError::from(DecodeError::InvalidValue {
            key: "n".into(),
            tag: "int8".into(),
            value: "300".into(),
            reason: "number too large to fit in target type".into(),
        });
        let msg = err.to_string();
        assert!(msg.contains("key 'n'"), "{msg}");
        assert!(msg.contains("\"300\""), "{msg}");
        assert!(msg.contains("int8"), "{msg}");
    }

    #[test]
    fn context_is_prepended() {
        let err = CodecError::Storage("duplicate row".into()).with_context("row 'a'");
        assert_eq!(err.to_string(), "storage error: row 'a': duplicate row");

        let err = CodecError::from(DecodeError::Absent).with_context("ignored");
        assert_eq!(err.to_string(), "decode error: column value is absent");
    }
}
