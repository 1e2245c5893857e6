use serde::Deserialize;

use crate::error::CodecError;

/// Codec configuration, parsed from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// What to do with a transformed record whose tag is not recognized.
    #[serde(default)]
    pub unknown_tags: UnknownTagPolicy,

    /// Canonical text used for `float32` / `float64` values.
    #[serde(default)]
    pub floats: FloatFormat,
}

/// Handling of unrecognized tags on transformed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTagPolicy {
    /// Fail the whole decode.
    #[default]
    Reject,
    /// Keep the raw value as `ScalarValue::Opaque`.
    Passthrough,
}

/// Float text format.
///
/// `Fixed` matches rows written by existing producers but is lossy for
/// values needing more than `digits` fractional digits. `Shortest` writes
/// the shortest text that parses back to the identical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum FloatFormat {
    Fixed {
        #[serde(default = "default_float_digits")]
        digits: usize,
    },
    Shortest,
}

impl Default for FloatFormat {
    fn default() -> Self {
        FloatFormat::Fixed {
            digits: default_float_digits(),
        }
    }
}

fn default_float_digits() -> usize {
    6
}

impl CodecConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CodecError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CodecError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, CodecError> {
        toml::from_str(toml_str).map_err(|e| CodecError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CodecConfig::parse("").unwrap();
        assert_eq!(config.unknown_tags, UnknownTagPolicy::Reject);
        assert_eq!(config.floats, FloatFormat::Fixed { digits: 6 });
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn parses_all_options() {
        let config = CodecConfig::parse(
            r#"
            unknown_tags = "passthrough"

            [floats]
            style = "fixed"
            digits = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.unknown_tags, UnknownTagPolicy::Passthrough);
        assert_eq!(config.floats, FloatFormat::Fixed { digits: 9 });

        let config = CodecConfig::parse("[floats]\nstyle = \"shortest\"\n").unwrap();
        assert_eq!(config.floats, FloatFormat::Shortest);

        let config = CodecConfig::parse("[floats]\nstyle = \"fixed\"\n").unwrap();
        assert_eq!(config.floats, FloatFormat::Fixed { digits: 6 });
    }

    #[test]
    fn bad_config_is_a_config_error() {
        let err = CodecConfig::parse("unknown_tags = \"ignore\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = CodecConfig::parse("precision = 3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = CodecConfig::load("/nonexistent/rowmap.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("/nonexistent/rowmap.toml"));
    }
}
