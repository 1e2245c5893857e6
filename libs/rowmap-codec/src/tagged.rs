use rowmap_api::{
    CodecConfig, CodecError, ColumnCodec, DecodeError, Record, ScalarKind, ScalarValue,
    TypedMapping, UnknownTagPolicy,
};
use serde_json::Value;

use crate::canonical;

// ═══════════════════════════════════════════════════════════════
//  TaggedMapCodec
// ═══════════════════════════════════════════════════════════════

/// `TypedMapping ↔ bytes` codec.
///
/// Each entry becomes one [`Record`]; the column holds a JSON array of
/// them. JSON has a single number type, so integers, floats and
/// timestamps travel as canonical text next to a width tag and are parsed
/// back into exactly that width on decode.
#[derive(Debug, Clone, Default)]
pub struct TaggedMapCodec {
    config: CodecConfig,
}

impl TaggedMapCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode every entry of `mapping`. The mapping is not modified.
    ///
    /// A timestamp outside years 0000-9999 has no RFC 3339 text and fails
    /// the whole call with [`CodecError::Unencodable`].
    pub fn encode(&self, mapping: &TypedMapping) -> Result<Vec<u8>, CodecError> {
        let records = mapping
            .iter()
            .map(|(key, value)| self.encode_entry(key, value))
            .collect::<Result<Vec<Record>, _>>()?;
        let bytes = serde_json::to_vec(&records).map_err(CodecError::Encode)?;
        tracing::debug!(records = records.len(), bytes = bytes.len(), "encoded mapping");
        Ok(bytes)
    }

    /// Rebuild a mapping from `bytes`.
    ///
    /// Empty input (or JSON `null`) is an absent row and yields an empty
    /// mapping. A single bad record fails the whole call.
    pub fn decode(&self, bytes: &[u8]) -> Result<TypedMapping, CodecError> {
        if bytes.trim_ascii().is_empty() {
            return Ok(TypedMapping::new());
        }

        let records: Option<Vec<Record>> =
            serde_json::from_slice(bytes).map_err(DecodeError::Malformed)?;
        let records = records.unwrap_or_default();
        let count = records.len();

        let mut mapping = TypedMapping::new();
        for record in records {
            let (key, value) = self.decode_record(record)?;
            mapping.insert(key, value);
        }

        tracing::debug!(records = count, bytes = bytes.len(), "decoded mapping");
        Ok(mapping)
    }

    fn encode_entry(&self, key: &str, value: &ScalarValue) -> Result<Record, CodecError> {
        let tag = value.kind().tag();
        let floats = self.config.floats;
        let record = match value {
            ScalarValue::Int8(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::Int16(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::Int32(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::Int64(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::UInt8(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::UInt16(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::UInt32(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::UInt64(v) => Record::text(key, tag, canonical::format_int(v)),
            ScalarValue::Float32(v) => Record::text(key, tag, canonical::format_float(v, floats)),
            ScalarValue::Float64(v) => Record::text(key, tag, canonical::format_float(v, floats)),
            ScalarValue::Timestamp(t) => {
                let text = canonical::format_time(t).map_err(|reason| CodecError::Unencodable {
                    key: key.to_string(),
                    tag: tag.to_string(),
                    reason,
                })?;
                Record::text(key, tag, text)
            }
            ScalarValue::Bool(b) => Record::native(key, tag, Value::Bool(*b)),
            ScalarValue::String(s) => Record::native(key, tag, Value::String(s.clone())),
            ScalarValue::Opaque(v) => Record::native(key, tag, v.clone()),
        };
        Ok(record)
    }

    fn decode_record(&self, record: Record) -> Result<(String, ScalarValue), DecodeError> {
        let Record {
            key,
            value,
            kind: tag,
            transformed,
        } = record;

        // Native records: the tag is informational, the JSON shape decides.
        if !transformed {
            let scalar = match (tag.as_str(), value) {
                ("opaque", v) => ScalarValue::Opaque(v),
                (_, Value::Bool(b)) => ScalarValue::Bool(b),
                (_, Value::String(s)) => ScalarValue::String(s),
                (_, v) => ScalarValue::Opaque(v),
            };
            tracing::trace!(key = %key, tag = %tag, "decoded native record");
            return Ok((key, scalar));
        }

        let Some(kind) = ScalarKind::from_tag(&tag).filter(|k| k.is_transformed()) else {
            return self.unknown_tag(key, tag, value);
        };

        let Value::String(text) = value else {
            return Err(DecodeError::NotText { key, tag });
        };

        match parse_text(kind, &text) {
            Ok(scalar) => {
                tracing::trace!(key = %key, tag = %tag, "decoded text record");
                Ok((key, scalar))
            }
            Err(reason) => Err(DecodeError::InvalidValue {
                key,
                tag,
                value: text,
                reason,
            }),
        }
    }

    fn unknown_tag(
        &self,
        key: String,
        tag: String,
        value: Value,
    ) -> Result<(String, ScalarValue), DecodeError> {
        match self.config.unknown_tags {
            UnknownTagPolicy::Reject => Err(DecodeError::UnknownTag { key, tag }),
            UnknownTagPolicy::Passthrough => {
                tracing::warn!(key = %key, tag = %tag, "unrecognized type tag, keeping raw value");
                Ok((key, ScalarValue::Opaque(value)))
            }
        }
    }
}

/// Parse canonical text into a value of exactly `kind`.
fn parse_text(kind: ScalarKind, text: &str) -> Result<ScalarValue, String> {
    fn reason(e: impl std::fmt::Display) -> String {
        e.to_string()
    }

    let value = match kind {
        ScalarKind::Int8 => ScalarValue::Int8(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::Int16 => ScalarValue::Int16(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::Int32 => ScalarValue::Int32(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::Int64 => ScalarValue::Int64(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::UInt8 => ScalarValue::UInt8(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::UInt16 => ScalarValue::UInt16(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::UInt32 => ScalarValue::UInt32(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::UInt64 => ScalarValue::UInt64(canonical::parse_int(text).map_err(reason)?),
        ScalarKind::Float32 => {
            let wide = canonical::parse_float(text).map_err(reason)?;
            let narrow = canonical::narrow_f32(wide)
                .ok_or_else(|| format!("{text} is out of range for float32"))?;
            ScalarValue::Float32(narrow)
        }
        ScalarKind::Float64 => ScalarValue::Float64(canonical::parse_float(text).map_err(reason)?),
        ScalarKind::Timestamp => {
            ScalarValue::Timestamp(canonical::parse_time(text).map_err(reason)?)
        }
        ScalarKind::Bool | ScalarKind::String | ScalarKind::Opaque => {
            return Err(format!("{kind} values are not stored as text"));
        }
    };
    Ok(value)
}

impl ColumnCodec for TaggedMapCodec {
    type Value = TypedMapping;

    fn to_storage(&self, value: &TypedMapping) -> Result<Vec<u8>, CodecError> {
        self.encode(value)
    }

    /// An absent column is an empty mapping.
    fn from_storage(&self, bytes: Option<&[u8]>) -> Result<TypedMapping, CodecError> {
        match bytes {
            Some(bytes) => self.decode(bytes),
            None => Ok(TypedMapping::new()),
        }
    }
}
