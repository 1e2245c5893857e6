use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

/// A key → value mapping stored in one column.
///
/// Key order carries no meaning. `BTreeMap` keeps encoded bytes stable
/// for equal inputs.
pub type TypedMapping = BTreeMap<String, ScalarValue>;

/// Scalar value with an exact kind and width.
///
/// Strategy by type:
/// - Integers, floats, timestamps: stored as canonical text plus a width tag
/// - Bool, String: stored as native JSON
/// - Opaque: any other JSON value, passed through untouched
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    String(String),
    /// Instant with nanosecond precision. Equality compares instants, the
    /// offset is kept only for display.
    Timestamp(DateTime<FixedOffset>),
    Opaque(serde_json::Value),
}

impl ScalarValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Int8(_) => ScalarKind::Int8,
            ScalarValue::Int16(_) => ScalarKind::Int16,
            ScalarValue::Int32(_) => ScalarKind::Int32,
            ScalarValue::Int64(_) => ScalarKind::Int64,
            ScalarValue::UInt8(_) => ScalarKind::UInt8,
            ScalarValue::UInt16(_) => ScalarKind::UInt16,
            ScalarValue::UInt32(_) => ScalarKind::UInt32,
            ScalarValue::UInt64(_) => ScalarKind::UInt64,
            ScalarValue::Float32(_) => ScalarKind::Float32,
            ScalarValue::Float64(_) => ScalarKind::Float64,
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::String(_) => ScalarKind::String,
            ScalarValue::Timestamp(_) => ScalarKind::Timestamp,
            ScalarValue::Opaque(_) => ScalarKind::Opaque,
        }
    }

    /// Any integer kind widened to `i64`; `None` for other kinds and for
    /// `UInt64` values above `i64::MAX`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int8(v) => Some(i64::from(*v)),
            ScalarValue::Int16(v) => Some(i64::from(*v)),
            ScalarValue::Int32(v) => Some(i64::from(*v)),
            ScalarValue::Int64(v) => Some(*v),
            ScalarValue::UInt8(v) => Some(i64::from(*v)),
            ScalarValue::UInt16(v) => Some(i64::from(*v)),
            ScalarValue::UInt32(v) => Some(i64::from(*v)),
            ScalarValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// `Float32` or `Float64` as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float32(v) => Some(f64::from(*v)),
            ScalarValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrowed text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Value of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The instant of a `Timestamp`.
    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            ScalarValue::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

/// Kind of a [`ScalarValue`], with its stable wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    String,
    Timestamp,
    Opaque,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt8,
        ScalarKind::UInt16,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Bool,
        ScalarKind::String,
        ScalarKind::Timestamp,
        ScalarKind::Opaque,
    ];

    /// Tag written to the `t` field of a record.
    pub fn tag(self) -> &'static str {
        match self {
            ScalarKind::Int8 => "int8",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt8 => "uint8",
            ScalarKind::UInt16 => "uint16",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Timestamp => "Time",
            ScalarKind::Opaque => "opaque",
        }
    }

    /// Resolve a wire tag.
    ///
    /// Also accepts `int` and `uint`, the platform-width tags found in rows
    /// written by older producers on 64-bit hosts.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int" => return Some(ScalarKind::Int64),
            "uint" => return Some(ScalarKind::UInt64),
            _ => {}
        }
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Whether values of this kind are stored as canonical text.
    pub fn is_transformed(self) -> bool {
        match self {
            ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::UInt8
            | ScalarKind::UInt16
            | ScalarKind::UInt32
            | ScalarKind::UInt64
            | ScalarKind::Float32
            | ScalarKind::Float64
            | ScalarKind::Timestamp => true,
            ScalarKind::Bool | ScalarKind::String | ScalarKind::Opaque => false,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// From impls: Rust primitives → ScalarValue
// ---------------------------------------------------------------------------

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(v: $ty) -> Self {
                    ScalarValue::$variant(v)
                }
            }
        )*
    };
}

scalar_from! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    String => String,
    serde_json::Value => Opaque,
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::String(v.to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ScalarValue {
    fn from(v: DateTime<Tz>) -> Self {
        ScalarValue::Timestamp(v.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn every_kind_has_a_unique_tag() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_tag(kind.tag()), Some(kind));
        }
        let mut tags: Vec<_> = ScalarKind::ALL.iter().map(|k| k.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), ScalarKind::ALL.len());
    }

    #[test]
    fn platform_width_tags_resolve_to_64_bit() {
        assert_eq!(ScalarKind::from_tag("int"), Some(ScalarKind::Int64));
        assert_eq!(ScalarKind::from_tag("uint"), Some(ScalarKind::UInt64));
        assert_eq!(ScalarKind::from_tag("Int64"), None);
        assert_eq!(ScalarKind::from_tag(""), None);
    }

    #[test]
    fn from_keeps_exact_width() {
        assert_eq!(ScalarValue::from(7u8).kind(), ScalarKind::UInt8);
        assert_eq!(ScalarValue::from(-7i16).kind(), ScalarKind::Int16);
        assert_eq!(ScalarValue::from(1.5f32).kind(), ScalarKind::Float32);
        assert_eq!(ScalarValue::from("x").kind(), ScalarKind::String);
        assert_eq!(ScalarValue::from(Utc::now()).kind(), ScalarKind::Timestamp);
        assert_eq!(
            ScalarValue::from(serde_json::json!([1, 2])).kind(),
            ScalarKind::Opaque
        );
    }

    #[test]
    fn timestamps_compare_as_instants() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let plus_two = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(ScalarValue::from(utc), ScalarValue::from(plus_two));
    }

    #[test]
    fn accessors() {
        assert_eq!(ScalarValue::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(ScalarValue::UInt32(9).as_i64(), Some(9));
        assert_eq!(ScalarValue::Float32(0.5).as_f64(), Some(0.5));
        assert_eq!(ScalarValue::from("hi").as_str(), Some("hi"));
        assert_eq!(ScalarValue::Bool(true).as_bool(), Some(true));
        assert!(ScalarValue::Int8(1).as_timestamp().is_none());
    }
}
