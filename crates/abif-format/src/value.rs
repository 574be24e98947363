//! Decoded entry values.
//!
//! The `Value` enum is the result of decoding one directory entry. Numeric
//! and record kinds come in a scalar and an array flavour: a single element
//! is returned as the bare scalar.

use std::fmt;

/// A date record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Date {
    pub year: i16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredth: u8,
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hour, self.minute, self.second, self.hundredth
        )
    }
}

/// A thumbprint record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Thumb {
    pub d: i32,
    pub u: i32,
    pub c: u8,
    pub n: u8,
}

impl fmt::Display for Thumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.d, self.u, self.c, self.n)
    }
}

/// A decoded entry value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Value {
    Byte(u8),
    Bytes(Vec<u8>),
    Word(u32),
    Words(Vec<u32>),
    Short(i16),
    Shorts(Vec<i16>),
    Long(i32),
    Longs(Vec<i32>),
    Float(f32),
    Floats(Vec<f32>),
    Double(f64),
    Doubles(Vec<f64>),
    Date(Date),
    Dates(Vec<Date>),
    Time(Time),
    Times(Vec<Time>),
    Thumb(Thumb),
    Thumbs(Vec<Thumb>),
    Bool(bool),
    Bools(Vec<bool>),
    /// Any of the three string kinds.
    Text(String),
    /// Vendor/user-defined element type; the bytes are left undecoded.
    Unsupported { element_type: i16 },
}

impl Value {
    /// Check if this value is the undecodable user-type marker.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Value::Unsupported { .. })
    }

    /// Short name of the variant's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Byte(_) | Value::Bytes(_) => "byte",
            Value::Word(_) | Value::Words(_) => "word",
            Value::Short(_) | Value::Shorts(_) => "short",
            Value::Long(_) | Value::Longs(_) => "long",
            Value::Float(_) | Value::Floats(_) => "float",
            Value::Double(_) | Value::Doubles(_) => "double",
            Value::Date(_) | Value::Dates(_) => "date",
            Value::Time(_) | Value::Times(_) => "time",
            Value::Thumb(_) | Value::Thumbs(_) => "thumb",
            Value::Bool(_) | Value::Bools(_) => "bool",
            Value::Text(_) => "string",
            Value::Unsupported { .. } => "user",
        }
    }

    /// Try to get this value as a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Widen an integer value to a sequence of `i64`.
    ///
    /// Scalars become a one-element sequence. Returns `None` for every
    /// non-integer kind.
    pub fn to_integers(&self) -> Option<Vec<i64>> {
        let values = match self {
            Value::Byte(v) => vec![i64::from(*v)],
            Value::Bytes(v) => v.iter().map(|&x| i64::from(x)).collect(),
            Value::Word(v) => vec![i64::from(*v)],
            Value::Words(v) => v.iter().map(|&x| i64::from(x)).collect(),
            Value::Short(v) => vec![i64::from(*v)],
            Value::Shorts(v) => v.iter().map(|&x| i64::from(x)).collect(),
            Value::Long(v) => vec![i64::from(*v)],
            Value::Longs(v) => v.iter().map(|&x| i64::from(x)).collect(),
            _ => return None,
        };
        Some(values)
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}", v),
            Value::Bytes(v) => write_list(f, v),
            Value::Word(v) => write!(f, "{}", v),
            Value::Words(v) => write_list(f, v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Shorts(v) => write_list(f, v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Longs(v) => write_list(f, v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Floats(v) => write_list(f, v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Doubles(v) => write_list(f, v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Dates(v) => write_list(f, v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Times(v) => write_list(f, v),
            Value::Thumb(v) => write!(f, "{}", v),
            Value::Thumbs(v) => write_list(f, v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Bools(v) => write_list(f, v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Unsupported { element_type } => write!(f, "<user type {}>", element_type),
        }
    }
}
