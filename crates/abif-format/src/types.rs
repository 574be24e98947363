//! ABIF element types.

/// First tag number reserved for vendor/user-defined element types.
pub const USER_TYPE_START: i16 = 1024;

/// Element type of a directory entry.
///
/// The discriminants are the binary values from the ABIF directory. Tags at
/// or above [`USER_TYPE_START`] are user-defined and cannot be decoded;
/// anything else outside the table is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElementType {
    /// Unsigned 8-bit integer.
    Byte,
    /// Fixed-length character string.
    Char,
    /// Unsigned 32-bit integer.
    Word,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Date record (year, month, day).
    Date,
    /// Time record (hour, minute, second, hundredth).
    Time,
    /// Thumbprint record.
    Thumb,
    /// Boolean byte.
    Bool,
    /// Length-prefixed string.
    PString,
    /// Zero-terminated string.
    CString,
    /// Vendor/user-defined type.
    User(i16),
    /// Tag outside the known vocabulary.
    Unknown(i16),
}

impl ElementType {
    /// Parse from the raw tag value.
    pub fn from_raw(value: i16) -> Self {
        match value {
            1 => Self::Byte,
            2 => Self::Char,
            3 => Self::Word,
            4 => Self::Short,
            5 => Self::Long,
            7 => Self::Float,
            8 => Self::Double,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::Thumb,
            13 => Self::Bool,
            18 => Self::PString,
            19 => Self::CString,
            v if v >= USER_TYPE_START => Self::User(v),
            v => Self::Unknown(v),
        }
    }

    /// Get the raw tag value.
    pub fn raw(&self) -> i16 {
        match self {
            Self::Byte => 1,
            Self::Char => 2,
            Self::Word => 3,
            Self::Short => 4,
            Self::Long => 5,
            Self::Float => 7,
            Self::Double => 8,
            Self::Date => 10,
            Self::Time => 11,
            Self::Thumb => 12,
            Self::Bool => 13,
            Self::PString => 18,
            Self::CString => 19,
            Self::User(v) | Self::Unknown(v) => *v,
        }
    }

    /// Get the string name for this element type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Word => "word",
            Self::Short => "short",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Date => "date",
            Self::Time => "time",
            Self::Thumb => "thumb",
            Self::Bool => "bool",
            Self::PString => "pString",
            Self::CString => "cString",
            Self::User(_) => "user",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Whether this type is a string kind (count is ignored or means length).
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Char | Self::PString | Self::CString)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
