/// The semantic type of a bound column.
///
/// This is the closed set of kinds the scan engine can write into and the
/// record derive can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Unsigned 8-bit integer
    U8,

    /// Unsigned 16-bit integer
    U16,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// 32-bit float
    F32,

    /// 64-bit float
    F64,

    /// UTF-8 text
    String,

    /// Opaque byte sequence
    Bytes,

    /// An instant, stored with second granularity
    Time,
}

impl Type {
    pub fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Integer or float.
    pub fn is_numeric(self) -> bool {
        self.is_signed() || self.is_unsigned() || self.is_float()
    }

    pub fn is_time(self) -> bool {
        matches!(self, Self::Time)
    }
}
