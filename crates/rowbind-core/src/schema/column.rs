use crate::stmt::{Type, Value};

use std::time::{SystemTime, UNIX_EPOCH};

/// A field type that maps to a single column.
pub trait Column {
    /// Semantic type used for descriptors and scan plans.
    const TYPE: Type;

    /// Typed mutable access for the scan engine.
    fn slot_mut(&mut self) -> SlotMut<'_>;

    /// The field's current value, as a statement argument.
    fn to_value(&self) -> Value;
}

/// A typed reference to one destination slot.
///
/// The scan engine writes through this instead of raw pointers; each variant
/// borrows the caller's field directly so no intermediate value is allocated.
#[derive(Debug)]
pub enum SlotMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Time(&'a mut SystemTime),
}

impl SlotMut<'_> {
    pub fn ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I8(_) => Type::I8,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::U8(_) => Type::U8,
            Self::U16(_) => Type::U16,
            Self::U32(_) => Type::U32,
            Self::U64(_) => Type::U64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::Time(_) => Type::Time,
        }
    }

    /// Resets the slot to its type's zero value. Owned buffers are cleared
    /// in place.
    pub fn reset(self) {
        match self {
            Self::Bool(dst) => *dst = false,
            Self::I8(dst) => *dst = 0,
            Self::I16(dst) => *dst = 0,
            Self::I32(dst) => *dst = 0,
            Self::I64(dst) => *dst = 0,
            Self::U8(dst) => *dst = 0,
            Self::U16(dst) => *dst = 0,
            Self::U32(dst) => *dst = 0,
            Self::U64(dst) => *dst = 0,
            Self::F32(dst) => *dst = 0.0,
            Self::F64(dst) => *dst = 0.0,
            Self::String(dst) => dst.clear(),
            Self::Bytes(dst) => dst.clear(),
            Self::Time(dst) => *dst = UNIX_EPOCH,
        }
    }
}

macro_rules! impl_column {
    ( $( $variant:ident($ty:ty) )* ) => {
        $(
            impl Column for $ty {
                const TYPE: Type = Type::$variant;

                fn slot_mut(&mut self) -> SlotMut<'_> {
                    SlotMut::$variant(self)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }
        )*
    };
}

impl_column! {
    Bool(bool)
    I8(i8)
    I16(i16)
    I32(i32)
    I64(i64)
    U8(u8)
    U16(u16)
    U32(u32)
    U64(u64)
    F32(f32)
    F64(f64)
    String(String)
    Bytes(Vec<u8>)
    Time(SystemTime)
}
