//! Coerces driver values into typed destination slots.
//!
//! Rules, first match wins:
//!
//! 1. `NULL` resets the slot to its zero value.
//! 2. A value of the slot's own kind is moved in.
//! 3. Text (string or bytes) is copied into string and byte slots. For time
//!    and numeric slots a `YYYY-MM-DD[ HH:MM:SS]` date is converted to epoch
//!    seconds first; otherwise the text is parsed as the slot's type.
//! 4. Numbers and booleans convert between each other with `as` casts and
//!    render as decimal text. Integers and floats become epoch seconds in
//!    time slots and times become epoch seconds in numeric slots.
//! 5. Anything else is a coercion error.

use rowbind_core::{
    schema::SlotMut,
    stmt::{Type, Value},
    time, Error, Result,
};

use std::str::FromStr;

/// Writes `value` into `slot`.
pub(crate) fn assign(slot: SlotMut<'_>, value: Value) -> Result<()> {
    let Some(from) = value.ty() else {
        slot.reset();
        return Ok(());
    };

    match (slot, value) {
        (SlotMut::Bool(dst), Value::Bool(v)) => *dst = v,
        (SlotMut::I8(dst), Value::I8(v)) => *dst = v,
        (SlotMut::I16(dst), Value::I16(v)) => *dst = v,
        (SlotMut::I32(dst), Value::I32(v)) => *dst = v,
        (SlotMut::I64(dst), Value::I64(v)) => *dst = v,
        (SlotMut::U8(dst), Value::U8(v)) => *dst = v,
        (SlotMut::U16(dst), Value::U16(v)) => *dst = v,
        (SlotMut::U32(dst), Value::U32(v)) => *dst = v,
        (SlotMut::U64(dst), Value::U64(v)) => *dst = v,
        (SlotMut::F32(dst), Value::F32(v)) => *dst = v,
        (SlotMut::F64(dst), Value::F64(v)) => *dst = v,
        (SlotMut::String(dst), Value::String(v)) => *dst = v,
        (SlotMut::Bytes(dst), Value::Bytes(v)) => *dst = v,
        (SlotMut::Time(dst), Value::Time(v)) => *dst = v,

        (SlotMut::Bytes(dst), Value::String(v)) => *dst = v.into_bytes(),
        (SlotMut::String(dst), Value::Bytes(v)) => {
            *dst = String::from_utf8(v).map_err(|_| Error::type_conversion(from, Type::String))?
        }
        (slot, Value::String(text)) => from_text(slot, &text)?,
        (slot, Value::Bytes(bytes)) => {
            let to = slot.ty();
            let text = std::str::from_utf8(&bytes).map_err(|_| Error::type_conversion(from, to))?;
            from_text(slot, text)?
        }

        (slot, value) => from_number(slot, &value, from)?,
    }

    Ok(())
}

fn from_text(slot: SlotMut<'_>, text: &str) -> Result<()> {
    let to = slot.ty();

    if to.is_time() || to.is_numeric() {
        if let Some(parsed) = time::parse(text) {
            return store(slot, Num::Int(parsed.datetime.to_epoch()), Type::Time);
        }
    }

    match slot {
        SlotMut::Bool(dst) => {
            *dst = parse_bool(text).ok_or_else(|| Error::type_conversion_parse(text, to))?
        }
        SlotMut::I8(dst) => *dst = parse(text, to)?,
        SlotMut::I16(dst) => *dst = parse(text, to)?,
        SlotMut::I32(dst) => *dst = parse(text, to)?,
        SlotMut::I64(dst) => *dst = parse(text, to)?,
        SlotMut::U8(dst) => *dst = parse(text, to)?,
        SlotMut::U16(dst) => *dst = parse(text, to)?,
        SlotMut::U32(dst) => *dst = parse(text, to)?,
        SlotMut::U64(dst) => *dst = parse(text, to)?,
        SlotMut::F32(dst) => *dst = parse(text, to)?,
        SlotMut::F64(dst) => *dst = parse(text, to)?,
        SlotMut::String(dst) => text.clone_into(dst),
        SlotMut::Bytes(dst) => *dst = text.as_bytes().to_vec(),
        SlotMut::Time(dst) => *dst = time::system_time(parse(text, to)?),
    }

    Ok(())
}

fn parse<T: FromStr>(text: &str, to: Type) -> Result<T> {
    text.parse()
        .map_err(|_| Error::type_conversion_parse(text, to))
}

/// Accepts the spellings `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Num {
    fn as_i64(self) -> i64 {
        match self {
            Num::Int(v) => v,
            Num::Uint(v) => v as i64,
            Num::Float(v) => v as i64,
        }
    }

    fn is_nonzero(self) -> bool {
        match self {
            Num::Int(v) => v != 0,
            Num::Uint(v) => v != 0,
            Num::Float(v) => v != 0.0,
        }
    }
}

macro_rules! cast {
    ($num:expr, $ty:ty) => {
        match $num {
            Num::Int(v) => v as $ty,
            Num::Uint(v) => v as $ty,
            Num::Float(v) => v as $ty,
        }
    };
}

fn from_number(slot: SlotMut<'_>, value: &Value, from: Type) -> Result<()> {
    let num = match *value {
        Value::Bool(v) => Num::Int(i64::from(v)),
        Value::I8(v) => Num::Int(v.into()),
        Value::I16(v) => Num::Int(v.into()),
        Value::I32(v) => Num::Int(v.into()),
        Value::I64(v) => Num::Int(v),
        Value::U8(v) => Num::Uint(v.into()),
        Value::U16(v) => Num::Uint(v.into()),
        Value::U32(v) => Num::Uint(v.into()),
        Value::U64(v) => Num::Uint(v),
        Value::F32(v) => Num::Float(v.into()),
        Value::F64(v) => Num::Float(v),
        Value::Time(v) => Num::Int(time::epoch_secs(v)),
        _ => return Err(Error::type_conversion(from, slot.ty())),
    };

    match slot {
        SlotMut::String(dst) => *dst = render(value),
        SlotMut::Bytes(dst) => *dst = render(value).into_bytes(),
        slot => store(slot, num, from)?,
    }

    Ok(())
}

fn store(slot: SlotMut<'_>, num: Num, from: Type) -> Result<()> {
    match slot {
        SlotMut::Bool(dst) if !from.is_time() => *dst = num.is_nonzero(),
        SlotMut::I8(dst) => *dst = cast!(num, i8),
        SlotMut::I16(dst) => *dst = cast!(num, i16),
        SlotMut::I32(dst) => *dst = cast!(num, i32),
        SlotMut::I64(dst) => *dst = cast!(num, i64),
        SlotMut::U8(dst) => *dst = cast!(num, u8),
        SlotMut::U16(dst) => *dst = cast!(num, u16),
        SlotMut::U32(dst) => *dst = cast!(num, u32),
        SlotMut::U64(dst) => *dst = cast!(num, u64),
        SlotMut::F32(dst) => *dst = cast!(num, f32),
        SlotMut::F64(dst) => *dst = cast!(num, f64),
        SlotMut::Time(dst) if !from.is_bool() => *dst = time::system_time(num.as_i64()),
        slot => return Err(Error::type_conversion(from, slot.ty())),
    }

    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::I8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::Time(v) => time::format_epoch(time::epoch_secs(*v)),
        Value::Null | Value::String(_) | Value::Bytes(_) => String::new(),
    }
}
