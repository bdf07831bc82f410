use super::Error;
use crate::stmt::Type;

/// Error when a driver value cannot be coerced into a destination slot.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    from: Type,
    to: Type,
    text: Option<Box<str>>,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {:?} to {:?}", self.from, self.to)?;
        if let Some(text) = &self.text {
            write!(f, ": invalid text {:?}", text)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a coercion error naming the source and destination kinds.
    pub fn type_conversion(from: Type, to: Type) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            from,
            to,
            text: None,
        }))
    }

    /// Creates a coercion error for text that does not parse as the
    /// destination type.
    pub fn type_conversion_parse(text: &str, to: Type) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            from: Type::String,
            to,
            text: Some(text.into()),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a coercion
    /// error.
    pub fn is_type_conversion(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TypeConversion(_)))
    }
}
