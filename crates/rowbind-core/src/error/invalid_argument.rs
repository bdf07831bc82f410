use super::Error;

/// Error when an operation is called with arguments that break its contract.
///
/// This occurs when:
/// - The destination or source has the wrong shape for the operation
/// - A required clause (e.g. the filter of an update) is missing
/// - A scalar select names zero or several columns
/// - The resolved column set of an insert or update is empty
///
/// These errors are always raised before any statement is sent to the driver.
#[derive(Debug)]
pub(super) struct InvalidArgumentError {
    message: Box<str>,
}

impl std::error::Error for InvalidArgumentError {}

impl core::fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgumentError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidArgument(_))
    }
}
