use super::Error;

/// Error raised by the mock collaborator when expectations are left unmet.
#[derive(Debug)]
pub(super) struct MockError {
    message: Box<str>,
}

impl std::error::Error for MockError {}

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "mock: {}", self.message)
    }
}

impl Error {
    /// Creates a mock error.
    pub fn mock(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Mock(MockError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error came from the mock collaborator.
    pub fn is_mock(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Mock(_))
    }
}
