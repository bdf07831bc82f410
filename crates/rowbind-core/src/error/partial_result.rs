use super::Error;

/// Wraps an error that interrupted row materialization, recording how many
/// rows had already been written to the destination.
#[derive(Debug)]
pub(super) struct PartialResultError {
    count: usize,
}

impl std::error::Error for PartialResultError {}

impl core::fmt::Display for PartialResultError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "scan stopped after {} rows", self.count)
    }
}

impl Error {
    /// Creates a partial result marker, used as context on the error that
    /// stopped iteration.
    pub fn partial_result(count: usize) -> Error {
        Error::from(super::ErrorKind::PartialResult(PartialResultError { count }))
    }

    /// Number of rows materialized before the error, if iteration was
    /// interrupted mid-result.
    pub fn partial_count(&self) -> Option<usize> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::PartialResult(partial) => Some(partial.count),
            _ => None,
        })
    }
}
