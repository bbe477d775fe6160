/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service could not be reached at the network level.
    Network,
    /// The service answered with a non-success status.
    Status,
    /// The response body did not have the expected shape.
    Malformed,
    /// Any other errors.
    Other,
}
