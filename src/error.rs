use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
