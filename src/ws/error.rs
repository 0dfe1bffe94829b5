use std::io;
use std::io::ErrorKind::InvalidInput;
use thiserror::Error;

/// Errors raised while configuring a codec. Stream failures are never wrapped and surface as the
/// original [`io::Error`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid max chunk size: {0}, must be non zero and fit in memory")]
    InvalidChunkSize(usize),
}

impl From<Error> for io::Error {
    fn from(value: Error) -> Self {
        io::Error::new(InvalidInput, value)
    }
}
