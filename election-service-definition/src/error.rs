use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The bytes do not form a valid message of the expected shape.
    #[error("malformed {message} payload: {source}")]
    MalformedPayload {
        message: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

impl From<SchemaError> for io::Error {
    fn from(err: SchemaError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
