//! Errors raised while constructing shared primitives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("label is {len} bytes, at most {max} fit in a title")]
    LabelTooLong { len: usize, max: usize },
}
