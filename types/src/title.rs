//! Fixed-width proposal titles.

use crate::error::DaoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte opaque proposal label.
///
/// Text labels are stored left-aligned and zero-padded, the same layout as a
/// NUL-terminated `bytes32` string, so a label may use at most 31 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Title([u8; 32]);

impl Title {
    pub const LEN: usize = 32;
    /// Longest text label that still leaves a terminating zero byte.
    pub const MAX_LABEL_LEN: usize = Self::LEN - 1;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encode a UTF-8 label.
    pub fn from_label(label: &str) -> Result<Self, DaoError> {
        let raw = label.as_bytes();
        if raw.len() > Self::MAX_LABEL_LEN {
            return Err(DaoError::LabelTooLong {
                len: raw.len(),
                max: Self::MAX_LABEL_LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decode the label, dropping trailing zero bytes.
    ///
    /// Titles built from raw bytes may not be valid UTF-8; invalid
    /// sequences are replaced rather than rejected.
    pub fn label(&self) -> String {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title({:?})", self.label())
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
