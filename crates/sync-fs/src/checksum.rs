//! SHA-256 content fingerprints
//!
//! Fingerprints are computed over the exact bytes of a file: no line-ending,
//! encoding or whitespace normalization. They display in the canonical
//! `sha256:<hex>` format used in diagnostics.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Prefix for the display form of every fingerprint
const PREFIX: &str = "sha256:";

/// A fixed-size SHA-256 digest of some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint a byte slice.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hasher.finalize().into())
    }

    /// Lowercase hex encoding of the digest, without prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Abbreviated form used in single-line diagnostics.
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        format!("{}{}", PREFIX, &hex[..12])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
