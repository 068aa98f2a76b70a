// crates/coinage-core/src/crypto.rs

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
