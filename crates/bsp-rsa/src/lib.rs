//! bsp-rsa: RSA-2048 key pairs, SHA-256 PKCS#1 v1.5 signatures
//!
//! Keys are stored as PKCS#1 PEM (`BEGIN RSA PRIVATE KEY` /
//! `BEGIN RSA PUBLIC KEY`). Signatures are the raw signature bytes.
//! Every operation writes its `[INFO]`/`[OK]` progress lines to a caller
//! supplied writer so the tools can print them and tests can inspect them.

pub mod keygen;
pub mod sign;
pub mod verify;

use bsp_core::{BspError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use keygen::{DEFAULT_BITS, PUBLIC_EXPONENT, generate_keypair, keygen, save_keypair};
pub use sign::{load_private_key, sign_file};
pub use verify::{Verdict, load_public_key, verify_file};

/// Largest data file the tools will hash
pub const MAX_DATA_LEN: u64 = 1024 * 1024;

/// Read a data file of 1 byte to 1 MiB
pub fn read_data(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let len = fs::metadata(path)
        .map_err(|e| BspError::Crypto(format!("Failed to open data file: {}", e)))?
        .len();
    if len == 0 || len > MAX_DATA_LEN {
        return Err(BspError::Crypto(format!(
            "Invalid data file size: {} bytes",
            len
        )));
    }
    let data = fs::read(path)
        .map_err(|e| BspError::Crypto(format!("Failed to read data file: {}", e)))?;
    if data.len() as u64 != len {
        return Err(BspError::Crypto("Failed to read data file".to_string()));
    }
    Ok(data)
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// First 16 hash bytes in hex followed by `...`
pub fn hash_preview(hash: &[u8]) -> String {
    format!("{}...", hex::encode(&hash[..hash.len().min(16)]))
}
