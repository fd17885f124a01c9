use crate::{hash_preview, read_data, sha256};
use bsp_core::{BspError, Result};
use log::debug;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha256;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    /// Process exit status for the verify tool
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Valid => 0,
            Verdict::Invalid => 1,
        }
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {p} <public_key_file> <data_file> <signature_file>

Example:
  {p} public.pem message.txt signature.bin

Description:
  Verifies RSA signature using public key
  Uses SHA-256 for hashing
  Returns 0 if signature is valid, 1 otherwise",
        p = prog
    )
}

pub fn load_public_key(path: &Path) -> Result<RsaPublicKey> {
    let pem = fs::read_to_string(path)
        .map_err(|e| BspError::Crypto(format!("Failed to open public key file: {}", e)))?;
    RsaPublicKey::from_pkcs1_pem(&pem)
        .map_err(|e| BspError::Crypto(format!("Failed to read public key: {}", e)))
}

/// The full verify tool flow. A signature that does not match is
/// `Ok(Verdict::Invalid)`; unreadable inputs are errors.
pub fn verify_file(
    public_path: &Path,
    data_path: &Path,
    signature_path: &Path,
    out: &mut dyn Write,
) -> Result<Verdict> {
    writeln!(out, "[INFO] RSA Signature Verification Tool")?;
    writeln!(out, "[INFO] Hash algorithm: SHA-256")?;

    writeln!(out, "[INFO] Loading public key from {}...", public_path.display())?;
    let key = load_public_key(public_path)?;
    writeln!(out, "[OK] Public key loaded (key size: {} bits)", key.size() * 8)?;

    writeln!(out, "[INFO] Reading data from {}...", data_path.display())?;
    let data = read_data(data_path)?;
    writeln!(out, "[OK] Read {} bytes of data", data.len())?;

    writeln!(out, "[INFO] Calculating SHA-256 hash...")?;
    let hash = sha256(&data);
    writeln!(out, "[INFO] Hash (first 16 bytes): {}", hash_preview(&hash))?;

    writeln!(out, "[INFO] Reading signature from {}...", signature_path.display())?;
    let signature = fs::read(signature_path)
        .map_err(|e| BspError::Crypto(format!("Failed to open signature file: {}", e)))?;
    writeln!(out, "[OK] Read {} bytes of signature", signature.len())?;

    writeln!(out, "[INFO] Verifying signature...")?;
    let verdict = match key.verify(Pkcs1v15Sign::new::<Sha256>(), &hash, &signature) {
        Ok(()) => {
            writeln!(out, "\n[SUCCESS] \u{2713} Signature is VALID")?;
            Verdict::Valid
        }
        Err(e) => {
            debug!("verification failed: {}", e);
            writeln!(out, "\n[FAILED] \u{2717} Signature is INVALID")?;
            Verdict::Invalid
        }
    };
    Ok(verdict)
}
