use crate::{hash_preview, read_data, sha256};
use bsp_core::{BspError, Result};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::Sha256;
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {p} <private_key_file> <data_file> <signature_file>

Example:
  {p} private.pem message.txt signature.bin

Description:
  Signs data from <data_file> using RSA private key
  Uses SHA-256 for hashing
  Saves signature to <signature_file>",
        p = prog
    )
}

pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey> {
    let pem = fs::read_to_string(path)
        .map_err(|e| BspError::Crypto(format!("Failed to open private key file: {}", e)))?;
    RsaPrivateKey::from_pkcs1_pem(&pem)
        .map_err(|e| BspError::Crypto(format!("Failed to read private key: {}", e)))
}

/// The full sign tool flow. Returns the signature that was written.
pub fn sign_file(
    private_path: &Path,
    data_path: &Path,
    signature_path: &Path,
    out: &mut dyn Write,
) -> Result<Vec<u8>> {
    writeln!(out, "[INFO] RSA Signature Tool")?;
    writeln!(out, "[INFO] Hash algorithm: SHA-256")?;

    writeln!(out, "[INFO] Loading private key from {}...", private_path.display())?;
    let key = load_private_key(private_path)?;
    writeln!(out, "[OK] Private key loaded (key size: {} bits)", key.size() * 8)?;

    writeln!(out, "[INFO] Reading data from {}...", data_path.display())?;
    let data = read_data(data_path)?;
    writeln!(out, "[OK] Read {} bytes of data", data.len())?;

    writeln!(out, "[INFO] Calculating SHA-256 hash...")?;
    let hash = sha256(&data);
    writeln!(out, "[INFO] Hash (first 16 bytes): {}", hash_preview(&hash))?;

    writeln!(out, "[INFO] Signing hash with RSA private key...")?;
    let signature = key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &hash)
        .map_err(|e| BspError::Crypto(format!("Failed to sign data: {}", e)))?;
    writeln!(out, "[OK] Signature created ({} bytes)", signature.len())?;

    writeln!(out, "[INFO] Saving signature to {}...", signature_path.display())?;
    fs::write(signature_path, &signature)
        .map_err(|e| BspError::Crypto(format!("Failed to write signature: {}", e)))?;
    writeln!(out, "[OK] Signature saved to {}", signature_path.display())?;
    writeln!(out, "\n[SUCCESS] Data signed successfully")?;
    Ok(signature)
}
