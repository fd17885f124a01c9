use bsp_core::{BspError, Result};
use log::debug;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::{BigUint, RsaPrivateKey};
use std::fs::{OpenOptions, Permissions};
use std::io::Write;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

pub const DEFAULT_BITS: usize = 2048;
/// Fermat F4
pub const PUBLIC_EXPONENT: u32 = 65537;

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {p} <private_key_file> <public_key_file>

Example:
  {p} private.pem public.pem

Description:
  Generates a 2048-bit RSA key pair
  Saves private key to <private_key_file>
  Saves public key to <public_key_file>",
        p = prog
    )
}

pub fn generate_keypair(bits: usize) -> Result<RsaPrivateKey> {
    let mut rng = rand::thread_rng();
    let exp = BigUint::from(PUBLIC_EXPONENT);
    RsaPrivateKey::new_with_exp(&mut rng, bits, &exp)
        .map_err(|e| BspError::Crypto(format!("Failed to generate RSA key pair: {}", e)))
}

/// `mode` on open only applies to new files, so it is set again for an
/// existing one
fn write_file(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    file.set_permissions(Permissions::from_mode(mode))?;
    file.write_all(contents)
}

/// Write the PKCS#1 PEM private key (mode 0600) and public key
pub fn save_keypair(
    key: &RsaPrivateKey,
    private_path: &Path,
    public_path: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "[INFO] Saving private key to {}...", private_path.display())?;
    let private_pem = key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| BspError::Crypto(format!("Failed to write private key: {}", e)))?;
    write_file(private_path, private_pem.as_bytes(), 0o600)
        .map_err(|e| BspError::Crypto(format!("Failed to open private key file: {}", e)))?;
    writeln!(out, "[OK] Private key saved to {}", private_path.display())?;

    writeln!(out, "[INFO] Saving public key to {}...", public_path.display())?;
    let public_pem = key
        .to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| BspError::Crypto(format!("Failed to write public key: {}", e)))?;
    write_file(public_path, public_pem.as_bytes(), 0o644)
        .map_err(|e| BspError::Crypto(format!("Failed to open public key file: {}", e)))?;
    writeln!(out, "[OK] Public key saved to {}", public_path.display())?;
    Ok(())
}

/// The full keygen tool flow
pub fn keygen(
    private_path: &Path,
    public_path: &Path,
    bits: usize,
    out: &mut dyn Write,
) -> Result<RsaPrivateKey> {
    writeln!(out, "[INFO] RSA Key Generation Tool")?;
    writeln!(out, "[INFO] Key size: {} bits", bits)?;
    writeln!(out, "[INFO] Public exponent: {}", PUBLIC_EXPONENT)?;
    writeln!(out, "[INFO] Generating RSA key pair...")?;
    out.flush()?;

    let key = generate_keypair(bits)?;
    debug!("generated {}-bit key", bits);
    writeln!(out, "[OK] RSA key pair generated successfully")?;

    save_keypair(&key, private_path, public_path, out)?;
    writeln!(out, "\n[SUCCESS] RSA key pair generation completed")?;
    Ok(key)
}
