//! Reading the EEPROM through a file, the way the at24 driver exposes it

use bsp_eeprom::{BoardEeprom, EEPROM_MAGIC};
use std::fs;
use tempfile::tempdir;

fn at24_image() -> Vec<u8> {
    let mut img = vec![0xFF; 32 * 1024];
    img[..4].copy_from_slice(&EEPROM_MAGIC);
    img[4..12].copy_from_slice(b"A335BNLT");
    img[12..16].copy_from_slice(b"00C0");
    img[16..28].copy_from_slice(b"1813BBBK0042");
    img
}

#[test]
fn reads_header_from_full_chip_dump() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eeprom");
    fs::write(&path, at24_image()).unwrap();

    let eeprom = BoardEeprom::read_from(&path).unwrap();
    assert_eq!(eeprom.board_name(), "A335BNLT");
    assert_eq!(eeprom.serial(), "1813BBBK0042");
    // Shipped boards store the version as ASCII, printed as raw byte values
    assert_eq!(eeprom.version(), "67.48");
    assert_eq!(eeprom.macs[0].to_string(), "FF:FF:FF:FF:FF:FF");
}

#[test]
fn missing_device_explains_how_to_fix() {
    let dir = tempdir().unwrap();
    let err = BoardEeprom::read_from(dir.path().join("eeprom")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Failed to open EEPROM device"));
    assert!(msg.contains("modprobe at24"));
}

#[test]
fn truncated_dump_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eeprom");
    fs::write(&path, &at24_image()[..20]).unwrap();
    assert!(BoardEeprom::read_from(&path).is_err());
}
