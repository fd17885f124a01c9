//! ELF32 firmware images for the PRU cores
//!
//! The remoteproc PRU driver only needs an ELF header, one `PT_LOAD`
//! segment and the instruction words. No section headers are emitted.

use bsp_core::{BspError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// `MOV r0, r0`
pub const PRU_NOP: u32 = 0x2F00_0000;
pub const PRU_HALT: u32 = 0x2100_E0E0;

pub const EM_TI_PRU: u16 = 144;
pub const ELF_HEADER_SIZE: usize = 52;
pub const PROGRAM_HEADER_SIZE: usize = 32;

const ET_EXEC: u16 = 2;
const PT_LOAD: u32 = 1;
const PF_X: u32 = 1;
const PF_R: u32 = 4;

/// A PRU program as little-endian instruction words loaded at address 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruFirmware {
    words: Vec<u32>,
}

impl PruFirmware {
    pub fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Eight NOPs then HALT
    pub fn nop_halt() -> Self {
        let mut words = vec![PRU_NOP; 8];
        words.push(PRU_HALT);
        Self { words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn code(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn elf_header(&self) -> Vec<u8> {
        let mut h = Vec::with_capacity(ELF_HEADER_SIZE);
        // ELFCLASS32, ELFDATA2LSB, EV_CURRENT
        h.extend_from_slice(b"\x7fELF\x01\x01\x01");
        h.extend_from_slice(&[0u8; 9]);
        h.extend_from_slice(&ET_EXEC.to_le_bytes());
        h.extend_from_slice(&EM_TI_PRU.to_le_bytes());
        h.extend_from_slice(&1u32.to_le_bytes()); // e_version
        h.extend_from_slice(&0u32.to_le_bytes()); // e_entry
        h.extend_from_slice(&(ELF_HEADER_SIZE as u32).to_le_bytes()); // e_phoff
        h.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
        h.extend_from_slice(&0u32.to_le_bytes()); // e_flags
        h.extend_from_slice(&(ELF_HEADER_SIZE as u16).to_le_bytes());
        h.extend_from_slice(&(PROGRAM_HEADER_SIZE as u16).to_le_bytes());
        h.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
        h.extend_from_slice(&[0u8; 6]); // e_shentsize, e_shnum, e_shstrndx
        h
    }

    fn program_header(&self, code_size: u32) -> Vec<u8> {
        let fields = [
            PT_LOAD,
            (ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE) as u32,
            0, // p_vaddr
            0, // p_paddr
            code_size,
            code_size,
            PF_R | PF_X,
            4,
        ];
        fields.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    pub fn to_elf(&self) -> Vec<u8> {
        let code = self.code();
        let mut image = self.elf_header();
        image.extend(self.program_header(code.len() as u32));
        image.extend(code);
        image
    }
}

/// `am335x-pru<N>-fw`, the name remoteproc looks up in /lib/firmware
pub fn firmware_name(pru: u8) -> String {
    format!("am335x-pru{}-fw", pru)
}

/// Lines of `%08x  <hex bytes padded to 48>  |ascii|` over the first
/// `limit` bytes
pub fn hexdump(bytes: &[u8], limit: usize) -> String {
    let shown = &bytes[..bytes.len().min(limit)];
    shown
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| {
            let hex = chunk
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii: String = chunk
                .iter()
                .map(|&b| if (32..127).contains(&b) { b as char } else { '.' })
                .collect();
            format!("{:08x}  {:<48}  |{}|", row * 16, hex, ascii)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A firmware file written to disk
#[derive(Debug, Clone)]
pub struct GeneratedFirmware {
    pub path: PathBuf,
    pub image: Vec<u8>,
    pub code_size: usize,
}

impl GeneratedFirmware {
    pub fn summary(&self) -> String {
        [
            format!("Generated {} ({} bytes)", self.path.display(), self.image.len()),
            format!("  ELF header: {} bytes", ELF_HEADER_SIZE),
            format!("  Program header: {} bytes", PROGRAM_HEADER_SIZE),
            format!("  Code section: {} bytes", self.code_size),
        ]
        .join("\n")
    }
}

/// Write the firmware image for PRU core `pru` into `out_dir`
pub fn write_firmware(
    out_dir: impl AsRef<Path>,
    pru: u8,
    firmware: &PruFirmware,
) -> Result<GeneratedFirmware> {
    if pru > 1 {
        return Err(BspError::InvalidArgument(format!(
            "PRU core {} does not exist (AM335x has PRU0 and PRU1)",
            pru
        )));
    }
    let path = out_dir.as_ref().join(firmware_name(pru));
    let image = firmware.to_elf();
    fs::write(&path, &image).map_err(|e| BspError::io_at(path.display(), e))?;
    debug!("wrote {} bytes to {}", image.len(), path.display());

    Ok(GeneratedFirmware {
        path,
        code_size: firmware.words().len() * 4,
        image,
    })
}
