//! Fixed-capacity, NUL-terminated byte buffers for paths and log lines

use core::ffi::CStr;

/// Returned when an append would not fit (including the trailing NUL), or
/// when the input is not representable (interior NUL, digit out of range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// A string buffer living on the stack.
///
/// `buf[len]` is always NUL, so the contents can be handed to the kernel as
/// a C string without copying.
pub struct CBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> CBuf<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
        if N > 0 {
            self.buf[0] = 0;
        }
    }

    pub fn push_str(&mut self, s: &str) -> Result<&mut Self, Overflow> {
        let bytes = s.as_bytes();
        if bytes.contains(&0) || self.len + bytes.len() >= N {
            return Err(Overflow);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        self.buf[self.len] = 0;
        Ok(self)
    }

    /// Append a single decimal digit (0-9)
    pub fn push_digit(&mut self, digit: u8) -> Result<&mut Self, Overflow> {
        if digit > 9 || self.len + 1 >= N {
            return Err(Overflow);
        }
        self.buf[self.len] = b'0' + digit;
        self.len += 1;
        self.buf[self.len] = 0;
        Ok(self)
    }

    /// Contents without the terminating NUL
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only whole &str values and ASCII digits are ever appended
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn as_cstr(&self) -> &CStr {
        if N == 0 {
            return c"";
        }
        CStr::from_bytes_with_nul(&self.buf[..=self.len]).unwrap_or(c"")
    }
}

impl<const N: usize> Default for CBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
