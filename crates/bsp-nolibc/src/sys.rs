//! Typed wrappers over the raw trampolines

use crate::arch::{self, nr};
use core::ffi::CStr;

pub const O_RDONLY: usize = 0;
pub const O_WRONLY: usize = 1;
pub const AT_FDCWD: isize = -100;

pub const STDOUT: i32 = 1;

/// A kernel error number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Errno(pub i32);

impl Errno {
    pub const ENOENT: Errno = Errno(2);
    pub const EBADF: Errno = Errno(9);
    pub const EACCES: Errno = Errno(13);
    pub const EEXIST: Errno = Errno(17);
    pub const EINVAL: Errno = Errno(22);
}

/// `struct timespec` with the native `long` width
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timespec {
    pub tv_sec: isize,
    pub tv_nsec: isize,
}

impl Timespec {
    pub const fn from_secs(secs: isize) -> Self {
        Self {
            tv_sec: secs,
            tv_nsec: 0,
        }
    }
}

fn check(ret: isize) -> Result<usize, Errno> {
    if (-4095..0).contains(&ret) {
        Err(Errno(-ret as i32))
    } else {
        Ok(ret as usize)
    }
}

pub fn open(path: &CStr, flags: usize) -> Result<i32, Errno> {
    #[cfg(any(target_arch = "arm", target_arch = "x86_64"))]
    let ret = unsafe { arch::syscall2(nr::OPEN, path.as_ptr() as usize, flags) };
    #[cfg(target_arch = "aarch64")]
    let ret = unsafe {
        arch::syscall4(nr::OPENAT, AT_FDCWD as usize, path.as_ptr() as usize, flags, 0)
    };
    check(ret).map(|fd| fd as i32)
}

pub fn close(fd: i32) -> Result<(), Errno> {
    check(unsafe { arch::syscall1(nr::CLOSE, fd as usize) }).map(|_| ())
}

pub fn read(fd: i32, buf: &mut [u8]) -> Result<usize, Errno> {
    check(unsafe {
        arch::syscall3(nr::READ, fd as usize, buf.as_mut_ptr() as usize, buf.len())
    })
}

pub fn write(fd: i32, buf: &[u8]) -> Result<usize, Errno> {
    check(unsafe { arch::syscall3(nr::WRITE, fd as usize, buf.as_ptr() as usize, buf.len()) })
}

/// Sleep for `req`; an interrupted sleep is reported as an error
pub fn nanosleep(req: &Timespec) -> Result<(), Errno> {
    check(unsafe { arch::syscall2(nr::NANOSLEEP, req as *const Timespec as usize, 0) })
        .map(|_| ())
}

pub fn mkdir(path: &CStr, mode: usize) -> Result<(), Errno> {
    #[cfg(any(target_arch = "arm", target_arch = "x86_64"))]
    let ret = unsafe { arch::syscall2(nr::MKDIR, path.as_ptr() as usize, mode) };
    #[cfg(target_arch = "aarch64")]
    let ret = unsafe { arch::syscall3(nr::MKDIRAT, AT_FDCWD as usize, path.as_ptr() as usize, mode) };
    check(ret).map(|_| ())
}

pub fn mount(source: &CStr, target: &CStr, fstype: &CStr, flags: usize) -> Result<(), Errno> {
    check(unsafe {
        arch::syscall5(
            nr::MOUNT,
            source.as_ptr() as usize,
            target.as_ptr() as usize,
            fstype.as_ptr() as usize,
            flags,
            0,
        )
    })
    .map(|_| ())
}

/// Terminate the whole process (`exit_group`), like `_exit(2)`
pub fn exit(code: i32) -> ! {
    unsafe {
        arch::syscall1(nr::EXIT_GROUP, code as usize);
    }
    loop {
        core::hint::spin_loop();
    }
}

/// Write a line to stdout
pub fn log_msg(msg: &str) {
    let _ = write(STDOUT, msg.as_bytes());
    let _ = write(STDOUT, b"\n");
}
