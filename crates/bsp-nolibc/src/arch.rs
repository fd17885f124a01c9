//! Raw syscall trampolines and syscall numbers per architecture
//!
//! Return values follow the kernel convention: a value in `-4095..=-1` is a
//! negated errno, anything else is the result.

use core::arch::asm;

#[cfg(target_arch = "arm")]
pub mod nr {
    //! ARM EABI: number in r7, arguments in r0-r5, `svc 0`
    pub const EXIT: usize = 1;
    pub const READ: usize = 3;
    pub const WRITE: usize = 4;
    pub const OPEN: usize = 5;
    pub const CLOSE: usize = 6;
    pub const MOUNT: usize = 21;
    pub const MKDIR: usize = 39;
    pub const NANOSLEEP: usize = 162;
    pub const EXIT_GROUP: usize = 248;
}

#[cfg(target_arch = "aarch64")]
pub mod nr {
    //! AArch64 has no legacy open/mkdir; the *at variants are used instead
    pub const MKDIRAT: usize = 34;
    pub const MOUNT: usize = 40;
    pub const OPENAT: usize = 56;
    pub const CLOSE: usize = 57;
    pub const READ: usize = 63;
    pub const WRITE: usize = 64;
    pub const EXIT: usize = 93;
    pub const NANOSLEEP: usize = 101;
    pub const EXIT_GROUP: usize = 94;
}

#[cfg(target_arch = "x86_64")]
pub mod nr {
    pub const READ: usize = 0;
    pub const WRITE: usize = 1;
    pub const OPEN: usize = 2;
    pub const CLOSE: usize = 3;
    pub const NANOSLEEP: usize = 35;
    pub const EXIT: usize = 60;
    pub const MKDIR: usize = 83;
    pub const MOUNT: usize = 165;
    pub const EXIT_GROUP: usize = 231;
}

#[cfg(not(any(target_arch = "arm", target_arch = "aarch64", target_arch = "x86_64")))]
compile_error!("bsp-nolibc supports arm, aarch64 and x86_64 only");

/// # Safety
/// `nr` must be a valid syscall number taking no arguments.
#[inline(always)]
pub unsafe fn syscall0(nr: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!("svc 0", in("r7") nr, lateout("r0") ret, options(nostack));
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!("svc 0", in("x8") nr, lateout("x0") ret, options(nostack));
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}

/// # Safety
/// Arguments must be valid for syscall `nr`; pointer arguments must point
/// to memory the kernel may read or write as the syscall requires.
#[inline(always)]
pub unsafe fn syscall1(nr: usize, a1: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!("svc 0", in("r7") nr, inlateout("r0") a1 as isize => ret, options(nostack));
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!("svc 0", in("x8") nr, inlateout("x0") a1 as isize => ret, options(nostack));
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            in("rdi") a1,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}

/// # Safety
/// See [`syscall1`].
#[inline(always)]
pub unsafe fn syscall2(nr: usize, a1: usize, a2: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!(
            "svc 0",
            in("r7") nr,
            inlateout("r0") a1 as isize => ret,
            in("r1") a2,
            options(nostack),
        );
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!(
            "svc 0",
            in("x8") nr,
            inlateout("x0") a1 as isize => ret,
            in("x1") a2,
            options(nostack),
        );
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            in("rdi") a1,
            in("rsi") a2,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}

/// # Safety
/// See [`syscall1`].
#[inline(always)]
pub unsafe fn syscall3(nr: usize, a1: usize, a2: usize, a3: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!(
            "svc 0",
            in("r7") nr,
            inlateout("r0") a1 as isize => ret,
            in("r1") a2,
            in("r2") a3,
            options(nostack),
        );
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!(
            "svc 0",
            in("x8") nr,
            inlateout("x0") a1 as isize => ret,
            in("x1") a2,
            in("x2") a3,
            options(nostack),
        );
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            in("rdi") a1,
            in("rsi") a2,
            in("rdx") a3,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}

/// # Safety
/// See [`syscall1`].
#[inline(always)]
pub unsafe fn syscall4(nr: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!(
            "svc 0",
            in("r7") nr,
            inlateout("r0") a1 as isize => ret,
            in("r1") a2,
            in("r2") a3,
            in("r3") a4,
            options(nostack),
        );
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!(
            "svc 0",
            in("x8") nr,
            inlateout("x0") a1 as isize => ret,
            in("x1") a2,
            in("x2") a3,
            in("x3") a4,
            options(nostack),
        );
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            in("rdi") a1,
            in("rsi") a2,
            in("rdx") a3,
            in("r10") a4,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}

/// # Safety
/// See [`syscall1`].
#[inline(always)]
pub unsafe fn syscall5(nr: usize, a1: usize, a2: usize, a3: usize, a4: usize, a5: usize) -> isize {
    let ret: isize;
    #[cfg(target_arch = "arm")]
    unsafe {
        asm!(
            "svc 0",
            in("r7") nr,
            inlateout("r0") a1 as isize => ret,
            in("r1") a2,
            in("r2") a3,
            in("r3") a4,
            in("r4") a5,
            options(nostack),
        );
    }
    #[cfg(target_arch = "aarch64")]
    unsafe {
        asm!(
            "svc 0",
            in("x8") nr,
            inlateout("x0") a1 as isize => ret,
            in("x1") a2,
            in("x2") a3,
            in("x3") a4,
            in("x4") a5,
            options(nostack),
        );
    }
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!(
            "syscall",
            inlateout("rax") nr as isize => ret,
            in("rdi") a1,
            in("rsi") a2,
            in("rdx") a3,
            in("r10") a4,
            in("r8") a5,
            lateout("rcx") _, lateout("r11") _,
            options(nostack),
        );
    }
    ret
}
