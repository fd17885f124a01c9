//! Per-architecture syscall numbers and audit architecture tokens

pub const AUDIT_ARCH_ARM: u32 = 0x4000_0028;
pub const AUDIT_ARCH_AARCH64: u32 = 0xc000_00b7;
pub const AUDIT_ARCH_X86_64: u32 = 0xc000_003e;

/// Audit architecture of the running binary, as seen in `seccomp_data.arch`
pub const fn audit_arch() -> u32 {
    #[cfg(target_arch = "arm")]
    {
        AUDIT_ARCH_ARM
    }
    #[cfg(target_arch = "aarch64")]
    {
        AUDIT_ARCH_AARCH64
    }
    #[cfg(target_arch = "x86_64")]
    {
        AUDIT_ARCH_X86_64
    }
}

#[cfg(not(any(target_arch = "arm", target_arch = "aarch64", target_arch = "x86_64")))]
compile_error!("bsp-seccomp has syscall tables for arm, aarch64 and x86_64 only");

/// ARM EABI numbers (the BeagleBone Black)
pub fn arm_number(name: &str) -> Option<u32> {
    let nr = match name {
        "restart_syscall" => 0,
        "exit" => 1,
        "fork" => 2,
        "read" => 3,
        "write" => 4,
        "open" => 5,
        "close" => 6,
        "getpid" => 20,
        "brk" => 45,
        "munmap" => 91,
        "sigreturn" => 119,
        "clone" => 120,
        "mprotect" => 125,
        "writev" => 146,
        "nanosleep" => 162,
        "mremap" => 163,
        "rt_sigreturn" => 173,
        "rt_sigprocmask" => 175,
        "sigaltstack" => 186,
        "vfork" => 190,
        "mmap2" => 192,
        "futex" => 240,
        "exit_group" => 248,
        "clock_nanosleep" => 265,
        "socket" => 281,
        "openat" => 322,
        "clock_nanosleep_time64" => 407,
        "clone3" => 435,
        _ => return None,
    };
    Some(nr)
}

/// AArch64 uses the asm-generic table
pub fn aarch64_number(name: &str) -> Option<u32> {
    let nr = match name {
        "openat" => 56,
        "close" => 57,
        "read" => 63,
        "write" => 64,
        "writev" => 66,
        "exit" => 93,
        "exit_group" => 94,
        "futex" => 98,
        "nanosleep" => 101,
        "clock_nanosleep" => 115,
        "restart_syscall" => 128,
        "sigaltstack" => 132,
        "rt_sigprocmask" => 135,
        "rt_sigreturn" => 139,
        "getpid" => 172,
        "socket" => 198,
        "brk" => 214,
        "munmap" => 215,
        "mremap" => 216,
        "clone" => 220,
        "mmap" => 222,
        "mprotect" => 226,
        "clone3" => 435,
        _ => return None,
    };
    Some(nr)
}

pub fn x86_64_number(name: &str) -> Option<u32> {
    let nr = match name {
        "read" => 0,
        "write" => 1,
        "open" => 2,
        "close" => 3,
        "mmap" => 9,
        "mprotect" => 10,
        "munmap" => 11,
        "brk" => 12,
        "rt_sigprocmask" => 14,
        "rt_sigreturn" => 15,
        "writev" => 20,
        "mremap" => 25,
        "nanosleep" => 35,
        "getpid" => 39,
        "socket" => 41,
        "clone" => 56,
        "fork" => 57,
        "vfork" => 58,
        "exit" => 60,
        "sigaltstack" => 131,
        "futex" => 202,
        "restart_syscall" => 219,
        "clock_nanosleep" => 230,
        "exit_group" => 231,
        "openat" => 257,
        "clone3" => 435,
        _ => return None,
    };
    Some(nr)
}

/// Number of `name` on the architecture this binary was built for
pub fn syscall_number(name: &str) -> Option<u32> {
    #[cfg(target_arch = "arm")]
    {
        arm_number(name)
    }
    #[cfg(target_arch = "aarch64")]
    {
        aarch64_number(name)
    }
    #[cfg(target_arch = "x86_64")]
    {
        x86_64_number(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_table_matches_libc() {
        assert_eq!(syscall_number("write"), Some(libc::SYS_write as u32));
        assert_eq!(syscall_number("getpid"), Some(libc::SYS_getpid as u32));
        assert_eq!(syscall_number("exit_group"), Some(libc::SYS_exit_group as u32));
        assert_eq!(syscall_number("clone"), Some(libc::SYS_clone as u32));
        assert_eq!(syscall_number("no_such_call"), None);
    }

    #[test]
    fn board_numbers() {
        assert_eq!(arm_number("write"), Some(4));
        assert_eq!(arm_number("nanosleep"), Some(162));
        assert_eq!(arm_number("exit_group"), Some(248));
        assert_eq!(arm_number("mmap"), None);
        assert_eq!(aarch64_number("open"), None);
    }

    #[test]
    fn audit_arch_is_known() {
        assert!(
            [AUDIT_ARCH_ARM, AUDIT_ARCH_AARCH64, AUDIT_ARCH_X86_64].contains(&audit_arch())
        );
    }
}
