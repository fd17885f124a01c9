//! Seccomp BPF filter compilation and loading

use crate::profile::{DefaultAction, SeccompFilter};
use crate::syscall_table::{audit_arch, syscall_number};
use bsp_core::{BspError, Result};
use log::debug;

/// Classic BPF opcodes used by the filter
pub mod op {
    /// BPF_LD | BPF_W | BPF_ABS
    pub const LD_W_ABS: u16 = 0x20;
    /// BPF_JMP | BPF_JEQ | BPF_K
    pub const JEQ_K: u16 = 0x15;
    /// BPF_RET | BPF_K
    pub const RET_K: u16 = 0x06;
}

/// Seccomp return values
pub mod ret {
    pub const KILL_PROCESS: u32 = 0x8000_0000;
    pub const TRAP: u32 = 0x0003_0000;
    pub const ERRNO: u32 = 0x0005_0000;
    pub const ALLOW: u32 = 0x7fff_0000;
}

/// Offsets into `struct seccomp_data`
const DATA_NR: u32 = 0;
const DATA_ARCH: u32 = 4;

const fn stmt(code: u16, k: u32) -> libc::sock_filter {
    libc::sock_filter {
        code,
        jt: 0,
        jf: 0,
        k,
    }
}

const fn jump(code: u16, k: u32, jt: u8, jf: u8) -> libc::sock_filter {
    libc::sock_filter { code, jt, jf, k }
}

impl DefaultAction {
    pub fn ret_value(self) -> u32 {
        match self {
            DefaultAction::KillProcess => ret::KILL_PROCESS,
            DefaultAction::Trap => ret::TRAP,
            DefaultAction::Errno(errno) => ret::ERRNO | u32::from(errno),
        }
    }
}

/// Seccomp BPF filter compiler and loader
pub struct SeccompBpf;

impl SeccompBpf {
    /// Compile to a BPF program:
    ///
    /// ```text
    ///   ld  [arch]
    ///   jeq #AUDIT_ARCH, 1, 0
    ///   ret #KILL_PROCESS
    ///   ld  [nr]
    ///   jeq #nr_0, 0, 1      ; one pair per allowed syscall
    ///   ret #ALLOW
    ///   ...
    ///   ret #default
    /// ```
    pub fn compile(filter: &SeccompFilter) -> Result<Vec<libc::sock_filter>> {
        filter.validate()?;

        let mut numbers: Vec<u32> = filter
            .effective_syscalls()
            .iter()
            .filter_map(|name| syscall_number(name))
            .collect();
        // Two names may share a number
        numbers.sort_unstable();
        numbers.dedup();

        let mut prog = Vec::with_capacity(5 + 2 * numbers.len());
        prog.push(stmt(op::LD_W_ABS, DATA_ARCH));
        prog.push(jump(op::JEQ_K, audit_arch(), 1, 0));
        prog.push(stmt(op::RET_K, ret::KILL_PROCESS));
        prog.push(stmt(op::LD_W_ABS, DATA_NR));

        for nr in &numbers {
            prog.push(jump(op::JEQ_K, *nr, 0, 1));
            prog.push(stmt(op::RET_K, ret::ALLOW));
        }

        prog.push(stmt(op::RET_K, filter.default_action().ret_value()));

        if prog.len() > u16::MAX as usize {
            return Err(BspError::Seccomp(format!(
                "Filter too long: {} instructions",
                prog.len()
            )));
        }
        debug!(
            "compiled seccomp filter: {} syscalls, {} instructions",
            numbers.len(),
            prog.len()
        );
        Ok(prog)
    }

    /// Compile and install the filter on the calling thread. Irreversible.
    pub fn load(filter: &SeccompFilter) -> Result<()> {
        let mut prog = Self::compile(filter)?;
        let fprog = libc::sock_fprog {
            len: prog.len() as libc::c_ushort,
            filter: prog.as_mut_ptr(),
        };

        unsafe {
            // Required for unprivileged filters
            if libc::prctl(libc::PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) != 0 {
                return Err(BspError::Seccomp(format!(
                    "Failed to set PR_SET_NO_NEW_PRIVS: {}",
                    std::io::Error::last_os_error()
                )));
            }

            let ret = libc::prctl(
                libc::PR_SET_SECCOMP,
                libc::SECCOMP_MODE_FILTER,
                &fprog as *const libc::sock_fprog,
            );
            if ret != 0 {
                return Err(BspError::Seccomp(format!(
                    "seccomp_load: {}",
                    std::io::Error::last_os_error()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SeccompProfile;

    #[test]
    fn program_layout() {
        let filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
        let prog = SeccompBpf::compile(&filter).unwrap();
        let allowed = filter.effective_syscalls().len();

        assert_eq!(prog.len(), 5 + 2 * allowed);

        assert_eq!((prog[0].code, prog[0].k), (op::LD_W_ABS, DATA_ARCH));
        assert_eq!((prog[1].code, prog[1].k), (op::JEQ_K, audit_arch()));
        assert_eq!((prog[1].jt, prog[1].jf), (1, 0));
        assert_eq!((prog[2].code, prog[2].k), (op::RET_K, ret::KILL_PROCESS));
        assert_eq!((prog[3].code, prog[3].k), (op::LD_W_ABS, DATA_NR));

        for pair in prog[4..prog.len() - 1].chunks(2) {
            assert_eq!(pair[0].code, op::JEQ_K);
            assert_eq!((pair[0].jt, pair[0].jf), (0, 1));
            assert_eq!((pair[1].code, pair[1].k), (op::RET_K, ret::ALLOW));
        }

        let last = prog.last().unwrap();
        assert_eq!((last.code, last.k), (op::RET_K, ret::KILL_PROCESS));
    }

    #[test]
    fn write_is_in_the_jump_table() {
        let filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
        let prog = SeccompBpf::compile(&filter).unwrap();
        let write_nr = syscall_number("write").unwrap();
        assert!(prog.iter().any(|i| i.code == op::JEQ_K && i.k == write_nr));

        let getpid_nr = syscall_number("getpid").unwrap();
        assert!(!prog[4..].iter().any(|i| i.code == op::JEQ_K && i.k == getpid_nr));
    }

    #[test]
    fn default_action_values() {
        assert_eq!(DefaultAction::KillProcess.ret_value(), 0x8000_0000);
        assert_eq!(DefaultAction::Trap.ret_value(), 0x0003_0000);
        assert_eq!(DefaultAction::Errno(1).ret_value(), 0x0005_0001);

        let mut filter = SeccompFilter::from_profile(SeccompProfile::WriteSleep);
        filter.set_default_action(DefaultAction::Errno(libc::EPERM as u16));
        let prog = SeccompBpf::compile(&filter).unwrap();
        assert_eq!(prog.last().unwrap().k, ret::ERRNO | libc::EPERM as u32);
    }

    #[test]
    fn invalid_filter_does_not_compile() {
        let mut filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
        filter.allow_syscall("not_a_syscall");
        assert!(SeccompBpf::compile(&filter).is_err());
    }
}
