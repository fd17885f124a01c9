//! bsp-seccomp: syscall allow-lists enforced with seccomp BPF
//!
//! Filters are compiled by hand into classic BPF and installed with
//! `prctl(PR_SET_SECCOMP)`. Seccomp needs no root, only
//! `PR_SET_NO_NEW_PRIVS`. The syscall table covers the board's 32-bit ARM
//! ABI as well as AArch64 and x86_64 for host testing.

pub mod bpf;
pub mod demo;
pub mod profile;
pub mod syscall_table;

pub use bpf::SeccompBpf;
pub use demo::{DemoConfig, DemoOutcome, run_demo, supervise};
pub use profile::{DefaultAction, SeccompFilter, SeccompProfile};
