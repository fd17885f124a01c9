//! Seccomp enforcement tests
//!
//! Each test forks a child, installs a filter there and checks in the
//! parent how the child ended. No root needed.

use bsp_seccomp::{
    DefaultAction, DemoConfig, DemoOutcome, SeccompBpf, SeccompFilter, SeccompProfile, supervise,
};
use std::time::Duration;

/// Fork, run `body` in the child under `filter`, return the raw wait status
fn run_filtered(filter: &SeccompFilter, body: fn()) -> i32 {
    unsafe {
        let pid = libc::fork();
        assert!(pid >= 0, "fork failed: {}", std::io::Error::last_os_error());

        if pid == 0 {
            if SeccompBpf::load(filter).is_err() {
                libc::_exit(99);
            }
            body();
            libc::_exit(0);
        }

        let mut status: i32 = 0;
        let ret = libc::waitpid(pid, &mut status, 0);
        assert_eq!(ret, pid);
        status
    }
}

fn assert_sigsys(status: i32) {
    assert!(
        libc::WIFSIGNALED(status),
        "Child should have been killed by signal, status=0x{:x}",
        status
    );
    assert_eq!(libc::WTERMSIG(status), libc::SIGSYS);
}

fn assert_clean_exit(status: i32) {
    assert!(
        libc::WIFEXITED(status),
        "Child should have exited normally, status=0x{:x}",
        status
    );
    assert_eq!(libc::WEXITSTATUS(status), 0);
}

#[test]
fn write_only_allows_write() {
    let filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
    let status = run_filtered(&filter, || unsafe {
        let buf = b"ok\n";
        libc::write(libc::STDOUT_FILENO, buf.as_ptr() as *const libc::c_void, 3);
    });
    assert_clean_exit(status);
}

#[test]
fn write_only_kills_on_getpid() {
    let filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
    let status = run_filtered(&filter, || unsafe {
        libc::syscall(libc::SYS_getpid);
    });
    assert_sigsys(status);
}

#[test]
fn write_only_kills_on_sleep() {
    let filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
    let status = run_filtered(&filter, || {
        std::thread::sleep(Duration::from_millis(1));
    });
    assert_sigsys(status);
}

#[test]
fn write_sleep_allows_sleep() {
    let filter = SeccompFilter::from_profile(SeccompProfile::WriteSleep);
    let status = run_filtered(&filter, || {
        std::thread::sleep(Duration::from_millis(1));
    });
    assert_clean_exit(status);
}

#[test]
fn write_sleep_kills_on_fork() {
    let filter = SeccompFilter::from_profile(SeccompProfile::WriteSleep);
    let status = run_filtered(&filter, || unsafe {
        libc::fork();
    });
    assert_sigsys(status);
}

#[test]
fn errno_action_fails_the_call() {
    let mut filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
    filter.set_default_action(DefaultAction::Errno(libc::EACCES as u16));
    let status = run_filtered(&filter, || unsafe {
        let ret = libc::syscall(libc::SYS_getpid);
        let errno = *libc::__errno_location();
        if ret != -1 || errno != libc::EACCES {
            libc::_exit(3);
        }
    });
    assert_clean_exit(status);
}

#[test]
fn blocked_write_is_killed() {
    let mut filter = SeccompFilter::from_profile(SeccompProfile::WriteOnly);
    filter.block_syscall("write");
    let status = run_filtered(&filter, || unsafe {
        let buf = b"x";
        libc::write(libc::STDOUT_FILENO, buf.as_ptr() as *const libc::c_void, 1);
    });
    assert_sigsys(status);
}

#[test]
fn supervised_demo_is_killed_at_fork() {
    let config = DemoConfig {
        profile: SeccompProfile::WriteSleep,
        greetings: 2,
        interval: Duration::from_millis(1),
    };
    let outcome = supervise(&config).unwrap();
    assert_eq!(outcome, DemoOutcome::KilledBySeccomp);
}
