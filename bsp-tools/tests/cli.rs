//! End-to-end runs of the binaries against fake sysfs trees and temp files

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn fake_leds(root: &Path, ids: &[u8]) {
    for id in ids {
        let dir = root.join(format!("beaglebone:green:usr{}", id));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("brightness"), "0").unwrap();
        fs::write(dir.join("trigger"), "none [heartbeat]").unwrap();
    }
}

#[test]
fn led_blink_runs_one_pass_over_present_leds() {
    let dir = tempdir().unwrap();
    fake_leds(dir.path(), &[0, 2]);
    let root = dir.path().to_str().unwrap();

    let out = run(
        env!("CARGO_BIN_EXE_bbb-led-blink"),
        &["--led-root", root, "--cycles", "1", "--on-ms", "0"],
    );
    assert!(out.status.success(), "{}", stderr(&out));

    let text = stdout(&out);
    assert!(text.contains("Found LED 0 at"));
    assert!(text.contains("LED 1 not found at"));
    assert!(text.contains("Found 2 out of 4 LEDs"));
    assert!(text.contains("Turning on LED 2"));
    assert!(!text.contains("Turning on LED 1"));
    assert!(text.contains("Completed one cycle, starting again..."));

    let trigger = dir.path().join("beaglebone:green:usr0/trigger");
    assert_eq!(fs::read_to_string(trigger).unwrap(), "none");
}

#[test]
fn led_blink_without_leds_fails() {
    let dir = tempdir().unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_bbb-led-blink"),
        &["--led-root", dir.path().to_str().unwrap(), "--cycles", "1"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("No LEDs found!"));
}

#[test]
fn flash_blink_with_zero_cycles_only_starts() {
    let dir = tempdir().unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_srk-led-blink"),
        &[
            "--led-root",
            dir.path().to_str().unwrap(),
            "--no-mount",
            "--cycles",
            "0",
        ],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("LED Blink Init Starting..."));
    assert!(text.contains("Starting LED blink loop..."));
    assert!(!text.contains("Sysfs"));
}

#[test]
fn eeprom_report_from_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eeprom");
    let mut img = vec![0u8; 62];
    img[..4].copy_from_slice(&[0xAA, 0x55, 0x33, 0xEE]);
    img[4..12].copy_from_slice(b"A335BNLT");
    img[14] = 0;
    img[15] = 3;
    img[16..28].copy_from_slice(b"1813BBBK0042");
    fs::write(&path, &img).unwrap();

    let out = run(
        env!("CARGO_BIN_EXE_bbb-eeprom"),
        &["--eeprom", path.to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("BBB EEPROM Reader\n=================\n\n"));
    assert!(text.contains("Board Name: A335BNLT"));
    assert!(text.contains("Serial Number: 1813BBBK0042"));
    assert!(text.contains("Version: 0.3"));
    assert!(text.trim_end().ends_with("EEPROM read successfully!"));
}

#[test]
fn eeprom_missing_device_hints_at24() {
    let dir = tempdir().unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_bbb-eeprom"),
        &["--eeprom", dir.path().join("none").to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("modprobe at24"));
}

#[test]
fn rtc_without_command_prints_usage() {
    let out = run(env!("CARGO_BIN_EXE_bbb-rtc"), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("BBB RTC Read/Write Utility"));
}

#[test]
fn rtc_unknown_command_prints_usage() {
    let out = run(env!("CARGO_BIN_EXE_bbb-rtc"), &["bogus"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown command: bogus"));
    assert!(stdout(&out).contains("BBB RTC Read/Write Utility"));
}

#[test]
fn rtc_write_needs_a_time() {
    let out = run(env!("CARGO_BIN_EXE_bbb-rtc"), &["write"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("write command requires time argument"));
}

#[test]
fn rtc_missing_device_is_reported() {
    let dir = tempdir().unwrap();
    let device = dir.path().join("rtc9");
    let out = run(
        env!("CARGO_BIN_EXE_bbb-rtc"),
        &["read", "--device", device.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Make sure RTC device"));
}

#[test]
fn cap_demo_help_and_unknown_command() {
    let help = run(env!("CARGO_BIN_EXE_cap-demo"), &["help"]);
    assert!(help.status.success());
    assert!(stdout(&help).contains("sudo setcap cap_sys_time=ep"));
    assert!(!stdout(&help).contains("BeagleBone Black\n"));

    let unknown = run(env!("CARGO_BIN_EXE_cap-demo"), &["bogus"]);
    assert_eq!(unknown.status.code(), Some(1));
    let text = stdout(&unknown);
    assert!(text.contains("=== Process Information ==="));
    assert!(text.contains("Unknown command: bogus"));
    assert!(text.contains("Usage:"));
}

#[test]
fn cap_demo_default_shows_capabilities() {
    let out = run(env!("CARGO_BIN_EXE_cap-demo"), &[]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("  Linux Capabilities Demo - BeagleBone Black"));
    assert!(text.contains("=== Capabilities at startup ==="));
}

#[test]
fn cap_demo_probes_report_each_capability() {
    let out = run(env!("CARGO_BIN_EXE_cap-demo"), &["test-net"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("=== Testing CAP_NET_RAW ==="));
    assert!(text.contains("=== Testing CAP_NET_ADMIN ==="));
    assert!(text.contains("CAP_NET_ADMIN is"));
}

#[test]
fn seccomp_list_names_profiles() {
    let out = run(env!("CARGO_BIN_EXE_srk-seccomp"), &["--list"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("write-only"));
    assert!(text.contains("write-sleep"));
    assert!(text.contains("exit_group"));
}

#[test]
fn seccomp_demo_is_killed_at_fork() {
    let out = run(
        env!("CARGO_BIN_EXE_srk-seccomp"),
        &["--greetings", "2", "--interval-ms", "0"],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Hello, World! init"));
    assert_eq!(text.matches("Hello, World!\n").count(), 2);
    assert!(text.contains("killed by SIGSYS"));
}

#[test]
fn pru_generate_writes_both_cores() {
    let dir = tempdir().unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_pru-fw"),
        &["generate", "--out-dir", dir.path().to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", stderr(&out));

    let text = stdout(&out);
    assert!(text.starts_with("=== PRU ELF Firmware Generator ==="));
    assert!(text.contains("  Code section: 36 bytes"));
    assert!(text.contains("ELF firmware files generated successfully!"));
    for name in ["am335x-pru0-fw", "am335x-pru1-fw"] {
        let image = fs::read(dir.path().join(name)).unwrap();
        assert_eq!(&image[..4], b"\x7fELF");
        assert_eq!(image.len(), 52 + 32 + 36);
    }
}

#[test]
fn pru_status_and_load_on_fake_remoteproc() {
    let dir = tempdir().unwrap();
    let core = dir.path().join("remoteproc1");
    fs::create_dir_all(&core).unwrap();
    fs::write(core.join("name"), "4a334000.pru\n").unwrap();
    fs::write(core.join("state"), "offline\n").unwrap();
    fs::write(core.join("firmware"), "am335x-pru0-fw\n").unwrap();
    let root = dir.path().to_str().unwrap();

    let status = run(
        env!("CARGO_BIN_EXE_pru-fw"),
        &["status", "--remoteproc-root", root],
    );
    assert!(status.status.success(), "{}", stderr(&status));
    assert!(stdout(&status).contains("remoteproc1: 4a334000.pru [offline] firmware=am335x-pru0-fw"));

    let load = run(
        env!("CARGO_BIN_EXE_pru-fw"),
        &["load", "1", "pru-blink.out", "--remoteproc-root", root],
    );
    assert!(load.status.success(), "{}", stderr(&load));
    assert_eq!(fs::read_to_string(core.join("firmware")).unwrap(), "pru-blink.out");

    let stop = run(
        env!("CARGO_BIN_EXE_pru-fw"),
        &["stop", "1", "--remoteproc-root", root],
    );
    assert_eq!(stop.status.code(), Some(1));
    assert!(stderr(&stop).contains("is not running"));
}

#[test]
fn rsa_tools_round_trip() {
    let dir = tempdir().unwrap();
    let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
    let (private, public) = (path("private.pem"), path("public.pem"));
    let (data, sig) = (path("message.txt"), path("signature.bin"));
    fs::write(&data, "Hello from the BeagleBone\n").unwrap();

    let keygen = run(
        env!("CARGO_BIN_EXE_trustm-rsa-keygen"),
        &[&private, &public, "--bits", "1024"],
    );
    assert!(keygen.status.success(), "{}", stderr(&keygen));
    assert!(stdout(&keygen).contains("[SUCCESS] RSA key pair generation completed"));

    let sign = run(env!("CARGO_BIN_EXE_trustm-rsa-sign"), &[&private, &data, &sig]);
    assert!(sign.status.success(), "{}", stderr(&sign));
    assert_eq!(fs::read(&sig).unwrap().len(), 128);

    let verify = run(env!("CARGO_BIN_EXE_trustm-rsa-verify"), &[&public, &data, &sig]);
    assert_eq!(verify.status.code(), Some(0));
    assert!(stdout(&verify).contains("Signature is VALID"));

    fs::write(&data, "Hello from somewhere else\n").unwrap();
    let tampered = run(env!("CARGO_BIN_EXE_trustm-rsa-verify"), &[&public, &data, &sig]);
    assert_eq!(tampered.status.code(), Some(1));
    assert!(stdout(&tampered).contains("Signature is INVALID"));
}

#[test]
fn rsa_tools_print_usage_on_missing_arguments() {
    for (bin, head) in [
        (env!("CARGO_BIN_EXE_trustm-rsa-keygen"), "<private_key_file> <public_key_file>"),
        (env!("CARGO_BIN_EXE_trustm-rsa-sign"), "<private_key_file> <data_file> <signature_file>"),
        (env!("CARGO_BIN_EXE_trustm-rsa-verify"), "<public_key_file> <data_file> <signature_file>"),
    ] {
        let out = run(bin, &["only-one.pem"]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stdout(&out).contains(head));
    }
}

#[test]
fn rsa_tools_print_usage_on_extra_arguments() {
    for (bin, args, head) in [
        (
            env!("CARGO_BIN_EXE_trustm-rsa-keygen"),
            &["a.pem", "b.pem", "c.pem"][..],
            "<private_key_file> <public_key_file>",
        ),
        (
            env!("CARGO_BIN_EXE_trustm-rsa-sign"),
            &["a.pem", "data", "sig", "more"][..],
            "<private_key_file> <data_file> <signature_file>",
        ),
        (
            env!("CARGO_BIN_EXE_trustm-rsa-verify"),
            &["a.pem", "data", "sig", "more"][..],
            "<public_key_file> <data_file> <signature_file>",
        ),
    ] {
        let out = run(bin, args);
        assert_eq!(out.status.code(), Some(1), "{bin} {args:?}");
        assert!(stdout(&out).contains(head));
    }
}

#[test]
fn helloloop_prints_bounded_lines() {
    let out = run(
        env!("CARGO_BIN_EXE_helloloop"),
        &["--cycles", "2", "--interval-ms", "0"],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|l| l.starts_with("Hello World ")));
}

#[test]
fn silentloop_is_silent() {
    let out = run(
        env!("CARGO_BIN_EXE_silentloop"),
        &["--cycles", "1", "--interval-secs", "0"],
    );
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn bsp_check_lists_facilities() {
    let out = run(env!("CARGO_BIN_EXE_bsp-check"), &[]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Seccomp BPF"));
    assert!(text.contains("remoteproc (PRU)"));
    assert!(text.contains("Effective UID:"));
}
