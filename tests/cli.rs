#![cfg(feature = "cli")]

use std::ffi::OsStr;
use std::fs;
use std::process::{Command, Output};

fn run<S: AsRef<OsStr>>(args: &[S]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_convert"))
        .args(args)
        .output()
        .unwrap()
}

/// 2x1 bottom-left 32-bit image: opaque blue, fully transparent black.
fn rgba_fixture() -> Vec<u8> {
    let mut data = vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 1, 0, 32, 0x08];
    data.extend_from_slice(&[255, 0, 0, 255, 0, 0, 0, 0]);
    data
}

#[test]
fn converts_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.tga");
    let output = dir.path().join("out.tga");
    fs::write(&input, rgba_fixture()).unwrap();

    let result = run(&[&input, &output]);
    assert!(result.status.success(), "{result:?}");

    let written = fs::read(&output).unwrap();
    assert_eq!(
        &written[..18],
        &[0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 1, 0, 24, 0x20]
    );
    assert_eq!(&written[18..], &[255, 0, 0, 255, 255, 255]);
}

#[test]
fn background_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.tga");
    let output = dir.path().join("out.tga");
    fs::write(&input, rgba_fixture()).unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(&input)
        .arg(&output)
        .args(["--background", "#102030"])
        .output()
        .unwrap();
    assert!(result.status.success(), "{result:?}");
    assert_eq!(&fs::read(&output).unwrap()[18..], &[255, 0, 0, 0x30, 0x20, 0x10]);
}

#[test]
fn missing_input_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.tga");
    let output = dir.path().join("out.tga");

    let result = run(&[&input, &output]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("absent.tga"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.tga");
    let output = dir.path().join("out.tga");
    let mut data = rgba_fixture();
    data.truncate(data.len() - 1);
    fs::write(&input, data).unwrap();

    let result = run(&[&input, &output]);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("truncated pixel data"), "stderr: {stderr}");
    assert!(!output.exists());
}

#[test]
fn wrong_argument_count_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.tga");
    fs::write(&input, rgba_fixture()).unwrap();

    let result = run(&[&input]);
    assert!(!result.status.success());
}
