//! End-to-end tests running the hook binary the way Claude Code does

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use assert_cmd::Command;
use serial_test::serial;
use tempfile::TempDir;

const QUERY: &str =
    r#"{"tool_name":"Bash","tool_input":{"command":"ls"},"tool_use_id":"toolu_1","session_id":"s1"}"#;

fn hook() -> Command {
    let mut cmd = Command::cargo_bin("banjo-permission-hook").unwrap();
    cmd.env_remove("BANJO_PERMISSION_SOCKET").env_remove("RUST_LOG");
    cmd
}

/// Fake Banjo on a blocking listener, answering one request with `reply`
fn spawn_authority(dir: &Path, reply: &'static str) -> (PathBuf, JoinHandle<String>) {
    let path = dir.join("banjo.sock");
    let listener = UnixListener::bind(&path).unwrap();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut line = String::new();
        BufReader::new(stream.try_clone().unwrap())
            .read_line(&mut line)
            .unwrap();
        stream.write_all(reply.as_bytes()).unwrap();
        line
    });
    (path, handle)
}

#[test]
#[serial]
fn no_socket_prints_nothing_and_exits_zero() {
    hook()
        .write_stdin("this is not even json")
        .assert()
        .code(0)
        .stdout("");
}

#[test]
#[serial]
fn malformed_input_exits_one_with_single_diagnostic() {
    let dir = TempDir::new().unwrap();

    let assert = hook()
        .env("BANJO_PERMISSION_SOCKET", dir.path().join("banjo.sock"))
        .write_stdin("{\"tool_name\": ")
        .assert()
        .code(1)
        .stdout("");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("Invalid JSON input").count(), 1, "{stderr}");
}

#[test]
#[serial]
fn allow_prints_directive() {
    let dir = TempDir::new().unwrap();
    let (path, authority) = spawn_authority(dir.path(), "{\"decision\":\"allow\"}\n");

    hook()
        .env("BANJO_PERMISSION_SOCKET", &path)
        .write_stdin(QUERY)
        .assert()
        .code(0)
        .stdout(
            "{\"hookSpecificOutput\":{\"hookEventName\":\"PermissionRequest\",\"decision\":{\"behavior\":\"allow\"}}}\n",
        );

    let request: serde_json::Value = serde_json::from_str(&authority.join().unwrap()).unwrap();
    assert_eq!(request["tool_name"], "Bash");
    assert_eq!(request["tool_input"]["command"], "ls");
}

#[test]
#[serial]
fn deny_prints_message() {
    let dir = TempDir::new().unwrap();
    let (path, _authority) = spawn_authority(dir.path(), "{\"decision\":\"deny\",\"message\":\"no\"}\n");

    hook()
        .arg("--socket")
        .arg(&path)
        .write_stdin(QUERY)
        .assert()
        .code(0)
        .stdout(
            "{\"hookSpecificOutput\":{\"hookEventName\":\"PermissionRequest\",\"decision\":{\"behavior\":\"deny\",\"message\":\"no\"}}}\n",
        );
}

#[test]
#[serial]
fn unreachable_socket_defers_with_diagnostic() {
    let dir = TempDir::new().unwrap();

    let assert = hook()
        .env("BANJO_PERMISSION_SOCKET", dir.path().join("nobody-home.sock"))
        .write_stdin(QUERY)
        .assert()
        .code(0)
        .stdout("");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("Socket error"), "{stderr}");
}

#[test]
#[serial]
fn timeout_defers_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("banjo.sock");
    let listener = UnixListener::bind(&path).unwrap();
    // Accept and never answer
    let _authority = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        std::thread::sleep(std::time::Duration::from_secs(5));
        drop(stream);
    });

    let assert = hook()
        .env("BANJO_PERMISSION_SOCKET", &path)
        .arg("--timeout-secs")
        .arg("1")
        .write_stdin(QUERY)
        .assert()
        .code(0)
        .stdout("");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("Timeout waiting for permission decision"), "{stderr}");
}
