// CLI integration tests for the parse/strip/legacy flows.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_chatmark");
    Command::new(exe)
}

fn parse_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next().expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn parse_emits_chat_json() {
    let output = cmd().args(["parse", "&cHello"]).output().expect("parse");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["text"], "Hello");
    assert_eq!(value["color"], "red");
}

#[test]
fn parse_with_tags_emits_actions() {
    let output = cmd()
        .args(["parse", "--tags", "go||cmd:/spawn||ins:hey"])
        .output()
        .expect("parse --tags");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["text"], "go");
    assert_eq!(value["clickEvent"]["action"], "run_command");
    assert_eq!(value["insertion"], "hey");
}

#[test]
fn parse_reads_stdin_with_dash() {
    let mut child = cmd()
        .args(["parse", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(b"&aHi\n")
        .expect("write");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["text"], "Hi");
    assert_eq!(value["color"], "green");
}

#[test]
fn parse_respects_custom_format_char() {
    let output = cmd()
        .args(["parse", "--format-char", "!", "!cHello &cnot-a-code"])
        .output()
        .expect("parse");
    assert!(output.status.success());
    let value = parse_json_line(&output.stdout);
    assert_eq!(value["text"], "Hello &cnot-a-code");
    assert_eq!(value["color"], "red");
}

#[test]
fn strip_removes_codes() {
    let output = cmd()
        .args(["strip", "&cHello &lWorld"])
        .output()
        .expect("strip");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello World\n");
}

#[test]
fn legacy_inverts_parse() {
    let parsed = cmd()
        .args(["parse", "&cHello &lWorld"])
        .output()
        .expect("parse");
    assert!(parsed.status.success());
    let json_line = String::from_utf8_lossy(&parsed.stdout);

    let output = cmd()
        .args(["legacy", json_line.trim()])
        .output()
        .expect("legacy");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "&cHello &lWorld\n");
}

#[test]
fn legacy_rejects_invalid_json_with_parse_exit_code() {
    let output = cmd().args(["legacy", "{not json"]).output().expect("legacy");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(4));
    let err = parse_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "Parse");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = cmd()
        .args(["parse", "--nope", "x"])
        .output()
        .expect("parse");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn pretty_output_is_still_valid_json() {
    let output = cmd()
        .args(["parse", "--pretty", "&cHello &lWorld"])
        .output()
        .expect("parse");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert!(value.get("extra").is_some() || value.get("text").is_some());
}
