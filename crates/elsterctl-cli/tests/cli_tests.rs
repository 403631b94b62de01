#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI integration tests
//!
//! Each test runs the built binary in a fresh temp directory with a scrubbed
//! environment, so no `.env` file or developer variable leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const MARKED_XML: &str = "<TransferHeader><Testmerker>700000004</Testmerker></TransferHeader>";

fn elsterctl(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_elsterctl");
    Command::new(cli_bin)
        .current_dir(dir)
        .env_clear()
        .envs(env.iter().copied())
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

#[test]
fn test_root_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(dir.path(), &["--help"], &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("message"));
    assert!(out.contains("config"));
    assert!(out.contains("--test-transfer-mode"));
}

#[test]
fn test_message_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(dir.path(), &["message", "--help"], &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("send"));
    assert!(out.contains("create-template"));
}

// ---------------------------------------------------------------------------
// Transfer mode propagation
// ---------------------------------------------------------------------------

#[test]
fn test_send_uses_test_transfer_mode_from_global_flag() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &["--test-transfer-mode", "message", "send", "--xml", "message.xml"],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Effective transfer mode: test"));
    assert!(stderr(&output).contains("Error: Missing certificate path"));
}

#[test]
fn test_explicit_mode_takes_precedence_over_test_flag() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &[
            "--transfer-mode",
            "prod",
            "--test-transfer-mode",
            "message",
            "send",
            "--xml",
            "message.xml",
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Effective transfer mode: prod"));
}

#[test]
fn test_forced_policy_rejects_prod() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &["--transfer-mode", "prod", "message", "send", "--xml", "message.xml"],
        &[("ELSTER_FORCE_TEST_TRANSFER_MODE", "true")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Effective transfer mode"));
    let err = stderr(&output);
    assert!(err.contains("ELSTER_FORCE_TEST_TRANSFER_MODE"));
    assert!(err.contains("--test-transfer-mode"));
}

#[test]
fn test_forced_policy_accepts_test_flag() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &["--test-transfer-mode", "message", "send", "--xml", "message.xml"],
        &[("ELSTER_FORCE_TEST_TRANSFER_MODE", "1")],
    );

    assert!(stdout(&output).contains("Effective transfer mode: test"));
}

#[test]
fn test_invalid_transfer_mode_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(dir.path(), &["--transfer-mode", "staging", "config", "show"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("staging"));
}

// ---------------------------------------------------------------------------
// message send
// ---------------------------------------------------------------------------

#[test]
fn test_send_requires_pin() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("message.xml"), MARKED_XML).unwrap();
    fs::write(dir.path().join("cert.pfx"), "dummy").unwrap();

    let output = elsterctl(
        dir.path(),
        &[
            "--test-transfer-mode",
            "message",
            "send",
            "--xml",
            "message.xml",
            "--certificate",
            "cert.pfx",
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)
        .contains("Certificate PIN not set. Export environment variable: ELSTER_CERT_PIN"));
}

#[test]
fn test_send_uses_certificate_from_env_and_custom_pin_env() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("message.xml"), "<TransferHeader/>").unwrap();
    fs::write(dir.path().join("cert.pfx"), "dummy").unwrap();

    let output = elsterctl(
        dir.path(),
        &[
            "--test-transfer-mode",
            "message",
            "send",
            "--xml",
            "message.xml",
            "--pin-env",
            "MY_PIN",
        ],
        &[("ELSTER_DEFAULT_CERTIFICATE", "cert.pfx"), ("MY_PIN", "1234")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Test transfer mode requires a <Testmerker>"));
}

#[test]
fn test_send_reports_missing_library_after_validation() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("message.xml"), MARKED_XML).unwrap();
    fs::write(dir.path().join("cert.pfx"), "dummy").unwrap();

    let output = elsterctl(
        dir.path(),
        &[
            "--test-transfer-mode",
            "--certificate",
            "cert.pfx",
            "message",
            "send",
            "--xml",
            "message.xml",
            "--no-validate",
        ],
        &[("ELSTER_CERT_PIN", "1234")],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error: Environment variable ELSTER_ERIC_LIB is not set."));
    assert!(!err.contains("1234"));
}

// ---------------------------------------------------------------------------
// message create-template
// ---------------------------------------------------------------------------

#[test]
fn test_create_template_writes_file() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &[
            "message",
            "create-template",
            "--output",
            "out/message.xml",
            "--hersteller-id",
            "74931",
            "--subject",
            "Rückfrage",
        ],
        &[],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Template written: out/message.xml"));

    let xml = fs::read_to_string(dir.path().join("out/message.xml")).unwrap();
    assert!(xml.contains("<HerstellerID>74931</HerstellerID>"));
    assert!(xml.contains("<Betreff>Rückfrage</Betreff>"));
    assert!(xml.contains("<Testmerker>700000004</Testmerker>"));
}

#[test]
fn test_create_template_uses_global_then_env_hersteller_id() {
    let dir = TempDir::new().unwrap();

    let global = elsterctl(
        dir.path(),
        &["--hersteller-id", "11111", "message", "create-template", "--output", "a.xml"],
        &[("ELSTER_HERSTELLER_ID", "22222")],
    );
    assert!(global.status.success());
    let a = fs::read_to_string(dir.path().join("a.xml")).unwrap();
    assert!(a.contains("<HerstellerID>11111</HerstellerID>"));

    let env = elsterctl(
        dir.path(),
        &["message", "create-template", "--output", "b.xml"],
        &[("ELSTER_HERSTELLER_ID", "22222")],
    );
    assert!(env.status.success());
    let b = fs::read_to_string(dir.path().join("b.xml")).unwrap();
    assert!(b.contains("<HerstellerID>22222</HerstellerID>"));
}

#[test]
fn test_create_template_requires_hersteller_id() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &["message", "create-template", "--output", "message.xml"],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Missing Hersteller-ID"));
    assert!(!dir.path().join("message.xml").exists());
}

// ---------------------------------------------------------------------------
// config show
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(
        dir.path(),
        &["--test-transfer-mode", "config", "show", "--json"],
        &[
            ("ELSTER_CERT_PIN", "secret-pin"),
            ("ELSTER_DEFAULT_DATA_TYPE_VERSION", "TH12"),
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(!out.contains("secret-pin"));

    let view: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(view["transfer_mode"], "test");
    assert_eq!(view["force_test_transfer_mode"], false);
    assert_eq!(view["eric_library"], serde_json::Value::Null);
    assert_eq!(view["data_type_version"], "TH12");
    assert_eq!(view["pin_env"], "ELSTER_CERT_PIN");
    assert_eq!(view["pin_set"], true);
}

#[test]
fn test_config_show_human() {
    let dir = TempDir::new().unwrap();
    let output = elsterctl(dir.path(), &["config", "show"], &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("transfer_mode:            prod"));
    assert!(out.contains("data_type_version:        TH11"));
    assert!(out.contains("pin_set:                  false"));
}
