use std::io::Write;
use std::process::{Command, Output, Stdio};

const NEW_YEAR_2025: &str = "2025-01-01T00:00:00Z";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn catshop(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_catshop"))
        .args(args)
        .env_remove("CATSHOP_NOW")
        .env_remove("CATSHOP_PRETTY")
        .env("CATSHOP_LOG", "warn")
        .envs(envs.iter().copied())
        .output()
        .expect("failed to run binary")
}

fn total(fixture_name: &str) -> (String, String, bool) {
    let path = fixture(fixture_name);
    let output = catshop(&["--now", NEW_YEAR_2025, "total", &path], &[]);

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn total_without_coupon() {
    let (stdout, stderr, success) = total("no_coupon.json");

    assert!(success);
    assert!(stderr.is_empty());
    assert_eq!(stdout, "16200\n");
}

#[test]
fn percent_coupon_applied_before_tax() {
    let (stdout, _, success) = total("percent_coupon.json");

    assert!(success);
    assert_eq!(stdout, "14580\n");
}

#[test]
fn valid_coupon_applied() {
    let (stdout, _, success) = total("valid_coupon.json");

    assert!(success);
    assert_eq!(stdout, "8100\n");
}

#[test]
fn expired_coupon_ignored() {
    let (stdout, _, success) = total("expired_coupon.json");

    assert!(success);
    assert_eq!(stdout, "9000\n");
}

#[test]
fn coupon_below_minimum_ignored() {
    let (stdout, _, success) = total("below_minimum.json");

    assert!(success);
    assert_eq!(stdout, "1800\n");
}

#[test]
fn clock_pinned_through_environment() {
    let path = fixture("valid_coupon.json");

    let before = catshop(&["total", &path], &[("CATSHOP_NOW", "2025-12-31T00:00:00Z")]);
    assert_eq!(String::from_utf8_lossy(&before.stdout), "8100\n");

    let after = catshop(&["total", &path], &[("CATSHOP_NOW", "2025-12-31T00:00:00.000001Z")]);
    assert_eq!(String::from_utf8_lossy(&after.stdout), "9000\n");
}

#[test]
fn breakdown_reports_rejected_coupon() {
    let path = fixture("below_minimum.json");
    let output = catshop(&["--now", NEW_YEAR_2025, "breakdown", &path], &[]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["subtotal"], 1000);
    assert_eq!(json["coupon"]["status"], "below_minimum");
    assert_eq!(json["coupon"]["minAmount"], 2000);
    assert_eq!(json["discount"], 0);
    assert_eq!(json["total"], 1800);
}

#[test]
fn debug_logging_explains_ignored_coupon() {
    let path = fixture("expired_coupon.json");
    let output = catshop(
        &["--now", NEW_YEAR_2025, "total", &path],
        &[("CATSHOP_LOG", "debug")],
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "9000\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("coupon not applied"));
}

#[test]
fn reads_cart_from_stdin() {
    let cart = std::fs::read(fixture("percent_coupon.json")).unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_catshop"))
        .args(["total", "-"])
        .env_remove("CATSHOP_NOW")
        .env("CATSHOP_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run binary");

    child.stdin.take().unwrap().write_all(&cart).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "14580\n");
}

#[test]
fn ad_hoc_cart_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "items": [{{ "id": "A", "name": "Sample Product", "price": 5, "quantity": 1 }}],
             "coupon": {{ "type": "percent", "value": 10 }} }}"#
    )
    .unwrap();

    let output = catshop(&["total", file.path().to_str().unwrap()], &[]);

    // 5 × 0.9 = 4.5, × 1.8 = 8.1, rounded once at the end
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "8\n");
}

#[test]
fn unsupported_coupon_rejected() {
    let (stdout, stderr, success) = total("unsupported_coupon.json");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unsupported coupon kind 'fixed'"));
}

#[test]
fn malformed_document_rejected() {
    let (stdout, stderr, success) = total("malformed.json");

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Malformed cart document"));
}

#[test]
fn invalid_configuration_rejected() {
    let path = fixture("no_coupon.json");
    let output = catshop(&["total", &path], &[("CATSHOP_NOW", "yesterday")]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CATSHOP_NOW"));
}
