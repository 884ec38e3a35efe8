//! Routing behavior over full invocations with real files on disk.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use stitch_cli::config::StitchConfig;
use stitch_cli::router::Router;

fn write(dir: &Path, name: &str, source: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path.to_str().unwrap().to_string()
}

fn config(package: Option<&str>, probes: &[&str]) -> StitchConfig {
    StitchConfig {
        package: package.map(str::to_string),
        probes: probes.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn compile_invocation_rewrites_matching_source_argument() {
    let src = TempDir::new().unwrap();
    let build = TempDir::new().unwrap();

    let f1 = write(src.path(), "f1.rs", "fn one() {}\n");
    let f2 = write(src.path(), "f2.rs", "fn target() { a(); b(); }\n");
    let f3 = write(src.path(), "f3.rs", "fn three() {}\n");

    let cmd = vec![
        "/toolchain/bin/rustc".to_string(),
        "--crate-name".to_string(),
        "pkga".to_string(),
        "-o".to_string(),
        build.path().join("pkga.o").to_str().unwrap().to_string(),
        f1.clone(),
        f2.clone(),
        f3.clone(),
    ];

    let routed = Router::default().route(&config(Some("pkga"), &["target"]), &cmd);

    assert_eq!(routed.len(), cmd.len());
    assert_eq!(&routed[..5], &cmd[..5]);
    assert_eq!(routed[5], f1);
    assert_ne!(routed[6], f2);
    assert_eq!(routed[7], f3);

    let emitted = fs::read_to_string(&routed[6]).unwrap();
    assert!(emitted.contains("stitch: enter target"));
    // Canonical sources stay untouched.
    assert_eq!(fs::read_to_string(&f2).unwrap(), "fn target() { a(); b(); }\n");
}

#[test]
fn other_package_is_left_alone() {
    let src = TempDir::new().unwrap();
    let build = TempDir::new().unwrap();
    let f = write(src.path(), "lib.rs", "fn target() {}\n");

    let cmd = vec![
        "rustc".to_string(),
        "--crate-name".to_string(),
        "pkgb".to_string(),
        "-o".to_string(),
        build.path().join("pkgb.o").to_str().unwrap().to_string(),
        f,
    ];
    let routed = Router::default().route(&config(Some("pkga"), &["target"]), &cmd);
    assert_eq!(routed, cmd);
}

#[test]
fn non_compile_command_is_identity_passthrough() {
    let cmd = vec![
        "/toolchain/bin/link".to_string(),
        "-o".to_string(),
        "/build/out".to_string(),
        "f1.o".to_string(),
        "f2.o".to_string(),
    ];
    let routed = Router::default().route(&config(None, &["target"]), &cmd);
    assert_eq!(routed, cmd);
}

#[test]
fn unparsable_source_falls_back_to_original_invocation() {
    let src = TempDir::new().unwrap();
    let build = TempDir::new().unwrap();

    let good = write(src.path(), "good.rs", "fn target() {}\n");
    let bad = write(src.path(), "bad.rs", "fn broken( {\n");

    let cmd = vec![
        "rustc".to_string(),
        "--crate-name".to_string(),
        "pkga".to_string(),
        "-o".to_string(),
        build.path().join("pkga.o").to_str().unwrap().to_string(),
        good,
        bad,
    ];
    let routed = Router::default().route(&config(None, &["target"]), &cmd);
    assert_eq!(routed, cmd);
}

#[test]
fn compile_without_required_flags_is_passthrough() {
    let src = TempDir::new().unwrap();
    let f = write(src.path(), "lib.rs", "fn target() {}\n");

    // No --crate-name / -o: the handler has nothing to do.
    let cmd = vec!["rustc".to_string(), f];
    let routed = Router::default().route(&config(None, &["target"]), &cmd);
    assert_eq!(routed, cmd);
}
