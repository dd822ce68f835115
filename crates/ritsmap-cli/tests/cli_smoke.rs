use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("ritsmap-cli"))
}

#[test]
fn cli_renders_svg_to_stdout() {
    let output = cli().args(["render"]).output().expect("run cli");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.starts_with("<svg"), "no XML declaration on stdout");
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    let markers = doc
        .descendants()
        .filter(|n| n.has_tag_name("circle") && n.attribute("class") == Some("marker"))
        .count();
    assert_eq!(markers, 100);
}

#[test]
fn cli_renders_png_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--scale",
            "1",
            "--set",
            "dots.labels=false",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    let decoder = png::Decoder::new(bytes.as_slice());
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert!(info.width > 100 && info.height > 100);
}

#[test]
fn cli_writes_svg_file_with_declaration() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("map.svg");

    cli()
        .args(["render", "--format", "svg", "--out", out.to_string_lossy().as_ref()])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<?xml"));
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");
    assert_eq!(doc.root_element().tag_name().name(), "svg");
    assert!(!tmp.path().join("ritsmap.pdf").exists());
}

#[test]
fn cli_writes_default_raster_path_in_working_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    cli()
        .current_dir(tmp.path())
        .args(["render", "--format", "pdf"])
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join("ritsmap.pdf")).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn cli_layout_reads_config_file() {
    let fixture = repo_root().join("fixtures").join("config").join("compact.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());

    let output = cli()
        .args([
            "layout",
            "--config",
            fixture.to_string_lossy().as_ref(),
            "--set",
            "dots.count=40",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout json");
    assert_eq!(v["dots"].as_array().map(Vec::len), Some(40));
    assert_eq!(v["showArc"], true);
    assert_eq!(v["spokes"].as_array().map(Vec::len), Some(0));
}

#[test]
fn cli_prints_gear_path() {
    let output = cli()
        .args(["gear", "--radius", "50", "--teeth", "12", "--height", "4"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let path = String::from_utf8(output.stdout).expect("utf-8");
    let path = path.trim();
    assert!(path.starts_with('M'));
    assert!(path.ends_with('Z'));
    assert_eq!(path.matches('L').count(), 4 * 12 - 1);
}

#[test]
fn cli_usage_errors_exit_with_two() {
    cli().args(["render", "--format", "gif"]).assert().code(2);
    cli().args(["gear", "--teeth", "12"]).assert().code(2);
    cli().args(["--frobnicate"]).assert().code(2);
}

#[test]
fn cli_runtime_errors_exit_with_one() {
    cli()
        .args(["layout", "--set", "dots.spacing=-1"])
        .assert()
        .code(1);
    cli()
        .args(["gear", "--radius", "10", "--teeth", "6", "--height", "20"])
        .assert()
        .code(1);
}
