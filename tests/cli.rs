use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tracemark_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tracemark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

const SCRIPT: &str = r#"
[page]
width = 120.0
height = 80.0
device_pixel_ratio = 2.0

[[events]]
type = "set_tool"
tool = "pencil"

[[events]]
type = "stroke"
points = [[10.0, 40.0], [110.0, 40.0]]

[[events]]
type = "stroke"
points = [[60.0, 5.0], [60.0, 75.0]]

[[events]]
type = "undo"
"#;

#[test]
fn help_prints_usage() {
    let home = TempDir::new().unwrap();
    tracemark_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Resolution-independent annotation surface",
        ));
}

#[test]
fn render_requires_output() {
    let home = TempDir::new().unwrap();
    tracemark_cmd(&home)
        .args(["render", "script.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn render_writes_png_and_summary() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let script = work.path().join("session.toml");
    let output = work.path().join("out.png");
    std::fs::write(&script, SCRIPT).unwrap();

    tracemark_cmd(&home)
        .arg("render")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "rendered 240x160 px, 1 strokes, undo=1 redo=1",
        ));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn render_honors_config_file() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let script = work.path().join("session.toml");
    let config = work.path().join("config.toml");
    let output = work.path().join("out.png");
    std::fs::write(&script, SCRIPT).unwrap();
    std::fs::write(&config, "[surface]\nmax_scale = 1.0\n").unwrap();

    tracemark_cmd(&home)
        .arg("render")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("rendered 120x80 px"));
}

#[test]
fn render_rejects_malformed_script() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let script = work.path().join("broken.toml");
    std::fs::write(&script, "[[events]]\ntype = \"teleport\"\n").unwrap();

    tracemark_cmd(&home)
        .arg("render")
        .arg(&script)
        .args(["--output", "unused.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

#[test]
fn render_fails_on_empty_page() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let script = work.path().join("empty.toml");
    let output = work.path().join("out.png");
    std::fs::write(&script, "[page]\nwidth = 0.0\nheight = 0.0\n").unwrap();

    tracemark_cmd(&home)
        .arg("render")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no drawable area"));
    assert!(!output.exists());
}

#[test]
fn tools_lists_palette_with_default_marked() {
    let home = TempDir::new().unwrap();
    tracemark_cmd(&home)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("1  select"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("3  erase"))
        .stdout(predicate::str::contains("Eraser 30px"));
}
