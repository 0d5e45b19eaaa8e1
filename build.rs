use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=TRACEMARK_GIT_HASH={hash}");

    // Worktrees and submodules keep the git dir elsewhere; ask git where it is.
    let git_dir = env::var_os("GIT_DIR")
        .map(PathBuf::from)
        .or_else(|| git(&["rev-parse", "--git-dir"]).map(PathBuf::from));
    if let Some(git_dir) = git_dir {
        for name in ["HEAD", "refs", "packed-refs"] {
            rerun_if_exists(&git_dir.join(name));
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn rerun_if_exists(path: &Path) {
    if let Some(display) = path.exists().then(|| path.to_str()).flatten() {
        println!("cargo:rerun-if-changed={display}");
    }
}
