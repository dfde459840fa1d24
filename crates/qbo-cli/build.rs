//! Build script embedding the git revision in `qbo --version`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg_version = env!("CARGO_PKG_VERSION");
    let version = match git_revision() {
        Some(rev) => format!("{} ({})", pkg_version, rev),
        None => pkg_version.to_string(),
    };

    println!("cargo:rustc-env=QBO_VERSION={}", version);
}

/// Short commit hash, with a `-dirty` suffix for uncommitted changes.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}
