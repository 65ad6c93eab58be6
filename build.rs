use std::process::Command;

/// `PDFSCAN_BUILD_COMMIT` feeds `pdfscan --version`; "unknown" outside a git checkout.
fn main() {
    let commit = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env=PDFSCAN_BUILD_COMMIT={commit}");
    for tracked in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={tracked}");
    }
}
