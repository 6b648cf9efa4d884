use std::process::Command;

// Exposes the build version to the crate as `GIT_VERSION`.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=GIT_VERSION");

    println!("cargo:rustc-env=GIT_VERSION={}", version());
}

fn version() -> String {
    // CI and container builds pass the version in explicitly.
    let from_env = std::env::var("GIT_VERSION")
        .ok()
        .filter(|v| !v.is_empty() && v != "dev");

    from_env
        .or_else(describe_head)
        .unwrap_or_else(|| format!("{}-dev", env!("CARGO_PKG_VERSION")))
}

fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!described.is_empty()).then_some(described)
}
