use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=PASSKEY_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=PASSKEY_LOCALE");
    println!("cargo:rerun-if-env-changed=PASSKEY_LOG_LEVEL");

    let sha = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PASSKEY_WEB_GIT_SHA={sha}");
}
