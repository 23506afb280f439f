//! Build metadata embedded by `build.rs`.

pub fn git_commit_hash() -> &'static str {
    match option_env!("PASSKEY_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// `version (commit)` label logged at startup.
#[must_use]
pub fn build_label() -> String {
    format!("{} ({})", env!("CARGO_PKG_VERSION"), git_commit_hash())
}
