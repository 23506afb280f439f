//! Browser client for passkey (WebAuthn) registration and sign-in.
//!
//! The page has two forms. Each submit fetches a challenge from the backend, runs the
//! platform ceremony through `navigator.credentials` and posts the signed result back
//! for verification. Everything browser-specific is compiled for `wasm32` only; the
//! orchestration and view logic run anywhere behind the `Transport`, `Ceremony` and
//! view traits.

pub mod app;
#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod components;
pub mod features;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
