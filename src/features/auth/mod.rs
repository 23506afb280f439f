//! Passkey feature module covering registration and sign-in ceremonies. It keeps
//! the WebAuthn relay out of the view code and must stay aligned with the backend's
//! endpoint contract. Ceremony options and credential responses cross this module
//! and must never be logged.
//!
//! Flow Overview: both flows POST a username for a challenge, run the platform
//! ceremony on the returned options, then POST the signed credential for
//! verification. Any failing step aborts the flow with a wrapped `AppError`.

pub mod client;
pub mod codec;
pub mod service;
pub mod types;
pub mod webauthn;

pub use service::PasskeyService;
pub use types::AuthResult;
pub use webauthn::Ceremony;
#[cfg(target_arch = "wasm32")]
pub use webauthn::BrowserCeremony;
