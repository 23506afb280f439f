//! Shared frontend utilities: the JSON transport, configuration, errors, console
//! logging, localized strings and build metadata.
//!
//! ## Passkey Flows
//!
//! ### Registration
//!
//! 1. **Challenge:** POST `{username}` to `/register/request`; the server answers with
//!    credential creation options.
//! 2. **Ceremony:** the browser runs `navigator.credentials.create`.
//! 3. **Verify:** the attestation is POSTed to `/register/response`.
//!
//! ### Sign-in
//!
//! Same shape against `/login/request`, `navigator.credentials.get` and
//! `/login/response`.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids duplicated
//! logic in the view and features. Ceremony payloads pass through here and must never
//! be logged.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod i18n;
pub mod logging;

pub use api::{Transport, build_url_with_base};
#[cfg(target_arch = "wasm32")]
pub use api::FetchTransport;
pub use config::AppConfig;
pub use errors::AppError;
pub use i18n::{Locale, Message};
