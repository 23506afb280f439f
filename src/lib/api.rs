//! JSON transport used by the passkey endpoints. Every call is a single POST with
//! cookies included; there are no retries and no client-side timeout, so a hung
//! backend keeps the calling form in its loading state until the browser gives up.
//! The transport never logs request or response bodies because they carry ceremony
//! payloads.

use super::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};

/// POSTs JSON to the passkey backend.
///
/// Implementations must map any non-2xx status to [`AppError::Transport`] with the
/// raw response text, and must not retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AppError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned;
}

/// Builds a URL from an explicit base URL and the provided path.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchTransport;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use super::{AppError, Transport, build_url_with_base};
    use gloo_net::http::{Request, Response};
    use serde::{Serialize, de::DeserializeOwned};
    use serde_json::to_string;
    use tracing::debug;
    use web_sys::RequestCredentials;

    /// `fetch`-backed transport bound to one API base URL.
    #[derive(Clone, Debug)]
    pub struct FetchTransport {
        base_url: String,
    }

    impl FetchTransport {
        #[must_use]
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
            }
        }
    }

    impl Transport for FetchTransport {
        async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AppError>
        where
            B: Serialize + ?Sized,
            R: DeserializeOwned,
        {
            let url = build_url_with_base(&self.base_url, path);
            let payload = to_string(body)
                .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

            let response = Request::post(&url)
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .credentials(RequestCredentials::Include)
                .body(payload)
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?
                .send()
                .await
                .map_err(|err| AppError::Network(format!("Unable to reach the server: {err}")))?;

            debug!(path, status = response.status(), "passkey api response");
            handle_json_response(response).await
        }
    }

    /// Parses JSON responses and surfaces HTTP errors with the raw body.
    async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Transport { status, body })
        }
    }
}
