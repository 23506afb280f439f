//! Passkey ceremony orchestration.
//!
//! Both flows have the same three steps: fetch a challenge, hand the options to the
//! platform authenticator, submit the signed result. A failure at any step fails the
//! whole operation; there is no partial success and nothing is retried.

use crate::{
    app_lib::{AppError, Transport},
    features::auth::{
        client,
        types::{AuthResult, LoginRequest, RegisterRequest},
        webauthn::Ceremony,
    },
};
use tracing::{debug, info, warn};

/// Drives registration and sign-in against an injected transport and authenticator.
#[derive(Clone, Debug)]
pub struct PasskeyService<T, C> {
    transport: T,
    ceremony: C,
}

impl<T: Transport, C: Ceremony> PasskeyService<T, C> {
    #[must_use]
    pub fn new(transport: T, ceremony: C) -> Self {
        Self {
            transport,
            ceremony,
        }
    }

    /// Registers a new passkey for `username`.
    ///
    /// # Errors
    /// Returns `AppError::Registration` wrapping the first failing step.
    pub async fn register(&self, username: &str) -> Result<AuthResult, AppError> {
        self.register_steps(username).await.map_err(|err| {
            warn!(username, error = %err, "passkey registration failed");
            AppError::registration(err)
        })
    }

    async fn register_steps(&self, username: &str) -> Result<AuthResult, AppError> {
        let request = RegisterRequest {
            username: username.to_string(),
        };
        let options = client::registration_challenge(&self.transport, &request).await?;
        debug!(username, "registration challenge received");

        let attestation = self.ceremony.create_credential(&options).await?;
        debug!(username, "authenticator created credential");

        let verified = client::registration_verify(&self.transport, &attestation).await?;
        let success = verified.succeeded();
        info!(username, success, "passkey registration verified");

        Ok(AuthResult {
            success,
            username: success.then(|| verified.username.unwrap_or_else(|| username.to_string())),
        })
    }

    /// Signs `username` in with an existing passkey.
    ///
    /// # Errors
    /// Returns `AppError::Authentication` wrapping the first failing step.
    pub async fn authenticate(&self, username: &str) -> Result<AuthResult, AppError> {
        self.authenticate_steps(username).await.map_err(|err| {
            warn!(username, error = %err, "passkey authentication failed");
            AppError::authentication(err)
        })
    }

    async fn authenticate_steps(&self, username: &str) -> Result<AuthResult, AppError> {
        let request = LoginRequest {
            username: username.to_string(),
        };
        let options = client::login_challenge(&self.transport, &request).await?;
        debug!(username, "authentication challenge received");

        let assertion = self.ceremony.get_credential(&options).await?;
        debug!(username, "authenticator produced assertion");

        let verified = client::login_verify(&self.transport, &assertion).await?;
        let success = verified.succeeded();
        info!(username, success, "passkey authentication verified");

        Ok(AuthResult {
            success,
            username: verified.username,
        })
    }

    /// Whether the browser exposes the WebAuthn API at all.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.ceremony.is_supported()
    }

    /// Whether a user-verifying platform authenticator is present.
    ///
    /// Never fails: an unsupported browser or a failing probe both read as unavailable.
    pub async fn is_available(&self) -> bool {
        if !self.is_supported() {
            return false;
        }

        match self.ceremony.platform_authenticator_available().await {
            Ok(available) => available,
            Err(err) => {
                warn!(error = %err, "platform authenticator probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCeremony, FakeTransport};
    use serde_json::json;

    fn options() -> serde_json::Value {
        json!({"challenge": "Y2hhbGxlbmdl"})
    }

    #[tokio::test]
    async fn register_runs_three_steps_in_order() {
        let transport = FakeTransport::new()
            .respond("/register/request", Ok(options()))
            .respond("/register/response", Ok(json!({"success": true})));
        let ceremony = FakeCeremony::new();
        let service = PasskeyService::new(transport.clone(), ceremony.clone());

        let result = service.register("alice").await.unwrap();

        assert_eq!(
            result,
            AuthResult {
                success: true,
                username: Some("alice".to_string()),
            }
        );
        assert_eq!(transport.paths(), vec!["/register/request", "/register/response"]);
        assert_eq!(transport.bodies()[0], json!({"username": "alice"}));
        assert_eq!(transport.bodies()[1]["type"], "public-key");
        assert_eq!(ceremony.created(), vec![options()]);
    }

    #[tokio::test]
    async fn register_reports_server_rejection() {
        let transport = FakeTransport::new()
            .respond("/register/request", Ok(options()))
            .respond(
                "/register/response",
                Ok(json!({"success": false, "error": "Invalid credential"})),
            );
        let service = PasskeyService::new(transport, FakeCeremony::new());

        let result = service.register("alice").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.username, None);
    }

    #[tokio::test]
    async fn register_fails_fast_on_challenge_error() {
        let transport = FakeTransport::new().respond(
            "/register/request",
            Err(AppError::Transport {
                status: 400,
                body: r#"{"error":"User already exists"}"#.to_string(),
            }),
        );
        let ceremony = FakeCeremony::new();
        let service = PasskeyService::new(transport.clone(), ceremony.clone());

        let err = service.register("alice").await.unwrap_err();

        assert!(matches!(err, AppError::Registration(_)));
        assert!(err.to_string().contains("User already exists"));
        assert!(ceremony.created().is_empty());
        assert_eq!(transport.paths(), vec!["/register/request"]);
    }

    #[tokio::test]
    async fn register_skips_verify_when_ceremony_rejects() {
        let transport = FakeTransport::new().respond("/register/request", Ok(options()));
        let ceremony = FakeCeremony::new().reject("NotAllowedError", "User cancelled");
        let service = PasskeyService::new(transport.clone(), ceremony);

        let err = service.register("alice").await.unwrap_err();

        assert_eq!(err.to_string(), "User cancelled");
        assert!(matches!(err.root_cause(), AppError::Ceremony { .. }));
        assert_eq!(transport.paths(), vec!["/register/request"]);
    }

    #[tokio::test]
    async fn authenticate_returns_verify_body() {
        let transport = FakeTransport::new()
            .respond("/login/request", Ok(options()))
            .respond("/login/response", Ok(json!({"success": true, "username": "bob"})));
        let ceremony = FakeCeremony::new();
        let service = PasskeyService::new(transport.clone(), ceremony.clone());

        let result = service.authenticate("bob").await.unwrap();

        assert_eq!(
            result,
            AuthResult {
                success: true,
                username: Some("bob".to_string()),
            }
        );
        assert_eq!(transport.paths(), vec!["/login/request", "/login/response"]);
        assert_eq!(transport.bodies()[0], json!({"username": "bob"}));
        assert_eq!(ceremony.requested(), vec![options()]);
    }

    #[tokio::test]
    async fn authenticate_wraps_transport_errors() {
        let transport = FakeTransport::new().respond(
            "/login/request",
            Err(AppError::Transport {
                status: 500,
                body: "server error".to_string(),
            }),
        );
        let ceremony = FakeCeremony::new();
        let service = PasskeyService::new(transport, ceremony.clone());

        let err = service.authenticate("bob").await.unwrap_err();

        assert!(matches!(err, AppError::Authentication(_)));
        assert_eq!(err.to_string(), "HTTP 500: server error");
        assert!(ceremony.requested().is_empty());
    }

    #[tokio::test]
    async fn is_available_skips_probe_when_unsupported() {
        let ceremony = FakeCeremony::new().unsupported();
        let service = PasskeyService::new(FakeTransport::new(), ceremony.clone());

        assert!(!service.is_supported());
        assert!(!service.is_available().await);
        assert_eq!(ceremony.probes(), 0);
    }

    #[tokio::test]
    async fn is_available_degrades_probe_failure_to_false() {
        let ceremony = FakeCeremony::new().probe_result(Err(AppError::Ceremony {
            name: "SecurityError".to_string(),
            message: "blocked".to_string(),
        }));
        let service = PasskeyService::new(FakeTransport::new(), ceremony.clone());

        assert!(!service.is_available().await);
        assert_eq!(ceremony.probes(), 1);
    }

    #[tokio::test]
    async fn is_available_reports_probe_result() {
        let service = PasskeyService::new(FakeTransport::new(), FakeCeremony::new());
        assert!(service.is_available().await);

        let service = PasskeyService::new(
            FakeTransport::new(),
            FakeCeremony::new().probe_result(Ok(false)),
        );
        assert!(!service.is_available().await);
    }
}
