//! Request and response types for the passkey endpoints. Ceremony options and
//! credential responses carry challenges and signatures, so they must never be logged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Generic envelope returned by the backend. Every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Body accepted from both verify endpoints.
///
/// Registration servers tend to answer with the bare envelope while sign-in adds the
/// username; both shapes decode into this one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(flatten)]
    pub envelope: ApiResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl VerifyResponse {
    /// A 2xx body without an explicit `success` flag counts as success.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.envelope.success.unwrap_or(true)
    }
}

/// Outcome handed from the ceremony orchestrator to the view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// JSON form of a freshly created `PublicKeyCredential`, binary fields base64url.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponseJson {
    pub id: String,
    pub raw_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub response: AttestationResponseJson,
    pub client_extension_results: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponseJson {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub attestation_object: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transports: Vec<String>,
}

/// JSON form of an asserted `PublicKeyCredential`, binary fields base64url.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponseJson {
    pub id: String,
    pub raw_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub response: AssertionResponseJson,
    pub client_extension_results: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponseJson {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub authenticator_data: String,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verify_response_accepts_both_server_shapes() {
        let registration: VerifyResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(registration.succeeded());
        assert_eq!(registration.username, None);

        let login: VerifyResponse =
            serde_json::from_value(json!({"success": true, "username": "alice"})).unwrap();
        assert!(login.succeeded());
        assert_eq!(login.username.as_deref(), Some("alice"));
    }

    #[test]
    fn verify_response_without_flag_counts_as_success() {
        let empty: VerifyResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.succeeded());

        let rejected: VerifyResponse =
            serde_json::from_value(json!({"success": false, "error": "Invalid credential"}))
                .unwrap();
        assert!(!rejected.succeeded());
        assert_eq!(rejected.envelope.error.as_deref(), Some("Invalid credential"));
    }

    #[test]
    fn registration_response_uses_webauthn_field_names() {
        let response = RegistrationResponseJson {
            id: "abc".to_string(),
            raw_id: "abc".to_string(),
            type_: "public-key".to_string(),
            response: AttestationResponseJson {
                client_data_json: "cdj".to_string(),
                attestation_object: "ao".to_string(),
                transports: vec!["internal".to_string()],
            },
            client_extension_results: json!({}),
            authenticator_attachment: Some("platform".to_string()),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["rawId"], "abc");
        assert_eq!(value["type"], "public-key");
        assert_eq!(value["response"]["clientDataJSON"], "cdj");
        assert_eq!(value["response"]["attestationObject"], "ao");
        assert_eq!(value["response"]["transports"][0], "internal");
        assert_eq!(value["authenticatorAttachment"], "platform");
        assert!(value["clientExtensionResults"].is_object());
    }

    #[test]
    fn assertion_response_omits_missing_user_handle() {
        let response = AuthenticationResponseJson {
            id: "id".to_string(),
            raw_id: "id".to_string(),
            type_: "public-key".to_string(),
            response: AssertionResponseJson {
                client_data_json: "cdj".to_string(),
                authenticator_data: "ad".to_string(),
                signature: "sig".to_string(),
                user_handle: None,
            },
            client_extension_results: json!({}),
            authenticator_attachment: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["response"]["authenticatorData"], "ad");
        assert!(value["response"].get("userHandle").is_none());
        assert!(value.get("authenticatorAttachment").is_none());
    }
}
