//! Platform authenticator access.
//!
//! [`Ceremony`] is the seam between the orchestrator and `navigator.credentials`.
//! The browser implementation handles the conversion between the server's JSON
//! options and the binary-oriented WebAuthn types.
//!
//! ### Flow Overview
//! 1. **Preparation**: Unwraps the server's optional `publicKey` wrapper, converts the
//!    options to a JS object and decodes Base64URL fields (challenge, user ID,
//!    credential IDs) into `Uint8Array`s.
//! 2. **Interaction**: Calls `navigator.credentials.create` (registration) or `.get`
//!    (authentication), which suspends until the user completes or dismisses the
//!    platform dialog.
//! 3. **Finalization**: Encodes the authenticator's binary response back to Base64URL
//!    and returns the JSON the verify endpoints expect.

use crate::app_lib::AppError;
use serde_json::Value;

/// Platform WebAuthn capability.
#[allow(async_fn_in_trait)]
pub trait Ceremony {
    /// Synchronous check for `PublicKeyCredential` and `navigator.credentials`.
    fn is_supported(&self) -> bool;

    /// Asks the platform for a user-verifying platform authenticator.
    async fn platform_authenticator_available(&self) -> Result<bool, AppError>;

    /// Runs the credential creation ceremony and returns the attestation JSON.
    async fn create_credential(&self, options: &Value) -> Result<Value, AppError>;

    /// Runs the assertion ceremony and returns the assertion JSON.
    async fn get_credential(&self, options: &Value) -> Result<Value, AppError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserCeremony;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Ceremony;
    use crate::{
        app_lib::AppError,
        features::auth::{
            codec::{
                OptionsKind, PathSegment, binary_field_paths, decode_base64url,
                encode_base64url, string_at, unwrap_public_key,
            },
            types::{
                AssertionResponseJson, AttestationResponseJson, AuthenticationResponseJson,
                RegistrationResponseJson,
            },
        },
    };
    use js_sys::{Array, ArrayBuffer, Function, Object, Reflect, Uint8Array};
    use serde::Serialize;
    use serde_json::{Value, json};
    use tracing::debug;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AuthenticatorAssertionResponse, AuthenticatorAttestationResponse,
        CredentialCreationOptions, CredentialRequestOptions, CredentialsContainer, DomException,
        PublicKeyCredential,
    };

    /// `navigator.credentials`-backed ceremony.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserCeremony;

    impl Ceremony for BrowserCeremony {
        fn is_supported(&self) -> bool {
            let Some(window) = web_sys::window() else {
                return false;
            };
            is_defined(&window, "PublicKeyCredential")
                && is_defined(&window.navigator(), "credentials")
        }

        async fn platform_authenticator_available(&self) -> Result<bool, AppError> {
            let promise = PublicKeyCredential::is_user_verifying_platform_authenticator_available();
            let available = JsFuture::from(promise).await.map_err(ceremony_error)?;
            Ok(available.as_bool().unwrap_or(false))
        }

        async fn create_credential(&self, options: &Value) -> Result<Value, AppError> {
            let public_key = public_key_options(options, OptionsKind::Creation)?;
            let create_options = wrap_public_key(&public_key)?
                .unchecked_into::<CredentialCreationOptions>();

            let promise = credentials()?
                .create_with_options(&create_options)
                .map_err(ceremony_error)?;
            let credential = into_credential(JsFuture::from(promise).await)?;

            let response = credential
                .response()
                .dyn_into::<AuthenticatorAttestationResponse>()
                .map_err(|_| invalid_response("Invalid attestation response type"))?;

            let json = RegistrationResponseJson {
                id: credential.id(),
                raw_id: encode_buffer(&credential.raw_id()),
                type_: credential.type_(),
                response: AttestationResponseJson {
                    client_data_json: encode_buffer(&response.client_data_json()),
                    attestation_object: encode_buffer(&response.attestation_object()),
                    transports: transports(&response),
                },
                client_extension_results: extension_results(&credential),
                authenticator_attachment: string_property(&credential, "authenticatorAttachment"),
            };

            serde_json::to_value(json)
                .map_err(|err| AppError::Serialization(format!("Failed to encode attestation: {err}")))
        }

        async fn get_credential(&self, options: &Value) -> Result<Value, AppError> {
            let public_key = public_key_options(options, OptionsKind::Request)?;
            let get_options =
                wrap_public_key(&public_key)?.unchecked_into::<CredentialRequestOptions>();

            let promise = credentials()?
                .get_with_options(&get_options)
                .map_err(ceremony_error)?;
            let credential = into_credential(JsFuture::from(promise).await)?;

            let response = credential
                .response()
                .dyn_into::<AuthenticatorAssertionResponse>()
                .map_err(|_| invalid_response("Invalid assertion response type"))?;

            let json = AuthenticationResponseJson {
                id: credential.id(),
                raw_id: encode_buffer(&credential.raw_id()),
                type_: credential.type_(),
                response: AssertionResponseJson {
                    client_data_json: encode_buffer(&response.client_data_json()),
                    authenticator_data: encode_buffer(&response.authenticator_data()),
                    signature: encode_buffer(&response.signature()),
                    user_handle: response.user_handle().map(|handle| encode_buffer(&handle)),
                },
                client_extension_results: extension_results(&credential),
                authenticator_attachment: string_property(&credential, "authenticatorAttachment"),
            };

            serde_json::to_value(json)
                .map_err(|err| AppError::Serialization(format!("Failed to encode assertion: {err}")))
        }
    }

    fn credentials() -> Result<CredentialsContainer, AppError> {
        let window = web_sys::window().ok_or_else(|| AppError::Config("Window not found".into()))?;
        Ok(window.navigator().credentials())
    }

    fn is_defined(target: &JsValue, key: &str) -> bool {
        Reflect::get(target, &JsValue::from_str(key))
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false)
    }

    /// Converts server options to a JS object with binary fields as `Uint8Array`.
    fn public_key_options(options: &Value, kind: OptionsKind) -> Result<JsValue, AppError> {
        let public_key = unwrap_public_key(options);
        if public_key.get("challenge").and_then(Value::as_str).is_none() {
            return Err(AppError::Parse("Missing challenge".into()));
        }

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_options = public_key
            .serialize(&serializer)
            .map_err(|err| AppError::Serialization(format!("Failed to convert options: {err}")))?;

        for path in binary_field_paths(public_key, kind) {
            let Some(encoded) = string_at(public_key, &path) else {
                continue;
            };
            let bytes = decode_base64url(encoded)?;
            set_at(&js_options, &path, &Uint8Array::from(bytes.as_slice()).into())?;
        }

        Ok(js_options)
    }

    fn wrap_public_key(public_key: &JsValue) -> Result<Object, AppError> {
        let wrapper = Object::new();
        Reflect::set(&wrapper, &"publicKey".into(), public_key)
            .map_err(|_| AppError::Config("Failed to set publicKey".into()))?;
        Ok(wrapper)
    }

    fn set_at(root: &JsValue, path: &[PathSegment], value: &JsValue) -> Result<(), AppError> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(());
        };

        let mut target = root.clone();
        for segment in parents {
            target = Reflect::get(&target, &segment_key(segment))
                .map_err(|_| AppError::Config("Failed to read options field".into()))?;
        }

        Reflect::set(&target, &segment_key(last), value)
            .map(|_| ())
            .map_err(|_| AppError::Config("Failed to set options field".into()))
    }

    fn segment_key(segment: &PathSegment) -> JsValue {
        match segment {
            PathSegment::Key(key) => JsValue::from_str(key),
            PathSegment::Index(index) => JsValue::from_f64(*index as f64),
        }
    }

    fn into_credential(
        result: Result<JsValue, JsValue>,
    ) -> Result<PublicKeyCredential, AppError> {
        let value = result.map_err(ceremony_error)?;
        if value.is_null() || value.is_undefined() {
            return Err(invalid_response("No credential returned"));
        }
        value
            .dyn_into::<PublicKeyCredential>()
            .map_err(|_| invalid_response("Invalid credential type"))
    }

    /// Maps a rejected promise to `AppError::Ceremony`, keeping the platform message.
    fn ceremony_error(value: JsValue) -> AppError {
        let (name, message) = if let Some(exception) = value.dyn_ref::<DomException>() {
            (exception.name(), exception.message())
        } else if let Some(error) = value.dyn_ref::<js_sys::Error>() {
            (String::from(error.name()), String::from(error.message()))
        } else {
            (
                "Error".to_string(),
                value.as_string().unwrap_or_else(|| format!("{value:?}")),
            )
        };

        debug!(name = %name, "webauthn ceremony rejected");
        AppError::Ceremony { name, message }
    }

    fn invalid_response(message: &str) -> AppError {
        AppError::Ceremony {
            name: "TypeError".to_string(),
            message: message.to_string(),
        }
    }

    fn encode_buffer(buffer: &ArrayBuffer) -> String {
        encode_base64url(&Uint8Array::new(buffer).to_vec())
    }

    fn call_method(target: &JsValue, name: &str) -> Option<JsValue> {
        let method = Reflect::get(target, &JsValue::from_str(name)).ok()?;
        method.dyn_ref::<Function>()?.call0(target).ok()
    }

    fn transports(response: &AuthenticatorAttestationResponse) -> Vec<String> {
        call_method(response, "getTransports")
            .and_then(|value| value.dyn_into::<Array>().ok())
            .map(|values| values.iter().filter_map(|value| value.as_string()).collect())
            .unwrap_or_default()
    }

    fn extension_results(credential: &PublicKeyCredential) -> Value {
        call_method(credential, "getClientExtensionResults")
            .and_then(|value| serde_wasm_bindgen::from_value::<Value>(value).ok())
            .unwrap_or_else(|| json!({}))
    }

    fn string_property(target: &JsValue, key: &str) -> Option<String> {
        Reflect::get(target, &JsValue::from_str(key)).ok()?.as_string()
    }
}
