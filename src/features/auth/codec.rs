//! Base64URL helpers and binary-field discovery for ceremony options.
//!
//! Servers send WebAuthn options as JSON with Base64URL strings where the browser API
//! expects `BufferSource`s. This module finds those fields and decodes them so the
//! browser layer only has to wrap bytes in `Uint8Array`s.

use crate::app_lib::AppError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;

/// One step in a path to a JSON field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Which ceremony the options are for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionsKind {
    Creation,
    Request,
}

/// Returns the inner options when the server wrapped them in `publicKey`.
#[must_use]
pub fn unwrap_public_key(options: &Value) -> &Value {
    options.get("publicKey").unwrap_or(options)
}

/// Lists every Base64URL field the browser needs as bytes.
#[must_use]
pub fn binary_field_paths(options: &Value, kind: OptionsKind) -> Vec<Vec<PathSegment>> {
    let mut paths = Vec::new();

    if options.get("challenge").is_some() {
        paths.push(vec![PathSegment::Key("challenge")]);
    }

    let credentials_key = match kind {
        OptionsKind::Creation => {
            if options.pointer("/user/id").is_some() {
                paths.push(vec![PathSegment::Key("user"), PathSegment::Key("id")]);
            }
            "excludeCredentials"
        }
        OptionsKind::Request => "allowCredentials",
    };

    if let Some(credentials) = options.get(credentials_key).and_then(Value::as_array) {
        for (index, credential) in credentials.iter().enumerate() {
            if credential.get("id").is_some() {
                paths.push(vec![
                    PathSegment::Key(credentials_key),
                    PathSegment::Index(index),
                    PathSegment::Key("id"),
                ]);
            }
        }
    }

    paths
}

/// Reads the string at `path`, if any.
#[must_use]
pub fn string_at<'a>(value: &'a Value, path: &[PathSegment]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, segment| match segment {
            PathSegment::Key(key) => current.get(*key),
            PathSegment::Index(index) => current.get(*index),
        })
        .and_then(Value::as_str)
}

/// Decodes Base64URL, also accepting the standard alphabet and `=` padding.
///
/// # Errors
/// Returns `AppError::Parse` when the input is not Base64 in either alphabet.
pub fn decode_base64url(encoded: &str) -> Result<Vec<u8>, AppError> {
    let normalized: String = encoded
        .chars()
        .filter(|c| *c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD
        .decode(normalized)
        .map_err(|err| AppError::Parse(format!("Invalid base64: {err}")))
}

/// Encodes bytes as unpadded Base64URL.
#[must_use]
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_public_key_handles_both_shapes() {
        let wrapped = json!({"publicKey": {"challenge": "abc"}});
        assert_eq!(unwrap_public_key(&wrapped)["challenge"], "abc");

        let bare = json!({"challenge": "abc"});
        assert_eq!(unwrap_public_key(&bare)["challenge"], "abc");
    }

    #[test]
    fn creation_options_list_challenge_user_and_excludes() {
        let options = json!({
            "challenge": "Y2hhbGxlbmdl",
            "rp": {"name": "WebAuthn Sample", "id": "localhost"},
            "user": {"id": "dXNlcg", "name": "alice", "displayName": "alice"},
            "excludeCredentials": [
                {"type": "public-key", "id": "Y3JlZDE"},
                {"type": "public-key"},
                {"type": "public-key", "id": "Y3JlZDM"}
            ]
        });

        let paths = binary_field_paths(&options, OptionsKind::Creation);
        let values: Vec<_> = paths.iter().filter_map(|path| string_at(&options, path)).collect();

        assert_eq!(paths.len(), 4);
        assert_eq!(values, vec!["Y2hhbGxlbmdl", "dXNlcg", "Y3JlZDE", "Y3JlZDM"]);
    }

    #[test]
    fn request_options_ignore_user_and_list_allowed_credentials() {
        let options = json!({
            "challenge": "Y2hhbGxlbmdl",
            "rpId": "localhost",
            "user": {"id": "ignored"},
            "allowCredentials": [{"type": "public-key", "id": "Y3JlZA"}],
            "userVerification": "required"
        });

        let paths = binary_field_paths(&options, OptionsKind::Request);

        assert_eq!(
            paths,
            vec![
                vec![PathSegment::Key("challenge")],
                vec![
                    PathSegment::Key("allowCredentials"),
                    PathSegment::Index(0),
                    PathSegment::Key("id"),
                ],
            ]
        );
    }

    #[test]
    fn decode_accepts_url_safe_padded_and_standard_alphabets() {
        assert_eq!(decode_base64url("_-8").unwrap(), vec![0xff, 0xef]);
        assert_eq!(decode_base64url("aGk=").unwrap(), b"hi".to_vec());
        assert_eq!(decode_base64url("/+8=").unwrap(), vec![0xff, 0xef]);
        assert_eq!(decode_base64url("/+8").unwrap(), vec![0xff, 0xef]);
        assert_eq!(decode_base64url("_-8=").unwrap(), vec![0xff, 0xef]);
        assert_eq!(decode_base64url("aGk").unwrap(), b"hi".to_vec());
        assert!(matches!(decode_base64url("not base64!"), Err(AppError::Parse(_))));
    }

    #[test]
    fn encode_is_unpadded_url_safe() {
        assert_eq!(encode_base64url(&[0xff, 0xef]), "_-8");
        assert_eq!(encode_base64url(b"hi"), "aGk");
    }
}
