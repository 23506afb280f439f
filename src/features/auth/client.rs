//! Client wrappers for the passkey endpoints. These helpers pin the paths in one
//! place so the orchestrator only deals with typed payloads.

use crate::{
    app_lib::{AppError, Transport},
    features::auth::types::{LoginRequest, RegisterRequest, VerifyResponse},
};
use serde::Serialize;
use serde_json::Value;

pub const REGISTER_REQUEST_PATH: &str = "/register/request";
pub const REGISTER_RESPONSE_PATH: &str = "/register/response";
pub const LOGIN_REQUEST_PATH: &str = "/login/request";
pub const LOGIN_RESPONSE_PATH: &str = "/login/response";

/// Requests credential creation options for `username`.
pub async fn registration_challenge<T: Transport>(
    transport: &T,
    request: &RegisterRequest,
) -> Result<Value, AppError> {
    transport.post_json(REGISTER_REQUEST_PATH, request).await
}

/// Submits the attestation produced by the authenticator.
pub async fn registration_verify<T: Transport, B: Serialize>(
    transport: &T,
    attestation: &B,
) -> Result<VerifyResponse, AppError> {
    transport.post_json(REGISTER_RESPONSE_PATH, attestation).await
}

/// Requests credential request options for `username`.
pub async fn login_challenge<T: Transport>(
    transport: &T,
    request: &LoginRequest,
) -> Result<Value, AppError> {
    transport.post_json(LOGIN_REQUEST_PATH, request).await
}

/// Submits the assertion produced by the authenticator.
pub async fn login_verify<T: Transport, B: Serialize>(
    transport: &T,
    assertion: &B,
) -> Result<VerifyResponse, AppError> {
    transport.post_json(LOGIN_RESPONSE_PATH, assertion).await
}
