use contracts::system::auth::{LoginRequest, LoginResponse, LogoutRequest, UserInfo};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, decode_json, ApiError};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };

    let response = Request::post(&api_url("/auth/login"))
        .json(&request)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode_json(response).await
}

/// Logout (revoke access token)
pub async fn logout(access_token: String) -> Result<(), ApiError> {
    let request = LogoutRequest { access_token };

    let response = Request::post(&api_url("/auth/logout"))
        .json(&request)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(())
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, ApiError> {
    let response = Request::get(&api_url("/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode_json(response).await
}
