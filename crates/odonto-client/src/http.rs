use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Enforce the response contract shared by both services: 2xx status
/// and an `application/json` content type, otherwise a request error
/// carrying the (truncated) raw body. The body is read as text first so
/// decode failures can still quote it.
pub(crate) async fn expect_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::status(status.as_u16(), &body));
    }
    if !content_type.contains("application/json") {
        return Err(ApiError::not_json(&body));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Same contract for endpoints that return no body on success (DELETE).
pub(crate) async fn expect_ok(resp: Response) -> Result<(), ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await?;
        return Err(ApiError::status(status.as_u16(), &body));
    }
    Ok(())
}
