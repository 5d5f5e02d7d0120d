//! HTTP client for the WardPulse analytics backend.
//!
//! The backend authenticates via a session cookie it sets on login, so
//! the client keeps a cookie store and attaches it to every request.
//! Transport failures are classified into the core [`FetchError`]
//! taxonomy at this boundary; response shapes are normalized through
//! `wardpulse_core::normalize` so nothing downstream trusts the wire.

use reqwest::StatusCode;
use serde_json::Value;

use wardpulse_core::normalize;
use wardpulse_core::{
    AnalyticsRow, FetchError, FilterSelection, GeoFeatureCollection, StrategicSummary,
};

/// Client for the `/api/v1` analytics endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client rooted at `base_url`; a trailing slash is
    /// tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| FetchError::Unknown(err.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `/api/v1/status` — drives the session gate. A payload without
    /// a readable `logged_in` flag counts as logged out.
    pub async fn status(&self) -> Result<bool, FetchError> {
        let payload = self.get("/api/v1/status", &[]).await?;
        Ok(logged_in_flag(&payload))
    }

    /// POST `/api/v1/login` with credentials. A 401 here is a rejected
    /// credential, not an expired session.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), FetchError> {
        let url = format!("{}/api/v1/login", self.base_url);
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unknown(
                "Invalid username or password".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16(), "/api/v1/login"));
        }
        Ok(())
    }

    /// POST `/api/v1/logout` — drops the backend session.
    pub async fn logout(&self) -> Result<(), FetchError> {
        let url = format!("{}/api/v1/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(classify_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16(), "/api/v1/logout"));
        }
        Ok(())
    }

    /// GET `/api/v1/wards` — returned raw; the caller decides whether
    /// the shape is usable, since a malformed payload leaves the
    /// existing catalogue alone.
    pub async fn wards(&self) -> Result<Value, FetchError> {
        self.get("/api/v1/wards", &[]).await
    }

    /// GET `/api/v1/analytics` with the selection's query parameters,
    /// coerced to a well-formed row sequence.
    pub async fn analytics(
        &self,
        selection: &FilterSelection,
    ) -> Result<Vec<AnalyticsRow>, FetchError> {
        let payload = self
            .get("/api/v1/analytics", &selection.query_params())
            .await?;
        Ok(normalize::coerce_rows(payload))
    }

    /// GET `/api/v1/analytics/granular` — the ward-level feature
    /// collection for the map.
    pub async fn granular(&self) -> Result<GeoFeatureCollection, FetchError> {
        let payload = self.get("/api/v1/analytics/granular", &[]).await?;
        Ok(normalize::coerce_feature_collection(payload))
    }

    /// GET `/api/v1/strategic-summary` — the AI brief.
    pub async fn strategic_summary(&self) -> Result<StrategicSummary, FetchError> {
        let payload = self.get("/api/v1/strategic-summary", &[]).await?;
        serde_json::from_value(payload).map_err(|err| FetchError::Malformed(err.to_string()))
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{path} returned {status}");
            return Err(FetchError::from_status(status.as_u16(), path));
        }

        response
            .json()
            .await
            .map_err(|err| FetchError::Malformed(err.to_string()))
    }
}

/// Map a reqwest transport error into the core taxonomy. Body-decoding
/// failures are malformed responses; everything else never completed.
fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Malformed(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

/// Read the `logged_in` flag out of a status payload, failing closed on
/// anything unreadable.
fn logged_in_flag(payload: &Value) -> bool {
    payload
        .get("logged_in")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_logged_in_flag_reads_the_backend_shape() {
        assert!(logged_in_flag(&json!({ "logged_in": true })));
        assert!(!logged_in_flag(&json!({ "logged_in": false })));
    }

    #[test]
    fn test_logged_in_flag_fails_closed_on_junk() {
        assert!(!logged_in_flag(&json!({})));
        assert!(!logged_in_flag(&json!({ "logged_in": "yes" })));
        assert!(!logged_in_flag(&Value::Null));
    }
}
