use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use shared::{
    Category, CategoryPayload, DateRange, ExpensePayload, LoginRequest, SignupRequest,
    SignupResponse, TokenResponse, Transaction,
};

use crate::services::session::Session;

/// Errors surfaced by the backend API, split by how the UI recovers from
/// them: `Unauthorized` sends the user back to login, `Validation` goes to
/// the originating form, everything else leaves the current view untouched
/// behind a dismissible notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired, please log in again")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("server error ({status})")]
    Http { status: u16 },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Query constraints for `GET expenses/`. The date range comes from the
/// period resolver; search and category filtering happen server-side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseQuery {
    pub range: Option<DateRange>,
    pub search: String,
    pub category: Option<i64>,
}

impl ExpenseQuery {
    /// Query-string pairs for [`gloo::net::http::RequestBuilder::query`],
    /// which handles the percent-encoding.
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = Vec::new();
        if let Some(range) = &self.range {
            params.push(("start_date", range.start.to_string()));
            params.push(("end_date", range.end.to_string()));
        }
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        params
    }
}

/// API client for the expense tracker backend.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: "/api".to_string(),
        }
    }

    /// Create a new API client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    // --- auth ---

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.post_json(&format!("{}/token/", self.base_url), request)
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.post_json(&format!("{}/signup/", self.base_url), request)
            .await
    }

    // --- expenses ---

    pub async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Transaction>, ApiError> {
        let url = format!("{}/expenses/", self.base_url);
        let response = self
            .authorized(Request::get(&url).query(query.to_params()))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }

    pub async fn create_expense(&self, payload: &ExpensePayload) -> Result<Transaction, ApiError> {
        self.post_json_authorized(&format!("{}/expenses/", self.base_url), payload)
            .await
    }

    pub async fn update_expense(
        &self,
        id: i64,
        payload: &ExpensePayload,
    ) -> Result<Transaction, ApiError> {
        let url = format!("{}/expenses/{id}/", self.base_url);
        let response = self
            .authorized(Request::put(&url))
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/expenses/{id}/", self.base_url);
        let response = self
            .authorized(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await.map(|_| ())
    }

    // --- categories ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = format!("{}/categories/", self.base_url);
        let response = self
            .authorized(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category, ApiError> {
        self.post_json_authorized(&format!("{}/categories/", self.base_url), payload)
            .await
    }

    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryPayload,
    ) -> Result<Category, ApiError> {
        let url = format!("{}/categories/{id}/", self.base_url);
        let response = self
            .authorized(Request::put(&url))
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/categories/{id}/", self.base_url);
        let response = self
            .authorized(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(response).await.map(|_| ())
    }

    // --- helpers ---

    /// Attaches the bearer token from the current session, if any. Reading
    /// the session per request means a login in another tab is picked up
    /// without re-creating the client.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match Session::current() {
            Some(session) => builder.header("Authorization", &format!("Bearer {}", session.token)),
            None => builder,
        }
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }

    async fn post_json_authorized<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorized(Request::post(url))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        parse_json(check(response).await?).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps HTTP status codes onto the error taxonomy.
async fn check(response: Response) -> Result<Response, ApiError> {
    match response.status() {
        401 => Err(ApiError::Unauthorized),
        400 => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Validation(validation_message(&body)))
        }
        status if !response.ok() => Err(ApiError::Http { status }),
        _ => Ok(response),
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Flattens a backend validation body into a displayable message. The
/// backend sends either `{"error": "..."}` or a field-to-messages map like
/// `{"title": ["This field is required."]}`.
fn validation_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return if body.is_empty() {
            "invalid request".to_string()
        } else {
            body.to_string()
        };
    };

    match value {
        Value::Object(map) => {
            let mut parts: Vec<String> = Vec::new();
            for (field, messages) in map {
                match messages {
                    Value::String(message) => parts.push(message),
                    Value::Array(items) => {
                        for item in items {
                            if let Value::String(message) = item {
                                if field == "error" || field == "detail" {
                                    parts.push(message);
                                } else {
                                    parts.push(format!("{field}: {message}"));
                                }
                            }
                        }
                    }
                    other => parts.push(format!("{field}: {other}")),
                }
            }
            if parts.is_empty() {
                "invalid request".to_string()
            } else {
                parts.join("; ")
            }
        }
        Value::String(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn empty_query_adds_no_parameters() {
        assert!(ExpenseQuery::default().to_params().is_empty());
    }

    #[test]
    fn range_query_sends_inclusive_bounds() {
        let query = ExpenseQuery {
            range: Some(range((2024, 2, 1), (2024, 2, 29))),
            ..Default::default()
        };
        assert_eq!(
            query.to_params(),
            [
                ("start_date", "2024-02-01".to_string()),
                ("end_date", "2024-02-29".to_string()),
            ]
        );
    }

    #[test]
    fn category_and_search_are_appended() {
        let query = ExpenseQuery {
            range: None,
            search: "rent".to_string(),
            category: Some(3),
        };
        assert_eq!(
            query.to_params(),
            [("search", "rent".to_string()), ("category", "3".to_string())]
        );
    }

    #[test]
    fn validation_message_flattens_field_errors() {
        assert_eq!(
            validation_message(r#"{"error": "Username already exists"}"#),
            "Username already exists"
        );
        assert_eq!(
            validation_message(r#"{"title": ["This field is required."]}"#),
            "title: This field is required."
        );
        assert_eq!(validation_message("plain text"), "plain text");
        assert_eq!(validation_message(""), "invalid request");
    }
}
