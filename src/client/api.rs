use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ClientError, ClientResult};
use crate::dto::{
    AuthResponse, CreateMoodRequest, DeleteResponse, LoginRequest, RegisterRequest,
    UpdateMoodRequest,
};
use crate::models::mood::{DateRange, MoodEntry};
use crate::models::user::UserProfile;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// API base URL baked in at build time through `MOODTRACK_API_URL`.
pub fn build_time_api_url() -> &'static str {
    option_env!("MOODTRACK_API_URL").unwrap_or(DEFAULT_API_URL)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.pointer("/error/message")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        tracing::debug!(status = status.as_u16(), %message, "API request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn register(&self, body: &RegisterRequest) -> ClientResult<AuthResponse> {
        Self::send(self.http.post(self.url("/api/auth/register")).json(body)).await
    }

    pub async fn login(&self, body: &LoginRequest) -> ClientResult<AuthResponse> {
        Self::send(self.http.post(self.url("/api/auth/login")).json(body)).await
    }

    pub async fn me(&self, token: &str) -> ClientResult<UserProfile> {
        Self::send(self.http.get(self.url("/api/auth/me")).bearer_auth(token)).await
    }

    pub async fn create_mood(&self, token: &str, body: &CreateMoodRequest) -> ClientResult<MoodEntry> {
        Self::send(
            self.http
                .post(self.url("/api/moods"))
                .bearer_auth(token)
                .json(body),
        )
        .await
    }

    pub async fn list_moods(&self, token: &str, range: DateRange) -> ClientResult<Vec<MoodEntry>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = range.start {
            query.push(("startDate", start.to_string()));
        }
        if let Some(end) = range.end {
            query.push(("endDate", end.to_string()));
        }

        Self::send(
            self.http
                .get(self.url("/api/moods"))
                .bearer_auth(token)
                .query(&query),
        )
        .await
    }

    pub async fn get_mood(&self, token: &str, id: &str) -> ClientResult<MoodEntry> {
        Self::send(
            self.http
                .get(self.url(&format!("/api/moods/{}", id)))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_mood(
        &self,
        token: &str,
        id: &str,
        body: &UpdateMoodRequest,
    ) -> ClientResult<MoodEntry> {
        Self::send(
            self.http
                .put(self.url(&format!("/api/moods/{}", id)))
                .bearer_auth(token)
                .json(body),
        )
        .await
    }

    pub async fn delete_mood(&self, token: &str, id: &str) -> ClientResult<DeleteResponse> {
        Self::send(
            self.http
                .delete(self.url(&format!("/api/moods/{}", id)))
                .bearer_auth(token),
        )
        .await
    }
}
