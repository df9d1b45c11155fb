use crate::config::Config;
use crate::errors::{AuthError, StoreError};
use crate::logger;
use crate::models::{FlashcardEntry, NewFlashcard, Session};
use crate::supabase::types::{AuthErrorBody, AuthSession, AuthUser, FlashcardRow, NewFlashcardRow};
use reqwest::StatusCode;

/// Thin HTTP client over the Supabase auth and REST surfaces. Every request
/// carries the project `apikey`; authenticated requests add a bearer token.
#[derive(Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        self.auth_request(&url, email, password).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        self.auth_request(&url, email, password).await
    }

    async fn auth_request(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            return Err(AuthError::Rejected(body.message()));
        }

        let auth: AuthSession = response
            .json()
            .await
            .map_err(|e| AuthError::Network(format!("malformed auth response: {}", e)))?;
        Ok(Session {
            user_id: auth.user.id,
            email: auth.user.email.unwrap_or_else(|| email.to_string()),
            access_token: auth.access_token,
        })
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(format!(
                "sign-out failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Re-validates the token with the identity service and returns the
    /// current user, mirroring the fetch path of the original client.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthenticated),
            status if !status.is_success() => Err(StoreError::Remote(format!(
                "user lookup failed with status {}",
                status
            ))),
            _ => response
                .json()
                .await
                .map_err(|e| StoreError::Remote(format!("malformed user response: {}", e))),
        }
    }

    /// Fetch the signed-in user's rows and map them into deck entries. Rows
    /// are ordered oldest-first so refetches keep a stable deck order.
    pub async fn fetch_user_deck(
        &self,
        session: &Session,
    ) -> Result<Vec<FlashcardEntry>, StoreError> {
        let user = self.get_user(&session.access_token).await?;

        let url = format!(
            "{}/rest/v1/flashcards?user_id=eq.{}&select=japanese,romaji,english,category,created_at",
            self.base_url, user.id
        );
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(StoreError::Unauthenticated)
            }
            status if !status.is_success() => {
                return Err(StoreError::Remote(format!(
                    "fetch failed with status {}",
                    status
                )))
            }
            _ => {}
        }

        let mut rows: Vec<FlashcardRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Remote(format!("malformed rows: {}", e)))?;
        // oldest-first so refetches keep a stable deck order
        rows.sort_by_key(|row| row.created_at);
        logger::log(&format!("Fetched {} user flashcards", rows.len()));
        rows.into_iter().map(FlashcardRow::into_entry).collect()
    }

    pub async fn insert_flashcard(
        &self,
        session: &Session,
        card: &NewFlashcard,
    ) -> Result<(), StoreError> {
        let user = self.get_user(&session.access_token).await?;

        let url = format!("{}/rest/v1/flashcards", self.base_url);
        let row = NewFlashcardRow {
            user_id: &user.id,
            japanese: &card.japanese,
            romaji: &card.romaji,
            english: &card.english,
            category: &card.category,
        };
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .json(&row)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Unauthenticated),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::Remote(format!(
                    "insert failed with status {}: {}",
                    status, body
                )))
            }
            _ => Ok(()),
        }
    }
}
