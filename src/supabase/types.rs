use crate::errors::StoreError;
use crate::models::FlashcardEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Successful response from the password-grant and signup endpoints.
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Error payloads from the auth endpoints come in a couple of shapes
/// (`error_description` for grant failures, `msg` for signup failures).
#[derive(Debug, Default, Deserialize)]
pub struct AuthErrorBody {
    pub error_description: Option<String>,
    pub msg: Option<String>,
    pub error: Option<String>,
}

impl AuthErrorBody {
    pub fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| "authentication failed".to_string())
    }
}

/// One row of the remote flashcards table. Deserialization is the shape
/// check: a row missing a column or carrying the wrong type fails the whole
/// fetch rather than being silently trusted.
#[derive(Debug, Deserialize)]
pub struct FlashcardRow {
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub category: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl FlashcardRow {
    pub fn into_entry(self) -> Result<FlashcardEntry, StoreError> {
        for (name, value) in [
            ("japanese", &self.japanese),
            ("romaji", &self.romaji),
            ("english", &self.english),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Remote(format!(
                    "malformed row: empty {} column",
                    name
                )));
            }
        }
        Ok(FlashcardEntry {
            japanese: self.japanese,
            romaji: self.romaji,
            english: self.english,
            category: self.category,
        })
    }
}

/// Insert payload for the flashcards table.
#[derive(Debug, Serialize)]
pub struct NewFlashcardRow<'a> {
    pub user_id: &'a str,
    pub japanese: &'a str,
    pub romaji: &'a str,
    pub english: &'a str,
    pub category: &'a str,
}
