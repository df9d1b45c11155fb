use crate::errors::{AuthError, StoreError};
use serde::{Deserialize, Serialize};

/// One vocabulary card. Built-in catalog entries and user-submitted entries
/// share this shape; a user entry identical to a built-in one simply appears
/// twice in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardEntry {
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub category: String,
}

/// A card about to be submitted to the remote table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFlashcard {
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub category: String,
}

impl NewFlashcard {
    /// All four fields must be non-empty before any network call is made.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (name, value) in [
            ("japanese", &self.japanese),
            ("romaji", &self.romaji),
            ("english", &self.english),
            ("category", &self.category),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(name));
            }
        }
        Ok(())
    }
}

/// The authenticated identity. Created on sign-in/up, dropped on sign-out;
/// owned by the app, never ambient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Practice,
    Test,
    Review,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Practice => "PRACTICE",
            Mode::Test => "TEST",
            Mode::Review => "REVIEW",
        }
    }
}

/// Sub-state of a test/review run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    Revealed,
    Finished,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppScreen {
    Login,
    Flashcards,
    AddCard,
}

#[derive(Debug)]
pub enum RemoteRequest {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
    },
    SignOut {
        access_token: String,
    },
    FetchDeck {
        request_id: u64,
        session: Session,
    },
    InsertCard {
        card: NewFlashcard,
        session: Session,
    },
}

#[derive(Debug)]
pub enum RemoteResponse {
    SignedIn {
        result: Result<Session, AuthError>,
    },
    SignedUp {
        result: Result<Session, AuthError>,
    },
    SignedOut,
    DeckFetched {
        request_id: u64,
        result: Result<Vec<FlashcardEntry>, StoreError>,
    },
    CardInserted {
        result: Result<(), StoreError>,
    },
}
