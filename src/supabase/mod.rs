pub mod client;
pub mod types;

pub use client::SupabaseClient;
pub use types::{AuthErrorBody, AuthSession, FlashcardRow};
