pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod remote_worker;
pub mod supabase;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::{App, REVEAL_DELAY};
pub use catalog::builtin_entries;
pub use config::Config;
pub use errors::{AuthError, ConfigError, StoreError};
pub use models::{
    AppScreen, FlashcardEntry, Mode, NewFlashcard, Phase, RemoteRequest, RemoteResponse, Session,
};
pub use quiz::QuizEngine;
pub use remote_worker::spawn_remote_worker;
pub use supabase::SupabaseClient;
pub use ui::{draw_add_card, draw_login, draw_quiz};
