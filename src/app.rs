use crate::catalog::{self, LEVELS};
use crate::errors::StoreError;
use crate::logger;
use crate::models::{
    AppScreen, Mode, NewFlashcard, Phase, RemoteRequest, RemoteResponse, Session,
};
use crate::quiz::{AdvanceToken, QuizEngine};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

/// How long a revealed answer stays on screen before the run advances.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub busy: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            error: None,
            busy: false,
        }
    }
}

impl LoginForm {
    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Japanese,
    Romaji,
    English,
    Category,
}

impl CardField {
    pub const ALL: [CardField; 4] = [
        CardField::Japanese,
        CardField::Romaji,
        CardField::English,
        CardField::Category,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CardField::Japanese => "Japanese",
            CardField::Romaji => "Romaji",
            CardField::English => "English",
            CardField::Category => "Category",
        }
    }
}

#[derive(Debug)]
pub struct CardForm {
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    pub category: String,
    pub focus: CardField,
}

impl Default for CardForm {
    fn default() -> Self {
        Self {
            japanese: String::new(),
            romaji: String::new(),
            english: String::new(),
            category: "N5".to_string(),
            focus: CardField::Japanese,
        }
    }
}

impl CardForm {
    pub fn field(&self, field: CardField) -> &str {
        match field {
            CardField::Japanese => &self.japanese,
            CardField::Romaji => &self.romaji,
            CardField::English => &self.english,
            CardField::Category => &self.category,
        }
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            CardField::Japanese => &mut self.japanese,
            CardField::Romaji => &mut self.romaji,
            CardField::English => &mut self.english,
            CardField::Category => &mut self.category,
        }
    }

    fn focus_next(&mut self) {
        let idx = CardField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = CardField::ALL[(idx + 1) % CardField::ALL.len()];
    }

    fn focus_prev(&mut self) {
        let idx = CardField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = CardField::ALL[(idx + CardField::ALL.len() - 1) % CardField::ALL.len()];
    }

    fn to_new_flashcard(&self) -> NewFlashcard {
        NewFlashcard {
            japanese: self.japanese.trim().to_string(),
            romaji: self.romaji.trim().to_string(),
            english: self.english.trim().to_string(),
            category: self.category.trim().to_string(),
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    due: Instant,
    token: AdvanceToken,
}

pub struct App {
    pub screen: AppScreen,
    pub session: Option<Session>,
    pub engine: QuizEngine,
    pub login: LoginForm,
    pub card_form: CardForm,
    pub notice: Option<String>,
    pub should_quit: bool,
    remote_tx: Sender<RemoteRequest>,
    pending_advance: Option<PendingAdvance>,
    fetch_counter: u64,
}

impl App {
    pub fn new(remote_tx: Sender<RemoteRequest>) -> Self {
        Self {
            screen: AppScreen::Login,
            session: None,
            engine: QuizEngine::new(catalog::builtin_entries()),
            login: LoginForm::default(),
            card_form: CardForm::default(),
            notice: None,
            should_quit: false,
            remote_tx,
            pending_advance: None,
            fetch_counter: 0,
        }
    }

    /// Run once per loop iteration: drain engine notices and fire any due
    /// auto-advance. A reset since scheduling leaves the token stale, which
    /// the engine ignores.
    pub fn tick(&mut self) {
        if let Some(notice) = self.engine.take_notice() {
            self.notice = Some(notice);
        }
        if let Some(pending) = self.pending_advance
            && Instant::now() >= pending.due
        {
            self.pending_advance = None;
            self.engine.advance(pending.token, &mut rand::thread_rng());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            AppScreen::Login => self.handle_login_key(key),
            AppScreen::Flashcards => self.handle_flashcards_key(key),
            AppScreen::AddCard => self.handle_add_card_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.login.toggle_focus(),
            KeyCode::Backspace => {
                self.login.focused_buffer().pop();
            }
            KeyCode::Enter => self.request_sign_in(),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_sign_up();
            }
            KeyCode::Char(c) => {
                self.login.focused_buffer().push(c);
            }
            _ => {}
        }
    }

    fn handle_flashcards_key(&mut self, key: KeyEvent) {
        self.notice = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('p') => {
                self.pending_advance = None;
                self.engine.back_to_practice();
            }
            KeyCode::Char('t') => {
                self.pending_advance = None;
                self.engine.start_test(&mut rand::thread_rng());
            }
            KeyCode::Char('r') => {
                self.pending_advance = None;
                self.engine.start_review(&mut rand::thread_rng());
            }
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('a') => self.screen = AppScreen::AddCard,
            KeyCode::Char('l') => self.request_sign_out(),
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right => {
                if self.engine.mode() == Mode::Practice {
                    self.engine.practice_next();
                }
            }
            KeyCode::Char(c @ '1'..='4') => self.answer_by_index(c as usize - '1' as usize),
            _ => {}
        }
    }

    fn handle_add_card_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = AppScreen::Flashcards,
            KeyCode::Tab | KeyCode::Down => self.card_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.card_form.focus_prev(),
            KeyCode::Backspace => {
                self.card_form.focused_buffer().pop();
            }
            KeyCode::Enter => self.submit_card(),
            KeyCode::Char(c) => {
                self.card_form.focused_buffer().push(c);
            }
            _ => {}
        }
    }

    fn answer_by_index(&mut self, index: usize) {
        if self.engine.phase() != Phase::Answering {
            return;
        }
        let Some(choice) = self.engine.choices().get(index).cloned() else {
            return;
        };
        if let Some(token) = self.engine.submit_answer(&choice) {
            self.pending_advance = Some(PendingAdvance {
                due: Instant::now() + REVEAL_DELAY,
                token,
            });
        }
    }

    fn cycle_filter(&mut self) {
        let next = match self.engine.filter() {
            None => Some(LEVELS[0]),
            Some(level) => {
                let idx = LEVELS.iter().position(|l| *l == level);
                match idx {
                    Some(i) if i + 1 < LEVELS.len() => Some(LEVELS[i + 1]),
                    _ => None,
                }
            }
        };
        self.engine.set_filter(next);
    }

    fn request_sign_in(&mut self) {
        self.login.error = None;
        self.login.busy = true;
        self.remote_tx
            .send(RemoteRequest::SignIn {
                email: self.login.email.trim().to_string(),
                password: self.login.password.clone(),
            })
            .ok();
    }

    fn request_sign_up(&mut self) {
        self.login.error = None;
        self.login.busy = true;
        self.remote_tx
            .send(RemoteRequest::SignUp {
                email: self.login.email.trim().to_string(),
                password: self.login.password.clone(),
            })
            .ok();
    }

    fn request_sign_out(&mut self) {
        if let Some(session) = &self.session {
            self.remote_tx
                .send(RemoteRequest::SignOut {
                    access_token: session.access_token.clone(),
                })
                .ok();
        }
    }

    /// Issue a deck fetch carrying a fresh request id; only the response to
    /// the most recently issued id is accepted.
    pub fn request_deck_fetch(&mut self) {
        let Some(session) = self.session.clone() else {
            self.notice = Some(StoreError::Unauthenticated.to_string());
            return;
        };
        self.fetch_counter += 1;
        self.remote_tx
            .send(RemoteRequest::FetchDeck {
                request_id: self.fetch_counter,
                session,
            })
            .ok();
    }

    fn submit_card(&mut self) {
        let Some(session) = self.session.clone() else {
            self.notice = Some(StoreError::Unauthenticated.to_string());
            return;
        };
        let card = self.card_form.to_new_flashcard();
        if let Err(e) = card.validate() {
            self.notice = Some(e.to_string());
            return;
        }
        self.remote_tx
            .send(RemoteRequest::InsertCard { card, session })
            .ok();
    }

    pub fn on_remote_response(&mut self, response: RemoteResponse) {
        match response {
            RemoteResponse::SignedIn { result } | RemoteResponse::SignedUp { result } => {
                self.login.busy = false;
                match result {
                    Ok(session) => {
                        self.login.error = None;
                        self.login.password.clear();
                        self.session = Some(session);
                        self.screen = AppScreen::Flashcards;
                        self.request_deck_fetch();
                    }
                    Err(e) => self.login.error = Some(e.to_string()),
                }
            }
            RemoteResponse::SignedOut => {
                self.session = None;
                self.pending_advance = None;
                self.engine.replace_user_cards(Vec::new());
                self.engine.back_to_practice();
                self.screen = AppScreen::Login;
                self.notice = Some("Logged out!".to_string());
            }
            RemoteResponse::DeckFetched { request_id, result } => {
                if request_id != self.fetch_counter {
                    logger::log(&format!(
                        "Discarding stale deck fetch #{} (latest is #{})",
                        request_id, self.fetch_counter
                    ));
                    return;
                }
                match result {
                    Ok(cards) => self.engine.replace_user_cards(cards),
                    Err(e) => self.notice = Some(e.to_string()),
                }
            }
            RemoteResponse::CardInserted { result } => match result {
                Ok(()) => {
                    self.card_form.clear();
                    self.screen = AppScreen::Flashcards;
                    self.notice = Some("Flashcard added!".to_string());
                    self.request_deck_fetch();
                }
                Err(e) => self.notice = Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuthError;
    use crate::models::FlashcardEntry;
    use std::sync::mpsc::{channel, Receiver};

    fn app() -> (App, Receiver<RemoteRequest>) {
        let (tx, rx) = channel();
        (App::new(tx), rx)
    }

    fn session() -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: "a@b.jp".to_string(),
            access_token: "token".to_string(),
        }
    }

    fn user_card(english: &str) -> FlashcardEntry {
        FlashcardEntry {
            japanese: "語".to_string(),
            romaji: "go".to_string(),
            english: english.to_string(),
            category: "N5".to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn starts_on_login_screen_without_session() {
        let (app, _rx) = app();
        assert_eq!(app.screen, AppScreen::Login);
        assert!(app.session.is_none());
    }

    #[test]
    fn sign_in_success_switches_screen_and_fetches_deck() {
        let (mut app, rx) = app();
        app.on_remote_response(RemoteResponse::SignedIn {
            result: Ok(session()),
        });

        assert_eq!(app.screen, AppScreen::Flashcards);
        assert!(app.session.is_some());
        match rx.try_recv() {
            Ok(RemoteRequest::FetchDeck { request_id, .. }) => assert_eq!(request_id, 1),
            other => panic!("expected deck fetch, got {:?}", other),
        }
    }

    #[test]
    fn sign_in_failure_shows_inline_error_and_stays_on_login() {
        let (mut app, _rx) = app();
        app.on_remote_response(RemoteResponse::SignedIn {
            result: Err(AuthError::Rejected("Invalid login credentials".to_string())),
        });

        assert_eq!(app.screen, AppScreen::Login);
        assert_eq!(app.login.error.as_deref(), Some("Invalid login credentials"));
        assert!(!app.login.busy);
    }

    #[test]
    fn stale_fetch_response_is_discarded() {
        let (mut app, _rx) = app();
        app.session = Some(session());
        app.request_deck_fetch();
        app.request_deck_fetch();

        app.on_remote_response(RemoteResponse::DeckFetched {
            request_id: 1,
            result: Ok(vec![user_card("stale")]),
        });
        assert_eq!(app.engine.deck_len(), catalog::builtin_entries().len());

        app.on_remote_response(RemoteResponse::DeckFetched {
            request_id: 2,
            result: Ok(vec![user_card("fresh")]),
        });
        assert_eq!(app.engine.deck_len(), catalog::builtin_entries().len() + 1);
    }

    #[test]
    fn failed_fetch_keeps_last_good_deck() {
        let (mut app, _rx) = app();
        app.session = Some(session());
        app.request_deck_fetch();
        app.on_remote_response(RemoteResponse::DeckFetched {
            request_id: 1,
            result: Ok(vec![user_card("kept")]),
        });

        app.request_deck_fetch();
        app.on_remote_response(RemoteResponse::DeckFetched {
            request_id: 2,
            result: Err(StoreError::Remote("boom".to_string())),
        });

        assert_eq!(app.engine.deck_len(), catalog::builtin_entries().len() + 1);
        assert!(app.notice.as_deref().unwrap_or("").contains("boom"));
    }

    #[test]
    fn fetch_without_session_is_refused_locally() {
        let (mut app, rx) = app();
        app.request_deck_fetch();

        assert_eq!(app.notice.as_deref(), Some("not signed in"));
        assert!(rx.try_recv().is_err(), "no request may be issued");
    }

    #[test]
    fn card_with_empty_romaji_is_rejected_before_any_network_call() {
        let (mut app, rx) = app();
        app.session = Some(session());
        app.screen = AppScreen::AddCard;
        app.card_form.japanese = "勉強".to_string();
        app.card_form.english = "study".to_string();
        // romaji left empty; category defaults to N5

        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.notice.as_deref(), Some("missing required field: romaji"));
        assert!(rx.try_recv().is_err(), "no insert may be issued");
    }

    #[test]
    fn valid_card_submission_issues_insert_request() {
        let (mut app, rx) = app();
        app.session = Some(session());
        app.screen = AppScreen::AddCard;
        app.card_form.japanese = "勉強".to_string();
        app.card_form.romaji = "benkyou".to_string();
        app.card_form.english = "study".to_string();

        app.handle_key(key(KeyCode::Enter));

        match rx.try_recv() {
            Ok(RemoteRequest::InsertCard { card, .. }) => assert_eq!(card.japanese, "勉強"),
            other => panic!("expected insert request, got {:?}", other),
        }
    }

    #[test]
    fn insert_success_refreshes_deck_and_clears_form() {
        let (mut app, rx) = app();
        app.session = Some(session());
        app.screen = AppScreen::AddCard;
        app.card_form.japanese = "勉強".to_string();

        app.on_remote_response(RemoteResponse::CardInserted { result: Ok(()) });

        assert_eq!(app.notice.as_deref(), Some("Flashcard added!"));
        assert_eq!(app.screen, AppScreen::Flashcards);
        assert!(app.card_form.japanese.is_empty());
        assert!(matches!(rx.try_recv(), Ok(RemoteRequest::FetchDeck { .. })));
    }

    #[test]
    fn sign_out_clears_session_and_returns_to_login() {
        let (mut app, _rx) = app();
        app.session = Some(session());
        app.screen = AppScreen::Flashcards;
        app.on_remote_response(RemoteResponse::DeckFetched {
            request_id: 0,
            result: Ok(vec![]),
        });

        app.on_remote_response(RemoteResponse::SignedOut);

        assert!(app.session.is_none());
        assert_eq!(app.screen, AppScreen::Login);
        assert_eq!(app.notice.as_deref(), Some("Logged out!"));
        assert_eq!(app.engine.deck_len(), catalog::builtin_entries().len());
    }

    #[test]
    fn answering_a_question_schedules_the_auto_advance() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.engine.mode(), Mode::Test);

        app.handle_key(key(KeyCode::Char('1')));

        assert_eq!(app.engine.phase(), Phase::Revealed);
        assert!(app.pending_advance.is_some());
    }

    #[test]
    fn mode_reset_cancels_the_pending_advance() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Char('1')));
        assert!(app.pending_advance.is_some());

        app.handle_key(key(KeyCode::Char('p')));

        assert!(app.pending_advance.is_none());
        assert_eq!(app.engine.mode(), Mode::Practice);
    }

    #[test]
    fn stale_timer_cannot_mutate_the_next_run() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Char('1')));
        let stale = app.pending_advance.unwrap();

        // user restarts before the timer fires; a fresh run begins
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(key(KeyCode::Char('t')));

        // replay the stale deadline as if the timer had just fired
        app.pending_advance = Some(PendingAdvance {
            due: Instant::now() - Duration::from_millis(1),
            token: stale.token,
        });
        app.tick();

        assert_eq!(app.engine.cursor(), 0);
        assert_eq!(app.engine.phase(), Phase::Answering);
    }

    #[test]
    fn due_timer_advances_to_the_next_question() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;
        app.handle_key(key(KeyCode::Char('t')));
        let correct = app.engine.current_card().unwrap().english;
        let index = app
            .engine
            .choices()
            .iter()
            .position(|c| *c == correct)
            .unwrap();
        app.handle_key(key(KeyCode::Char(char::from(b'1' + index as u8))));

        let pending = app.pending_advance.unwrap();
        app.pending_advance = Some(PendingAdvance {
            due: Instant::now() - Duration::from_millis(1),
            token: pending.token,
        });
        app.tick();

        assert_eq!(app.engine.score(), 1);
        assert_eq!(app.engine.cursor(), 1);
        assert_eq!(app.engine.phase(), Phase::Answering);
    }

    #[test]
    fn filter_key_cycles_levels_then_back_to_all() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.engine.filter(), Some("N5"));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.engine.filter(), Some("N4"));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.engine.filter(), Some("N3"));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.engine.filter(), None);
    }

    #[test]
    fn choice_keys_are_ignored_while_revealed() {
        let (mut app, _rx) = app();
        app.screen = AppScreen::Flashcards;
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Char('1')));
        let score_after_first = app.engine.score();

        // double-press before the advance timer fires
        app.handle_key(key(KeyCode::Char('2')));

        assert_eq!(app.engine.score(), score_after_first);
        assert_eq!(app.engine.cursor(), 0);
    }

    #[test]
    fn login_typing_fills_the_focused_field() {
        let (mut app, _rx) = app();
        for c in "a@b.jp".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "secret".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(app.login.email, "a@b.jp");
        assert_eq!(app.login.password, "secret");
    }

    #[test]
    fn enter_on_login_issues_sign_in_request() {
        let (mut app, rx) = app();
        app.login.email = "a@b.jp".to_string();
        app.login.password = "secret".to_string();

        app.handle_key(key(KeyCode::Enter));

        assert!(app.login.busy);
        match rx.try_recv() {
            Ok(RemoteRequest::SignIn { email, password }) => {
                assert_eq!(email, "a@b.jp");
                assert_eq!(password, "secret");
            }
            other => panic!("expected sign-in request, got {:?}", other),
        }
    }

    #[test]
    fn ctrl_n_on_login_issues_sign_up_request() {
        let (mut app, rx) = app();
        app.login.email = "new@b.jp".to_string();
        app.login.password = "secret".to_string();

        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));

        assert!(matches!(rx.try_recv(), Ok(RemoteRequest::SignUp { .. })));
    }

    #[test]
    fn logout_key_sends_sign_out_with_the_session_token() {
        let (mut app, rx) = app();
        app.session = Some(session());
        app.screen = AppScreen::Flashcards;

        app.handle_key(key(KeyCode::Char('l')));

        match rx.try_recv() {
            Ok(RemoteRequest::SignOut { access_token }) => assert_eq!(access_token, "token"),
            other => panic!("expected sign-out request, got {:?}", other),
        }
    }
}
