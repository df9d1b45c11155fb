use crate::models::{FlashcardEntry, Mode, Phase};
use rand::seq::SliceRandom;
use rand::Rng;

pub const TEST_SIZE: usize = 10;
pub const CHOICE_COUNT: usize = 4;

/// Handed out by `submit_answer` and required by `advance`. The token carries
/// the run generation it was minted in; a reset bumps the generation, so a
/// timer that fires after the reset cannot touch the new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    generation: u64,
}

/// The quiz session state machine: deck, mode, question sequencing, choice
/// generation, scoring and the mistake-review queue.
#[derive(Debug)]
pub struct QuizEngine {
    builtin: Vec<FlashcardEntry>,
    user_cards: Vec<FlashcardEntry>,
    filter: Option<String>,
    mode: Mode,
    phase: Phase,
    active_set: Vec<FlashcardEntry>,
    cursor: usize,
    score: usize,
    mistakes: Vec<FlashcardEntry>,
    choices: Vec<String>,
    selected: Option<String>,
    generation: u64,
    notice: Option<String>,
}

impl QuizEngine {
    pub fn new(builtin: Vec<FlashcardEntry>) -> Self {
        Self {
            builtin,
            user_cards: Vec::new(),
            filter: None,
            mode: Mode::Practice,
            phase: Phase::Answering,
            active_set: Vec::new(),
            cursor: 0,
            score: 0,
            mistakes: Vec::new(),
            choices: Vec::new(),
            selected: None,
            generation: 0,
            notice: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mistake_count(&self) -> usize {
        self.mistakes.len()
    }

    pub fn active_len(&self) -> usize {
        self.active_set.len()
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Built-in entries followed by the user's fetched entries, no dedup.
    pub fn deck(&self) -> impl Iterator<Item = &FlashcardEntry> {
        self.builtin.iter().chain(self.user_cards.iter())
    }

    pub fn deck_len(&self) -> usize {
        self.builtin.len() + self.user_cards.len()
    }

    pub fn filtered_deck(&self) -> Vec<&FlashcardEntry> {
        match &self.filter {
            Some(level) => self.deck().filter(|e| &e.category == level).collect(),
            None => self.deck().collect(),
        }
    }

    /// Wholesale replacement of the user-submitted deck portion. Built-in
    /// entries and any running test's active set are untouched.
    pub fn replace_user_cards(&mut self, cards: Vec<FlashcardEntry>) {
        self.user_cards = cards;
    }

    /// Filter changes never restart a test/review run; they only affect
    /// practice cycling and the next test start.
    pub fn set_filter(&mut self, level: Option<&str>) {
        self.filter = level.map(str::to_string);
    }

    /// The card currently on screen, if any. In practice mode the cursor is
    /// reduced modulo the filtered deck; an empty filtered deck yields None.
    pub fn current_card(&self) -> Option<FlashcardEntry> {
        match self.mode {
            Mode::Test | Mode::Review => self.active_set.get(self.cursor).cloned(),
            Mode::Practice => {
                let filtered = self.filtered_deck();
                if filtered.is_empty() {
                    None
                } else {
                    Some(filtered[self.cursor % filtered.len()].clone())
                }
            }
        }
    }

    pub fn start_test(&mut self, rng: &mut impl Rng) {
        let filtered: Vec<FlashcardEntry> =
            self.filtered_deck().into_iter().cloned().collect();
        if filtered.len() < TEST_SIZE {
            self.notice = Some(format!(
                "Need at least {} cards at this level to start a test",
                TEST_SIZE
            ));
            return;
        }
        self.active_set = filtered
            .choose_multiple(rng, TEST_SIZE)
            .cloned()
            .collect();
        self.mistakes.clear();
        self.mode = Mode::Test;
        self.begin_run(rng);
    }

    /// The accumulated mistakes become the active set, in order, and the
    /// mistake queue restarts empty so the run tallies fresh misses.
    pub fn start_review(&mut self, rng: &mut impl Rng) {
        if self.mistakes.is_empty() {
            self.notice = Some("No mistakes to review yet!".to_string());
            return;
        }
        self.active_set = std::mem::take(&mut self.mistakes);
        self.mode = Mode::Review;
        self.begin_run(rng);
    }

    /// Restart: back to practice cycling. Deck, filter and mistakes are
    /// preserved; any pending auto-advance is invalidated.
    pub fn back_to_practice(&mut self) {
        self.mode = Mode::Practice;
        self.phase = Phase::Answering;
        self.cursor = 0;
        self.selected = None;
        self.active_set.clear();
        self.choices.clear();
        self.generation += 1;
    }

    fn begin_run(&mut self, rng: &mut impl Rng) {
        self.score = 0;
        self.cursor = 0;
        self.selected = None;
        self.phase = Phase::Answering;
        self.generation += 1;
        self.regenerate_choices(rng);
    }

    /// Record an answer. Exact text match against the current entry's
    /// english gloss; no normalization. Returns the token the caller needs
    /// to schedule the delayed advance, or None if no question is open.
    pub fn submit_answer(&mut self, choice: &str) -> Option<AdvanceToken> {
        if self.phase != Phase::Answering || !matches!(self.mode, Mode::Test | Mode::Review) {
            return None;
        }
        let current = self.active_set.get(self.cursor)?.clone();
        self.selected = Some(choice.to_string());
        if choice == current.english {
            self.score += 1;
        } else {
            self.mistakes.push(current);
        }
        self.phase = Phase::Revealed;
        Some(AdvanceToken {
            generation: self.generation,
        })
    }

    /// Move past a revealed answer. A stale token (minted before a reset or
    /// a new run) is a no-op.
    pub fn advance(&mut self, token: AdvanceToken, rng: &mut impl Rng) {
        if token.generation != self.generation || self.phase != Phase::Revealed {
            return;
        }
        if self.cursor + 1 < self.active_set.len() {
            self.cursor += 1;
            self.selected = None;
            self.phase = Phase::Answering;
            self.regenerate_choices(rng);
        } else {
            self.phase = Phase::Finished;
        }
    }

    /// Practice-mode cycling; wraps indefinitely, no scoring.
    pub fn practice_next(&mut self) {
        let len = self.filtered_deck().len();
        if len == 0 {
            self.notice = Some("No cards at this level".to_string());
            return;
        }
        self.cursor = (self.cursor % len + 1) % len;
    }

    /// The correct gloss plus up to 3 distractors drawn without replacement
    /// from the whole deck's other entries, shuffled for display.
    fn regenerate_choices(&mut self, rng: &mut impl Rng) {
        self.choices.clear();
        let Some(correct) = self.active_set.get(self.cursor).map(|e| e.english.clone()) else {
            return;
        };
        let distractor_pool: Vec<&str> = self
            .deck()
            .filter(|e| e.english != correct)
            .map(|e| e.english.as_str())
            .collect();
        let mut choices: Vec<String> = distractor_pool
            .choose_multiple(rng, CHOICE_COUNT - 1)
            .map(|s| s.to_string())
            .collect();
        choices.push(correct);
        choices.shuffle(rng);
        self.choices = choices;
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
