//! The quiz session state machine: one instance per run, driving the
//! question/answer/timeout flow and the score tally.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::dao::models::{CountryEntry, GameMode};
use crate::state::shuffle;

/// Countdown allotted to each question.
pub const QUESTION_TIME: Duration = Duration::from_secs(10);
/// Number of flags in a daily run.
pub const DAILY_FLAG_COUNT: usize = 10;
/// Number of answer choices shown per question.
const CHOICE_COUNT: usize = 4;

/// Phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A question is live; the index points at the current target.
    Active,
    /// Every flag was answered correctly. Terminal.
    Completed,
    /// A wrong answer or a timeout ended the run. Terminal.
    Failed,
}

/// One presented question: the target flag and its shuffled answer choices.
#[derive(Debug, Clone)]
pub struct Question {
    /// Target country whose flag is shown.
    pub country: CountryEntry,
    /// Four display choices: the correct name plus three distinct distractors,
    /// in shuffled order.
    pub choices: Vec<String>,
    /// The correct choice, so the UI can highlight it even after a wrong pick.
    pub correct: String,
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct; the session moved on to the next question.
    Advanced,
    /// Correct, and it was the last question. The session is complete.
    Completed,
    /// Wrong. The session failed; `correct` names the choice to highlight.
    Failed {
        /// The answer that should have been picked.
        correct: String,
    },
}

/// State for a single quiz run.
///
/// Invariant: `index <= order.len()`, and the session is terminal exactly when
/// every flag was answered (`Completed`) or the first wrong answer/timeout
/// occurred (`Failed`).
#[derive(Debug, Clone)]
pub struct QuizSession {
    mode: GameMode,
    order: Vec<CountryEntry>,
    index: usize,
    score: u32,
    phase: SessionPhase,
    run_start: Instant,
    question_start: Instant,
    finished_at: Option<Instant>,
}

impl QuizSession {
    /// Start a run over `countries`.
    ///
    /// Classic runs draw a fresh uniform permutation of the full list from
    /// `rng`. Daily runs ignore `rng` and derive a shared deterministic order
    /// from `"daily:" + daily_seed` (the local calendar date), truncated to
    /// [`DAILY_FLAG_COUNT`] flags.
    pub fn start<R: Rng + ?Sized>(
        mode: GameMode,
        countries: &[CountryEntry],
        daily_seed: &str,
        rng: &mut R,
    ) -> Self {
        let order = match mode {
            GameMode::Classic => shuffle::random_shuffle(countries, rng),
            GameMode::Daily => {
                let mut shuffled =
                    shuffle::seeded_shuffle(countries, &format!("daily:{daily_seed}"));
                shuffled.truncate(DAILY_FLAG_COUNT);
                shuffled
            }
        };

        let now = Instant::now();
        let phase = if order.is_empty() {
            SessionPhase::Completed
        } else {
            SessionPhase::Active
        };

        Self {
            mode,
            order,
            index: 0,
            score: 0,
            phase,
            run_start: now,
            question_start: now,
            finished_at: (phase != SessionPhase::Active).then_some(now),
        }
    }

    /// Present the current question and restart its countdown. Returns `None`
    /// once the session is terminal.
    pub fn present_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Question> {
        if self.phase != SessionPhase::Active {
            return None;
        }

        let country = self.order[self.index].clone();
        let correct = country.name.clone();

        let distinct_names: HashSet<&str> =
            self.order.iter().map(|entry| entry.name.as_str()).collect();
        let target = CHOICE_COUNT.min(distinct_names.len());

        let mut choices = vec![correct.clone()];
        while choices.len() < target {
            // Resample until distinct; bounded because `target` never exceeds
            // the number of distinct names in the order.
            if let Some(candidate) = self.order.choose(rng) {
                if !choices.contains(&candidate.name) {
                    choices.push(candidate.name.clone());
                }
            }
        }
        choices.shuffle(rng);

        self.question_start = Instant::now();

        Some(Question {
            country,
            choices,
            correct,
        })
    }

    /// Apply an answer to the current question. Returns `None` when the
    /// session is already terminal.
    pub fn answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::Active {
            return None;
        }

        let correct = self.order[self.index].name.clone();
        if choice == correct {
            self.score += 1;
            self.index += 1;
            if self.index == self.order.len() {
                self.finish(SessionPhase::Completed);
                Some(AnswerOutcome::Completed)
            } else {
                Some(AnswerOutcome::Advanced)
            }
        } else {
            self.finish(SessionPhase::Failed);
            Some(AnswerOutcome::Failed { correct })
        }
    }

    /// Fail the run because the question countdown expired.
    pub fn timeout(&mut self) {
        if self.phase == SessionPhase::Active {
            self.finish(SessionPhase::Failed);
        }
    }

    /// Fail the run if `now` is past the current question's deadline.
    /// Countdown state is always recomputed from wall-clock deltas, never from
    /// tick counting.
    pub fn expire_if_timed_out(&mut self, now: Instant) -> bool {
        if self.phase == SessionPhase::Active
            && now.duration_since(self.question_start) >= QUESTION_TIME
        {
            self.finish(SessionPhase::Failed);
            true
        } else {
            false
        }
    }

    /// Time left on the current question's countdown.
    pub fn time_remaining(&self, now: Instant) -> Duration {
        QUESTION_TIME.saturating_sub(now.duration_since(self.question_start))
    }

    /// Wall-clock seconds from the run start to the terminal transition (or to
    /// now while the run is still live). This is the value submitted with the
    /// final score.
    pub fn elapsed_seconds(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Instant::now);
        end.duration_since(self.run_start).as_secs_f64()
    }

    /// Game variant of this run.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Fixed flag order for this run.
    pub fn order(&self) -> &[CountryEntry] {
        &self.order
    }

    /// Current 0-based question position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the run ended with every flag answered.
    pub fn completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    fn finish(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.finished_at = Some(Instant::now());
    }
}
