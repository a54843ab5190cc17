//! Answer/feedback game session
//!
//! The counting, shapes and addition screens all run the same loop:
//!
//! ```text
//! Presenting(i) --submit--> Feedback(i, correct) --delay--> Presenting(i + 1)
//!                                                       \-> Completed(score)
//! reset: any state --> Presenting(0) with a fresh problem set
//! ```
//!
//! [`GameSession`] implements that loop once, parameterized by a
//! [`ProblemSource`] that produces the problems and an [`AnswerChecker`]
//! that judges answers. The delay itself is driven from outside through
//! [`FeedbackCycle`], usually by an `app_state::FeedbackScheduler`.

use app_state::timer::{FeedbackCycle, FeedbackTicket, TicketIssuer};

use crate::audio::{SoundBoard, Tone, CORRECT_TONE, MISS_TONE};

/// Produces the ordered problem set for one round
pub trait ProblemSource {
    /// Problem type
    type Problem;

    /// Produce a fresh problem set
    fn generate(&mut self) -> Vec<Self::Problem>;

    /// Tone announcing the problem at `index`, if any
    fn presentation_tone(&self, _index: usize) -> Option<Tone> {
        None
    }
}

/// Judges an answer against a problem
pub trait AnswerChecker<P> {
    /// Answer type
    type Answer;

    /// Whether `answer` is correct for `problem`
    fn is_correct(&self, problem: &P, answer: &Self::Answer) -> bool;
}

/// A problem with a single precomputed expected value
pub trait Expected {
    /// Expected value type
    type Value: PartialEq;

    /// The value a correct answer must equal
    fn expected(&self) -> &Self::Value;
}

/// Checker comparing the answer for exact equality with the expected value
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl<P: Expected> AnswerChecker<P> for ExactMatch {
    type Answer = P::Value;

    fn is_correct(&self, problem: &P, answer: &P::Value) -> bool {
        problem.expected() == answer
    }
}

/// What happens after feedback for a wrong answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Present the same problem again
    #[default]
    Retry,
    /// Move on as if it had been answered
    Advance,
}

/// Phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for an answer to the problem at `index`
    Presenting {
        /// Problem index
        index: usize,
    },
    /// Showing feedback for the problem at `index`
    Feedback {
        /// Problem index
        index: usize,
        /// Whether the submitted answer was correct
        correct: bool,
    },
    /// Every problem has been answered
    Completed {
        /// Correct answers
        score: u32,
        /// Problems in the round
        total: u32,
    },
}

/// One play-through of an activity
pub struct GameSession<S, C>
where
    S: ProblemSource,
    C: AnswerChecker<S::Problem>,
{
    source: S,
    checker: C,
    problems: Vec<S::Problem>,
    phase: GamePhase,
    score: u32,
    miss_policy: MissPolicy,
    tickets: TicketIssuer,
    sound: SoundBoard,
}

impl<S, C> GameSession<S, C>
where
    S: ProblemSource,
    C: AnswerChecker<S::Problem>,
{
    /// Start a session on its first problem
    pub fn new(mut source: S, checker: C, sound: SoundBoard) -> Self {
        let problems = source.generate();
        let session = Self {
            source,
            checker,
            problems,
            phase: GamePhase::Presenting { index: 0 },
            score: 0,
            miss_policy: MissPolicy::default(),
            tickets: TicketIssuer::new(),
            sound,
        };
        session.announce(0);
        session
    }

    /// Set the policy for wrong answers
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    /// Submit an answer for the problem on display
    ///
    /// Ignored (returns `None`) unless the session is presenting a problem.
    /// Otherwise scores the answer, plays the matching tone, enters
    /// feedback and returns the ticket the feedback timer must present.
    pub fn submit(&mut self, answer: &C::Answer) -> Option<FeedbackTicket> {
        let GamePhase::Presenting { index } = self.phase else {
            tracing::debug!(phase = ?self.phase, "Ignored answer outside presenting phase");
            return None;
        };
        let problem = self.problems.get(index)?;

        let correct = self.checker.is_correct(problem, answer);
        if correct {
            self.score += 1;
            self.sound.play(CORRECT_TONE);
        } else {
            self.sound.play(MISS_TONE);
        }

        self.phase = GamePhase::Feedback { index, correct };
        tracing::debug!(index, correct, score = self.score, "Answer submitted");
        Some(self.tickets.issue())
    }

    /// Current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether an answer would currently be accepted
    pub fn is_accepting_answers(&self) -> bool {
        matches!(self.phase, GamePhase::Presenting { .. })
    }

    /// Index of the problem on display, if any
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            GamePhase::Presenting { index } | GamePhase::Feedback { index, .. } => Some(index),
            GamePhase::Completed { .. } => None,
        }
    }

    /// The problem on display, if any
    pub fn current_problem(&self) -> Option<&S::Problem> {
        self.current_index().and_then(|i| self.problems.get(i))
    }

    /// Whether the session is showing feedback, and for which outcome
    pub fn feedback(&self) -> Option<bool> {
        match self.phase {
            GamePhase::Feedback { correct, .. } => Some(correct),
            _ => None,
        }
    }

    /// Whether every problem has been answered
    pub fn is_completed(&self) -> bool {
        matches!(self.phase, GamePhase::Completed { .. })
    }

    /// Correct answers so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Problems in the round
    pub fn total(&self) -> u32 {
        self.problems.len() as u32
    }

    /// Fraction of the round reached, counting the problem on display
    pub fn progress_fraction(&self) -> f32 {
        if self.problems.is_empty() {
            return 0.0;
        }
        match self.current_index() {
            Some(index) => (index + 1) as f32 / self.problems.len() as f32,
            None => 1.0,
        }
    }

    /// The full problem set
    pub fn problems(&self) -> &[S::Problem] {
        &self.problems
    }

    /// The problem source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the problem source; takes effect on the next reset
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The screen's sound board
    pub fn sound(&self) -> &SoundBoard {
        &self.sound
    }

    /// Mutable access to the sound board, for the mute toggle
    pub fn sound_mut(&mut self) -> &mut SoundBoard {
        &mut self.sound
    }

    fn announce(&self, index: usize) {
        if index < self.problems.len() {
            if let Some(tone) = self.source.presentation_tone(index) {
                self.sound.play(tone);
            }
        }
    }

    fn present(&mut self, index: usize) {
        self.phase = GamePhase::Presenting { index };
        self.announce(index);
    }
}

impl<S, C> FeedbackCycle for GameSession<S, C>
where
    S: ProblemSource,
    C: AnswerChecker<S::Problem>,
{
    fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        if !self.tickets.is_current(ticket) {
            return false;
        }
        let GamePhase::Feedback { index, correct } = self.phase else {
            return false;
        };

        let advance = correct || self.miss_policy == MissPolicy::Advance;
        if !advance {
            // Same problem again; no presentation tone since the index is unchanged.
            self.phase = GamePhase::Presenting { index };
        } else if index + 1 < self.problems.len() {
            self.present(index + 1);
        } else {
            self.phase = GamePhase::Completed {
                score: self.score,
                total: self.total(),
            };
            tracing::info!(score = self.score, total = self.total(), "Game completed");
        }
        true
    }

    fn reset(&mut self) {
        self.tickets.invalidate();
        self.problems = self.source.generate();
        self.score = 0;
        self.present(0);
    }
}

impl<S, C> std::fmt::Debug for GameSession<S, C>
where
    S: ProblemSource,
    C: AnswerChecker<S::Problem>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("total", &self.problems.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MockTonePlayer;
    use std::sync::Arc;

    struct Doubling {
        rounds: u32,
        generated: u32,
    }

    struct DoubleOf(u32);

    impl Expected for DoubleOf {
        type Value = u32;

        fn expected(&self) -> &u32 {
            &self.0
        }
    }

    impl ProblemSource for Doubling {
        type Problem = DoubleOf;

        fn generate(&mut self) -> Vec<DoubleOf> {
            self.generated += 1;
            (1..=self.rounds).map(|n| DoubleOf(n * 2)).collect()
        }

        fn presentation_tone(&self, index: usize) -> Option<Tone> {
            Some(Tone::new(100.0 * (index as f32 + 1.0), 100))
        }
    }

    fn session(rounds: u32) -> GameSession<Doubling, ExactMatch> {
        GameSession::new(
            Doubling {
                rounds,
                generated: 0,
            },
            ExactMatch,
            SoundBoard::silent(),
        )
    }

    #[test]
    fn test_starts_presenting_first_problem() {
        let game = session(3);
        assert_eq!(game.phase(), GamePhase::Presenting { index: 0 });
        assert_eq!(game.total(), 3);
        assert_eq!(game.score(), 0);
        assert!((game.progress_fraction() - 1.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_correct_answer_advances_after_feedback() {
        let mut game = session(3);
        let ticket = game.submit(&2).unwrap();
        assert_eq!(game.phase(), GamePhase::Feedback { index: 0, correct: true });
        assert_eq!(game.score(), 1);

        assert!(game.on_feedback_elapsed(ticket));
        assert_eq!(game.phase(), GamePhase::Presenting { index: 1 });
    }

    #[test]
    fn test_submission_during_feedback_is_ignored() {
        let mut game = session(3);
        game.submit(&2).unwrap();
        assert!(game.submit(&2).is_none());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_wrong_answer_retries_same_problem() {
        let mut game = session(3);
        let ticket = game.submit(&5).unwrap();
        assert_eq!(game.feedback(), Some(false));
        assert_eq!(game.score(), 0);

        assert!(game.on_feedback_elapsed(ticket));
        assert_eq!(game.phase(), GamePhase::Presenting { index: 0 });
    }

    #[test]
    fn test_advance_policy_moves_on_after_miss() {
        let mut game = session(2).with_miss_policy(MissPolicy::Advance);
        let ticket = game.submit(&9).unwrap();
        game.on_feedback_elapsed(ticket);
        assert_eq!(game.phase(), GamePhase::Presenting { index: 1 });

        let ticket = game.submit(&4).unwrap();
        game.on_feedback_elapsed(ticket);
        assert_eq!(game.phase(), GamePhase::Completed { score: 1, total: 2 });
    }

    #[test]
    fn test_completes_after_last_problem() {
        let mut game = session(2);
        for answer in [2, 4] {
            let ticket = game.submit(&answer).unwrap();
            game.on_feedback_elapsed(ticket);
        }
        assert_eq!(game.phase(), GamePhase::Completed { score: 2, total: 2 });
        assert!(game.is_completed());
        assert!(game.current_problem().is_none());
        assert!(game.submit(&6).is_none());
        assert_eq!(game.progress_fraction(), 1.0);
    }

    #[test]
    fn test_stale_ticket_after_reset_is_ignored() {
        let mut game = session(3);
        let ticket = game.submit(&2).unwrap();
        game.reset();

        assert!(!game.on_feedback_elapsed(ticket));
        assert_eq!(game.phase(), GamePhase::Presenting { index: 0 });
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut game = session(3);
        let ticket = game.submit(&2).unwrap();
        assert!(game.on_feedback_elapsed(ticket));
        assert!(!game.on_feedback_elapsed(ticket));
        assert_eq!(game.phase(), GamePhase::Presenting { index: 1 });
    }

    #[test]
    fn test_reset_regenerates_problems() {
        let mut game = session(3);
        let ticket = game.submit(&2).unwrap();
        game.on_feedback_elapsed(ticket);

        game.reset();
        assert_eq!(game.source().generated, 2);
        assert_eq!(game.phase(), GamePhase::Presenting { index: 0 });
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_tones_follow_the_session() {
        let mut player = MockTonePlayer::new();
        let mut seq = mockall::Sequence::new();
        for tone in [Tone::new(100.0, 100), CORRECT_TONE, Tone::new(200.0, 100), MISS_TONE] {
            player
                .expect_play_tone()
                .withf(move |t| *t == tone)
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }

        let mut game = GameSession::new(
            Doubling {
                rounds: 2,
                generated: 0,
            },
            ExactMatch,
            SoundBoard::new(Arc::new(player)),
        );
        let ticket = game.submit(&2).unwrap();
        game.on_feedback_elapsed(ticket);
        let ticket = game.submit(&0).unwrap();
        // Retrying the same problem does not replay its announcement.
        game.on_feedback_elapsed(ticket);
    }

    #[test]
    fn test_reset_announces_first_problem_again() {
        let mut player = MockTonePlayer::new();
        player
            .expect_play_tone()
            .withf(|t| *t == Tone::new(100.0, 100))
            .times(2)
            .return_const(());

        let mut game = GameSession::new(
            Doubling {
                rounds: 2,
                generated: 0,
            },
            ExactMatch,
            SoundBoard::new(Arc::new(player)),
        );
        // Still on the first problem; reset replays its announcement.
        game.reset();
        assert_eq!(game.current_index(), Some(0));
    }

    #[test]
    fn test_empty_problem_set() {
        let mut game = session(0);
        assert!(game.submit(&2).is_none());
        assert_eq!(game.progress_fraction(), 0.0);
    }
}
