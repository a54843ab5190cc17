//! The three math activity screens
//!
//! Each activity wraps a [`GameSession`] and adds only the input handling
//! particular to its screen: tapping objects to count, picking a shape
//! name, or typing a sum.

use app_state::timer::{FeedbackCycle, FeedbackTicket};

use crate::audio::{SoundBoard, Tone};
use crate::config::LearningConfig;
use crate::game::{AnswerChecker, ExactMatch, GamePhase, GameSession};
use crate::problems::{
    AdditionProblem, AdditionSource, CountingRound, CountingSource, Difficulty, Shape,
    ShapeQuestion, ShapeSource,
};

// =============================================================================
// Counting
// =============================================================================

/// Counting activity: tap exactly `n` distinct objects for each target `n`
#[derive(Debug)]
pub struct CountingGame {
    session: GameSession<CountingSource, ExactMatch>,
    selected: Vec<usize>,
}

impl CountingGame {
    /// Create a counting game from configuration
    pub fn new(config: &LearningConfig, sound: SoundBoard) -> Self {
        let source = CountingSource {
            max: config.counting_max,
            pool_size: config.counting_pool_size,
        };
        Self {
            session: GameSession::new(source, ExactMatch, sound),
            selected: Vec::new(),
        }
    }

    /// Tap an object in the pool
    ///
    /// Ignored when the object is out of range or already counted, when the
    /// target has already been reached, or while feedback is showing.
    /// Reaching the target submits the round.
    pub fn select(&mut self, object: usize) -> Option<FeedbackTicket> {
        if !self.session.is_accepting_answers() {
            return None;
        }
        let round = *self.session.current_problem()?;
        if object >= round.pool_size
            || self.selected.contains(&object)
            || self.selected.len() as u32 >= round.target
        {
            return None;
        }

        self.selected.push(object);
        let counted = self.selected.len() as u32;
        self.session
            .sound()
            .play(Tone::new(440.0 + counted as f32 * 50.0, 200));

        if counted == round.target {
            self.session.submit(&counted)
        } else {
            None
        }
    }

    /// Whether an object has been counted this round
    pub fn is_selected(&self, object: usize) -> bool {
        self.selected.contains(&object)
    }

    /// Objects counted this round, in tap order
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// The current target, if the game is not finished
    pub fn target(&self) -> Option<u32> {
        self.session.current_problem().map(|r: &CountingRound| r.target)
    }

    /// Fraction of the current target counted so far
    pub fn round_progress(&self) -> f32 {
        match self.target() {
            Some(target) if target > 0 => self.selected.len() as f32 / target as f32,
            _ => 0.0,
        }
    }

    /// Instruction line for the current round
    pub fn prompt(&self) -> Option<String> {
        self.target()
            .map(|n| format!("Click {} objects to count them!", n))
    }

    /// Flip the mute switch
    pub fn toggle_mute(&mut self) -> bool {
        self.session.sound_mut().toggle_mute()
    }

    /// The underlying session
    pub fn session(&self) -> &GameSession<CountingSource, ExactMatch> {
        &self.session
    }
}

impl FeedbackCycle for CountingGame {
    fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        let moved = self.session.on_feedback_elapsed(ticket);
        if moved {
            self.selected.clear();
        }
        moved
    }

    fn reset(&mut self) {
        self.session.reset();
        self.selected.clear();
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// Shapes activity: name the shape on display
#[derive(Debug)]
pub struct ShapesGame {
    session: GameSession<ShapeSource, ExactMatch>,
    chosen: Option<Shape>,
}

impl ShapesGame {
    /// Create a shapes game
    pub fn new(sound: SoundBoard) -> Self {
        Self {
            session: GameSession::new(ShapeSource, ExactMatch, sound),
            chosen: None,
        }
    }

    /// Pick a shape option
    ///
    /// Once an option is chosen, every option is disabled until the
    /// feedback clears, so a question can never be scored twice.
    pub fn choose(&mut self, shape: Shape) -> Option<FeedbackTicket> {
        if self.chosen.is_some() {
            return None;
        }
        let ticket = self.session.submit(&shape)?;
        self.chosen = Some(shape);
        Some(ticket)
    }

    /// Pick a shape option by its canonical name
    pub fn choose_by_name(&mut self, name: &str) -> Option<FeedbackTicket> {
        Shape::from_name(name).and_then(|shape| self.choose(shape))
    }

    /// Options offered for every question
    pub fn options(&self) -> &'static [Shape] {
        &Shape::ALL
    }

    /// Whether the options are disabled
    pub fn options_disabled(&self) -> bool {
        self.chosen.is_some() || !self.session.is_accepting_answers()
    }

    /// The option picked for the current question, if any
    pub fn chosen(&self) -> Option<Shape> {
        self.chosen
    }

    /// The shape on display
    pub fn current_shape(&self) -> Option<Shape> {
        self.session.current_problem().map(|q: &ShapeQuestion| q.shape)
    }

    /// Flip the mute switch
    pub fn toggle_mute(&mut self) -> bool {
        self.session.sound_mut().toggle_mute()
    }

    /// The underlying session
    pub fn session(&self) -> &GameSession<ShapeSource, ExactMatch> {
        &self.session
    }
}

impl FeedbackCycle for ShapesGame {
    fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        let moved = self.session.on_feedback_elapsed(ticket);
        if moved {
            self.chosen = None;
        }
        moved
    }

    fn reset(&mut self) {
        self.session.reset();
        self.chosen = None;
    }
}

// =============================================================================
// Addition
// =============================================================================

/// Checker for typed sums
///
/// Answers are signed so that any integer the child types, negative ones
/// included, is scored rather than ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumChecker;

impl AnswerChecker<AdditionProblem> for SumChecker {
    type Answer = i64;

    fn is_correct(&self, problem: &AdditionProblem, answer: &i64) -> bool {
        i64::from(problem.answer) == *answer
    }
}

/// Addition activity: type the sum of two numbers
#[derive(Debug)]
pub struct AdditionGame {
    session: GameSession<AdditionSource, SumChecker>,
    input: String,
}

impl AdditionGame {
    /// Create an addition game from configuration
    pub fn new(config: &LearningConfig, sound: SoundBoard) -> Self {
        let source = AdditionSource::new(config.default_difficulty, config.addition_problem_count);
        Self {
            session: GameSession::new(source, SumChecker, sound),
            input: String::new(),
        }
    }

    /// Replace the answer field contents
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Current answer field contents
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Submit the answer field
    ///
    /// Empty or non-numeric input is ignored.
    pub fn submit(&mut self) -> Option<FeedbackTicket> {
        let answer = parse_answer(&self.input)?;
        self.session.submit(&answer)
    }

    /// Switch tiers and start over with a fresh problem set
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.session.source_mut().difficulty = difficulty;
        self.reset();
        tracing::debug!(%difficulty, "Changed addition difficulty");
    }

    /// Current tier
    pub fn difficulty(&self) -> Difficulty {
        self.session.source().difficulty
    }

    /// The problem on display
    pub fn current_problem(&self) -> Option<&AdditionProblem> {
        self.session.current_problem()
    }

    /// Score line, e.g. "Score: 3/10"
    pub fn score_line(&self) -> String {
        let label = match self.session.phase() {
            GamePhase::Completed { .. } => "Final Score",
            _ => "Score",
        };
        format!("{}: {}/{}", label, self.session.score(), self.session.total())
    }

    /// Flip the mute switch
    pub fn toggle_mute(&mut self) -> bool {
        self.session.sound_mut().toggle_mute()
    }

    /// The underlying session
    pub fn session(&self) -> &GameSession<AdditionSource, SumChecker> {
        &self.session
    }
}

impl FeedbackCycle for AdditionGame {
    fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        let moved = self.session.on_feedback_elapsed(ticket);
        if moved {
            self.input.clear();
        }
        moved
    }

    fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
    }
}

fn parse_answer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
