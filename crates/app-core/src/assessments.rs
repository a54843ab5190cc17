//! Assessments and learning progress
//!
//! This module provides the quiz catalog and the [`AssessmentEngine`]:
//! - Prerequisite-based locking ("Complete <Quiz>" / "Watch <Video>")
//! - A single active quiz session with answer selection and scoring
//! - Completion recording into the shared [`ProgressStore`]
//! - Overall progress and achievement derivation
//!
//! Rejected operations return an [`AssessmentError`] and leave every piece
//! of state untouched, so UI callers are free to ignore the error.

use app_state::progress::{ProgressEntry, ProgressStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Errors that can occur during assessment operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    /// No quiz with this identifier
    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    /// Quiz has unmet prerequisites
    #[error("Quiz is locked: {0}")]
    Locked(String),

    /// Operation needs an active session
    #[error("No active quiz session")]
    NoActiveSession,

    /// Session already shows its results
    #[error("Quiz session already finished")]
    SessionFinished,

    /// Question index outside the quiz
    #[error("Question {index} out of range (quiz has {len})")]
    QuestionOutOfRange {
        /// Requested question
        index: usize,
        /// Questions in the quiz
        len: usize,
    },

    /// Option index outside the question
    #[error("Option {option} out of range for question {question} (has {len})")]
    OptionOutOfRange {
        /// Question index
        question: usize,
        /// Requested option
        option: usize,
        /// Options in the question
        len: usize,
    },

    /// Catalog data is malformed
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Result type for assessment operations
pub type Result<T> = std::result::Result<T, AssessmentError>;

// =============================================================================
// Catalog Types
// =============================================================================

/// What a prerequisite asks for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrerequisiteKind {
    /// Another quiz, named by the first word of its title, must be completed
    Complete {
        /// Title word naming the quiz
        target: String,
    },
    /// A video must have been watched
    Watch {
        /// Video description
        subject: String,
    },
    /// Unrecognized text; never locks
    Note,
}

/// A prerequisite as authored, plus its parsed meaning
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Prerequisite {
    text: String,
    kind: PrerequisiteKind,
}

impl Prerequisite {
    /// Parse an authored prerequisite
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let mut words = text.split_whitespace();
        let kind = match (words.next(), words.next()) {
            (Some("Complete"), Some(target)) => PrerequisiteKind::Complete {
                target: target.to_string(),
            },
            (Some("Watch"), Some(_)) => PrerequisiteKind::Watch {
                subject: text["Watch".len()..].trim().to_string(),
            },
            _ => PrerequisiteKind::Note,
        };
        Self {
            text: text.to_string(),
            kind,
        }
    }

    /// The authored text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed meaning
    pub fn kind(&self) -> &PrerequisiteKind {
        &self.kind
    }
}

impl From<String> for Prerequisite {
    fn from(text: String) -> Self {
        Prerequisite::parse(&text)
    }
}

impl From<Prerequisite> for String {
    fn from(prerequisite: Prerequisite) -> Self {
        prerequisite.text
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text
    pub prompt: String,
    /// Options in display order
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct: usize,
}

impl Question {
    fn new(prompt: &str, options: &[&str], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

/// An authored quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    pub description: String,
    /// Display icon
    pub icon: String,
    /// Card color
    pub color: String,
    /// Rules that lock the quiz
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    /// Questions in order
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Check the quiz's own invariants
    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(AssessmentError::InvalidCatalog(format!(
                "quiz {} has no questions",
                self.id
            )));
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "quiz {} question {} needs at least two options",
                    self.id, index
                )));
            }
            if question.correct >= question.options.len() {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "quiz {} question {} marks option {} correct but has {}",
                    self.id,
                    index,
                    question.correct,
                    question.options.len()
                )));
            }
        }
        Ok(())
    }

    /// Prerequisites joined for display
    pub fn prerequisites_line(&self) -> String {
        self.prerequisites
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn title_word(&self) -> Option<&str> {
        self.title.split_whitespace().next()
    }
}

/// A validated, ordered set of quizzes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCatalog {
    quizzes: Vec<Quiz>,
}

impl QuizCatalog {
    /// Validate and wrap a list of quizzes
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self> {
        let mut seen = HashSet::new();
        for quiz in &quizzes {
            quiz.validate()?;
            if !seen.insert(quiz.id.as_str()) {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "duplicate quiz id {}",
                    quiz.id
                )));
            }
        }
        Ok(Self { quizzes })
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let quizzes: Vec<Quiz> = serde_json::from_str(json)
            .map_err(|e| AssessmentError::InvalidCatalog(e.to_string()))?;
        Self::new(quizzes)
    }

    /// The built-in math assessments
    pub fn builtin() -> Self {
        Self {
            quizzes: builtin_quizzes(),
        }
    }

    /// Quizzes in display order
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    /// Look up a quiz by identifier
    pub fn get(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    /// Number of quizzes
    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    /// Check if the catalog has no quizzes
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Resolve the quiz a "Complete <word>" prerequisite refers to
    ///
    /// Matches the first word of a quiz title case-insensitively, falling
    /// back to the `<word>-basic` identifier convention.
    pub fn resolve_completion_target(&self, word: &str) -> Option<&Quiz> {
        self.quizzes
            .iter()
            .find(|q| q.title_word().is_some_and(|w| w.eq_ignore_ascii_case(word)))
            .or_else(|| self.get(&format!("{}-basic", word.to_lowercase())))
    }
}

fn builtin_quizzes() -> Vec<Quiz> {
    fn quiz(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        color: &str,
        prerequisites: &[&str],
        questions: Vec<Question>,
    ) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            prerequisites: prerequisites.iter().map(|p| Prerequisite::parse(p)).collect(),
            questions,
        }
    }

    vec![
        quiz(
            "counting-basic",
            "Counting Assessment",
            "Test your counting skills from 1-10",
            "\u{1F522}",
            "#FF6B6B",
            &["Watch Numberblocks Counting Video"],
            vec![
                Question::new("How many apples do you see? \u{1F34E}\u{1F34E}\u{1F34E}", &["2", "3", "4", "5"], 1),
                Question::new("Count the stars: \u{2B50}\u{2B50}\u{2B50}\u{2B50}\u{2B50}", &["3", "4", "5", "6"], 2),
                Question::new("What comes after 7?", &["6", "8", "9", "10"], 1),
            ],
        ),
        quiz(
            "shapes-basic",
            "Shapes Assessment",
            "Identify basic geometric shapes",
            "\u{1F537}",
            "#4ECDC4",
            &["Watch Shapes Video"],
            vec![
                Question::new("What shape is this? \u{1F534}", &["Square", "Circle", "Triangle", "Rectangle"], 1),
                Question::new("How many sides does a triangle have?", &["2", "3", "4", "5"], 1),
                Question::new("Which shape has 4 equal sides?", &["Circle", "Triangle", "Square", "Rectangle"], 2),
            ],
        ),
        quiz(
            "addition-basic",
            "Addition Assessment",
            "Simple addition with numbers 1-5",
            "\u{2795}",
            "#FFE66D",
            &["Complete Counting Assessment", "Watch Addition Video"],
            vec![
                Question::new("What is 2 + 3?", &["4", "5", "6", "7"], 1),
                Question::new("If you have 1 cookie and get 2 more, how many do you have?", &["2", "3", "4", "5"], 1),
                Question::new("What is 4 + 1?", &["3", "4", "5", "6"], 2),
            ],
        ),
        quiz(
            "patterns-basic",
            "Patterns Assessment",
            "Recognize and continue simple patterns",
            "\u{1F504}",
            "#2ECC71",
            &["Complete Shapes Assessment", "Watch Patterns Video"],
            vec![
                Question::new(
                    "What comes next? \u{1F534}\u{1F535}\u{1F534}\u{1F535}\u{1F534}?",
                    &["\u{1F534}", "\u{1F535}", "\u{1F7E1}", "\u{1F7E2}"],
                    1,
                ),
                Question::new(
                    "Continue the pattern: \u{2B50}\u{2B50}\u{1F319}\u{2B50}\u{2B50}\u{1F319}\u{2B50}\u{2B50}?",
                    &["\u{2B50}", "\u{1F319}", "\u{2600}\u{FE0F}", "\u{2B50}"],
                    1,
                ),
                Question::new(
                    "What comes next? \u{1F697}\u{1F697}\u{1F697}\u{1F697}\u{1F697}?",
                    &["\u{1F697}", "\u{1F695}", "\u{1F699}", "\u{1F68C}"],
                    0,
                ),
            ],
        ),
        quiz(
            "comparison-basic",
            "Comparison Assessment",
            "Compare sizes, amounts, and quantities",
            "\u{2696}\u{FE0F}",
            "#9B59B6",
            &["Complete Patterns Assessment", "Watch Comparison Video"],
            vec![
                Question::new(
                    "Which is bigger? \u{1F418} or \u{1F42D}",
                    &["\u{1F418}", "\u{1F42D}", "Same size", "Cannot tell"],
                    0,
                ),
                Question::new(
                    "Which group has more? \u{1F34E}\u{1F34E}\u{1F34E} or \u{1F34C}\u{1F34C}",
                    &["\u{1F34E}\u{1F34E}\u{1F34E}", "\u{1F34C}\u{1F34C}", "Same amount", "Cannot tell"],
                    0,
                ),
                Question::new(
                    "Which is taller? \u{1F333} or \u{1F331}",
                    &["\u{1F333}", "\u{1F331}", "Same height", "Cannot tell"],
                    0,
                ),
            ],
        ),
    ]
}

/// Progress snapshot the application starts with
pub fn seed_progress() -> Vec<(String, ProgressEntry)> {
    vec![
        ("counting-basic".to_string(), ProgressEntry::completed(90, true)),
        ("shapes-basic".to_string(), ProgressEntry::completed(85, true)),
        ("addition-basic".to_string(), ProgressEntry::pending(true)),
        ("patterns-basic".to_string(), ProgressEntry::pending(false)),
        ("comparison-basic".to_string(), ProgressEntry::pending(false)),
    ]
}

// =============================================================================
// Watch Checks
// =============================================================================

/// Decides whether a "Watch <video>" prerequisite is met
pub trait WatchCheck: Send + Sync {
    /// Whether the video described by `subject` has been watched
    fn has_watched(&self, subject: &str, progress: &ProgressStore) -> bool;
}

/// Treats every video as watched
// TODO: consult ProgressEntry::video_watched once the video library reports playback.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeWatched;

impl WatchCheck for AssumeWatched {
    fn has_watched(&self, _subject: &str, _progress: &ProgressStore) -> bool {
        true
    }
}

// =============================================================================
// Achievements
// =============================================================================

/// Badges earned by completing quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// One completed quiz
    QuickLearner,
    /// Three completed quizzes
    MathMaster,
    /// Five completed quizzes
    PerfectScore,
}

impl Achievement {
    /// Every achievement in display order
    pub const ALL: [Achievement; 3] = [
        Achievement::QuickLearner,
        Achievement::MathMaster,
        Achievement::PerfectScore,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Achievement::QuickLearner => "Quick Learner",
            Achievement::MathMaster => "Math Master",
            Achievement::PerfectScore => "Perfect Score",
        }
    }

    /// Completed quizzes needed to earn it
    pub fn threshold(&self) -> usize {
        match self {
            Achievement::QuickLearner => 1,
            Achievement::MathMaster => 3,
            Achievement::PerfectScore => 5,
        }
    }

    /// Achievements earned with `completed` quizzes, in display order
    pub fn earned_with(completed: usize) -> Vec<Achievement> {
        Achievement::ALL
            .into_iter()
            .filter(|a| completed >= a.threshold())
            .collect()
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An achievement with its earned state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    /// The achievement
    pub achievement: Achievement,
    /// Whether it has been earned
    pub earned: bool,
}

// =============================================================================
// Sessions
// =============================================================================

/// Where an attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Questions are being answered
    Answering,
    /// Finished; results are on display
    Results {
        /// Final percentage score
        score: u8,
    },
}

/// Outcome of advancing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index
    NextQuestion(usize),
    /// The last question was passed and the quiz was scored
    Completed {
        /// Final percentage score
        score: u8,
    },
}

/// One attempt at one quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSession {
    attempt_id: Uuid,
    quiz_id: String,
    current_question: usize,
    answers: BTreeMap<usize, usize>,
    phase: SessionPhase,
}

impl AssessmentSession {
    fn new(quiz_id: &str) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            quiz_id: quiz_id.to_string(),
            current_question: 0,
            answers: BTreeMap::new(),
            phase: SessionPhase::Answering,
        }
    }

    /// Unique identifier of this attempt
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    /// Quiz being attempted
    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    /// Index of the question on display
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Option chosen for a question, if any
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Every recorded answer, by question index
    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Final score, once finished
    pub fn final_score(&self) -> Option<u8> {
        match self.phase {
            SessionPhase::Results { score } => Some(score),
            SessionPhase::Answering => None,
        }
    }
}

/// Percentage of correct answers, rounded half up
pub fn score_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((200 * correct + total) / (2 * total)) as u8
}

/// Encouragement shown with a final score
pub fn result_message(score: u8) -> &'static str {
    if score >= 80 {
        "Excellent work! You're ready for the next level!"
    } else if score >= 60 {
        "Good job! Keep practicing to improve!"
    } else {
        "Keep trying! Practice makes perfect!"
    }
}

/// Card shown for each quiz on the catalog view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCard {
    /// Quiz identifier
    pub quiz_id: String,
    /// Quiz title
    pub title: String,
    /// Whether the quiz is locked
    pub locked: bool,
    /// Progress line, when the quiz has a progress entry
    pub status: Option<String>,
    /// Prerequisites joined for display
    pub prerequisites: String,
    /// Start button label
    pub action: &'static str,
}

// =============================================================================
// Engine
// =============================================================================

/// Quiz catalog, locking, sessions, and achievements over shared progress
///
/// At most one session is active at a time. `None` from [`session`] means
/// the catalog view is showing.
///
/// # Preconditions
///
/// [`select_answer`], [`choose`], [`advance`] and [`complete`] require an
/// active session still answering questions. Without one they return
/// [`AssessmentError::NoActiveSession`] or [`AssessmentError::SessionFinished`]
/// and change nothing. [`close_session`] is valid at any time.
///
/// [`session`]: AssessmentEngine::session
/// [`select_answer`]: AssessmentEngine::select_answer
/// [`choose`]: AssessmentEngine::choose
/// [`advance`]: AssessmentEngine::advance
/// [`complete`]: AssessmentEngine::complete
/// [`close_session`]: AssessmentEngine::close_session
pub struct AssessmentEngine {
    catalog: QuizCatalog,
    progress: ProgressStore,
    watch_check: Arc<dyn WatchCheck>,
    session: Option<AssessmentSession>,
}

impl AssessmentEngine {
    /// Create an engine over a catalog and the shared progress store
    pub fn new(catalog: QuizCatalog, progress: ProgressStore) -> Self {
        Self {
            catalog,
            progress,
            watch_check: Arc::new(AssumeWatched),
            session: None,
        }
    }

    /// Replace the watch-prerequisite check
    pub fn with_watch_check(mut self, check: Arc<dyn WatchCheck>) -> Self {
        self.watch_check = check;
        self
    }

    /// The quiz catalog
    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    /// The shared progress store
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Prerequisites of `quiz` that are not yet met
    ///
    /// A "Complete" prerequisite naming an unknown quiz never blocks.
    pub fn unmet_prerequisites<'q>(&self, quiz: &'q Quiz) -> Vec<&'q Prerequisite> {
        quiz.prerequisites
            .iter()
            .filter(|p| !self.is_met(p))
            .collect()
    }

    /// Whether a quiz is locked by any unmet prerequisite
    pub fn is_locked(&self, quiz: &Quiz) -> bool {
        quiz.prerequisites.iter().any(|p| !self.is_met(p))
    }

    fn is_met(&self, prerequisite: &Prerequisite) -> bool {
        match prerequisite.kind() {
            PrerequisiteKind::Complete { target } => {
                match self.catalog.resolve_completion_target(target) {
                    Some(quiz) => self.progress.is_completed(&quiz.id),
                    None => {
                        tracing::warn!(
                            prerequisite = prerequisite.text(),
                            "Prerequisite names an unknown quiz; treating as met"
                        );
                        true
                    }
                }
            }
            PrerequisiteKind::Watch { subject } => {
                self.watch_check.has_watched(subject, &self.progress)
            }
            PrerequisiteKind::Note => true,
        }
    }

    /// Start a quiz, replacing any active session
    ///
    /// Fails without opening a session if the quiz is unknown or locked.
    pub fn start_quiz(&mut self, quiz_id: &str) -> Result<&AssessmentSession> {
        let quiz = self
            .catalog
            .get(quiz_id)
            .ok_or_else(|| AssessmentError::QuizNotFound(quiz_id.to_string()))?;
        if self.is_locked(quiz) {
            tracing::debug!(quiz_id, "Refused to start locked quiz");
            return Err(AssessmentError::Locked(quiz_id.to_string()));
        }

        let session = AssessmentSession::new(quiz_id);
        tracing::info!(quiz_id, attempt = %session.attempt_id, "Started quiz");
        Ok(self.session.insert(session))
    }

    /// Record the chosen option for a question
    ///
    /// Overwrites an earlier choice and never moves to another question.
    pub fn select_answer(&mut self, question_index: usize, option_index: usize) -> Result<()> {
        let (quiz, session) = self.answering_session_mut()?;
        let question = quiz.questions.get(question_index).ok_or(
            AssessmentError::QuestionOutOfRange {
                index: question_index,
                len: quiz.questions.len(),
            },
        )?;
        if option_index >= question.options.len() {
            return Err(AssessmentError::OptionOutOfRange {
                question: question_index,
                option: option_index,
                len: question.options.len(),
            });
        }

        session.answers.insert(question_index, option_index);
        Ok(())
    }

    /// Record the chosen option for the question on display
    pub fn choose(&mut self, option_index: usize) -> Result<()> {
        let index = self
            .session
            .as_ref()
            .map(|s| s.current_question)
            .ok_or(AssessmentError::NoActiveSession)?;
        self.select_answer(index, option_index)
    }

    /// Move to the next question, or score the quiz after the last one
    ///
    /// Unanswered questions may be skipped; they score as incorrect.
    pub fn advance(&mut self) -> Result<Advance> {
        let (quiz, session) = self.answering_session_mut()?;
        if session.current_question + 1 < quiz.questions.len() {
            session.current_question += 1;
            return Ok(Advance::NextQuestion(session.current_question));
        }
        self.complete().map(|score| Advance::Completed { score })
    }

    /// Score the active session and record the completion
    ///
    /// Writes `completed = true` and the score into the quiz's progress
    /// entry, keeping its `video_watched` flag.
    pub fn complete(&mut self) -> Result<u8> {
        let (quiz, session) = self.answering_session_mut()?;
        let correct = quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| session.answers.get(index) == Some(&question.correct))
            .count();
        let score = score_percentage(correct, quiz.questions.len());

        session.phase = SessionPhase::Results { score };
        let quiz_id = session.quiz_id.clone();
        self.progress.record_completion(&quiz_id, score);
        Ok(score)
    }

    /// Discard the active session and return to the catalog view
    ///
    /// Returns whether there was a session to discard.
    pub fn close_session(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(quiz_id = %session.quiz_id, "Closed quiz session");
                true
            }
            None => false,
        }
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&AssessmentSession> {
        self.session.as_ref()
    }

    /// The quiz of the active session
    pub fn active_quiz(&self) -> Option<&Quiz> {
        self.session
            .as_ref()
            .and_then(|s| self.catalog.get(&s.quiz_id))
    }

    /// The question on display
    pub fn current_question(&self) -> Option<&Question> {
        let session = self.session.as_ref()?;
        if session.phase != SessionPhase::Answering {
            return None;
        }
        self.active_quiz()?.questions.get(session.current_question)
    }

    /// Counter line, e.g. "Question 2 of 3"
    pub fn question_counter(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let quiz = self.active_quiz()?;
        Some(format!(
            "Question {} of {}",
            session.current_question + 1,
            quiz.questions.len()
        ))
    }

    /// Fraction of the quiz reached, counting the question on display
    pub fn session_progress(&self) -> f32 {
        match (self.session.as_ref(), self.active_quiz()) {
            (Some(session), Some(quiz)) if !quiz.questions.is_empty() => {
                (session.current_question + 1) as f32 / quiz.questions.len() as f32
            }
            _ => 0.0,
        }
    }

    /// Whether the advance button is enabled: an option is chosen for the
    /// question on display
    pub fn can_advance(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.phase == SessionPhase::Answering && s.answers.contains_key(&s.current_question)
        })
    }

    /// Advance button label
    pub fn advance_label(&self) -> Option<&'static str> {
        let session = self.session.as_ref()?;
        let quiz = self.active_quiz()?;
        Some(if session.current_question + 1 < quiz.questions.len() {
            "Next Question"
        } else {
            "Finish Assessment"
        })
    }

    /// Number of completed progress entries
    pub fn completed_count(&self) -> usize {
        self.progress.completed_count()
    }

    /// Completed entries as a rounded percentage of the catalog
    pub fn overall_progress(&self) -> u8 {
        score_percentage(self.completed_count(), self.catalog.len())
    }

    /// Achievements earned so far, in display order
    pub fn earned_achievements(&self) -> Vec<Achievement> {
        Achievement::earned_with(self.completed_count())
    }

    /// Every achievement with its earned state, in display order
    pub fn achievement_board(&self) -> Vec<AchievementStatus> {
        let completed = self.completed_count();
        Achievement::ALL
            .into_iter()
            .map(|achievement| AchievementStatus {
                achievement,
                earned: completed >= achievement.threshold(),
            })
            .collect()
    }

    /// Cards for the catalog view
    pub fn cards(&self) -> Vec<QuizCard> {
        self.catalog
            .quizzes()
            .iter()
            .map(|quiz| {
                let locked = self.is_locked(quiz);
                let entry = self.progress.get(&quiz.id);
                let status = entry.map(|e| {
                    if e.completed {
                        format!("Completed! Score: {}%", e.score)
                    } else {
                        "Not completed yet".to_string()
                    }
                });
                let action = if locked {
                    "Locked"
                } else if entry.is_some_and(|e| e.completed) {
                    "Retake"
                } else {
                    "Start Assessment"
                };
                QuizCard {
                    quiz_id: quiz.id.clone(),
                    title: quiz.title.clone(),
                    locked,
                    status,
                    prerequisites: quiz.prerequisites_line(),
                    action,
                }
            })
            .collect()
    }

    fn answering_session_mut(&mut self) -> Result<(&Quiz, &mut AssessmentSession)> {
        let session = self
            .session
            .as_mut()
            .ok_or(AssessmentError::NoActiveSession)?;
        if session.phase != SessionPhase::Answering {
            return Err(AssessmentError::SessionFinished);
        }
        let quiz = self
            .catalog
            .get(&session.quiz_id)
            .ok_or_else(|| AssessmentError::QuizNotFound(session.quiz_id.clone()))?;
        Ok((quiz, session))
    }
}

impl fmt::Debug for AssessmentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentEngine")
            .field("quizzes", &self.catalog.len())
            .field("session", &self.session)
            .finish()
    }
}
