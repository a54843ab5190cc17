//! Problem generators for the activity screens
//!
//! Generation is pure: given a tier and a randomness source, produce a
//! fixed-size ordered set of problems. Randomness is unseeded in normal
//! use; the `*_with` variants accept any [`Rng`] so tests can seed it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::audio::Tone;
use crate::game::{Expected, ProblemSource};

// =============================================================================
// Addition
// =============================================================================

/// Addition difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    /// Operands 1-5
    #[default]
    Easy,
    /// Operands 1-10
    Medium,
    /// Operands 1-15
    Hard,
}

impl Difficulty {
    /// Inclusive operand range for this tier
    pub fn operand_range(&self) -> RangeInclusive<u32> {
        match self {
            Difficulty::Easy => 1..=5,
            Difficulty::Medium => 1..=10,
            Difficulty::Hard => 1..=15,
        }
    }

    /// Button label for this tier
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (1-5)",
            Difficulty::Medium => "Medium (1-10)",
            Difficulty::Hard => "Hard (1-15)",
        }
    }

    /// Identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a tier name; anything unrecognized is the easy tier
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    /// Get all tiers in order
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Difficulty::parse_lenient(&name)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single addition problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionProblem {
    /// Left operand
    pub left: u32,
    /// Right operand
    pub right: u32,
    /// Precomputed sum
    pub answer: u32,
}

impl AdditionProblem {
    /// Create a problem, computing its sum
    pub fn new(left: u32, right: u32) -> Self {
        Self {
            left,
            right,
            answer: left + right,
        }
    }
}

impl Expected for AdditionProblem {
    type Value = u32;

    fn expected(&self) -> &u32 {
        &self.answer
    }
}

/// Generate `count` addition problems for a tier
pub fn generate_addition(difficulty: Difficulty, count: usize) -> Vec<AdditionProblem> {
    generate_addition_with(difficulty, count, &mut rand::thread_rng())
}

/// Generate addition problems with a caller-supplied randomness source
pub fn generate_addition_with<R: Rng + ?Sized>(
    difficulty: Difficulty,
    count: usize,
    rng: &mut R,
) -> Vec<AdditionProblem> {
    let range = difficulty.operand_range();
    (0..count)
        .map(|_| {
            let left = rng.gen_range(range.clone());
            let right = rng.gen_range(range.clone());
            AdditionProblem::new(left, right)
        })
        .collect()
}

/// Problem source for the addition screen
#[derive(Debug, Clone)]
pub struct AdditionSource {
    /// Current tier
    pub difficulty: Difficulty,
    /// Problems per round
    pub count: usize,
}

impl AdditionSource {
    /// Create a source for a tier
    pub fn new(difficulty: Difficulty, count: usize) -> Self {
        Self { difficulty, count }
    }
}

impl ProblemSource for AdditionSource {
    type Problem = AdditionProblem;

    fn generate(&mut self) -> Vec<AdditionProblem> {
        generate_addition(self.difficulty, self.count)
    }

    fn presentation_tone(&self, index: usize) -> Option<Tone> {
        Some(Tone::new(300.0 + index as f32 * 50.0, 300))
    }
}

// =============================================================================
// Counting
// =============================================================================

/// Objects shown in the counting pool
pub const COUNTING_OBJECTS: [&str; 10] = [
    "\u{1F436}", // dog
    "\u{1F431}", // cat
    "\u{1F430}", // rabbit
    "\u{1F438}", // frog
    "\u{1F435}", // monkey
    "\u{1F43C}", // panda
    "\u{1F428}", // koala
    "\u{1F98A}", // fox
    "\u{1F42F}", // tiger
    "\u{1F981}", // lion
];

/// One counting round: select exactly `target` distinct objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingRound {
    /// How many objects to select
    pub target: u32,
    /// Number of selectable objects
    pub pool_size: usize,
}

impl Expected for CountingRound {
    type Value = u32;

    fn expected(&self) -> &u32 {
        &self.target
    }
}

/// Generate counting rounds with targets 1 through `max`
pub fn counting_rounds(max: u32, pool_size: usize) -> Vec<CountingRound> {
    (1..=max)
        .map(|target| CountingRound { target, pool_size })
        .collect()
}

/// Problem source for the counting screen
#[derive(Debug, Clone)]
pub struct CountingSource {
    /// Highest target
    pub max: u32,
    /// Objects in the pool
    pub pool_size: usize,
}

impl Default for CountingSource {
    fn default() -> Self {
        Self {
            max: 10,
            pool_size: COUNTING_OBJECTS.len(),
        }
    }
}

impl ProblemSource for CountingSource {
    type Problem = CountingRound;

    fn generate(&mut self) -> Vec<CountingRound> {
        counting_rounds(self.max, self.pool_size)
    }

    // Only the first five numbers are announced.
    fn presentation_tone(&self, index: usize) -> Option<Tone> {
        let target = index as f32 + 1.0;
        (target <= 5.0).then(|| Tone::new(200.0 + target * 100.0, 300))
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// Shapes taught on the shapes screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Circle
    Circle,
    /// Square
    Square,
    /// Triangle
    Triangle,
    /// Rectangle
    Rectangle,
    /// Diamond
    Diamond,
    /// Star
    Star,
}

impl Shape {
    /// Every shape in teaching order
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Rectangle,
        Shape::Diamond,
        Shape::Star,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "Circle",
            Shape::Square => "Square",
            Shape::Triangle => "Triangle",
            Shape::Rectangle => "Rectangle",
            Shape::Diamond => "Diamond",
            Shape::Star => "Star",
        }
    }

    /// Glyph shown to the child
    pub fn glyph(&self) -> &'static str {
        match self {
            Shape::Circle => "\u{1F534}",
            Shape::Square => "\u{1F7E6}",
            Shape::Triangle => "\u{1F53A}",
            Shape::Rectangle => "\u{1F7E8}",
            Shape::Diamond => "\u{1F7E3}",
            Shape::Star => "\u{1F7E0}",
        }
    }

    /// Display color
    pub fn color(&self) -> &'static str {
        match self {
            Shape::Circle => "#FF6B6B",
            Shape::Square => "#4ECDC4",
            Shape::Triangle => "#FFE66D",
            Shape::Rectangle => "#2ECC71",
            Shape::Diamond => "#9B59B6",
            Shape::Star => "#F39C12",
        }
    }

    /// Look up a shape by its canonical name
    ///
    /// Matching is exact; names differing in case do not match.
    pub fn from_name(name: &str) -> Option<Shape> {
        Shape::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One shapes question: name the shown shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeQuestion {
    /// The shape on display
    pub shape: Shape,
}

impl Expected for ShapeQuestion {
    type Value = Shape;

    fn expected(&self) -> &Shape {
        &self.shape
    }
}

/// Problem source for the shapes screen; always the full catalog in order
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeSource;

impl ProblemSource for ShapeSource {
    type Problem = ShapeQuestion;

    fn generate(&mut self) -> Vec<ShapeQuestion> {
        Shape::ALL.into_iter().map(|shape| ShapeQuestion { shape }).collect()
    }

    fn presentation_tone(&self, index: usize) -> Option<Tone> {
        Some(Tone::new(300.0 + index as f32 * 100.0, 300))
    }
}
