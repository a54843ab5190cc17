//! Home screen content

use crate::navigation::Route;

/// Page heading
pub const WELCOME_TITLE: &str = "\u{1F389} Welcome to Math World! \u{1F389}";

/// Line under the heading
pub const WELCOME_SUBTITLE: &str = "Let's learn numbers, shapes, and counting together!";

/// A card linking to one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCard {
    /// Destination
    pub route: Route,
    /// Card title
    pub title: &'static str,
    /// One-line pitch
    pub description: &'static str,
    /// Icon background color
    pub color: &'static str,
}

impl ActivityCard {
    /// Icon name, shared with the navigation bar
    pub fn icon(&self) -> &'static str {
        self.route.icon()
    }
}

/// Cards for the six activities, in display order
pub const ACTIVITY_CARDS: [ActivityCard; 6] = [
    ActivityCard {
        route: Route::Counting,
        title: "Counting Fun",
        description: "Learn to count with fun animals and objects!",
        color: "#FF6B6B",
    },
    ActivityCard {
        route: Route::Shapes,
        title: "Shape Explorer",
        description: "Discover circles, squares, triangles and more!",
        color: "#4ECDC4",
    },
    ActivityCard {
        route: Route::Addition,
        title: "Adding Together",
        description: "Join numbers and see them grow!",
        color: "#FFE66D",
    },
    ActivityCard {
        route: Route::Videos,
        title: "Math Videos",
        description: "Watch fun videos about numbers and shapes!",
        color: "#2ECC71",
    },
    ActivityCard {
        route: Route::Drawing,
        title: "Drawing Time",
        description: "Draw and trace numbers and shapes!",
        color: "#9B59B6",
    },
    ActivityCard {
        route: Route::Assessments,
        title: "Take Tests",
        description: "Test your knowledge and earn achievements!",
        color: "#E74C3C",
    },
];
