//! Navigation system for Kid Math
//!
//! This module provides:
//! - Route definitions with path mapping
//! - The navigation bar items
//! - Navigation state with exactly one active route and back history

use serde::{Deserialize, Serialize};

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Landing page with activity cards
    #[default]
    Home,
    /// Counting game
    Counting,
    /// Shapes game
    Shapes,
    /// Addition game
    Addition,
    /// Video library
    Videos,
    /// Drawing canvas
    Drawing,
    /// Assessments and progress
    Assessments,
}

impl Route {
    /// Every route in navigation bar order
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Counting,
        Route::Shapes,
        Route::Addition,
        Route::Videos,
        Route::Drawing,
        Route::Assessments,
    ];

    /// Convert route to its URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Counting => "/counting",
            Route::Shapes => "/shapes",
            Route::Addition => "/addition",
            Route::Videos => "/videos",
            Route::Drawing => "/drawing",
            Route::Assessments => "/assessments",
        }
    }

    /// Match a URL path; query strings and trailing slashes are ignored
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|r| r.to_path() == path)
    }

    /// Navigation bar label
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Counting => "Count",
            Route::Shapes => "Shapes",
            Route::Addition => "Add",
            Route::Videos => "Videos",
            Route::Drawing => "Draw",
            Route::Assessments => "Tests",
        }
    }

    /// Icon name in the icon set
    pub fn icon(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Counting => "calculator",
            Route::Shapes => "shapes",
            Route::Addition => "plus",
            Route::Videos => "play",
            Route::Drawing => "palette",
            Route::Assessments => "clipboard-check",
        }
    }

    /// Screen heading
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Welcome to Math World!",
            Route::Counting => "Let's Count Together!",
            Route::Shapes => "Let's Learn Shapes!",
            Route::Addition => "Let's Add Numbers!",
            Route::Videos => "Math Learning Videos",
            Route::Drawing => "Drawing & Math Fun!",
            Route::Assessments => "Math Assessments",
        }
    }
}

// =============================================================================
// Navigation Bar
// =============================================================================

/// One link in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Target route
    pub route: Route,
    /// Link label
    pub label: &'static str,
    /// Icon name
    pub icon: &'static str,
    /// Whether this link is highlighted
    pub active: bool,
}

/// Navigation state: the active route plus back history
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    current: Route,
    history: Vec<Route>,
}

impl Navigation {
    /// Start on the home route
    pub fn new() -> Self {
        Self::default()
    }

    /// The active route
    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigate to a route
    ///
    /// Returns false when the route is already active.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        tracing::debug!(from = self.current.to_path(), to = route.to_path(), "Navigate");
        self.history.push(self.current);
        self.current = route;
        true
    }

    /// Navigate to a URL path; unknown paths leave the state untouched
    pub fn navigate_path(&mut self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.navigate(route);
        Some(route)
    }

    /// Return to the previous route
    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }

    /// Whether back navigation is possible
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Navigation bar links, with exactly one active
    pub fn items(&self) -> Vec<NavItem> {
        Route::ALL
            .into_iter()
            .map(|route| NavItem {
                route,
                label: route.label(),
                icon: route.icon(),
                active: route == self.current,
            })
            .collect()
    }
}
