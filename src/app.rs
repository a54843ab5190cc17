//! Application shell
//!
//! [`KidMathApp`] mounts the navigation bar plus exactly one screen. It
//! owns the single process-wide [`ProgressStore`]; every assessment screen
//! it mounts works on a clone of that store, so results survive
//! navigation for the lifetime of the process.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use app_core::assessments::{seed_progress, QuizCatalog};
use app_core::{
    AdditionGame, AssessmentEngine, ConfigError, CountingGame, LearningConfig, ShapesGame,
    SilentTonePlayer, SoundBoard, TonePlayer, VideoLibrary,
};
use app_state::{FeedbackScheduler, ProgressStore};
use app_ui::{ActivityCard, NavItem, Navigation, Route, Theme, ACTIVITY_CARDS};
use drawing::{DrawingError, DrawingSurface};
use thiserror::Error;

/// Errors that can occur while mounting screens
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Drawing surface could not be created
    #[error("Drawing error: {0}")]
    Drawing(#[from] DrawingError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// The mounted screen
pub enum Screen {
    /// Landing page
    Home,
    /// Counting game with its feedback timer
    Counting(FeedbackScheduler<CountingGame>),
    /// Shapes game with its feedback timer
    Shapes(FeedbackScheduler<ShapesGame>),
    /// Addition game with its feedback timer
    Addition(FeedbackScheduler<AdditionGame>),
    /// Video library
    Videos(VideoLibrary),
    /// Drawing canvas
    Drawing(DrawingSurface),
    /// Assessments over the shared progress store
    Assessments(AssessmentEngine),
}

impl Screen {
    /// Route this screen is mounted for
    pub fn route(&self) -> Route {
        match self {
            Screen::Home => Route::Home,
            Screen::Counting(_) => Route::Counting,
            Screen::Shapes(_) => Route::Shapes,
            Screen::Addition(_) => Route::Addition,
            Screen::Videos(_) => Route::Videos,
            Screen::Drawing(_) => Route::Drawing,
            Screen::Assessments(_) => Route::Assessments,
        }
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Screen").field(&self.route()).finish()
    }
}

/// The Kid Math application
pub struct KidMathApp {
    config: LearningConfig,
    tone_player: Arc<dyn TonePlayer>,
    theme: Theme,
    progress: ProgressStore,
    navigation: Navigation,
    screen: Screen,
}

impl KidMathApp {
    /// Start on the home screen with seeded progress
    pub fn new(config: LearningConfig, tone_player: Arc<dyn TonePlayer>) -> Result<Self> {
        config.validate()?;
        tracing::info!("Starting Kid Math");
        Ok(Self {
            config,
            tone_player,
            theme: Theme::kid(),
            progress: ProgressStore::seeded(seed_progress()),
            navigation: Navigation::new(),
            screen: Screen::Home,
        })
    }

    /// Start with default configuration and no audio output
    pub fn silent() -> Result<Self> {
        Self::new(LearningConfig::default(), Arc::new(SilentTonePlayer))
    }

    /// Navigate to a route, mounting a fresh screen for it
    ///
    /// The previous screen is dropped along with any pending feedback
    /// timer. Navigating to the active route keeps the current screen and
    /// returns false.
    pub fn navigate(&mut self, route: Route) -> Result<bool> {
        if route == self.navigation.current() {
            return Ok(false);
        }
        self.screen = self.mount(route)?;
        self.navigation.navigate(route);
        Ok(true)
    }

    /// Navigate by URL path; unknown paths change nothing
    pub fn navigate_path(&mut self, path: &str) -> Result<Option<Route>> {
        match Route::from_path(path) {
            Some(route) => {
                self.navigate(route)?;
                Ok(Some(route))
            }
            None => {
                tracing::debug!(path, "Ignored unknown path");
                Ok(None)
            }
        }
    }

    /// Return to the previous route with a fresh screen
    pub fn back(&mut self) -> Result<Option<Route>> {
        let mut navigation = self.navigation.clone();
        let Some(route) = navigation.back() else {
            return Ok(None);
        };
        self.screen = self.mount(route)?;
        self.navigation = navigation;
        Ok(Some(route))
    }

    fn mount(&self, route: Route) -> Result<Screen> {
        let sound = || {
            SoundBoard::new(Arc::clone(&self.tone_player)).with_muted(self.config.start_muted)
        };
        let screen = match route {
            Route::Home => Screen::Home,
            Route::Counting => {
                Screen::Counting(FeedbackScheduler::new(CountingGame::new(&self.config, sound())))
            }
            Route::Shapes => Screen::Shapes(FeedbackScheduler::new(ShapesGame::new(sound()))),
            Route::Addition => {
                Screen::Addition(FeedbackScheduler::new(AdditionGame::new(&self.config, sound())))
            }
            Route::Videos => Screen::Videos(VideoLibrary::default()),
            Route::Drawing => {
                let mut surface =
                    DrawingSurface::new(self.config.canvas_width, self.config.canvas_height)?;
                surface.set_color(&self.config.default_color)?;
                surface.set_brush_size(self.config.default_brush_size);
                Screen::Drawing(surface)
            }
            Route::Assessments => Screen::Assessments(AssessmentEngine::new(
                QuizCatalog::builtin(),
                self.progress.clone(),
            )),
        };
        tracing::debug!(route = route.to_path(), "Mounted screen");
        Ok(screen)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The active route
    pub fn route(&self) -> Route {
        self.navigation.current()
    }

    /// Navigation bar links with the active one highlighted
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.navigation.items()
    }

    /// Cards on the home screen
    pub fn home_cards(&self) -> &'static [ActivityCard] {
        &ACTIVITY_CARDS
    }

    /// The theme shared by every screen
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The configuration in use
    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// The process-wide progress store
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// The mounted screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The mounted screen, mutably
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// The counting game, if mounted
    pub fn counting(&self) -> Option<&FeedbackScheduler<CountingGame>> {
        match &self.screen {
            Screen::Counting(game) => Some(game),
            _ => None,
        }
    }

    /// The shapes game, if mounted
    pub fn shapes(&self) -> Option<&FeedbackScheduler<ShapesGame>> {
        match &self.screen {
            Screen::Shapes(game) => Some(game),
            _ => None,
        }
    }

    /// The addition game, if mounted
    pub fn addition(&self) -> Option<&FeedbackScheduler<AdditionGame>> {
        match &self.screen {
            Screen::Addition(game) => Some(game),
            _ => None,
        }
    }

    /// The video library, if mounted
    pub fn videos_mut(&mut self) -> Option<&mut VideoLibrary> {
        match &mut self.screen {
            Screen::Videos(library) => Some(library),
            _ => None,
        }
    }

    /// The drawing surface, if mounted
    pub fn drawing_mut(&mut self) -> Option<&mut DrawingSurface> {
        match &mut self.screen {
            Screen::Drawing(surface) => Some(surface),
            _ => None,
        }
    }

    /// Save the drawing as PNG into `dir` under the configured file name
    ///
    /// Returns `None` when the drawing screen is not mounted.
    pub fn export_drawing(&self, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let Screen::Drawing(surface) = &self.screen else {
            return Ok(None);
        };
        let path = dir.as_ref().join(&self.config.export_filename);
        surface.save(&path)?;
        Ok(Some(path))
    }

    /// The assessment engine, if mounted
    pub fn assessments_mut(&mut self) -> Option<&mut AssessmentEngine> {
        match &mut self.screen {
            Screen::Assessments(engine) => Some(engine),
            _ => None,
        }
    }
}

impl fmt::Debug for KidMathApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KidMathApp")
            .field("route", &self.route())
            .field("screen", &self.screen)
            .field("completed", &self.progress.completed_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_home() {
        let app = KidMathApp::silent().unwrap();
        assert_eq!(app.route(), Route::Home);
        assert!(matches!(app.screen(), Screen::Home));
        assert_eq!(app.progress().completed_count(), 2);
        assert_eq!(app.home_cards().len(), 6);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LearningConfig {
            addition_problem_count: 0,
            ..LearningConfig::default()
        };
        assert!(matches!(
            KidMathApp::new(config, Arc::new(SilentTonePlayer)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_navigate_mounts_matching_screen() {
        let mut app = KidMathApp::silent().unwrap();
        for route in Route::ALL.into_iter().rev() {
            app.navigate(route).unwrap();
            assert_eq!(app.screen().route(), route);
            let active: Vec<Route> = app
                .nav_items()
                .into_iter()
                .filter(|i| i.active)
                .map(|i| i.route)
                .collect();
            assert_eq!(active, vec![route]);
        }
    }

    #[test]
    fn test_navigate_same_route_keeps_screen() {
        let mut app = KidMathApp::silent().unwrap();
        app.navigate(Route::Drawing).unwrap();
        app.drawing_mut().unwrap().stamp_text("hi");
        assert!(!app.navigate(Route::Drawing).unwrap());
        assert!(app.drawing_mut().unwrap().painted_pixels() > 0);
    }

    #[test]
    fn test_drawing_uses_config() {
        let config = LearningConfig {
            canvas_width: 320,
            canvas_height: 240,
            default_brush_size: 9,
            default_color: "#FF0000".to_string(),
            ..LearningConfig::default()
        };
        let mut app = KidMathApp::new(config, Arc::new(SilentTonePlayer)).unwrap();
        app.navigate(Route::Drawing).unwrap();
        let surface = app.drawing_mut().unwrap();
        assert_eq!((surface.width(), surface.height()), (320, 240));
        assert_eq!(surface.brush_size(), 9);
        assert_eq!(surface.color_hex(), "#FF0000");
    }

    #[test]
    fn test_invalid_default_color() {
        let config = LearningConfig {
            default_color: "blue".to_string(),
            ..LearningConfig::default()
        };
        let mut app = KidMathApp::new(config, Arc::new(SilentTonePlayer)).unwrap();
        assert!(matches!(app.navigate(Route::Drawing), Err(AppError::Drawing(_))));
        assert_eq!(app.route(), Route::Home);
    }

    #[test]
    fn test_unknown_path() {
        let mut app = KidMathApp::silent().unwrap();
        assert_eq!(app.navigate_path("/secret").unwrap(), None);
        assert_eq!(app.route(), Route::Home);
        assert_eq!(app.navigate_path("/videos").unwrap(), Some(Route::Videos));
        assert!(app.videos_mut().is_some());
    }

    #[test]
    fn test_back_remounts_previous_screen() {
        let mut app = KidMathApp::silent().unwrap();
        app.navigate(Route::Assessments).unwrap();
        app.navigate(Route::Videos).unwrap();
        assert_eq!(app.back().unwrap(), Some(Route::Assessments));
        assert!(app.assessments_mut().is_some());
        assert_eq!(app.back().unwrap(), Some(Route::Home));
        assert_eq!(app.back().unwrap(), None);
    }
}
