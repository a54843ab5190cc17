//! Learning Flow Integration Tests
//!
//! End-to-end tests driving the activity screens through the application
//! shell, with the feedback timer running on a paused Tokio clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use kid_math::app_core::videos::{Channel, Concept, Facet};
use kid_math::app_core::{Difficulty, LearningConfig, Shape, Tone, TonePlayer};
use kid_math::app_state::FEEDBACK_DELAY;
use kid_math::app_ui::Route;
use kid_math::drawing::input::ClientPoint;
use kid_math::drawing::{CanvasOrigin, RawInput, Template};
use kid_math::{KidMathApp, Screen};
use tempfile::TempDir;

/// Tone player that records every tone it is asked to play
#[derive(Default)]
struct RecordingPlayer {
    tones: Mutex<Vec<Tone>>,
}

impl RecordingPlayer {
    fn frequencies(&self) -> Vec<f32> {
        self.tones.lock().unwrap().iter().map(|t| t.frequency_hz).collect()
    }
}

impl TonePlayer for RecordingPlayer {
    fn play_tone(&self, tone: Tone) {
        self.tones.lock().unwrap().push(tone);
    }
}

fn app_with_recorder() -> (KidMathApp, Arc<RecordingPlayer>) {
    let player = Arc::new(RecordingPlayer::default());
    let app = KidMathApp::new(LearningConfig::default(), player.clone()).unwrap();
    (app, player)
}

async fn wait_for_feedback() {
    tokio::time::sleep(FEEDBACK_DELAY + Duration::from_millis(10)).await;
}

/// Test counting rounds advance only after the feedback delay
#[tokio::test(start_paused = true)]
async fn test_counting_advances_after_feedback() {
    let (mut app, player) = app_with_recorder();
    app.navigate(Route::Counting).unwrap();

    let counting = app.counting().unwrap();
    assert_eq!(counting.read(|g| g.prompt()), Some("Click 1 objects to count them!".to_string()));

    // Target 1: one tap submits.
    assert!(counting.act(|g| g.select(0)));
    assert!(counting.has_pending());
    assert_eq!(counting.read(|g| g.session().feedback()), Some(true));

    // Taps during feedback are ignored.
    assert!(!counting.act(|g| g.select(1)));

    tokio::time::sleep(FEEDBACK_DELAY / 2).await;
    assert_eq!(counting.read(|g| g.target()), Some(1));

    wait_for_feedback().await;
    assert_eq!(counting.read(|g| g.target()), Some(2));
    assert!(counting.read(|g| g.selected().is_empty()));

    // Target 2: the first tap only counts, the second submits.
    assert!(!counting.act(|g| g.select(4)));
    assert!(counting.act(|g| g.select(7)));
    wait_for_feedback().await;
    assert_eq!(counting.read(|g| g.target()), Some(3));
    assert_eq!(counting.read(|g| g.session().score()), 2);

    // Announce 1, count 1, correct, announce 2, count 1, count 2, correct, announce 3.
    assert_eq!(
        player.frequencies(),
        vec![300.0, 490.0, 800.0, 400.0, 490.0, 540.0, 800.0, 500.0]
    );
}

/// Test the shapes game retries a missed shape
#[tokio::test(start_paused = true)]
async fn test_shapes_retry_after_miss() {
    let (mut app, _player) = app_with_recorder();
    app.navigate(Route::Shapes).unwrap();

    let shapes = app.shapes().unwrap();
    assert_eq!(shapes.read(|g| g.current_shape()), Some(Shape::Circle));

    assert!(shapes.act(|g| g.choose(Shape::Star)));
    assert!(shapes.read(|g| g.options_disabled()));
    assert!(!shapes.act(|g| g.choose(Shape::Circle)));

    wait_for_feedback().await;
    assert_eq!(shapes.read(|g| g.current_shape()), Some(Shape::Circle));
    assert!(!shapes.read(|g| g.options_disabled()));

    assert!(shapes.act(|g| g.choose_by_name("Circle")));
    wait_for_feedback().await;
    assert_eq!(shapes.read(|g| g.current_shape()), Some(Shape::Square));
    assert_eq!(shapes.read(|g| g.session().score()), 1);
}

/// Test a full addition round answered correctly
#[tokio::test(start_paused = true)]
async fn test_addition_full_round() {
    let config = LearningConfig {
        addition_problem_count: 3,
        start_muted: true,
        ..LearningConfig::default()
    };
    let player = Arc::new(RecordingPlayer::default());
    let mut app = KidMathApp::new(config, player.clone()).unwrap();
    app.navigate(Route::Addition).unwrap();

    let addition = app.addition().unwrap();
    assert_eq!(addition.read(|g| g.score_line()), "Score: 0/3");

    // Non-numeric input is ignored.
    addition.update(|g| g.set_input("five"));
    assert!(!addition.act(|g| g.submit()));

    for _ in 0..3 {
        let answer = addition.read(|g| g.current_problem().map(|p| p.answer)).unwrap();
        addition.update(|g| g.set_input(answer.to_string()));
        assert!(addition.act(|g| g.submit()));
        wait_for_feedback().await;
    }

    assert!(addition.read(|g| g.session().is_completed()));
    assert_eq!(addition.read(|g| g.score_line()), "Final Score: 3/3");
    assert!(!addition.has_pending());

    // Muted screens never reach the player.
    assert!(player.frequencies().is_empty());
}

/// Test changing difficulty cancels pending feedback and starts over
#[tokio::test(start_paused = true)]
async fn test_addition_difficulty_change_cancels_feedback() {
    let (mut app, _player) = app_with_recorder();
    app.navigate(Route::Addition).unwrap();

    let addition = app.addition().unwrap();
    addition.update(|g| g.set_input("999"));
    assert!(addition.act(|g| g.submit()));
    assert_eq!(addition.read(|g| g.session().feedback()), Some(false));

    addition.cancel_pending();
    addition.update(|g| g.change_difficulty(Difficulty::Hard));
    wait_for_feedback().await;

    assert_eq!(addition.read(|g| g.difficulty()), Difficulty::Hard);
    assert_eq!(addition.read(|g| g.session().current_index()), Some(0));
    assert_eq!(addition.read(|g| g.session().score()), 0);
    assert!(addition.read(|g| g.session().is_accepting_answers()));
}

/// Test leaving a screen mid-feedback drops its timer
#[tokio::test(start_paused = true)]
async fn test_navigate_away_during_feedback() {
    let (mut app, player) = app_with_recorder();
    app.navigate(Route::Counting).unwrap();
    assert!(app.counting().unwrap().act(|g| g.select(0)));
    let played = player.frequencies().len();

    app.navigate(Route::Home).unwrap();
    wait_for_feedback().await;
    assert!(matches!(app.screen(), Screen::Home));
    assert_eq!(player.frequencies().len(), played);

    // Coming back mounts a fresh game.
    app.navigate(Route::Counting).unwrap();
    let counting = app.counting().unwrap();
    assert_eq!(counting.read(|g| g.target()), Some(1));
    assert_eq!(counting.read(|g| g.session().score()), 0);
}

/// Test filtering and opening videos
#[test]
fn test_video_library_filters() {
    let mut app = KidMathApp::silent().unwrap();
    app.navigate(Route::Videos).unwrap();
    let library = app.videos_mut().unwrap();

    assert_eq!(library.visible().len(), 11);

    library.set_channel(Facet::Only(Channel::Numberblocks));
    assert_eq!(library.visible().len(), 3);

    library.set_concept(Facet::Only(Concept::Shapes));
    let visible = library.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Numberblocks - Shapes & Patterns");

    let opened = library.open(0).unwrap().title.clone();
    assert_eq!(library.selected().map(|v| v.title.clone()), Some(opened));
    assert!(library.open(1).is_none());
    assert!(library.close());
    assert!(!library.close());

    library.set_channel(Facet::All);
    library.set_concept(Facet::Only(Concept::Counting));
    assert_eq!(library.visible().len(), 5);
    assert!(library
        .concept_filters()
        .iter()
        .any(|tab| tab.id == "counting" && tab.active));
}

/// Test drawing with normalized input, a template, and export
#[test]
fn test_drawing_template_export() {
    let mut app = KidMathApp::silent().unwrap();
    assert_eq!(app.export_drawing(".").unwrap(), None);

    app.navigate(Route::Drawing).unwrap();
    let surface = app.drawing_mut().unwrap();

    let origin = CanvasOrigin::new(100.0, 50.0);
    for raw in [
        RawInput::MouseDown(ClientPoint::new(110.0, 60.0)),
        RawInput::MouseMove(ClientPoint::new(200.0, 60.0)),
        RawInput::MouseUp,
    ] {
        if let Some(event) = origin.normalize(&raw) {
            surface.handle(event);
        }
    }
    assert!(!surface.is_drawing());
    assert!(surface.pixel(50, 10).is_some_and(|p| p.0[3] == 255));

    surface.load_template(Template::Numbers);
    assert!(surface.pixel(50, 10).is_some_and(|p| p.0[3] == 0));
    assert!(surface.painted_pixels() > 0);

    let dir = TempDir::new().unwrap();
    let path = app.export_drawing(dir.path()).unwrap().unwrap();
    assert!(path.ends_with("kid-math-drawing.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

/// Test the navigation bar always highlights exactly the active route
#[test]
fn test_navigation_highlight_and_paths() {
    let mut app = KidMathApp::silent().unwrap();
    assert_eq!(app.navigate_path("/addition?x=1").unwrap(), Some(Route::Addition));

    let active: Vec<Route> = app
        .nav_items()
        .into_iter()
        .filter(|item| item.active)
        .map(|item| item.route)
        .collect();
    assert_eq!(active, vec![Route::Addition]);

    for card in app.home_cards() {
        assert_ne!(card.route, Route::Home);
        assert_eq!(card.icon(), card.route.icon());
    }
}
