//! Fixed-delay feedback timer
//!
//! Every activity shows feedback for [`FEEDBACK_DELAY`] before advancing.
//! The delay is a one-shot timer bound to a [`FeedbackTicket`]; a reset
//! both aborts the pending timer and bumps the game's generation, so a late
//! firing can never resurrect a discarded problem index.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long feedback stays on screen before the game advances
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

/// Identity of one feedback display
///
/// A ticket is only honored while its generation matches the issuing
/// game's current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackTicket {
    generation: u64,
}

impl FeedbackTicket {
    /// The generation this ticket was issued for
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Issues tickets and tracks which one is current
#[derive(Debug, Clone, Default)]
pub struct TicketIssuer {
    generation: u64,
}

impl TicketIssuer {
    /// Create a new issuer at generation zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, invalidating all earlier ones
    pub fn issue(&mut self) -> FeedbackTicket {
        self.generation = self.generation.wrapping_add(1);
        FeedbackTicket {
            generation: self.generation,
        }
    }

    /// Invalidate every outstanding ticket
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Check whether a ticket is the most recently issued one
    pub fn is_current(&self, ticket: FeedbackTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A game with a timed feedback phase
pub trait FeedbackCycle {
    /// Called once the feedback delay for `ticket` has elapsed
    ///
    /// Returns `true` if the game moved on, `false` if the ticket was stale
    /// or the game was not showing feedback.
    fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool;

    /// Start over with a fresh problem set
    ///
    /// Implementations must invalidate outstanding tickets. The first
    /// problem is announced again, even if it was already on display.
    fn reset(&mut self);
}

/// Drives a [`FeedbackCycle`] game with a cancellable feedback timer
///
/// All game access goes through this scheduler so that the timer task and
/// user input observe the same state.
///
/// # Example
///
/// ```rust,ignore
/// let scheduler = FeedbackScheduler::new(game);
///
/// // Submitting an answer returns a ticket; the scheduler arms the timer.
/// scheduler.act(|game| game.submit("5"));
///
/// // Reset cancels the pending timer before it fires.
/// scheduler.reset();
/// ```
pub struct FeedbackScheduler<G> {
    game: Arc<Mutex<G>>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<G> FeedbackScheduler<G>
where
    G: FeedbackCycle + Send + 'static,
{
    /// Create a scheduler using the standard feedback delay
    pub fn new(game: G) -> Self {
        Self::with_delay(game, FEEDBACK_DELAY)
    }

    /// Create a scheduler with a custom delay
    pub fn with_delay(game: G, delay: Duration) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// The feedback delay in use
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run a user action against the game
    ///
    /// If the action yields a ticket, the feedback timer is armed for it.
    /// Returns whether a timer was armed.
    ///
    /// # Panics
    ///
    /// Arming a timer spawns onto the current Tokio runtime, so this must
    /// be called from within one.
    pub fn act<F>(&self, action: F) -> bool
    where
        F: FnOnce(&mut G) -> Option<FeedbackTicket>,
    {
        let ticket = action(&mut self.game.lock());
        match ticket {
            Some(ticket) => {
                self.arm(ticket);
                true
            }
            None => false,
        }
    }

    /// Mutate the game without arming a timer
    pub fn update<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        f(&mut self.game.lock())
    }

    /// Read the game state
    pub fn read<R>(&self, f: impl FnOnce(&G) -> R) -> R {
        f(&self.game.lock())
    }

    /// Cancel any pending timer and restart the game
    pub fn reset(&self) {
        self.cancel_pending();
        self.game.lock().reset();
        tracing::debug!("Game reset");
    }

    /// Cancel the pending timer, if any
    pub fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// Whether a feedback timer is still outstanding
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    fn arm(&self, ticket: FeedbackTicket) {
        let game = Arc::clone(&self.game);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let advanced = game.lock().on_feedback_elapsed(ticket);
            if !advanced {
                tracing::debug!(
                    generation = ticket.generation(),
                    "Ignored stale feedback timer"
                );
            }
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }
}

impl<G> Drop for FeedbackScheduler<G> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ProbeGame {
        tickets: TicketIssuer,
        showing_feedback: bool,
        advanced: usize,
        resets: usize,
    }

    impl ProbeGame {
        fn answer(&mut self) -> Option<FeedbackTicket> {
            if self.showing_feedback {
                return None;
            }
            self.showing_feedback = true;
            Some(self.tickets.issue())
        }
    }

    impl FeedbackCycle for ProbeGame {
        fn on_feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
            if !self.showing_feedback || !self.tickets.is_current(ticket) {
                return false;
            }
            self.showing_feedback = false;
            self.advanced += 1;
            true
        }

        fn reset(&mut self) {
            self.tickets.invalidate();
            self.showing_feedback = false;
            self.resets += 1;
        }
    }

    #[test]
    fn test_ticket_issuer() {
        let mut issuer = TicketIssuer::new();
        let first = issuer.issue();
        assert!(issuer.is_current(first));

        let second = issuer.issue();
        assert!(!issuer.is_current(first));
        assert!(issuer.is_current(second));

        issuer.invalidate();
        assert!(!issuer.is_current(second));
    }

    #[test]
    fn test_feedback_delay_constant() {
        assert_eq!(FEEDBACK_DELAY, Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_advances_after_delay() {
        let scheduler = FeedbackScheduler::new(ProbeGame::default());
        assert!(scheduler.act(|g| g.answer()));

        tokio::time::sleep(FEEDBACK_DELAY - Duration::from_millis(10)).await;
        assert_eq!(scheduler.read(|g| g.advanced), 0);
        assert!(scheduler.read(|g| g.showing_feedback));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(scheduler.read(|g| g.advanced), 1);
        assert!(!scheduler.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_without_ticket_arms_nothing() {
        let scheduler = FeedbackScheduler::new(ProbeGame::default());
        assert!(scheduler.act(|g| g.answer()));
        assert!(!scheduler.act(|g| g.answer()));

        tokio::time::sleep(FEEDBACK_DELAY * 2).await;
        assert_eq!(scheduler.read(|g| g.advanced), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_suppresses_pending_timer() {
        let scheduler = FeedbackScheduler::new(ProbeGame::default());
        scheduler.act(|g| g.answer());
        scheduler.reset();

        tokio::time::sleep(FEEDBACK_DELAY * 2).await;
        assert_eq!(scheduler.read(|g| g.advanced), 0);
        assert_eq!(scheduler.read(|g| g.resets), 1);
    }

    #[test]
    fn test_stale_ticket_is_ignored_even_without_abort() {
        let mut game = ProbeGame::default();
        let ticket = game.answer().unwrap();
        game.reset();

        assert!(!game.on_feedback_elapsed(ticket));
        assert_eq!(game.advanced, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay() {
        let scheduler = FeedbackScheduler::with_delay(ProbeGame::default(), Duration::from_millis(100));
        assert_eq!(scheduler.delay(), Duration::from_millis(100));

        scheduler.act(|g| g.answer());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(scheduler.read(|g| g.advanced), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_does_not_arm_timer() {
        let scheduler = FeedbackScheduler::new(ProbeGame::default());
        let ticket = scheduler.update(|g| g.answer());
        assert!(ticket.is_some());
        assert!(!scheduler.has_pending());

        tokio::time::sleep(FEEDBACK_DELAY * 2).await;
        assert_eq!(scheduler.read(|g| g.advanced), 0);
    }
}
