//! Pull-to-refresh gesture state machine.
//!
//! Translates an abstract stream of touch samples on a scrollable list
//! container into a refresh action, without fighting the platform's native
//! overscroll behavior. The controller never touches an input-event API:
//! the host feeds it [`TouchSample`]s and exposes the container through the
//! [`ScrollRegion`] capability, so the same machine drives any surface that
//! can report a scroll offset.

use std::future::Future;
use std::sync::Arc;

/// Product constants for the pull gesture. Call sites may tune them, but
/// the defaults are the shipped feel: a resistive 0.5 damping, a 60 px
/// trigger, and a 100 px visual cap. Damping applies before the cap.
#[derive(Debug, Clone, Copy)]
pub struct PullConfig {
    pub damping: f32,
    pub threshold: f32,
    pub max_pull: f32,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            damping: 0.5,
            threshold: 60.0,
            max_pull: 100.0,
        }
    }
}

/// One touch event sample in the container's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub timestamp_ms: u64,
    pub y: f32,
}

/// The scrollable ancestor a controller is attached to.
pub trait ScrollRegion {
    /// Current vertical scroll offset in px.
    fn scroll_top(&self) -> f32;

    /// Enable or disable the platform's native overscroll/bounce.
    fn set_overscroll(&self, enabled: bool);
}

/// Ephemeral gesture state, destroyed with the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub pulling: bool,
    pub pull_distance: f32,
    pub refreshing: bool,
}

/// How the host should treat the native scroll for a move sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResponse {
    /// The sample extended a pull; suppress the default scroll/bounce.
    SuppressScroll,
    /// Not a pull; let the platform scroll normally.
    PassThrough,
}

/// What releasing the touch decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Threshold reached: the caller must run its refresh action through
    /// [`PullToRefresh::run_refresh`].
    Refresh,
    /// Below threshold (or nothing armed): indicator settles back to zero.
    Settle,
}

/// A gesture only arms when the container sits within this many px of the
/// top; anywhere lower it is an ordinary scroll.
const TOP_EPSILON: f32 = 1.0;

/// Per-view pull-to-refresh controller.
///
/// Native overscroll on the region is suppressed for the controller's whole
/// lifetime and restored on drop, so every exit path (including an early
/// unmount mid-gesture) leaves the container as it was found. Dropping the
/// controller does not cancel a refresh action already started; the caller
/// owns cancellation of its own refresh logic.
pub struct PullToRefresh<R: ScrollRegion> {
    config: PullConfig,
    region: Arc<R>,
    state: GestureState,
    start_y: f32,
}

impl<R: ScrollRegion> PullToRefresh<R> {
    pub fn new(region: Arc<R>) -> Self {
        Self::with_config(region, PullConfig::default())
    }

    pub fn with_config(region: Arc<R>, config: PullConfig) -> Self {
        region.set_overscroll(false);
        Self {
            config,
            region,
            state: GestureState::default(),
            start_y: 0.0,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Arm the gesture if the container is at (or within 1 px of) the top.
    /// Ignored while a refresh is in flight.
    pub fn touch_start(&mut self, sample: TouchSample) {
        if self.state.refreshing || self.state.pulling {
            return;
        }
        if self.region.scroll_top() > TOP_EPSILON {
            return;
        }
        self.state.pulling = true;
        self.start_y = sample.y;
    }

    /// Feed a move sample. A downward drag extends the pull with damping
    /// applied before the cap; the first upward/non-positive delta disarms
    /// immediately and the sequence becomes a normal scroll.
    pub fn touch_move(&mut self, sample: TouchSample) -> MoveResponse {
        if !self.state.pulling {
            return MoveResponse::PassThrough;
        }

        let delta = sample.y - self.start_y;
        if delta > 0.0 {
            self.state.pull_distance = (delta * self.config.damping).min(self.config.max_pull);
            MoveResponse::SuppressScroll
        } else {
            self.state.pulling = false;
            self.state.pull_distance = 0.0;
            MoveResponse::PassThrough
        }
    }

    /// Release the touch. At or past the threshold the controller enters
    /// `refreshing` with the indicator clamped at the threshold height and
    /// the caller runs its action; otherwise everything settles to zero.
    pub fn touch_end(&mut self) -> Release {
        if !self.state.pulling {
            return Release::Settle;
        }
        self.state.pulling = false;

        if self.state.pull_distance >= self.config.threshold {
            self.state.refreshing = true;
            self.state.pull_distance = self.config.threshold;
            Release::Refresh
        } else {
            self.state.pull_distance = 0.0;
            Release::Settle
        }
    }

    /// Interrupted or malformed touch sequence: back to idle. An in-flight
    /// refresh is unaffected.
    pub fn touch_cancel(&mut self) {
        self.state.pulling = false;
        if !self.state.refreshing {
            self.state.pull_distance = 0.0;
        }
    }

    /// Run the caller-supplied refresh action, then reset `refreshing` and
    /// the pull distance whether it succeeded or failed. The action's own
    /// result is returned untouched; error surfacing (a toast, usually)
    /// belongs to the calling page.
    pub async fn run_refresh<F, Fut, E>(&mut self, action: F) -> Result<(), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        if !self.state.refreshing {
            return Ok(());
        }
        let result = action().await;
        self.state.refreshing = false;
        self.state.pull_distance = 0.0;
        result
    }
}

impl<R: ScrollRegion> Drop for PullToRefresh<R> {
    fn drop(&mut self) {
        self.region.set_overscroll(true);
    }
}
