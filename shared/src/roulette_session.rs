//! One roulette invocation: existing-reward check, option loading, animated
//! spins and the claim that follows each spin.
//!
//! The session is single-threaded. Every operation takes `&self` so that the
//! UI can hold it behind an `Rc`; the double-spin guard is an ordinary flag
//! checked synchronously when `spin` is entered.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::{CLAIM_FAILED_ERROR, NO_OPTIONS_ERROR, OPTIONS_LOAD_ERROR};
use crate::shared_roulette::*;

/// Backend operations the roulette depends on. Transport failures are
/// reported as `Err(message)`.
#[allow(async_fn_in_trait)]
pub trait RewardService {
    /// `Ok(None)` when the caller holds no reward for the mission set.
    async fn my_reward(&self, mission_set_id: &str) -> Result<Option<MyReward>, String>;

    async fn options(&self, mission_set_id: &str) -> Result<Vec<RewardOption>, String>;

    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResponse, String>;
}

/// Source of animation frames.
#[allow(async_fn_in_trait)]
pub trait FrameClock {
    /// Resolves on the next frame with a monotonic timestamp in milliseconds.
    async fn next_frame(&mut self) -> f64;
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    Completed,
    Cancelled,
}

/// Drives `on_frame` with eased progress until `duration_ms` has elapsed.
///
/// The first frame only fixes the start time and reports progress 0; the last
/// call always receives `easing(1.0)`. Returning `ControlFlow::Break` from the
/// callback stops the animation.
pub async fn animate<C, E, F>(clock: &mut C, duration_ms: f64, easing: E, mut on_frame: F) -> AnimationEnd
where
    C: FrameClock,
    E: Fn(f64) -> f64,
    F: FnMut(f64) -> ControlFlow<()>,
{
    let start = clock.next_frame().await;
    if on_frame(easing(0.0)).is_break() {
        return AnimationEnd::Cancelled;
    }
    loop {
        let now = clock.next_frame().await;
        let progress = if duration_ms > 0.0 {
            ((now - start) / duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if on_frame(easing(progress)).is_break() {
            return AnimationEnd::Cancelled;
        }
        if progress >= 1.0 {
            return AnimationEnd::Completed;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoulettePhase {
    Idle,
    Checking,
    AlreadyClaimed,
    OptionsLoaded,
    Spinning,
    Claiming,
    Claimed,
    Closed,
}

impl RoulettePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoulettePhase::AlreadyClaimed | RoulettePhase::Claimed | RoulettePhase::Closed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouletteError {
    NoOptions,
    OptionsUnavailable(String),
    Closed,
}

impl fmt::Display for RouletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouletteError::NoOptions => write!(f, "{}", NO_OPTIONS_ERROR),
            RouletteError::OptionsUnavailable(reason) => write!(f, "{}: {}", OPTIONS_LOAD_ERROR, reason),
            RouletteError::Closed => write!(f, "Roulette was closed"),
        }
    }
}

impl std::error::Error for RouletteError {}

/// Tears a session down from outside of it, e.g. when the modal unmounts.
#[derive(Debug, Clone, Default)]
pub struct SessionCloser {
    closed: Rc<Cell<bool>>,
}

impl SessionCloser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        if !self.closed.replace(true) {
            log::debug!("Roulette session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

pub enum OpenOutcome<S> {
    AlreadyClaimed { option_name: String },
    Ready(RouletteSession<S>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinEvent {
    Frame { angle: f64 },
    Landed { winner_index: usize, resting_angle: f64 },
}

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    // Not accepted: already spinning or claiming, already claimed, or closed.
    Ignored,
    // Session closed mid-spin; nothing further happened.
    Cancelled,
    Claimed { winner_index: usize, result: ClaimResult },
    ClaimFailed { winner_index: usize, result: ClaimResult },
}

impl SpinOutcome {
    pub fn claim_result(&self) -> Option<&ClaimResult> {
        match self {
            SpinOutcome::Claimed { result, .. } | SpinOutcome::ClaimFailed { result, .. } => Some(result),
            SpinOutcome::Ignored | SpinOutcome::Cancelled => None,
        }
    }
}

pub struct RouletteSession<S> {
    mission_set_id: String,
    service: S,
    options: Vec<RewardOption>,
    state: Cell<SpinState>,
    phase: Cell<RoulettePhase>,
    rng: RefCell<SmallRng>,
    closer: SessionCloser,
}

impl<S: RewardService> RouletteSession<S> {
    /// Checks for an existing reward, then loads the options.
    ///
    /// A failed existing-reward lookup is treated as "no reward"; the claim
    /// endpoint stays the authority on duplicates.
    pub async fn open(
        mission_set_id: impl Into<String>,
        service: S,
        closer: SessionCloser,
    ) -> Result<OpenOutcome<S>, RouletteError> {
        let mission_set_id = mission_set_id.into();
        log::debug!("Opening roulette for mission set {}", mission_set_id);

        let existing = service.my_reward(&mission_set_id).await;
        if closer.is_closed() {
            return Err(RouletteError::Closed);
        }
        match existing {
            Ok(Some(reward)) => {
                log::info!(
                    "Mission set {} already rewarded with {} ({})",
                    mission_set_id, reward.option_name, reward.status
                );
                return Ok(OpenOutcome::AlreadyClaimed { option_name: reward.option_name });
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Existing reward check failed for mission set {}: {}", mission_set_id, e);
            }
        }

        let options = service
            .options(&mission_set_id)
            .await
            .map_err(RouletteError::OptionsUnavailable);
        if closer.is_closed() {
            return Err(RouletteError::Closed);
        }
        let options = options?;
        if options.is_empty() {
            log::warn!("Mission set {} has no reward options", mission_set_id);
            return Err(RouletteError::NoOptions);
        }
        if has_non_uniform_weights(&options) {
            log::warn!(
                "Mission set {} declares option weights; the wheel selects uniformly",
                mission_set_id
            );
        }

        log::debug!("Loaded {} options for mission set {}", options.len(), mission_set_id);
        Ok(OpenOutcome::Ready(RouletteSession {
            mission_set_id,
            service,
            options,
            state: Cell::new(SpinState::default()),
            phase: Cell::new(RoulettePhase::OptionsLoaded),
            rng: RefCell::new(SmallRng::from_entropy()),
            closer,
        }))
    }

    /// Replaces the entropy-seeded generator, e.g. for reproducible spins.
    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        *self.rng.get_mut() = rng;
        self
    }

    pub fn mission_set_id(&self) -> &str {
        &self.mission_set_id
    }

    pub fn options(&self) -> &[RewardOption] {
        &self.options
    }

    pub fn spin_state(&self) -> SpinState {
        self.state.get()
    }

    pub fn phase(&self) -> RoulettePhase {
        if self.closer.is_closed() {
            RoulettePhase::Closed
        } else {
            self.phase.get()
        }
    }

    pub fn closer(&self) -> SessionCloser {
        self.closer.clone()
    }

    pub fn can_spin(&self) -> bool {
        self.phase() == RoulettePhase::OptionsLoaded && !self.state.get().spinning
    }

    fn set_phase(&self, phase: RoulettePhase) {
        log::debug!("Roulette {}: {:?} -> {:?}", self.mission_set_id, self.phase.get(), phase);
        self.phase.set(phase);
    }

    /// Runs one animated spin and claims the option under the pointer.
    pub async fn spin<C, F>(&self, clock: &mut C, mut on_event: F) -> SpinOutcome
    where
        C: FrameClock,
        F: FnMut(SpinEvent),
    {
        if !self.can_spin() {
            log::debug!("Spin ignored in phase {:?}", self.phase());
            return SpinOutcome::Ignored;
        }

        let start = self.state.get().current_angle_degrees;
        let fraction: f64 = self.rng.borrow_mut().gen();
        let plan = SpinPlan::new(start, fraction);
        self.state.set(SpinState { current_angle_degrees: start, spinning: true });
        self.set_phase(RoulettePhase::Spinning);

        let closer = self.closer.clone();
        // Linear progress in; the plan applies the ease-out itself
        let end = animate(clock, SPIN_DURATION_MS, |t| t, |t| {
            if closer.is_closed() {
                return ControlFlow::Break(());
            }
            on_event(SpinEvent::Frame { angle: plan.display_angle(t) });
            ControlFlow::Continue(())
        })
        .await;
        if end == AnimationEnd::Cancelled || self.closer.is_closed() {
            return SpinOutcome::Cancelled;
        }

        let resting_angle = plan.resting_angle();
        self.state.set(SpinState { current_angle_degrees: resting_angle, spinning: false });
        // Non-empty by construction in `open`
        let winner_index = winner_index(resting_angle, self.options.len()).unwrap_or(0);
        let winner = self.options[winner_index].clone();
        self.set_phase(RoulettePhase::Claiming);
        on_event(SpinEvent::Landed { winner_index, resting_angle });

        let request = ClaimRequest {
            mission_set_id: self.mission_set_id.clone(),
            option_id: winner.id.clone(),
        };
        let response = self.service.claim(&request).await;
        if self.closer.is_closed() {
            log::debug!("Discarding claim response for closed roulette {}", self.mission_set_id);
            return SpinOutcome::Cancelled;
        }

        match response {
            Ok(ClaimResponse { ok: true, option_name, .. }) => {
                let option_name = option_name.unwrap_or_else(|| winner.name.clone());
                log::info!("Claimed {} ({}) for mission set {}", option_name, winner.id, self.mission_set_id);
                self.set_phase(RoulettePhase::Claimed);
                SpinOutcome::Claimed {
                    winner_index,
                    result: ClaimResult::Claimed { option_id: winner.id, option_name },
                }
            }
            Ok(ClaimResponse { error, .. }) => {
                let error = error.unwrap_or_else(|| CLAIM_FAILED_ERROR.to_string());
                log::info!("Claim rejected for mission set {}: {}", self.mission_set_id, error);
                self.set_phase(RoulettePhase::OptionsLoaded);
                SpinOutcome::ClaimFailed { winner_index, result: ClaimResult::Failed { error } }
            }
            Err(error) => {
                log::warn!("Claim request failed for mission set {}: {}", self.mission_set_id, error);
                self.set_phase(RoulettePhase::OptionsLoaded);
                SpinOutcome::ClaimFailed { winner_index, result: ClaimResult::Failed { error } }
            }
        }
    }
}
