//! Background animations
//!
//! A continuous animation runs on its own thread and owns nothing but a
//! handle to the channel state and a cancel token. It takes the channel lock
//! only while composing and showing a frame, and sleeps in short slices so a
//! cancel request is seen within one poll interval. On cancellation the
//! thread clears the strip before it exits; [`AnimationTask::stop`] joins it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use embassy_time::{Duration, Instant};
use log::{debug, error};

use super::{ChannelState, lock};
use crate::clock::sleep;
use crate::color::{BLACK, GREEN, RED};
use crate::config::{AnimationTimings, BallPhysics};
use crate::effect::{
    BouncingBallsEffect, ColorSource, Direction, Effect, EvenOddEffect, Parity, SeasonalVariant,
    Sweep,
};
use crate::{Error, PixelDriver};

/// Cooperative stop signal shared with an animation thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sleep for `duration` in slices of at most `poll`
    ///
    /// Returns `false` as soon as cancellation is seen.
    pub fn sleep(&self, duration: Duration, poll: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            sleep((deadline - now).min(poll));
        }
    }
}

/// What a background task is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Seasonal(SeasonalVariant),
    Party,
}

impl Animation {
    const fn name(self) -> &'static str {
        match self {
            Self::Seasonal(SeasonalVariant::AlternatingRedGreen) => "alternating",
            Self::Seasonal(SeasonalVariant::Sweep) => "sweep",
            Self::Seasonal(SeasonalVariant::BouncingBalls) => "seasonal-balls",
            Self::Party => "party",
        }
    }
}

/// Settings an animation thread is started with
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnimationSettings {
    pub(crate) timings: AnimationTimings,
    pub(crate) balls: BallPhysics,
}

/// Handle to a running animation thread
#[derive(Debug)]
pub(crate) struct AnimationTask {
    animation: Animation,
    token: CancelToken,
    handle: JoinHandle<Result<(), Error>>,
}

impl AnimationTask {
    pub(crate) fn spawn<D>(
        channel_id: usize,
        state: Arc<Mutex<ChannelState<D>>>,
        animation: Animation,
        settings: AnimationSettings,
    ) -> Result<Self, Error>
    where
        D: PixelDriver + Send + 'static,
    {
        let token = CancelToken::new();
        let thread_token = token.clone();
        let handle = thread::Builder::new()
            .name(format!("channel-{}-{}", channel_id, animation.name()))
            .spawn(move || {
                let result = run(&state, &thread_token, animation, settings);
                if let Err(e) = &result {
                    error!("channel {}: {} animation failed: {}", channel_id, animation.name(), e);
                }
                result
            })
            .map_err(|e| Error::Spawn(e.to_string()))?;

        debug!("channel {}: started {} animation", channel_id, animation.name());
        Ok(Self {
            animation,
            token,
            handle,
        })
    }

    pub(crate) const fn animation(&self) -> Animation {
        self.animation
    }

    /// Whether the thread has already returned (normally only after an error)
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Request cancellation and wait for the thread to clear the strip and exit
    pub(crate) fn stop(self) -> Result<(), Error> {
        self.token.cancel();
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::AnimationPanicked),
        }
    }
}

fn run<D: PixelDriver>(
    state: &Mutex<ChannelState<D>>,
    token: &CancelToken,
    animation: Animation,
    settings: AnimationSettings,
) -> Result<(), Error> {
    let timings = settings.timings;
    match animation {
        Animation::Seasonal(SeasonalVariant::AlternatingRedGreen) => {
            alternate_red_green(state, token, timings)?;
        }
        Animation::Seasonal(SeasonalVariant::Sweep) => sweep_colors(state, token, timings)?,
        Animation::Seasonal(SeasonalVariant::BouncingBalls) | Animation::Party => {
            bounce(state, token, timings, settings.balls)?;
        }
    }
    lock(state).go_dark()
}

/// Even pixels red and odd green, then swapped, until cancelled
fn alternate_red_green<D: PixelDriver>(
    state: &Mutex<ChannelState<D>>,
    token: &CancelToken,
    timings: AnimationTimings,
) -> Result<(), Error> {
    let mut swapped = false;
    while !token.is_cancelled() {
        let (even, odd) = if swapped { (GREEN, RED) } else { (RED, GREEN) };
        {
            let mut state = lock(state);
            let now = Instant::now();
            let frame = state.strip.frame_mut();
            EvenOddEffect::new(even, Parity::Even).render(now, frame);
            EvenOddEffect::new(odd, Parity::Odd).render(now, frame);
            if !state.strip.show_unless_cancelled(token)? {
                break;
            }
        }
        swapped = !swapped;
        if !token.sleep(timings.seasonal_frame, timings.cancel_poll) {
            break;
        }
    }
    Ok(())
}

/// Sweep a random color on, sweep it off again, reverse, repeat
fn sweep_colors<D: PixelDriver>(
    state: &Mutex<ChannelState<D>>,
    token: &CancelToken,
    timings: AnimationTimings,
) -> Result<(), Error> {
    let mut colors = ColorSource::random(Instant::now());
    let mut direction = Direction::Forward;
    let len = lock(state).strip.len();
    loop {
        for color in [colors.next_color(), BLACK] {
            for index in Sweep::new(len, direction) {
                if token.is_cancelled() {
                    return Ok(());
                }
                {
                    let mut state = lock(state);
                    if let Some(led) = state.strip.frame_mut().get_mut(index) {
                        *led = color;
                    }
                    if !state.strip.show_unless_cancelled(token)? {
                        return Ok(());
                    }
                }
                if !token.sleep(timings.sweep_step, timings.cancel_poll) {
                    return Ok(());
                }
            }
        }
        direction = direction.reversed();
    }
}

/// Bouncing-ball simulation until cancelled
fn bounce<D: PixelDriver>(
    state: &Mutex<ChannelState<D>>,
    token: &CancelToken,
    timings: AnimationTimings,
    physics: BallPhysics,
) -> Result<(), Error> {
    let mut balls = BouncingBallsEffect::new(physics, Instant::now());
    while !token.is_cancelled() {
        {
            let mut state = lock(state);
            balls.render(Instant::now(), state.strip.frame_mut());
            if !state.strip.show_unless_cancelled(token)? {
                break;
            }
        }
        if !token.sleep(timings.party_frame, timings.cancel_poll) {
            break;
        }
    }
    Ok(())
}
