//! One independently controlled LED strip
//!
//! A channel owns its strip, its colors, its on/off flag, its display mode
//! and at most one background animation. Two locks guard it:
//!
//! - the task slot, held for the whole of every public mutating operation so
//!   operations on one channel never interleave
//! - the state, held while reading or writing fields and while a frame is
//!   composed and shown
//!
//! The task slot is always taken before the state. Animation threads only
//! ever take the state, so joining one while holding the task slot is safe.

mod animation;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use animation::{Animation, CancelToken};
use animation::{AnimationSettings, AnimationTask};
use embassy_time::Instant;
use log::{debug, info};

use crate::clock::sleep;
use crate::color::{BLACK, PhaseBlend, Rgb, rgb_clamped};
use crate::config::{AnimationTimings, ChannelConfig};
use crate::effect::{DisplayMode, SpacedPatternEffect, SpotlightsEffect};
use crate::strip::Strip;
use crate::{Error, PixelDriver};

/// Lock a mutex, recovering the data if another thread panicked while holding it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fields shared with the animation thread
#[derive(Debug)]
pub(crate) struct ChannelState<D: PixelDriver> {
    pub(crate) strip: Strip<D>,
    pub(crate) target: Rgb,
    pub(crate) current: Rgb,
    pub(crate) on: bool,
    pub(crate) mode: DisplayMode,
}

impl<D: PixelDriver> ChannelState<D> {
    /// Phased blend from whatever the strip shows to `to`. Blocks for the
    /// full blend duration.
    ///
    /// Each pixel starts from its own shown color, so a lit pattern fades
    /// out in place. A uniform frame always holds `current`, which makes
    /// this the same ramp as blending from `current`.
    fn blend_to(&mut self, to: Rgb, timings: &AnimationTimings) -> Result<(), Error> {
        let mut blend = PhaseBlend::new(self.strip.frame(), to, timings.blend_steps);
        let interval = PhaseBlend::interval(timings.blend_duration, timings.blend_steps);
        while blend.next_frame(self.strip.frame_mut()) {
            self.strip.show()?;
            if blend.is_finished() {
                break;
            }
            sleep(interval);
        }
        self.current = to;
        Ok(())
    }

    pub(crate) fn go_dark(&mut self) -> Result<(), Error> {
        self.strip.fill(BLACK)?;
        self.current = BLACK;
        Ok(())
    }
}

/// Addressable strip with its color, on/off state, mode and animation
#[derive(Debug)]
pub struct Channel<D: PixelDriver> {
    id: usize,
    pixel_count: usize,
    config: ChannelConfig,
    timings: AnimationTimings,
    state: Arc<Mutex<ChannelState<D>>>,
    task: Mutex<Option<AnimationTask>>,
}

impl<D: PixelDriver + Send + 'static> Channel<D> {
    /// Create a dark, switched-off channel around `driver`
    pub fn new(id: usize, driver: D, config: ChannelConfig, timings: AnimationTimings) -> Self {
        let strip = Strip::new(driver);
        let pixel_count = strip.len();
        let mut mode = config.initial_mode;
        if mode == DisplayMode::SeasonalCycle && !config.allow_seasonal_display {
            mode = DisplayMode::Standard;
        }
        Self {
            id,
            pixel_count,
            config,
            timings,
            state: Arc::new(Mutex::new(ChannelState {
                strip,
                target: config.initial_color,
                current: BLACK,
                on: false,
                mode,
            })),
            task: Mutex::new(None),
        }
    }

    pub const fn id(&self) -> usize {
        self.id
    }

    pub const fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub const fn allows_seasonal_display(&self) -> bool {
        self.config.allow_seasonal_display
    }

    pub fn target_color(&self) -> Rgb {
        lock(&self.state).target
    }

    pub fn current_color(&self) -> Rgb {
        lock(&self.state).current
    }

    pub fn is_on(&self) -> bool {
        lock(&self.state).on
    }

    pub fn mode(&self) -> DisplayMode {
        lock(&self.state).mode
    }

    /// Animation currently running in the background, if any
    pub fn animation(&self) -> Option<Animation> {
        lock(&self.task)
            .as_ref()
            .filter(|task| !task.is_finished())
            .map(AnimationTask::animation)
    }

    pub fn is_animating(&self) -> bool {
        self.animation().is_some()
    }

    /// Copy of the last frame shown on the strip
    pub fn frame(&self) -> Vec<Rgb> {
        lock(&self.state).strip.frame().to_vec()
    }

    /// Set the color used in standard mode, clamping each component to 0-255
    ///
    /// A lit channel in standard mode blends to the new color right away.
    pub fn set_color(&self, red: i32, green: i32, blue: i32) -> Result<(), Error> {
        let task = lock(&self.task);
        let color = rgb_clamped(red, green, blue);
        let mut state = lock(&self.state);
        state.target = color;
        debug!("channel {}: target color {:?}", self.id, color);
        if state.on && state.mode == DisplayMode::Standard && task.is_none() {
            state.blend_to(color, &self.timings)?;
        }
        Ok(())
    }

    /// Change the mode used by the next `switch_on`
    pub fn set_mode(&self, mode: DisplayMode) -> Result<(), Error> {
        if mode == DisplayMode::SeasonalCycle && !self.config.allow_seasonal_display {
            return Err(Error::ModeNotAllowed(mode));
        }
        let mut state = lock(&self.state);
        if state.mode != mode {
            debug!("channel {}: mode {}", self.id, mode.as_str());
            state.mode = mode;
        }
        Ok(())
    }

    /// Light the channel in its current mode
    ///
    /// Does nothing when already on unless `force` is set. Seasonal mode only
    /// starts the background animation and returns immediately.
    pub fn switch_on(&self, force: bool) -> Result<(), Error> {
        let mut task = lock(&self.task);
        let mode = {
            let state = lock(&self.state);
            if state.on && !force {
                return Ok(());
            }
            state.mode
        };
        info!("channel {}: switching on ({})", self.id, mode.as_str());

        if let Some(finished) = task.take_if(|t| !mode.is_continuous() || t.is_finished()) {
            finished.stop()?;
        }

        match mode {
            DisplayMode::Standard => {
                let mut state = lock(&self.state);
                let target = state.target;
                state.blend_to(target, &self.timings)?;
            }
            DisplayMode::SpacedPattern => {
                let mut state = lock(&self.state);
                let target = state.target;
                let mut effect = SpacedPatternEffect::new(self.config.spacing, target);
                state.strip.render(&mut effect, Instant::now())?;
                state.current = target;
            }
            DisplayMode::ThreeSpots => {
                let mut state = lock(&self.state);
                let target = state.target;
                let mut effect =
                    SpotlightsEffect::new(self.config.spot_count, self.config.spot_size, target);
                state.strip.render(&mut effect, Instant::now())?;
                state.current = target;
            }
            DisplayMode::SeasonalCycle => {
                if task.is_none() {
                    *task = Some(self.spawn(Animation::Seasonal(self.config.seasonal_variant))?);
                }
            }
        }

        lock(&self.state).on = true;
        Ok(())
    }

    /// Darken the channel
    ///
    /// Does nothing when already off unless `force` is set. A running
    /// animation is cancelled and joined, so the strip is dark and no
    /// animation frame can follow once this returns.
    pub fn switch_off(&self, force: bool) -> Result<(), Error> {
        let mut task = lock(&self.task);
        if !force && !lock(&self.state).on {
            return Ok(());
        }
        info!("channel {}: switching off", self.id);

        let result = match task.take() {
            Some(running) => running.stop(),
            None => lock(&self.state).blend_to(BLACK, &self.timings),
        };
        lock(&self.state).on = false;
        result
    }

    /// Force the channel off and start the bouncing-ball animation
    ///
    /// Runs regardless of the configured mode until the next `switch_off`.
    pub fn switch_on_party_mode(&self) -> Result<(), Error> {
        self.switch_off(true)?;

        let mut task = lock(&self.task);
        if let Some(previous) = task.take() {
            previous.stop()?;
        }
        info!("channel {}: party mode", self.id);
        *task = Some(self.spawn(Animation::Party)?);
        lock(&self.state).on = true;
        Ok(())
    }

    fn spawn(&self, animation: Animation) -> Result<AnimationTask, Error> {
        AnimationTask::spawn(
            self.id,
            Arc::clone(&self.state),
            animation,
            AnimationSettings {
                timings: self.timings,
                balls: self.config.balls,
            },
        )
    }
}

impl<D: PixelDriver> Drop for Channel<D> {
    fn drop(&mut self) {
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if let Err(e) = task.stop() {
                log::warn!("channel {}: animation ended with error: {}", self.id, e);
            }
        }
    }
}
