//! Lighting controller - the object the owning process builds once
//!
//! Owns every channel, the scheduler and the command queue. The messaging
//! layer either calls [`LightController::dispatch`] directly or pushes into
//! the queue through [`LightController::command_sender`]; the control loop
//! drains the queue at the start of each tick.

use core::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;
use embassy_time::Instant;
use log::{error, info, warn};

use crate::channel::Channel;
use crate::clock::{Clock, sleep};
use crate::command::Command;
use crate::command_queue::{CommandQueue, CommandSender};
use crate::config::LightingConfig;
use crate::pacer::TickPacer;
use crate::scheduler::{Override, Scheduler, TickOutcome};
use crate::{Error, PixelDriver};

/// Number of commands that may wait for the next tick
pub const COMMAND_QUEUE_SIZE: usize = 16;

pub struct LightController<D: PixelDriver> {
    config: LightingConfig,
    channels: Vec<Channel<D>>,
    scheduler: Scheduler,
    commands: CommandQueue<COMMAND_QUEUE_SIZE>,
}

impl<D: PixelDriver + Send + 'static> LightController<D> {
    pub fn new(config: LightingConfig, channels: Vec<Channel<D>>) -> Self {
        Self {
            scheduler: Scheduler::new(&config.schedule),
            config,
            channels,
            commands: CommandQueue::new(),
        }
    }

    pub const fn config(&self) -> &LightingConfig {
        &self.config
    }

    pub fn channels(&self) -> &[Channel<D>] {
        &self.channels
    }

    pub fn channel(&self, id: usize) -> Result<&Channel<D>, Error> {
        self.channels.get(id).ok_or(Error::UnknownChannel(id))
    }

    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Handle for queueing commands from another thread
    pub const fn command_sender(&self) -> CommandSender<'_, COMMAND_QUEUE_SIZE> {
        self.commands.sender()
    }

    /// Apply a command immediately
    pub fn dispatch(&self, command: Command) -> Result<(), Error> {
        info!("controller: command {}", command.as_str());
        match command {
            Command::On => self.scheduler.set_override(Override::ForceOn),
            Command::Off => self.scheduler.set_override(Override::ForceOff),
            Command::Auto => self.scheduler.set_override(Override::Auto),
            Command::Party => self.party()?,
            Command::SetColor { channel, color } => {
                self.channel(channel)?.set_color(
                    i32::from(color.r),
                    i32::from(color.g),
                    i32::from(color.b),
                )?;
            }
        }
        Ok(())
    }

    /// Parse and apply a text command, ignoring anything malformed
    pub fn dispatch_text(&self, payload: &str) -> Result<(), Error> {
        match Command::parse(payload) {
            Ok(command) => self.dispatch(command),
            Err(_) => {
                warn!("controller: ignoring command {:?}", payload);
                Ok(())
            }
        }
    }

    /// Apply every queued command
    ///
    /// Commands naming a missing channel are logged and dropped; driver
    /// failures abort and are returned.
    pub fn process_pending(&self) -> Result<(), Error> {
        while let Some(command) = self.commands.try_receive() {
            match self.dispatch(command) {
                Ok(()) => {}
                Err(Error::UnknownChannel(id)) => {
                    warn!("controller: no channel {}", id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Set the same color on every channel
    pub fn set_all_colors(&self, red: i32, green: i32, blue: i32) -> Result<(), Error> {
        for channel in &self.channels {
            channel.set_color(red, green, blue)?;
        }
        Ok(())
    }

    /// Force every seasonal-eligible channel off and into party mode
    ///
    /// The override is forced on as well, otherwise the next tick outside the
    /// daily window would switch the party straight off again.
    fn party(&self) -> Result<(), Error> {
        self.scheduler.set_override(Override::ForceOn);
        for channel in self.channels.iter().filter(|c| c.allows_seasonal_display()) {
            channel.switch_on_party_mode()?;
        }
        Ok(())
    }

    /// Leave every channel dark before the first tick
    pub fn start(&self) -> Result<(), Error> {
        info!("controller: starting with {} channels", self.channels.len());
        for channel in &self.channels {
            channel.switch_off(true)?;
        }
        Ok(())
    }

    /// Drain queued commands and run one scheduler step
    pub fn tick(&self, now: &NaiveDateTime) -> Result<TickOutcome, Error> {
        self.process_pending()?;
        self.scheduler.tick(now, &self.channels)
    }

    /// Run the control loop until `stop` is raised, then leave every channel dark
    pub fn run<C: Clock>(&self, clock: &C, stop: &AtomicBool) -> Result<(), Error> {
        self.start()?;
        let mut pacer = TickPacer::new(self.config.schedule.tick_interval);
        let result = loop {
            if stop.load(Ordering::Acquire) {
                break Ok(());
            }
            if let Err(e) = self.tick(&clock.now()) {
                error!("controller: tick failed: {}", e);
                break Err(e);
            }
            let pace = pacer.tick(Instant::now());
            sleep(pace.sleep_duration);
        };
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    /// Cancel every animation and darken every channel
    ///
    /// Keeps going after a failing channel and returns the first error.
    pub fn shutdown(&self) -> Result<(), Error> {
        info!("controller: shutting down");
        let mut first_error = None;
        for channel in &self.channels {
            if let Err(e) = channel.switch_off(true) {
                error!("controller: channel {} failed to switch off: {}", channel.id(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl<D: PixelDriver> core::fmt::Debug for LightController<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LightController")
            .field("channels", &self.channels.len())
            .field("scheduler", &self.scheduler)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}
