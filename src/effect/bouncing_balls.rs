//! Bouncing balls effect
//!
//! Simulates independent balls thrown up from the floor under constant
//! gravity. Each ball loses a slightly different share of its velocity on
//! every bounce, so the balls drift apart into distinct decaying rhythms.
//! Once a ball has almost stopped it is relaunched at full speed.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{BLACK, Rgb},
    config::BallPhysics,
};

/// State of one simulated ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Current height above the floor
    pub height: f32,
    /// Upward velocity at the last bounce
    pub impact_velocity: f32,
    /// Share of velocity kept on each bounce
    pub damping: f32,
    /// Time of the last bounce
    pub last_bounce: Instant,
    /// Pixel the ball is drawn on
    pub position: usize,
}

#[derive(Debug, Clone)]
pub struct BouncingBallsEffect {
    physics: BallPhysics,
    launch_velocity: f32,
    balls: Vec<Ball>,
}

impl BouncingBallsEffect {
    pub fn new(physics: BallPhysics, now: Instant) -> Self {
        let launch_velocity = libm::sqrtf(-2.0 * physics.gravity * physics.start_height);
        let mut effect = Self {
            physics,
            launch_velocity,
            balls: Vec::with_capacity(physics.ball_count),
        };
        effect.launch_all(now);
        effect
    }

    /// Velocity every ball leaves the floor with after a launch
    pub const fn launch_velocity(&self) -> f32 {
        self.launch_velocity
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[allow(clippy::cast_precision_loss)]
    fn launch_all(&mut self, now: Instant) {
        let count = self.physics.ball_count;
        let spread = (count * count).max(1) as f32;
        self.balls.clear();
        self.balls.extend((0..count).map(|i| Ball {
            height: 0.0,
            impact_velocity: self.launch_velocity,
            damping: self.physics.base_damping - i as f32 / spread,
            last_bounce: now,
            position: 0,
        }));
    }

    /// Advance every ball to `now` and map its height onto `len` pixels
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn update(&mut self, now: Instant, len: usize) {
        let gravity = self.physics.gravity;
        let top = len.saturating_sub(1);
        for ball in &mut self.balls {
            let elapsed = now
                .checked_duration_since(ball.last_bounce)
                .map_or(0.0, |d| d.as_micros() as f32 / 1_000_000.0);

            ball.height = 0.5 * gravity * elapsed * elapsed + ball.impact_velocity * elapsed;
            if ball.height < 0.0 {
                ball.height = 0.0;
                ball.impact_velocity *= ball.damping;
                ball.last_bounce = now;
                if ball.impact_velocity < self.physics.relaunch_velocity {
                    ball.impact_velocity = self.launch_velocity;
                }
            }

            let scaled = libm::roundf(ball.height * top as f32 / self.physics.start_height);
            ball.position = (scaled.max(0.0) as usize).min(top);
        }
    }
}

impl Effect for BouncingBallsEffect {
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        self.update(now, leds.len());
        leds.fill(BLACK);
        for ball in &self.balls {
            if let Some(led) = leds.get_mut(ball.position) {
                *led = self.physics.color;
            }
        }
    }
}
