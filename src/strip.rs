//! Frame buffer bound to one pixel driver.
//!
//! Every write to the hardware is a complete frame: each pixel is staged and
//! the strip is flushed once, so a half-written frame is never shown.

use embassy_time::Instant;

use crate::channel::CancelToken;
use crate::color::{BLACK, Rgb};
use crate::effect::Effect;
use crate::{Error, PixelDriver};

/// Addressable strip with its own frame buffer
#[derive(Debug)]
pub struct Strip<D: PixelDriver> {
    driver: D,
    frame: Vec<Rgb>,
}

impl<D: PixelDriver> Strip<D> {
    /// Wrap a driver. The frame buffer starts dark.
    pub fn new(driver: D) -> Self {
        let len = driver.pixel_count();
        Self {
            driver,
            frame: vec![BLACK; len],
        }
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Last frame composed for this strip
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut [Rgb] {
        &mut self.frame
    }

    /// Write the frame buffer to the strip
    pub fn show(&mut self) -> Result<(), Error> {
        for (index, color) in self.frame.iter().enumerate() {
            self.driver.set_pixel(index, *color);
        }
        self.driver.flush().map_err(|e| Error::driver(&e))
    }

    /// Write the frame buffer unless `token` is cancelled before a pixel write
    ///
    /// Returns `Ok(false)` without flushing when cancelled part way.
    pub fn show_unless_cancelled(&mut self, token: &CancelToken) -> Result<bool, Error> {
        for (index, color) in self.frame.iter().enumerate() {
            if token.is_cancelled() {
                return Ok(false);
            }
            self.driver.set_pixel(index, *color);
        }
        self.driver.flush().map_err(|e| Error::driver(&e))?;
        Ok(true)
    }

    /// Set every pixel to one color and show it
    pub fn fill(&mut self, color: Rgb) -> Result<(), Error> {
        self.frame.fill(color);
        self.show()
    }

    /// Render an effect into the frame buffer and show it
    pub fn render<E: Effect>(&mut self, effect: &mut E, now: Instant) -> Result<(), Error> {
        effect.render(now, &mut self.frame);
        self.show()
    }
}
