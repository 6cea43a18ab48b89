//! Pixel-by-pixel sweep across the strip

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// One pass of a sweep: yields the pixel to paint at each step
///
/// The caller paints each yielded index, shows the frame and pauses before
/// the next step.
#[derive(Debug, Clone)]
pub struct Sweep {
    direction: Direction,
    len: usize,
    step: usize,
}

impl Sweep {
    pub const fn new(len: usize, direction: Direction) -> Self {
        Self {
            direction,
            len,
            step: 0,
        }
    }
}

impl Iterator for Sweep {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.len {
            return None;
        }
        let index = match self.direction {
            Direction::Forward => self.step,
            Direction::Backward => self.len - 1 - self.step,
        };
        self.step += 1;
        Some(index)
    }
}
