//! Scrolling obstacles and the randomness that shapes them

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::Tuning;

/// Where new gap offsets come from.
///
/// Every `rand::Rng` is a `GapSource`, drawing uniformly from the range.
/// Tests and replays can plug in a scripted source instead.
pub trait GapSource {
    /// Pick a gap top in the half-open `range` (never empty)
    fn gap_top(&mut self, range: Range<i32>) -> i32;
}

impl<R: Rng + ?Sized> GapSource for R {
    fn gap_top(&mut self, range: Range<i32>) -> i32 {
        self.random_range(range)
    }
}

/// Replays a fixed list of gap tops, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedGaps {
    gaps: Vec<i32>,
    next: usize,
}

impl ScriptedGaps {
    pub fn new(gaps: impl Into<Vec<i32>>) -> Self {
        Self {
            gaps: gaps.into(),
            next: 0,
        }
    }
}

impl GapSource for ScriptedGaps {
    fn gap_top(&mut self, range: Range<i32>) -> i32 {
        if self.gaps.is_empty() {
            return range.start;
        }
        let gap = self.gaps[self.next % self.gaps.len()];
        self.next += 1;
        gap
    }
}

/// A pair of solid pipes with one passable gap between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: i32,
    gap_top: i32,
    /// Legal gap tops, taken from the tuning
    gap_tops: Range<i32>,
    width: i32,
    gap_size: i32,
    /// Y of the ground surface; the bottom pipe ends here
    ground_y: i32,
}

impl Obstacle {
    /// Create an obstacle at `x` with a freshly drawn gap
    pub fn new<G: GapSource + ?Sized>(x: i32, tuning: &Tuning, source: &mut G) -> Self {
        let mut obstacle = Self::with_gap_top(x, 0, tuning);
        obstacle.regenerate(x, source);
        obstacle
    }

    /// Create an obstacle with a known gap (clamped into the legal range)
    pub fn with_gap_top(x: i32, gap_top: i32, tuning: &Tuning) -> Self {
        let gap_tops = tuning.gap_top_range();
        Self {
            x,
            gap_top: gap_top.clamp(gap_tops.start, gap_tops.end - 1),
            gap_tops,
            width: tuning.obstacle_width(),
            gap_size: tuning.gap_size(),
            ground_y: tuning.ground_y(),
        }
    }

    #[inline]
    pub fn gap_top(&self) -> i32 {
        self.gap_top
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Scroll left by `speed` pixels
    pub fn advance(&mut self, speed: i32) {
        self.x -= speed;
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0
    }

    /// Reuse this slot as a brand new obstacle at `at_x`
    pub fn regenerate<G: GapSource + ?Sized>(&mut self, at_x: i32, source: &mut G) {
        let range = self.gap_tops.clone();
        assert!(
            !range.is_empty(),
            "gap of {}px leaves no room above ground at y={}",
            self.gap_size,
            self.ground_y
        );
        self.x = at_x;
        self.gap_top = source.gap_top(range.clone()).clamp(range.start, range.end - 1);
    }

    /// Solid pipe above the gap. Empty when the gap starts at y=0.
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0, self.width, self.gap_top)
    }

    /// Solid pipe between the gap and the ground
    pub fn bottom_rect(&self) -> Rect {
        let top = self.gap_top + self.gap_size;
        Rect::new(self.x, top, self.width, self.ground_y - top)
    }

    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.top_rect().intersects(rect) || self.bottom_rect().intersects(rect)
    }
}
