//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: x grows to the right, y grows downward. A rectangle
//! covers the half-open area `[left, right) × [top, bottom)`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in integer pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    /// A rectangle with no area can never be hit
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// True iff the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
