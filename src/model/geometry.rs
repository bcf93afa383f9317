use serde::{Deserialize, Serialize};

/// Screen rectangle as reported by yabai, in points.
///
/// Frames are the only structural evidence the reconstructor gets, so all
/// derived edges are exposed here rather than recomputed at call sites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self { Frame { x, y, w, h } }

    pub fn left(&self) -> f64 { self.x }

    pub fn top(&self) -> f64 { self.y }

    pub fn right(&self) -> f64 { self.x + self.w }

    pub fn bottom(&self) -> f64 { self.y + self.h }

    pub fn center_x(&self) -> f64 { self.x + self.w / 2.0 }

    pub fn center_y(&self) -> f64 { self.y + self.h / 2.0 }

    /// Smallest frame covering both `self` and `other`.
    pub fn union(&self, other: &Frame) -> Frame {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Frame::new(x, y, right - x, bottom - y)
    }

    /// Bounding box of a set of frames. Returns a zero frame for an empty
    /// iterator so callers don't have to special-case it.
    pub fn bounding(frames: impl IntoIterator<Item = Frame>) -> Frame {
        let mut it = frames.into_iter();
        let Some(first) = it.next() else {
            return Frame::default();
        };
        it.fold(first, |acc, f| acc.union(&f))
    }
}
