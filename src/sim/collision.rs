//! Overlap tests for the two body shape families
//!
//! Circles touch inclusively (distance == r1 + r2 is a hit), axis-aligned
//! rectangles touch exclusively (shared edges are not a hit). A session picks
//! one family for every entity kind, see [`ShapeFamily`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which collision representation a session builds its entities with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFamily {
    #[default]
    Circle,
    Rect,
}

impl ShapeFamily {
    /// Body of "size" `radius`: a circle, or the square that bounds it
    pub fn body(self, radius: f32) -> Body {
        match self {
            ShapeFamily::Circle => Body::Circle { radius },
            ShapeFamily::Rect => Body::Rect {
                width: radius * 2.0,
                height: radius * 2.0,
            },
        }
    }
}

/// Collision shape, positioned by the owning entity's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

impl Body {
    #[inline]
    pub fn half_width(&self) -> f32 {
        match *self {
            Body::Circle { radius } => radius,
            Body::Rect { width, .. } => width / 2.0,
        }
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        match *self {
            Body::Circle { radius } => radius,
            Body::Rect { height, .. } => height / 2.0,
        }
    }

    /// Axis-aligned bounds of this body centered at `center`
    pub fn bounds(&self, center: Vec2) -> Aabb {
        Aabb::from_center(center, self.half_width() * 2.0, self.half_height() * 2.0)
    }

    /// Test two positioned bodies for overlap
    pub fn overlaps(&self, pos: Vec2, other: &Body, other_pos: Vec2) -> bool {
        match (*self, *other) {
            (Body::Circle { radius: r1 }, Body::Circle { radius: r2 }) => {
                circles_overlap(pos, r1, other_pos, r2)
            }
            // Sessions never mix families; a mixed pair degrades to bounds.
            _ => self.bounds(pos).overlaps(&other.bounds(other_pos)),
        }
    }
}

/// Circle-circle overlap on squared distance (boundary inclusive)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Axis-aligned rectangle by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Interval test on both axes (boundary exclusive)
    #[inline]
    pub fn overlaps(&self, b: &Aabb) -> bool {
        self.x < b.x + b.w && self.x + self.w > b.x && self.y < b.y + b.h && self.y + self.h > b.y
    }
}
