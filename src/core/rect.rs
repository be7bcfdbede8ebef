// Axis-aligned rectangles for barriers and hitboxes

/// An axis-aligned rectangle in world space (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge coordinate
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// AABB overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when this rect straddles the top edge of `other`:
    /// the horizontal ranges overlap and `other.y` lies between this
    /// rect's top and bottom. Used for standing-on-walkway tests.
    pub fn touches_top_of(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y <= other.y
            && self.bottom() >= other.y
    }

    /// Whether `other` fits entirely inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }
}
