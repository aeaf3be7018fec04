#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned box. Hosts report element bounds relative to the viewport's
/// top-left corner, so `y` shrinks as the page scrolls down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Vertical position of a point `fraction` of the way down the box
    /// (0.0 = top edge, 1.0 = bottom edge).
    pub fn y_at(&self, fraction: f32) -> f32 {
        self.y + self.h * fraction
    }

    pub fn translate_y(&self, dy: f32) -> Rect {
        Rect {
            y: self.y + dy,
            ..*self
        }
    }
}
