use std::fmt;

/// Axis-aligned pixel region, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by `margin` on every side. Returns `None` if nothing is left.
    pub fn inset(&self, margin: u32) -> Option<Rect> {
        let width = self.width.checked_sub(2 * margin)?;
        let height = self.height.checked_sub(2 * margin)?;
        let inner = Rect::new(self.x + margin, self.y + margin, width, height);
        if inner.is_empty() { None } else { Some(inner) }
    }

    /// True when both sides lie within `min..=max`.
    pub fn fits(&self, min: u32, max: u32) -> bool {
        (min..=max).contains(&self.width) && (min..=max).contains(&self.height)
    }

    pub fn as_array(&self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
