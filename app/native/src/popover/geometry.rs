//! Screen geometry for placing the popover under its status item.
//!
//! All values are logical points in global screen coordinates with the
//! origin at the top-left corner, which is what both Tauri window positions
//! and `CGEventGetLocation` report.

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn max_x(&self) -> f64 { self.x + self.width }

    #[must_use]
    pub fn max_y(&self) -> f64 { self.y + self.height }

    #[must_use]
    pub fn mid_x(&self) -> f64 { self.width.mul_add(0.5, self.x) }

    /// Check if a point is inside this rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }
}

/// Content dimensions of the popover, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

impl ContentSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }
}

/// Which side of the anchor the popover opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferredEdge {
    /// Below the anchor (AppKit's `minY` edge for a status item button).
    #[default]
    Below,
    /// Above the anchor.
    Above,
}

/// Computes the top-left origin of a popover of `size` attached to `anchor`.
///
/// The popover is centred horizontally on the anchor and kept inside
/// `screen` horizontally when the screen bounds are known.
#[must_use]
pub fn popover_origin(
    anchor: Rect,
    size: ContentSize,
    edge: PreferredEdge,
    screen: Option<Rect>,
) -> Point {
    let width = f64::from(size.width);
    let height = f64::from(size.height);

    let mut x = width.mul_add(-0.5, anchor.mid_x());
    let y = match edge {
        PreferredEdge::Below => anchor.max_y(),
        PreferredEdge::Above => anchor.y - height,
    };

    if let Some(screen) = screen {
        x = x.min(screen.max_x() - width).max(screen.x);
    }

    Point::new(x, y)
}

/// Whether a pointer-down at `point` counts as a click outside the app.
///
/// `popover_frame` is `None` while the popover is hidden. Clicks on the
/// status button are never outside: the button toggles the popover itself.
#[must_use]
pub fn is_outside(point: Point, popover_frame: Option<Rect>, button: Option<Rect>) -> bool {
    let on_popover = popover_frame.is_some_and(|frame| frame.contains(point));
    let on_button = button.is_some_and(|bounds| bounds.contains(point));
    !on_popover && !on_button
}
