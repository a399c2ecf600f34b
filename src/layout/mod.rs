pub mod locate;
pub mod slice;

pub use self::locate::{locate, Hit};
pub use self::slice::{compute_layout, layout, slices, Layout, LayoutRect, Slices};

/// Axis-aligned rectangle in integer screen units, `(x, y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle with no width or no height covers nothing.
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Half-open containment: the left and top edges belong to the rectangle,
    /// the right and bottom edges to its neighbours.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.w as i64 && py >= y && py < y + self.h as i64
    }

    /// Whether the right and bottom edges still fit in `i32` screen coordinates.
    pub fn fits_coordinates(&self) -> bool {
        self.x as i64 + self.w as i64 <= i32::MAX as i64
            && self.y as i64 + self.h as i64 <= i32::MAX as i64
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Whether the two rectangles share any interior.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        let (ax0, ay0) = (self.x as i64, self.y as i64);
        let (bx0, by0) = (other.x as i64, other.y as i64);
        ax0 < bx0 + other.w as i64
            && bx0 < ax0 + self.w as i64
            && ay0 < by0 + other.h as i64
            && by0 < ay0 + self.h as i64
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    fn from((x, y, w, h): (i32, i32, u32, u32)) -> Self {
        Self { x, y, w, h }
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn containment_is_half_open() {
        let r = Rect::new(10, 20, 5, 5);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 24));
        assert!(!r.contains(15, 22));
        assert!(!r.contains(12, 25));
        assert!(!r.contains(9, 22));
    }

    #[test]
    fn edge_sharing_rectangles_do_not_overlap() {
        let left = Rect::new(0, 0, 10, 10);
        assert!(!left.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(left.overlaps(&Rect::new(9, 9, 10, 10)));
        assert!(!left.overlaps(&Rect::new(3, 3, 0, 4)));
    }

    #[test]
    fn far_edges_must_fit_in_i32() {
        assert!(Rect::new(i32::MAX - 800, 0, 800, 10).fits_coordinates());
        assert!(!Rect::new(i32::MAX - 100, 0, 800, 10).fits_coordinates());
        assert!(!Rect::new(0, 1, 10, u32::MAX).fits_coordinates());
        assert!(Rect::new(-5, i32::MIN, 10, u32::MAX).fits_coordinates());
    }
}
