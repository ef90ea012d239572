//! Axis-aligned rectangles in canvas space (origin top-left, y down).

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose centre is (`cx`, `cy`).
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width * 0.5, cy - height * 0.5, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn from_center_places_rect_around_point() {
        let r = Rect::from_center(200.0, 450.0, 20.0, 20.0);
        assert_eq!(r, Rect::new(190.0, 440.0, 20.0, 20.0));
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::new(0.0, 0.0, 50.0, 80.0);
        r.set_bottom(718.0);
        assert_eq!(r.y, 638.0);
        r.set_right(100.0);
        assert_eq!(r.x, 50.0);
        r.set_left(3.0);
        assert_eq!(r.right(), 53.0);
        assert_eq!(r.height, 80.0);
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.contains_point(10.0, 10.0));
        assert!(r.contains_point(19.9, 19.9));
        assert!(!r.contains_point(20.0, 15.0));
        assert!(!r.contains_point(15.0, 9.9));
    }
}
