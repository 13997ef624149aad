use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
///
/// `Rect` is `Copy`; assigning it is the copy.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// True when the two rectangles overlap with positive area.
    ///
    /// Rectangles that only share an edge do not collide.
    #[inline]
    pub fn colliderect(&self, other: &Rect) -> bool {
        !(self.x + self.w <= other.x
            || other.x + other.w <= self.x
            || self.y + self.h <= other.y
            || other.y + other.h <= self.y)
    }

    /// Point containment, inclusive on all four edges.
    #[inline]
    pub fn collidepoint(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    #[inline]
    pub fn collidevec(&self, p: Vec2) -> bool {
        self.collidepoint(p.x, p.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn centerx(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.centerx(), self.centery())
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    // Setters move the rect; the size never changes.

    #[inline]
    pub fn set_left(&mut self, v: f32) {
        self.x = v;
    }

    #[inline]
    pub fn set_right(&mut self, v: f32) {
        self.x = v - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, v: f32) {
        self.y = v;
    }

    #[inline]
    pub fn set_bottom(&mut self, v: f32) {
        self.y = v - self.h;
    }

    #[inline]
    pub fn set_centerx(&mut self, v: f32) {
        self.x = v - self.w / 2.0;
    }

    #[inline]
    pub fn set_centery(&mut self, v: f32) {
        self.y = v - self.h / 2.0;
    }

    #[inline]
    pub fn set_center(&mut self, cx: f32, cy: f32) {
        self.set_centerx(cx);
        self.set_centery(cy);
    }

    #[inline]
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut r = self;
        if r.w < 0.0 {
            r.x += r.w;
            r.w = -r.w;
        }
        if r.h < 0.0 {
            r.y += r.h;
            r.h = -r.h;
        }
        r
    }

    /// Overlapping area of two rectangles, `None` when it is empty.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = (a.x + a.w).min(b.x + b.w);
        let y1 = (a.y + a.h).min(b.y + b.h);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ── colliderect ───────────────────────────────────────────────────────

    #[test]
    fn colliderect_overlapping() {
        assert!(r(0.0, 0.0, 10.0, 10.0).colliderect(&r(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn colliderect_contained() {
        assert!(r(0.0, 0.0, 100.0, 100.0).colliderect(&r(10.0, 10.0, 5.0, 5.0)));
        assert!(r(10.0, 10.0, 5.0, 5.0).colliderect(&r(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn colliderect_shared_edge_does_not_collide() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert!(!a.colliderect(&r(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.colliderect(&r(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.colliderect(&r(-10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn colliderect_disjoint() {
        assert!(!r(0.0, 0.0, 5.0, 5.0).colliderect(&r(20.0, 20.0, 5.0, 5.0)));
    }

    // ── collidepoint ──────────────────────────────────────────────────────

    #[test]
    fn collidepoint_interior() {
        assert!(r(0.0, 0.0, 10.0, 10.0).collidepoint(5.0, 5.0));
    }

    #[test]
    fn collidepoint_edges_are_inclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.collidepoint(0.0, 0.0));
        assert!(rect.collidepoint(10.0, 10.0));
        assert!(rect.collidepoint(10.0, 0.0));
    }

    #[test]
    fn collidepoint_outside() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.collidepoint(-0.5, 5.0));
        assert!(!rect.collidepoint(5.0, 10.5));
    }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn edge_accessors() {
        let rect = r(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn setters_keep_size() {
        let mut rect = r(0.0, 0.0, 30.0, 40.0);
        rect.set_right(100.0);
        assert_eq!(rect.x, 70.0);
        rect.set_bottom(100.0);
        assert_eq!(rect.y, 60.0);
        rect.set_center(0.0, 0.0);
        assert_eq!((rect.x, rect.y), (-15.0, -20.0));
        assert_eq!((rect.w, rect.h), (30.0, 40.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0));
        assert_eq!(i, Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn intersect_agrees_with_colliderect() {
        let cases = [
            (r(0.0, 0.0, 4.0, 4.0), r(3.0, 3.0, 4.0, 4.0)),
            (r(0.0, 0.0, 4.0, 4.0), r(4.0, 4.0, 4.0, 4.0)),
            (r(-2.0, 1.0, 3.0, 1.0), r(0.0, 0.0, 1.0, 5.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.intersect(b).is_some(), a.colliderect(&b), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn normalized_negative_size() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }
}
