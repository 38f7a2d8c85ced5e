//! Axis-aligned rectangle collision.

/// An axis-aligned rectangle in screen pixels, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
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

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict containment: points on the border are outside.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px > self.left() && px < self.right() && py > self.top() && py < self.bottom()
    }

    /// Strict overlap on both axes; touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// What an entity collides as.
///
/// Projectiles carry no hitbox of their own: their position and extent are
/// tested for containment inside a body's hitbox.  Bodies collide by stored
/// hitbox overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    Projectile(Rect),
    Body(Rect),
}

/// Anything the frame step can test for collisions.
pub trait Collidable {
    fn collider(&self) -> Collider;
}

/// Collision test between two colliders.
///
/// `(Projectile, Body)` needs vertical overlap and the projectile horizontally
/// *fully inside* the body, so a laser grazing a ship's edge misses.  Every
/// other pairing is a plain overlap test, which makes the projectile case
/// asymmetric: `(Body, Projectile)` reports the grazing laser as a hit.
pub fn intersects(a: Collider, b: Collider) -> bool {
    match (a, b) {
        (Collider::Projectile(p), Collider::Body(body)) => {
            p.top() < body.bottom()
                && p.bottom() > body.top()
                && p.left() > body.left()
                && p.right() < body.right()
        }
        (Collider::Body(a), Collider::Body(b))
        | (Collider::Body(a), Collider::Projectile(b))
        | (Collider::Projectile(a), Collider::Projectile(b)) => a.overlaps(&b),
    }
}

/// Convenience wrapper over [`intersects`] for entity types.
pub fn collides<A: Collidable + ?Sized, B: Collidable + ?Sized>(a: &A, b: &B) -> bool {
    intersects(a.collider(), b.collider())
}
