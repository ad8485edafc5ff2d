use crate::models::{Particle, Vector2D};

/// An axis-aligned box in the simulation plane.
///
/// The box is inclusive on both ends; subdividing it yields four quadrant boxes
/// that tile it exactly, indexed as
///
/// ```text
///  min.x, min.y --------------- max.x, min.y
///    |      0      |      1      |
///    |-------------+-------------|
///    |      2      |      3      |
///  min.x, max.y --------------- max.x, max.y
/// ```
///
/// # Examples
///
/// ```
/// use rs_quadsim::models::Vector2D;
/// use rs_quadsim::spatial::BoundingBox;
///
/// let bounds = BoundingBox::new(Vector2D::new(0.0, 0.0), Vector2D::new(2.0, 2.0));
/// assert_eq!(bounds.pivot(), Vector2D::new(1.0, 1.0));
/// assert_eq!(bounds.quadrant_of(Vector2D::new(1.5, 0.5)), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl BoundingBox {
    pub const fn new(min: Vector2D, max: Vector2D) -> Self {
        BoundingBox { min, max }
    }

    /// Returns the tight box around every particle position.
    ///
    /// An empty slice yields the zero-area box at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::{Particle, Vector2D};
    /// use rs_quadsim::spatial::BoundingBox;
    ///
    /// let particles = vec![
    ///     Particle::new(0, 1.0, Vector2D::new(-1.0, 3.0), Vector2D::ZERO).unwrap(),
    ///     Particle::new(1, 1.0, Vector2D::new(2.0, -4.0), Vector2D::ZERO).unwrap(),
    /// ];
    /// let bounds = BoundingBox::from_particles(&particles);
    /// assert_eq!(bounds.min, Vector2D::new(-1.0, -4.0));
    /// assert_eq!(bounds.max, Vector2D::new(2.0, 3.0));
    /// ```
    pub fn from_particles(particles: &[Particle]) -> Self {
        let Some(first) = particles.first() else {
            return BoundingBox::new(Vector2D::ZERO, Vector2D::ZERO);
        };
        particles.iter().skip(1).fold(
            BoundingBox::new(first.position, first.position),
            |bounds, p| BoundingBox::new(bounds.min.min(&p.position), bounds.max.max(&p.position)),
        )
    }

    /// Midpoint of the box, used to split it into quadrants.
    pub fn pivot(&self) -> Vector2D {
        (self.min + self.max) * 0.5
    }

    /// Extent of one quadrant.
    pub fn half_size(&self) -> Vector2D {
        (self.max - self.min) * 0.5
    }

    /// Quadrant index of `point`. Points on the pivot lines go to the higher index.
    pub fn quadrant_of(&self, point: Vector2D) -> usize {
        let pivot = self.pivot();
        let x_dir = if point.x < pivot.x { 0 } else { 1 };
        let y_dir = if point.y < pivot.y { 0 } else { 1 };
        x_dir | (y_dir << 1)
    }

    /// Box of the quadrant with the given index (0..4).
    pub fn child(&self, index: usize) -> BoundingBox {
        let pivot = self.pivot();
        let min = Vector2D::new(
            if index & 1 != 0 { pivot.x } else { self.min.x },
            if (index >> 1) & 1 != 0 { pivot.y } else { self.min.y },
        );
        BoundingBox::new(min, min + self.half_size())
    }

    /// Minimum distance from `point` to the box; zero if the point is inside.
    pub fn distance_to_point(&self, point: Vector2D) -> f32 {
        box_point_distance(self.min, self.max, point)
    }

    /// Whether `point` lies inside the box, allowing `tolerance` of slack on every side.
    pub fn contains_with_tolerance(&self, point: Vector2D, tolerance: f32) -> bool {
        !(point.x > self.max.x + tolerance
            || point.y > self.max.y + tolerance
            || point.x < self.min.x - tolerance
            || point.y < self.min.y - tolerance)
    }
}

/// Minimum distance from point `p` to the box `[bmin, bmax]`.
///
/// # Examples
///
/// ```
/// use rs_quadsim::models::Vector2D;
/// use rs_quadsim::spatial::box_point_distance;
///
/// let bmin = Vector2D::new(0.0, 0.0);
/// let bmax = Vector2D::new(1.0, 1.0);
/// assert_eq!(box_point_distance(bmin, bmax, Vector2D::new(0.5, 0.5)), 0.0);
/// assert_eq!(box_point_distance(bmin, bmax, Vector2D::new(4.0, 5.0)), 5.0);
/// ```
#[inline]
pub fn box_point_distance(bmin: Vector2D, bmax: Vector2D, p: Vector2D) -> f32 {
    let dx = (bmin.x - p.x).max(p.x - bmax.x).max(0.0);
    let dy = (bmin.y - p.y).max(p.y - bmax.y).max(0.0);
    (dx * dx + dy * dy).sqrt()
}
