use core::ops::Mul;

use super::Vector2;

/// 2D affine transform stored as `[a, b, c, d, e, f]`.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`. Composition follows the
/// column-vector convention: in `lhs * rhs`, `rhs` is applied first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub m: [f64; 6],
}

impl Matrix {
    /// Determinants below this magnitude are treated as singular.
    pub const EPSILON: f64 = 1e-12;

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { m: [a, b, c, d, e, f] }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn translation(t: Vector2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, t.x, t.y)
    }

    #[inline]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    #[inline]
    pub const fn scaling(s: Vector2) -> Self {
        Self::new(s.x, 0.0, 0.0, s.y, 0.0, 0.0)
    }

    /// Builds a node's local transform.
    ///
    /// Equivalent to `T(position) · T(origin) · R(rotation) · S(scale) · T(-origin)`:
    /// rotation and scale pivot around `origin`, then the result is moved to
    /// `position`.
    pub fn compose(position: Vector2, scale: Vector2, origin: Vector2, rotation: f64) -> Self {
        let mut out = Self::translation(position + origin);
        if rotation != 0.0 {
            out = out.multiply(&Self::rotation(rotation));
        }
        if scale != Vector2::one() {
            out = out.multiply(&Self::scaling(scale));
        }
        if origin != Vector2::zero() {
            out = out.multiply(&Self::translation(-origin));
        }
        out
    }

    /// `self · other`: `other` is applied first.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        Matrix::new(
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        )
    }

    /// `other · self`: `self` is applied first, then `other`.
    #[inline]
    pub fn premultiply(&self, other: &Matrix) -> Matrix {
        other.multiply(self)
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.m;
        a * d - b * c
    }

    /// Returns the inverse, or `None` when the matrix is singular.
    pub fn try_invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < Self::EPSILON {
            return None;
        }
        let [a, b, c, d, e, f] = self.m;
        let inv = 1.0 / det;
        Some(Matrix::new(
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * f - d * e) * inv,
            (b * e - a * f) * inv,
        ))
    }

    /// Returns the inverse, falling back to identity for singular input.
    ///
    /// The fallback keeps a zero-scaled node from poisoning the frame; it is
    /// reported with a warning so the faulty transform can be tracked down.
    pub fn invert(&self) -> Matrix {
        match self.try_invert() {
            Some(inv) => inv,
            None => {
                log::warn!("Matrix::invert: singular matrix {:?}, using identity", self.m);
                Matrix::identity()
            }
        }
    }

    #[inline]
    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        let [a, b, c, d, e, f] = self.m;
        Vector2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Applies only the linear part (no translation). Used for deltas.
    #[inline]
    pub fn transform_vector(&self, v: Vector2) -> Vector2 {
        let [a, b, c, d, _, _] = self.m;
        Vector2::new(a * v.x + c * v.y, b * v.x + d * v.y)
    }

    #[inline]
    pub fn translate(&self, t: Vector2) -> Matrix {
        self.multiply(&Matrix::translation(t))
    }

    #[inline]
    pub fn rotate(&self, angle: f64) -> Matrix {
        self.multiply(&Matrix::rotation(angle))
    }

    #[inline]
    pub fn scale(&self, s: Vector2) -> Matrix {
        self.multiply(&Matrix::scaling(s))
    }

    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.m.iter().zip(other.m.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;
    #[inline]
    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}
