//! Camera between surface space and scene space.

use crate::coords::{Matrix, Size, Vector2};
use crate::scene::{NodeId, Scene};

/// The user's view into the scene.
///
/// Surface (screen) coordinates map to scene coordinates through
/// `inverse_matrix`; drawing goes the other way through `matrix`. The camera
/// transform is `T(position) · R(rotation) · S(scale)` with uniform scale.
#[derive(Debug, Clone)]
pub struct Viewport {
    position: Vector2,
    rotation: f64,
    scale: f64,

    matrix: Matrix,
    inverse_matrix: Matrix,
    matrix_needs_update: bool,

    /// Gesture controllers move the camera towards the pointer while zooming
    /// when this is set.
    pub move_on_scale: bool,
    /// Screen point a rotate gesture started at; `None` when not rotating.
    pub rotation_point: Option<Vector2>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            position: Vector2::zero(),
            rotation: 0.0,
            scale: 1.0,
            matrix: Matrix::identity(),
            inverse_matrix: Matrix::identity(),
            matrix_needs_update: true,
            move_on_scale: false,
            rotation_point: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_position(&mut self, v: Vector2) {
        self.position = v;
        self.matrix_needs_update = true;
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.position += delta;
        self.matrix_needs_update = true;
    }

    pub fn set_rotation(&mut self, v: f64) {
        self.rotation = v;
        self.matrix_needs_update = true;
    }

    pub fn set_scale(&mut self, v: f64) {
        self.scale = v;
        self.matrix_needs_update = true;
    }

    #[inline]
    pub fn matrix_needs_update(&self) -> bool {
        self.matrix_needs_update
    }

    /// Scene → surface transform. Only current after [`Viewport::update_matrix`].
    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Surface → scene transform.
    #[inline]
    pub fn inverse_matrix(&self) -> &Matrix {
        &self.inverse_matrix
    }

    /// Recomputes the camera matrices if a setter touched them.
    pub fn update_matrix(&mut self) {
        if !self.matrix_needs_update {
            return;
        }
        let mut m = Matrix::translation(self.position);
        if self.rotation != 0.0 {
            m = m.rotate(self.rotation);
        }
        if self.scale != 1.0 {
            m = m.scale(Vector2::new(self.scale, self.scale));
        }
        self.matrix = m;
        self.inverse_matrix = m.invert();
        self.matrix_needs_update = false;
    }

    /// Moves the camera so the origin of `global_matrix` lands in the middle
    /// of a surface of `size`. The node's extents are not considered.
    pub fn center_on(&mut self, global_matrix: &Matrix, size: Size) {
        let p = global_matrix.transform_point(Vector2::zero());
        self.position = -p * self.scale + size.half();
        self.matrix_needs_update = true;
    }

    /// [`Viewport::center_on`] for a scene node. Returns `false` for stale handles.
    pub fn center_on_node(&mut self, scene: &Scene, id: NodeId, size: Size) -> bool {
        match scene.get(id) {
            Some(node) => {
                let global = *node.global_matrix();
                self.center_on(&global, size);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn screen_to_scene(&self, p: Vector2) -> Vector2 {
        self.inverse_matrix.transform_point(p)
    }

    #[inline]
    pub fn scene_to_screen(&self, p: Vector2) -> Vector2 {
        self.matrix.transform_point(p)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
