//! Math utilities and types
//!
//! Layout happens in a 2D pixel space centred on the screen; the renderer
//! receives the final transform as 4x4 matrices.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Orthographic projection centred on the origin
///
/// Maps `[-width/2, width/2] x [-height/2, height/2]` to normalized device
/// coordinates, which is the space text quads are laid out in.
pub fn centered_orthographic(width: f32, height: f32) -> Mat4 {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    Mat4::new_orthographic(-half_w, half_w, -half_h, half_h, -1.0, 1.0)
}

/// Uniform scale matrix around the origin
pub fn uniform_scale(scale: f32) -> Mat4 {
    Mat4::new_scaling(scale)
}
