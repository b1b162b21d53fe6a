use crate::Mesh;

/// Coloring of the sphere surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ColorMode {
    /// Each vertex is tinted by its own position.
    #[default]
    Rainbow,
    /// Uniform color, components in `[0, 1]`.
    Custom([f32; 3]),
}

impl ColorMode {
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::Custom([red, green, blue].map(|c| c as f32 / 255.0))
    }
}

/// Everything the core needs from whoever draws the sphere.
///
/// The core never touches the GPU itself; it pushes state through this trait
/// and asks for a frame.
pub trait RenderAdapter {
    /// Replaces the drawn geometry, returning the number of vertices to draw.
    fn upload_mesh(&mut self, mesh: &Mesh) -> u32;
    /// Model rotation, column major.
    fn set_transform(&mut self, transform: mint::ColumnMatrix4<f32>);
    /// Scales both the model and the light position.
    fn set_scale(&mut self, scale: f32);
    fn set_color(&mut self, color: ColorMode);
    fn draw_frame(&mut self);
}

/// Fixed camera looking at the origin down the negative Z axis.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: glam::Vec3,
    pub target: glam::Vec3,
    pub up: glam::Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub depth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: glam::Vec3::new(0.0, 0.0, 5.0),
            target: glam::Vec3::ZERO,
            up: glam::Vec3::Y,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            depth: 100.0,
        }
    }
}

impl Camera {
    pub fn get_view_matrix(&self) -> glam::Mat4 {
        glam::Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn get_projection_matrix(&self, aspect: f32) -> glam::Mat4 {
        glam::Mat4::perspective_rh(self.fov_y, aspect, self.near, self.depth)
    }

    pub fn get_view_projection_matrix(&self, aspect: f32) -> glam::Mat4 {
        self.get_projection_matrix(aspect) * self.get_view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_normalization() {
        assert_eq!(
            ColorMode::from_rgb8(255, 0, 51),
            ColorMode::Custom([1.0, 0.0, 0.2])
        );
    }

    #[test]
    fn test_camera_sees_origin() {
        let camera = Camera::default();
        let clip = camera.get_view_projection_matrix(1.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_unit_sphere_fits_in_view() {
        let camera = Camera::default();
        let view_proj = camera.get_view_projection_matrix(1.0);
        for point in [glam::Vec3::X, glam::Vec3::NEG_X, glam::Vec3::Y, glam::Vec3::NEG_Y] {
            let ndc = view_proj.project_point3(point);
            assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0, "{point} is clipped");
        }
    }
}
