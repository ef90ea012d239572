use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Orthographic 2D camera. `position` is the world point shown at the
/// centre of the viewport.
///
/// With `y_down` the projection matches screen conventions (origin top-left,
/// y grows downward), which is how the game lays out its canvas.
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
    pub viewport: (u32, u32),
    pub y_down: bool,
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            viewport: (viewport_width, viewport_height),
            y_down: false,
        }
    }

    /// Camera that shows exactly the `width`×`height` canvas with (0, 0) at
    /// the top-left corner.
    pub fn screen_space(width: u32, height: u32) -> Self {
        Self {
            position: Vec2::new(width as f32 * 0.5, height as f32 * 0.5),
            zoom: 1.0,
            viewport: (width, height),
            y_down: true,
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let half_w = (self.viewport.0 as f32) / (2.0 * self.zoom);
        let half_h = (self.viewport.1 as f32) / (2.0 * self.zoom);

        let (bottom, top) = if self.y_down {
            (self.position.y + half_h, self.position.y - half_h)
        } else {
            (self.position.y - half_h, self.position.y + half_h)
        };

        let proj = Mat4::orthographic_rh(
            self.position.x - half_w,
            self.position.x + half_w,
            bottom,
            top,
            -1.0,
            1.0,
        );

        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn project(camera: &Camera2D, x: f32, y: f32) -> Vec3 {
        Mat4::from_cols_array_2d(&camera.build_uniform().view_proj)
            .project_point3(Vec3::new(x, y, 0.0))
    }

    #[test]
    fn screen_space_maps_top_left_to_ndc_top_left() {
        let camera = Camera2D::screen_space(1024, 768);
        let p = project(&camera, 0.0, 0.0);
        assert!((p.x + 1.0).abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn screen_space_maps_bottom_right_to_ndc_bottom_right() {
        let camera = Camera2D::screen_space(1024, 768);
        let p = project(&camera, 1024.0, 768.0);
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn y_up_camera_keeps_world_up() {
        let camera = Camera2D::new(200, 100);
        let p = project(&camera, 0.0, 50.0);
        assert!((p.y - 1.0).abs() < 1e-5);
    }
}
