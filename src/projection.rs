use egui::{Pos2, Rect, pos2};
use glam::{Quat, Vec3};

/// Points closer to the camera than this are not drawn
const NEAR_PLANE: f32 = 0.01;

/// A viewpoint that can cast a ray through any screen position.
pub trait ViewFrame {
    /// World-space origin of every ray
    fn origin(&self) -> Vec3;

    /// World-space direction of the ray through `screen_pos`.
    /// Need not be normalised; a zero vector means no ray exists.
    fn ray_direction(&self, screen_pos: Pos2) -> Vec3;
}

/// `origin + direction * standoff`
pub fn project_point(origin: Vec3, direction: Vec3, standoff: f32) -> Vec3 {
    origin + direction * standoff
}

/// Places screen positions on the surface at a fixed distance along each pixel's ray.
///
/// There is no hit-testing against real geometry: a stroke only gains depth
/// when the viewpoint moves while it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    standoff: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self { standoff: 0.5 }
    }
}

impl Projector {
    pub fn new(standoff: f32) -> Self {
        Self { standoff }
    }

    pub fn standoff(&self) -> f32 {
        self.standoff
    }

    /// Project `screen_pos` into the world. Returns `None` when the frame has
    /// no usable ray there or the result is not finite.
    pub fn project(&self, screen_pos: Pos2, frame: &dyn ViewFrame) -> Option<Vec3> {
        let direction = frame.ray_direction(screen_pos).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        let point = project_point(frame.origin(), direction, self.standoff);
        point.is_finite().then_some(point)
    }
}

/// Pinhole camera looking down its local -Z axis, with +Y up.
///
/// Screen positions use egui conventions: origin at the top-left of `viewport`,
/// y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub vertical_fov: f32,
    pub viewport: Rect,
}

impl PerspectiveCamera {
    pub fn new(viewport: Rect) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            vertical_fov: 60f32.to_radians(),
            viewport,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Rotate around the world up axis
    pub fn yaw(&mut self, radians: f32) {
        self.rotation = (Quat::from_rotation_y(radians) * self.rotation).normalize();
    }

    /// Move by `delta` expressed in the camera's own axes
    pub fn move_local(&mut self, delta: Vec3) {
        self.position += self.rotation * delta;
    }

    fn aspect(&self) -> f32 {
        self.viewport.width() / self.viewport.height()
    }

    fn tan_half_fov(&self) -> f32 {
        (self.vertical_fov * 0.5).tan()
    }

    fn to_ndc(&self, screen_pos: Pos2) -> (f32, f32) {
        let r = self.viewport;
        let x = (screen_pos.x - r.min.x) / r.width() * 2.0 - 1.0;
        let y = 1.0 - (screen_pos.y - r.min.y) / r.height() * 2.0;
        (x, y)
    }

    fn from_ndc(&self, x: f32, y: f32) -> Pos2 {
        let r = self.viewport;
        pos2(
            r.min.x + (x + 1.0) * 0.5 * r.width(),
            r.min.y + (1.0 - y) * 0.5 * r.height(),
        )
    }

    /// Distance in front of the camera, if `point` is past the near plane
    fn depth_of(&self, point: Vec3) -> Option<(Vec3, f32)> {
        let local = self.rotation.inverse() * (point - self.position);
        let depth = -local.z;
        (depth > NEAR_PLANE).then_some((local, depth))
    }

    /// Screen position of a world point, or `None` if it is behind the camera
    pub fn world_to_screen(&self, point: Vec3) -> Option<Pos2> {
        let (local, depth) = self.depth_of(point)?;
        let tan_half = self.tan_half_fov();
        let x = local.x / (depth * tan_half * self.aspect());
        let y = local.y / (depth * tan_half);
        let screen = self.from_ndc(x, y);
        (screen.x.is_finite() && screen.y.is_finite()).then_some(screen)
    }

    /// On-screen size in pixels of a world-space width located at `point`
    pub fn world_width_to_pixels(&self, width: f32, point: Vec3) -> Option<f32> {
        let (_, depth) = self.depth_of(point)?;
        let pixels = width / depth * (self.viewport.height() * 0.5) / self.tan_half_fov();
        pixels.is_finite().then_some(pixels)
    }
}

impl ViewFrame for PerspectiveCamera {
    fn origin(&self) -> Vec3 {
        self.position
    }

    fn ray_direction(&self, screen_pos: Pos2) -> Vec3 {
        if self.viewport.width() <= 0.0 || self.viewport.height() <= 0.0 {
            return Vec3::ZERO;
        }
        let (x, y) = self.to_ndc(screen_pos);
        let tan_half = self.tan_half_fov();
        let local = Vec3::new(x * tan_half * self.aspect(), y * tan_half, -1.0);
        self.rotation * local
    }
}
