use glam::{Mat4, Vec3};

pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Fraction of the remaining distance to the input goal applied per
/// frame; gives the smoothed orbit feel.
pub const DAMPING_FACTOR: f32 = 0.05;

pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 10.0;

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.25;

// Keep the eye off the poles so look-at stays well defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Damped orbit camera around a fixed target point.
///
/// Input mutates the goal angles/distance; `update()` moves the actual
/// pose a damped step toward the goal each frame.
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    aspect: f32,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length()).asin();

        Self {
            target,
            yaw,
            pitch,
            distance,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
            aspect,
        }
    }

    /// Apply a mouse-drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.goal_yaw -= dx * ROTATE_SPEED;
        self.goal_pitch = (self.goal_pitch + dy * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply a scroll delta in wheel lines; positive zooms in. The
    /// distance stays inside the fixed zoom bounds.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance = (self.goal_distance - lines * ZOOM_SPEED)
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advance the damping state one frame.
    pub fn update(&mut self) {
        self.yaw += (self.goal_yaw - self.yaw) * DAMPING_FACTOR;
        self.pitch += (self.goal_pitch - self.pitch) * DAMPING_FACTOR;
        self.distance += (self.goal_distance - self.distance) * DAMPING_FACTOR;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            )
    }

    pub fn view_projection(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, self.aspect, NEAR_PLANE, FAR_PLANE)
            * Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, 16.0 / 9.0)
    }

    #[test]
    fn initial_pose_reproduces_the_eye() {
        let eye = camera().eye();
        assert!((eye - Vec3::new(0.0, 1.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut cam = camera();

        cam.zoom(1000.0);
        for _ in 0..1000 {
            cam.update();
        }
        assert!((cam.eye() - cam.target).length() >= MIN_DISTANCE - 1e-3);

        cam.zoom(-1000.0);
        for _ in 0..1000 {
            cam.update();
        }
        assert!((cam.eye() - cam.target).length() <= MAX_DISTANCE + 1e-3);
    }

    #[test]
    fn damping_converges_toward_the_goal() {
        let mut cam = camera();
        cam.rotate(200.0, 0.0);

        let before = cam.yaw;
        cam.update();
        let after_one = cam.yaw;
        // One frame moves only a fraction of the way.
        assert!((after_one - before).abs() < (cam.goal_yaw - before).abs());

        for _ in 0..1000 {
            cam.update();
        }
        assert!((cam.yaw - cam.goal_yaw).abs() < 1e-3);
    }

    #[test]
    fn pitch_stays_off_the_poles() {
        let mut cam = camera();
        cam.rotate(0.0, 1e6);
        for _ in 0..1000 {
            cam.update();
        }
        assert!(cam.pitch.abs() < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn aspect_rejects_degenerate_values() {
        let mut cam = camera();
        cam.set_aspect(0.0);
        assert!(cam.aspect > 0.0);
        cam.set_aspect(2.0);
        assert!((cam.aspect - 2.0).abs() < 1e-6);
    }
}
