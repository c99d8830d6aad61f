//! Viewer state: camera, model, lights and the modes that route input to them.
//!
//! Everything the render loop needs each frame lives here and is passed to
//! the renderer by reference; nothing is kept in window-level globals.

use crate::{
    Mat3, Mat4, Vec3,
    camera::{Camera, aspect_ratio},
    controls::{ControlFlow, ControlMode, InputEvent, InputMode, Key, RenderMode},
    lighting::Lighting,
    transform::Transform,
    uniforms::{self, PhongUniforms},
};

/// Mouse step while steering the camera.
const CAMERA_STEP: f32 = 2.5;
/// Mouse step for the model and lights.
const OBJECT_STEP: f32 = 0.2;
const CAMERA_ROTATE_FACTOR: f32 = 0.05;
const AMBIENT_FACTOR: f32 = 0.01;

const ORBIT_STEP: f32 = 0.02;
const ORBIT_RESET: f32 = 360.5;
const ORBIT_DISTANCES: [f32; 2] = [6.5, 7.5];
const CAMERA_SPIN: f32 = 0.008;
const CAMERA_SPIN_RESET: f32 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelState {
    pub transform: Transform,
    pub color: Vec3,
}

impl Default for ModelState {
    fn default() -> Self {
        Self {
            transform: Transform::from_trs(Vec3::ZERO, Vec3::ZERO, Vec3::splat(2.0)),
            color: Vec3::new(0.5, 0.2, 0.2),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Viewer {
    pub camera: Camera,
    pub model: ModelState,
    pub lighting: Lighting,
    /// Scale of the marker meshes drawn at each light.
    pub light_scale: Vec3,
    render_mode: RenderMode,
    control_mode: ControlMode,
    input_mode: InputMode,
    auto_rotate: bool,
    orbit_angle: f32,
    last_mouse: (i32, i32),
    has_texture_coords: bool,
}

impl Viewer {
    pub fn new(has_texture_coords: bool, width: u32, height: u32) -> Self {
        let mut viewer = Self {
            camera: Camera::new(width, height),
            model: ModelState::default(),
            lighting: Lighting::default(),
            light_scale: Vec3::splat(0.5),
            render_mode: RenderMode::default(),
            control_mode: ControlMode::default(),
            input_mode: InputMode::default(),
            auto_rotate: true,
            orbit_angle: 0.0,
            last_mouse: (0, 0),
            has_texture_coords,
        };
        viewer.set_render_mode(RenderMode::default());
        viewer
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Switch shading; modes that sample textures fall back to plain
    /// shading on meshes without UVs. Returns the mode actually applied.
    pub fn set_render_mode(&mut self, mode: RenderMode) -> RenderMode {
        self.render_mode = if mode.requires_texture_coords() && !self.has_texture_coords {
            log::warn!("Mesh has no texture coordinates, using plain shading instead of {mode}");
            RenderMode::Plain
        } else {
            mode
        };
        self.render_mode
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = aspect_ratio(width, height);
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> ControlFlow {
        let step = if self.control_mode == ControlMode::Camera {
            CAMERA_STEP
        } else {
            OBJECT_STEP
        };
        let mut delta = Vec3::ZERO;

        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                if self.handle_key(key) == ControlFlow::Exit {
                    return ControlFlow::Exit;
                }
                self.input_mode = InputMode::from_modifiers(modifiers);
            }
            InputEvent::KeyUp => self.input_mode = InputMode::Disabled,
            InputEvent::MouseMotion { x, y } => {
                let (last_x, last_y) = self.last_mouse;
                // Screen y grows downward; moving up is positive.
                delta.x = step_towards(x, last_x, step);
                delta.y = step_towards(y, last_y, step);
                self.last_mouse = (x, y);
            }
            InputEvent::Wheel { delta: wheel } => {
                delta.z = wheel.signum() as f32 * step;
            }
        }

        if delta != Vec3::ZERO {
            self.apply_delta(delta);
        }
        ControlFlow::Continue
    }

    fn handle_key(&mut self, key: Key) -> ControlFlow {
        match key {
            Key::Escape => return ControlFlow::Exit,
            Key::D => log::info!("{}", self.lighting),
            Key::Q => {
                self.set_render_mode(RenderMode::Mesh);
            }
            Key::W => {
                self.set_render_mode(RenderMode::Plain);
            }
            Key::E => {
                self.set_render_mode(RenderMode::Textured);
            }
            Key::R => {
                self.set_render_mode(RenderMode::BumpMapped);
            }
            Key::A => self.auto_rotate = !self.auto_rotate,
            Key::Num1 => self.control_mode = ControlMode::Camera,
            Key::Num2 => self.control_mode = ControlMode::Model,
            Key::Num3 => self.control_mode = ControlMode::Light1,
            Key::Num4 => self.control_mode = ControlMode::Light2,
            Key::Other => {}
        }
        ControlFlow::Continue
    }

    fn apply_delta(&mut self, delta: Vec3) {
        let (lo, hi) = Lighting::PRODUCT_RANGE;
        match (self.control_mode, self.input_mode) {
            (_, InputMode::Disabled) => {}
            (ControlMode::Camera, InputMode::Translate) => self.camera.position.x += delta.x,
            (ControlMode::Camera, InputMode::Rotate) => {
                self.camera.rotation += delta * CAMERA_ROTATE_FACTOR;
            }
            (ControlMode::Camera, InputMode::Scale) => {
                let (min, max) = Lighting::AMBIENT_RANGE;
                self.lighting.ambient =
                    (self.lighting.ambient + delta.z * AMBIENT_FACTOR).clamp(min, max);
            }
            (ControlMode::Model, InputMode::Translate) => self.model.transform.translation += delta,
            (ControlMode::Model, InputMode::Rotate) => self.model.transform.rotation_euler += delta,
            (ControlMode::Model, InputMode::Scale) => {
                self.model.color = (self.model.color + delta).clamp(Vec3::ZERO, Vec3::ONE);
            }
            (mode @ (ControlMode::Light1 | ControlMode::Light2), input) => {
                let Some(index) = mode.light_index() else {
                    return;
                };
                if input == InputMode::Scale {
                    let (min, max) = Lighting::SHINE_RANGE;
                    self.lighting.shine = (self.lighting.shine + delta.z).clamp(min, max);
                }
                let light = &mut self.lighting.lights[index];
                match input {
                    InputMode::Translate => light.position += delta,
                    InputMode::Rotate => light.color = (light.color + delta).clamp(Vec3::ZERO, Vec3::ONE),
                    InputMode::Scale => {
                        light.diffuse = (light.diffuse + delta.y).clamp(lo, hi);
                        light.specular = (light.specular + delta.x).clamp(lo, hi);
                    }
                    InputMode::Disabled => {}
                }
            }
        }
    }

    /// Advance the auto-rotate animation by one frame: both lights orbit
    /// the origin and the camera spins slowly about Y.
    pub fn tick(&mut self) {
        if !self.auto_rotate {
            return;
        }

        self.orbit_angle += ORBIT_STEP;
        let (s, c) = self.orbit_angle.sin_cos();
        self.lighting.lights[0].position = Vec3::new(s, c, s) * ORBIT_DISTANCES[0];
        self.lighting.lights[1].position = Vec3::new(c, s, c) * ORBIT_DISTANCES[1];
        if self.orbit_angle > ORBIT_RESET {
            self.orbit_angle = 0.0;
        }

        self.camera.rotation.y += CAMERA_SPIN;
        if self.camera.rotation.y > CAMERA_SPIN_RESET {
            self.camera.rotation.y = 0.0;
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model.transform.matrix()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.proj()
    }

    /// Inverse-transpose of the upper 3x3 of view * model.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.view_matrix() * self.model_matrix())
            .inverse()
            .transpose()
    }

    /// Placement of the marker mesh for light `index` (0 or 1).
    pub fn light_model_matrix(&self, index: usize) -> Option<Mat4> {
        let light = self.lighting.lights.get(index)?;
        Some(Mat4::from_translation(light.position) * Mat4::from_scale(self.light_scale))
    }

    pub fn uniforms(&self) -> PhongUniforms {
        let model = self.model_matrix();
        let view = self.view_matrix();
        let [l0, l1] = self.lighting.lights;

        PhongUniforms {
            mvp: uniforms::mat4(self.projection_matrix() * view * model),
            model: uniforms::mat4(model),
            view: uniforms::mat4(view),
            normal: uniforms::mat3_padded(self.normal_matrix()),
            model_color: uniforms::vec3_padded(self.model.color),
            light_positions: [
                uniforms::vec3_padded(l0.position),
                uniforms::vec3_padded(l1.position),
            ],
            light_colors: [
                uniforms::vec3_padded(l0.color),
                uniforms::vec3_padded(l1.color),
            ],
            ambient: self.lighting.ambient,
            shine: self.lighting.shine,
            render_type: self.render_mode.shader_index(),
            _pad: 0,
            diffuse: [
                uniforms::scalar_padded(l0.diffuse),
                uniforms::scalar_padded(l1.diffuse),
            ],
            specular: [
                uniforms::scalar_padded(l0.specular),
                uniforms::scalar_padded(l1.specular),
            ],
        }
    }
}

/// `+step` when the pointer moved toward smaller coordinates, `-step` when
/// it moved toward larger ones, zero otherwise.
fn step_towards(current: i32, last: i32, step: f32) -> f32 {
    match current.cmp(&last) {
        std::cmp::Ordering::Less => step,
        std::cmp::Ordering::Greater => -step,
        std::cmp::Ordering::Equal => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Modifiers;

    const CTRL: Modifiers = Modifiers {
        alt: false,
        ctrl: true,
    };
    const ALT: Modifiers = Modifiers {
        alt: true,
        ctrl: false,
    };
    const BOTH: Modifiers = Modifiers {
        alt: true,
        ctrl: true,
    };

    fn key(viewer: &mut Viewer, key: Key, modifiers: Modifiers) -> ControlFlow {
        viewer.handle_event(&InputEvent::KeyDown { key, modifiers })
    }

    #[test]
    fn escape_exits() {
        let mut viewer = Viewer::new(true, 800, 600);
        assert_eq!(key(&mut viewer, Key::Escape, Modifiers::default()), ControlFlow::Exit);
        assert_eq!(key(&mut viewer, Key::W, Modifiers::default()), ControlFlow::Continue);
    }

    #[test]
    fn textured_modes_need_uvs() {
        let mut viewer = Viewer::new(false, 800, 600);
        assert_eq!(viewer.render_mode(), RenderMode::Plain);
        key(&mut viewer, Key::E, Modifiers::default());
        assert_eq!(viewer.render_mode(), RenderMode::Plain);
        key(&mut viewer, Key::Q, Modifiers::default());
        assert_eq!(viewer.render_mode(), RenderMode::Mesh);

        let mut viewer = Viewer::new(true, 800, 600);
        assert_eq!(viewer.render_mode(), RenderMode::BumpMapped);
        key(&mut viewer, Key::E, Modifiers::default());
        assert_eq!(viewer.render_mode(), RenderMode::Textured);
    }

    #[test]
    fn modifiers_select_input_mode() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Other, BOTH);
        assert_eq!(viewer.input_mode(), InputMode::Scale);
        key(&mut viewer, Key::Other, ALT);
        assert_eq!(viewer.input_mode(), InputMode::Translate);
        key(&mut viewer, Key::Other, CTRL);
        assert_eq!(viewer.input_mode(), InputMode::Rotate);
        viewer.handle_event(&InputEvent::KeyUp);
        assert_eq!(viewer.input_mode(), InputMode::Disabled);
    }

    #[test]
    fn camera_translate_moves_only_x() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Other, ALT);
        viewer.handle_event(&InputEvent::MouseMotion { x: 10, y: 10 });
        // Moved right and down from (0, 0): x delta is -2.5.
        assert_eq!(viewer.camera.position, Vec3::new(-2.5, 0.0, -20.0));
    }

    #[test]
    fn model_translate_uses_object_step() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Num2, ALT);
        viewer.handle_event(&InputEvent::MouseMotion { x: -5, y: -5 });
        viewer.handle_event(&InputEvent::Wheel { delta: -1 });
        let t = viewer.model.transform.translation;
        assert!((t - Vec3::new(0.2, 0.2, -0.2)).abs().max_element() < 1e-6);
    }

    #[test]
    fn model_colour_is_clamped() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Num2, BOTH);
        for i in 1..=10 {
            viewer.handle_event(&InputEvent::MouseMotion { x: -i, y: -i });
        }
        assert_eq!(viewer.model.color.x, 1.0);
        assert_eq!(viewer.model.color.y, 1.0);
    }

    #[test]
    fn light_scale_adjusts_products() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Num4, BOTH);
        viewer.handle_event(&InputEvent::Wheel { delta: 1 });
        viewer.handle_event(&InputEvent::MouseMotion { x: 3, y: -3 });

        let lighting = viewer.lighting;
        assert!((lighting.shine - 2.0).abs() < 1e-6);
        assert!((lighting.lights[1].diffuse - 2.8).abs() < 1e-6);
        assert!((lighting.lights[1].specular - 7.8).abs() < 1e-6);
        assert_eq!(lighting.lights[0], Lighting::default().lights[0]);
    }

    #[test]
    fn ambient_is_clamped() {
        let mut viewer = Viewer::new(true, 800, 600);
        key(&mut viewer, Key::Other, BOTH);
        for _ in 0..20 {
            viewer.handle_event(&InputEvent::Wheel { delta: -1 });
        }
        assert_eq!(viewer.lighting.ambient, 0.0);
    }

    #[test]
    fn tick_orbits_lights() {
        let mut viewer = Viewer::new(true, 800, 600);
        viewer.tick();
        let p0 = viewer.lighting.lights[0].position;
        let p1 = viewer.lighting.lights[1].position;
        assert!((p0.length() - 6.5 * (1.0 + 0.02f32.sin().powi(2)).sqrt()).abs() < 1e-4);
        assert!((p1.x - 0.02f32.cos() * 7.5).abs() < 1e-5);
        assert!((viewer.camera.rotation.y - 0.008).abs() < 1e-6);

        key(&mut viewer, Key::A, Modifiers::default());
        assert!(!viewer.auto_rotate());
        viewer.tick();
        assert_eq!(viewer.lighting.lights[0].position, p0);
    }

    #[test]
    fn uniforms_reflect_state() {
        let viewer = Viewer::new(true, 800, 600);
        let u = viewer.uniforms();
        assert_eq!(u.render_type, RenderMode::BumpMapped.shader_index());
        assert_eq!(u.model_color, [0.5, 0.2, 0.2, 0.0]);
        assert_eq!(u.diffuse, [[2.6, 0.0, 0.0, 0.0]; 2]);
        assert_eq!(u.as_bytes().len() % 16, 0);
        assert!(u.mvp.iter().flatten().all(|f| f.is_finite()));
    }

    #[test]
    fn resize_updates_projection_aspect() {
        let mut viewer = Viewer::new(false, 800, 600);
        viewer.resize(1920, 1080);
        assert!((viewer.camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        let p = viewer.projection_matrix();
        assert!((p.y_axis.y / p.x_axis.x - 16.0 / 9.0).abs() < 1e-4);

        viewer.resize(0, 0);
        assert_eq!(viewer.camera.aspect, 1.0);
    }

    #[test]
    fn light_markers() {
        let viewer = Viewer::new(true, 800, 600);
        let m = viewer.light_model_matrix(0).expect("light 0");
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 7.0, 0.0));
        assert!(viewer.light_model_matrix(2).is_none());
    }
}
