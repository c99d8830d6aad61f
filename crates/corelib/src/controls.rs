//! Input vocabulary: render/control/input modes and window-agnostic events.

use std::{fmt, str::FromStr};

use crate::error::CoreError;

/// How the model is shaded. The discriminant is the shader's render type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RenderMode {
    Mesh = 0,
    Plain = 1,
    Textured = 2,
    #[default]
    BumpMapped = 3,
}

impl RenderMode {
    pub fn shader_index(self) -> u32 {
        self as u32
    }

    /// Textured and bump-mapped shading sample by UV.
    pub fn requires_texture_coords(self) -> bool {
        matches!(self, RenderMode::Textured | RenderMode::BumpMapped)
    }
}

impl FromStr for RenderMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mesh" | "wire" | "wireframe" => Ok(RenderMode::Mesh),
            "plain" => Ok(RenderMode::Plain),
            "textured" | "texture" => Ok(RenderMode::Textured),
            "bump" | "bumpmapped" | "bump-mapped" => Ok(RenderMode::BumpMapped),
            other => Err(CoreError::UnknownRenderMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::Mesh => "mesh",
            RenderMode::Plain => "plain",
            RenderMode::Textured => "textured",
            RenderMode::BumpMapped => "bump",
        };
        f.write_str(name)
    }
}

/// Which object mouse input currently drives.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ControlMode {
    #[default]
    Camera,
    Model,
    Light1,
    Light2,
}

impl ControlMode {
    /// Index into the light array for the light modes.
    pub fn light_index(self) -> Option<usize> {
        match self {
            ControlMode::Light1 => Some(0),
            ControlMode::Light2 => Some(1),
            _ => None,
        }
    }
}

/// What a mouse delta does to the controlled object.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputMode {
    #[default]
    Disabled,
    Translate,
    Rotate,
    Scale,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
}

impl InputMode {
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        match (modifiers.alt, modifiers.ctrl) {
            (true, true) => InputMode::Scale,
            (true, false) => InputMode::Translate,
            (false, true) => InputMode::Rotate,
            (false, false) => InputMode::Disabled,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    Escape,
    /// Wireframe.
    Q,
    /// Plain Phong.
    W,
    /// Textured.
    E,
    /// Bump mapped.
    R,
    /// Toggle auto-rotate.
    A,
    /// Dump lighting.
    D,
    Num1,
    Num2,
    Num3,
    Num4,
    /// Any other key, including the modifiers themselves.
    Other,
}

/// Window events translated by the platform layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp,
    MouseMotion { x: i32, y: i32 },
    Wheel { delta: i32 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlFlow {
    Continue,
    Exit,
}
