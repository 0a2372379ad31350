// Camera rig controller: planar pan, eased zoom and eased rotation
use bevy::prelude::*;

use crate::config::CameraConfig;
use crate::errors::RigWiringError;
use crate::input::{ControlKey, InputSnapshot};
use crate::math_utils::{clamp01, slerp};

/// Easing progress toward the current target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Blend {
    /// Target reached; the blend factor stays at 1
    Resting,
    Transitioning { elapsed: f32 },
}

impl Blend {
    /// Advance one tick and return the blend factor.
    ///
    /// `restart` marks a key edge on this tick: elapsed time starts over at
    /// zero. The factor is `clamp01(elapsed * speed)`.
    pub fn advance(&mut self, restart: bool, delta: f32, speed: f32) -> f32 {
        let elapsed = match *self {
            _ if restart => 0.0,
            Blend::Resting => return 1.0,
            Blend::Transitioning { elapsed } => elapsed + delta,
        };

        let factor = clamp01(elapsed * speed);
        *self = if factor >= 1.0 {
            Blend::Resting
        } else {
            Blend::Transitioning { elapsed }
        };
        factor
    }
}

#[derive(Debug, Clone)]
struct OffsetEasing {
    rest: Vec3,
    max_rotation: f32,
    zoom: Blend,
    rotation: Blend,
}

impl OffsetEasing {
    fn zoom_target(&self, config: &CameraConfig, input: &InputSnapshot, current: Vec3) -> Vec3 {
        let height = if input.pressed(ControlKey::Zoom) {
            config.min_zoom_distance
        } else {
            self.rest.y
        };
        Vec3::new(current.x, height, current.z)
    }

    fn rotation_target(&self, input: &InputSnapshot, current: Vec3) -> Vec3 {
        if input.pressed(ControlKey::RotateLeft) {
            Vec3::new(self.max_rotation, current.y, 0.0)
        } else if input.pressed(ControlKey::RotateRight) {
            Vec3::new(-self.max_rotation, current.y, 0.0)
        } else {
            Vec3::new(self.rest.x, current.y, self.rest.z)
        }
    }
}

/// Per-rig controller state, inserted once the rig's wiring is known
#[derive(Component, Debug, Clone)]
pub struct CameraRigController {
    config: CameraConfig,
    easing: Option<OffsetEasing>,
}

impl CameraRigController {
    /// Capture the rest offset. A wiring fault is logged here, once, and
    /// leaves zoom and rotation disabled.
    pub fn new(config: CameraConfig, follow_offset: Result<Vec3, RigWiringError>) -> Self {
        let easing = match follow_offset {
            Ok(rest) => Some(OffsetEasing {
                rest,
                max_rotation: rest.z.abs(),
                zoom: Blend::Resting,
                rotation: Blend::Resting,
            }),
            Err(err) => {
                error!("{}. Zoom and rotation will not work", err);
                None
            }
        };

        Self { config, easing }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// True when zoom and rotation are disabled by a wiring fault
    pub fn is_degraded(&self) -> bool {
        self.easing.is_none()
    }

    pub fn rest_offset(&self) -> Option<Vec3> {
        self.easing.as_ref().map(|easing| easing.rest)
    }

    pub fn max_rotation(&self) -> Option<f32> {
        self.easing.as_ref().map(|easing| easing.max_rotation)
    }

    /// Run one tick. Returns the rig's planar velocity and eases `offset`
    /// when the rig is wired to one.
    pub fn update(&mut self, input: &InputSnapshot, offset: Option<&mut Vec3>) -> Vec3 {
        if let Some(offset) = offset {
            self.update_offset(input, offset);
        }
        self.pan_velocity(input)
    }

    /// Combined keyboard and edge pan as a world-space velocity.
    /// Screen "up" maps to world -Z.
    pub fn pan_velocity(&self, input: &InputSnapshot) -> Vec3 {
        let move_amount = self.keyboard_move_amount(input) + self.edge_move_amount(input);
        Vec3::new(move_amount.x, 0.0, -move_amount.y)
    }

    pub fn keyboard_move_amount(&self, input: &InputSnapshot) -> Vec2 {
        let speed = self.config.keyboard_pan_speed;
        let mut move_amount = Vec2::ZERO;

        if input.pressed(ControlKey::Up) {
            move_amount.y += speed;
        }
        if input.pressed(ControlKey::Left) {
            move_amount.x -= speed;
        }
        if input.pressed(ControlKey::Right) {
            move_amount.x += speed;
        }
        if input.pressed(ControlKey::Down) {
            move_amount.y -= speed;
        }
        move_amount
    }

    /// Pan contribution of a pointer near the window border (y grows downward)
    pub fn edge_move_amount(&self, input: &InputSnapshot) -> Vec2 {
        let mut move_amount = Vec2::ZERO;
        if !self.config.enable_edge_pan || input.screen_size.min_element() <= 0.0 {
            return move_amount;
        }

        let speed = self.config.mouse_pan_speed;
        let edge = self.config.edge_pan_size;
        let pointer = input.pointer;
        let screen = input.screen_size;

        if pointer.x <= edge {
            move_amount.x -= speed;
        }
        if pointer.y <= edge {
            move_amount.y += speed;
        }
        if pointer.x >= screen.x - edge {
            move_amount.x += speed;
        }
        if pointer.y >= screen.y - edge {
            move_amount.y -= speed;
        }
        move_amount
    }

    /// Zoom target for the current key state, or None when degraded
    pub fn zoom_target(&self, input: &InputSnapshot, current: Vec3) -> Option<Vec3> {
        let easing = self.easing.as_ref()?;
        Some(easing.zoom_target(&self.config, input, current))
    }

    /// Rotation target for the current key state, or None when degraded.
    /// Rotate-left wins when both keys are held.
    pub fn rotation_target(&self, input: &InputSnapshot, current: Vec3) -> Option<Vec3> {
        let easing = self.easing.as_ref()?;
        Some(easing.rotation_target(input, current))
    }

    /// Ease the follow offset: zoom first, then rotation
    pub fn update_offset(&mut self, input: &InputSnapshot, offset: &mut Vec3) {
        let Some(easing) = self.easing.as_mut() else { return };

        let zoom_edge = input.key(ControlKey::Zoom).changed();
        let zoom_factor = easing.zoom.advance(zoom_edge, input.delta, self.config.zoom_speed);
        let zoom_target = easing.zoom_target(&self.config, input, *offset);
        *offset = slerp(*offset, zoom_target, zoom_factor);

        let rotation_edge = input.key(ControlKey::RotateLeft).changed()
            || input.key(ControlKey::RotateRight).changed();
        let rotation_factor =
            easing.rotation.advance(rotation_edge, input.delta, self.config.rotation_speed);
        let rotation_target = easing.rotation_target(input, *offset);
        *offset = slerp(*offset, rotation_target, rotation_factor);
    }
}
