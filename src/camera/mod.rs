// Camera module - RTS camera rig with eased zoom and rotation
//
// Submodules:
// - rig: CameraRigController and its Blend easing state machine
// - systems: ECS wiring (controller attachment, velocity integration, follow camera)

mod rig;
mod systems;

pub use rig::{Blend, CameraRigController};
pub use systems::{
    attach_rig_controllers,
    camera_rig_system,
    follow_rig_system,
    integrate_rig_velocity,
    rig_follow_offset,
};
