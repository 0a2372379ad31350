// Camera rig systems
use bevy::prelude::*;

use crate::config::RtsConfig;
use crate::errors::RigWiringError;
use crate::input::InputSnapshot;
use crate::types::{CameraRig, FollowOffset, RigVelocity, RtsCamera};

use super::rig::CameraRigController;

/// Resolve the follow offset a rig controls
pub fn rig_follow_offset(
    rig_entity: Entity,
    rig: &CameraRig,
    offsets: &Query<&FollowOffset>,
) -> Result<Vec3, RigWiringError> {
    let camera = rig.camera.ok_or(RigWiringError::MissingCamera { rig: rig_entity })?;
    offsets
        .get(camera)
        .map(|offset| offset.0)
        .map_err(|_| RigWiringError::MissingFollowOffset { rig: rig_entity, camera })
}

/// System: Give every new rig its controller, capturing the rest offset once
pub fn attach_rig_controllers(
    mut commands: Commands,
    config: Res<RtsConfig>,
    rig_query: Query<(Entity, &CameraRig), Without<CameraRigController>>,
    offsets: Query<&FollowOffset>,
) {
    for (rig_entity, rig) in rig_query.iter() {
        let follow_offset = rig_follow_offset(rig_entity, rig, &offsets);
        if let Ok(rest) = follow_offset {
            info!("Camera rig {} attached, rest offset {:?}", rig_entity, rest);
        }
        commands
            .entity(rig_entity)
            .insert(CameraRigController::new(config.camera.clone(), follow_offset));
    }
}

/// System: Drive every rig from the input snapshot
pub fn camera_rig_system(
    snapshot: Res<InputSnapshot>,
    mut rig_query: Query<(&CameraRig, &mut CameraRigController, &mut RigVelocity)>,
    mut offsets: Query<&mut FollowOffset>,
) {
    for (rig, mut controller, mut velocity) in rig_query.iter_mut() {
        let mut follow = rig.camera.and_then(|camera| offsets.get_mut(camera).ok());
        let offset = follow.as_mut().map(|follow| &mut follow.0);
        velocity.0 = controller.update(&snapshot, offset);
    }
}

/// System: Integrate rig velocity into its position, like a kinematic body
pub fn integrate_rig_velocity(
    time: Res<Time>,
    mut rig_query: Query<(&mut Transform, &RigVelocity), With<CameraRig>>,
) {
    let delta_time = time.delta_secs();
    for (mut transform, velocity) in rig_query.iter_mut() {
        transform.translation += velocity.0 * delta_time;
    }
}

/// System: Place follow cameras at rig + offset, looking at the rig
pub fn follow_rig_system(
    mut camera_query: Query<(&RtsCamera, &FollowOffset, &mut Transform)>,
    rig_query: Query<&Transform, (With<CameraRig>, Without<RtsCamera>)>,
) {
    for (camera, offset, mut transform) in camera_query.iter_mut() {
        let Ok(rig_transform) = rig_query.get(camera.target) else { continue };
        let focus_point = rig_transform.translation;
        transform.translation = focus_point + offset.0;
        transform.look_at(focus_point, Vec3::Y);
    }
}
