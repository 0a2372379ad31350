use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Ray cast categories
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PhysicsLayers: u32 {
        const FLOOR = 1 << 0;
        const UNITS = 1 << 1;
        const STRUCTURES = 1 << 2;
    }
}

/// Layers an entity's collider belongs to
#[derive(Component, Clone, Copy, Debug)]
pub struct CollisionLayers(pub PhysicsLayers);

/// Analytic collider shapes the scene ray caster understands
#[derive(Component, Clone, Copy, Debug)]
pub enum Collider {
    Sphere { radius: f32 },
    /// Infinite horizontal plane at the entity's height
    Ground,
}

/// The ground-plane target the camera follows. Pan moves this entity.
#[derive(Component)]
pub struct CameraRig {
    pub camera: Option<Entity>,
}

/// Planar velocity handed to the rig body each tick
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct RigVelocity(pub Vec3);

/// Camera position relative to the rig it follows
#[derive(Component, Clone, Copy, Debug)]
pub struct FollowOffset(pub Vec3);

/// Camera that follows a rig; the selection ray caster projects through it
#[derive(Component)]
pub struct RtsCamera {
    pub target: Entity,
}

#[derive(Component)]
pub struct Worker {
    pub index: usize,
}

#[derive(Component)]
pub struct Depot;
