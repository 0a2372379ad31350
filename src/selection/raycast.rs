// Screen point -> world hit resolution
use bevy::prelude::*;

use crate::math_utils::{ray_ground_intersection, ray_sphere_intersection};
use crate::types::{Collider, CollisionLayers, PhysicsLayers};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Resolves a screen point against the world, limited to `layers`
pub trait RayCaster {
    fn cast(&self, screen_point: Vec2, layers: PhysicsLayers) -> Option<RayHit>;
}

/// Nearest collider struck by the ray among those on `layers`
pub fn nearest_hit(
    origin: Vec3,
    direction: Vec3,
    layers: PhysicsLayers,
    colliders: impl IntoIterator<Item = (Entity, Vec3, Collider, PhysicsLayers)>,
) -> Option<RayHit> {
    colliders
        .into_iter()
        .filter(|(_, _, _, collider_layers)| collider_layers.intersects(layers))
        .filter_map(|(entity, position, collider, _)| {
            let (distance, point) = match collider {
                Collider::Sphere { radius } => ray_sphere_intersection(origin, direction, position, radius)?,
                Collider::Ground => ray_ground_intersection(origin, direction, position.y)?,
            };
            Some(RayHit { entity, point, distance })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub type ColliderItem = (
    Entity,
    &'static GlobalTransform,
    &'static Collider,
    &'static CollisionLayers,
);

/// [`RayCaster`] that projects through the RTS camera onto scene colliders
pub struct SceneRaycaster<'a, 'w, 's> {
    camera: &'a Camera,
    camera_transform: &'a GlobalTransform,
    colliders: &'a Query<'w, 's, ColliderItem>,
}

impl<'a, 'w, 's> SceneRaycaster<'a, 'w, 's> {
    pub fn new(
        camera: &'a Camera,
        camera_transform: &'a GlobalTransform,
        colliders: &'a Query<'w, 's, ColliderItem>,
    ) -> Self {
        Self { camera, camera_transform, colliders }
    }
}

impl RayCaster for SceneRaycaster<'_, '_, '_> {
    fn cast(&self, screen_point: Vec2, layers: PhysicsLayers) -> Option<RayHit> {
        let ray = self.camera.viewport_to_world(self.camera_transform, screen_point).ok()?;
        let colliders = self
            .colliders
            .iter()
            .map(|(entity, transform, collider, collider_layers)| {
                (entity, transform.translation(), *collider, collider_layers.0)
            });
        nearest_hit(ray.origin, *ray.direction, layers, colliders)
    }
}
