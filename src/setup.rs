// Demo scene: ground, light, camera rig, workers and a depot
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::capabilities::SelectionHighlight;
use crate::constants::*;
use crate::movement::NavAgent;
use crate::selection::SelectionRing;
use crate::types::*;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane, the only FLOOR collider
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.45, 0.25),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, GROUND_HEIGHT, 0.0),
        Collider::Ground,
        CollisionLayers(PhysicsLayers::FLOOR),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform {
            translation: Vec3::new(0.0, 50.0, 0.0),
            rotation: Quat::from_rotation_x(-PI / 4.0),
            ..default()
        },
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.4, 0.4, 0.6),
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    spawn_camera_rig(&mut commands);

    let ring_mesh = meshes.add(Annulus::new(SELECTION_RING_INNER_RADIUS, SELECTION_RING_OUTER_RADIUS));
    let ring_material = materials.add(StandardMaterial {
        base_color: SELECTION_RING_COLOR,
        emissive: LinearRgba::new(0.1, 0.6, 0.8, 1.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });

    let worker_mesh = meshes.add(Sphere::new(WORKER_RADIUS));
    let worker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.7, 0.3),
        ..default()
    });

    let mut rng = rand::thread_rng();
    for index in 0..WORKER_COUNT {
        let angle = rng.gen_range(0.0..(2.0 * PI));
        let radius = rng.gen_range((DEPOT_RADIUS * 2.0)..WORKER_SPAWN_RADIUS);
        let position = Vec3::new(angle.cos() * radius, GROUND_HEIGHT + WORKER_RADIUS, angle.sin() * radius);

        let ring = spawn_selection_ring(&mut commands, ring_mesh.clone(), ring_material.clone(), WORKER_RADIUS, WORKER_RADIUS);
        commands
            .spawn((
                Mesh3d(worker_mesh.clone()),
                MeshMaterial3d(worker_material.clone()),
                Transform::from_translation(position),
                Collider::Sphere { radius: WORKER_RADIUS },
                CollisionLayers(PhysicsLayers::UNITS),
                SelectionHighlight::with_ring(ring),
                NavAgent::new(WORKER_SPEED),
                Worker { index },
            ))
            .add_child(ring);
    }

    // Depot: selectable, never movable
    let ring = spawn_selection_ring(&mut commands, ring_mesh, ring_material, DEPOT_RADIUS, DEPOT_RADIUS / 2.0);
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(DEPOT_RADIUS * 1.4, DEPOT_RADIUS, DEPOT_RADIUS * 1.4))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.4, 0.4, 0.5),
                ..default()
            })),
            Transform::from_xyz(0.0, GROUND_HEIGHT + DEPOT_RADIUS / 2.0, 0.0),
            Collider::Sphere { radius: DEPOT_RADIUS },
            CollisionLayers(PhysicsLayers::STRUCTURES),
            SelectionHighlight::with_ring(ring),
            Depot,
        ))
        .add_child(ring);

    info!("Demo scene ready: {} workers and a depot", WORKER_COUNT);
}

/// Rig on the ground plane plus the camera that follows it
fn spawn_camera_rig(commands: &mut Commands) -> Entity {
    let rig = commands
        .spawn((
            Transform::from_translation(CAMERA_RIG_START),
            RigVelocity::default(),
            CameraRig { camera: None },
        ))
        .id();

    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(CAMERA_RIG_START + CAMERA_REST_OFFSET)
                .looking_at(CAMERA_RIG_START, Vec3::Y),
            RtsCamera { target: rig },
            FollowOffset(CAMERA_REST_OFFSET),
        ))
        .id();

    commands.entity(rig).insert(CameraRig { camera: Some(camera) });
    rig
}

/// Hidden ring laid flat under a unit, scaled to the unit's footprint.
/// `height` is how far the unit's origin sits above the ground.
fn spawn_selection_ring(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    unit_radius: f32,
    height: f32,
) -> Entity {
    let scale = unit_radius / WORKER_RADIUS;
    // Rotate -90 degrees around X to lay flat (circle faces up instead of forward)
    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, 0.1 - height, 0.0)
                .with_rotation(Quat::from_rotation_x(-PI / 2.0))
                .with_scale(Vec3::splat(scale)),
            Visibility::Hidden,
            SelectionRing,
        ))
        .id()
}
