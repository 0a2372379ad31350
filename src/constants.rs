// RTS Camera settings
pub const CAMERA_KEYBOARD_PAN_SPEED: f32 = 30.0;
pub const CAMERA_MOUSE_PAN_SPEED: f32 = 30.0;
pub const CAMERA_EDGE_PAN_ENABLED: bool = true;
pub const CAMERA_EDGE_PAN_SIZE: f32 = 20.0;    // Pixels from the window border that trigger edge pan
pub const CAMERA_ZOOM_SPEED: f32 = 1.0;         // Blend windows per second
pub const CAMERA_MIN_ZOOM_DISTANCE: f32 = 15.0;
pub const CAMERA_ROTATION_SPEED: f32 = 1.0;

// Rest follow offset: rotation axis, height, secondary rotation axis
pub const CAMERA_REST_OFFSET: bevy::math::Vec3 = bevy::math::Vec3::new(0.0, 40.0, 30.0);
pub const CAMERA_RIG_START: bevy::math::Vec3 = bevy::math::Vec3::ZERO;

// Scene settings
pub const GROUND_SIZE: f32 = 400.0;
pub const GROUND_HEIGHT: f32 = 0.0;
pub const WORKER_COUNT: usize = 6;
pub const WORKER_SPAWN_RADIUS: f32 = 40.0;
pub const WORKER_RADIUS: f32 = 1.5;
pub const WORKER_SPEED: f32 = 12.0;
pub const DEPOT_RADIUS: f32 = 5.0;

// Selection system settings
pub const SELECTION_RING_INNER_RADIUS: f32 = 2.0;
pub const SELECTION_RING_OUTER_RADIUS: f32 = 2.4;
pub const SELECTION_RING_COLOR: bevy::prelude::Color = bevy::prelude::Color::srgba(0.2, 0.9, 1.0, 0.7); // Cyan
pub const NAV_ARRIVAL_THRESHOLD: f32 = 0.5;       // Distance at which an agent is considered "arrived"
