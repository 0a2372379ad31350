// Per-tick input snapshot shared by the camera and selection controllers
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Logical keys the controllers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum ControlKey {
    Up,
    Down,
    Left,
    Right,
    Zoom,
    RotateLeft,
    RotateRight,
    MoveCommand,
}

impl ControlKey {
    fn index(self) -> usize {
        self as usize
    }
}

/// Held state plus the one-tick edges of a key or button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ButtonState {
    pub const HELD: Self = Self { pressed: true, just_pressed: false, just_released: false };
    pub const PRESSED_THIS_TICK: Self = Self { pressed: true, just_pressed: true, just_released: false };
    pub const RELEASED_THIS_TICK: Self = Self { pressed: false, just_pressed: false, just_released: true };

    /// True on either edge
    pub fn changed(&self) -> bool {
        self.just_pressed || self.just_released
    }
}

/// Everything the controllers may read in one tick.
///
/// Pointer coordinates are window logical pixels with the origin at the
/// top-left corner, y growing downwards.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    keys: [ButtonState; ControlKey::COUNT],
    pub pointer: Vec2,
    pub button: ButtonState,
    pub screen_size: Vec2,
    /// Tick duration in seconds
    pub delta: f32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            keys: [ButtonState::default(); ControlKey::COUNT],
            pointer: Vec2::ZERO,
            button: ButtonState::default(),
            screen_size: Vec2::ZERO,
            delta: 0.0,
        }
    }
}

impl InputSnapshot {
    pub fn new(screen_size: Vec2, delta: f32) -> Self {
        Self { screen_size, delta, ..default() }
    }

    pub fn key(&self, key: ControlKey) -> ButtonState {
        self.keys[key.index()]
    }

    pub fn set_key(&mut self, key: ControlKey, state: ButtonState) {
        self.keys[key.index()] = state;
    }

    pub fn with_key(mut self, key: ControlKey, state: ButtonState) -> Self {
        self.set_key(key, state);
        self
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_button(mut self, button: ButtonState) -> Self {
        self.button = button;
        self
    }

    pub fn pressed(&self, key: ControlKey) -> bool {
        self.key(key).pressed
    }
}

/// Physical bindings for each logical key
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub keys: HashMap<ControlKey, Vec<KeyCode>>,
    pub pointer_button: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = ControlKey::iter()
            .map(|key| {
                let codes = match key {
                    ControlKey::Up => vec![KeyCode::ArrowUp],
                    ControlKey::Down => vec![KeyCode::ArrowDown],
                    ControlKey::Left => vec![KeyCode::ArrowLeft],
                    ControlKey::Right => vec![KeyCode::ArrowRight],
                    ControlKey::Zoom => vec![KeyCode::KeyZ],
                    ControlKey::RotateLeft => vec![KeyCode::KeyQ],
                    ControlKey::RotateRight => vec![KeyCode::KeyE],
                    ControlKey::MoveCommand => vec![KeyCode::KeyM],
                };
                (key, codes)
            })
            .collect();

        Self { keys, pointer_button: MouseButton::Left }
    }
}

impl KeyBindings {
    /// Fold the bound physical keys into one logical state. Edges are taken
    /// from the logical key: it is held while any bound key is held.
    pub fn resolve(&self, key: ControlKey, keyboard: &ButtonInput<KeyCode>) -> ButtonState {
        let Some(codes) = self.keys.get(&key) else {
            return ButtonState::default();
        };

        let pressed = keyboard.any_pressed(codes.iter().copied());
        let was_pressed = codes.iter().any(|&code| {
            (keyboard.pressed(code) && !keyboard.just_pressed(code)) || keyboard.just_released(code)
        });
        ButtonState {
            pressed,
            just_pressed: pressed && !was_pressed,
            just_released: !pressed && was_pressed,
        }
    }
}

/// System: Sample keyboard, mouse and window into the InputSnapshot resource
pub fn sample_input_system(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    bindings: Res<KeyBindings>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    for key in ControlKey::iter() {
        let state = bindings.resolve(key, &keyboard);
        snapshot.set_key(key, state);
    }

    let button = bindings.pointer_button;
    snapshot.button = ButtonState {
        pressed: mouse_button.pressed(button),
        just_pressed: mouse_button.just_pressed(button),
        just_released: mouse_button.just_released(button),
    };
    snapshot.delta = time.delta_secs();

    if let Ok(window) = window_query.single() {
        snapshot.screen_size = Vec2::new(window.width(), window.height());
        // Keep the last known position while the cursor is outside the window
        if let Some(cursor_pos) = window.cursor_position() {
            snapshot.pointer = cursor_pos;
        }
    }
}
