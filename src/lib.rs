// RTS input & camera control core: camera rig, single-unit selection with move
// orders, and a type-keyed event channel between them.
use bevy::prelude::*;

pub mod camera;
pub mod capabilities;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod input;
pub mod math_utils;
pub mod movement;
pub mod selection;
pub mod setup;
pub mod types;

use camera::{attach_rig_controllers, camera_rig_system, follow_rig_system, integrate_rig_velocity};
use config::RtsConfig;
use events::EventChannel;
use input::{sample_input_system, InputSnapshot, KeyBindings};
use movement::nav_agent_system;
use selection::{
    release_destroyed_selection,
    selection_command_system,
    spawn_marquee_box,
    spawn_selection_hud,
    sync_marquee_box,
    sync_selection_rings,
    unsubscribe_selection_hud,
    update_selection_hud,
    SelectionController,
};

/// Per-tick ordering: sample input, run the controllers, then present
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSet {
    Sample,
    Control,
    Present,
}

#[derive(Default)]
pub struct RtsControlPlugin {
    pub config: RtsConfig,
}

impl RtsControlPlugin {
    pub fn new(config: RtsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for RtsControlPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(SelectionController::new(self.config.selection.clone()))
            .init_resource::<InputSnapshot>()
            .init_resource::<KeyBindings>()
            .init_resource::<EventChannel>()
            .configure_sets(
                Update,
                (InputSet::Sample, InputSet::Control, InputSet::Present).chain(),
            )
            .add_systems(Startup, (spawn_selection_hud, spawn_marquee_box))
            .add_systems(Update, sample_input_system.in_set(InputSet::Sample))
            .add_systems(
                Update,
                (
                    (
                        attach_rig_controllers,
                        camera_rig_system,
                        integrate_rig_velocity,
                        follow_rig_system,
                    )
                        .chain(),
                    (release_destroyed_selection, selection_command_system).chain(),
                )
                    .in_set(InputSet::Control),
            )
            .add_systems(
                Update,
                (
                    sync_selection_rings,
                    sync_marquee_box,
                    update_selection_hud,
                    nav_agent_system,
                )
                    .in_set(InputSet::Present),
            )
            .add_systems(Last, unsubscribe_selection_hud);
    }
}
