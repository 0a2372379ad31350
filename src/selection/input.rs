// Selection input handling: click selection and the drag marquee
use bevy::prelude::*;

use crate::capabilities::{SelectionHighlight, UnitCapabilities, UnitQuery, UnitRegistry};
use crate::events::{EventChannel, MarqueeReleased, UnitDeselected};
use crate::input::InputSnapshot;
use crate::types::RtsCamera;

use super::raycast::{ColliderItem, RayCaster, SceneRaycaster};
use super::state::SelectionController;

impl SelectionController {
    /// One tick: move command, then click selection, then the marquee
    pub fn update<R, U>(
        &mut self,
        input: &InputSnapshot,
        raycaster: &R,
        units: &mut U,
        channel: &mut EventChannel,
    ) where
        R: RayCaster + ?Sized,
        U: UnitRegistry + ?Sized,
    {
        self.handle_move_command(input, raycaster, units);
        self.handle_click_selection(input, raycaster, units, channel);
        self.handle_marquee(input, channel);
    }

    /// Commit on release: the previous unit is always deselected before the
    /// unit under the pointer (if any) is selected.
    pub fn handle_click_selection<R, U>(
        &mut self,
        input: &InputSnapshot,
        raycaster: &R,
        units: &mut U,
        channel: &mut EventChannel,
    ) where
        R: RayCaster + ?Sized,
        U: UnitRegistry + ?Sized,
    {
        if !input.button.just_released {
            return;
        }

        if let Some(previous) = self.selected.take() {
            match units.selectable(previous) {
                Some(selectable) => selectable.deselect(previous, channel),
                // Lost its capability; announce the deselection on its behalf
                None => {
                    channel.publish(&UnitDeselected { unit: previous });
                }
            }
            info!("Deselected unit {}", previous);
        }

        let Some(hit) = raycaster.cast(input.pointer, self.config.selectable_layers) else { return };
        let Some(selectable) = units.selectable(hit.entity) else { return };

        selectable.select(hit.entity, channel);
        self.selected = Some(hit.entity);
        info!("Selected unit {}", hit.entity);
    }

    /// Box lifecycle only. Membership selection subscribes to `MarqueeReleased`.
    pub fn handle_marquee(&mut self, input: &InputSnapshot, channel: &mut EventChannel) {
        let button = input.button;
        if button.just_pressed {
            self.marquee.begin(input.pointer);
        } else if button.pressed {
            self.marquee.resize(input.pointer);
        }

        if button.just_released {
            if let Some(rect) = self.marquee.end() {
                channel.publish(&MarqueeReleased { rect });
            }
        }
    }
}

/// System: Run the selection & command controller for this tick
pub fn selection_command_system(
    snapshot: Res<InputSnapshot>,
    mut controller: ResMut<SelectionController>,
    mut channel: ResMut<EventChannel>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    collider_query: Query<ColliderItem>,
    mut unit_query: Query<UnitCapabilities>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else { return };

    let raycaster = SceneRaycaster::new(camera, camera_transform, &collider_query);
    let mut units = UnitQuery::new(&mut unit_query);

    // Only flag the resource changed when selection or marquee actually moved
    let state = controller.bypass_change_detection();
    let before = (state.selected, state.marquee);
    state.update(&snapshot, &raycaster, &mut units, &mut channel);
    if (state.selected, state.marquee) != before {
        controller.set_changed();
    }
}

/// System: Forward despawned selectable units to the controller
pub fn release_destroyed_selection(
    mut removed: RemovedComponents<SelectionHighlight>,
    mut controller: ResMut<SelectionController>,
    mut channel: ResMut<EventChannel>,
) {
    for entity in removed.read() {
        if controller.selected() == Some(entity) {
            controller.entity_destroyed(entity, &mut channel);
        }
    }
}
