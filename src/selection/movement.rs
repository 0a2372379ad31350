// Move command issuance for the selected unit
use bevy::prelude::*;

use crate::capabilities::UnitRegistry;
use crate::input::{ControlKey, InputSnapshot};

use super::raycast::RayCaster;
use super::state::SelectionController;

impl SelectionController {
    /// Level-triggered: every tick the move key is held and the pointer
    /// resolves to floor, the selected unit is re-targeted.
    pub fn handle_move_command<R, U>(&mut self, input: &InputSnapshot, raycaster: &R, units: &mut U)
    where
        R: RayCaster + ?Sized,
        U: UnitRegistry + ?Sized,
    {
        if !input.pressed(ControlKey::MoveCommand) {
            return;
        }
        let Some(selected) = self.selected else { return };
        let Some(movable) = units.movable(selected) else { return };
        let Some(hit) = raycaster.cast(input.pointer, self.config.floor_layers) else { return };

        movable.move_to(hit.point);
        debug!(
            "Move command to ({:.1}, {:.1}) for unit {}",
            hit.point.x, hit.point.z, selected
        );
    }
}
