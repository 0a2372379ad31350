// Selection module - single-unit selection, move orders and the drag box
//
// Submodules:
// - state: SelectionController resource and MarqueeBox
// - input: Click selection and marquee lifecycle, plus the per-tick system
// - movement: Move command issuance (level-triggered while the move key is held)
// - raycast: RayCaster seam and the scene implementation
// - visuals: Selection rings and the drag box UI node
// - ui: Selection HUD subscribed to the event channel

mod state;
mod input;
mod movement;
mod raycast;
mod visuals;
mod ui;


// Re-export main types for external use
pub use state::{MarqueeBox, SelectionController};
pub use raycast::{nearest_hit, ColliderItem, RayCaster, RayHit, SceneRaycaster};

// Re-export systems for the plugin
pub use input::{selection_command_system, release_destroyed_selection};
pub use visuals::{spawn_marquee_box, sync_marquee_box, sync_selection_rings, MarqueeBoxNode, SelectionRing};
pub use ui::{
    spawn_selection_hud,
    unsubscribe_selection_hud,
    update_selection_hud,
    HudFeed,
    SelectionHud,
    SelectionHudText,
};
