//! Per-entity capabilities the selection controller dispatches through.
//!
//! An entity may expose any combination of capabilities. The controller never
//! assumes one from another; it asks the [`UnitRegistry`] for each one it needs.

use bevy::prelude::*;

use crate::events::{EventChannel, UnitDeselected, UnitSelected};
use crate::movement::NavAgent;

/// Something the player can select. Implementors publish the matching
/// selection event on the channel.
pub trait Selectable {
    fn select(&mut self, unit: Entity, channel: &mut EventChannel);
    fn deselect(&mut self, unit: Entity, channel: &mut EventChannel);
}

/// Something that accepts move orders
pub trait Movable {
    fn move_to(&mut self, destination: Vec3);
}

/// Capability lookup for world entities
pub trait UnitRegistry {
    fn selectable(&mut self, unit: Entity) -> Option<&mut dyn Selectable>;
    fn movable(&mut self, unit: Entity) -> Option<&mut dyn Movable>;
}

/// Selection state of a unit; the ring visual mirrors `active`
#[derive(Component, Default, Debug)]
pub struct SelectionHighlight {
    pub active: bool,
    pub ring: Option<Entity>,
}

impl SelectionHighlight {
    pub fn with_ring(ring: Entity) -> Self {
        Self { active: false, ring: Some(ring) }
    }
}

impl Selectable for SelectionHighlight {
    fn select(&mut self, unit: Entity, channel: &mut EventChannel) {
        self.active = true;
        channel.publish(&UnitSelected { unit });
    }

    fn deselect(&mut self, unit: Entity, channel: &mut EventChannel) {
        self.active = false;
        channel.publish(&UnitDeselected { unit });
    }
}

pub type UnitCapabilities = (Option<&'static mut SelectionHighlight>, Option<&'static mut NavAgent>);

/// [`UnitRegistry`] over the ECS world
pub struct UnitQuery<'a, 'w, 's> {
    query: &'a mut Query<'w, 's, UnitCapabilities>,
}

impl<'a, 'w, 's> UnitQuery<'a, 'w, 's> {
    pub fn new(query: &'a mut Query<'w, 's, UnitCapabilities>) -> Self {
        Self { query }
    }
}

impl UnitRegistry for UnitQuery<'_, '_, '_> {
    fn selectable(&mut self, unit: Entity) -> Option<&mut dyn Selectable> {
        let (highlight, _) = self.query.get_mut(unit).ok()?;
        highlight.map(|highlight| highlight.into_inner() as &mut dyn Selectable)
    }

    fn movable(&mut self, unit: Entity) -> Option<&mut dyn Movable> {
        let (_, agent) = self.query.get_mut(unit).ok()?;
        agent.map(|agent| agent.into_inner() as &mut dyn Movable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;
    use std::sync::{Arc, Mutex};

    #[test]
    fn highlight_publishes_selection_events() {
        let mut channel = EventChannel::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let id = channel.allocate_handler();
        let selected_log = Arc::clone(&log);
        channel.subscribe::<UnitSelected, _>(id, move |event| {
            selected_log.lock().unwrap().push(format!("selected {:?}", event.unit));
            Ok(())
        });
        let deselected_log = Arc::clone(&log);
        channel.subscribe::<UnitDeselected, _>(id, move |event| {
            deselected_log.lock().unwrap().push(format!("deselected {:?}", event.unit));
            Ok(())
        });

        let unit = Entity::from_raw(9);
        let mut highlight = SelectionHighlight::default();
        highlight.select(unit, &mut channel);
        assert!(highlight.active);
        highlight.deselect(unit, &mut channel);
        assert!(!highlight.active);

        assert_eq!(
            *log.lock().unwrap(),
            vec![format!("selected {unit:?}"), format!("deselected {unit:?}")]
        );
    }

    #[test]
    fn unit_query_exposes_only_present_capabilities() {
        let mut world = World::new();
        let worker = world.spawn((SelectionHighlight::default(), NavAgent::new(5.0))).id();
        let depot = world.spawn(SelectionHighlight::default()).id();
        let rock = world.spawn_empty().id();

        let mut system_state: SystemState<Query<UnitCapabilities>> = SystemState::new(&mut world);
        let mut query = system_state.get_mut(&mut world);
        let mut units = UnitQuery::new(&mut query);

        assert!(units.selectable(worker).is_some());
        assert!(units.movable(worker).is_some());
        assert!(units.selectable(depot).is_some());
        assert!(units.movable(depot).is_none());
        assert!(units.selectable(rock).is_none());
        assert!(units.movable(rock).is_none());

        units.movable(worker).unwrap().move_to(Vec3::new(1.0, 0.0, 2.0));

        let agent = world.get::<NavAgent>(worker).unwrap();
        assert_eq!(agent.destination, Some(Vec3::new(1.0, 0.0, 2.0)));
    }
}
