use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rts_control::camera::{attach_rig_controllers, camera_rig_system, CameraRigController};
use rts_control::capabilities::{Movable, Selectable, SelectionHighlight, UnitRegistry};
use rts_control::config::{RtsConfig, SelectionConfig};
use rts_control::events::{EventChannel, UnitDeselected, UnitSelected};
use rts_control::input::{ButtonState, ControlKey, InputSnapshot};
use rts_control::movement::NavAgent;
use rts_control::selection::{RayCaster, RayHit, SelectionController};
use rts_control::types::{CameraRig, FollowOffset, PhysicsLayers, RigVelocity};

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
const WORKER_POINT: Vec2 = Vec2::new(200.0, 300.0);
const DEPOT_POINT: Vec2 = Vec2::new(600.0, 300.0);
const FLOOR_POINT: Vec2 = Vec2::new(400.0, 100.0);

/// Fixed screen layout: a worker, a depot and open floor
struct Board {
    worker: Entity,
    depot: Entity,
    floor: Entity,
}

impl RayCaster for Board {
    fn cast(&self, screen_point: Vec2, layers: PhysicsLayers) -> Option<RayHit> {
        let (entity, layer, point) = if screen_point == WORKER_POINT {
            (self.worker, PhysicsLayers::UNITS, Vec3::new(-10.0, 1.0, 0.0))
        } else if screen_point == DEPOT_POINT {
            (self.depot, PhysicsLayers::STRUCTURES, Vec3::new(10.0, 2.0, 0.0))
        } else {
            (self.floor, PhysicsLayers::FLOOR, Vec3::new(0.0, 0.0, -20.0))
        };
        layers.contains(layer).then_some(RayHit { entity, point, distance: 10.0 })
    }
}

#[derive(Default)]
struct Units {
    highlights: HashMap<Entity, SelectionHighlight>,
    agents: HashMap<Entity, NavAgent>,
}

impl UnitRegistry for Units {
    fn selectable(&mut self, unit: Entity) -> Option<&mut dyn Selectable> {
        self.highlights.get_mut(&unit).map(|highlight| highlight as &mut dyn Selectable)
    }

    fn movable(&mut self, unit: Entity) -> Option<&mut dyn Movable> {
        self.agents.get_mut(&unit).map(|agent| agent as &mut dyn Movable)
    }
}

fn tick() -> InputSnapshot {
    InputSnapshot::new(SCREEN, 1.0 / 60.0).with_pointer(SCREEN / 2.0)
}

fn click_at(point: Vec2) -> InputSnapshot {
    tick().with_pointer(point).with_button(ButtonState::RELEASED_THIS_TICK)
}

fn move_order_at(point: Vec2) -> InputSnapshot {
    tick().with_pointer(point).with_key(ControlKey::MoveCommand, ButtonState::HELD)
}

#[test]
fn select_order_and_switch_units() {
    let board = Board {
        worker: Entity::from_raw(1),
        depot: Entity::from_raw(2),
        floor: Entity::from_raw(3),
    };
    let mut units = Units::default();
    units.highlights.insert(board.worker, SelectionHighlight::default());
    units.highlights.insert(board.depot, SelectionHighlight::default());
    units.agents.insert(board.worker, NavAgent::new(5.0));

    let mut channel = EventChannel::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let id = channel.allocate_handler();
    let selected_log = Arc::clone(&log);
    channel.subscribe::<UnitSelected, _>(id, move |event| {
        selected_log.lock().unwrap().push(format!("select {}", event.unit.index()));
        Ok(())
    });
    let deselected_log = Arc::clone(&log);
    channel.subscribe::<UnitDeselected, _>(id, move |event| {
        deselected_log.lock().unwrap().push(format!("deselect {}", event.unit.index()));
        Ok(())
    });

    let mut controller = SelectionController::new(SelectionConfig::default());

    controller.update(&click_at(WORKER_POINT), &board, &mut units, &mut channel);
    assert_eq!(controller.selected(), Some(board.worker));
    assert!(units.highlights[&board.worker].active);

    controller.update(&move_order_at(FLOOR_POINT), &board, &mut units, &mut channel);
    assert_eq!(units.agents[&board.worker].destination, Some(Vec3::new(0.0, 0.0, -20.0)));

    controller.update(&click_at(DEPOT_POINT), &board, &mut units, &mut channel);
    assert_eq!(controller.selected(), Some(board.depot));
    assert!(!units.highlights[&board.worker].active);
    assert!(units.highlights[&board.depot].active);

    // The depot cannot move and the worker is no longer selected
    controller.update(&move_order_at(Vec2::new(50.0, 50.0)), &board, &mut units, &mut channel);
    assert_eq!(units.agents[&board.worker].destination, Some(Vec3::new(0.0, 0.0, -20.0)));

    controller.update(&click_at(FLOOR_POINT), &board, &mut units, &mut channel);
    assert_eq!(controller.selected(), None);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["select 1", "deselect 1", "select 2", "deselect 2"]
    );
}

#[test]
fn failing_subscriber_does_not_starve_the_others() {
    let mut channel = EventChannel::new();
    let received = Arc::new(Mutex::new(0));

    let broken = channel.allocate_handler();
    channel.subscribe::<UnitSelected, _>(broken, |_| panic!("subscriber bug"));
    let erroring = channel.allocate_handler();
    channel.subscribe::<UnitSelected, _>(erroring, |_| Err(anyhow::anyhow!("rejected")));
    let healthy = channel.allocate_handler();
    let counter = Arc::clone(&received);
    channel.subscribe::<UnitSelected, _>(healthy, move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    let delivery = channel.publish(&UnitSelected { unit: Entity::from_raw(9) });
    assert_eq!(delivery.delivered, 1);
    assert_eq!(delivery.failed, 2);
    assert_eq!(*received.lock().unwrap(), 1);
}

#[test]
fn rig_rotates_to_the_side_and_back() {
    let mut app = App::new();
    app.insert_resource(RtsConfig::default())
        .insert_resource(tick())
        .add_systems(Update, (attach_rig_controllers, camera_rig_system).chain());

    let rest = Vec3::new(0.0, 10.0, 5.0);
    let camera = app.world_mut().spawn(FollowOffset(rest)).id();
    let rig = app
        .world_mut()
        .spawn((CameraRig { camera: Some(camera) }, RigVelocity::default()))
        .id();

    let run_tick = |app: &mut App, rotate: ButtonState| {
        let input = InputSnapshot::new(SCREEN, 1.0)
            .with_pointer(SCREEN / 2.0)
            .with_key(ControlKey::RotateLeft, rotate);
        app.insert_resource(input);
        app.update();
        app.world().get::<FollowOffset>(camera).map(|offset| offset.0)
    };

    let first = run_tick(&mut app, ButtonState::PRESSED_THIS_TICK);
    assert!(first.is_some_and(|offset| offset.abs_diff_eq(rest, 1e-4)));
    assert!(app.world().get::<CameraRigController>(rig).is_some());

    let turned = run_tick(&mut app, ButtonState::HELD);
    assert!(turned.is_some_and(|offset| offset.abs_diff_eq(Vec3::new(5.0, 10.0, 0.0), 1e-4)));

    run_tick(&mut app, ButtonState::RELEASED_THIS_TICK);
    let back = run_tick(&mut app, ButtonState::default());
    assert!(back.is_some_and(|offset| offset.abs_diff_eq(rest, 1e-4)));

    assert_eq!(app.world().get::<RigVelocity>(rig).map(|velocity| velocity.0), Some(Vec3::ZERO));
}
