// Straight-line navigation for units that accept move orders
use bevy::prelude::*;

use crate::capabilities::Movable;
use crate::constants::NAV_ARRIVAL_THRESHOLD;
use crate::math_utils::horizontal_distance;

/// Navigation agent: walks toward `destination` on the ground plane
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    pub speed: f32,
    pub destination: Option<Vec3>,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self { speed, destination: None }
    }
}

impl Movable for NavAgent {
    fn move_to(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }
}

/// Advance `position` toward `destination` by at most `step`, keeping its height.
/// Returns true once the agent is within the arrival threshold.
pub fn step_towards(position: &mut Vec3, destination: Vec3, step: f32) -> bool {
    let distance = horizontal_distance(*position, destination);
    if distance <= NAV_ARRIVAL_THRESHOLD {
        return true;
    }

    let direction = Vec3::new(destination.x - position.x, 0.0, destination.z - position.z) / distance;
    let advance = step.min(distance);
    *position += direction * advance;
    horizontal_distance(*position, destination) <= NAV_ARRIVAL_THRESHOLD
}

/// System: Move agents toward their destination and clear it on arrival
pub fn nav_agent_system(
    time: Res<Time>,
    mut agent_query: Query<(&mut Transform, &mut NavAgent)>,
) {
    let delta_time = time.delta_secs();

    for (mut transform, mut agent) in agent_query.iter_mut() {
        let Some(destination) = agent.destination else { continue };

        let step = agent.speed * delta_time;
        if step_towards(&mut transform.translation, destination, step) {
            agent.destination = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_replaces_destination() {
        let mut agent = NavAgent::new(3.0);
        agent.move_to(Vec3::new(1.0, 0.0, 1.0));
        agent.move_to(Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(agent.destination, Some(Vec3::new(4.0, 0.0, 4.0)));
    }

    #[test]
    fn step_is_capped_and_keeps_height() {
        let mut position = Vec3::new(0.0, 1.5, 0.0);
        let arrived = step_towards(&mut position, Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert!(!arrived);
        assert!(position.abs_diff_eq(Vec3::new(2.0, 1.5, 0.0), 1e-5));

        let arrived = step_towards(&mut position, Vec3::new(10.0, 0.0, 0.0), 100.0);
        assert!(arrived);
        assert!(position.abs_diff_eq(Vec3::new(10.0, 1.5, 0.0), 1e-5));
    }
}
