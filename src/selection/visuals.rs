// Visual feedback for selection: unit rings and the drag box UI node
use bevy::prelude::*;

use crate::capabilities::SelectionHighlight;

use super::state::{MarqueeBox, SelectionController};

// Marker component for selection ring visuals
#[derive(Component)]
pub struct SelectionRing;

// Marker component for the box selection rectangle (UI element)
#[derive(Component)]
pub struct MarqueeBoxNode;

/// Spawn the hidden drag box node; `sync_marquee_box` positions it
pub fn spawn_marquee_box(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.2, 0.8, 0.3, 0.15)),
        BorderColor(Color::srgba(0.3, 1.0, 0.4, 0.8)),
        Visibility::Hidden,
        MarqueeBoxNode,
    ));
}

/// Absolute UI placement of a marquee: (left, top, width, height)
pub fn marquee_node_rect(marquee: &MarqueeBox) -> (f32, f32, f32, f32) {
    let rect = marquee.rect();
    (rect.min.x, rect.min.y, rect.width(), rect.height())
}

/// System: Mirror the controller's marquee onto the UI node
pub fn sync_marquee_box(
    controller: Res<SelectionController>,
    mut node_query: Query<(&mut Node, &mut Visibility), With<MarqueeBoxNode>>,
) {
    if !controller.is_changed() {
        return;
    }

    let marquee = controller.marquee();
    for (mut node, mut visibility) in node_query.iter_mut() {
        if !marquee.is_active() {
            *visibility = Visibility::Hidden;
            continue;
        }

        let (left, top, width, height) = marquee_node_rect(marquee);
        node.left = Val::Px(left);
        node.top = Val::Px(top);
        node.width = Val::Px(width);
        node.height = Val::Px(height);
        *visibility = Visibility::Visible;
    }
}

/// System: Show a unit's ring while it is selected
pub fn sync_selection_rings(
    highlight_query: Query<&SelectionHighlight, Changed<SelectionHighlight>>,
    mut ring_query: Query<&mut Visibility, With<SelectionRing>>,
) {
    for highlight in highlight_query.iter() {
        let Some(ring) = highlight.ring else { continue };
        let Ok(mut visibility) = ring_query.get_mut(ring) else { continue };
        *visibility = if highlight.active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionConfig;

    #[test]
    fn node_rect_is_top_left_anchored() {
        let mut marquee = MarqueeBox::default();
        marquee.begin(Vec2::new(300.0, 200.0));
        marquee.resize(Vec2::new(100.0, 260.0));
        assert_eq!(marquee_node_rect(&marquee), (100.0, 200.0, 200.0, 60.0));
    }

    #[test]
    fn ring_visibility_follows_highlight() {
        let mut app = App::new();
        app.add_systems(Update, sync_selection_rings);
        let ring = app.world_mut().spawn((SelectionRing, Visibility::Hidden)).id();
        let unit = app.world_mut().spawn(SelectionHighlight::with_ring(ring)).id();

        app.world_mut().get_mut::<SelectionHighlight>(unit).unwrap().active = true;
        app.update();
        assert_eq!(app.world().get::<Visibility>(ring), Some(&Visibility::Visible));

        app.world_mut().get_mut::<SelectionHighlight>(unit).unwrap().active = false;
        app.update();
        assert_eq!(app.world().get::<Visibility>(ring), Some(&Visibility::Hidden));
    }

    #[test]
    fn marquee_node_hides_when_inactive() {
        let mut app = App::new();
        app.insert_resource(SelectionController::new(SelectionConfig::default()))
            .add_systems(Startup, spawn_marquee_box)
            .add_systems(Update, sync_marquee_box);
        app.update();

        let mut query = app.world_mut().query_filtered::<&Visibility, With<MarqueeBoxNode>>();
        let visibility = *query.single(app.world()).unwrap();
        assert_eq!(visibility, Visibility::Hidden);
    }
}
