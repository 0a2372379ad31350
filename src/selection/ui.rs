// Selection HUD: a channel subscriber that labels the current selection
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use crate::events::{EventChannel, HandlerId, UnitDeselected, UnitSelected};
use crate::types::{Depot, Worker};

/// Latest selection as seen through the event channel
#[derive(Debug, Default)]
pub struct HudFeed {
    pub selected: Option<Entity>,
    pub dirty: bool,
}

/// Subscription state of the HUD; `feed` is written by channel handlers
#[derive(Resource)]
pub struct SelectionHud {
    handler: HandlerId,
    feed: Arc<Mutex<HudFeed>>,
}

impl SelectionHud {
    pub fn subscribe(channel: &mut EventChannel) -> Self {
        let handler = channel.allocate_handler();
        let feed = Arc::new(Mutex::new(HudFeed::default()));

        let selected_feed = Arc::clone(&feed);
        channel.subscribe::<UnitSelected, _>(handler, move |event| {
            let mut feed = selected_feed
                .lock()
                .map_err(|_| anyhow::anyhow!("selection HUD feed poisoned"))?;
            feed.selected = Some(event.unit);
            feed.dirty = true;
            Ok(())
        });

        let deselected_feed = Arc::clone(&feed);
        channel.subscribe::<UnitDeselected, _>(handler, move |event| {
            let mut feed = deselected_feed
                .lock()
                .map_err(|_| anyhow::anyhow!("selection HUD feed poisoned"))?;
            if feed.selected == Some(event.unit) {
                feed.selected = None;
                feed.dirty = true;
            }
            Ok(())
        });

        Self { handler, feed }
    }

    pub fn unsubscribe(&self, channel: &mut EventChannel) {
        channel.unsubscribe::<UnitSelected>(self.handler);
        channel.unsubscribe::<UnitDeselected>(self.handler);
    }

    /// Take the selection if it changed since the last call
    pub fn take_change(&self) -> Option<Option<Entity>> {
        let mut feed = self.feed.lock().ok()?;
        if !feed.dirty {
            return None;
        }
        feed.dirty = false;
        Some(feed.selected)
    }
}

// Marker component for the HUD text node
#[derive(Component)]
pub struct SelectionHudText;

/// System: Subscribe the HUD and spawn its text node
pub fn spawn_selection_hud(mut commands: Commands, mut channel: ResMut<EventChannel>) {
    commands.insert_resource(SelectionHud::subscribe(&mut channel));
    commands.spawn((
        Text::new(describe_selection(None, None)),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            ..default()
        },
        SelectionHudText,
    ));
}

fn describe_selection(unit: Option<Entity>, kind: Option<String>) -> String {
    match (unit, kind) {
        (Some(_), Some(kind)) => format!("Selected: {kind}\nM: Move | Z: Zoom | Q/E: Rotate"),
        (Some(unit), None) => format!("Selected: {unit}\nM: Move | Z: Zoom | Q/E: Rotate"),
        (None, _) => "Nothing selected\nArrows: Pan | Z: Zoom | Q/E: Rotate".to_string(),
    }
}

/// System: Refresh the HUD text when the feed changed
pub fn update_selection_hud(
    hud: Option<Res<SelectionHud>>,
    unit_query: Query<(Option<&Worker>, Option<&Depot>)>,
    mut text_query: Query<&mut Text, With<SelectionHudText>>,
) {
    let Some(hud) = hud else { return };
    let Some(selected) = hud.take_change() else { return };

    let kind = selected.and_then(|unit| match unit_query.get(unit) {
        Ok((Some(worker), _)) => Some(format!("Worker {}", worker.index)),
        Ok((None, Some(_))) => Some("Depot".to_string()),
        _ => None,
    });
    let label = describe_selection(selected, kind);

    for mut text in text_query.iter_mut() {
        text.0 = label.clone();
    }
}

/// System: Drop the HUD's subscriptions before the app shuts down
pub fn unsubscribe_selection_hud(
    mut exit_events: EventReader<AppExit>,
    hud: Option<Res<SelectionHud>>,
    mut channel: ResMut<EventChannel>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    if let Some(hud) = hud {
        hud.unsubscribe(&mut channel);
        info!("Selection HUD unsubscribed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_tracks_selection_events() {
        let mut channel = EventChannel::new();
        let hud = SelectionHud::subscribe(&mut channel);
        let (a, b) = (Entity::from_raw(1), Entity::from_raw(2));

        assert_eq!(hud.take_change(), None);

        channel.publish(&UnitSelected { unit: a });
        assert_eq!(hud.take_change(), Some(Some(a)));
        assert_eq!(hud.take_change(), None);

        // A stale deselection of another unit leaves the label alone
        channel.publish(&UnitSelected { unit: b });
        channel.publish(&UnitDeselected { unit: a });
        assert_eq!(hud.take_change(), Some(Some(b)));

        channel.publish(&UnitDeselected { unit: b });
        assert_eq!(hud.take_change(), Some(None));
    }

    #[test]
    fn unsubscribe_stops_updates() {
        let mut channel = EventChannel::new();
        let hud = SelectionHud::subscribe(&mut channel);
        hud.unsubscribe(&mut channel);

        assert_eq!(channel.subscriber_count::<UnitSelected>(), 0);
        assert_eq!(channel.subscriber_count::<UnitDeselected>(), 0);
        channel.publish(&UnitSelected { unit: Entity::from_raw(3) });
        assert_eq!(hud.take_change(), None);
    }

    #[test]
    fn label_names_the_unit_kind() {
        let unit = Entity::from_raw(8);
        assert!(describe_selection(Some(unit), Some("Worker 2".into())).starts_with("Selected: Worker 2"));
        assert!(describe_selection(None, None).starts_with("Nothing selected"));
    }
}
