// Selection state and the drag marquee box
use bevy::prelude::*;

use crate::config::SelectionConfig;
use crate::events::{EventChannel, UnitDeselected};

/// Screen-space drag box. Exposed to the UI as active flag + center + size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarqueeBox {
    origin: Vec2,
    center: Vec2,
    size: Vec2,
    active: bool,
}

impl MarqueeBox {
    /// Activate with zero size at the press point
    pub fn begin(&mut self, point: Vec2) {
        self.origin = point;
        self.center = point;
        self.size = Vec2::ZERO;
        self.active = true;
    }

    /// Span the rectangle between the origin and the live pointer
    pub fn resize(&mut self, pointer: Vec2) {
        if !self.active {
            return;
        }
        let delta = pointer - self.origin;
        self.center = self.origin + delta / 2.0;
        self.size = delta.abs();
    }

    /// Deactivate, returning the final rectangle if the box was active
    pub fn end(&mut self) -> Option<Rect> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.rect())
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}

/// Selection & command controller state. Holds at most one selected unit as a
/// non-owning handle; the ECS notifies it when that unit is despawned.
#[derive(Resource, Debug, Clone)]
pub struct SelectionController {
    pub(super) config: SelectionConfig,
    pub(super) selected: Option<Entity>,
    pub(super) marquee: MarqueeBox,
}

impl SelectionController {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            selected: None,
            marquee: MarqueeBox::default(),
        }
    }

    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    pub fn marquee(&self) -> &MarqueeBox {
        &self.marquee
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Destruction notification from the entity registry. Clears the
    /// selection and publishes the deselection on the unit's behalf.
    pub fn entity_destroyed(&mut self, entity: Entity, channel: &mut EventChannel) -> bool {
        if self.selected != Some(entity) {
            return false;
        }
        self.selected = None;
        channel.publish(&UnitDeselected { unit: entity });
        info!("Selected unit {} was destroyed", entity);
        true
    }
}
