// Controller configuration, immutable once inserted into the App
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;
use crate::errors::ConfigError;
use crate::types::PhysicsLayers;

/// Camera rig tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub keyboard_pan_speed: f32,
    pub mouse_pan_speed: f32,
    pub enable_edge_pan: bool,
    pub edge_pan_size: f32,
    pub zoom_speed: f32,
    pub min_zoom_distance: f32,
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            keyboard_pan_speed: CAMERA_KEYBOARD_PAN_SPEED,
            mouse_pan_speed: CAMERA_MOUSE_PAN_SPEED,
            enable_edge_pan: CAMERA_EDGE_PAN_ENABLED,
            edge_pan_size: CAMERA_EDGE_PAN_SIZE,
            zoom_speed: CAMERA_ZOOM_SPEED,
            min_zoom_distance: CAMERA_MIN_ZOOM_DISTANCE,
            rotation_speed: CAMERA_ROTATION_SPEED,
        }
    }
}

/// Ray cast categories used by the selection controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub selectable_layers: PhysicsLayers,
    pub floor_layers: PhysicsLayers,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selectable_layers: PhysicsLayers::UNITS | PhysicsLayers::STRUCTURES,
            floor_layers: PhysicsLayers::FLOOR,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtsConfig {
    pub camera: CameraConfig,
    pub selection: SelectionConfig,
}

impl RtsConfig {
    /// Load a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RtsConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        let speeds = [
            ("camera.keyboard_pan_speed", camera.keyboard_pan_speed),
            ("camera.mouse_pan_speed", camera.mouse_pan_speed),
            ("camera.edge_pan_size", camera.edge_pan_size),
            ("camera.zoom_speed", camera.zoom_speed),
            ("camera.rotation_speed", camera.rotation_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite non-negative number, got {value}"),
                });
            }
        }

        if !camera.min_zoom_distance.is_finite() || camera.min_zoom_distance <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "camera.min_zoom_distance",
                reason: format!("expected a positive number, got {}", camera.min_zoom_distance),
            });
        }

        if self.selection.selectable_layers.is_empty() {
            return Err(ConfigError::Invalid {
                field: "selection.selectable_layers",
                reason: "layer mask is empty".to_string(),
            });
        }
        if self.selection.floor_layers.is_empty() {
            return Err(ConfigError::Invalid {
                field: "selection.floor_layers",
                reason: "layer mask is empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RtsConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RtsConfig =
            serde_json::from_str(r#"{ "camera": { "zoom_speed": 4.0 } }"#).unwrap();
        assert_eq!(config.camera.zoom_speed, 4.0);
        assert_eq!(config.camera.keyboard_pan_speed, CAMERA_KEYBOARD_PAN_SPEED);
        assert_eq!(config.selection, SelectionConfig::default());
    }

    #[test]
    fn layer_masks_parse_from_flag_names() {
        let config: RtsConfig = serde_json::from_str(
            r#"{ "selection": { "selectable_layers": "UNITS", "floor_layers": "FLOOR | STRUCTURES" } }"#,
        )
        .unwrap();
        assert_eq!(config.selection.selectable_layers, PhysicsLayers::UNITS);
        assert_eq!(
            config.selection.floor_layers,
            PhysicsLayers::FLOOR | PhysicsLayers::STRUCTURES
        );
    }

    #[test]
    fn rejects_negative_speed() {
        let mut config = RtsConfig::default();
        config.camera.rotation_speed = -1.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.rotation_speed", .. }));
    }

    #[test]
    fn rejects_empty_floor_mask() {
        let mut config = RtsConfig::default();
        config.selection.floor_layers = PhysicsLayers::empty();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RtsConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
