//! Game tunables.
//!
//! Every constant the simulation and screens depend on lives in one
//! `GameConfig` that is built once at startup and threaded by reference into
//! whoever needs it. Values are per simulation tick unless named otherwise
//! (`*_ms` fields are milliseconds).
//!
//! An optional JSON file can override any subset of fields; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,

    pub gravity: f32,
    pub jump_force: f32,
    pub player_speed: f32,
    pub attack_cooldown_ms: f32,
    pub player_spawn: (f32, f32),

    pub entity_width: f32,
    pub entity_height: f32,
    pub max_health: i32,

    pub enemy_speed: f32,
    pub enemy_attack_range: f32,
    pub enemy_detection_range: f32,
    pub enemy_damage: i32,

    pub coin_size: f32,
    pub coin_score: u32,

    pub fall_damage: i32,
    pub respawn_y: f32,
    pub level_exit_margin: f32,
    pub max_level: u32,

    pub name_max_len: usize,
    pub highscore_limit: usize,
    pub highscores_path: String,

    pub asset_root: String,
    pub sprite_scale: u32,
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            fps: 60,
            gravity: 0.5,
            jump_force: -15.0,
            player_speed: 7.0,
            attack_cooldown_ms: 500.0,
            player_spawn: (100.0, 300.0),
            entity_width: 50.0,
            entity_height: 80.0,
            max_health: 100,
            enemy_speed: 1.5,
            enemy_attack_range: 50.0,
            enemy_detection_range: 300.0,
            enemy_damage: 5,
            coin_size: 20.0,
            coin_score: 100,
            fall_damage: 10,
            respawn_y: 100.0,
            level_exit_margin: 50.0,
            max_level: 3,
            name_max_len: 15,
            highscore_limit: 10,
            highscores_path: "highscores.json".to_string(),
            asset_root: "assets".to_string(),
            sprite_scale: 2,
            music_volume: 0.5,
        }
    }
}

impl GameConfig {
    /// Per-tick cooldown decrement in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps as f32
    }

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err("Config validation failed: width and height must be > 0".to_string());
    }
    if config.fps == 0 {
        return Err("Config validation failed: fps must be > 0".to_string());
    }
    if config.max_level == 0 {
        return Err("Config validation failed: max_level must be >= 1".to_string());
    }
    if config.entity_width <= 0.0 || config.entity_height <= 0.0 {
        return Err("Config validation failed: entity size must be > 0".to_string());
    }
    if config.max_health <= 0 {
        return Err("Config validation failed: max_health must be > 0".to_string());
    }
    if config.sprite_scale == 0 {
        return Err("Config validation failed: sprite_scale must be > 0".to_string());
    }
    if config.highscore_limit == 0 {
        return Err("Config validation failed: highscore_limit must be > 0".to_string());
    }
    Ok(())
}
