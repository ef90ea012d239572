//! One level of play: the player, the world and the end-of-tick rules.
//!
//! Holds no GPU or window state, so whole runs can be driven from tests.

use ep_core::{GameConfig, InputState, Key};

use crate::assets::AssetRegistry;
use crate::audio::SoundSink;
use crate::player::{CharacterClass, Player};
use crate::world::World;

/// Per-tick controls, already reduced from raw keys.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameplayInput {
    pub move_x: f32,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub exit_pressed: bool,
}

impl GameplayInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            move_x: input.horizontal_axis(),
            jump_pressed: input.is_just_pressed(Key::Space),
            attack_pressed: input.is_just_pressed(Key::F),
            exit_pressed: input.is_just_pressed(Key::Escape),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Exit,
    PlayerDied,
    LevelComplete,
}

pub struct GameplaySession {
    pub level: u32,
    pub player: Player,
    pub world: World,
    canvas_width: f32,
    canvas_height: f32,
    exit_margin: f32,
    fall_damage: i32,
    respawn_y: f32,
}

impl GameplaySession {
    /// Start `level` with a freshly spawned player. Score and coins begin
    /// at zero on every level.
    pub fn new(
        level: u32,
        class: CharacterClass,
        config: &GameConfig,
        assets: &mut AssetRegistry,
    ) -> Self {
        let player = Player::spawn(config, class, assets);
        Self::with_player(level, player, config)
    }

    pub fn with_player(level: u32, player: Player, config: &GameConfig) -> Self {
        Self {
            level,
            player,
            world: World::for_level(level, config),
            canvas_width: config.width_f(),
            canvas_height: config.height_f(),
            exit_margin: config.level_exit_margin,
            fall_damage: config.fall_damage,
            respawn_y: config.respawn_y,
        }
    }

    /// Class and animation state, for the debug panel.
    pub fn player_summary(&self) -> String {
        format!(
            "{} ({})",
            self.player.class.label(),
            self.player.entity.state().name()
        )
    }

    pub fn tick(&mut self, input: GameplayInput, sink: &mut dyn SoundSink) -> SessionOutcome {
        if input.exit_pressed {
            return SessionOutcome::Exit;
        }
        if input.jump_pressed {
            self.player.jump(sink);
        }
        if input.attack_pressed {
            // Swings never hurt enemies; only the animation and sound play.
            self.player.attack(sink);
        }
        self.player.set_move_intent(input.move_x);

        self.player.update(&self.world.platforms, &self.world.enemies);
        for enemy in &mut self.world.enemies {
            enemy.update(&self.world.platforms, &mut self.player, sink);
        }
        self.world.retain_live_enemies();
        self.world.collect_coins(&mut self.player, sink);

        if !self.player.entity.is_alive() {
            log::info!("Player died on level {}", self.level);
            return SessionOutcome::PlayerDied;
        }
        if self.player.entity.rect.y > self.canvas_height {
            self.player.entity.take_damage(self.fall_damage);
            self.player.entity.rect.y = self.respawn_y;
        }
        if self.player.entity.rect.x > self.canvas_width - self.exit_margin {
            log::info!("Level {} complete, score {}", self.level, self.player.score);
            return SessionOutcome::LevelComplete;
        }
        SessionOutcome::Continue
    }
}
