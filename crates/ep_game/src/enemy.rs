use ep_core::{Animation, GameConfig};

use crate::audio::{SoundCue, SoundSink};
use crate::entity::{AnimState, AnimationSet, EntityState};
use crate::geometry::Rect;
use crate::player::Player;
use crate::sheet::SpriteFrame;
use crate::world::Platform;

/// Flat-colour placeholder clips for the slime.
pub fn slime_animations() -> AnimationSet {
    let clip = |w: f32, rgb: [u8; 3], speed: f32, looping: bool| {
        Animation::new(vec![SpriteFrame::solid(w, 50.0, rgb)], speed, looping)
    };
    AnimationSet::from([
        (AnimState::Idle, clip(50.0, [255, 0, 0], 0.1, true)),
        (AnimState::Run, clip(50.0, [200, 0, 0], 0.15, true)),
        (AnimState::Attack, clip(60.0, [255, 100, 100], 0.2, false)),
        (AnimState::Death, clip(50.0, [100, 0, 0], 0.15, false)),
    ])
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyTuning {
    pub speed: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    pub damage: i32,
    pub attack_cooldown_ms: f32,
    pub frame_ms: f32,
}

impl EnemyTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            speed: config.enemy_speed,
            attack_range: config.enemy_attack_range,
            detection_range: config.enemy_detection_range,
            damage: config.enemy_damage,
            attack_cooldown_ms: config.attack_cooldown_ms,
            frame_ms: config.frame_ms(),
        }
    }
}

/// Patrolling melee enemy. Distances are measured between left edges and
/// only horizontally.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub entity: EntityState,
    /// +1 walks right, -1 walks left.
    pub direction: f32,
    pending_removal: bool,
    tuning: EnemyTuning,
}

impl Enemy {
    pub fn new(rect: Rect, max_health: i32, animations: AnimationSet, tuning: EnemyTuning) -> Self {
        Self {
            entity: EntityState::new(rect, max_health, animations),
            direction: 1.0,
            pending_removal: false,
            tuning,
        }
    }

    pub fn slime(config: &GameConfig, x: f32, y: f32) -> Self {
        Self::new(
            Rect::new(x, y, config.entity_width, config.entity_height),
            config.max_health,
            slime_animations(),
            EnemyTuning::from_config(config),
        )
    }

    /// Set once the death clip has finished; the world drops the enemy.
    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    pub fn update(
        &mut self,
        platforms: &[Platform],
        player: &mut Player,
        sink: &mut dyn SoundSink,
    ) {
        if !self.entity.is_alive() {
            self.entity.set_animation(AnimState::Death);
            if self.entity.clip_done(AnimState::Death) {
                self.pending_removal = true;
            }
            self.entity.advance_animation();
            return;
        }

        let player_x = player.entity.rect.x;
        if (self.entity.rect.x - player_x).abs() < self.tuning.detection_range {
            self.direction = if player_x > self.entity.rect.x { 1.0 } else { -1.0 };
        }

        self.entity.velocity.x = self.tuning.speed * self.direction;
        self.entity.rect.x += self.entity.velocity.x;

        // Walking into a platform pushes back out and turns around.
        for platform in platforms {
            if self.entity.rect.overlaps(&platform.rect) {
                if self.direction > 0.0 {
                    self.entity.rect.set_right(platform.rect.left());
                } else {
                    self.entity.rect.set_left(platform.rect.right());
                }
                self.direction = -self.direction;
            }
        }

        let in_range =
            (self.entity.rect.x - player.entity.rect.x).abs() < self.tuning.attack_range;
        if in_range && self.entity.cooldown_ready() {
            self.entity.set_animation(AnimState::Attack);
            if player.entity.is_alive() {
                player.entity.take_damage(self.tuning.damage);
                sink.play(SoundCue::Hurt);
            }
            self.entity.attack_cooldown_ms = self.tuning.attack_cooldown_ms;
        } else if self.entity.velocity.x.abs() > 0.1 {
            self.entity.set_animation(AnimState::Run);
        } else {
            self.entity.set_animation(AnimState::Idle);
        }

        self.entity.facing_right = self.direction > 0.0;
        self.entity.update_cooldowns(self.tuning.frame_ms);
        self.entity.advance_animation();
    }
}
