use ep_core::{Animation, GameConfig};

use crate::assets::AssetRegistry;
use crate::audio::{SoundCue, SoundSink};
use crate::enemy::Enemy;
use crate::entity::{AnimState, AnimationSet, EntityState};
use crate::geometry::Rect;
use crate::sheet::split_sheet;
use crate::world::Platform;

/// Selects the animation set only; all classes share the same stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterClass {
    #[default]
    Warrior,
    Mage,
    Archer,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Archer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CharacterClass::Warrior => "warrior",
            CharacterClass::Mage => "mage",
            CharacterClass::Archer => "archer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Archer => "Archer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Strong and hardy",
            CharacterClass::Mage => "Powerful attacks",
            CharacterClass::Archer => "Quick and nimble",
        }
    }
}

/// (state, frames in the strip, speed, looping)
const PLAYER_CLIPS: [(AnimState, u32, f32, bool); 5] = [
    (AnimState::Idle, 4, 0.1, true),
    (AnimState::Run, 6, 0.15, true),
    (AnimState::Jump, 1, 0.1, false),
    (AnimState::Attack, 4, 0.2, false),
    (AnimState::Death, 4, 0.15, false),
];

/// Build the player's clips from `{class}_{state}.png` strips.
pub fn player_animations(
    assets: &mut AssetRegistry,
    class: CharacterClass,
    scale: u32,
) -> AnimationSet {
    let mut set = AnimationSet::new();
    for (state, cols, speed, looping) in PLAYER_CLIPS {
        let path = assets.image_path(&format!("{}_{}", class.id(), state.name()));
        let image = assets.load_image(&path, scale);
        match split_sheet(&image.key, image.width, image.height, cols, 1) {
            Ok(frames) => {
                set.insert(state, Animation::new(frames, speed, looping));
            }
            Err(err) => log::warn!("{err}; {} has no {} clip", class.id(), state.name()),
        }
    }
    set
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub speed: f32,
    pub attack_cooldown_ms: f32,
    pub coin_score: u32,
    pub frame_ms: f32,
}

impl PlayerTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_force: config.jump_force,
            speed: config.player_speed,
            attack_cooldown_ms: config.attack_cooldown_ms,
            coin_score: config.coin_score,
            frame_ms: config.frame_ms(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: EntityState,
    pub class: CharacterClass,
    pub coins: u32,
    pub score: u32,
    jumping: bool,
    attacking: bool,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(
        rect: Rect,
        class: CharacterClass,
        max_health: i32,
        animations: AnimationSet,
        tuning: PlayerTuning,
    ) -> Self {
        Self {
            entity: EntityState::new(rect, max_health, animations),
            class,
            coins: 0,
            score: 0,
            jumping: false,
            attacking: false,
            tuning,
        }
    }

    /// Player at the configured spawn point with clips from `assets`.
    pub fn spawn(config: &GameConfig, class: CharacterClass, assets: &mut AssetRegistry) -> Self {
        let (x, y) = config.player_spawn;
        Self::new(
            Rect::new(x, y, config.entity_width, config.entity_height),
            class,
            config.max_health,
            player_animations(assets, class, config.sprite_scale),
            PlayerTuning::from_config(config),
        )
    }

    #[cfg(test)]
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    #[cfg(test)]
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// `dir` is -1, 0 or +1. Zero stops the player but keeps the facing.
    pub fn set_move_intent(&mut self, dir: f32) {
        if !self.entity.is_alive() {
            return;
        }
        self.entity.velocity.x = dir * self.tuning.speed;
        if dir > 0.0 {
            self.entity.facing_right = true;
        } else if dir < 0.0 {
            self.entity.facing_right = false;
        }
    }

    pub fn jump(&mut self, sink: &mut dyn SoundSink) -> bool {
        if self.jumping || self.attacking || !self.entity.is_alive() {
            return false;
        }
        self.entity.velocity.y = self.tuning.jump_force;
        self.jumping = true;
        sink.play(SoundCue::Jump);
        true
    }

    /// Starts a swing. No damage is dealt to enemies; callers only learn
    /// whether the swing started.
    pub fn attack(&mut self, sink: &mut dyn SoundSink) -> bool {
        if self.attacking || !self.entity.cooldown_ready() || !self.entity.is_alive() {
            return false;
        }
        self.attacking = true;
        self.entity.attack_cooldown_ms = self.tuning.attack_cooldown_ms;
        self.entity.set_animation(AnimState::Attack);
        sink.play(SoundCue::Attack);
        true
    }

    pub fn add_coin(&mut self, sink: &mut dyn SoundSink) {
        self.coins += 1;
        self.score += self.tuning.coin_score;
        sink.play(SoundCue::Coin);
    }

    /// One fixed tick. Only landing on top of platforms is resolved; there
    /// is no side or ceiling collision.
    pub fn update(&mut self, platforms: &[Platform], _enemies: &[Enemy]) {
        if !self.entity.is_alive() {
            self.entity.set_animation(AnimState::Death);
            self.entity.advance_animation();
            return;
        }

        self.entity.rect.x = (self.entity.rect.x + self.entity.velocity.x).max(0.0);

        self.entity.velocity.y += self.tuning.gravity;
        self.entity.rect.y += self.entity.velocity.y;

        for platform in platforms {
            if self.entity.rect.overlaps(&platform.rect) && self.entity.velocity.y > 0.0 {
                self.entity.rect.set_bottom(platform.rect.top());
                self.entity.velocity.y = 0.0;
                self.jumping = false;
            }
        }

        if self.attacking {
            self.entity.set_animation(AnimState::Attack);
            if self.entity.clip_done(AnimState::Attack) {
                self.attacking = false;
            }
        } else if self.jumping {
            self.entity.set_animation(AnimState::Jump);
        } else if self.entity.velocity.x.abs() > 0.1 {
            self.entity.set_animation(AnimState::Run);
        } else {
            self.entity.set_animation(AnimState::Idle);
        }

        self.entity.update_cooldowns(self.tuning.frame_ms);
        self.entity.advance_animation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SpriteFrame;

    fn tuning() -> PlayerTuning {
        PlayerTuning::from_config(&GameConfig::default())
    }

    fn clips() -> AnimationSet {
        PLAYER_CLIPS
            .iter()
            .map(|&(state, cols, speed, looping)| {
                let frames = vec![SpriteFrame::solid(25.0, 100.0, [10, 20, 30]); cols as usize];
                (state, Animation::new(frames, speed, looping))
            })
            .collect()
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(
            Rect::new(x, y, 50.0, 80.0),
            CharacterClass::Mage,
            100,
            clips(),
            tuning(),
        )
    }

    fn ground() -> Vec<Platform> {
        vec![Platform::new(Rect::new(0.0, 718.0, 1024.0, 50.0))]
    }

    fn settle(player: &mut Player, platforms: &[Platform]) {
        for _ in 0..120 {
            player.update(platforms, &[]);
        }
    }

    #[test]
    fn falls_and_lands_on_platform_top() {
        let mut p = player_at(100.0, 300.0);
        let platforms = ground();
        settle(&mut p, &platforms);
        assert_eq!(p.entity.rect.bottom(), 718.0);
        assert_eq!(p.entity.velocity.y, 0.0);
        assert_eq!(p.entity.state(), AnimState::Idle);
    }

    #[test]
    fn jump_is_ignored_while_airborne_attacking_or_dead() {
        let mut sink: Vec<SoundCue> = Vec::new();
        let mut p = player_at(100.0, 300.0);
        settle(&mut p, &ground());

        assert!(p.jump(&mut sink));
        assert_eq!(p.entity.velocity.y, -15.0);
        assert!(!p.jump(&mut sink));
        assert_eq!(sink, vec![SoundCue::Jump]);

        let mut q = player_at(100.0, 300.0);
        settle(&mut q, &ground());
        assert!(q.attack(&mut sink));
        let vy = q.entity.velocity.y;
        assert!(!q.jump(&mut sink));
        assert_eq!(q.entity.velocity.y, vy);
        assert!(!q.is_jumping());

        let mut r = player_at(100.0, 300.0);
        r.entity.take_damage(100);
        assert!(!r.jump(&mut sink));
        assert!(!r.is_jumping());
    }

    #[test]
    fn attack_respects_cooldown_and_in_progress_swing() {
        let mut sink: Vec<SoundCue> = Vec::new();
        let mut p = player_at(100.0, 300.0);
        let platforms = ground();
        settle(&mut p, &platforms);

        assert!(p.attack(&mut sink));
        assert_eq!(p.entity.attack_cooldown_ms, 500.0);
        assert_eq!(p.entity.state(), AnimState::Attack);
        assert!(!p.attack(&mut sink));

        // 4 frames at 0.2/tick: the swing finishes well before the cooldown.
        for _ in 0..25 {
            p.update(&platforms, &[]);
        }
        assert!(!p.is_attacking());
        assert!(!p.attack(&mut sink), "cooldown still running");

        for _ in 0..10 {
            p.update(&platforms, &[]);
        }
        assert!(p.entity.cooldown_ready());
        assert!(p.attack(&mut sink));
        assert_eq!(p.entity.attack_cooldown_ms, 500.0);
        assert_eq!(sink, vec![SoundCue::Attack, SoundCue::Attack]);
    }

    #[test]
    fn move_intent_moves_and_turns() {
        let mut p = player_at(100.0, 300.0);
        let platforms = ground();
        settle(&mut p, &platforms);

        p.set_move_intent(1.0);
        p.update(&platforms, &[]);
        assert_eq!(p.entity.rect.x, 107.0);
        assert_eq!(p.entity.state(), AnimState::Run);

        p.set_move_intent(-1.0);
        assert!(!p.entity.facing_right);
        p.set_move_intent(0.0);
        assert!(!p.entity.facing_right);
        p.update(&platforms, &[]);
        assert_eq!(p.entity.state(), AnimState::Idle);
    }

    #[test]
    fn left_edge_clamps_at_zero() {
        let mut p = player_at(3.0, 638.0);
        p.set_move_intent(-1.0);
        p.update(&ground(), &[]);
        assert_eq!(p.entity.rect.x, 0.0);
    }

    #[test]
    fn coins_add_fixed_score() {
        let mut sink: Vec<SoundCue> = Vec::new();
        let mut p = player_at(0.0, 0.0);
        p.add_coin(&mut sink);
        p.add_coin(&mut sink);
        assert_eq!((p.coins, p.score), (2, 200));
        assert_eq!(sink, vec![SoundCue::Coin, SoundCue::Coin]);
    }

    #[test]
    fn dead_player_does_not_move() {
        let mut p = player_at(100.0, 300.0);
        p.set_move_intent(1.0);
        p.entity.take_damage(100);
        let before = p.entity.rect;
        for _ in 0..10 {
            p.update(&ground(), &[]);
        }
        assert_eq!(p.entity.rect, before);
        assert_eq!(p.entity.state(), AnimState::Death);
    }

    #[test]
    fn class_ids_are_lowercase_labels() {
        for class in CharacterClass::ALL {
            assert_eq!(class.id(), class.label().to_lowercase());
        }
    }
}
