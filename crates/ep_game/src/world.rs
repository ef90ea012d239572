//! Level geometry and the things living in it.
//!
//! Every level has a full-width ground strip along the bottom of the canvas.
//! Level 1 adds three ledges, two coins and a slime; later levels are
//! ground only for now.

use ep_core::GameConfig;

use crate::audio::SoundSink;
use crate::enemy::Enemy;
use crate::geometry::Rect;
use crate::player::Player;

pub const PLATFORM_GREEN: [u8; 3] = [0, 255, 0];
pub const COIN_YELLOW: [u8; 3] = [255, 255, 0];

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub color: [u8; 3],
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            color: PLATFORM_GREEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self {
            rect: Rect::from_center(cx, cy, size, size),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
}

impl World {
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let ground_height = 50.0;
        let mut world = World {
            platforms: vec![Platform::new(Rect::new(
                0.0,
                config.height_f() - ground_height,
                config.width_f(),
                ground_height,
            ))],
            ..World::default()
        };

        // TODO: author layouts for levels 2 and 3; they are ground-only.
        if level == 1 {
            world.platforms.extend([
                Platform::new(Rect::new(100.0, 500.0, 200.0, 20.0)),
                Platform::new(Rect::new(400.0, 400.0, 200.0, 20.0)),
                Platform::new(Rect::new(200.0, 300.0, 100.0, 20.0)),
            ]);
            world.coins.extend([
                Coin::centered(200.0, 450.0, config.coin_size),
                Coin::centered(500.0, 350.0, config.coin_size),
            ]);
            world.enemies.push(Enemy::slime(config, 300.0, 450.0));
        }

        log::info!(
            "Level {level}: {} platforms, {} coins, {} enemies",
            world.platforms.len(),
            world.coins.len(),
            world.enemies.len()
        );
        world
    }

    /// Remove every coin the player touches, crediting each exactly once.
    pub fn collect_coins(&mut self, player: &mut Player, sink: &mut dyn SoundSink) -> u32 {
        let mut collected = 0;
        self.coins.retain(|coin| {
            if coin.rect.overlaps(&player.entity.rect) {
                player.add_coin(sink);
                collected += 1;
                false
            } else {
                true
            }
        });
        collected
    }

    pub fn retain_live_enemies(&mut self) {
        self.enemies.retain(|enemy| !enemy.is_pending_removal());
    }
}
