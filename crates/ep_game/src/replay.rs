//! Scripted input playback for driving gameplay sessions in tests.

use crate::session::GameplayInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_level")]
    pub level: u32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub attack: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// One `GameplayInput` per tick. Button presses fire on the first tick
    /// of a repeated frame only, like a key going down once.
    pub fn expanded_inputs(&self) -> Vec<GameplayInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for i in 0..frame.repeat.max(1) {
                out.push(GameplayInput {
                    move_x: frame.move_x.clamp(-1.0, 1.0),
                    jump_pressed: frame.jump && i == 0,
                    attack_pressed: frame.attack && i == 0,
                    exit_pressed: false,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.level == 0 {
        return Err("Replay validation failed: level must be >= 1".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_level() -> u32 {
    1
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundCue;
    use crate::entity::AnimationSet;
    use crate::geometry::Rect;
    use crate::player::{CharacterClass, Player, PlayerTuning};
    use crate::session::{GameplaySession, SessionOutcome};
    use ep_core::GameConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ep_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn session(level: u32) -> GameplaySession {
        let cfg = GameConfig::default();
        let (x, y) = cfg.player_spawn;
        let player = Player::new(
            Rect::new(x, y, cfg.entity_width, cfg.entity_height),
            CharacterClass::Warrior,
            cfg.max_health,
            AnimationSet::new(),
            PlayerTuning::from_config(&cfg),
        );
        GameplaySession::with_player(level, player, &cfg)
    }

    /// Run until the first non-Continue outcome or the end of the script.
    fn play(
        session: &mut GameplaySession,
        inputs: &[GameplayInput],
        sink: &mut Vec<SoundCue>,
    ) -> (SessionOutcome, usize) {
        for (tick, input) in inputs.iter().enumerate() {
            let outcome = session.tick(*input, sink);
            if outcome != SessionOutcome::Continue {
                return (outcome, tick + 1);
            }
        }
        (SessionOutcome::Continue, inputs.len())
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "level": 2,
              "frames": [
                { "move_x": 3.0, "repeat": 3 },
                { "jump": true, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(replay.level, 2);
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0].move_x, 1.0);
        assert!(expanded[3].jump_pressed);
        assert!(!expanded[4].jump_pressed);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn run_to_the_exit_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "level": 3,
              "frames": [
                { "repeat": 60 },
                { "move_x": 1.0, "jump": true, "repeat": 40 },
                { "move_x": 1.0, "attack": true, "repeat": 200 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let inputs = replay.expanded_inputs();

        let mut sink_a = Vec::new();
        let mut run_a = session(replay.level);
        let (outcome_a, ticks_a) = play(&mut run_a, &inputs, &mut sink_a);

        let mut sink_b = Vec::new();
        let mut run_b = session(replay.level);
        let (outcome_b, ticks_b) = play(&mut run_b, &inputs, &mut sink_b);

        assert_eq!(outcome_a, SessionOutcome::LevelComplete);
        assert_eq!((outcome_a, ticks_a), (outcome_b, ticks_b));
        assert_eq!(run_a.player.entity.rect, run_b.player.entity.rect);
        assert_eq!(sink_a, sink_b);
        assert_eq!(sink_a, vec![SoundCue::Jump, SoundCue::Attack]);

        let _ = fs::remove_file(path);
    }
}
