//! Session-wide state that outlives individual levels: which level is
//! running, who is playing, and the persisted high-score table.

use std::fs;
use std::path::{Path, PathBuf};

use ep_core::GameConfig;
use serde::{Deserialize, Serialize};

use crate::player::CharacterClass;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// One row of the score file. `class` stays a free string so entries
/// written by other builds survive a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub class: String,
    pub score: i64,
    #[serde(default = "first_level")]
    pub level: u32,
}

fn first_level() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub current_level: u32,
    pub max_level: u32,
    pub player_name: String,
    pub player_class: CharacterClass,
    pub highscores: Vec<HighScore>,
    highscores_path: PathBuf,
    highscore_limit: usize,
    name_max_len: usize,
}

impl GameState {
    /// Fresh state with the score table read from disk. A missing or
    /// unreadable file gives an empty table.
    pub fn load(config: &GameConfig) -> Self {
        let highscores_path = PathBuf::from(&config.highscores_path);
        let highscores = match load_highscores_from_path(&highscores_path) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("{err}; starting with no high scores");
                Vec::new()
            }
        };
        Self {
            current_level: 1,
            max_level: config.max_level,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            player_class: CharacterClass::default(),
            highscores,
            highscores_path,
            highscore_limit: config.highscore_limit,
            name_max_len: config.name_max_len,
        }
    }

    pub fn name_max_len(&self) -> usize {
        self.name_max_len
    }

    /// Blank names fall back to the default.
    pub fn set_player_name(&mut self, typed: &str) {
        self.player_name = if typed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            typed.chars().take(self.name_max_len).collect()
        };
    }

    /// Advance to the next level. Returns false at the last level.
    pub fn next_level(&mut self) -> bool {
        if self.current_level < self.max_level {
            self.current_level += 1;
            true
        } else {
            false
        }
    }

    pub fn reset_level(&mut self) {
        self.current_level = 1;
    }

    /// Record `score` for the current player, keep the best
    /// `highscore_limit` entries (ties keep insertion order) and rewrite
    /// the file.
    pub fn save_highscore(&mut self, score: u32) -> Result<(), String> {
        self.highscores.push(HighScore {
            name: self.player_name.clone(),
            class: self.player_class.id().to_string(),
            score: i64::from(score),
            level: self.current_level,
        });
        self.highscores.sort_by(|a, b| b.score.cmp(&a.score));
        self.highscores.truncate(self.highscore_limit);
        write_highscores_to_path(&self.highscores_path, &self.highscores)?;
        log::info!(
            "Saved score {score} for {} ({} entries)",
            self.player_name,
            self.highscores.len()
        );
        Ok(())
    }
}

/// Read the score table. A file that is not a JSON list is an error;
/// individual rows that do not decode are skipped with a warning.
pub fn load_highscores_from_path(path: &Path) -> Result<Vec<HighScore>, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse high scores {}: {e}", path.display()))?;
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value::<HighScore>(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping high score #{} in {}: {e}", i + 1, path.display());
                None
            }
        })
        .collect())
}

fn write_highscores_to_path(path: &Path, scores: &[HighScore]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(scores)
        .map_err(|e| format!("Failed to serialize high scores: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ep_scores_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn state_at(path: &Path) -> GameState {
        let config = GameConfig {
            highscores_path: path.to_string_lossy().into_owned(),
            ..GameConfig::default()
        };
        GameState::load(&config)
    }

    fn entry(name: &str, score: i64) -> HighScore {
        HighScore {
            name: name.to_string(),
            class: "archer".to_string(),
            score,
            level: 3,
        }
    }

    #[test]
    fn missing_or_corrupt_file_means_empty_table() {
        let path = temp_file_path("missing");
        assert!(state_at(&path).highscores.is_empty());

        fs::write(&path, "{not json").expect("write temp file");
        assert!(state_at(&path).highscores.is_empty());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_classes_and_bad_rows_do_not_wipe_the_table() {
        let path = temp_file_path("lenient");
        fs::write(
            &path,
            r#"[
                { "name": "ann", "class": "archer", "score": 300, "level": 3 },
                { "name": "rex", "class": "rogue", "score": -20, "level": 2 },
                { "name": "broken", "score": "lots" },
                { "name": "old", "class": "mage", "score": 50 }
            ]"#,
        )
        .expect("write temp file");

        let mut state = state_at(&path);
        let names: Vec<&str> = state.highscores.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["ann", "rex", "old"]);
        assert_eq!(state.highscores[1].class, "rogue");
        assert_eq!(state.highscores[2].level, 1);

        state.save_highscore(100).expect("save");
        let reloaded = load_highscores_from_path(&path).expect("reload");
        let scores: Vec<i64> = reloaded.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![300, 100, 50, -20]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_sorts_descending_and_persists() {
        let path = temp_file_path("persist");
        let mut state = state_at(&path);
        state.player_name = "ada".to_string();
        state.player_class = CharacterClass::Mage;
        state.current_level = 3;

        state.save_highscore(100).expect("save");
        state.save_highscore(300).expect("save");
        state.save_highscore(200).expect("save");
        let scores: Vec<i64> = state.highscores.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);

        let raw = fs::read_to_string(&path).expect("read back");
        assert!(raw.contains("\"class\": \"mage\""));
        let reloaded = state_at(&path);
        assert_eq!(reloaded.highscores, state.highscores);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn full_table_of_better_scores_is_unchanged() {
        let path = temp_file_path("full");
        let existing: Vec<HighScore> = (0..10).map(|i| entry("pro", 1000 - i * 10)).collect();
        fs::write(&path, serde_json::to_string(&existing).expect("json")).expect("write");

        let mut state = state_at(&path);
        state.save_highscore(5).expect("save");
        assert_eq!(state.highscores, existing);
        assert_eq!(
            load_highscores_from_path(&path).expect("reload"),
            existing
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn equal_scores_keep_older_entry_first() {
        let path = temp_file_path("ties");
        let mut state = state_at(&path);
        state.player_name = "first".to_string();
        state.save_highscore(50).expect("save");
        state.player_name = "second".to_string();
        state.save_highscore(50).expect("save");
        assert_eq!(state.highscores[0].name, "first");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = temp_file_path("dir");
        fs::create_dir_all(&dir).expect("create dir");
        let mut state = state_at(&dir);
        let err = state.save_highscore(10).expect_err("directory is not writable as a file");
        assert!(err.contains("Failed to write"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn level_progression_and_reset() {
        let mut state = state_at(&temp_file_path("levels"));
        assert!(state.next_level());
        assert!(state.next_level());
        assert_eq!(state.current_level, 3);
        assert!(!state.next_level());
        assert_eq!(state.current_level, 3);

        state.reset_level();
        assert_eq!(state.current_level, 1);
    }

    #[test]
    fn blank_name_defaults_and_long_names_are_capped() {
        let mut state = state_at(&temp_file_path("names"));
        state.set_player_name("");
        assert_eq!(state.player_name, "Player");
        state.set_player_name("abcdefghijklmnopqrst");
        assert_eq!(state.player_name.chars().count(), 15);
    }
}
