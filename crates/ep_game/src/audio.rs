//! Sound effects and music.
//!
//! Gameplay code only sees the `SoundSink` trait, so simulation stays
//! testable without an output device. `AudioSystem` is the real sink: with
//! the `audio` feature it plays through rodio, otherwise every call is a
//! no-op.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::{AssetRegistry, SoundHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Attack,
    Hurt,
    Coin,
    Victory,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Jump,
        SoundCue::Attack,
        SoundCue::Hurt,
        SoundCue::Coin,
        SoundCue::Victory,
    ];

    pub fn file_stem(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Attack => "attack",
            SoundCue::Hurt => "hurt",
            SoundCue::Coin => "coin",
            SoundCue::Victory => "victory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Level1,
    Level2,
    Level3,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 4] = [
        MusicTrack::Menu,
        MusicTrack::Level1,
        MusicTrack::Level2,
        MusicTrack::Level3,
    ];

    pub fn for_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(MusicTrack::Level1),
            2 => Some(MusicTrack::Level2),
            3 => Some(MusicTrack::Level3),
            _ => None,
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Level1 => "level1",
            MusicTrack::Level2 => "level2",
            MusicTrack::Level3 => "level3",
        }
    }
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Background music. A new track replaces the one playing.
pub trait MusicSink {
    fn play_music(&mut self, track: MusicTrack, looping: bool, volume: f32);
}

/// Records cues instead of playing them.
impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

#[cfg(feature = "audio")]
mod backend {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    pub struct Backend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
    }

    impl Backend {
        pub fn open() -> Result<Self, String> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| format!("Failed to open audio output: {e}"))?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
            })
        }

        pub fn play_effect(&self, bytes: Arc<[u8]>) -> Result<(), String> {
            let source = Decoder::new(Cursor::new(bytes))
                .map_err(|e| format!("Failed to decode sound: {e}"))?;
            self.handle
                .play_raw(source.convert_samples())
                .map_err(|e| format!("Failed to play sound: {e}"))
        }

        pub fn play_music(
            &mut self,
            bytes: Arc<[u8]>,
            looping: bool,
            volume: f32,
        ) -> Result<(), String> {
            if let Some(previous) = self.music.take() {
                previous.stop();
            }
            let sink =
                Sink::try_new(&self.handle).map_err(|e| format!("Failed to open music sink: {e}"))?;
            sink.set_volume(volume);
            if looping {
                let source = Decoder::new_looped(Cursor::new(bytes))
                    .map_err(|e| format!("Failed to decode music: {e}"))?;
                sink.append(source);
            } else {
                let source = Decoder::new(Cursor::new(bytes))
                    .map_err(|e| format!("Failed to decode music: {e}"))?;
                sink.append(source);
            }
            self.music = Some(sink);
            Ok(())
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::sync::Arc;

    #[allow(dead_code)]
    pub struct Backend;

    impl Backend {
        pub fn open() -> Result<Self, String> {
            Err("built without the `audio` feature".to_string())
        }

        pub fn play_effect(&self, _bytes: Arc<[u8]>) -> Result<(), String> {
            Ok(())
        }

        pub fn play_music(
            &mut self,
            _bytes: Arc<[u8]>,
            _looping: bool,
            _volume: f32,
        ) -> Result<(), String> {
            Ok(())
        }
    }
}

pub struct AudioSystem {
    backend: Option<backend::Backend>,
    effects: HashMap<SoundCue, SoundHandle>,
    music: HashMap<MusicTrack, PathBuf>,
}

impl AudioSystem {
    /// Sound effects come from the registry's preloaded handles; missing
    /// ones stay silent.
    pub fn new(assets: &AssetRegistry) -> Self {
        let backend = match backend::Backend::open() {
            Ok(backend) => Some(backend),
            Err(err) => {
                log::info!("Audio disabled: {err}");
                None
            }
        };
        let effects = SoundCue::ALL
            .iter()
            .filter_map(|&cue| assets.sound(cue).map(|h| (cue, h.clone())))
            .collect();
        let music = MusicTrack::ALL
            .iter()
            .map(|&track| (track, assets.music_path(track)))
            .collect();
        Self {
            backend,
            effects,
            music,
        }
    }
}

impl MusicSink for AudioSystem {
    /// Failures are logged and otherwise ignored.
    fn play_music(&mut self, track: MusicTrack, looping: bool, volume: f32) {
        let Some(backend) = self.backend.as_mut() else {
            log::debug!("play_music({}) skipped, no audio output", track.file_stem());
            return;
        };
        let Some(path) = self.music.get(&track) else {
            return;
        };
        let bytes: Arc<[u8]> = match std::fs::read(path) {
            Ok(data) => data.into(),
            Err(e) => {
                log::warn!("Failed to read music {}: {e}", path.display());
                return;
            }
        };
        if let Err(err) = backend.play_music(bytes, looping, volume) {
            log::warn!("Error playing music {}: {err}", track.file_stem());
        }
    }
}

impl SoundSink for AudioSystem {
    fn play(&mut self, cue: SoundCue) {
        let (Some(backend), Some(handle)) = (self.backend.as_ref(), self.effects.get(&cue)) else {
            return;
        };
        if let Err(err) = backend.play_effect(handle.bytes.clone()) {
            log::warn!("Sound {} failed: {err}", handle.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<SoundCue> = Vec::new();
        sink.play(SoundCue::Jump);
        sink.play(SoundCue::Coin);
        assert_eq!(sink, vec![SoundCue::Jump, SoundCue::Coin]);
    }

    #[test]
    fn effects_keep_the_file_they_came_from() {
        let root = std::env::temp_dir().join(format!("ep_audio_test_{}", std::process::id()));
        std::fs::create_dir_all(root.join("sounds")).expect("create dirs");
        std::fs::write(root.join("sounds").join("jump.wav"), b"RIFF").expect("write wav");
        let config = ep_core::GameConfig {
            asset_root: root.to_string_lossy().into_owned(),
            ..ep_core::GameConfig::default()
        };

        let audio = AudioSystem::new(&AssetRegistry::new(&config));
        assert_eq!(audio.effects.len(), 1);
        assert_eq!(
            audio.effects[&SoundCue::Jump].path,
            root.join("sounds").join("jump.wav")
        );
        assert_eq!(
            audio.music[&MusicTrack::Menu],
            root.join("music").join("menu.mp3")
        );
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn level_tracks_cover_playable_levels_only() {
        assert_eq!(MusicTrack::for_level(1), Some(MusicTrack::Level1));
        assert_eq!(MusicTrack::for_level(3), Some(MusicTrack::Level3));
        assert_eq!(MusicTrack::for_level(0), None);
        assert_eq!(MusicTrack::for_level(4), None);
        assert_eq!(MusicTrack::Level2.file_stem(), "level2");
    }
}
