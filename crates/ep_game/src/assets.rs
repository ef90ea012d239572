//! Asset registry: images, sound effects and music paths under one root.
//!
//! Constructed once at startup and passed by reference. Every load fails
//! open: a missing or broken image becomes a tinted 50×50 placeholder, a
//! missing sound becomes silence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ep_core::GameConfig;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};

use crate::audio::{MusicTrack, SoundCue};

const PLACEHOLDER_SIZE: u32 = 50;

/// Decoded RGBA8 pixels, keyed by the path they were requested with.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub key: Arc<str>,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub placeholder: bool,
}

#[derive(Debug, Clone)]
pub struct SoundHandle {
    pub path: PathBuf,
    pub bytes: Arc<[u8]>,
}

pub struct AssetRegistry {
    root: PathBuf,
    images: HashMap<Arc<str>, ImageData>,
    sounds: HashMap<SoundCue, SoundHandle>,
}

impl AssetRegistry {
    pub fn new(config: &GameConfig) -> Self {
        let mut registry = Self {
            root: PathBuf::from(&config.asset_root),
            images: HashMap::new(),
            sounds: HashMap::new(),
        };
        for cue in SoundCue::ALL {
            let path = registry.sound_path(cue);
            if let Some(handle) = load_sound(&path) {
                registry.sounds.insert(cue, handle);
            }
        }
        log::info!(
            "Assets: root '{}', {}/{} sounds loaded",
            registry.root.display(),
            registry.sounds.len(),
            SoundCue::ALL.len()
        );
        registry
    }

    /// `assets/images/{name}.png`
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.root.join("images").join(format!("{name}.png"))
    }

    pub fn sound_path(&self, cue: SoundCue) -> PathBuf {
        self.root
            .join("sounds")
            .join(format!("{}.wav", cue.file_stem()))
    }

    pub fn music_path(&self, track: MusicTrack) -> PathBuf {
        self.root
            .join("music")
            .join(format!("{}.mp3", track.file_stem()))
    }

    /// Load (or fetch from cache) `path`, scaled by an integer factor.
    pub fn load_image(&mut self, path: &Path, scale: u32) -> &ImageData {
        let key: Arc<str> = Arc::from(path.to_string_lossy().as_ref());
        self.images.entry(key.clone()).or_insert_with(|| {
            match decode_image(path, scale) {
                Ok((width, height, rgba)) => ImageData {
                    key,
                    width,
                    height,
                    rgba,
                    placeholder: false,
                },
                Err(err) => {
                    log::warn!("{err}; using placeholder");
                    placeholder_image(key)
                }
            }
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageData> {
        self.images.values()
    }

    pub fn sound(&self, cue: SoundCue) -> Option<&SoundHandle> {
        self.sounds.get(&cue)
    }
}

fn decode_image(path: &Path, scale: u32) -> Result<(u32, u32, Vec<u8>), String> {
    let decoded = image::open(path)
        .map_err(|e| format!("Failed to load image {}: {e}", path.display()))?
        .to_rgba8();
    let scale = scale.max(1);
    if scale == 1 {
        let (w, h) = decoded.dimensions();
        return Ok((w, h, decoded.into_raw()));
    }
    let (w, h) = (decoded.width() * scale, decoded.height() * scale);
    let scaled = image::imageops::resize(&decoded, w, h, FilterType::Nearest);
    Ok((w, h, scaled.into_raw()))
}

fn placeholder_image(key: Arc<str>) -> ImageData {
    let [r, g, b] = placeholder_tint(&key);
    let pixel_count = (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE) as usize;
    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for _ in 0..pixel_count {
        rgba.extend_from_slice(&[r, g, b, 255]);
    }
    ImageData {
        key,
        width: PLACEHOLDER_SIZE,
        height: PLACEHOLDER_SIZE,
        rgba,
        placeholder: true,
    }
}

/// Stable per-path colour with every channel in 50..=200.
pub fn placeholder_tint(key: &str) -> [u8; 3] {
    let digest = Sha256::digest(key.as_bytes());
    let channel = |byte: u8| 50 + (u16::from(byte) % 151) as u8;
    [channel(digest[0]), channel(digest[1]), channel(digest[2])]
}

pub fn load_sound(path: &Path) -> Option<SoundHandle> {
    match std::fs::read(path) {
        Ok(bytes) => Some(SoundHandle {
            path: path.to_path_buf(),
            bytes: bytes.into(),
        }),
        Err(e) => {
            log::warn!("Error loading sound {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ep_assets_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn registry_at(root: &Path) -> AssetRegistry {
        let config = GameConfig {
            asset_root: root.to_string_lossy().into_owned(),
            ..GameConfig::default()
        };
        AssetRegistry::new(&config)
    }

    #[test]
    fn missing_image_falls_back_to_deterministic_placeholder() {
        let root = temp_dir_path("missing");
        let mut assets = registry_at(&root);
        let path = assets.image_path("warrior_idle");

        let first = assets.load_image(&path, 2).clone();
        assert!(first.placeholder);
        assert_eq!((first.width, first.height), (50, 50));
        assert_eq!(first.rgba.len(), 50 * 50 * 4);

        let tint = placeholder_tint(&first.key);
        assert_eq!(&first.rgba[..3], &tint);
        assert!(tint.iter().all(|c| (50..=200).contains(c)));

        // Cached: same data, one entry.
        let again = assets.load_image(&path, 2).clone();
        assert_eq!(again.rgba, first.rgba);
        assert_eq!(assets.images().count(), 1);
    }

    #[test]
    fn png_is_decoded_and_scaled_nearest() {
        let root = temp_dir_path("png");
        std::fs::create_dir_all(root.join("images")).expect("create dirs");
        let mut sheet = image::RgbaImage::new(4, 2);
        sheet.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        sheet
            .save(root.join("images").join("mage_run.png"))
            .expect("write png");

        let mut assets = registry_at(&root);
        let path = assets.image_path("mage_run");
        let img = assets.load_image(&path, 2);
        assert!(!img.placeholder);
        assert_eq!((img.width, img.height), (8, 4));
        // Top-left 2x2 block is the red source pixel.
        assert_eq!(&img.rgba[..4], &[255, 0, 0, 255]);
        assert_eq!(&img.rgba[4..8], &[255, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn sounds_fail_open() {
        let root = temp_dir_path("sounds");
        std::fs::create_dir_all(root.join("sounds")).expect("create dirs");
        std::fs::write(root.join("sounds").join("coin.wav"), b"RIFF").expect("write wav");

        let assets = registry_at(&root);
        assert!(assets.sound(SoundCue::Coin).is_some());
        assert!(assets.sound(SoundCue::Jump).is_none());
        assert!(load_sound(&root.join("nope.wav")).is_none());

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn music_paths_follow_track_names() {
        let assets = registry_at(Path::new("assets"));
        assert_eq!(
            assets.music_path(MusicTrack::Level1),
            Path::new("assets").join("music").join("level1.mp3")
        );
    }
}
