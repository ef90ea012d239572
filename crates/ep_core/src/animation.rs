//! Frame-index animation player.
//!
//! An `Animation` walks an ordered list of frames at a fractional speed
//! (frames per tick). The playhead is advanced once per fixed simulation
//! step, so playback is fully deterministic under the engine's fixed
//! timestep. Looping clips wrap back to frame 0; one-shot clips park on
//! their last frame and raise `done`.
//!
//! The frame type is generic: the game stores sprite regions, tests use
//! plain strings.

#[derive(Debug, Clone)]
pub struct Animation<F> {
    frames: Vec<F>,
    speed: f32,
    looping: bool,
    position: f32,
    done: bool,
}

impl<F> Animation<F> {
    pub fn new(frames: Vec<F>, speed: f32, looping: bool) -> Self {
        Self {
            frames,
            speed,
            looping,
            position: 0.0,
            done: false,
        }
    }

    /// Rewind to the first frame and clear `done`.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.done = false;
    }

    /// Move the playhead forward by `speed` frames.
    pub fn advance(&mut self) {
        if self.done || self.frames.is_empty() {
            return;
        }

        self.position += self.speed;
        let len = self.frames.len() as f32;
        if self.position >= len {
            if self.looping {
                self.position = 0.0;
            } else {
                self.position = len - 1.0;
                self.done = true;
            }
        }
    }

    /// Index of the frame under the playhead, clamped to `[0, len - 1]`.
    pub fn frame_index(&self) -> usize {
        let last = self.frames.len().saturating_sub(1);
        (self.position.max(0.0).floor() as usize).min(last)
    }

    /// Frame under the playhead. `None` only for an empty clip.
    pub fn current_frame(&self) -> Option<&F> {
        self.frames.get(self.frame_index())
    }

    /// True once a one-shot clip has reached its last frame. Always false
    /// for looping clips.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
