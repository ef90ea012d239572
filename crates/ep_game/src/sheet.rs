//! Sprite frames: a texture key plus the UV sub-rectangle one animation
//! frame occupies, and the helpers that cut horizontal strip sheets into
//! frames.

use std::sync::Arc;

use ep_render::WHITE_TEXTURE;

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub texture: Arc<str>,
    /// `[u0, v0, u1, v1]` inside `texture`.
    pub uv: [f32; 4],
    pub width: f32,
    pub height: f32,
    pub tint: [f32; 4],
}

impl SpriteFrame {
    /// Flat-coloured frame drawn with the built-in white texture.
    pub fn solid(width: f32, height: f32, rgb: [u8; 3]) -> Self {
        Self {
            texture: Arc::from(WHITE_TEXTURE),
            uv: [0.0, 0.0, 1.0, 1.0],
            width,
            height,
            tint: rgb_to_tint(rgb),
        }
    }

    /// UVs to draw with; horizontally mirrored when the owner faces left.
    pub fn uv_facing(&self, facing_right: bool) -> [f32; 4] {
        let [u0, v0, u1, v1] = self.uv;
        if facing_right {
            self.uv
        } else {
            [u1, v0, u0, v1]
        }
    }
}

pub fn rgb_to_tint(rgb: [u8; 3]) -> [f32; 4] {
    [
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
        1.0,
    ]
}

/// Cut a `cols`×`rows` grid out of a sheet, row-major. Frame size uses
/// integer division, so leftover pixels on the right/bottom are ignored.
pub fn split_sheet(
    texture: &Arc<str>,
    sheet_width: u32,
    sheet_height: u32,
    cols: u32,
    rows: u32,
) -> Result<Vec<SpriteFrame>, String> {
    if cols == 0 || rows == 0 {
        return Err(format!(
            "Sheet validation failed: '{texture}' needs at least one column and row"
        ));
    }
    let frame_w = sheet_width / cols;
    let frame_h = sheet_height / rows;
    if frame_w == 0 || frame_h == 0 {
        return Err(format!(
            "Sheet validation failed: '{texture}' ({sheet_width}x{sheet_height}) is too small for {cols}x{rows} frames"
        ));
    }

    let sw = sheet_width as f32;
    let sh = sheet_height as f32;
    let mut frames = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = (col * frame_w) as f32;
            let y = (row * frame_h) as f32;
            frames.push(SpriteFrame {
                texture: texture.clone(),
                uv: [
                    x / sw,
                    y / sh,
                    (x + frame_w as f32) / sw,
                    (y + frame_h as f32) / sh,
                ],
                width: frame_w as f32,
                height: frame_h as f32,
                tint: [1.0; 4],
            });
        }
    }
    Ok(frames)
}
