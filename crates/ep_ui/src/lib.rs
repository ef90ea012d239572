pub mod canvas;
pub mod ui_layer;

pub use canvas::{Canvas, Rgb};
pub use ui_layer::{FrameStats, UiFrame, UiLayer};
