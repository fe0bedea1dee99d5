#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_logging, render_garden_to_png, RenderConfig, TypeStyle};
