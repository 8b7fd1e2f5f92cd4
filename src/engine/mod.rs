mod build;
mod movement;
mod output;
mod render;
mod step;

pub use build::try_handle_build;
pub use movement::try_handle_movement;
pub use output::{Output, OutputBlock};
pub use render::{render_map, render_room};
pub use step::handle_step;
