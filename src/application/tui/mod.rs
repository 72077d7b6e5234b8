pub mod icons;
pub mod picker_view;
pub mod renderer;
pub mod theme;

pub use picker_view::*;
pub use renderer::*;
pub use theme::*;
