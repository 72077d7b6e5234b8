pub mod json_lines;
pub mod live_data;
pub mod log_hook;

pub use json_lines::*;
pub use live_data::*;
pub use log_hook::*;
