pub mod calendar;
pub mod clock_time;
pub mod date_range;
pub mod error;
pub mod preset;
pub mod selection;
pub mod timezone;

pub use calendar::*;
pub use clock_time::*;
pub use date_range::*;
pub use error::*;
pub use preset::*;
pub use selection::*;
pub use timezone::*;
