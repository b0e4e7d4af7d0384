pub mod log;
pub use self::log::*;

mod rect;
pub use rect::*;

mod time;
pub use time::*;
