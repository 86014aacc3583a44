mod interface;
mod precision;
mod system_clock;

pub use interface::*;
pub use precision::*;
pub use system_clock::*;
