#[cfg(feature = "std")]
mod fast_random;
mod interface;
#[cfg(feature = "std")]
mod thread_random;

#[cfg(feature = "std")]
pub use fast_random::*;
pub use interface::*;
#[cfg(feature = "std")]
pub use thread_random::*;
