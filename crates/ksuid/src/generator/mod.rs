mod factory;
mod interface;
mod monotonic;
mod mutex;
mod strategy;
mod subsec;
#[cfg(test)]
mod tests;

pub use factory::*;
pub use interface::*;
pub use monotonic::DRIFT_TOLERANCE;
pub use strategy::*;
