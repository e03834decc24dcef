mod build_logs;
mod builds;

pub use build_logs::*;
pub use builds::*;
