//! Document source strategies.
//!
//! Only the filesystem strategy (`fs` module) exists. `run_validation` takes
//! plain paths, so a second source would plug in before it without a trait.

pub mod fs;
