pub mod diagnosis;
pub mod features;

pub use diagnosis::*;
pub use features::*;
