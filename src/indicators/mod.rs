pub mod registry;
pub mod snapshot;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use registry::*;
pub use snapshot::*;
