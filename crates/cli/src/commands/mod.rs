pub mod analyze;
pub mod report;
pub mod resolvers;
pub mod util;

pub use analyze::*;
pub use report::*;
pub use resolvers::*;
pub use util::*;
