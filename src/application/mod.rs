pub mod coordinator;
pub mod series_query;
pub mod threshold_seeding;

pub use coordinator::*;
pub use series_query::*;
pub use threshold_seeding::*;
