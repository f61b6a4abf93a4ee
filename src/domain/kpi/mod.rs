//! KPI series aggregate: data points, statistics and the source abstraction.

pub mod entities;
pub mod repositories;
pub mod services;

pub use entities::*;
pub use repositories::*;
pub use services::*;
