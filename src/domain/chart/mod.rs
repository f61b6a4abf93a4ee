//! Chart aggregate: thresholds, annotations, scaling, geometry and interaction.

pub mod config;
pub mod entities;
pub mod geometry;
pub mod interaction;
pub mod positions;
pub mod repositories;
pub mod scaling;
pub mod store;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use geometry::*;
pub use interaction::*;
pub use positions::*;
pub use repositories::*;
pub use scaling::*;
pub use store::*;
pub use value_objects::*;
