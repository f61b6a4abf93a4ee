pub mod chart;
pub mod errors;
pub mod kpi;
pub mod logging;
