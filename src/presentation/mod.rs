pub mod annotation_popover;
pub mod chart_view;
pub mod format;
pub mod threshold_controls;
