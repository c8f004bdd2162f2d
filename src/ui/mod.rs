//! Immediate-mode widgets: controls/status bar and the two chart slots.

pub mod panels;
pub mod plot;
