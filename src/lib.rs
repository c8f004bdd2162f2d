//! Australia wildfire dashboard.
//!
//! Loads historical wildfire observations, and for a chosen region and year
//! aggregates monthly means of estimated fire area and fire-pixel count into
//! two chart specs (pie and bar) that the egui shell renders.

pub mod app;
pub mod chart;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
