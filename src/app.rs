use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WildfireDashboardApp {
    pub state: AppState,
}

impl WildfireDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WildfireDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Heading and input controls ----
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            panels::controls(ui, &mut self.state);
            ui.add_space(6.0);
        });

        // ---- Central panel: pie left, bar right ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            ui.columns(2, |cols: &mut [Ui]| {
                plot::chart_slot(&mut cols[0], &state.charts.pie, &state.colors);
                plot::chart_slot(&mut cols[1], &state.charts.bar, &state.colors);
            });
        });
    }
}
