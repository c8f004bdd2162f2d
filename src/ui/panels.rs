use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::MonthOrder;
use crate::data::model::Region;
use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Controls – title, region radio buttons, year dropdown
// ---------------------------------------------------------------------------

/// Render the dashboard heading and the input controls, then run the query
/// handler so the charts follow any change made this frame.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("Australia Wildfire Dashboard")
                .size(26.0)
                .strong()
                .color(TITLE_COLOR),
        );
    });
    ui.add_space(6.0);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(RichText::new("Select Region:").heading());
        ui.add_space(16.0);
        for region in Region::ALL {
            ui.radio_value(&mut state.region, region, region.label());
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Select Year:").heading());
        ui.add_space(16.0);
        egui::ComboBox::from_id_salt("year")
            .selected_text(state.year.to_string())
            .height(320.0)
            .show_ui(ui, |ui: &mut Ui| {
                for &year in &state.dataset.years {
                    ui.selectable_value(&mut state.year, year, year.to_string());
                }
            });

        ui.add_space(24.0);
        ui.label("Month order:");
        egui::ComboBox::from_id_salt("month_order")
            .selected_text(state.month_order.label())
            .show_ui(ui, |ui: &mut Ui| {
                for order in MonthOrder::ALL {
                    ui.selectable_value(&mut state.month_order, order, order.label());
                }
            });
    });

    state.refresh();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} observations from {}, {} in selection",
            state.dataset.len(),
            state.source,
            state.charts.matched_rows
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open wildfire observations")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_path(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} observations covering years {:?} from {}",
                    dataset.len(),
                    dataset.years,
                    path.display()
                );
                state.set_dataset(dataset, path.display().to_string());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
