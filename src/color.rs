use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::MONTHS;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` evenly spaced hues, starting at `offset` degrees.
pub fn generate_palette(n: usize, offset: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Month → Color32
// ---------------------------------------------------------------------------

/// One colour per calendar month, keyed by month name so slices and bars keep
/// their colour whatever order the series is in.
#[derive(Debug, Clone)]
pub struct MonthColors {
    mapping: BTreeMap<&'static str, Color32>,
    default_color: Color32,
}

impl Default for MonthColors {
    fn default() -> Self {
        // start in the reds so the summer months (Dec–Feb) read as "hot"
        let palette = generate_palette(MONTHS.len(), 330.0);
        let mapping = MONTHS
            .iter()
            .zip(palette)
            .map(|(m, c)| (m.name(), c))
            .collect();
        MonthColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl MonthColors {
    /// Look up the colour for a chart label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_has_its_own_colour() {
        let colors = MonthColors::default();
        let mut seen: Vec<Color32> = MONTHS.iter().map(|m| colors.color_for(m.name())).collect();
        seen.sort_by_key(|c| c.to_array());
        seen.dedup();
        assert_eq!(seen.len(), 12);
        assert!(!seen.contains(&Color32::GRAY));
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        assert_eq!(MonthColors::default().color_for("Smarch"), Color32::GRAY);
    }
}
