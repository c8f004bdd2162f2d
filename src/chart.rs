use serde::Serialize;

use crate::data::aggregate::AggregateSeries;

// ---------------------------------------------------------------------------
// ChartSpec – declarative description handed to the renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// One slice or bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Renderer-agnostic chart: kind, ordered data, and text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Name of the categorical axis (bar x-axis, pie slice names).
    pub category_label: String,
    /// Name of the value axis (bar y-axis, pie slice sizes).
    pub value_label: String,
    pub points: Vec<ChartPoint>,
}

fn points_from(series: &AggregateSeries) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|(month, value)| ChartPoint {
            label: month.name().to_string(),
            value,
        })
        .collect()
}

/// Pie chart of the monthly average estimated fire area.
pub fn to_pie_spec(fire_area: &AggregateSeries, region: &str, year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: format!("{region} : Monthly Average Estimated Fire Area in year {year}"),
        category_label: "Month".to_string(),
        value_label: "Estimated_fire_area".to_string(),
        points: points_from(fire_area),
    }
}

/// Bar chart of the monthly average count of fire pixels.
pub fn to_bar_spec(pixel_count: &AggregateSeries, region: &str, year: i32) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!(
            "{region} : Average Count of Pixels for Presumed Vegetation Fires in year {year}"
        ),
        category_label: "Month".to_string(),
        value_label: "Count".to_string(),
        points: points_from(pixel_count),
    }
}
