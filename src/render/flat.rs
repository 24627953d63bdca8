use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartType, Dataset, palette, to_number};
use crate::error::{VizError, VizResult};

/// Backend-agnostic description of one 2D chart: point labels, one value
/// series, per-point fill colors, and scale configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatChartFrame {
    pub chart_type: ChartType,
    pub series_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub fill_colors: Vec<String>,
    pub border_color: String,
    /// Pie and doughnut omit x/y scales; every other flat type renders
    /// gridlined scales.
    pub axis_scales: bool,
}

impl FlatChartFrame {
    pub fn validate(&self) -> VizResult<()> {
        if self.labels.len() != self.values.len() || self.fill_colors.len() != self.values.len() {
            return Err(VizError::RenderFailure(
                "flat frame label/value/color lengths diverge".to_owned(),
            ));
        }
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(VizError::RenderFailure(
                "flat frame contains a non-finite value".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Projects the selected columns of a dataset into a flat chart frame.
///
/// Labels come from the x column, falling back to `Row {i+1}` for empty
/// cells. Values run through total numeric coercion, so every row plots.
/// Fill colors are assigned by index into the fixed palette, cycling past
/// its end.
pub fn project_flat_chart(
    dataset: &Dataset,
    chart_type: ChartType,
    x_axis: &str,
    y_axis: &str,
) -> VizResult<FlatChartFrame> {
    let x_index = dataset.column_index(x_axis);
    let y_index = dataset.column_index(y_axis);

    let mut labels = Vec::with_capacity(dataset.row_count());
    let mut values = Vec::with_capacity(dataset.row_count());
    for (i, row) in dataset.rows.iter().enumerate() {
        let raw_x = x_index.and_then(|ix| row.get(ix));
        let raw_y = y_index.and_then(|iy| row.get(iy));

        labels.push(
            raw_x
                .and_then(|cell| cell.display_text())
                .unwrap_or_else(|| format!("Row {}", i + 1)),
        );
        values.push(raw_y.map_or(0.0, to_number));
    }

    // Unreachable while coercion stays total and datasets reject zero rows;
    // kept so the flat path fails like the spatial path if either changes.
    if values.is_empty() {
        return Err(VizError::NoNumericData);
    }

    let fill_colors = (0..values.len())
        .map(|i| palette::color_for_index(i).to_owned())
        .collect();

    debug!(
        chart_type = %chart_type,
        points = values.len(),
        "projected flat chart frame"
    );

    Ok(FlatChartFrame {
        chart_type,
        series_label: if y_axis.is_empty() {
            "Value".to_owned()
        } else {
            y_axis.to_owned()
        },
        labels,
        values,
        fill_colors,
        border_color: palette::FLAT_BORDER_COLOR.to_owned(),
        axis_scales: chart_type.uses_axis_scales(),
    })
}
