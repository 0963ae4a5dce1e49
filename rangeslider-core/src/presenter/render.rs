//! Pure builders for the data the presenter pushes to the view.

use crate::domain::{DisplayValue, Handles, SliderState};
use crate::grid::ScaleOptions;
use crate::view::RenderData;

/// Label at a numeric index, or the number itself when there is no overlay
/// or the index falls outside it.
pub fn label_at(labels: &[DisplayValue], value: f64) -> DisplayValue {
    if labels.is_empty() || value < 0.0 {
        return DisplayValue::Number(value);
    }
    labels
        .get(value.round() as usize)
        .cloned()
        .unwrap_or(DisplayValue::Number(value))
}

/// Scale ticks for `state` in value-space (labels substituted) and in
/// percentage-space. Both vectors have the same length and order.
pub fn scale_data(
    state: &SliderState,
    scale: &ScaleOptions,
    labels: &[DisplayValue],
) -> (Vec<DisplayValue>, Vec<f64>) {
    let grid = state.grid();
    let ticks = grid.ticks(scale);
    let percentages = ticks.iter().map(|&v| grid.value_to_percent(v)).collect();
    let values = ticks.into_iter().map(|v| label_at(labels, v)).collect();
    (values, percentages)
}

/// Everything the view needs to draw `state`.
pub fn build_render_data(
    state: &SliderState,
    scale: &ScaleOptions,
    labels: &[DisplayValue],
) -> RenderData {
    let grid = state.grid();
    let handles = state.handles();
    let (data, percentage_data) = scale_data(state, scale, labels);

    RenderData {
        value: handles.map(|v| label_at(labels, v)),
        percentage: handles.map(|v| grid.value_to_percent(v)),
        data,
        percentage_data,
    }
}
