use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::SeriesColors;
use crate::data::frame::{AxisKind, PlotAxis, WorkingFrame, CELSIUS_SERIES, HUMIDITY_SERIES};
use crate::data::timestamp::from_epoch_seconds;

// ---------------------------------------------------------------------------
// Trend plot (central panel)
// ---------------------------------------------------------------------------

/// Render the temperature (and humidity) trend of the working frame.
pub fn trend_plot(ui: &mut Ui, frame: &WorkingFrame) {
    let axis = frame.x_axis();
    let colors = SeriesColors::default();

    let temperature = segments(&axis.xs, &frame.celsius);
    let humidity = frame
        .humidity
        .as_ref()
        .map(|h| segments(&axis.xs, h))
        .unwrap_or_default();

    let x_label = axis.name.clone();
    let formatter_axis = axis;

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label(x_label)
        .x_axis_formatter(move |mark, _range| axis_label(&formatter_axis, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Lines with the same name share one legend entry.
            for points in temperature {
                plot_ui.line(
                    Line::new(PlotPoints::new(points))
                        .name(CELSIUS_SERIES)
                        .color(colors.temperature)
                        .width(1.5),
                );
            }
            for points in humidity {
                plot_ui.line(
                    Line::new(PlotPoints::new(points))
                        .name(HUMIDITY_SERIES)
                        .color(colors.humidity)
                        .width(1.5),
                );
            }
        });
}

/// Split a series into runs of consecutive present values so gaps stay gaps.
fn segments(xs: &[f64], ys: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut out = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (&x, y) in xs.iter().zip(ys) {
        match y {
            Some(y) => current.push([x, *y]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn axis_label(axis: &PlotAxis, value: f64) -> String {
    match axis.kind {
        AxisKind::Time => from_epoch_seconds(value)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
        AxisKind::Ordinal => {
            let rounded = value.round();
            if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            axis.labels
                .get(rounded as usize)
                .cloned()
                .unwrap_or_default()
        }
        AxisKind::RowIndex | AxisKind::Numeric => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_break_at_missing_values() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [Some(1.0), Some(2.0), None, None, Some(5.0)];
        assert_eq!(
            segments(&xs, &ys),
            vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[4.0, 5.0]]]
        );
        assert!(segments(&xs, &[None; 5]).is_empty());
    }

    #[test]
    fn ordinal_labels_only_on_whole_positions() {
        let axis = PlotAxis {
            kind: AxisKind::Ordinal,
            name: "when".into(),
            xs: vec![0.0, 1.0],
            labels: vec!["dawn".into(), "dusk".into()],
        };
        assert_eq!(axis_label(&axis, 1.0), "dusk");
        assert_eq!(axis_label(&axis, 0.5), "");
        assert_eq!(axis_label(&axis, 7.0), "");
        assert_eq!(axis_label(&axis, -1.0), "");
    }
}
