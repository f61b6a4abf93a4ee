use crate::domain::{
    chart::{AxisDomain, ChartGeometry, Threshold},
    kpi::DataPoint,
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const GRID_COLOR: &str = "#e5e7eb";
const AXIS_TEXT_COLOR: &str = "#6b7280";
const LINE_COLOR: &str = "#3b82f6";
const Y_TICKS: usize = 5;

/// Evenly spaced Y axis tick values from `min` to `max`, both included.
pub fn axis_ticks(domain: &AxisDomain, intervals: usize) -> Vec<f64> {
    if intervals == 0 || domain.is_degenerate() {
        return vec![domain.min];
    }
    let step = domain.range() / intervals as f64;
    (0..=intervals).map(|i| domain.min + step * i as f64).collect()
}

/// Compact axis label such as `$550K` or `$1.2M`.
pub fn tick_label(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.0}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Canvas 2D line chart: grid, axes, revenue line and threshold lines.
///
/// Handles and annotation markers are DOM overlays and are not drawn here.
pub struct LineChartRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl LineChartRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;
        Ok(Self { canvas, context })
    }

    pub fn render(
        &self,
        geometry: &ChartGeometry,
        series: &[DataPoint],
        thresholds: &[Threshold],
    ) -> Result<(), JsValue> {
        let width = geometry.width.max(0.0) as u32;
        let height = geometry.height.max(0.0) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }

        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, geometry.width, geometry.height);

        self.render_grid(geometry)?;
        self.render_x_labels(geometry, series)?;
        self.render_line(geometry, series);
        for threshold in thresholds.iter().filter(|t| t.is_visible) {
            self.render_threshold(geometry, threshold)?;
        }

        get_logger().trace(
            LogComponent::Infrastructure("LineChartRenderer"),
            &format!("rendered {} points, {} thresholds", series.len(), thresholds.len()),
        );
        Ok(())
    }

    fn render_grid(&self, geometry: &ChartGeometry) -> Result<(), JsValue> {
        let ctx = &self.context;
        let left = geometry.content_box.left;
        let right = left + geometry.inner_width();

        ctx.set_line_width(1.0);
        ctx.set_line_dash(&js_sys::Array::of2(&3.0.into(), &3.0.into()))?;
        ctx.set_font("12px sans-serif");
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");

        for value in axis_ticks(&geometry.domain, Y_TICKS) {
            let y = geometry.value_to_pixel_y(value);
            ctx.set_stroke_style(&JsValue::from(GRID_COLOR));
            ctx.begin_path();
            ctx.move_to(left, y);
            ctx.line_to(right, y);
            ctx.stroke();

            ctx.set_fill_style(&JsValue::from(AXIS_TEXT_COLOR));
            ctx.fill_text(&tick_label(value), left - 24.0, y)?;
        }
        ctx.set_line_dash(&js_sys::Array::new())?;
        Ok(())
    }

    fn render_x_labels(&self, geometry: &ChartGeometry, series: &[DataPoint]) -> Result<(), JsValue> {
        let ctx = &self.context;
        let baseline = geometry.content_box.top + geometry.inner_height() + 18.0;
        ctx.set_fill_style(&JsValue::from(AXIS_TEXT_COLOR));
        ctx.set_text_align("center");
        for (index, point) in series.iter().enumerate() {
            let x = geometry.index_to_pixel_x(index, series.len());
            ctx.fill_text(&point.label, x, baseline)?;
        }
        Ok(())
    }

    fn render_line(&self, geometry: &ChartGeometry, series: &[DataPoint]) {
        let ctx = &self.context;
        ctx.set_stroke_style(&JsValue::from(LINE_COLOR));
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (index, point) in series.iter().enumerate() {
            let x = geometry.index_to_pixel_x(index, series.len());
            let y = geometry.value_to_pixel_y(point.value);
            if index == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style(&JsValue::from(LINE_COLOR));
        for (index, point) in series.iter().enumerate() {
            let x = geometry.index_to_pixel_x(index, series.len());
            let y = geometry.value_to_pixel_y(point.value);
            ctx.begin_path();
            let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }

    fn render_threshold(&self, geometry: &ChartGeometry, threshold: &Threshold) -> Result<(), JsValue> {
        let ctx = &self.context;
        let y = geometry.value_to_pixel_y(threshold.value);
        let left = geometry.content_box.left;

        ctx.set_stroke_style(&JsValue::from(threshold.color.as_str()));
        ctx.set_line_width(2.0);
        ctx.set_line_dash(&js_sys::Array::of2(&5.0.into(), &5.0.into()))?;
        ctx.begin_path();
        ctx.move_to(left, y);
        ctx.line_to(left + geometry.inner_width(), y);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())?;
        Ok(())
    }
}
