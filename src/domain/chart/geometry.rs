use super::{AxisDomain, ChartConfig, ContainerRect, ContentBox, PixelPoint};
use crate::domain::kpi::DataPoint;

/// Conversions between data space (value, index) and container pixels.
///
/// Every method is pure and never returns NaN: degenerate domains and
/// collapsed boxes map to well-defined fallbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub content_box: ContentBox,
    pub width: f64,
    pub height: f64,
    pub domain: AxisDomain,
}

impl ChartGeometry {
    pub fn new(content_box: ContentBox, width: f64, height: f64, domain: AxisDomain) -> Self {
        Self { content_box, width, height, domain }
    }

    /// Geometry for a measured container, `None` if the container is not measurable.
    pub fn measured(rect: &ContainerRect, config: &ChartConfig, domain: AxisDomain) -> Option<Self> {
        rect.is_measurable()
            .then(|| Self::new(config.content_box, rect.width, rect.height, domain))
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.content_box.left - self.content_box.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.content_box.top - self.content_box.bottom).max(0.0)
    }

    /// Convert a value to a Y coordinate (larger values sit higher)
    pub fn value_to_pixel_y(&self, value: f64) -> f64 {
        let top = self.content_box.top;
        let inner_h = self.inner_height();
        if self.domain.is_degenerate() || !value.is_finite() {
            return top + inner_h / 2.0;
        }
        let normalized = (value - self.domain.min) / self.domain.range();
        top + inner_h * (1.0 - normalized)
    }

    /// Convert a Y coordinate back to a value. The result is not clamped.
    pub fn pixel_y_to_value(&self, y: f64) -> f64 {
        let inner_h = self.inner_height();
        if self.domain.is_degenerate() || inner_h == 0.0 || !y.is_finite() {
            return self.domain.min;
        }
        let normalized = 1.0 - (y - self.content_box.top) / inner_h;
        self.domain.min + self.domain.range() * normalized
    }

    pub fn index_to_pixel_x(&self, index: usize, len: usize) -> f64 {
        let left = self.content_box.left;
        if len < 2 {
            return left;
        }
        left + self.inner_width() * index as f64 / (len - 1) as f64
    }

    /// Nearest data index for an X coordinate, `None` for an empty series.
    pub fn pixel_x_to_index(&self, x: f64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let inner_w = self.inner_width();
        if len == 1 || inner_w == 0.0 || !x.is_finite() {
            return Some(0);
        }
        let raw = (x - self.content_box.left) / inner_w * (len - 1) as f64;
        let last = (len - 1) as f64;
        Some(raw.round().clamp(0.0, last) as usize)
    }

    /// Pixel position of a data point, `None` when the index is outside the series.
    pub fn point_at(&self, series: &[DataPoint], index: usize) -> Option<PixelPoint> {
        let point = series.get(index)?;
        Some(PixelPoint::new(
            self.index_to_pixel_x(index, series.len()),
            self.value_to_pixel_y(point.value),
        ))
    }
}
