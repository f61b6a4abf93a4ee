use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Value Object - Threshold identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdId(String);

impl ThresholdId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Value Object - Annotation identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Value Object - Y axis domain `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0 || !self.range().is_finite()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Value Object - Insets of the plot area inside the chart container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Value Object - Measured container rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A container that is detached or collapsed cannot host overlays.
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Converts client coordinates into container-local coordinates.
    pub fn local_point(&self, client_x: f64, client_y: f64) -> PixelPoint {
        PixelPoint::new(client_x - self.left, client_y - self.top)
    }
}

/// Value Object - Pixel position inside the chart container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ThresholdId::new("threshold-1-0");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"threshold-1-0\"");
        let back: AnnotationId = serde_json::from_str("\"annotation-7-2\"").unwrap();
        assert_eq!(back.as_str(), "annotation-7-2");
    }

    #[test]
    fn domain_clamps_into_bounds() {
        let domain = AxisDomain::new(100.0, 200.0);
        assert_eq!(domain.clamp(50.0), 100.0);
        assert_eq!(domain.clamp(250.0), 200.0);
        assert_eq!(domain.clamp(150.0), 150.0);
        assert!(AxisDomain::new(5.0, 5.0).is_degenerate());
    }

    #[test]
    fn collapsed_container_is_not_measurable() {
        assert!(!ContainerRect::default().is_measurable());
        assert!(!ContainerRect::new(0.0, 0.0, 640.0, 0.0).is_measurable());
        assert!(ContainerRect::new(10.0, 20.0, 640.0, 400.0).is_measurable());
    }
}
