use super::value_objects::{AnnotationId, ThresholdId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain entity - a horizontal reference line at a revenue value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub id: ThresholdId,
    pub name: String,
    pub value: f64,
    /// Hex color such as `#10b981`.
    pub color: String,
    /// A locked threshold cannot be dragged.
    pub is_locked: bool,
    pub is_visible: bool,
}

impl Threshold {
    pub fn from_draft(id: ThresholdId, draft: ThresholdDraft) -> Self {
        Self {
            id,
            name: draft.name,
            value: draft.value,
            color: draft.color,
            is_locked: draft.is_locked,
            is_visible: draft.is_visible,
        }
    }

    /// Merges the present fields of `patch`.
    pub fn apply(&mut self, patch: ThresholdPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(is_locked) = patch.is_locked {
            self.is_locked = is_locked;
        }
        if let Some(is_visible) = patch.is_visible {
            self.is_visible = is_visible;
        }
    }
}

/// Threshold fields without an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdDraft {
    pub name: String,
    pub value: f64,
    pub color: String,
    pub is_locked: bool,
    pub is_visible: bool,
}

impl ThresholdDraft {
    /// Unlocked and visible.
    pub fn new(name: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            color: color.into(),
            is_locked: false,
            is_visible: true,
        }
    }

    pub fn locked(self) -> Self {
        Self { is_locked: true, ..self }
    }

    pub fn hidden(self) -> Self {
        Self { is_visible: false, ..self }
    }
}

/// Partial update of a threshold; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub color: Option<String>,
    pub is_locked: Option<bool>,
    pub is_visible: Option<bool>,
}

impl ThresholdPatch {
    pub fn value(value: f64) -> Self {
        Self { value: Some(value), ..Default::default() }
    }

    pub fn locked(is_locked: bool) -> Self {
        Self { is_locked: Some(is_locked), ..Default::default() }
    }

    pub fn visible(is_visible: bool) -> Self {
        Self { is_visible: Some(is_visible), ..Default::default() }
    }
}

/// Domain entity - a note attached to one data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    pub data_point_index: usize,
    /// Copy of the data point's label at creation time.
    pub label: String,
    pub note: String,
    pub timestamp: u64,
}

impl Annotation {
    pub fn from_draft(id: AnnotationId, draft: AnnotationDraft) -> Self {
        Self {
            id,
            data_point_index: draft.data_point_index,
            label: draft.label,
            note: draft.note,
            timestamp: draft.timestamp,
        }
    }

    pub fn apply(&mut self, patch: AnnotationPatch) {
        if let Some(note) = patch.note {
            self.note = note;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDraft {
    pub data_point_index: usize,
    pub label: String,
    pub note: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationPatch {
    pub note: Option<String>,
    pub label: Option<String>,
}

impl AnnotationPatch {
    pub fn note(note: impl Into<String>) -> Self {
        Self { note: Some(note.into()), ..Default::default() }
    }
}

/// Aggregate of everything the user placed on the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub thresholds: Vec<Threshold>,
    pub annotations: BTreeMap<AnnotationId, Annotation>,
}

impl ChartState {
    pub fn threshold(&self, id: &ThresholdId) -> Option<&Threshold> {
        self.thresholds.iter().find(|t| &t.id == id)
    }

    pub fn threshold_mut(&mut self, id: &ThresholdId) -> Option<&mut Threshold> {
        self.thresholds.iter_mut().find(|t| &t.id == id)
    }

    pub fn visible_thresholds(&self) -> impl Iterator<Item = &Threshold> {
        self.thresholds.iter().filter(|t| t.is_visible)
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id)
    }
}
