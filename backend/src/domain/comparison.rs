//! Selection and chart composition for the dashboard radar view.
//!
//! This module is the single source of truth for which assessments are
//! plotted together and how the chart dataset is assembled. It is pure,
//! synchronous state machinery driven by discrete UI events (a click on a
//! history row, a slider drag in the form); the frontend renders whatever
//! [`build_chart_series`] returns without further interpretation.

use serde::Serialize;

use crate::domain::assessment::{Assessment, AssessmentId, ScoreMap};

/// Maximum number of assessments plotted simultaneously.
pub const MAX_COMPARED: usize = 3;

/// Bounded rolling window of assessment ids chosen for comparison.
///
/// Selection order is preserved and doubles as the palette order. When a new
/// selection would exceed [`MAX_COMPARED`], the oldest (front) entry is
/// evicted first, so the window always holds the most recently selected ids.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionWindow {
    selected: Vec<AssessmentId>,
}

impl SelectionWindow {
    /// Empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one id: deselect if present, otherwise select, evicting the
    /// oldest entry when the window is full.
    pub fn toggle(&mut self, id: AssessmentId) {
        if let Some(position) = self.selected.iter().position(|existing| *existing == id) {
            self.selected.remove(position);
            return;
        }
        if self.selected.len() >= MAX_COMPARED {
            self.selected.remove(0);
        }
        self.selected.push(id);
    }

    /// Seed an initial selection on dashboard load.
    ///
    /// Only applies when nothing is selected yet; the dashboard calls this
    /// with the most recent assessment so a fresh page never starts blank.
    pub fn select_default(&mut self, id: AssessmentId) {
        if self.selected.is_empty() {
            self.selected.push(id);
        }
    }

    /// Whether the id is currently part of the comparison.
    pub fn is_selected(&self, id: &AssessmentId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in selection order (oldest first).
    pub fn selected(&self) -> &[AssessmentId] {
        &self.selected
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Border/background colour pair for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesColor {
    pub border: &'static str,
    pub background: &'static str,
}

/// Fixed cyclic palette for historical series, indexed by selection position
/// modulo its length.
pub const SERIES_PALETTE: [SeriesColor; 3] = [
    // indigo
    SeriesColor {
        border: "rgba(99, 102, 241, 1)",
        background: "rgba(99, 102, 241, 0.2)",
    },
    // emerald
    SeriesColor {
        border: "rgba(16, 185, 129, 1)",
        background: "rgba(16, 185, 129, 0.2)",
    },
    // amber
    SeriesColor {
        border: "rgba(245, 158, 11, 1)",
        background: "rgba(245, 158, 11, 0.2)",
    },
];

const DRAFT_COLOR: SeriesColor = SeriesColor {
    border: "rgba(255, 255, 255, 0.8)",
    background: "rgba(255, 255, 255, 0.1)",
};

const PLACEHOLDER_COLOR: SeriesColor = SeriesColor {
    border: "rgba(148, 163, 184, 0.2)",
    background: "rgba(148, 163, 184, 0.1)",
};

/// Line styling for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStyle {
    Solid,
    /// Dashed outline, reserved for the unsaved draft.
    Dashed,
}

/// One radar outline, ready for the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    /// One value per chart axis, aligned with `ChartData::labels`.
    pub values: Vec<f64>,
    pub color: SeriesColor,
    pub style: SeriesStyle,
}

/// Complete chart dataset: axis labels plus series in draw order.
///
/// Series are listed top-down: renderers must draw the first series above
/// the rest, which keeps the dashed draft visible over filled historical
/// outlines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

fn values_for(categories: &[String], scores: &ScoreMap) -> Vec<f64> {
    categories
        .iter()
        .map(|category| scores.get(category).copied().unwrap_or(0.0))
        .collect()
}

/// Merge the live draft and the selected history into one chart dataset.
///
/// - The draft, when non-empty, becomes a dashed "Current Draft" series at
///   the front (drawn above everything else).
/// - Each selected id that still resolves to an assessment yields one solid
///   series in selection order, coloured `SERIES_PALETTE[i % 3]`. Ids whose
///   assessment has been deleted in the meantime are silently skipped.
/// - Missing score keys render as zero, never as a gap.
/// - When neither a draft nor a resolvable selection exists, a single
///   all-zero placeholder series spans every category so the chart still
///   renders an empty frame.
pub fn build_chart_series(
    categories: &[String],
    assessments: &[Assessment],
    selection: &SelectionWindow,
    draft_scores: &ScoreMap,
) -> ChartData {
    let mut series = Vec::new();

    if !draft_scores.is_empty() {
        series.push(ChartSeries {
            label: "Current Draft".to_owned(),
            values: values_for(categories, draft_scores),
            color: DRAFT_COLOR,
            style: SeriesStyle::Dashed,
        });
    }

    for (index, id) in selection.selected().iter().enumerate() {
        let Some(assessment) = assessments.iter().find(|a| a.id() == id) else {
            continue;
        };
        series.push(ChartSeries {
            label: assessment.name().as_ref().to_owned(),
            values: values_for(categories, assessment.scores()),
            color: SERIES_PALETTE[index % SERIES_PALETTE.len()],
            style: SeriesStyle::Solid,
        });
    }

    if series.is_empty() {
        series.push(ChartSeries {
            label: "Empty".to_owned(),
            values: vec![0.0; categories.len()],
            color: PLACEHOLDER_COLOR,
            style: SeriesStyle::Solid,
        });
    }

    ChartData {
        labels: categories.to_vec(),
        series,
    }
}
