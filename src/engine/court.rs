//! Court coordinate mapping between pointer input, the normalized shot
//! space stored in the ledger, and a renderer's view box.
//!
//! The court is laid out full-length: the top half (`y < 0.5`) holds one
//! basket, the bottom half the other, and `y = 0.5` is the half-court line.

use serde::{Deserialize, Serialize};

/// A court position as fractions of court width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    /// Build a point, clamping each axis into `[0, 1]` (non-finite reads as 0).
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn half(&self) -> CourtHalf {
        CourtHalf::of(self.y)
    }
}

/// A position in render (view box) units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderPoint {
    pub svg_x: f64,
    pub svg_y: f64,
}

/// Which basket's half a normalized `y` falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtHalf {
    Top,
    Bottom,
}

impl CourtHalf {
    pub const HALF_COURT_LINE: f64 = 0.5;

    pub fn of(y: f64) -> Self {
        if y < Self::HALF_COURT_LINE {
            CourtHalf::Top
        } else {
            CourtHalf::Bottom
        }
    }
}

/// The rendered court's page offset and size, in pointer units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CourtRect {
    pub page_x: f64,
    pub page_y: f64,
    pub width: f64,
    pub height: f64,
}

impl CourtRect {
    /// True if a page-relative point lands inside the court.
    pub fn contains_page_point(&self, page_x: f64, page_y: f64) -> bool {
        page_x >= self.page_x
            && page_y >= self.page_y
            && page_x <= self.page_x + self.width
            && page_y <= self.page_y + self.height
    }
}

/// One pointer/touch sample as reported by the host platform.
///
/// Some platforms report unusable local coordinates (missing or negative);
/// page coordinates are the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    #[serde(default)]
    pub local_x: Option<f64>,
    #[serde(default)]
    pub local_y: Option<f64>,
    #[serde(default)]
    pub page_x: Option<f64>,
    #[serde(default)]
    pub page_y: Option<f64>,
}

impl PointerSample {
    pub fn local(x: f64, y: f64) -> Self {
        Self {
            local_x: Some(x),
            local_y: Some(y),
            ..Self::default()
        }
    }

    /// Normalize against `court`, falling back to page coordinates minus the
    /// court's page offset when the local pair is unusable.
    pub fn normalize(&self, court: &CourtRect) -> NormalizedPoint {
        let (x, y) = self.court_relative(court);
        pointer_to_normalized(x, y, court.width, court.height)
    }

    fn court_relative(&self, court: &CourtRect) -> (f64, f64) {
        let local = match (self.local_x, self.local_y) {
            (Some(x), Some(y)) if usable(x) && usable(y) => return (x, y),
            (x, y) => (x.unwrap_or(0.0), y.unwrap_or(0.0)),
        };
        match (self.page_x, self.page_y) {
            (Some(px), Some(py)) if px.is_finite() && py.is_finite() => {
                (px - court.page_x, py - court.page_y)
            }
            _ => local,
        }
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn normalize_axis(pointer: f64, extent: f64) -> f64 {
    if !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    clamp_unit(pointer / extent)
}

/// Map a court-local pointer position to a clamped normalized coordinate.
pub fn pointer_to_normalized(
    pointer_x: f64,
    pointer_y: f64,
    court_width: f64,
    court_height: f64,
) -> NormalizedPoint {
    NormalizedPoint {
        x: normalize_axis(pointer_x, court_width),
        y: normalize_axis(pointer_y, court_height),
    }
}

/// Linear scale of a normalized coordinate into a view box.
pub fn normalized_to_render_space(
    x: f64,
    y: f64,
    view_box_width: f64,
    view_box_height: f64,
) -> RenderPoint {
    RenderPoint {
        svg_x: x * view_box_width,
        svg_y: y * view_box_height,
    }
}

/// Index of the marker closest to `target` within `radius`, if any.
pub fn hit_test_markers(markers: &[RenderPoint], target: RenderPoint, radius: f64) -> Option<usize> {
    let radius_sq = radius * radius;
    markers
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let dx = m.svg_x - target.svg_x;
            let dy = m.svg_y - target.svg_y;
            (idx, dx * dx + dy * dy)
        })
        .filter(|(_, dist_sq)| *dist_sq <= radius_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}
