//! Raw geometry handed over by the acquisition collaborator.
//!
//! Attribute values that need decoding (transforms, path data, point lists)
//! are kept as the strings found on the rendering surface.

use serde::Deserialize;

use arbor_core::geometry::{Bounds, Point, Size};

use crate::error::GeometryStats;

/// A rectangle given as an origin and a size, relative to its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RectAttrs {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectAttrs {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Places the rectangle on the canvas relative to `origin`.
    pub fn to_bounds(self, origin: Point) -> Bounds {
        Bounds::new_from_top_left(
            Point::new(self.x, self.y),
            Size::new(self.width, self.height),
        )
            .translate(origin)
    }
}

/// One candidate shape or label, possibly a duplicate of another.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawDetection {
    /// Label text exactly as found.
    pub text: String,
    /// Raw transform attribute, e.g. `translate(120, 40)`.
    pub transform: Option<String>,
    /// Explicit `x` attribute.
    pub x: Option<f32>,
    /// Explicit `y` attribute.
    pub y: Option<f32>,
    /// Offset of the element's measured box from the canvas origin.
    pub client_offset: Option<Point>,
    /// Inner rectangle, relative to the detection's position.
    pub rect: Option<RectAttrs>,
    /// Measured bounding box, relative to the detection's position.
    pub bbox: Option<RectAttrs>,
}

impl RawDetection {
    /// A detection with only a label and a translate transform.
    pub fn translated(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            transform: Some(format!("translate({x}, {y})")),
            ..Self::default()
        }
    }

    /// Returns a copy carrying an inner rectangle.
    pub fn with_rect(mut self, rect: RectAttrs) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Returns `true` if the detection carries any shape geometry.
    pub fn has_shape(&self) -> bool {
        self.rect.is_some() || self.bbox.is_some()
    }
}

/// A connector stroke, in whichever primitive it was drawn with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawStroke {
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Path { d: String },
    Polyline { points: String },
}

impl RawStroke {
    /// A straight segment between two points.
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line {
            x1: start.x(),
            y1: start.y(),
            x2: end.x(),
            y2: end.y(),
        }
    }
}

/// Everything one extraction pass consumes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub detections: Vec<RawDetection>,
    pub strokes: Vec<RawStroke>,
}

impl Geometry {
    pub fn new(detections: Vec<RawDetection>, strokes: Vec<RawStroke>) -> Self {
        Self {
            detections,
            strokes,
        }
    }

    /// Counts what this geometry contains, for diagnostics.
    pub fn stats(&self) -> GeometryStats {
        GeometryStats {
            detections: self.detections.len(),
            shapes: self.detections.iter().filter(|d| d.has_shape()).count(),
            strokes: self.strokes.len(),
        }
    }
}
