//! Node normalization.
//!
//! Detection strategies overlap, so the same label usually arrives several
//! times. This module filters out detections that cannot be hierarchy
//! content, resolves each survivor's position and bounds, and folds the
//! result into a list of unique [`NodeDescriptor`]s.
//!
//! Deduplication is first-seen-wins: a candidate is dropped when its
//! lower-cased text matches an accepted text longer than two characters, or
//! when its rounded position lies within 3 units (labels up to three
//! characters) or 5 units (longer labels) of an accepted node.

use std::collections::HashSet;

use log::{debug, info, trace, warn};

use arbor_core::{
    descriptor::{NodeDescriptor, NodeId},
    geometry::{Bounds, Point, Size},
};
use arbor_parser::parse_translate;

use crate::input::RawDetection;

/// Element names that leak into label text from structural markup.
const STRUCTURAL_TAGS: [&str; 8] = ["svg", "g", "text", "path", "rect", "circle", "line", "tspan"];

const DEFAULT_WIDTH: f32 = 40.0;
const DEFAULT_HEIGHT: f32 = 32.0;

/// Texts up to this many characters may repeat.
const SHORT_TEXT_LEN: usize = 2;

/// Texts up to this many characters use the tight position radius.
const TIGHT_RADIUS_TEXT_LEN: usize = 3;
const TIGHT_RADIUS: f32 = 3.0;
const WIDE_RADIUS: f32 = 5.0;

/// Returns `true` if a trimmed label can be hierarchy content.
///
/// Rejected: empty labels, labels without any alphanumeric character,
/// bare numerals (digits mixed only with whitespace, `-`, `_` and `.`),
/// and stray element names.
///
/// # Examples
///
/// ```
/// # use arbor::normalize::is_valid_label;
/// assert!(is_valid_label("Machine learning"));
/// assert!(is_valid_label("3D printing"));
/// assert!(!is_valid_label("  "));
/// assert!(!is_valid_label("•••"));
/// assert!(!is_valid_label("1.2.3"));
/// assert!(!is_valid_label("tspan"));
/// ```
pub fn is_valid_label(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    if !trimmed.chars().any(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }

    let is_numeral = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '_' | '.'));
    if is_numeral {
        return false;
    }

    !STRUCTURAL_TAGS
        .iter()
        .any(|tag| trimmed.eq_ignore_ascii_case(tag))
}

/// Resolves where a detection sits on the canvas.
///
/// Tries, in order: the translate transform, the explicit `x`/`y`
/// attributes, and the measured offset. A strategy that yields exactly the
/// origin counts as having failed.
fn resolve_position(detection: &RawDetection) -> Point {
    if let Some(transform) = &detection.transform {
        match parse_translate(transform) {
            Ok(position) if !position.is_zero() => return position,
            Ok(_) => trace!(text = detection.text; "Translate is at the origin, trying attributes"),
            Err(err) => {
                debug!(text = detection.text, err:%; "Unusable transform, trying attributes")
            }
        }
    }

    let explicit = Point::new(detection.x.unwrap_or(0.0), detection.y.unwrap_or(0.0));
    if !explicit.is_zero() {
        return explicit;
    }

    if let Some(offset) = detection.client_offset {
        return offset;
    }

    warn!(text = detection.text; "No usable position, placing node at the origin");
    Point::default()
}

/// Resolves the canvas bounds of a detection placed at `position`.
fn resolve_bounds(detection: &RawDetection, position: Point) -> Bounds {
    if let Some(rect) = detection.rect {
        return rect.to_bounds(position);
    }

    if let Some(bbox) = detection.bbox {
        return bbox.to_bounds(position);
    }

    trace!(text = detection.text; "No shape geometry, using default box");
    position.to_bounds(Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

/// Turns one raw detection into a candidate node, or `None` if its label is
/// not hierarchy content.
///
/// The candidate's id is provisional; [`dedup`] assigns the final one.
fn describe(index: usize, detection: &RawDetection) -> Option<NodeDescriptor> {
    if !is_valid_label(&detection.text) {
        trace!(index, text = detection.text; "Discarding non-content label");
        return None;
    }

    let position = resolve_position(detection);
    let bounds = resolve_bounds(detection, position);

    Some(NodeDescriptor::new(
        NodeId::new(index),
        detection.text.trim(),
        position,
        bounds,
        index,
    ))
}

/// Nodes accepted so far while folding over candidates.
#[derive(Debug, Default)]
struct Accepted {
    nodes: Vec<NodeDescriptor>,
    texts: HashSet<String>,
    positions: Vec<Point>,
}

impl Accepted {
    /// Returns `true` if a node with this text key and rounded position
    /// duplicates an accepted one.
    fn is_duplicate(&self, text_key: &str, position: Point) -> bool {
        let text_len = text_key.chars().count();

        if text_len > SHORT_TEXT_LEN && self.texts.contains(text_key) {
            debug!(text = text_key; "Duplicate text");
            return true;
        }

        let radius = if text_len <= TIGHT_RADIUS_TEXT_LEN {
            TIGHT_RADIUS
        } else {
            WIDE_RADIUS
        };

        if let Some(existing) = self
            .positions
            .iter()
            .find(|existing| existing.distance(position) <= radius)
        {
            debug!(
                text = text_key,
                distance = existing.distance(position),
                radius;
                "Duplicate position"
            );
            return true;
        }

        false
    }

    fn accept(mut self, candidate: NodeDescriptor) -> Self {
        let text_key = candidate.text().trim().to_lowercase();
        let position = candidate.position().round();

        if self.is_duplicate(&text_key, position) {
            return self;
        }

        let id = NodeId::new(self.nodes.len());
        self.texts.insert(text_key);
        self.positions.push(position);
        self.nodes.push(candidate.with_id(id));
        self
    }
}

/// Removes duplicate nodes, keeping the first of each, and renumbers the
/// survivors sequentially from zero.
///
/// Running this on its own output changes nothing.
pub fn dedup(candidates: impl IntoIterator<Item = NodeDescriptor>) -> Vec<NodeDescriptor> {
    candidates
        .into_iter()
        .fold(Accepted::default(), Accepted::accept)
        .nodes
}

/// Normalizes raw detections into unique node descriptors.
///
/// Output order is first-accepted order, and ids are assigned sequentially
/// starting at `node_0`.
pub fn normalize(detections: &[RawDetection]) -> Vec<NodeDescriptor> {
    let nodes = dedup(
        detections
            .iter()
            .enumerate()
            .filter_map(|(index, detection)| describe(index, detection)),
    );

    info!(raw = detections.len(), unique = nodes.len(); "Normalized detections");
    nodes
}

#[cfg(test)]
mod tests {
    use crate::input::RectAttrs;

    use super::*;

    fn at(text: &str, x: f32, y: f32) -> RawDetection {
        RawDetection::translated(text, x, y)
    }

    #[test]
    fn test_label_filters() {
        assert!(is_valid_label("  Root topic "));
        assert!(is_valid_label("ab"));
        assert!(is_valid_label("v2"));
        assert!(is_valid_label("機械学習"));
        assert!(!is_valid_label(""));
        assert!(!is_valid_label("\u{00A0}\t"));
        assert!(!is_valid_label("..."));
        assert!(!is_valid_label("42"));
        assert!(!is_valid_label("- 1_2 -"));
        assert!(!is_valid_label("G"));
        assert!(!is_valid_label("Rect"));
    }

    #[test]
    fn test_position_prefers_translate() {
        let detection = RawDetection {
            text: "Topic".into(),
            transform: Some("translate(10, 20)".into()),
            x: Some(99.0),
            y: Some(99.0),
            ..RawDetection::default()
        };
        assert_eq!(resolve_position(&detection), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_position_falls_back_from_origin_translate() {
        let detection = RawDetection {
            text: "Topic".into(),
            transform: Some("translate(0,0)".into()),
            x: Some(15.0),
            ..RawDetection::default()
        };
        assert_eq!(resolve_position(&detection), Point::new(15.0, 0.0));
    }

    #[test]
    fn test_position_falls_back_to_offset_then_origin() {
        let detection = RawDetection {
            text: "Topic".into(),
            transform: Some("rotate(3)".into()),
            client_offset: Some(Point::new(7.0, 8.0)),
            ..RawDetection::default()
        };
        assert_eq!(resolve_position(&detection), Point::new(7.0, 8.0));

        let bare = RawDetection {
            text: "Topic".into(),
            ..RawDetection::default()
        };
        assert_eq!(resolve_position(&bare), Point::default());
    }

    #[test]
    fn test_bounds_from_rect_bbox_and_default() {
        let position = Point::new(100.0, 50.0);

        let rect = RectAttrs::new(0.0, -10.0, 80.0, 20.0);
        let with_rect = at("A", 0.0, 0.0).with_rect(rect);
        let bounds = resolve_bounds(&with_rect, position);
        assert_eq!((bounds.min_x(), bounds.max_x()), (100.0, 180.0));
        assert_eq!((bounds.min_y(), bounds.max_y()), (40.0, 60.0));

        let with_bbox = RawDetection {
            bbox: Some(RectAttrs::new(-5.0, -5.0, 10.0, 10.0)),
            ..RawDetection::default()
        };
        let bounds = resolve_bounds(&with_bbox, position);
        assert_eq!(bounds.center(), position);
        assert_eq!(bounds.width(), 10.0);

        let bounds = resolve_bounds(&RawDetection::default(), position);
        assert_eq!(bounds.center(), position);
        assert_eq!(bounds.width(), 40.0);
        assert_eq!(bounds.height(), 32.0);
    }

    #[test]
    fn test_text_duplicates_removed_case_insensitively() {
        let nodes = normalize(&[at("Topic", 0.0, 10.0), at("TOPIC", 200.0, 300.0)]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].position(), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_short_texts_may_repeat() {
        let nodes = normalize(&[at("AI", 0.0, 10.0), at("ai", 200.0, 300.0)]);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_position_duplicates_use_adaptive_radius() {
        // Long labels: 5 unit radius.
        let nodes = normalize(&[at("Alpha", 100.0, 100.0), at("Beta", 104.0, 103.0)]);
        assert_eq!(nodes.len(), 1);

        // Short labels: 3 unit radius.
        let nodes = normalize(&[at("Alpha", 100.0, 100.0), at("Bee", 104.0, 100.0)]);
        assert_eq!(nodes.len(), 2);
        let nodes = normalize(&[at("Alpha", 100.0, 100.0), at("Bee", 103.0, 100.0)]);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_ids_are_sequential_in_accepted_order() {
        let nodes = normalize(&[
            at("", 0.0, 0.0),
            at("Root", 10.0, 100.0),
            at("root", 10.0, 400.0),
            at("Child", 200.0, 100.0),
        ]);

        let ids: Vec<_> = nodes.iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["node_0", "node_1"]);
        assert_eq!(nodes[0].original_index(), 1);
        assert_eq!(nodes[1].original_index(), 3);
        assert_eq!(nodes[1].text(), "Child");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let nodes = normalize(&[
            at("Root", 10.0, 100.0),
            at("Ab", 11.0, 100.0),
            at("Ab", 300.0, 100.0),
            at("Child one", 200.0, 60.0),
            at("Child two", 200.0, 140.0),
        ]);
        let again = dedup(nodes.clone());
        assert_eq!(again, nodes);
    }

    #[test]
    fn test_labels_are_trimmed() {
        let nodes = normalize(&[at("  Spaced out  ", 5.0, 5.0)]);
        assert_eq!(nodes[0].text(), "Spaced out");
    }
}
