//! Root selection.

use log::{debug, warn};

use arbor_core::descriptor::{NodeDescriptor, NodeId};

use crate::level::LevelMap;

/// Picks the root among the nodes of the shallowest level.
///
/// With several candidates, the one closest to their mean secondary-axis
/// coordinate wins. Ties go to the earlier node. Returns `None` if there are
/// no levels.
pub fn select_root(levels: &LevelMap, nodes: &[NodeDescriptor]) -> Option<NodeId> {
    let orientation = levels.orientation();
    let candidates: Vec<&NodeDescriptor> = levels
        .root_candidates()
        .iter()
        .filter_map(|id| nodes.get(id.index()).filter(|node| node.id() == *id))
        .collect();

    let secondary = |node: &NodeDescriptor| orientation.secondary(node.position());
    let root = match candidates.as_slice() {
        [] => {
            warn!("No root candidates in the shallowest level");
            return None;
        }
        [only] => *only,
        _ => {
            let total: f32 = candidates.iter().map(|node| secondary(*node)).sum();
            let mean = total / candidates.len() as f32;
            candidates
                .iter()
                .copied()
                .reduce(|closest, node| {
                    if (secondary(node) - mean).abs() < (secondary(closest) - mean).abs() {
                        node
                    } else {
                        closest
                    }
                })?
        }
    };

    debug!(root:% = root.id(), text = root.text(), candidates = candidates.len(); "Selected root");
    Some(root.id())
}
