//! Result assembly and terminal reporting.
//!
//! `assemble` maps engine output back to node identifiers and coordinates.
//! It is the same for every strategy; ordering is a presentation choice.

pub mod format;

pub use format::*;

use std::collections::HashSet;

use crate::domain::{NodeTable, Selection, SelectionResult, SensorPlacement, SortOrder, Strategy};
use crate::error::SensorError;

/// Build a `SelectionResult` from selected indices and their scores.
pub fn assemble(
    nodes: &NodeTable,
    strategy: Strategy,
    selection: &Selection,
    order: SortOrder,
) -> Result<SelectionResult, SensorError> {
    if selection.indices.len() != selection.scores.len() {
        return Err(SensorError::ShapeMismatch(format!(
            "{} selected indices but {} scores",
            selection.indices.len(),
            selection.scores.len()
        )));
    }

    let mut seen = HashSet::with_capacity(selection.indices.len());
    let mut sensors = Vec::with_capacity(selection.indices.len());
    for (&index, &contribution) in selection.indices.iter().zip(&selection.scores) {
        let node = nodes.get(index).ok_or_else(|| {
            SensorError::ShapeMismatch(format!(
                "selected index {index} outside node table of {}",
                nodes.len()
            ))
        })?;
        if !seen.insert(index) {
            return Err(SensorError::ShapeMismatch(format!(
                "index {index} selected twice"
            )));
        }
        sensors.push(SensorPlacement {
            index,
            node_id: node.id,
            position: node.position,
            contribution,
        });
    }

    let mut result = SelectionResult { strategy, sensors };
    sort_sensors(&mut result, order);
    Ok(result)
}

/// Reorder sensors in place. Stable, so equal keys keep engine order.
pub fn sort_sensors(result: &mut SelectionResult, order: SortOrder) {
    match order {
        SortOrder::Selection => {}
        SortOrder::NodeIdAscending => result.sensors.sort_by_key(|s| s.node_id),
        SortOrder::NodeIdDescending => {
            result.sensors.sort_by_key(|s| std::cmp::Reverse(s.node_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    fn table() -> NodeTable {
        NodeTable::new(vec![
            Node {
                id: 11,
                position: [0.0, 0.0, 0.0],
            },
            Node {
                id: 12,
                position: [1.0, 2.0, 3.0],
            },
            Node {
                id: 13,
                position: [4.0, 5.0, 6.0],
            },
            Node {
                id: 14,
                position: [7.0, 8.0, 9.0],
            },
        ])
        .unwrap()
    }

    #[test]
    fn preserves_ids_and_coordinates_under_every_order() {
        let sel = Selection {
            indices: vec![2, 0, 3],
            scores: vec![0.5, 0.9, 0.1],
        };
        for order in [
            SortOrder::Selection,
            SortOrder::NodeIdAscending,
            SortOrder::NodeIdDescending,
        ] {
            let result = assemble(&table(), Strategy::Efi, &sel, order).unwrap();
            let mut ids = result.node_ids();
            ids.sort_unstable();
            assert_eq!(ids, vec![11, 13, 14]);
            for s in &result.sensors {
                let node = table().get(s.index).copied().unwrap();
                assert_eq!(s.node_id, node.id);
                assert_eq!(s.position, node.position);
                let k = sel.indices.iter().position(|&i| i == s.index).unwrap();
                assert_eq!(s.contribution, sel.scores[k]);
            }
        }
    }

    #[test]
    fn descending_matches_display_order() {
        let sel = Selection {
            indices: vec![0, 3, 1],
            scores: vec![1.0, 1.0, 1.0],
        };
        let result =
            assemble(&table(), Strategy::EfiDpr, &sel, SortOrder::NodeIdDescending).unwrap();
        assert_eq!(result.node_ids(), vec![14, 12, 11]);
    }

    #[test]
    fn rejects_inconsistent_selection() {
        let bad_len = Selection {
            indices: vec![0, 1],
            scores: vec![1.0],
        };
        assert!(assemble(&table(), Strategy::Efi, &bad_len, SortOrder::Selection).is_err());

        let out_of_range = Selection {
            indices: vec![4],
            scores: vec![1.0],
        };
        assert!(assemble(&table(), Strategy::Efi, &out_of_range, SortOrder::Selection).is_err());

        let duplicate = Selection {
            indices: vec![1, 1],
            scores: vec![1.0, 1.0],
        };
        assert!(assemble(&table(), Strategy::Efi, &duplicate, SortOrder::Selection).is_err());
    }
}
