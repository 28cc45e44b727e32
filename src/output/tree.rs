//! Hierarchical export of the flat record list.
//!
//! Every path segment but the last becomes a nested map level, and the
//! last segment maps to the record's statistics. This is the shape the
//! instrumentation layer keeps in memory before it dumps.

use crate::aggregator::merge;
use crate::parser::schema::{Record, Statistics};
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

/// Map from path segment to subtree
pub type Tree = IndexMap<String, TreeNode>;

/// One node of the exported hierarchy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(Statistics),
    Branch(Tree),
}

impl TreeNode {
    pub fn as_leaf(&self) -> Option<&Statistics> {
        match self {
            TreeNode::Leaf(stats) => Some(stats),
            TreeNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Tree> {
        match self {
            TreeNode::Branch(children) => Some(children),
            TreeNode::Leaf(_) => None,
        }
    }
}

/// Build the nested view of `records`, keeping record order at each level.
///
/// A record whose path runs through another record's leaf, or ends on an
/// existing branch, cannot be placed and is skipped with a warning, as
/// are records with an empty path. Two records with the same path are
/// merged.
pub fn to_tree(records: &[Record]) -> Tree {
    let mut root = Tree::new();

    'records: for record in records {
        let Some((last, parents)) = record.path.split_last() else {
            warn!("Skipping record with empty path in tree export");
            continue;
        };

        let mut level = &mut root;
        for segment in parents {
            level = match level
                .entry(segment.clone())
                .or_insert_with(|| TreeNode::Branch(Tree::new()))
            {
                TreeNode::Branch(children) => children,
                TreeNode::Leaf(_) => {
                    warn!(
                        "Skipping {:?} in tree export: '{}' is already a leaf",
                        record.path, segment
                    );
                    continue 'records;
                }
            };
        }

        match level.entry(last.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(TreeNode::Leaf(record.stats));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                TreeNode::Leaf(stats) => *stats = merge(stats, &record.stats),
                TreeNode::Branch(_) => warn!(
                    "Skipping {:?} in tree export: '{}' already has children",
                    record.path, last
                ),
            },
        }
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &[&str], count: u64) -> Record {
        Record::new(
            path.iter().map(|s| s.to_string()).collect(),
            Statistics::new(count, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_nested_levels() {
        let tree = to_tree(&[
            record(&["SELECT 1", "execute"], 1),
            record(&["SELECT 1", "fetch"], 2),
            record(&["SELECT 2", "execute"], 3),
        ]);

        assert_eq!(tree.len(), 2);
        let select1 = tree["SELECT 1"].as_branch().unwrap();
        assert_eq!(select1["execute"].as_leaf().unwrap().count, 1);
        assert_eq!(select1["fetch"].as_leaf().unwrap().count, 2);
        let select2 = tree["SELECT 2"].as_branch().unwrap();
        assert_eq!(select2["execute"].as_leaf().unwrap().count, 3);
    }

    #[test]
    fn test_single_segment_is_top_level_leaf() {
        let tree = to_tree(&[record(&["only"], 5)]);
        assert_eq!(tree["only"].as_leaf().unwrap().count, 5);
    }

    #[test]
    fn test_conflicting_shapes_are_skipped() {
        let tree = to_tree(&[
            record(&["a"], 1),
            record(&["a", "b"], 2),
            record(&["c", "d"], 3),
            record(&["c"], 4),
            record(&[], 5),
        ]);

        assert_eq!(tree["a"].as_leaf().unwrap().count, 1);
        assert!(tree["c"].as_branch().unwrap().contains_key("d"));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_duplicate_paths_merge() {
        let tree = to_tree(&[record(&["x", "y"], 1), record(&["x", "y"], 2)]);
        let x = tree["x"].as_branch().unwrap();
        assert_eq!(x["y"].as_leaf().unwrap().count, 3);
    }
}
