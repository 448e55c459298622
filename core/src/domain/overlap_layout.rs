//! Side-by-side column assignment for time-overlapping items of one day.
//!
//! Items are sorted by start time and packed greedily into the first column
//! that has room. Each item then learns how many columns its overlap cluster
//! uses, where a cluster is every item reachable through a chain of
//! overlaps. Dividing the width by the cluster's column count keeps boxes in
//! the same cluster from drawing over each other.
//!
//! Ties on start time keep the order the items were supplied in, so the same
//! input always produces the same layout.

use std::collections::HashMap;

use shared::{ColumnPlacement, DayColumnLayout, ScheduledItem};
use tracing::debug;

/// Assign a column and a column count to every item.
///
/// The caller is responsible for passing items of a single day.
pub fn layout_columns(items: &[ScheduledItem]) -> DayColumnLayout {
    if items.is_empty() {
        return DayColumnLayout::default();
    }

    let columns = assign_columns(items);
    let clusters = OverlapClusters::build(items);

    let mut widest: HashMap<usize, usize> = HashMap::new();
    for (index, column) in columns.iter().enumerate() {
        let root = clusters.root(index);
        let entry = widest.entry(root).or_insert(0);
        *entry = (*entry).max(*column);
    }

    let placements = items
        .iter()
        .zip(&columns)
        .enumerate()
        .map(|(index, (item, column))| ColumnPlacement {
            id: item.id.clone(),
            column: *column,
            total_columns: widest.get(&clusters.root(index)).copied().unwrap_or(*column) + 1,
        })
        .collect::<Vec<_>>();

    debug!(
        items = items.len(),
        columns = placements.iter().map(|p| p.column + 1).max().unwrap_or(0),
        "laid out day columns"
    );

    DayColumnLayout { placements }
}

/// Greedy first-fit packing; returns the column of each item by input index
fn assign_columns(items: &[ScheduledItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    // sort_by_key is stable: equal starts keep input order
    order.sort_by_key(|&index| items[index].start);

    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut column_of = vec![0; items.len()];

    for index in order {
        let item = &items[index];
        let free = columns
            .iter()
            .position(|placed| placed.iter().all(|&other| !item.overlaps(&items[other])));

        let column = match free {
            Some(column) => column,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[column].push(index);
        column_of[index] = column;
    }

    column_of
}

/// Union-find over items joined by pairwise overlap
struct OverlapClusters {
    parent: Vec<usize>,
}

impl OverlapClusters {
    fn build(items: &[ScheduledItem]) -> Self {
        let mut clusters = Self {
            parent: (0..items.len()).collect(),
        };
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if items[i].overlaps(&items[j]) {
                    clusters.union(i, j);
                }
            }
        }
        clusters
    }

    fn root(&self, mut index: usize) -> usize {
        while self.parent[index] != index {
            index = self.parent[index];
        }
        index
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.root(a);
        let root_b = self.root(b);
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}
