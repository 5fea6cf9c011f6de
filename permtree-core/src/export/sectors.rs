/*
    sectors.rs - Sector ownership and upward propagation

    Every node with declared sectors owns them. A node with none is
    transparent: it borrows the exact sector list of the first
    descendant in table order that has one, and so do its still-empty
    ancestors, stopping at the first ancestor that already has sectors.
    Propagation only ever fills an empty set; it never overwrites.

    A transparent node with no sectored descendant stays ownerless and
    is simply absent from the sector lookup. That is not an error.

    The single in-order walk is enough because a parent's arena index
    is always smaller than its children's: when a sectored node is
    visited, every still-empty ancestor has already been visited and
    skipped, and every node that could fill it later sits further down
    the vector.
*/

use std::collections::HashMap;

use crate::export::tree::Forest;
use crate::model::clean_sectors;

#[derive(Debug)]
pub(crate) struct SectorMap {
    /// sector -> owning node indices, in registration order. Several
    /// nodes may own one sector; fan-out is legal.
    owners: HashMap<String, Vec<usize>>,
    /// Effective sector list per node: declared, or inherited from a
    /// descendant, or empty if the node stayed ownerless.
    resolved: Vec<Vec<String>>,
}

impl SectorMap {
    pub fn owners(&self, sector: &str) -> &[usize] {
        self.owners.get(sector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn resolved(&self, node: usize) -> &[String] {
        &self.resolved[node]
    }
}

pub(crate) fn propagate(forest: &Forest) -> SectorMap {
    let mut resolved: Vec<Vec<String>> = forest
        .nodes
        .iter()
        .map(|node| clean_sectors(&node.sectors))
        .collect();
    let mut owners: HashMap<String, Vec<usize>> = HashMap::new();

    for idx in 0..forest.nodes.len() {
        if resolved[idx].is_empty() {
            continue;
        }
        register(&mut owners, &resolved[idx], idx);

        // fill still-empty ancestors with this node's exact list
        let inherited = resolved[idx].clone();
        let mut current = forest.nodes[idx].parent;
        while let Some(ancestor) = current {
            if !resolved[ancestor].is_empty() {
                break;
            }
            register(&mut owners, &inherited, ancestor);
            resolved[ancestor] = inherited.clone();
            current = forest.nodes[ancestor].parent;
        }
    }

    SectorMap { owners, resolved }
}

fn register(owners: &mut HashMap<String, Vec<usize>>, sectors: &[String], node: usize) {
    for sector in sectors {
        owners.entry(sector.clone()).or_default().push(node);
    }
}
