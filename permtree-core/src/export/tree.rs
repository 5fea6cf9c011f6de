/*
    tree.rs - Arena-indexed forest of subserver and room nodes

    Nodes live in one flat vector; parents and children are indices
    into it. Subservers are pushed first and form the roots. Rooms
    attach in worklist passes so that a room declared before its
    room-parent still resolves, however deep the chain; a pass that
    attaches nothing while rooms remain means some parent can never
    resolve (a missing name or a cycle).

    Invariant: a node's index is always greater than its parent's.
    Later passes lean on this to process parents before children.
*/

use std::collections::HashMap;

use crate::export::errors::{ExportError, ExportResult};
use crate::model::{normalized, Room, Subserver};

#[derive(Debug)]
pub(crate) struct Node {
    pub name: String,
    /// Present on rooms, absent on subservers.
    pub password: Option<String>,
    pub sectors: Vec<String>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct Forest {
    pub nodes: Vec<Node>,
    /// Subserver node indices, in table order.
    pub roots: Vec<usize>,
    index: HashMap<String, usize>,
}

impl Forest {
    /// Build the skeleton tree. Uniqueness must already have been
    /// checked: every normalized name maps to exactly one node.
    pub fn build(subservers: &[Subserver], rooms: &[Room]) -> ExportResult<Forest> {
        let mut forest = Forest {
            nodes: Vec::with_capacity(subservers.len() + rooms.len()),
            roots: Vec::with_capacity(subservers.len()),
            index: HashMap::new(),
        };

        for subserver in subservers {
            let idx = forest.push(Node {
                name: subserver.name.trim().to_string(),
                password: None,
                sectors: subserver.sectors.clone(),
                parent: None,
                children: Vec::new(),
            });
            forest.roots.push(idx);
        }

        let mut remaining: Vec<&Room> = rooms.iter().collect();
        while !remaining.is_empty() {
            let before = remaining.len();
            let mut unattached = Vec::new();
            for room in remaining {
                match forest.index.get(&normalized(&room.parent)).copied() {
                    Some(parent) => {
                        let idx = forest.push(Node {
                            name: room.name.trim().to_string(),
                            password: Some(room.password.clone()),
                            sectors: room.sectors.clone(),
                            parent: Some(parent),
                            children: Vec::new(),
                        });
                        forest.nodes[parent].children.push(idx);
                    }
                    None => unattached.push(room),
                }
            }
            if unattached.len() == before {
                // nothing attached this pass; give up on the first
                // stuck room in declaration order
                return Err(ExportError::UnresolvedParent {
                    room: unattached[0].name.trim().to_string(),
                });
            }
            remaining = unattached;
        }

        Ok(forest)
    }

    fn push(&mut self, node: Node) -> usize {
        let idx = self.nodes.len();
        self.index.insert(normalized(&node.name), idx);
        self.nodes.push(node);
        idx
    }

    /// Walk the parent chain of `node`, checking whether it passes
    /// through `ancestor`.
    pub fn is_descendant(&self, node: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[node].parent;
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.nodes[idx].parent;
        }
        false
    }
}
