//! Open set of the best-first search.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use super::node::Node;
use crate::error::{Error, Result};
use crate::puzzle::BoardState;

struct Entry {
    f: u32,
    seq: u64,
    node: Node,
}

impl Eq for Entry {}
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

// Reversed so the max-heap pops the lowest f, then the oldest insertion.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of open nodes keyed by `f = g + h`, holding at most one
/// node per board.
///
/// Nodes with equal `f` come out in insertion order.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    open: HashSet<BoardState>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` unless a node with the same board is already open.
    /// Returns whether the node was inserted.
    pub fn add(&mut self, node: Node) -> bool {
        if !self.open.insert(node.state.clone()) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            f: node.f(),
            seq,
            node,
        });
        true
    }

    pub fn contains_state(&self, state: &BoardState) -> bool {
        self.open.contains(state)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove and return an open node with the lowest `f`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyFrontier`] when no node is open.
    pub fn remove(&mut self) -> Result<Node> {
        let entry = self.heap.pop().ok_or(Error::EmptyFrontier)?;
        self.open.remove(&entry.node.state);
        Ok(entry.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Position;
    use crate::search::node::{NodeArena, NodeId};

    fn node_with(state: BoardState, g: u32, parent: NodeId) -> Node {
        let mut node = Node::child(parent, 0, Position::new(0, 0), state);
        node.g = g;
        node
    }

    #[test]
    fn remove_on_empty_frontier_fails() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert!(matches!(frontier.remove(), Err(Error::EmptyFrontier)));
    }

    #[test]
    fn deduplicates_open_states() {
        let goal = BoardState::goal(3).unwrap();
        let mut frontier = Frontier::new();

        assert!(frontier.add(Node::root(goal.clone())));
        assert!(!frontier.add(Node::root(goal.clone())));
        assert_eq!(frontier.len(), 1);
        assert!(frontier.contains_state(&goal));

        frontier.remove().unwrap();
        assert!(!frontier.contains_state(&goal));
        assert!(frontier.add(Node::root(goal)));
    }

    #[test]
    fn removes_lowest_f_first_and_breaks_ties_by_insertion() {
        let goal = BoardState::goal(3).unwrap();
        let mut arena = NodeArena::new();
        let parent = arena.push(Node::root(goal.clone()));

        let a = goal.result(Position::new(1, 2)).unwrap(); // h = 2
        let b = goal.result(Position::new(2, 1)).unwrap(); // h = 2
        let c = a.result(Position::new(0, 2)).unwrap(); // h = 4

        let mut frontier = Frontier::new();
        frontier.add(node_with(c.clone(), 0, parent)); // f = 4
        frontier.add(node_with(a.clone(), 3, parent)); // f = 5
        frontier.add(node_with(b.clone(), 3, parent)); // f = 5
        frontier.add(Node::root(goal.clone())); // f = 0

        let order: Vec<BoardState> = std::iter::from_fn(|| frontier.remove().ok())
            .map(|node| node.state)
            .collect();
        assert_eq!(order, vec![goal, c, a, b]);
    }
}
