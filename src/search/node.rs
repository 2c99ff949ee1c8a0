//! Search nodes and the arena that owns expanded nodes.

use crate::puzzle::{BoardState, Position};

/// Index of an expanded node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A board reached during the search, with the link back to its parent.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: BoardState,
    pub parent: Option<NodeId>,
    /// Tile swapped with the blank to reach `state`. `None` for the root.
    pub action: Option<Position>,
    /// Moves from the start board.
    pub g: u32,
    /// Heuristic value of `state`.
    pub h: u32,
}

impl Node {
    pub fn root(state: BoardState) -> Self {
        let h = state.manhattan_distance();
        Self {
            state,
            parent: None,
            action: None,
            g: 0,
            h,
        }
    }

    pub fn child(parent: NodeId, parent_g: u32, action: Position, state: BoardState) -> Self {
        let h = state.manhattan_distance();
        Self {
            state,
            parent: Some(parent),
            action: Some(action),
            g: parent_g + 1,
            h,
        }
    }

    /// Estimated total cost, used as the frontier priority.
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Expanded nodes of one search run. Children refer to their parent by
/// index, parents hold nothing about their children.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Actions leading from the root of the arena to `goal`, first move first.
pub fn reconstruct(goal: &Node, arena: &NodeArena) -> Vec<Position> {
    let mut actions = Vec::with_capacity(goal.g as usize);
    let mut node = goal;
    while let (Some(parent), Some(action)) = (node.parent, node.action) {
        actions.push(action);
        node = arena.get(parent);
    }
    actions.reverse();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_empty_path() {
        let arena = NodeArena::new();
        assert!(arena.is_empty());
        let root = Node::root(BoardState::goal(3).unwrap());
        assert_eq!(root.f(), 0);
        assert!(reconstruct(&root, &arena).is_empty());
    }

    #[test]
    fn path_follows_parent_links_in_order() {
        let start = BoardState::goal(3).unwrap();
        let first = Position::new(1, 2);
        let second = Position::new(0, 2);

        let mut arena = NodeArena::new();
        let root = Node::root(start.clone());
        let root_id = arena.push(root);

        let mid_state = start.result(first).unwrap();
        let mid = Node::child(root_id, 0, first, mid_state.clone());
        assert_eq!(mid.g, 1);
        assert_eq!(mid.h, 2);
        let mid_id = arena.push(mid);

        let end = Node::child(mid_id, 1, second, mid_state.result(second).unwrap());
        assert_eq!(end.g, 2);
        assert_eq!(reconstruct(&end, &arena), vec![first, second]);
        assert_eq!(arena.len(), 2);
        assert!(!arena.is_empty());
    }
}
