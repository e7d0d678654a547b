use crate::board::{ALL_MOVES, Board, Move};
use crate::error::SearchError;
use crate::heuristic::Heuristic;
use arrayvec::ArrayVec;

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A search tree node. The parent link is an arena index and is only ever
/// followed to rebuild the path.
#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// Move that produced this node from its parent, `None` for the root.
    pub action: Option<Move>,
    pub g: u32,
    pub h: u32,
}

impl Node {
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Owns every node created during one search.
///
/// Dropping the arena releases the whole node graph at once. Depth-limited
/// search also releases failed subtrees early with [`NodeArena::truncate`].
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId, SearchError> {
        let id = u32::try_from(self.nodes.len()).map_err(|_| SearchError::OutOfMemory)?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| SearchError::OutOfMemory)?;
        self.nodes.push(node);
        Ok(NodeId(id))
    }

    /// Create the root node for `board`.
    pub fn root<H: Heuristic>(&mut self, board: Board, heuristic: &H) -> Result<NodeId, SearchError> {
        self.alloc(Node {
            board,
            parent: None,
            action: None,
            g: 0,
            h: heuristic.estimate(&board),
        })
    }

    /// Create the child reached from `parent` by `direction`, or `None` if the
    /// move is illegal. The child's `h` is computed on its own board.
    pub fn child<H: Heuristic>(
        &mut self,
        parent: NodeId,
        direction: Move,
        heuristic: &H,
    ) -> Result<Option<NodeId>, SearchError> {
        let parent_node = self.get(parent);
        let Ok(board) = parent_node.board.apply_move(direction) else {
            return Ok(None);
        };
        let g = parent_node.g + 1;
        self.alloc(Node {
            board,
            parent: Some(parent),
            action: Some(direction),
            g,
            h: heuristic.estimate(&board),
        })
        .map(Some)
    }

    /// Successor generator: one child per legal move, in canonical
    /// `Up, Down, Left, Right` order.
    pub fn expand<H: Heuristic>(
        &mut self,
        parent: NodeId,
        heuristic: &H,
    ) -> Result<ArrayVec<NodeId, 4>, SearchError> {
        let mut children = ArrayVec::new();
        for direction in ALL_MOVES {
            if let Some(child) = self.child(parent, direction, heuristic)? {
                children.push(child);
            }
        }
        Ok(children)
    }

    /// Release every node allocated after the first `len`.
    ///
    /// Callers must not hold ids at or past `len` afterwards.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Moves from the root to `terminal`, found by walking parent links.
    pub fn solution(&self, terminal: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.get(terminal).g as usize);
        let mut current = Some(terminal);
        while let Some(id) = current {
            let node = self.get(id);
            if let Some(direction) = node.action {
                moves.push(direction);
            }
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GOAL;
    use crate::heuristic::ManhattanHeuristic;

    #[test]
    fn test_root() {
        let mut arena = NodeArena::new();
        let board = Board::from_text("123456708").unwrap();
        let root = arena.root(board, &ManhattanHeuristic::new()).unwrap();
        let node = arena.get(root);
        assert_eq!(node.g, 0);
        assert_eq!(node.h, 1);
        assert_eq!(node.f(), 1);
        assert_eq!(node.parent, None);
        assert_eq!(node.action, None);
    }

    #[test]
    fn test_expand_corner() {
        let mut arena = NodeArena::new();
        let heuristic = ManhattanHeuristic::new();
        let root = arena.root(GOAL, &heuristic).unwrap();
        let children = arena.expand(root, &heuristic).unwrap();
        assert_eq!(children.len(), 2);

        let up = arena.get(children[0]);
        assert_eq!(up.action, Some(Move::Up));
        assert_eq!(up.board, Board::from_text("123450786").unwrap());
        assert_eq!(up.g, 1);
        assert_eq!(up.h, 1);
        assert_eq!(up.parent, Some(root));

        let left = arena.get(children[1]);
        assert_eq!(left.action, Some(Move::Left));
        assert_eq!(left.board, Board::from_text("123456708").unwrap());

        // Parent board is unchanged
        assert_eq!(arena.get(root).board, GOAL);
    }

    #[test]
    fn test_expand_center_order() {
        let mut arena = NodeArena::new();
        let heuristic = ManhattanHeuristic::new();
        let root = arena
            .root(Board::from_text("123405678").unwrap(), &heuristic)
            .unwrap();
        let children = arena.expand(root, &heuristic).unwrap();
        let actions: Vec<Move> = children
            .iter()
            .filter_map(|&id| arena.get(id).action)
            .collect();
        assert_eq!(actions, ALL_MOVES.to_vec());
    }

    #[test]
    fn test_solution_of_root_is_empty() {
        let mut arena = NodeArena::new();
        let root = arena.root(GOAL, &ManhattanHeuristic::new()).unwrap();
        assert!(arena.solution(root).is_empty());
    }

    #[test]
    fn test_solution_walks_parents() {
        let mut arena = NodeArena::new();
        let heuristic = ManhattanHeuristic::new();
        let start = Board::from_text("413726580").unwrap();
        let mut current = arena.root(start, &heuristic).unwrap();
        for direction in "LLUURDDR".chars().filter_map(Move::from_char) {
            current = arena.child(current, direction, &heuristic).unwrap().unwrap();
        }
        assert!(arena.get(current).board.is_goal());
        assert_eq!(arena.get(current).g, 8);

        let moves = arena.solution(current);
        assert_eq!(moves.len(), 8);
        assert_eq!(start.apply_moves(&moves).unwrap(), GOAL);
    }

    #[test]
    fn test_illegal_child() {
        let mut arena = NodeArena::new();
        let heuristic = ManhattanHeuristic::new();
        let root = arena.root(GOAL, &heuristic).unwrap();
        assert_eq!(arena.child(root, Move::Down, &heuristic).unwrap(), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_truncate() {
        let mut arena = NodeArena::new();
        let heuristic = ManhattanHeuristic::new();
        let root = arena.root(GOAL, &heuristic).unwrap();
        let mark = arena.len();
        arena.expand(root, &heuristic).unwrap();
        assert_eq!(arena.len(), 3);
        arena.truncate(mark);
        assert_eq!(arena.len(), 1);
    }
}
