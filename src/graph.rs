//! The constraint graph the search places onto a grid.
//!
//! Every letter gets a [`SymbolGroup`] holding a pool of interchangeable slot
//! nodes (its capacity) and every word gets a chain of occurrence nodes, one per
//! letter. Occurrences carry two kinds of edges:
//! - adjacency: the previous/next letter of the word must sit in a neighbouring cell;
//! - exclusivity: other occurrences of the same letter in the same word must sit in
//!   a different cell.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Edges are accumulated by a
//! [`GraphBuilder`] and frozen into a [`ConstraintGraph`] before the search starts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a symbol group in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A placeholder that must be put on some grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// One unit of capacity for a letter.
    Slot { id: NodeId, symbol: char, group: GroupId },
    /// The letter at `position` of word number `word`.
    Occurrence { id: NodeId, symbol: char, group: GroupId, word: usize, position: usize },
}

impl Node {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Node::Slot { id, .. } | Node::Occurrence { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            Node::Slot { symbol, .. } | Node::Occurrence { symbol, .. } => *symbol,
        }
    }

    #[must_use]
    pub fn group(&self) -> GroupId {
        match self {
            Node::Slot { group, .. } | Node::Occurrence { group, .. } => *group,
        }
    }

    #[must_use]
    pub fn is_slot(&self) -> bool {
        matches!(self, Node::Slot { .. })
    }
}

/// All the nodes and constraints for one letter.
#[derive(Debug, Clone)]
pub struct SymbolGroup {
    pub symbol: char,
    /// The pool; its length is the group's capacity.
    pub slots: Vec<NodeId>,
    /// One chain per word using this letter: that word's occurrences of it.
    pub chains: Vec<Vec<NodeId>>,
    /// Every occurrence node of this letter, across all words.
    pub occurrences: Vec<NodeId>,
    /// Distinct groups that some occurrence of this letter must touch.
    pub adjacent_groups: Vec<GroupId>,
    /// `adjacent_groups.len() / pool_size()`; higher means harder to place.
    pub constraint_score: f64,
}

impl SymbolGroup {
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    /// Groups with a single cell and many distinct neighbours need that cell to
    /// have room around it.
    #[must_use]
    pub(crate) fn needs_room(&self) -> bool {
        self.pool_size() == 1 && self.adjacent_groups.len() > 3
    }
}

/// The frozen graph: nodes, groups and edge lists never change after building.
#[derive(Debug, Clone)]
pub struct ConstraintGraph {
    nodes: Vec<Node>,
    groups: Vec<SymbolGroup>,
    group_by_symbol: BTreeMap<char, GroupId>,
    adjacency: Vec<Vec<NodeId>>,
    exclusivity: Vec<Vec<NodeId>>,
    words: Vec<String>,
}

impl ConstraintGraph {
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> &SymbolGroup {
        &self.groups[id.0]
    }

    pub fn groups(&self) -> &[SymbolGroup] {
        &self.groups
    }

    /// The group of `node`.
    #[must_use]
    pub fn group_of(&self, node: NodeId) -> &SymbolGroup {
        self.group(self.node(node).group())
    }

    #[must_use]
    pub fn group_for_symbol(&self, symbol: char) -> Option<GroupId> {
        self.group_by_symbol.get(&symbol).copied()
    }

    /// Occurrences that must be next to `node` (empty for slots).
    #[must_use]
    pub fn adjacent(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node.0]
    }

    /// Occurrences that must not share a cell with `node` (empty for slots).
    #[must_use]
    pub fn exclusive(&self, node: NodeId) -> &[NodeId] {
        &self.exclusivity[node.0]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Capacity per letter, as used to build this graph.
    #[must_use]
    pub fn capacities(&self) -> BTreeMap<char, usize> {
        self.groups.iter().map(|g| (g.symbol, g.pool_size())).collect()
    }

    /// The group with the highest constraint score; ties go to the earlier letter.
    #[must_use]
    pub fn most_constrained_group(&self) -> Option<&SymbolGroup> {
        self.groups.iter().fold(None, |best: Option<&SymbolGroup>, g| match best {
            Some(b) if b.constraint_score >= g.constraint_score => Some(b),
            _ => Some(g),
        })
    }
}

/// Accumulates nodes and edges, then freezes them with [`GraphBuilder::build`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    groups: Vec<SymbolGroup>,
    group_by_symbol: BTreeMap<char, GroupId>,
    adjacency: Vec<Vec<NodeId>>,
    exclusivity: Vec<Vec<NodeId>>,
    words: Vec<String>,
}

impl GraphBuilder {
    /// Start a graph with one group per letter holding `capacity` slot nodes.
    #[must_use]
    pub fn new(capacities: &BTreeMap<char, usize>) -> Self {
        let mut builder = GraphBuilder::default();

        for (&symbol, &capacity) in capacities {
            let group = GroupId(builder.groups.len());
            builder.group_by_symbol.insert(symbol, group);
            builder.groups.push(SymbolGroup {
                symbol,
                slots: Vec::with_capacity(capacity),
                chains: Vec::new(),
                occurrences: Vec::new(),
                adjacent_groups: Vec::new(),
                constraint_score: 0.0,
            });

            for _ in 0..capacity {
                let id = builder.push_node(|id| Node::Slot { id, symbol, group });
                builder.groups[group.0].slots.push(id);
            }
        }

        builder
    }

    fn push_node(&mut self, make: impl FnOnce(NodeId) -> Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(make(id));
        self.adjacency.push(Vec::new());
        self.exclusivity.push(Vec::new());
        id
    }

    fn link(edges: &mut [Vec<NodeId>], a: NodeId, b: NodeId) {
        if !edges[a.0].contains(&b) {
            edges[a.0].push(b);
        }
        if !edges[b.0].contains(&a) {
            edges[b.0].push(a);
        }
    }

    /// Add the occurrence chain for one word.
    ///
    /// # Panics
    ///
    /// Panics if the word uses a letter that has no group; capacities always come
    /// from the same word set, so this is a programming error.
    pub fn add_word(&mut self, word: &str) {
        let word_index = self.words.len();
        self.words.push(word.to_string());

        let mut chain: Vec<NodeId> = Vec::with_capacity(word.len());
        for (position, symbol) in word.chars().enumerate() {
            let group = self
                .group_by_symbol
                .get(&symbol)
                .copied()
                .unwrap_or_else(|| panic!("no symbol group for '{symbol}' in \"{word}\""));

            let id = self.push_node(|id| Node::Occurrence { id, symbol, group, word: word_index, position });
            self.groups[group.0].occurrences.push(id);
            chain.push(id);
        }

        for pair in chain.windows(2) {
            Self::link(&mut self.adjacency, pair[0], pair[1]);
        }

        let mut by_group: BTreeMap<GroupId, Vec<NodeId>> = BTreeMap::new();
        for &id in &chain {
            by_group.entry(self.nodes[id.0].group()).or_default().push(id);
        }
        for (group, same_symbol) in by_group {
            for (i, &a) in same_symbol.iter().enumerate() {
                for &b in &same_symbol[i + 1..] {
                    Self::link(&mut self.exclusivity, a, b);
                }
            }
            self.groups[group.0].chains.push(same_symbol);
        }
    }

    /// Freeze the graph, computing each group's neighbours and constraint score.
    #[must_use]
    pub fn build(mut self) -> ConstraintGraph {
        for group in &mut self.groups {
            let neighbours: BTreeSet<GroupId> = group
                .occurrences
                .iter()
                .flat_map(|&occ| self.adjacency[occ.0].iter())
                .map(|&n| self.nodes[n.0].group())
                .collect();

            group.constraint_score = neighbours.len() as f64 / group.pool_size().max(1) as f64;
            group.adjacent_groups = neighbours.into_iter().collect();
        }

        ConstraintGraph {
            nodes: self.nodes,
            groups: self.groups,
            group_by_symbol: self.group_by_symbol,
            adjacency: self.adjacency,
            exclusivity: self.exclusivity,
            words: self.words,
        }
    }
}

/// Build the graph for `words` with the given pool size per letter.
#[must_use]
pub fn build_graph(words: &[String], capacities: &BTreeMap<char, usize>) -> ConstraintGraph {
    let mut builder = GraphBuilder::new(capacities);
    for word in words {
        builder.add_word(word);
    }
    builder.build()
}
