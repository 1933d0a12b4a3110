use {
    crate::frequency::ByteFrequency,
    std::{cmp::Reverse, collections::BinaryHeap},
};

/// Index of a node in its tree's arena.
pub(crate) type NodeId = usize;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Leaf {
        byte: u8,
        weight: usize,
    },
    Internal {
        left: NodeId,
        right: NodeId,
        weight: usize,
    },
}

impl Node {
    pub(crate) fn weight(&self) -> usize {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// A Huffman coding tree, stored as an arena of nodes.
///
/// Leaves occupy the first slots in ascending byte order, and every merged
/// node is appended after its children, so a node's index is also its
/// arrival order in the priority queue. The queue orders by `(weight, index)`,
/// which makes equal weights resolve to the earliest arrival.
#[derive(Debug)]
pub(crate) struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Builds the tree, or `None` if no byte occurs at all.
    pub(crate) fn of(frequency: &ByteFrequency) -> Option<Self> {
        let mut nodes = Vec::new();
        let mut queue = BinaryHeap::new();
        for (byte, weight) in frequency.present() {
            queue.push(Reverse((weight, nodes.len())));
            nodes.push(Node::Leaf { byte, weight });
        }

        // Take the two lightest nodes and merge them until one node is left.
        // The first one out becomes the left child.
        loop {
            let Reverse((left_weight, left)) = queue.pop()?;
            let Reverse((right_weight, right)) = match queue.pop() {
                Some(entry) => entry,
                None => return Some(HuffmanTree { nodes, root: left }),
            };
            let weight = left_weight + right_weight;
            queue.push(Reverse((weight, nodes.len())));
            nodes.push(Node::Internal {
                left,
                right,
                weight,
            });
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    pub(crate) fn weight(&self) -> usize {
        self.node(self.root).weight()
    }
}
