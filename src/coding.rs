use {
    crate::{
        bits::BitReader,
        error::FormatError,
        tree::{HuffmanTree, Node},
    },
    arr_macro::arr,
    bitvec::prelude::*,
    std::{fmt, ops::Index},
};

/// The bit string assigned to one byte.
pub(crate) type Code = BitBox<u8, Msb0>;

/// Byte to code mapping. Codes produced by [`CodeTable::of`] are prefix-free.
#[derive(Clone, PartialEq)]
pub(crate) struct CodeTable {
    codes: [Option<Code>; 256],
}

impl Index<u8> for CodeTable {
    type Output = BitSlice<u8, Msb0>;

    fn index(&self, byte: u8) -> &BitSlice<u8, Msb0> {
        self.codes[byte as usize]
            .as_deref()
            .unwrap_or_else(|| panic!("no code for byte {:#04x}", byte))
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg_map = f.debug_map();
        for (byte, code) in self.iter() {
            let code: String = code
                .iter()
                .by_vals()
                .map(|bit| if bit { '1' } else { '0' })
                .collect();
            dbg_map.entry(&byte, &code);
        }
        dbg_map.finish()
    }
}

impl CodeTable {
    pub(crate) fn empty() -> Self {
        CodeTable {
            // arrays of non-Copy types cannot use [None; 256]
            codes: arr![None; 256],
        }
    }

    /// Collects the path from the root to every leaf, 0 for left and 1 for right.
    pub(crate) fn of(tree: &HuffmanTree) -> Self {
        let mut this = CodeTable::empty();

        // A lone leaf has an empty path, but every code needs at least one bit.
        if let Node::Leaf { byte, .. } = tree.node(tree.root()) {
            this.codes[byte as usize] = Some(bitbox![u8, Msb0; 0]);
            return this;
        }

        // Skewed trees can be 255 levels deep, so walk with a stack, not recursion.
        let mut stack = vec![(tree.root(), BitVec::<u8, Msb0>::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { byte, .. } => {
                    let code = &mut this.codes[byte as usize];
                    assert!(code.is_none());
                    *code = Some(path.into_boxed_bitslice());
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }
        this
    }

    /// Adds a code read back from a compressed file.
    pub(crate) fn insert(&mut self, byte: u8, code: Code) -> Result<(), FormatError> {
        if code.is_empty() {
            return Err(FormatError::EmptyCode { symbol: byte });
        }
        let slot = &mut self.codes[byte as usize];
        if slot.is_some() {
            return Err(FormatError::DuplicateSymbol(byte));
        }
        *slot = Some(code);
        Ok(())
    }

    /// Codes in ascending byte order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        (0..=u8::MAX).filter_map(move |byte| {
            self.codes[byte as usize]
                .as_deref()
                .map(|code| (byte, code))
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Copy, Clone)]
enum TrieNode {
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

const ROOT: usize = 0;

/// A binary trie with one leaf per code, walked bit by bit to decode.
#[derive(Debug)]
pub(crate) struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    /// Fails if any code is empty, or ends on or passes through another code.
    pub(crate) fn of(table: &CodeTable) -> Result<Self, FormatError> {
        let mut this = DecodeTrie {
            nodes: vec![TrieNode::Branch([None, None])],
        };
        for (byte, code) in table.iter() {
            if code.is_empty() {
                return Err(FormatError::EmptyCode { symbol: byte });
            }
            let mut at = ROOT;
            for (depth, bit) in code.iter().by_vals().enumerate() {
                let last = depth + 1 == code.len();
                if let TrieNode::Leaf(_) = this.nodes[at] {
                    return Err(FormatError::NotPrefixFree { symbol: byte });
                }
                at = match this.child(at, bit) {
                    Some(_) if last => return Err(FormatError::NotPrefixFree { symbol: byte }),
                    Some(next) => next,
                    None if last => this.attach(at, bit, TrieNode::Leaf(byte)),
                    None => this.attach(at, bit, TrieNode::Branch([None, None])),
                };
            }
        }
        Ok(this)
    }

    fn child(&self, at: usize, bit: bool) -> Option<usize> {
        match self.nodes[at] {
            TrieNode::Branch(children) => children[bit as usize],
            TrieNode::Leaf(_) => None,
        }
    }

    fn attach(&mut self, parent: usize, bit: bool, node: TrieNode) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        if let TrieNode::Branch(children) = &mut self.nodes[parent] {
            children[bit as usize] = Some(id);
        }
        id
    }

    /// Decodes every remaining bit of `bits`, which must end exactly on a code boundary.
    pub(crate) fn decode(&self, bits: &mut BitReader<'_>) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::new();
        let mut at = ROOT;
        let mut code_start = bits.position();
        while !bits.is_empty() {
            let position = bits.position();
            at = self
                .child(at, bits.read_bit()?)
                .ok_or(FormatError::UnknownCode { position })?;
            if let TrieNode::Leaf(byte) = self.nodes[at] {
                out.push(byte);
                at = ROOT;
                code_start = bits.position();
            }
        }
        if at != ROOT {
            return Err(FormatError::IncompleteCode {
                dangling: bits.position() - code_start,
            });
        }
        Ok(out)
    }
}
