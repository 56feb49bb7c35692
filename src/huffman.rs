//! Canonical Huffman trees for the ASH0 container.
//!
//! Two flavors live here: [`DecodeTree`], built by deserializing the bit
//! pattern embedded in the stream, and [`EncodeTree`], built from a
//! frequency histogram and serialized out to that same bit pattern. Both
//! trees are walked iteratively rather than recursively, since the worst
//! case tree depth is `2^W` for a pathological frequency distribution and a
//! recursive walk would risk overflowing the stack for wide alphabets.

use crate::bitio::{BitReader, BitWriter};
use crate::Error;
use std::collections::BinaryHeap;
use std::cmp::Reverse;

enum Side {
    Left,
    Right,
}

/// Tree as consumed by the decoder: `left`/`right` indexed by internal node,
/// leaves self-identify by index (index == symbol) in `[0, alphabet)`.
pub struct DecodeTree {
    left: Vec<usize>,
    right: Vec<usize>,
    root: usize,
    width: u32,
}

impl DecodeTree {
    fn alphabet(&self) -> usize {
        1usize << self.width
    }

    /// Deserialize a tree of alphabet width `width` via prefix DFS: `1` bit
    /// means "internal node, left subtree follows then right subtree", `0`
    /// bit means "leaf, followed by a `width`-bit symbol".
    pub fn deserialize(reader: &mut BitReader, width: u32) -> Result<Self, Error> {
        let alphabet = 1usize << width;
        let max_nodes = 2 * alphabet - 1;
        let mut left = vec![0usize; max_nodes];
        let mut right = vec![0usize; max_nodes];
        let mut next_internal = alphabet;
        let mut stack: Vec<(usize, Side)> = Vec::new();

        loop {
            if reader.read_bit()? == 1 {
                if next_internal >= max_nodes {
                    return Err(Error::TruncatedStream);
                }
                let k = next_internal;
                next_internal += 1;
                stack.push((k, Side::Right));
                stack.push((k, Side::Left));
                continue;
            }
            let sym = reader.read_bits(width)? as usize;
            let mut value = sym;
            loop {
                match stack.pop() {
                    None => {
                        return Ok(DecodeTree { left, right, root: value, width });
                    }
                    Some((k, Side::Left)) => {
                        left[k] = value;
                        break;
                    }
                    Some((k, Side::Right)) => {
                        right[k] = value;
                        value = k;
                        continue;
                    }
                }
            }
        }
    }

    /// Walk from the root one bit at a time until a leaf (symbol) is reached.
    pub fn decode_symbol(&self, reader: &mut BitReader) -> Result<usize, Error> {
        let alphabet = self.alphabet();
        let mut n = self.root;
        while n >= alphabet {
            n = if reader.read_bit()? == 0 { self.left[n] } else { self.right[n] };
        }
        Ok(n)
    }
}

struct EncNode {
    represent_count: usize,
    left: usize,
    right: usize,
    symbol: Option<usize>,
}

const NONE: usize = usize::MAX;

/// Tree as built by the encoder from a frequency histogram.
pub struct EncodeTree {
    nodes: Vec<EncNode>,
    parent: Vec<usize>,
    root: usize,
    width: u32,
}

impl EncodeTree {
    fn alphabet(&self) -> usize {
        1usize << self.width
    }

    /// Build a canonical tree over alphabet `2^width` from `freq`.
    ///
    /// Zero-frequency symbols are excluded from the tree entirely (they
    /// never occur), except that the alphabet floor requires at least two
    /// leaves, so zero-frequency symbols are promoted to frequency 1 until
    /// that floor is met.
    pub fn build(freq: &[u64], width: u32) -> Self {
        let alphabet = 1usize << width;
        assert_eq!(freq.len(), alphabet);

        let mut freq = freq.to_vec();
        let nonzero = freq.iter().filter(|&&f| f > 0).count();
        if nonzero < 2 {
            let mut promoted = nonzero;
            for f in freq.iter_mut() {
                if promoted >= 2 {
                    break;
                }
                if *f == 0 {
                    *f = 1;
                    promoted += 1;
                }
            }
        }

        let mut nodes: Vec<EncNode> = (0..alphabet)
            .map(|s| EncNode { represent_count: 1, left: NONE, right: NONE, symbol: Some(s) })
            .collect();

        // min-heap over (freq, insertion order, node index); the insertion
        // order breaks ties deterministically without affecting decodability.
        let mut heap: BinaryHeap<Reverse<(u64, usize, usize)>> = BinaryHeap::new();
        let mut seq = 0usize;
        for (i, &f) in freq.iter().enumerate() {
            if f > 0 {
                heap.push(Reverse((f, seq, i)));
                seq += 1;
            }
        }

        while heap.len() > 1 {
            let Reverse((f1, _, i1)) = heap.pop().unwrap();
            let Reverse((f2, _, i2)) = heap.pop().unwrap();
            let parent = EncNode {
                represent_count: nodes[i1].represent_count + nodes[i2].represent_count,
                left: i1,
                right: i2,
                symbol: None,
            };
            let idx = nodes.len();
            nodes.push(parent);
            heap.push(Reverse((f1 + f2, seq, idx)));
            seq += 1;
        }
        let Reverse((_, _, root)) = heap.pop().expect("alphabet floor guarantees >= 2 leaves");

        // "Shallow child first": every internal node was pushed onto `nodes`
        // strictly after both of its children, so a single forward pass is
        // already a valid post-order walk and no recursion is needed.
        for idx in alphabet..nodes.len() {
            let (l, r) = (nodes[idx].left, nodes[idx].right);
            if nodes[l].represent_count > nodes[r].represent_count {
                nodes[idx].left = r;
                nodes[idx].right = l;
            }
        }

        let mut parent = vec![NONE; nodes.len()];
        for idx in alphabet..nodes.len() {
            parent[nodes[idx].left] = idx;
            parent[nodes[idx].right] = idx;
        }

        EncodeTree { nodes, parent, root, width }
    }

    /// Whether `sym` is an actual leaf of this tree (as opposed to merely
    /// being within the alphabet's numeric range but never encoded).
    pub fn contains_leaf(&self, sym: usize) -> bool {
        sym < self.alphabet() && (sym == self.root || self.parent[sym] != NONE)
    }

    /// Number of bits needed to encode `sym` (its depth from the root).
    pub fn code_len(&self, sym: usize) -> usize {
        let mut idx = sym;
        let mut len = 0;
        while idx != self.root {
            idx = self.parent[idx];
            len += 1;
        }
        len
    }

    /// Emit the code for `sym` by walking leaf-to-root and replaying the
    /// collected directions root-to-leaf. This is immune to the symbol
    /// alphabet not forming contiguous ranges per subtree (a plain
    /// range-membership descent would require that invariant; a frequency
    /// driven merge gives no such guarantee).
    pub fn encode_symbol(&self, sym: usize, writer: &mut BitWriter) {
        let mut bits: Vec<u32> = Vec::with_capacity(self.code_len(sym));
        let mut idx = sym;
        while idx != self.root {
            let p = self.parent[idx];
            bits.push(if self.nodes[p].left == idx { 0 } else { 1 });
            idx = p;
        }
        for b in bits.into_iter().rev() {
            writer.write_bit(b);
        }
    }

    /// Serialize via prefix DFS: `1` + left + right for internal nodes,
    /// `0` + `width`-bit symbol for leaves.
    pub fn serialize(&self, writer: &mut BitWriter) {
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            match self.nodes[idx].symbol {
                Some(sym) => {
                    writer.write_bit(0);
                    writer.write_bits_be(sym as u32, self.width);
                }
                None => {
                    writer.write_bit(1);
                    stack.push(self.nodes[idx].right);
                    stack.push(self.nodes[idx].left);
                }
            }
        }
    }
}
