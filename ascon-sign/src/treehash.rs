//! Merkle tree folding on an explicit node stack
//!
//! Leaves are produced left to right. Whenever the new node and the topmost stack entry have
//! the same height they are merged into their parent. Entries left on the stack have distinct
//! heights below `Z`, so a fixed array of `Z` slots holds them and the finished root never
//! touches the stack.

use hybrid_array::{Array, ArraySize};

/// Treehash stack entry
struct NodeEntry<N: ArraySize> {
    value: Array<u8, N>,
    height: u32,
}

impl<N: ArraySize> Default for NodeEntry<N> {
    fn default() -> Self {
        Self {
            value: Array::default(),
            height: 0,
        }
    }
}

/// Computes the root of a tree of height `Z` and the authentication path of leaf `leaf_idx`.
///
/// `leaf(j)` produces leaf `j`. `parent(height, index, left, right)` produces the node at
/// `height` with tree-local index `index` from its two children. The returned path lists the
/// siblings of `leaf_idx` and its ancestors from the bottom up.
#[allow(clippy::cast_possible_truncation)] // Z < 32
pub(crate) fn treehash<N: ArraySize, Z: ArraySize>(
    leaf_idx: u32,
    mut leaf: impl FnMut(u32) -> Array<u8, N>,
    mut parent: impl FnMut(u32, u32, &Array<u8, N>, &Array<u8, N>) -> Array<u8, N>,
) -> (Array<u8, N>, Array<Array<u8, N>, Z>) {
    debug_assert!(Z::U32 < 32);
    debug_assert!(u64::from(leaf_idx) < 1u64 << Z::U32);

    let mut auth = Array::<Array<u8, N>, Z>::default();
    let mut stack = Array::<NodeEntry<N>, Z>::default();
    let mut offset = 0;
    let mut root = Array::<u8, N>::default();

    for idx in 0..(1u64 << Z::U32) {
        let idx = idx as u32;
        let mut node = NodeEntry {
            value: leaf(idx),
            height: 0,
        };
        if Z::U32 > 0 && idx ^ 1 == leaf_idx {
            auth[0] = node.value.clone();
        }

        while offset > 0 && stack[offset - 1].height == node.height {
            offset -= 1;
            let height = node.height + 1;
            let index = idx >> height;
            node = NodeEntry {
                value: parent(height, index, &stack[offset].value, &node.value),
                height,
            };
            if height < Z::U32 && (leaf_idx >> height) ^ 1 == index {
                auth[height as usize] = node.value.clone();
            }
        }

        if node.height == Z::U32 {
            root = node.value;
        } else {
            stack[offset] = node;
            offset += 1;
        }
    }

    debug_assert_eq!(offset, 0);
    (root, auth)
}
