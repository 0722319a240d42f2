//! Hash addresses
//!
//! Every tweakable hash call is keyed by a 32-byte address that names the position of the
//! value being computed: hypertree layer, tree, address type, key pair, and chain or node
//! coordinates. Calls whose addresses differ in any field behave as independent functions.
//!
//! Fields are big-endian integers. Each address type is its own zero-copy struct that
//! serializes in place through `zerocopy`. Conversions between types are explicit and clear
//! every field the target type does not carry.
//!
//! `tree_high` is reserved: tree indices are at most 64 bits wide, so it is always zero.

use zerocopy::AsBytes;
use zerocopy::byteorder::big_endian::{U32, U64};

/// A serialized hash address with a fixed type word
pub(crate) trait Address: AsRef<[u8]> + Sync {
    const TYPE: u32;
}

/// Address of one step of a WOTS+ hash chain
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct WotsHash {
    pub layer: U32,
    tree_high: U32,
    pub tree: U64,
    kind: U32,
    pub key_pair: U32,
    pub chain: U32,
    pub hash: U32,
}

/// Address used to compress a WOTS+ public key
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct WotsPk {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    key_pair: U32,
    padding: U64,
}

/// Address of an internal node of a hypertree layer
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct TreeNode {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    padding: U32,
    pub height: U32,
    pub index: U32,
}

/// Address of a FORS leaf or internal node
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct ForsTree {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    key_pair: U32,
    pub height: U32,
    pub index: U32,
}

/// Address used to compress the FORS roots into the FORS public key
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct ForsRoots {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    key_pair: U32,
    padding: U64,
}

/// Address used to derive a WOTS+ chain secret
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct WotsPrf {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    key_pair: U32,
    chain: U32,
    hash: U32,
}

/// Address used to derive a FORS leaf secret
#[derive(Clone, Copy, Debug, AsBytes)]
#[repr(C)]
pub struct ForsPrf {
    layer: U32,
    tree_high: U32,
    tree: U64,
    kind: U32,
    key_pair: U32,
    height: U32,
    index: U32,
}

macro_rules! impl_address {
    ($($adrs:ty => $type:expr),* $(,)?) => {
        $(
            impl Address for $adrs {
                const TYPE: u32 = $type;
            }

            impl AsRef<[u8]> for $adrs {
                fn as_ref(&self) -> &[u8] {
                    self.as_bytes()
                }
            }
        )*
    };
}

impl_address! {
    WotsHash => 0,
    WotsPk => 1,
    TreeNode => 2,
    ForsTree => 3,
    ForsRoots => 4,
    WotsPrf => 5,
    ForsPrf => 6,
}

impl WotsHash {
    /// Chain address for key pair `key_pair` of tree `tree` on hypertree layer `layer`
    pub fn new(layer: u32, tree: u64, key_pair: u32) -> Self {
        WotsHash {
            layer: layer.into(),
            tree_high: U32::ZERO,
            tree: tree.into(),
            kind: Self::TYPE.into(),
            key_pair: key_pair.into(),
            chain: U32::ZERO,
            hash: U32::ZERO,
        }
    }

    /// Secret derivation address for the current chain
    pub fn prf(&self) -> WotsPrf {
        WotsPrf {
            layer: self.layer,
            tree_high: self.tree_high,
            tree: self.tree,
            kind: WotsPrf::TYPE.into(),
            key_pair: self.key_pair,
            chain: self.chain,
            hash: U32::ZERO,
        }
    }

    /// Public key compression address for the current key pair
    pub fn pk(&self) -> WotsPk {
        WotsPk {
            layer: self.layer,
            tree_high: self.tree_high,
            tree: self.tree,
            kind: WotsPk::TYPE.into(),
            key_pair: self.key_pair,
            padding: U64::ZERO,
        }
    }

    /// Merkle node address in the same layer and tree
    pub fn tree_node(&self) -> TreeNode {
        TreeNode {
            layer: self.layer,
            tree_high: self.tree_high,
            tree: self.tree,
            kind: TreeNode::TYPE.into(),
            padding: U32::ZERO,
            height: U32::ZERO,
            index: U32::ZERO,
        }
    }
}

impl ForsTree {
    /// FORS address for the few-time key pair `key_pair` of bottom-layer tree `tree`
    pub fn new(tree: u64, key_pair: u32) -> Self {
        ForsTree {
            layer: U32::ZERO,
            tree_high: U32::ZERO,
            tree: tree.into(),
            kind: Self::TYPE.into(),
            key_pair: key_pair.into(),
            height: U32::ZERO,
            index: U32::ZERO,
        }
    }

    /// Secret derivation address for the leaf at forest-wide index `index`
    pub fn prf(&self, index: u32) -> ForsPrf {
        ForsPrf {
            layer: self.layer,
            tree_high: self.tree_high,
            tree: self.tree,
            kind: ForsPrf::TYPE.into(),
            key_pair: self.key_pair,
            height: U32::ZERO,
            index: index.into(),
        }
    }

    /// Root compression address for the same key pair
    pub fn roots(&self) -> ForsRoots {
        ForsRoots {
            layer: self.layer,
            tree_high: self.tree_high,
            tree: self.tree,
            kind: ForsRoots::TYPE.into(),
            key_pair: self.key_pair,
            padding: U64::ZERO,
        }
    }
}
