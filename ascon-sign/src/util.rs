use crate::fors::ForsParams;
use hybrid_array::{Array, ArraySize, typenum::Unsigned};

/// Splits `x` into `OutLen` big-endian integers of `B` bits each, most significant first
#[allow(clippy::cast_possible_truncation)] // B <= 16
pub fn base_2b<OutLen: ArraySize, B: Unsigned>(x: &[u8]) -> Array<u16, OutLen> {
    debug_assert!(x.len() >= (OutLen::USIZE * B::USIZE).div_ceil(8));
    debug_assert!(B::USIZE <= 16);

    let mut bits = 0usize;
    let mut i = 0;
    let mut total = 0usize;

    Array::<u16, OutLen>::from_fn(|_: usize| {
        while bits < B::USIZE {
            total = (total << 8) + x[i] as usize;
            bits += 8;
            i += 1;
        }
        bits -= B::USIZE;
        let out = (total >> bits) & ((1 << B::USIZE) - 1);
        total &= (1 << bits) - 1; // keep only unread bits so `total` cannot overflow
        out as u16
    })
}

/// A message digest split into the FORS message and the signing position in the hypertree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedDigest<P: ForsParams> {
    pub md: Array<u8, P::MD>,
    pub idx_tree: u64,
    pub idx_leaf: u32,
}

fn be_prefix(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Separates the digest into the FORS message, the XMSS tree index, and the XMSS leaf index.
pub fn split_digest<P: ForsParams>(digest: &Array<u8, P::M>) -> IndexedDigest<P> {
    let tree_bits = P::H::U32 - P::HPrime::U32;
    let leaf_bits = P::HPrime::U32;

    let (md_bytes, rest) = digest.split_at(P::MD::USIZE);
    let (tree_bytes, leaf_bytes) = rest.split_at(tree_bits.div_ceil(8) as usize);

    let mut md = Array::<u8, P::MD>::default();
    md.copy_from_slice(md_bytes);

    // 64 tree bits is a full u64
    let tree_mask = 1u64.checked_shl(tree_bits).map_or(u64::MAX, |v| v - 1);
    let leaf_mask = 1u64.checked_shl(leaf_bits).map_or(u64::MAX, |v| v - 1);

    #[allow(clippy::cast_possible_truncation)] // leaf_bits <= 32
    let idx_leaf = (be_prefix(leaf_bytes) & leaf_mask) as u32;
    IndexedDigest {
        md,
        idx_tree: be_prefix(tree_bytes) & tree_mask,
        idx_leaf,
    }
}

/// Evaluates `f` on `0..L` and collects the results in index order
#[cfg(feature = "rayon")]
pub fn map_indexed<L: ArraySize, T: Send>(f: impl Fn(u32) -> T + Sync + Send) -> Array<T, L> {
    use rayon::prelude::*;

    let items: Vec<T> = (0..L::U32).into_par_iter().map(f).collect();
    items.into_iter().collect()
}

/// Evaluates `f` on `0..L` and collects the results in index order
#[cfg(not(feature = "rayon"))]
#[allow(clippy::cast_possible_truncation)] // L < 2^32
pub fn map_indexed<L: ArraySize, T: Send>(f: impl Fn(u32) -> T + Sync + Send) -> Array<T, L> {
    Array::from_fn(|i| f(i as u32))
}

#[cfg(test)]
pub mod macros {
    /// Generates a `#[test]` running `$name::<$t>()`, named after the function and parameter set
    #[macro_export]
    macro_rules! gen_test {
        ($name:ident, $t:ty) => {
            paste::paste! {
               #[test]
               fn [<$name _ $t:snake>]() {
                   $name::<$t>()
               }
            }
        };
    }

    macro_rules! test_parameter_sets {
        ($name:ident) => {
            #[allow(unused_imports)]
            use crate::hashes::*;
            crate::gen_test!($name, AsconSign128s);
            crate::gen_test!($name, AsconSign128f);
            crate::gen_test!($name, AsconSign192s);
            crate::gen_test!($name, AsconSign192f);

            crate::gen_test!($name, AsconSign128sSimple);
            crate::gen_test!($name, AsconSign128fSimple);
            crate::gen_test!($name, AsconSign192sSimple);
            crate::gen_test!($name, AsconSign192fSimple);
        };
    }

    pub(crate) use test_parameter_sets;
}
