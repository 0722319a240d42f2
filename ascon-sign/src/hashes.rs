//! Hash functions used in the Ascon-Sign signature scheme
//!
//! Every function of the scheme is derived from Ascon-Hash or Ascon-XOF.
//! A `HashSuite` bundles them for one output length `N` and digest length `M`.
//! A [`HashMode`] decides whether the tweakable hashes blind their input with a
//! pseudorandom bitmask before absorbing it.
mod ascon;

use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use zeroize::Zeroizing;

pub use ascon::*;

use crate::{PkSeed, SkPrf, SkSeed, address::Address};

/// Selects how the tweakable hashes `F`, `H` and `T_l` treat their message input
pub trait HashMode: Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Whether the message is XORed with an Ascon-XOF bitmask before hashing
    const ROBUST: bool;
}

/// Message blocks are masked with `AsconXof(pkSeed || adrs)` before hashing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Robust;

/// Message blocks are hashed as-is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Simple;

impl HashMode for Robust {
    const ROBUST: bool = true;
}

impl HashMode for Simple {
    const ROBUST: bool = false;
}

/// The hash functions of one parameter set
///
/// All functions are stateless: each call builds its own hasher.
pub(crate) trait HashSuite: Sized + Clone + Debug + PartialEq + Eq {
    type N: ArraySize + Debug + Clone + PartialEq + Eq;
    type M: ArraySize + Debug + Clone + PartialEq + Eq;

    /// Whether the tweakable hashes apply a bitmask
    const ROBUST: bool;

    /// Pseudorandom function that generates the randomizer for the randomized hashing of the message to be signed.
    fn prf_msg(
        sk_prf: &SkPrf<Self::N>,
        opt_rand: &Array<u8, Self::N>,
        msg: &[u8],
    ) -> Array<u8, Self::N>;

    /// Hashes a message using a given randomizer
    fn h_msg(
        rand: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        pk_root: &Array<u8, Self::N>,
        msg: &[u8],
    ) -> Array<u8, Self::M>;

    /// PRF that is used to generate the secret values in WOTS+ and FORS private keys.
    fn prf_sk(sk_seed: &SkSeed<Self::N>, adrs: &impl Address) -> Zeroizing<Array<u8, Self::N>>;

    /// A hash function that maps an L*N-byte string to an N-byte string.
    fn t<L: ArraySize>(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m: &Array<Array<u8, Self::N>, L>,
    ) -> Array<u8, Self::N>;

    /// Two-block specialization of `t`. Used to compute Merkle tree nodes.
    fn h(
        pk_seed: &PkSeed<Self::N>,
        adrs: &impl Address,
        m1: &Array<u8, Self::N>,
        m2: &Array<u8, Self::N>,
    ) -> Array<u8, Self::N>;

    /// Hash function that takes an N-byte input to an N-byte output
    /// Used for the WOTS+ chain function
    fn f(pk_seed: &PkSeed<Self::N>, adrs: &impl Address, m: &Array<u8, Self::N>)
    -> Array<u8, Self::N>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{ForsTree, WotsHash};
    use crate::fors::ForsParams;
    use crate::util::split_digest;
    use crate::util::macros::test_parameter_sets;
    use typenum::Unsigned;

    fn inputs<H: HashSuite>() -> (PkSeed<H::N>, Array<u8, H::N>, Array<u8, H::N>) {
        (
            PkSeed(Array::from_fn(|i| i as u8)),
            Array::from_fn(|i| 0xa0 ^ i as u8),
            Array::from_fn(|i| 0x5c ^ (3 * i) as u8),
        )
    }

    #[test]
    fn robust_and_simple_differ() {
        let (pk_seed, m1, m2) = inputs::<AsconSign128f>();
        let adrs = WotsHash::new(3, 42, 7);

        let f_robust = AsconSign128f::f(&pk_seed, &adrs, &m1);
        let f_simple = AsconSign128fSimple::f(&pk_seed, &adrs, &m1);
        assert_ne!(f_robust, f_simple);
        assert_eq!(f_robust, AsconSign128f::f(&pk_seed, &adrs, &m1));
        assert_eq!(f_simple, AsconSign128fSimple::f(&pk_seed, &adrs, &m1));

        let node = adrs.tree_node();
        let h_robust = AsconSign128f::h(&pk_seed, &node, &m1, &m2);
        let h_simple = AsconSign128fSimple::h(&pk_seed, &node, &m1, &m2);
        assert_ne!(h_robust, h_simple);
        assert_eq!(h_robust, AsconSign128f::h(&pk_seed, &node, &m1, &m2));
        assert_eq!(h_simple, AsconSign128fSimple::h(&pk_seed, &node, &m1, &m2));
    }

    fn h_is_t_of_two_blocks<H: HashSuite>() {
        let (pk_seed, m1, m2) = inputs::<H>();
        let adrs = ForsTree::new(9, 2);

        let pair = Array::<_, typenum::U2>([m1.clone(), m2.clone()]);
        assert_eq!(H::h(&pk_seed, &adrs, &m1, &m2), H::t(&pk_seed, &adrs, &pair));
    }
    test_parameter_sets!(h_is_t_of_two_blocks);

    fn address_separates_outputs<H: HashSuite>() {
        let (pk_seed, m1, _) = inputs::<H>();
        let a = WotsHash::new(0, 1, 2);
        let mut b = a;
        b.hash.set(1);

        assert_ne!(H::f(&pk_seed, &a, &m1), H::f(&pk_seed, &b, &m1));
        assert_ne!(H::f(&pk_seed, &a, &m1), H::f(&pk_seed, &a.pk(), &m1));
    }
    test_parameter_sets!(address_separates_outputs);

    fn prf_outputs<H: HashSuite>() {
        let sk_seed = SkSeed(Array::<u8, H::N>::from_fn(|i| i as u8));
        let other_seed = SkSeed(Array::<u8, H::N>::from_fn(|i| 1 + i as u8));
        let adrs = WotsHash::new(1, 2, 3).prf();

        let a = H::prf_sk(&sk_seed, &adrs);
        assert_eq!(*a, *H::prf_sk(&sk_seed, &adrs));
        assert_ne!(*a, *H::prf_sk(&other_seed, &adrs));
        assert_ne!(*a, *H::prf_sk(&sk_seed, &ForsTree::new(2, 3).prf(0)));

        let sk_prf = SkPrf(Array::<u8, H::N>::from_fn(|_| 7));
        let opt_rand = Array::<u8, H::N>::from_fn(|_| 1);
        let r = H::prf_msg(&sk_prf, &opt_rand, b"message");
        assert_eq!(r, H::prf_msg(&sk_prf, &opt_rand, b"message"));
        assert_ne!(r, H::prf_msg(&sk_prf, &opt_rand, b"massage"));
    }
    test_parameter_sets!(prf_outputs);

    fn h_msg_indices<P: ForsParams>() {
        let (pk_seed, rand, root) = inputs::<P>();

        for msg in [&b""[..], b"abc", &[0xff; 300]] {
            let digest = P::h_msg(&rand, &pk_seed, &root, msg);
            assert_eq!(digest.len(), P::M::USIZE);
            assert_eq!(digest, P::h_msg(&rand, &pk_seed, &root, msg));

            let idx = split_digest::<P>(&digest);
            let tree_bits = P::H::U32 - P::HPrime::U32;
            assert!(tree_bits == 64 || idx.idx_tree >> tree_bits == 0);
            assert!(idx.idx_leaf >> P::HPrime::U32 == 0);
            assert_eq!(idx.md.as_slice(), &digest[..P::MD::USIZE]);
        }
    }
    test_parameter_sets!(h_msg_indices);
}
