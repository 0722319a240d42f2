use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;
use zeroize::Zeroizing;

use crate::address::ForsTree;
use crate::error::{Error, Result};
use crate::hypertree::HypertreeParams;
use crate::treehash::treehash;
use crate::util::{base_2b, map_indexed};
use crate::{PkSeed, SkSeed};

/// The disclosed leaf secret of one FORS tree and its authentication path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForsTreeSig<P: ForsParams> {
    sk: Array<u8, P::N>,
    auth: Array<Array<u8, P::N>, P::A>,
}

impl<P: ForsParams> ForsTreeSig<P> {
    const SIZE: usize = P::N::USIZE + P::A::USIZE * P::N::USIZE;

    fn write_to(&self, slice: &mut [u8]) {
        debug_assert!(
            slice.len() == Self::SIZE,
            "Writing FORS tree sig to slice of incorrect length"
        );

        let (sk, auth) = slice.split_at_mut(P::N::USIZE);
        sk.copy_from_slice(&self.sk);
        auth.chunks_exact_mut(P::N::USIZE)
            .zip(self.auth.iter())
            .for_each(|(c, node)| c.copy_from_slice(node));
    }

    fn read_from(slice: &[u8]) -> Self {
        debug_assert!(slice.len() == Self::SIZE);

        let (sk_bytes, auth_bytes) = slice.split_at(P::N::USIZE);
        let mut sk = Array::<u8, P::N>::default();
        sk.copy_from_slice(sk_bytes);
        let mut auth = Array::<Array<u8, P::N>, P::A>::default();
        auth.iter_mut()
            .zip(auth_bytes.chunks_exact(P::N::USIZE))
            .for_each(|(node, bytes)| node.copy_from_slice(bytes));
        Self { sk, auth }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForsSignature<P: ForsParams>(Array<ForsTreeSig<P>, P::K>);

impl<P: ForsParams> TryFrom<&[u8]> for ForsSignature<P> {
    type Error = Error;

    fn try_from(slice: &[u8]) -> Result<Self> {
        if slice.len() != Self::SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: Self::SIZE,
                got: slice.len(),
            });
        }
        Ok(Self(
            slice
                .chunks_exact(ForsTreeSig::<P>::SIZE)
                .map(ForsTreeSig::read_from)
                .collect(),
        ))
    }
}

impl<P: ForsParams> ForsSignature<P> {
    pub const SIZE: usize = P::K::USIZE * ForsTreeSig::<P>::SIZE;

    pub fn write_to(&self, slice: &mut [u8]) {
        debug_assert!(
            slice.len() == Self::SIZE,
            "Writing FORS sig to slice of incorrect length"
        );

        slice
            .chunks_exact_mut(ForsTreeSig::<P>::SIZE)
            .zip(self.0.iter())
            .for_each(|(c, tree)| tree.write_to(c));
    }
}

pub(crate) trait ForsParams: HypertreeParams {
    type K: ArraySize + Eq + Debug;
    type A: ArraySize + Eq + Debug;
    type MD: ArraySize; // ceil(K*A/8)

    /// Secret value of the leaf at forest-wide index `idx`
    fn fors_sk_gen(
        sk_seed: &SkSeed<Self::N>,
        adrs: &ForsTree,
        idx: u32,
    ) -> Zeroizing<Array<u8, Self::N>> {
        Self::prf_sk(sk_seed, &adrs.prf(idx))
    }

    /// Root of tree `i` and the authentication path of its leaf `leaf_idx`
    fn fors_tree(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &ForsTree,
        i: u32,
        leaf_idx: u32,
    ) -> (Array<u8, Self::N>, Array<Array<u8, Self::N>, Self::A>) {
        let a = Self::A::U32;
        let mut leaf_adrs = *adrs;
        let mut node_adrs = *adrs;
        treehash::<Self::N, Self::A>(
            leaf_idx,
            |j| {
                let idx = (i << a) + j;
                let sk = Self::fors_sk_gen(sk_seed, adrs, idx);
                leaf_adrs.height.set(0);
                leaf_adrs.index.set(idx);
                Self::f(pk_seed, &leaf_adrs, &sk)
            },
            |z, j, left, right| {
                node_adrs.height.set(z);
                node_adrs.index.set((i << (a - z)) + j);
                Self::h(pk_seed, &node_adrs, left, right)
            },
        )
    }

    fn fors_sign(
        md: &Array<u8, Self::MD>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &ForsTree,
    ) -> ForsSignature<Self> {
        let indices = base_2b::<Self::K, Self::A>(md);
        ForsSignature(map_indexed::<Self::K, _>(|i| {
            let leaf_idx = u32::from(indices[i as usize]);
            let sk = Self::fors_sk_gen(sk_seed, adrs, (i << Self::A::U32) + leaf_idx);
            let (_, auth) = Self::fors_tree(sk_seed, pk_seed, adrs, i, leaf_idx);
            ForsTreeSig {
                sk: (*sk).clone(),
                auth,
            }
        }))
    }

    fn fors_pk_from_sig(
        sig: &ForsSignature<Self>,
        md: &Array<u8, Self::MD>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &ForsTree,
    ) -> Array<u8, Self::N> {
        let indices = base_2b::<Self::K, Self::A>(md);
        let roots = map_indexed::<Self::K, _>(|i| {
            let tree_sig = &sig.0[i as usize];
            let leaf_idx = u32::from(indices[i as usize]);

            let mut adrs = *adrs;
            adrs.height.set(0);
            adrs.index.set((i << Self::A::U32) + leaf_idx);
            let mut node = Self::f(pk_seed, &adrs, &tree_sig.sk);
            for (j, sibling) in (0..Self::A::U32).zip(tree_sig.auth.iter()) {
                adrs.height.set(j + 1);
                adrs.index.set(adrs.index.get() >> 1);
                node = if (leaf_idx >> j) & 1 == 0 {
                    Self::h(pk_seed, &adrs, &node, sibling)
                } else {
                    Self::h(pk_seed, &adrs, sibling, &node)
                };
            }
            node
        });
        Self::t(pk_seed, &adrs.roots(), &roots)
    }

    /// FORS public key computed directly from the secret seed
    fn fors_pk_gen(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &ForsTree,
    ) -> Array<u8, Self::N> {
        let roots = map_indexed::<Self::K, _>(|i| Self::fors_tree(sk_seed, pk_seed, adrs, i, 0).0);
        Self::t(pk_seed, &adrs.roots(), &roots)
    }
}
