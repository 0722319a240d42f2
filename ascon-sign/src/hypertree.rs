use crate::{PkSeed, SkSeed};
use core::fmt::Debug;
use hybrid_array::{Array, ArraySize};
use subtle::ConstantTimeEq;
use typenum::Unsigned;

use crate::{
    address::WotsHash,
    error::{Error, Result},
    xmss::{XmssParams, XmssSig},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HypertreeSig<P: HypertreeParams>(Array<XmssSig<P>, P::D>);

impl<P: HypertreeParams> HypertreeSig<P> {
    pub const SIZE: usize = XmssSig::<P>::SIZE * P::D::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(
            buf.len() == Self::SIZE,
            "HT serialize length mismatch: {}, {}",
            buf.len(),
            Self::SIZE
        );

        buf.chunks_exact_mut(XmssSig::<P>::SIZE)
            .zip(self.0.iter())
            .for_each(|(buf, sig)| sig.write_to(buf));
    }
}

impl<P: HypertreeParams> TryFrom<&[u8]> for HypertreeSig<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.len() != Self::SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: Self::SIZE,
                got: value.len(),
            });
        }
        Ok(HypertreeSig(
            value
                .chunks_exact(XmssSig::<P>::SIZE)
                .map(XmssSig::read_from)
                .collect(),
        ))
    }
}

/// Position of a leaf on the next layer up: the low `h'` bits of the tree index select the
/// leaf and the remaining bits select the tree
#[allow(clippy::cast_possible_truncation)] // h' <= 32
fn climb(idx_tree: u64, h_prime: u32) -> (u64, u32) {
    let leaf_mask = 1u64.checked_shl(h_prime).map_or(u64::MAX, |v| v - 1);
    (idx_tree >> h_prime, (idx_tree & leaf_mask) as u32)
}

pub(crate) trait HypertreeParams: XmssParams + Sized {
    type D: ArraySize + Debug + Eq;
    type H: Unsigned; // HPrime * D

    fn ht_sign(
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        mut idx_tree: u64,
        mut idx_leaf: u32,
    ) -> HypertreeSig<Self> {
        let mut root = m.clone();
        let sig = Array::<XmssSig<Self>, Self::D>::from_fn(|layer| {
            #[allow(clippy::cast_possible_truncation)] // D < 2^32
            let adrs = WotsHash::new(layer as u32, idx_tree, 0);
            let (sig, subtree_root) = Self::xmss_sign(&root, sk_seed, pk_seed, idx_leaf, &adrs);
            root = subtree_root;
            (idx_tree, idx_leaf) = climb(idx_tree, Self::HPrime::U32);
            tracing::trace!(layer, "signed hypertree layer");
            sig
        });
        HypertreeSig(sig)
    }

    fn ht_verify(
        m: &Array<u8, Self::N>,
        sig: &HypertreeSig<Self>,
        pk_seed: &PkSeed<Self::N>,
        mut idx_tree: u64,
        mut idx_leaf: u32,
        pk_root: &Array<u8, Self::N>,
    ) -> bool {
        let mut root = m.clone();
        for (layer, xmss_sig) in (0..Self::D::U32).zip(sig.0.iter()) {
            let adrs = WotsHash::new(layer, idx_tree, 0);
            root = Self::xmss_pk_from_sig(idx_leaf, xmss_sig, &root, pk_seed, &adrs);
            (idx_tree, idx_leaf) = climb(idx_tree, Self::HPrime::U32);
        }
        root.as_slice().ct_eq(pk_root.as_slice()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::macros::test_parameter_sets;
    use rand::{Rng, thread_rng};

    #[test]
    fn climb_splits_tree_index() {
        assert_eq!(climb(0b1011_0110, 3), (0b1_0110, 0b110));
        assert_eq!(climb(u64::MAX, 9), (u64::MAX >> 9, 511));
        assert_eq!(climb(7, 0), (7, 0));
    }

    fn test_ht_sign_verify<HTMode: HypertreeParams>() {
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);

        let pk_seed = PkSeed::new(&mut rng);

        let mut m = Array::<u8, HTMode::N>::default();
        rng.fill(m.as_mut_slice());

        let idx_tree = rng.gen_range(
            0..=(1u64
                .wrapping_shl(HTMode::H::U32 - HTMode::HPrime::U32)
                .wrapping_sub(1)),
        );
        let idx_leaf = rng.gen_range(0..(1 << HTMode::HPrime::U32));

        let adrs = WotsHash::new(HTMode::D::U32 - 1, 0, 0);
        let pk_root = HTMode::xmss_root(&sk_seed, &pk_seed, &adrs);

        let sig = HTMode::ht_sign(&m, &sk_seed, &pk_seed, idx_tree, idx_leaf);

        assert!(HTMode::ht_verify(
            &m, &sig, &pk_seed, idx_tree, idx_leaf, &pk_root
        ));

        // A different leaf of the same bottom tree
        assert!(!HTMode::ht_verify(
            &m,
            &sig,
            &pk_seed,
            idx_tree,
            idx_leaf ^ 1,
            &pk_root
        ));

        // Tweak the message to ensure verification fails
        m[0] ^= 0xff;
        assert!(!HTMode::ht_verify(
            &m, &sig, &pk_seed, idx_tree, idx_leaf, &pk_root
        ));
    }

    test_parameter_sets!(test_ht_sign_verify);

    #[cfg(feature = "alloc")]
    fn test_encoding<HTMode: HypertreeParams>() {
        let mut rng = thread_rng();
        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let m = Array::<u8, HTMode::N>::default();
        let sig = HTMode::ht_sign(&m, &sk_seed, &pk_seed, 0, 0);

        let mut bytes = vec![0u8; HypertreeSig::<HTMode>::SIZE];
        sig.write_to(&mut bytes);
        assert_eq!(HypertreeSig::<HTMode>::try_from(bytes.as_slice()), Ok(sig));
        assert_eq!(
            HypertreeSig::<HTMode>::try_from(&bytes[..bytes.len() - 1]),
            Err(Error::InvalidSignatureLength {
                expected: HypertreeSig::<HTMode>::SIZE,
                got: HypertreeSig::<HTMode>::SIZE - 1,
            })
        );
    }

    #[cfg(feature = "alloc")]
    test_parameter_sets!(test_encoding);
}
