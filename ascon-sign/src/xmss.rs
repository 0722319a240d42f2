use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::address::WotsHash;
use crate::error::{Error, Result};
use crate::treehash::treehash;
use crate::wots::{WotsParams, WotsSig};
use crate::{PkSeed, SkSeed};

/// A WOTS+ signature together with the authentication path of its key pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmssSig<P: XmssParams> {
    pub(crate) sig: WotsSig<P>,
    pub(crate) auth: Array<Array<u8, P::N>, P::HPrime>,
}

impl<P: XmssParams> XmssSig<P> {
    pub const SIZE: usize = WotsSig::<P>::SIZE + P::HPrime::USIZE * P::N::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() == Self::SIZE, "XMSS serialize length mismatch");

        let (sig_buf, auth_buf) = buf.split_at_mut(WotsSig::<P>::SIZE);
        self.sig.write_to(sig_buf);
        auth_buf
            .chunks_exact_mut(P::N::USIZE)
            .zip(self.auth.iter())
            .for_each(|(buf, node)| buf.copy_from_slice(node));
    }

    pub(crate) fn read_from(buf: &[u8]) -> Self {
        debug_assert!(buf.len() == Self::SIZE, "XMSS deserialize length mismatch");

        let (sig_bytes, auth_bytes) = buf.split_at(WotsSig::<P>::SIZE);
        let mut auth = Array::<Array<u8, P::N>, P::HPrime>::default();
        auth.iter_mut()
            .zip(auth_bytes.chunks_exact(P::N::USIZE))
            .for_each(|(node, bytes)| node.copy_from_slice(bytes));
        XmssSig {
            sig: WotsSig::read_from(sig_bytes),
            auth,
        }
    }
}

impl<P: XmssParams> TryFrom<&[u8]> for XmssSig<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.len() != Self::SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: Self::SIZE,
                got: value.len(),
            });
        }
        Ok(Self::read_from(value))
    }
}

/// One layer of the hypertree: a Merkle tree over `2^HPrime` WOTS+ public keys
pub(crate) trait XmssParams: WotsParams {
    type HPrime: ArraySize + Debug + Eq;

    /// Root and authentication path of the subtree addressed by `adrs`
    fn xmss_treehash(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        leaf_idx: u32,
        adrs: &WotsHash,
    ) -> (Array<u8, Self::N>, Array<Array<u8, Self::N>, Self::HPrime>) {
        let mut node_adrs = adrs.tree_node();
        treehash::<Self::N, Self::HPrime>(
            leaf_idx,
            |j| {
                let mut wots_adrs = *adrs;
                wots_adrs.key_pair.set(j);
                Self::wots_pk_gen(sk_seed, pk_seed, &wots_adrs)
            },
            |height, index, left, right| {
                node_adrs.height.set(height);
                node_adrs.index.set(index);
                Self::h(pk_seed, &node_adrs, left, right)
            },
        )
    }

    fn xmss_root(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        Self::xmss_treehash(sk_seed, pk_seed, 0, adrs).0
    }

    /// Signs `m` with key pair `idx`, also returning the subtree root the signature resolves to
    fn xmss_sign(
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        idx: u32,
        adrs: &WotsHash,
    ) -> (XmssSig<Self>, Array<u8, Self::N>) {
        let (root, auth) = Self::xmss_treehash(sk_seed, pk_seed, idx, adrs);

        let mut wots_adrs = *adrs;
        wots_adrs.key_pair.set(idx);
        let sig = Self::wots_sign(m, sk_seed, pk_seed, &wots_adrs);
        (XmssSig { sig, auth }, root)
    }

    fn xmss_pk_from_sig(
        idx: u32,
        sig: &XmssSig<Self>,
        m: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        let mut wots_adrs = *adrs;
        wots_adrs.key_pair.set(idx);
        let mut node = Self::wots_pk_from_sig(&sig.sig, m, pk_seed, &wots_adrs);

        let mut tree_adrs = adrs.tree_node();
        for (k, sibling) in (0..Self::HPrime::U32).zip(sig.auth.iter()) {
            tree_adrs.height.set(k + 1);
            tree_adrs.index.set(idx >> (k + 1));
            node = if (idx >> k) & 1 == 0 {
                Self::h(pk_seed, &tree_adrs, &node, sibling)
            } else {
                Self::h(pk_seed, &tree_adrs, sibling, &node)
            };
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::macros::test_parameter_sets;
    use rand::{Rng, RngCore, thread_rng};

    fn test_sign_verify<Xmss: XmssParams>() {
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);

        let mut m = Array::<u8, Xmss::N>::default();
        rng.fill_bytes(m.as_mut_slice());

        let idx = rng.gen_range(0..(1u32 << Xmss::HPrime::U32));
        let adrs = WotsHash::new(1, rng.next_u64(), 0);

        let root = Xmss::xmss_root(&sk_seed, &pk_seed, &adrs);
        let (sig, sig_root) = Xmss::xmss_sign(&m, &sk_seed, &pk_seed, idx, &adrs);
        assert_eq!(sig_root, root);
        assert_eq!(Xmss::xmss_pk_from_sig(idx, &sig, &m, &pk_seed, &adrs), root);

        let other = idx ^ 1;
        assert_ne!(Xmss::xmss_pk_from_sig(other, &sig, &m, &pk_seed, &adrs), root);
    }
    test_parameter_sets!(test_sign_verify);

    #[cfg(feature = "alloc")]
    fn test_encoding<Xmss: XmssParams>() {
        let mut rng = thread_rng();
        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let m = Array::<u8, Xmss::N>::default();
        let adrs = WotsHash::new(0, 3, 0);
        let (sig, _) = Xmss::xmss_sign(&m, &sk_seed, &pk_seed, 1, &adrs);

        let mut bytes = vec![0u8; XmssSig::<Xmss>::SIZE];
        sig.write_to(&mut bytes);
        assert_eq!(XmssSig::<Xmss>::try_from(bytes.as_slice()), Ok(sig));
        assert_eq!(
            XmssSig::<Xmss>::try_from(&bytes[1..]),
            Err(Error::InvalidSignatureLength {
                expected: XmssSig::<Xmss>::SIZE,
                got: XmssSig::<Xmss>::SIZE - 1,
            })
        );
    }
    #[cfg(feature = "alloc")]
    test_parameter_sets!(test_encoding);
}
