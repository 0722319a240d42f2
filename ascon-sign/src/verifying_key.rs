use crate::ParameterSet;
use crate::address::ForsTree;
use crate::error::Error;
use crate::signature_encoding::Signature;
use crate::util::split_digest;
use ::signature::Verifier;
use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

/// A trait specifying the length of a serialized verifying key for a given parameter set
pub trait VerifyingKeyLen {
    /// The length of the serialized verifying key in bytes
    type VkLen: ArraySize;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PkSeed<N: ArraySize>(pub(crate) Array<u8, N>);
impl<N: ArraySize> AsRef<[u8]> for PkSeed<N> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}
impl<N: ArraySize> PkSeed<N> {
    pub(crate) fn new(rng: &mut impl rand_core::CryptoRngCore) -> Self {
        let mut bytes = Array::<u8, N>::default();
        rng.fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }
}

/// A `VerifyingKey` is an Ascon-Sign public key, allowing
/// verification of signatures created with the corresponding
/// `SigningKey`
#[derive(Debug, PartialEq, Eq)]
pub struct VerifyingKey<P: ParameterSet> {
    pub(crate) pk_seed: PkSeed<P::N>,
    pub(crate) pk_root: Array<u8, P::N>,
}

impl<P: ParameterSet> VerifyingKey<P> {
    /// Checks `signature` over `msg`, returning whether it is valid.
    ///
    /// Rejection is an expected outcome and not an error; see the [`Verifier`] impl for the
    /// `Result`-based interface.
    pub fn verify_raw(&self, msg: &[u8], signature: &Signature<P>) -> bool {
        let pk_seed = &self.pk_seed;

        let digest = P::h_msg(&signature.randomizer, pk_seed, &self.pk_root, msg);
        let idx = split_digest::<P>(&digest);

        let adrs = ForsTree::new(idx.idx_tree, idx.idx_leaf);
        let fors_pk = P::fors_pk_from_sig(&signature.fors_sig, &idx.md, pk_seed, &adrs);
        let valid = P::ht_verify(
            &fors_pk,
            &signature.ht_sig,
            pk_seed,
            idx.idx_tree,
            idx.idx_leaf,
            &self.pk_root,
        );
        tracing::debug!(
            parameter_set = P::NAME,
            tree = idx.idx_tree,
            leaf = idx.idx_leaf,
            valid,
            "verified signature"
        );
        valid
    }

    /// Serialize the verifying key to a new stack-allocated array
    ///
    /// This clones the underlying fields
    pub fn to_bytes(&self) -> Array<u8, P::VkLen> {
        let mut bytes = Array::<u8, P::VkLen>::default();
        debug_assert!(P::N::USIZE * 2 == P::VkLen::USIZE);
        bytes[..P::N::USIZE].copy_from_slice(&self.pk_seed.0);
        bytes[P::N::USIZE..].copy_from_slice(&self.pk_root);
        bytes
    }

    #[cfg(feature = "alloc")]
    /// Serialize the verifying key to a new heap-allocated vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_slice_unchecked(bytes: &[u8]) -> Self {
        let (seed_bytes, root_bytes) = bytes.split_at(P::N::USIZE);
        let mut pk_seed = PkSeed(Array::<u8, P::N>::default());
        pk_seed.0.copy_from_slice(seed_bytes);
        let mut pk_root = Array::<u8, P::N>::default();
        pk_root.copy_from_slice(root_bytes);
        VerifyingKey { pk_seed, pk_root }
    }
}

impl<P: ParameterSet> Clone for VerifyingKey<P> {
    fn clone(&self) -> Self {
        VerifyingKey {
            pk_seed: self.pk_seed.clone(),
            pk_root: self.pk_root.clone(),
        }
    }
}

impl<P: ParameterSet> From<&VerifyingKey<P>> for Array<u8, P::VkLen> {
    fn from(vk: &VerifyingKey<P>) -> Array<u8, P::VkLen> {
        vk.to_bytes()
    }
}

impl<P: ParameterSet> From<Array<u8, P::VkLen>> for VerifyingKey<P> {
    fn from(bytes: Array<u8, P::VkLen>) -> VerifyingKey<P> {
        debug_assert!(P::VkLen::USIZE == 2 * P::N::USIZE);
        Self::from_slice_unchecked(&bytes)
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != P::VkLen::USIZE {
            return Err(Error::InvalidKeyLength {
                expected: P::VkLen::USIZE,
                got: bytes.len(),
            });
        }
        Ok(Self::from_slice_unchecked(bytes))
    }
}

impl<P: ParameterSet> Verifier<Signature<P>> for VerifyingKey<P> {
    fn verify(&self, msg: &[u8], signature: &Signature<P>) -> Result<(), ::signature::Error> {
        if self.verify_raw(msg, signature) {
            Ok(())
        } else {
            Err(Error::VerificationFailed.into())
        }
    }
}
