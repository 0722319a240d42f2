use core::fmt;

use crate::address::{ForsTree, WotsHash};
use crate::error::{Error, Result};
use crate::signature_encoding::Signature;
use crate::util::split_digest;
use crate::verifying_key::VerifyingKey;
use crate::{ParameterSet, PkSeed, VerifyingKeyLen};
use ::signature::{KeypairRef, RandomizedSigner, Signer};
use hybrid_array::{Array, ArraySize};
use subtle::ConstantTimeEq;
use typenum::Unsigned;
use zeroize::{Zeroize, ZeroizeOnDrop};

// NewTypes for ensuring hash argument order correctness
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SkSeed<N: ArraySize>(pub(crate) Array<u8, N>);
impl<N: ArraySize> AsRef<[u8]> for SkSeed<N> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}
impl<N: ArraySize> SkSeed<N> {
    pub(crate) fn new(rng: &mut impl rand_core::CryptoRngCore) -> Self {
        let mut bytes = Array::<u8, N>::default();
        rng.fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SkPrf<N: ArraySize>(pub(crate) Array<u8, N>);
impl<N: ArraySize> AsRef<[u8]> for SkPrf<N> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}
impl<N: ArraySize> SkPrf<N> {
    pub(crate) fn new(rng: &mut impl rand_core::CryptoRngCore) -> Self {
        let mut bytes = Array::<u8, N>::default();
        rng.fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }
}

fn array_from<N: ArraySize>(bytes: &[u8]) -> Result<Array<u8, N>> {
    if bytes.len() != N::USIZE {
        return Err(Error::InvalidKeyLength {
            expected: N::USIZE,
            got: bytes.len(),
        });
    }
    let mut array = Array::<u8, N>::default();
    array.copy_from_slice(bytes);
    Ok(array)
}

/// A `SigningKey` allows signing messages with a fixed parameter set
///
/// The secret seeds are wiped from memory when the key is dropped.
#[derive(Clone)]
pub struct SigningKey<P: ParameterSet> {
    pub(crate) sk_seed: SkSeed<P::N>,
    pub(crate) sk_prf: SkPrf<P::N>,
    pub(crate) verifying_key: VerifyingKey<P>,
}

/// A trait specifying the length of a serialized signing key for a given parameter set
pub trait SigningKeyLen: VerifyingKeyLen {
    /// The length of the serialized signing key in bytes
    type SkLen: ArraySize;
}

impl<P: ParameterSet> SigningKey<P> {
    /// Create a new `SigningKey` from a cryptographic random number generator
    pub fn new(rng: &mut impl rand_core::CryptoRngCore) -> Self {
        let sk_seed = SkSeed::new(rng);
        let sk_prf = SkPrf::new(rng);
        let pk_seed = PkSeed::new(rng);
        Self::from_parts(sk_seed, sk_prf, pk_seed)
    }

    /// Derive a `SigningKey` deterministically from its three `n`-byte seeds
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] if any seed is not exactly `n` bytes long.
    pub fn from_seeds(sk_seed: &[u8], sk_prf: &[u8], pk_seed: &[u8]) -> Result<Self> {
        Ok(Self::from_parts(
            SkSeed(array_from(sk_seed)?),
            SkPrf(array_from(sk_prf)?),
            PkSeed(array_from(pk_seed)?),
        ))
    }

    fn from_parts(sk_seed: SkSeed<P::N>, sk_prf: SkPrf<P::N>, pk_seed: PkSeed<P::N>) -> Self {
        let adrs = WotsHash::new(P::D::U32 - 1, 0, 0);
        let pk_root = P::xmss_root(&sk_seed, &pk_seed, &adrs);
        tracing::debug!(parameter_set = P::NAME, "generated key pair");

        SigningKey {
            sk_seed,
            sk_prf,
            verifying_key: VerifyingKey { pk_seed, pk_root },
        }
    }

    /// Serialize the signing key to a new stack-allocated array
    ///
    /// This clones the underlying fields
    pub fn to_bytes(&self) -> Array<u8, P::SkLen> {
        let mut bytes = Array::<u8, P::SkLen>::default();
        bytes[..P::N::USIZE].copy_from_slice(&self.sk_seed.0);
        bytes[P::N::USIZE..2 * P::N::USIZE].copy_from_slice(&self.sk_prf.0);
        bytes[2 * P::N::USIZE..].copy_from_slice(&self.verifying_key.to_bytes());
        bytes
    }

    #[cfg(feature = "alloc")]
    /// Serialize the signing key to a new heap-allocated vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    /// Signs `msg` using `opt_rand` as the additional randomness of the message randomizer
    pub(crate) fn sign_with_opt_rand(&self, msg: &[u8], opt_rand: &Array<u8, P::N>) -> Signature<P> {
        let sk_seed = &self.sk_seed;
        let pk_seed = &self.verifying_key.pk_seed;

        let randomizer = P::prf_msg(&self.sk_prf, opt_rand, msg);

        let digest = P::h_msg(&randomizer, pk_seed, &self.verifying_key.pk_root, msg);
        let idx = split_digest::<P>(&digest);
        let adrs = ForsTree::new(idx.idx_tree, idx.idx_leaf);
        let fors_sig = P::fors_sign(&idx.md, sk_seed, pk_seed, &adrs);

        let fors_pk = P::fors_pk_from_sig(&fors_sig, &idx.md, pk_seed, &adrs);
        let ht_sig = P::ht_sign(&fors_pk, sk_seed, pk_seed, idx.idx_tree, idx.idx_leaf);

        tracing::debug!(
            parameter_set = P::NAME,
            tree = idx.idx_tree,
            leaf = idx.idx_leaf,
            "signed message"
        );
        Signature {
            randomizer,
            fors_sig,
            ht_sig,
        }
    }
}

impl<P: ParameterSet> fmt::Debug for SigningKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("parameter_set", &P::NAME)
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl<P: ParameterSet> PartialEq for SigningKey<P> {
    fn eq(&self, other: &Self) -> bool {
        let secrets = self.sk_seed.0.as_slice().ct_eq(other.sk_seed.0.as_slice())
            & self.sk_prf.0.as_slice().ct_eq(other.sk_prf.0.as_slice());
        bool::from(secrets) && self.verifying_key == other.verifying_key
    }
}

impl<P: ParameterSet> Eq for SigningKey<P> {}

impl<P: ParameterSet> TryFrom<&[u8]> for SigningKey<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != P::SkLen::USIZE {
            return Err(Error::InvalidKeyLength {
                expected: P::SkLen::USIZE,
                got: bytes.len(),
            });
        }
        let n = P::N::USIZE;
        Ok(SigningKey {
            sk_seed: SkSeed(array_from(&bytes[..n])?),
            sk_prf: SkPrf(array_from(&bytes[n..2 * n])?),
            verifying_key: VerifyingKey::try_from(&bytes[2 * n..])?,
        })
    }
}

impl<P: ParameterSet> Signer<Signature<P>> for SigningKey<P> {
    fn try_sign(&self, msg: &[u8]) -> core::result::Result<Signature<P>, ::signature::Error> {
        Ok(self.sign_with_opt_rand(msg, &self.verifying_key.pk_seed.0))
    }
}

impl<P: ParameterSet> RandomizedSigner<Signature<P>> for SigningKey<P> {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl ::signature::rand_core::CryptoRngCore,
        msg: &[u8],
    ) -> core::result::Result<Signature<P>, ::signature::Error> {
        let mut opt_rand = Array::<u8, P::N>::default();
        rng.try_fill_bytes(opt_rand.as_mut_slice())?;
        Ok(self.sign_with_opt_rand(msg, &opt_rand))
    }
}

impl<P: ParameterSet> AsRef<VerifyingKey<P>> for SigningKey<P> {
    fn as_ref(&self) -> &VerifyingKey<P> {
        &self.verifying_key
    }
}

impl<P: ParameterSet> KeypairRef for SigningKey<P> {
    type VerifyingKey = VerifyingKey<P>;
}
