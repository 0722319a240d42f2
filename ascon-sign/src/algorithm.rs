//! Runtime selection of a parameter set
//!
//! The signature types in this crate are generic over a compile-time [`ParameterSet`]. When the
//! parameter set is only known at runtime, for instance from an identifier stored next to a
//! key, [`Algorithm`] names it and dispatches byte-level operations to the matching type.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "alloc")]
use hybrid_array::Array;
#[cfg(feature = "alloc")]
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::params::{self, Params};
use crate::{ParameterSet, Signature, SigningKey, VerifyingKey};

/// One of the published Ascon-Sign parameter sets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// `ascon-128s-robust`
    AsconSign128s,
    /// `ascon-128f-robust`
    AsconSign128f,
    /// `ascon-192s-robust`
    AsconSign192s,
    /// `ascon-192f-robust`
    AsconSign192f,
    /// `ascon-128s-simple`
    AsconSign128sSimple,
    /// `ascon-128f-simple`
    AsconSign128fSimple,
    /// `ascon-192s-simple`
    AsconSign192sSimple,
    /// `ascon-192f-simple`
    AsconSign192fSimple,
}

/// Runs `$body` with `$p` bound to the parameter set type named by `$alg`
macro_rules! with_parameter_set {
    ($alg:expr, $p:ident => $body:expr) => {
        match $alg {
            Algorithm::AsconSign128s => {
                type $p = crate::AsconSign128s;
                $body
            }
            Algorithm::AsconSign128f => {
                type $p = crate::AsconSign128f;
                $body
            }
            Algorithm::AsconSign192s => {
                type $p = crate::AsconSign192s;
                $body
            }
            Algorithm::AsconSign192f => {
                type $p = crate::AsconSign192f;
                $body
            }
            Algorithm::AsconSign128sSimple => {
                type $p = crate::AsconSign128sSimple;
                $body
            }
            Algorithm::AsconSign128fSimple => {
                type $p = crate::AsconSign128fSimple;
                $body
            }
            Algorithm::AsconSign192sSimple => {
                type $p = crate::AsconSign192sSimple;
                $body
            }
            Algorithm::AsconSign192fSimple => {
                type $p = crate::AsconSign192fSimple;
                $body
            }
        }
    };
}

impl Algorithm {
    /// Every published parameter set, robust variants first
    pub const ALL: [Algorithm; 8] = [
        Algorithm::AsconSign128s,
        Algorithm::AsconSign128f,
        Algorithm::AsconSign192s,
        Algorithm::AsconSign192f,
        Algorithm::AsconSign128sSimple,
        Algorithm::AsconSign128fSimple,
        Algorithm::AsconSign192sSimple,
        Algorithm::AsconSign192fSimple,
    ];

    /// Numeric identifier of the parameter set
    ///
    /// The second byte selects the mode (`01` robust, `02` simple) and the last byte the size.
    pub const fn id(self) -> u32 {
        match self {
            Algorithm::AsconSign128s => 0x01_01_01,
            Algorithm::AsconSign128f => 0x01_01_02,
            Algorithm::AsconSign192s => 0x01_01_03,
            Algorithm::AsconSign192f => 0x01_01_04,
            Algorithm::AsconSign128sSimple => 0x01_02_01,
            Algorithm::AsconSign128fSimple => 0x01_02_02,
            Algorithm::AsconSign192sSimple => 0x01_02_03,
            Algorithm::AsconSign192fSimple => 0x01_02_04,
        }
    }

    /// Human-readable name, e.g. `ascon-128f-robust`
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::AsconSign128s => "ascon-128s-robust",
            Algorithm::AsconSign128f => "ascon-128f-robust",
            Algorithm::AsconSign192s => "ascon-192s-robust",
            Algorithm::AsconSign192f => "ascon-192f-robust",
            Algorithm::AsconSign128sSimple => "ascon-128s-simple",
            Algorithm::AsconSign128fSimple => "ascon-128f-simple",
            Algorithm::AsconSign192sSimple => "ascon-192s-simple",
            Algorithm::AsconSign192fSimple => "ascon-192f-simple",
        }
    }

    /// The parameters of this set
    pub const fn params(self) -> Params {
        match self {
            Algorithm::AsconSign128s => params::ASCON_128S,
            Algorithm::AsconSign128f => params::ASCON_128F,
            Algorithm::AsconSign192s => params::ASCON_192S,
            Algorithm::AsconSign192f => params::ASCON_192F,
            Algorithm::AsconSign128sSimple => params::ASCON_128S_SIMPLE,
            Algorithm::AsconSign128fSimple => params::ASCON_128F_SIMPLE,
            Algorithm::AsconSign192sSimple => params::ASCON_192S_SIMPLE,
            Algorithm::AsconSign192fSimple => params::ASCON_192F_SIMPLE,
        }
    }

    /// Look up a parameter set by its numeric identifier
    ///
    /// # Errors
    /// Returns [`Error::UnknownParameterSet`] if no published set has this identifier.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.id() == id)
            .ok_or(Error::UnknownParameterSet(id))
    }

    #[cfg(feature = "alloc")]
    /// Generate a fresh signing key, encoded as `skSeed || skPrf || pkSeed || root`
    pub fn generate_signing_key(
        self,
        rng: &mut impl rand_core::CryptoRngCore,
    ) -> Zeroizing<Vec<u8>> {
        with_parameter_set!(self, P => Zeroizing::new(SigningKey::<P>::new(rng).to_vec()))
    }

    #[cfg(feature = "alloc")]
    /// Extract the encoded verifying key from an encoded signing key
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] if `signing_key` is not `4n` bytes long.
    pub fn verifying_key(self, signing_key: &[u8]) -> Result<Vec<u8>> {
        with_parameter_set!(self, P => {
            let sk = SigningKey::<P>::try_from(signing_key)?;
            Ok(sk.verifying_key.to_vec())
        })
    }

    #[cfg(feature = "alloc")]
    /// Sign `msg` with fresh randomness drawn from `rng`
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] if `signing_key` is not `4n` bytes long.
    pub fn sign(
        self,
        signing_key: &[u8],
        msg: &[u8],
        rng: &mut impl rand_core::CryptoRngCore,
    ) -> Result<Vec<u8>> {
        with_parameter_set!(self, P => {
            let sk = SigningKey::<P>::try_from(signing_key)?;
            let mut opt_rand = Array::<u8, <P as crate::hashes::HashSuite>::N>::default();
            rng.fill_bytes(opt_rand.as_mut_slice());
            Ok(sk.sign_with_opt_rand(msg, &opt_rand).to_vec())
        })
    }

    #[cfg(feature = "alloc")]
    /// Sign `msg` deterministically; the same key and message always give the same signature
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] if `signing_key` is not `4n` bytes long.
    pub fn sign_deterministic(self, signing_key: &[u8], msg: &[u8]) -> Result<Vec<u8>> {
        with_parameter_set!(self, P => {
            let sk = SigningKey::<P>::try_from(signing_key)?;
            Ok(sk.sign_with_opt_rand(msg, &sk.verifying_key.pk_seed.0).to_vec())
        })
    }

    /// Check an encoded signature over `msg`
    ///
    /// A signature that does not verify yields `Ok(false)`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] or [`Error::InvalidSignatureLength`] if an input
    /// has the wrong length for this parameter set. No hashing is done in that case.
    pub fn verify(self, verifying_key: &[u8], msg: &[u8], signature: &[u8]) -> Result<bool> {
        with_parameter_set!(self, P => {
            let vk = VerifyingKey::<P>::try_from(verifying_key)?;
            let sig = Signature::<P>::try_from(signature).inspect_err(|err| {
                tracing::debug!(parameter_set = self.name(), %err, "rejected malformed signature");
            })?;
            Ok(vk.verify_raw(msg, &sig))
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == name)
            .ok_or(Error::UnknownParameterSetName)
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self> {
        Self::from_id(id)
    }
}

impl TryFrom<&Params> for Algorithm {
    type Error = Error;

    fn try_from(params: &Params) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.params() == *params)
            .ok_or(Error::Unsupported(
                "no published parameter set matches these parameters",
            ))
    }
}

impl<P: ParameterSet> From<&SigningKey<P>> for Algorithm {
    fn from(_: &SigningKey<P>) -> Self {
        P::ALGORITHM
    }
}

impl<P: ParameterSet> From<&VerifyingKey<P>> for Algorithm {
    fn from(_: &VerifyingKey<P>) -> Self {
        P::ALGORITHM
    }
}
