#![cfg_attr(not(feature = "alloc"), no_std)]
#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)] // Be pedantic by default
#![allow(clippy::module_name_repetitions)] // There are many types of signature and otherwise this gets confusing
#![allow(clippy::similar_names)] // sk_seed / pk_seed and friends
#![allow(clippy::clone_on_copy)] // Be explicit about moving data
#![deny(missing_docs)] // Require all public interfaces to be documented

//! # Usage
//! This crate implements Ascon-Sign, a stateless hash-based signature scheme following the
//! SPHINCS+ construction, with every hash function instantiated by Ascon-Hash or Ascon-XOF.
//! It is designed to be resistant to quantum computers.
//!
//! Signatures are large compared to classical schemes, from under 8KB for the small
//! parameter sets to about 35KB for `ascon-192f`. Signatures and intermediate values are
//! allocated on the stack.
//!
//! ```
//! use ascon_sign::*;
//! use signature::*;
//!
//! let mut rng = rand::thread_rng();
//!
//! // Generate a signing key using the ascon-128f-robust parameter set
//! let sk = SigningKey::<AsconSign128f>::new(&mut rng);
//!
//! // Generate the corresponding public key
//! let vk = sk.verifying_key();
//!
//! // Serialize the verifying key and distribute
//! let vk_bytes = vk.to_bytes();
//!
//! // Sign a message
//! let message = b"Hello world";
//! let sig = sk.sign_with_rng(&mut rng, message); // .sign() can be used for deterministic signatures
//!
//! // Deserialize a verifying key
//! let vk_deserialized = VerifyingKey::<AsconSign128f>::from(vk_bytes);
//! assert_eq!(vk, vk_deserialized);
//!
//! assert!(vk_deserialized.verify(message, &sig).is_ok())
//! ```
//!
//! When the parameter set is only known at runtime, [`Algorithm`] offers the same operations
//! over byte slices:
//!
//! ```
//! use ascon_sign::Algorithm;
//!
//! let mut rng = rand::thread_rng();
//! let alg: Algorithm = "ascon-128f-simple".parse().unwrap();
//!
//! let sk = alg.generate_signing_key(&mut rng);
//! let vk = alg.verifying_key(&sk).unwrap();
//! let sig = alg.sign(&sk, b"Hello world", &mut rng).unwrap();
//! assert_eq!(alg.verify(&vk, b"Hello world", &sig), Ok(true));
//! ```

pub use signature;

mod address;
mod algorithm;
mod error;
mod fors;
mod hashes;
mod hypertree;
mod params;
mod signature_encoding;
mod signing_key;
mod treehash;
mod util;
mod verifying_key;
mod wots;
mod xmss;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use params::Params;
pub use signature_encoding::*;
pub use signing_key::*;
pub use verifying_key::*;

use fors::ForsParams;
pub use hashes::*;

/// Specific parameters for each of the 8 published parameter sets
#[allow(private_bounds)] // Intentionally un-usable type
pub trait ParameterSet:
    ForsParams + SigningKeyLen + VerifyingKeyLen + PartialEq + Eq
{
    /// Human-readable name for parameter set, e.g. `ascon-128s-robust`
    const NAME: &'static str;

    /// Runtime identifier of this parameter set
    const ALGORITHM: Algorithm;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use signature::*;
    use util::macros::test_parameter_sets;

    fn test_sign_verify<P: ParameterSet>() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<P>::new(&mut rng);
        let vk = sk.verifying_key();
        let msg = b"Hello, world!";
        let sig = sk.try_sign(msg).unwrap();
        vk.verify(msg, &sig).unwrap();
    }
    test_parameter_sets!(test_sign_verify);

    // Check signature fails on modified message
    #[test]
    fn test_sign_verify_128f_fail_on_modified_message() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128f>::new(&mut rng);
        let msg = b"Hello, world!";
        let modified_msg = b"Goodbye, world!";

        let sig = sk.try_sign(msg).unwrap();
        let vk = sk.verifying_key();
        assert!(vk.verify(msg, &sig).is_ok());
        assert!(vk.verify(modified_msg, &sig).is_err());
    }

    #[test]
    fn test_sign_verify_fail_with_wrong_verifying_key() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128f>::new(&mut rng);
        let wrong_sk = SigningKey::<AsconSign128f>::new(&mut rng);
        let msg = b"Hello, world!";

        let sig = sk.try_sign(msg).unwrap();
        let vk = sk.verifying_key();
        let wrong_vk = wrong_sk.verifying_key();
        assert!(vk.verify(msg, &sig).is_ok());
        assert!(wrong_vk.verify(msg, &sig).is_err());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_sign_verify_fail_on_modified_signature() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128f>::new(&mut rng);
        let msg = b"Hello, world!";

        let mut sig_bytes = sk.try_sign(msg).unwrap().to_bytes();
        let random_byte_index = rng.gen_range(0..sig_bytes.len());
        sig_bytes[random_byte_index] ^= 0xff;
        let sig = Signature::<AsconSign128f>::try_from(sig_bytes.as_slice()).unwrap();

        let vk = sk.verifying_key();
        assert!(
            vk.verify(msg, &sig).is_err(),
            "Verification should fail with a modified signature"
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_verification_failure_is_typed() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128fSimple>::new(&mut rng);
        let sig = sk.try_sign(b"a").unwrap();
        let err = sk.verifying_key().verify(b"b", &sig).unwrap_err();
        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<crate::Error>())
            .copied();
        assert_eq!(source, Some(crate::Error::VerificationFailed));
    }

    #[test]
    fn test_successive_signatures_not_equal() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128f>::new(&mut rng);
        let msg = b"Hello, world!";

        let sig1 = sk.try_sign_with_rng(&mut rng, msg).unwrap();
        let sig2 = sk.try_sign_with_rng(&mut rng, msg).unwrap();

        assert_ne!(
            sig1, sig2,
            "Two successive randomized signatures over the same message should not be equal"
        );
        let vk = sk.verifying_key();
        assert!(vk.verify(msg, &sig1).is_ok());
        assert!(vk.verify(msg, &sig2).is_ok());
    }

    #[test]
    fn test_deterministic_signatures_equal() {
        let mut rng = rand::thread_rng();
        let sk = SigningKey::<AsconSign128fSimple>::new(&mut rng);
        let msg = b"Hello, world!";

        assert_eq!(sk.try_sign(msg).unwrap(), sk.try_sign(msg).unwrap());
    }
}
