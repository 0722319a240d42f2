/// Errors used throughout this crate.
///
/// Variants carry no heap data so that parameter validation can run in `const` context.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The Winternitz parameter is not one of 16 or 256.
    #[error("Invalid parameters: unsupported Winternitz parameter w={0}")]
    UnsupportedWinternitz(u32),
    /// The hash output length is outside `1..=256`.
    #[error("Invalid parameters: hash output length n={0} outside 1..=256")]
    UnsupportedHashLength(usize),
    /// The hypertree height is not a positive multiple of the layer count.
    #[error("Invalid parameters: height h={h} cannot be split into d={d} layers")]
    InvalidLayers {
        /// Total hypertree height.
        h: u32,
        /// Number of layers.
        d: u32,
    },
    /// The tree index selected by `H_msg` would need more than 64 bits.
    #[error("Invalid parameters: tree index needs {0} bits, at most 64 are supported")]
    TreeIndexTooWide(u32),
    /// The leaf index selected by `H_msg` would need more than 32 bits.
    #[error("Invalid parameters: leaf index needs {0} bits, at most 32 are supported")]
    LeafIndexTooWide(u32),
    /// The FORS forest cannot be addressed with 32-bit tree indices.
    #[error("Invalid parameters: unsupported FORS shape a={a}, k={k}")]
    InvalidForsShape {
        /// Height of each FORS tree.
        a: u32,
        /// Number of FORS trees.
        k: u32,
    },
    /// No published parameter set has this identifier.
    #[error("Unknown parameter set id: 0x{0:06x}")]
    UnknownParameterSet(u32),
    /// No published parameter set has this name.
    #[error("Unknown parameter set name")]
    UnknownParameterSetName,
    /// An encoded key has the wrong length for its parameter set.
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength {
        /// Expected key length in bytes.
        expected: usize,
        /// Actual key length in bytes.
        got: usize,
    },
    /// An encoded signature has the wrong length for its parameter set.
    #[error("Invalid signature length: expected {expected}, got {got}")]
    InvalidSignatureLength {
        /// Expected signature length in bytes.
        expected: usize,
        /// Actual signature length in bytes.
        got: usize,
    },
    /// The recomputed hypertree root does not match the public key.
    #[error("Signature verification failed")]
    VerificationFailed,
    /// The parameters are valid but no engine is compiled for them.
    #[error("Unsupported: {0}")]
    Unsupported(&'static str),
}

/// Result type used by this crate.
pub type Result<T> = core::result::Result<T, Error>;

impl From<Error> for signature::Error {
    #[cfg(feature = "alloc")]
    fn from(err: Error) -> Self {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "alloc"))]
    fn from(_err: Error) -> Self {
        signature::Error::new()
    }
}
