//! Runtime description of an Ascon-Sign parameter set
//!
//! A [`Params`] value is validated once at construction. Every quantity the signature
//! algorithms need is derived from its seven defining values. The compile-time parameter sets
//! exported by this crate are checked against their `Params` when the crate is built, so
//! the type-level sizes can never drift from the values computed here.

use crate::error::{Error, Result};

/// A validated parameter set `(robust, n, w, d, a, k, h)` and its derived values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    robust: bool,
    n: usize,
    w: u32,
    log_w: u32,
    d: u32,
    a: u32,
    k: u32,
    h: u32,
    wots_len1: usize,
    wots_len2: usize,
}

/// Looks up `log2(w)` and the number of checksum digits for a WOTS+ instance.
///
/// The checksum length is `floor(log_w(len1 * (w - 1))) + 1`, tabulated by `n`.
const fn wots_precompute(n: usize, w: u32) -> Result<(u32, usize)> {
    let log_w = match w {
        16 => 4,
        256 => 8,
        _ => return Err(Error::UnsupportedWinternitz(w)),
    };
    if n == 0 || n > 256 {
        return Err(Error::UnsupportedHashLength(n));
    }
    let len2 = if log_w == 4 {
        if n <= 8 {
            2
        } else if n <= 136 {
            3
        } else {
            4
        }
    } else if n <= 1 {
        1
    } else {
        2
    };
    Ok((log_w, len2))
}

impl Params {
    /// Validate a parameter tuple and precompute the derived WOTS+ lengths
    ///
    /// # Errors
    /// Returns a construction error if `w` is not 16 or 256, if `n` is outside `1..=256`,
    /// if `h` is not a positive multiple of `d`, if the tree index exceeds 64 bits or the
    /// leaf index 32 bits, or if the FORS forest does not fit 32-bit node addressing.
    pub const fn new(robust: bool, n: usize, w: u32, d: u32, a: u32, k: u32, h: u32) -> Result<Self> {
        let (log_w, wots_len2) = match wots_precompute(n, w) {
            Ok(v) => v,
            Err(e) => return Err(e),
        };
        if d == 0 || h == 0 || h % d != 0 {
            return Err(Error::InvalidLayers { h, d });
        }
        let h_prime = h / d;
        if h_prime > 32 {
            return Err(Error::LeafIndexTooWide(h_prime));
        }
        if h - h_prime > 64 {
            return Err(Error::TreeIndexTooWide(h - h_prime));
        }
        if a == 0 || k == 0 || a >= 32 || ((k as u64) << a) > (1u64 << 32) {
            return Err(Error::InvalidForsShape { a, k });
        }
        Ok(Self {
            robust,
            n,
            w,
            log_w,
            d,
            a,
            k,
            h,
            wots_len1: 8 * n / log_w as usize,
            wots_len2,
        })
    }

    /// Whether tweakable hashes blind their inputs with a pseudorandom bitmask
    pub const fn robust(&self) -> bool {
        self.robust
    }

    /// Security parameter: length in bytes of every hash output
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Winternitz parameter
    pub const fn w(&self) -> u32 {
        self.w
    }

    /// Bits per WOTS+ digit
    pub const fn log_w(&self) -> u32 {
        self.log_w
    }

    /// Number of hypertree layers
    pub const fn d(&self) -> u32 {
        self.d
    }

    /// Height of each FORS tree
    pub const fn a(&self) -> u32 {
        self.a
    }

    /// Number of FORS trees
    pub const fn k(&self) -> u32 {
        self.k
    }

    /// Total hypertree height
    pub const fn h(&self) -> u32 {
        self.h
    }

    /// Height of one hypertree layer, `h / d`
    pub const fn h_prime(&self) -> u32 {
        self.h / self.d
    }

    /// Number of leaves in one FORS tree, `2^a`
    pub const fn t(&self) -> u32 {
        1 << self.a
    }

    /// Number of message digits in a WOTS+ signature
    pub const fn wots_len1(&self) -> usize {
        self.wots_len1
    }

    /// Number of checksum digits in a WOTS+ signature
    pub const fn wots_len2(&self) -> usize {
        self.wots_len2
    }

    /// Total number of hash chains in a WOTS+ signature
    pub const fn wots_len(&self) -> usize {
        self.wots_len1 + self.wots_len2
    }

    /// Width of the tree index extracted from the message digest
    pub const fn tree_bits(&self) -> u32 {
        self.h - self.h_prime()
    }

    /// Width of the leaf index extracted from the message digest
    pub const fn leaf_bits(&self) -> u32 {
        self.h_prime()
    }

    /// Bytes of message digest consumed by FORS, `ceil(a * k / 8)`
    pub const fn fors_msg_bytes(&self) -> usize {
        ((self.a * self.k) as usize).div_ceil(8)
    }

    /// Bytes of message digest holding the tree index
    pub const fn tree_bytes(&self) -> usize {
        (self.tree_bits() as usize).div_ceil(8)
    }

    /// Bytes of message digest holding the leaf index
    pub const fn leaf_bytes(&self) -> usize {
        (self.leaf_bits() as usize).div_ceil(8)
    }

    /// Total output length of `H_msg`
    pub const fn digest_len(&self) -> usize {
        self.fors_msg_bytes() + self.tree_bytes() + self.leaf_bytes()
    }

    /// Length of an encoded verifying key
    pub const fn verifying_key_len(&self) -> usize {
        2 * self.n
    }

    /// Length of an encoded signing key
    pub const fn signing_key_len(&self) -> usize {
        4 * self.n
    }

    /// Length of an encoded signature
    pub const fn signature_len(&self) -> usize {
        let fors = self.k as usize * (self.a as usize + 1) * self.n;
        let ht = self.d as usize * (self.wots_len() + self.h_prime() as usize) * self.n;
        self.n + fors + ht
    }
}

/// Unwraps a published parameter tuple at compile time
const fn published(params: Result<Params>) -> Params {
    match params {
        Ok(p) => p,
        Err(_) => panic!("published parameter set failed validation"),
    }
}

pub(crate) const ASCON_128S: Params = published(Params::new(true, 16, 16, 7, 12, 14, 63));
pub(crate) const ASCON_128F: Params = published(Params::new(true, 16, 16, 22, 6, 33, 66));
pub(crate) const ASCON_192S: Params = published(Params::new(true, 24, 16, 7, 12, 14, 63));
pub(crate) const ASCON_192F: Params = published(Params::new(true, 24, 16, 22, 8, 33, 66));
pub(crate) const ASCON_128S_SIMPLE: Params = published(Params::new(false, 16, 16, 7, 12, 14, 63));
pub(crate) const ASCON_128F_SIMPLE: Params = published(Params::new(false, 16, 16, 22, 6, 33, 66));
pub(crate) const ASCON_192S_SIMPLE: Params = published(Params::new(false, 24, 16, 7, 12, 14, 63));
pub(crate) const ASCON_192F_SIMPLE: Params = published(Params::new(false, 24, 16, 22, 8, 33, 66));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wots_len2_precompute_w16() {
        for (n, len2) in [(1, 2), (8, 2), (9, 3), (16, 3), (136, 3), (137, 4), (256, 4)] {
            let p = Params::new(true, n, 16, 1, 4, 1, 1).unwrap();
            assert_eq!(p.wots_len2(), len2, "n = {n}");
            assert_eq!(p.wots_len1(), 2 * n);
        }
    }

    #[test]
    fn wots_len2_precompute_w256() {
        for (n, len2) in [(1, 1), (2, 2), (24, 2), (256, 2)] {
            let p = Params::new(false, n, 256, 1, 4, 1, 1).unwrap();
            assert_eq!(p.wots_len2(), len2, "n = {n}");
            assert_eq!(p.wots_len1(), n);
        }
    }

    #[test]
    fn hash_length_out_of_range() {
        for w in [16, 256] {
            assert_eq!(
                Params::new(true, 0, w, 1, 4, 1, 1),
                Err(Error::UnsupportedHashLength(0))
            );
            assert_eq!(
                Params::new(true, 257, w, 1, 4, 1, 1),
                Err(Error::UnsupportedHashLength(257))
            );
        }
    }

    #[test]
    fn unsupported_winternitz() {
        for w in [0, 4, 15, 17, 255, 65536] {
            assert_eq!(
                Params::new(true, 16, w, 7, 12, 14, 63),
                Err(Error::UnsupportedWinternitz(w))
            );
        }
    }

    #[test]
    fn layer_split() {
        assert_eq!(
            Params::new(true, 16, 16, 0, 12, 14, 63),
            Err(Error::InvalidLayers { h: 63, d: 0 })
        );
        assert_eq!(
            Params::new(true, 16, 16, 8, 12, 14, 63),
            Err(Error::InvalidLayers { h: 63, d: 8 })
        );
    }

    #[test]
    fn index_widths() {
        // 68 - 68/2 = 34 leaf bits
        assert_eq!(
            Params::new(true, 16, 16, 2, 12, 14, 68),
            Err(Error::LeafIndexTooWide(34))
        );
        // 70 - 70/14 = 65 tree bits
        assert_eq!(
            Params::new(true, 16, 16, 14, 12, 14, 70),
            Err(Error::TreeIndexTooWide(65))
        );
        // 64 tree bits is the widest accepted
        let p = Params::new(true, 16, 16, 9, 12, 14, 72).unwrap();
        assert_eq!(p.tree_bits(), 64);
        assert_eq!(p.tree_bytes(), 8);
    }

    #[test]
    fn fors_shape() {
        assert_eq!(
            Params::new(true, 16, 16, 7, 0, 14, 63),
            Err(Error::InvalidForsShape { a: 0, k: 14 })
        );
        assert_eq!(
            Params::new(true, 16, 16, 7, 12, 0, 63),
            Err(Error::InvalidForsShape { a: 12, k: 0 })
        );
        assert_eq!(
            Params::new(true, 16, 16, 7, 30, 5, 63),
            Err(Error::InvalidForsShape { a: 30, k: 5 })
        );
    }

    #[test]
    fn published_lengths() {
        assert_eq!(ASCON_128S.signature_len(), 7856);
        assert_eq!(ASCON_128F.signature_len(), 17088);
        assert_eq!(ASCON_192S.signature_len(), 14472);
        assert_eq!(ASCON_192F.signature_len(), 35664);
        assert_eq!(ASCON_128S.digest_len(), 30);
        assert_eq!(ASCON_128F.digest_len(), 34);
        assert_eq!(ASCON_192S.digest_len(), 30);
        assert_eq!(ASCON_192F.digest_len(), 42);
        assert_eq!(ASCON_192F.n(), 24);
        assert_eq!(ASCON_128S.t(), 4096);
        assert_eq!(ASCON_128F_SIMPLE.h_prime(), 3);
        assert!(!ASCON_192S_SIMPLE.robust());
    }
}
