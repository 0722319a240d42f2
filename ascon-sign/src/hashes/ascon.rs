use core::fmt::Debug;
use core::marker::PhantomData;

use ascon_hash::{AsconHash, AsconXof};
use digest::{ExtendableOutput, FixedOutput, Update, XofReader};
use hybrid_array::typenum::{U16, U24, U30, U34, U42, Unsigned};
use hybrid_array::{Array, ArraySize};
use typenum::U;
use zeroize::Zeroizing;

use crate::address::Address;
use crate::algorithm::Algorithm;
use crate::fors::ForsParams;
use crate::hashes::{HashMode, HashSuite, Robust, Simple};
use crate::hypertree::HypertreeParams;
use crate::wots::WotsParams;
use crate::xmss::XmssParams;
use crate::{ParameterSet, PkSeed, SigningKeyLen, SkPrf, SkSeed, VerifyingKeyLen};

/// Implementation of the component hash functions using Ascon-Hash and Ascon-XOF
///
/// `N` is the hash output length, `M` the length of the message digest and `Md` the
/// [`HashMode`] of the tweakable hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascon<N, M, Md> {
    _n: PhantomData<N>,
    _m: PhantomData<M>,
    _mode: PhantomData<Md>,
}

/// Truncates an Ascon-Hash output to `N` bytes
fn truncate<N: ArraySize>(hasher: AsconHash) -> Array<u8, N> {
    let digest = hasher.finalize_fixed();
    let mut output = Array::<u8, N>::default();
    output.copy_from_slice(&digest[..N::USIZE]);
    output
}

/// Tweakable hash over `N`-byte blocks
fn thash<'a, N: ArraySize, Md: HashMode>(
    pk_seed: &PkSeed<N>,
    adrs: &impl Address,
    blocks: impl Iterator<Item = &'a [u8]>,
) -> Array<u8, N> {
    let mut hasher = AsconHash::default()
        .chain(pk_seed.as_ref())
        .chain(adrs.as_ref());
    if Md::ROBUST {
        let mut mask = AsconXof::default()
            .chain(pk_seed.as_ref())
            .chain(adrs.as_ref())
            .finalize_xof();
        let mut masked = Zeroizing::new(Array::<u8, N>::default());
        for block in blocks {
            mask.read(masked.as_mut_slice());
            masked.iter_mut().zip(block).for_each(|(m, b)| *m ^= b);
            hasher.update(masked.as_slice());
        }
    } else {
        blocks.for_each(|block| hasher.update(block));
    }
    truncate(hasher)
}

impl<N, M, Md> HashSuite for Ascon<N, M, Md>
where
    N: ArraySize + Debug + Clone + PartialEq + Eq,
    M: ArraySize + Debug + Clone + PartialEq + Eq,
    Md: HashMode,
{
    type N = N;
    type M = M;

    const ROBUST: bool = Md::ROBUST;

    fn prf_msg(sk_prf: &SkPrf<N>, opt_rand: &Array<u8, N>, msg: &[u8]) -> Array<u8, N> {
        let hasher = AsconHash::default()
            .chain(sk_prf.as_ref())
            .chain(opt_rand.as_slice())
            .chain(msg);
        truncate(hasher)
    }

    fn h_msg(
        rand: &Array<u8, N>,
        pk_seed: &PkSeed<N>,
        pk_root: &Array<u8, N>,
        msg: &[u8],
    ) -> Array<u8, M> {
        let hasher = AsconXof::default()
            .chain(rand.as_slice())
            .chain(pk_seed.as_ref())
            .chain(pk_root.as_slice())
            .chain(msg);
        let mut output = Array::<u8, M>::default();
        hasher.finalize_xof_into(&mut output);
        output
    }

    fn prf_sk(sk_seed: &SkSeed<N>, adrs: &impl Address) -> Zeroizing<Array<u8, N>> {
        let hasher = AsconHash::default()
            .chain(sk_seed.as_ref())
            .chain(adrs.as_ref());
        Zeroizing::new(truncate(hasher))
    }

    fn t<L: ArraySize>(
        pk_seed: &PkSeed<N>,
        adrs: &impl Address,
        m: &Array<Array<u8, N>, L>,
    ) -> Array<u8, N> {
        thash::<N, Md>(pk_seed, adrs, m.iter().map(Array::as_slice))
    }

    fn h(
        pk_seed: &PkSeed<N>,
        adrs: &impl Address,
        m1: &Array<u8, N>,
        m2: &Array<u8, N>,
    ) -> Array<u8, N> {
        thash::<N, Md>(pk_seed, adrs, [m1.as_slice(), m2.as_slice()].into_iter())
    }

    fn f(pk_seed: &PkSeed<N>, adrs: &impl Address, m: &Array<u8, N>) -> Array<u8, N> {
        thash::<N, Md>(pk_seed, adrs, core::iter::once(m.as_slice()))
    }
}

/// Type-level sizes shared by the robust and simple variant of one parameter set
macro_rules! impl_sizes {
    (
        Ascon<$n:ty, $m:ty> {
            n: $n_bytes:literal,
            wots: ($len1:literal, $len2:literal),
            h_prime: $h_prime:literal,
            d: $d:literal,
            h: $h:literal,
            k: $k:literal,
            a: $a:literal $(,)?
        }
    ) => {
        impl<Md: HashMode> WotsParams for Ascon<$n, $m, Md> {
            type LogW = U<4>;
            type WotsLen1 = U<$len1>;
            type WotsLen2 = U<$len2>;
            type WotsLen = U<{ $len1 + $len2 }>;
        }
        impl<Md: HashMode> XmssParams for Ascon<$n, $m, Md> {
            type HPrime = U<$h_prime>;
        }
        impl<Md: HashMode> HypertreeParams for Ascon<$n, $m, Md> {
            type D = U<$d>;
            type H = U<$h>;
        }
        impl<Md: HashMode> ForsParams for Ascon<$n, $m, Md> {
            type K = U<$k>;
            type A = U<$a>;
            type MD = U<{ ($a * $k as usize).div_ceil(8) }>;
        }
        impl<Md> VerifyingKeyLen for Ascon<$n, $m, Md> {
            type VkLen = U<{ 2 * $n_bytes }>;
        }
        impl<Md> SigningKeyLen for Ascon<$n, $m, Md> {
            type SkLen = U<{ 4 * $n_bytes }>;
        }
    };
}

impl_sizes!(Ascon<U16, U30> { n: 16, wots: (32, 3), h_prime: 9, d: 7, h: 63, k: 14, a: 12 });
impl_sizes!(Ascon<U16, U34> { n: 16, wots: (32, 3), h_prime: 3, d: 22, h: 66, k: 33, a: 6 });
impl_sizes!(Ascon<U24, U30> { n: 24, wots: (48, 3), h_prime: 9, d: 7, h: 63, k: 14, a: 12 });
impl_sizes!(Ascon<U24, U42> { n: 24, wots: (48, 3), h_prime: 3, d: 22, h: 66, k: 33, a: 8 });

/// Checks the type-level sizes of a parameter set against its runtime [`Params`](crate::Params)
const fn assert_consistent<P: ParameterSet>() {
    let p = P::ALGORITHM.params();
    assert!(P::N::USIZE <= 32, "Ascon-Hash output is 32 bytes");
    assert!(P::N::USIZE == p.n());
    assert!(P::M::USIZE == p.digest_len());
    assert!(P::ROBUST == p.robust());
    assert!(P::LogW::U32 == p.log_w());
    assert!(P::WotsLen1::USIZE == p.wots_len1());
    assert!(P::WotsLen2::USIZE == p.wots_len2());
    assert!(P::WotsLen::USIZE == p.wots_len());
    assert!(P::HPrime::U32 == p.h_prime());
    assert!(P::D::U32 == p.d());
    assert!(P::H::U32 == p.h());
    assert!(P::K::U32 == p.k());
    assert!(P::A::U32 == p.a());
    assert!(P::MD::USIZE == p.fors_msg_bytes());
    assert!(P::VkLen::USIZE == p.verifying_key_len());
    assert!(P::SkLen::USIZE == p.signing_key_len());
}

macro_rules! parameter_sets {
    ($($(#[$doc:meta])* $name:ident = Ascon<$n:ty, $m:ty, $mode:ty>;)*) => {
        $(
            $(#[$doc])*
            pub type $name = Ascon<$n, $m, $mode>;

            impl ParameterSet for $name {
                const NAME: &'static str = Algorithm::$name.name();
                const ALGORITHM: Algorithm = Algorithm::$name;
            }

            const _: () = assert_consistent::<$name>();
        )*
    };
}

parameter_sets! {
    /// Ascon-Sign at L1 security with small signatures
    AsconSign128s = Ascon<U16, U30, Robust>;
    /// Ascon-Sign at L1 security with fast signing
    AsconSign128f = Ascon<U16, U34, Robust>;
    /// Ascon-Sign at L3 security with small signatures
    AsconSign192s = Ascon<U24, U30, Robust>;
    /// Ascon-Sign at L3 security with fast signing
    AsconSign192f = Ascon<U24, U42, Robust>;
    /// [`AsconSign128s`] with unmasked tweakable hashes
    AsconSign128sSimple = Ascon<U16, U30, Simple>;
    /// [`AsconSign128f`] with unmasked tweakable hashes
    AsconSign128fSimple = Ascon<U16, U34, Simple>;
    /// [`AsconSign192s`] with unmasked tweakable hashes
    AsconSign192sSimple = Ascon<U24, U30, Simple>;
    /// [`AsconSign192f`] with unmasked tweakable hashes
    AsconSign192fSimple = Ascon<U24, U42, Simple>;
}
