use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::address::WotsHash;
use crate::error::{Error, Result};
use crate::hashes::HashSuite;
use crate::util::{base_2b, map_indexed};
use crate::{PkSeed, SkSeed};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WotsSig<P: WotsParams>(Array<Array<u8, P::N>, P::WotsLen>);

impl<P: WotsParams> WotsSig<P> {
    pub const SIZE: usize = P::N::USIZE * P::WotsLen::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() == Self::SIZE, "WOTS+ serialize length mismatch");

        buf.chunks_exact_mut(P::N::USIZE)
            .zip(self.0.iter())
            .for_each(|(buf, sig)| buf.copy_from_slice(sig.as_slice()));
    }

    pub(crate) fn read_from(buf: &[u8]) -> Self {
        debug_assert!(buf.len() == Self::SIZE, "WOTS+ deserialize length mismatch");

        let mut sig = Array::<Array<u8, P::N>, P::WotsLen>::default();
        sig.iter_mut()
            .zip(buf.chunks_exact(P::N::USIZE))
            .for_each(|(chain, bytes)| chain.copy_from_slice(bytes));
        WotsSig(sig)
    }
}

impl<P: WotsParams> TryFrom<&[u8]> for WotsSig<P> {
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

pub(crate) trait WotsParams: HashSuite {
    /// Bits per digit, `log2(w)`
    type LogW: Unsigned;
    /// Number of message digits, `8n / log2(w)`
    type WotsLen1: ArraySize;
    /// Number of checksum digits
    type WotsLen2: ArraySize;
    /// Number of hash chains, `WotsLen1 + WotsLen2`
    type WotsLen: ArraySize + Debug + Eq;

    /// The message digits of `m` followed by the digits of their checksum
    fn wots_digits(m: &Array<u8, Self::N>) -> Array<u16, Self::WotsLen> {
        let w = 1u32 << Self::LogW::U32;
        let msg = base_2b::<Self::WotsLen1, Self::LogW>(m.as_slice());
        let csum: u32 = msg.iter().map(|&digit| w - 1 - u32::from(digit)).sum();

        // Left-align the checksum in its byte encoding
        let csum_bits = Self::WotsLen2::U32 * Self::LogW::U32;
        let csum = csum << ((8 - csum_bits % 8) % 8);
        let csum_bytes = csum.to_be_bytes();
        let csum_digits = base_2b::<Self::WotsLen2, Self::LogW>(
            &csum_bytes[csum_bytes.len() - csum_bits.div_ceil(8) as usize..],
        );

        let len1 = Self::WotsLen1::USIZE;
        Array::from_fn(|i| if i < len1 { msg[i] } else { csum_digits[i - len1] })
    }

    /// Iterates `F` `steps` times starting at chain position `start`
    fn wots_chain(
        x: &Array<u8, Self::N>,
        start: u32,
        steps: u32,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        debug_assert!(start + steps < 1 << Self::LogW::U32, "Invalid wots_chain index");

        let mut adrs = *adrs;
        let mut tmp = x.clone();
        for j in start..(start + steps) {
            adrs.hash.set(j);
            tmp = Self::f(pk_seed, &adrs, &tmp);
        }
        tmp
    }

    fn wots_pk_gen(
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        let top = (1 << Self::LogW::U32) - 1;
        let tops = map_indexed::<Self::WotsLen, _>(|i| {
            let mut adrs = *adrs;
            adrs.chain.set(i);
            let sk = Self::prf_sk(sk_seed, &adrs.prf());
            Self::wots_chain(&sk, 0, top, pk_seed, &adrs)
        });
        Self::t(pk_seed, &adrs.pk(), &tops)
    }

    fn wots_sign(
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> WotsSig<Self> {
        let digits = Self::wots_digits(m);
        let sig = map_indexed::<Self::WotsLen, _>(|i| {
            let mut adrs = *adrs;
            adrs.chain.set(i);
            let sk = Self::prf_sk(sk_seed, &adrs.prf());
            Self::wots_chain(&sk, 0, u32::from(digits[i as usize]), pk_seed, &adrs)
        });
        WotsSig(sig)
    }

    fn wots_pk_from_sig(
        sig: &WotsSig<Self>,
        m: &Array<u8, Self::N>,
        pk_seed: &PkSeed<Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        let top = (1 << Self::LogW::U32) - 1;
        let digits = Self::wots_digits(m);
        let tops = map_indexed::<Self::WotsLen, _>(|i| {
            let mut adrs = *adrs;
            adrs.chain.set(i);
            let digit = u32::from(digits[i as usize]);
            Self::wots_chain(&sig.0[i as usize], digit, top - digit, pk_seed, &adrs)
        });
        Self::t(pk_seed, &adrs.pk(), &tops)
    }
}
