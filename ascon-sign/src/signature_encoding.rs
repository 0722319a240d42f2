use crate::ParameterSet;
use crate::error::Error;
use crate::fors::ForsSignature;
use crate::hypertree::HypertreeSig;
use hybrid_array::Array;
use typenum::Unsigned;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed Ascon-Sign signature for a given parameter set
///
/// The encoding is the randomizer `R`, followed by the FORS signature and the
/// `d` XMSS signatures of the hypertree, bottom layer first.
///
/// Note that this is a large stack-allocated value, roughly `P::ALGORITHM.params().signature_len()`
/// bytes. There are no invariants maintained by this struct - every field is a hash value
pub struct Signature<P: ParameterSet> {
    pub(crate) randomizer: Array<u8, P::N>,
    pub(crate) fors_sig: ForsSignature<P>,
    pub(crate) ht_sig: HypertreeSig<P>,
}

impl<P: ParameterSet> Signature<P> {
    /// Length of an encoded signature in bytes
    pub const SIZE: usize = P::N::USIZE + ForsSignature::<P>::SIZE + HypertreeSig::<P>::SIZE;

    /// Serialize the signature into `buf`, which must be exactly [`Self::SIZE`] bytes long
    ///
    /// # Errors
    /// [`Error::InvalidSignatureLength`] if `buf` has any other length
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), Error> {
        if buf.len() != Self::SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: Self::SIZE,
                got: buf.len(),
            });
        }
        let (r_buf, rest) = buf.split_at_mut(P::N::USIZE);
        let (fors_buf, ht_buf) = rest.split_at_mut(ForsSignature::<P>::SIZE);
        r_buf.copy_from_slice(&self.randomizer);
        self.fors_sig.write_to(fors_buf);
        self.ht_sig.write_to(ht_buf);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    /// Serialize the signature to a `Vec<u8>` of length [`Self::SIZE`]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::SIZE];
        let r_size = P::N::USIZE;
        let fors_size = ForsSignature::<P>::SIZE;
        bytes[..r_size].copy_from_slice(&self.randomizer);
        self.fors_sig
            .write_to(&mut bytes[r_size..r_size + fors_size]);
        self.ht_sig.write_to(&mut bytes[r_size + fors_size..]);
        bytes
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for Signature<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != Self::SIZE {
            return Err(Error::InvalidSignatureLength {
                expected: Self::SIZE,
                got: bytes.len(),
            });
        }

        let (rand_bytes, rest) = bytes.split_at(P::N::USIZE);
        let mut randomizer = Array::<u8, P::N>::default();
        randomizer.copy_from_slice(rand_bytes);

        let (fors_bytes, ht_bytes) = rest.split_at(ForsSignature::<P>::SIZE);
        let fors_sig = ForsSignature::try_from(fors_bytes)?;
        let ht_sig = HypertreeSig::try_from(ht_bytes)?;

        Ok(Signature {
            randomizer,
            fors_sig,
            ht_sig,
        })
    }
}

#[cfg(feature = "alloc")]
impl<P: ParameterSet> From<&Signature<P>> for Vec<u8> {
    fn from(sig: &Signature<P>) -> Vec<u8> {
        sig.to_vec()
    }
}

#[cfg(feature = "alloc")]
impl<P: ParameterSet> From<Signature<P>> for Vec<u8> {
    fn from(sig: Signature<P>) -> Vec<u8> {
        sig.to_vec()
    }
}

#[cfg(feature = "alloc")]
impl<P: ParameterSet> ::signature::SignatureEncoding for Signature<P> {
    type Repr = Vec<u8>;

    fn encoded_len(&self) -> usize {
        Self::SIZE
    }
}
