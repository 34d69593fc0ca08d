//! Types and functions from [`sp_core`](https://docs.rs/sp-core/latest/sp_core/)
//! and [`sp_runtime`](https://docs.rs/sp-runtime/latest/sp_runtime/), for
//! decoding and display of decoded data.
use base58::ToBase58;
use parity_scale_codec::{Decode, Encode, Error, Input, Output};

use crate::printing_balance::format_number;
use crate::std::{string::String, vec::Vec};

/// Era period, same as in `sp_runtime::generic`.
pub type Period = u64;

/// Era phase, same as in `sp_runtime::generic`.
pub type Phase = u64;

/// Era, same as in `sp_runtime::generic::Era`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Era {
    Immortal,
    Mortal(Period, Phase),
}

impl Era {
    /// First block of the era validity, for the block `current` in which
    /// the era was created or in any block after it.
    ///
    /// Zero period is never decoded; for it the era starts at `current`.
    pub fn birth(self, current: u64) -> u64 {
        match self {
            Self::Immortal => 0,
            Self::Mortal(0, _) => current,
            Self::Mortal(period, phase) => (current.max(phase) - phase) / period * period + phase,
        }
    }

    /// Block after which the transaction stops being valid.
    pub fn death(self, current: u64) -> u64 {
        match self {
            Self::Immortal => u64::MAX,
            Self::Mortal(period, _) => self.birth(current).saturating_add(period),
        }
    }

    /// Lifetime of the transaction as displayed text.
    pub fn mortality(self, current: u64) -> String {
        match self {
            Self::Immortal => String::from("immortal"),
            Self::Mortal(..) => format!(
                "mortal, valid from #{} to #{}",
                format_number(self.birth(current) as u128),
                format_number(self.death(current) as u128),
            ),
        }
    }
}

/// [`Decode`] implementation, same as in `sp_runtime::generic::Era`.
impl Decode for Era {
    fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
        let first = input.read_byte()?;
        if first == 0 {
            Ok(Self::Immortal)
        } else {
            let encoded = first as u64 + ((input.read_byte()? as u64) << 8);
            let period = 2 << (encoded % (1 << 4));
            let quantize_factor = (period >> 12).max(1);
            let phase = (encoded >> 4) * quantize_factor;
            if period >= 4 && phase < period {
                Ok(Self::Mortal(period, phase))
            } else {
                Err("Invalid period and phase".into())
            }
        }
    }
}

/// [`Encode`] implementation, same as in `sp_runtime::generic::Era`.
impl Encode for Era {
    fn encode_to<T: Output + ?Sized>(&self, output: &mut T) {
        match self {
            Self::Immortal => output.push_byte(0),
            Self::Mortal(period, phase) => {
                let quantize_factor = (*period >> 12).max(1);
                let encoded = (period.trailing_zeros() - 1).clamp(1, 15) as u16
                    | ((phase / quantize_factor) << 4) as u16;
                encoded.encode_to(output);
            }
        }
    }
}

/// Definitions for some special arrays from `sp_core`.
macro_rules! define_array {
    ($(#[$attr:meta] $name: ident ($len: expr)), *) => {
        $(
            #[$attr]
            ///
            /// For decoding and display of decoded data only.
            #[derive(Clone, Debug, Decode, Encode, Eq, PartialEq)]
            pub struct $name(pub [u8; $len]);
            impl $name {
                pub const fn len_bytes() -> usize {
                    $len
                }
            }
        )*
    }
}

/// Known size for `sp_core::crypto::AccountId32`.
pub const ACCOUNT_ID_32_LEN: usize = 32;

define_array! {
    /// Placeholder for `sp_core::crypto::AccountId32`.
    AccountId32(ACCOUNT_ID_32_LEN)
}

/// Prefix used in base58 conversion. From `sp_core`.
const PREFIX: &[u8] = b"SS58PRE";

/// Hash calculation used in base58 conversion. From `sp_core`.
fn ss58hash(data: &[u8]) -> Vec<u8> {
    use blake2::{Blake2b512, Digest};

    let mut ctx = Blake2b512::new();
    ctx.update(PREFIX);
    ctx.update(data);
    ctx.finalize().to_vec()
}

/// Same as `to_ss58check_with_version()` method for `Ss58Codec`.
fn as_base58_with_known_prefix(input: &[u8], base58prefix: u16) -> String {
    // SS58 prefix supports 14 bits only
    let ident: u16 = base58prefix & 0b0011_1111_1111_1111;
    let mut v = match ident {
        0..=63 => vec![ident as u8],
        _ => {
            let first = ((ident & 0b0000_0000_1111_1100) as u8) >> 2;
            let second = ((ident >> 8) as u8) | ((ident & 0b0000_0000_0000_0011) as u8) << 6;
            vec![first | 0b01000000, second]
        }
    };
    v.extend(input);
    let r = ss58hash(&v);
    v.extend(&r[0..2]);
    v.to_base58()
}

impl AccountId32 {
    pub fn as_base58(&self, base58prefix: u16) -> String {
        as_base58_with_known_prefix(&self.0, base58prefix)
    }
}
