//! Decode unchecked extrinsics, signed or unsigned.
//!
//! Unchecked extrinsics are assumed to be SCALE-encoded opaque `Vec<u8>`, its
//! general structure described
//! [here](https://docs.substrate.io/reference/transaction-format/).
//!
//! Signed unchecked extrinsic structure:
//!
//! <table>
//!   <tr>
//!     <td>compact length of whole extrinsic</td>
//!     <td>version byte</td>
//!     <td>address that produced the extrinsic</td>
//!     <td>signature</td>
//!     <td>extra data</td>
//!     <td>call</td>
//!   </tr>
//! </table>
//!
//! Unsigned unchecked extrinsic structure:
//!
//! <table>
//!   <tr>
//!     <td>compact length of whole extrinsic</td>
//!     <td>version byte</td>
//!     <td>call</td>
//!   </tr>
//! </table>
//!
//! Signed and unsigned unchecked extrinsics are differentiated by version byte.
//! The first bit in the version byte is `0` if the extrinsic is unsigned and
//! `1` if the extrinsic is signed. Other 7 bits must match the extrinsic
//! `version` from [`ExtrinsicMetadata`](frame_metadata::v14::ExtrinsicMetadata).
//! Currently the `version` has a constant value of `4`, thus version byte is
//! `0x04` for unsigned extrinsics and `0x84` for signed extrinsics.
//!
//! Extra data is a set of signed extensions, in the order declared in the
//! metadata. Mortality, nonce and tip are kept for display.
#[cfg(feature = "std")]
use std::cmp::Ordering;

#[cfg(not(feature = "std"))]
use core::cmp::Ordering;

use frame_metadata::v14::RuntimeMetadataV14;

use crate::compacts::get_compact;
use crate::decoding_sci::{decode_call_at, decode_with_type, read_byte, Context};
use crate::error::{InspectError, MetadataError, ParserError};
use crate::source::{CallSource, DecodedValue, Extrinsic, ExtrinsicSignature, RawSignature};
use crate::special_indicators::{
    SignedExtensionHint, EXTRINSIC_ADDRESS, EXTRINSIC_CALL, EXTRINSIC_SIGNATURE,
};

/// Version byte mask, to separate version and signed/unsigned information.
const VERSION_MASK: u8 = 0b0111_1111;

/// Version value for unsigned extrinsic, after `VERSION_MASK` is applied.
const VERSION_UNSIGNED: u8 = 0;

/// Field name of the tip in composite tip extensions, such as
/// `ChargeAssetTxPayment`.
const TIP: &str = "tip";

/// Type id of extrinsic type parameter, such as `Call` or `Address`.
pub(crate) fn extrinsic_param(
    meta_v14: &RuntimeMetadataV14,
    param_name: &'static str,
) -> Result<u32, MetadataError> {
    let extrinsic_ty_id = meta_v14.extrinsic.ty.id;
    let extrinsic_ty = meta_v14
        .types
        .resolve(extrinsic_ty_id)
        .ok_or(MetadataError::TypeNotResolved {
            id: extrinsic_ty_id,
        })?;
    extrinsic_ty
        .type_params
        .iter()
        .find(|param| param.name == param_name)
        .and_then(|param| param.ty.map(|ty| ty.id))
        .ok_or(MetadataError::NoExtrinsicParam(param_name))
}

/// Decode an unchecked extrinsic. All data must be used.
///
/// Unsigned extrinsic results in [`CallSource::SignedExtrinsic`] with no
/// signature: it is still an extrinsic and is hashed as one.
pub fn decode_as_unchecked_extrinsic(
    data: &[u8],
    meta_v14: &RuntimeMetadataV14,
) -> Result<CallSource, InspectError> {
    extrinsic_param(meta_v14, EXTRINSIC_CALL)?;
    let context = Context::new(meta_v14);

    let mut position: usize = 0;
    let extrinsic_length = get_compact::<u32>(data, &mut position)? as usize;
    match (position + extrinsic_length).cmp(&data.len()) {
        Ordering::Greater => {
            return Err(ParserError::DataTooShort {
                position: data.len(),
                minimal_length: position + extrinsic_length - data.len(),
            }
            .into())
        }
        Ordering::Less => {
            return Err(ParserError::SomeDataNotUsedBlob {
                from: position + extrinsic_length,
            }
            .into())
        }
        Ordering::Equal => {}
    }

    // version byte from extrinsic, to differentiate signed and unsigned extrinsics
    let version_byte = read_byte(data, &mut position)?;
    let version = meta_v14.extrinsic.version;
    if version_byte & VERSION_MASK != version {
        return Err(InspectError::VersionMismatch {
            version_byte,
            version,
        });
    }

    let signature = if version_byte & !VERSION_MASK == VERSION_UNSIGNED {
        None
    } else {
        Some(decode_signature_part(data, &mut position, &context)?)
    };

    let call_position = position;
    let method = decode_call_at(data, &mut position, &context, 0)?;
    if position != data.len() {
        return Err(ParserError::SomeDataNotUsedBlob { from: position }.into());
    }
    log::debug!(
        "decoded {} extrinsic, call at position {}",
        if signature.is_some() { "signed" } else { "unsigned" },
        call_position
    );

    Ok(CallSource::SignedExtrinsic(Extrinsic {
        method,
        signature,
        encoded: data.to_vec(),
    }))
}

/// Decode address, signature and signed extensions of a signed extrinsic.
fn decode_signature_part(
    data: &[u8],
    position: &mut usize,
    context: &Context,
) -> Result<ExtrinsicSignature, InspectError> {
    let address_ty_id = extrinsic_param(context.meta_v14, EXTRINSIC_ADDRESS)?;
    let signature_ty_id = extrinsic_param(context.meta_v14, EXTRINSIC_SIGNATURE)?;

    let signer = decode_with_type(address_ty_id, data, position, context, 0)?;

    let signature_start = *position;
    let signature_value = decode_with_type(signature_ty_id, data, position, context, 0)?;
    let raw = RawSignature::from_decoded(&signature_value, &data[signature_start..*position]);

    let mut era = None;
    let mut nonce = None;
    let mut tip = None;
    for signed_extension in context.meta_v14.extrinsic.signed_extensions.iter() {
        let value = decode_with_type(signed_extension.ty.id, data, position, context, 0)?;
        match SignedExtensionHint::from_identifier(&signed_extension.identifier) {
            SignedExtensionHint::Mortality => {
                if let DecodedValue::Era(found) = value {
                    era = Some(found)
                }
            }
            SignedExtensionHint::Nonce => {
                if let DecodedValue::Unsigned(found) = value {
                    nonce = Some(found)
                }
            }
            SignedExtensionHint::Tip => tip = tip_value(&value),
            SignedExtensionHint::None => {}
        }
    }

    Ok(ExtrinsicSignature {
        signer,
        signature: raw.bytes().to_vec(),
        raw: Some(raw),
        era,
        nonce,
        tip,
    })
}

/// Tip is either the extension value itself, or its `tip` field.
fn tip_value(value: &DecodedValue) -> Option<u128> {
    match value {
        DecodedValue::Unsigned(tip) => Some(*tip),
        DecodedValue::Composite(fields) => fields.iter().find_map(|field| {
            match (field.name.as_deref(), &field.value) {
                (Some(TIP), DecodedValue::Unsigned(tip)) => Some(*tip),
                _ => None,
            }
        }),
        _ => None,
    }
}
