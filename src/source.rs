//! Inspected objects: calls and extrinsics as supplied by the codec layer.
//!
//! Whether the inspected object is an extrinsic or a bare call is decided
//! once, when [`CallSource`] is constructed, and is not re-detected later.
use num_bigint::{BigInt, BigUint};
use primitive_types::H256;
use sp_core_hashing::blake2_256;

use crate::additional_types::{AccountId32, Era};
use crate::error::InspectError;
use crate::std::{borrow::ToOwned, boxed::Box, string::String, vec::Vec};

/// Declared call argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArgDef {
    pub name: String,

    /// Type descriptor text, as declared for the call argument.
    pub type_name: String,
}

/// Call description, from chain metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallMeta {
    pub pallet: String,
    pub call: String,
    pub args: Vec<ArgDef>,
    pub docs: String,
}

impl CallMeta {
    /// Call name as used in balance call registry, `Pallet.call`.
    pub fn call_name(&self) -> String {
        format!("{}.{}", self.pallet, self.call)
    }
}

/// Decoded call argument value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodedValue {
    Bool(bool),
    Bytes(Vec<u8>),
    Call(Box<Method>),
    Char(char),
    Composite(Vec<FieldValue>),
    Era(Era),
    H256(H256),
    Id(AccountId32),
    Option(Option<Box<DecodedValue>>),
    Sequence(Vec<DecodedValue>),
    Signed(i128),
    SignedBig(BigInt),
    Text(String),
    Tuple(Vec<DecodedValue>),
    Unsigned(u128),
    UnsignedBig(BigUint),
    Variant(VariantValue),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldValue {
    pub name: Option<String>,
    pub value: DecodedValue,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariantValue {
    pub name: String,
    pub fields: Vec<FieldValue>,
}

/// Call: declared arguments description and actual argument values.
///
/// Call description may be unavailable, for example if the metadata has no
/// matching call. Values are positionally aligned with declared arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Method {
    pub meta: Result<CallMeta, InspectError>,
    pub values: Vec<DecodedValue>,

    /// SCALE-encoded call, starting with pallet index and call index.
    pub encoded: Vec<u8>,
}

impl Method {
    pub fn new(meta: CallMeta, values: Vec<DecodedValue>, encoded: Vec<u8>) -> Self {
        Self {
            meta: Ok(meta),
            values,
            encoded,
        }
    }

    /// Call that could not be described.
    pub fn undescribed(error: InspectError, values: Vec<DecodedValue>, encoded: Vec<u8>) -> Self {
        Self {
            meta: Err(error),
            values,
            encoded,
        }
    }

    /// Content hash, `blake2_256` of the encoded call.
    pub fn hash(&self) -> H256 {
        H256(blake2_256(&self.encoded))
    }

    pub fn call_name(&self) -> Option<String> {
        self.meta.as_ref().ok().map(|meta| meta.call_name())
    }
}

/// Signature wrapper as found in the extrinsic: either tagged with the
/// signature scheme, or bare.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RawSignature {
    Tagged { tag: String, bytes: Vec<u8> },
    Untagged(Vec<u8>),
}

impl RawSignature {
    /// Signature wrapper from its value decoded with the metadata `Signature`
    /// type, and its `encoded` bytes.
    ///
    /// Enum wrapper is tagged with the variant name. Its bytes are the inner
    /// byte array, or the encoded data after the variant index. Any other
    /// wrapper is untagged and keeps all encoded bytes.
    pub fn from_decoded(value: &DecodedValue, encoded: &[u8]) -> Self {
        match value {
            DecodedValue::Variant(variant) => Self::Tagged {
                tag: variant.name.to_owned(),
                bytes: match inner_bytes(&variant.fields) {
                    Some(bytes) => bytes.to_vec(),
                    None => encoded.get(1..).unwrap_or_default().to_vec(),
                },
            },
            _ => Self::Untagged(encoded.to_vec()),
        }
    }

    /// Signature scheme tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Tagged { tag, .. } => Some(tag.as_str()),
            Self::Untagged(_) => None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Tagged { bytes, .. } => bytes.as_slice(),
            Self::Untagged(bytes) => bytes.as_slice(),
        }
    }
}

/// Byte array in a single field, possibly wrapped in single-field composites.
fn inner_bytes(fields: &[FieldValue]) -> Option<&[u8]> {
    match fields {
        [field] => match field.value {
            DecodedValue::Bytes(ref bytes) => Some(bytes.as_slice()),
            DecodedValue::Composite(ref inner) => inner_bytes(inner),
            _ => None,
        },
        _ => None,
    }
}

/// Signature part of a signed extrinsic, with displayable extensions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtrinsicSignature {
    pub signer: DecodedValue,
    pub signature: Vec<u8>,
    pub raw: Option<RawSignature>,
    pub era: Option<Era>,
    pub nonce: Option<u128>,
    pub tip: Option<u128>,
}

/// Extrinsic, signed or unsigned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extrinsic {
    pub method: Method,
    pub signature: Option<ExtrinsicSignature>,

    /// SCALE-encoded extrinsic, with length prefix.
    pub encoded: Vec<u8>,
}

impl Extrinsic {
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Extrinsic hash, `blake2_256` of the encoded extrinsic.
    pub fn hash(&self) -> H256 {
        H256(blake2_256(&self.encoded))
    }
}

/// Inspected object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallSource {
    SignedExtrinsic(Extrinsic),
    UnsignedMethod(Method),
}

impl CallSource {
    pub fn method(&self) -> &Method {
        match self {
            Self::SignedExtrinsic(extrinsic) => &extrinsic.method,
            Self::UnsignedMethod(method) => method,
        }
    }

    pub fn hash(&self) -> H256 {
        match self {
            Self::SignedExtrinsic(extrinsic) => extrinsic.hash(),
            Self::UnsignedMethod(method) => method.hash(),
        }
    }
}

impl From<Method> for CallSource {
    fn from(method: Method) -> Self {
        Self::UnsignedMethod(method)
    }
}

impl From<Extrinsic> for CallSource {
    fn from(extrinsic: Extrinsic) -> Self {
        Self::SignedExtrinsic(extrinsic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sr25519(bytes: Vec<u8>) -> DecodedValue {
        DecodedValue::Variant(VariantValue {
            name: String::from("Sr25519"),
            fields: vec![FieldValue {
                name: None,
                value: DecodedValue::Composite(vec![FieldValue {
                    name: None,
                    value: DecodedValue::Bytes(bytes),
                }]),
            }],
        })
    }

    #[test]
    fn raw_signature_tagged() {
        let mut encoded = vec![1u8];
        encoded.extend_from_slice(&[7u8; 64]);
        let raw = RawSignature::from_decoded(&sr25519(vec![7u8; 64]), &encoded);
        assert_eq!(raw.tag(), Some("Sr25519"));
        assert_eq!(raw.bytes(), &[7u8; 64][..]);
    }

    #[test]
    fn raw_signature_tagged_without_byte_array() {
        let value = DecodedValue::Variant(VariantValue {
            name: String::from("Ecdsa"),
            fields: vec![
                FieldValue {
                    name: None,
                    value: DecodedValue::Unsigned(5),
                },
                FieldValue {
                    name: None,
                    value: DecodedValue::Unsigned(6),
                },
            ],
        });
        let raw = RawSignature::from_decoded(&value, &[2, 5, 6]);
        assert_eq!(raw.tag(), Some("Ecdsa"));
        assert_eq!(raw.bytes(), &[5, 6][..]);
    }

    #[test]
    fn raw_signature_untagged() {
        let mut encoded = vec![1u8];
        encoded.extend_from_slice(&[9u8; 64]);
        let value = DecodedValue::Composite(vec![FieldValue {
            name: None,
            value: DecodedValue::Bytes(encoded.to_owned()),
        }]);
        let raw = RawSignature::from_decoded(&value, &encoded);
        assert_eq!(raw.tag(), None);
        assert_eq!(raw.bytes(), &encoded[..]);
    }

    #[test]
    fn method_hash() {
        let method = Method::undescribed(InspectError::NoCallMetadata, Vec::new(), vec![4, 3]);
        assert_eq!(method.hash(), H256(blake2_256(&[4, 3])));
        assert_eq!(method.call_name(), None);
    }
}
