//! Decode call data using metadata [`RuntimeMetadataV14`].
//!
//! Metadata [`RuntimeMetadataV14`] contains types description inside, that gets
//! used for the decoding.
//!
//! Call data starts with pallet index, followed by call index within the
//! pallet calls enum. Call arguments are the fields of the call variant, and
//! are decoded type by type as found in the metadata types registry.
use frame_metadata::v14::RuntimeMetadataV14;
use num_bigint::{BigInt, BigUint};
use parity_scale_codec::Decode;
use primitive_types::H256;
use scale_info::{form::PortableForm, Field, Type, TypeDef, TypeDefPrimitive, Variant};

use crate::additional_types::{AccountId32, Era, ACCOUNT_ID_32_LEN};
use crate::compacts::get_compact;
use crate::error::{InspectError, MetadataError, ParserError};
use crate::source::{ArgDef, CallMeta, DecodedValue, FieldValue, Method, VariantValue};
use crate::special_indicators::{SpecialtyTypeHinted, EXTRINSIC_CALL, NONE, SOME};
use crate::std::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
use crate::unchecked_extrinsic::extrinsic_param;

/// Nesting limit for type resolving.
///
/// Metadata types registry could, in principle, contain cycling type
/// references, and decoding must stop at some point.
pub const MAX_DEPTH: u32 = 64;

/// Decoding context.
pub(crate) struct Context<'a> {
    pub(crate) meta_v14: &'a RuntimeMetadataV14,

    /// Runtime call type id, if known from extrinsic type description.
    ///
    /// Values of this type are decoded as nested calls.
    pub(crate) call_ty_id: Option<u32>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(meta_v14: &'a RuntimeMetadataV14) -> Self {
        Self {
            meta_v14,
            call_ty_id: extrinsic_param(meta_v14, EXTRINSIC_CALL).ok(),
        }
    }

    fn resolve(&self, id: u32) -> Result<&'a Type<PortableForm>, MetadataError> {
        self.meta_v14
            .types
            .resolve(id)
            .ok_or(MetadataError::TypeNotResolved { id })
    }
}

/// Decode call starting at `position`, and move `position` past it.
///
/// Nested calls, for example in `Utility.batch`, are decoded as
/// [`DecodedValue::Call`] if the metadata has the runtime call type in its
/// extrinsic type description.
pub fn decode_as_call(
    data: &[u8],
    position: &mut usize,
    meta_v14: &RuntimeMetadataV14,
) -> Result<Method, InspectError> {
    decode_call_at(data, position, &Context::new(meta_v14), 0)
}

/// Decode whole `&[u8]` slice as a call. All data must be used.
pub fn decode_all_as_call(data: &[u8], meta_v14: &RuntimeMetadataV14) -> Result<Method, InspectError> {
    let mut position = 0;
    let method = decode_as_call(data, &mut position, meta_v14)?;
    if position != data.len() {
        Err(ParserError::SomeDataNotUsedBlob { from: position }.into())
    } else {
        Ok(method)
    }
}

/// Describe call by pallet index and call index, without any call data.
pub fn call_meta(
    meta_v14: &RuntimeMetadataV14,
    pallet_index: u8,
    call_index: u8,
) -> Result<CallMeta, InspectError> {
    let context = Context::new(meta_v14);
    let (pallet_name, variant) = find_call(&context, pallet_index, call_index)?;
    Ok(describe_call(&context, pallet_name, variant))
}

fn find_call<'a>(
    context: &Context<'a>,
    pallet_index: u8,
    call_index: u8,
) -> Result<(&'a str, &'a Variant<PortableForm>), MetadataError> {
    let pallet = context
        .meta_v14
        .pallets
        .iter()
        .find(|pallet| pallet.index == pallet_index)
        .ok_or(MetadataError::PalletNotFound(pallet_index))?;
    let calls = pallet
        .calls
        .as_ref()
        .ok_or_else(|| MetadataError::NoCallsInPallet(pallet.name.to_string()))?;
    let calls_ty = context.resolve(calls.ty.id)?;
    match &calls_ty.type_def {
        TypeDef::Variant(x) => x
            .variants
            .iter()
            .find(|variant| variant.index == call_index)
            .map(|variant| (pallet.name.as_str(), variant))
            .ok_or_else(|| MetadataError::CallNotFound {
                pallet: pallet.name.to_string(),
                call_index,
            }),
        _ => Err(MetadataError::NotACall { id: calls.ty.id }),
    }
}

fn describe_call(
    context: &Context,
    pallet_name: &str,
    variant: &Variant<PortableForm>,
) -> CallMeta {
    let args = variant
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| ArgDef {
            name: field.name.clone().unwrap_or_else(|| i.to_string()),
            type_name: match field.type_name {
                Some(ref type_name) => type_name.to_string(),
                None => describe_type(context, field.ty.id, 0),
            },
        })
        .collect();
    CallMeta {
        pallet: pallet_name.to_string(),
        call: variant.name.to_string(),
        args,
        docs: variant.docs.join("\n"),
    }
}

pub(crate) fn decode_call_at(
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<Method, InspectError> {
    let start = *position;
    let pallet_index = read_byte(data, position)?;
    let call_index = read_byte(data, position)?;
    let (pallet_name, variant) = find_call(context, pallet_index, call_index)?;
    let meta = describe_call(context, pallet_name, variant);
    let values = decode_fields_values(&variant.fields, data, position, context, depth + 1)?;
    Ok(Method::new(meta, values, data[start..*position].to_vec()))
}

fn decode_fields_values(
    fields: &[Field<PortableForm>],
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<Vec<DecodedValue>, InspectError> {
    let mut out = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        out.push(decode_with_type(field.ty.id, data, position, context, depth)?);
    }
    Ok(out)
}

fn decode_fields(
    fields: &[Field<PortableForm>],
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<Vec<FieldValue>, InspectError> {
    let values = decode_fields_values(fields, data, position, context, depth)?;
    Ok(fields
        .iter()
        .zip(values)
        .map(|(field, value)| FieldValue {
            name: field.name.clone(),
            value,
        })
        .collect())
}

/// Decode data at `position` as type `ty_id` from the metadata types registry.
pub(crate) fn decode_with_type(
    ty_id: u32,
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<DecodedValue, InspectError> {
    if depth > MAX_DEPTH {
        return Err(MetadataError::CyclicMetadata { id: ty_id }.into());
    }
    if context.call_ty_id == Some(ty_id) {
        let method = decode_call_at(data, position, context, depth + 1)?;
        return Ok(DecodedValue::Call(Box::new(method)));
    }
    let ty = context.resolve(ty_id)?;
    match SpecialtyTypeHinted::from_path(&ty.path) {
        SpecialtyTypeHinted::AccountId32 => {
            let slice = read_slice(data, position, ACCOUNT_ID_32_LEN)?;
            let mut account_id = [0u8; ACCOUNT_ID_32_LEN];
            account_id.copy_from_slice(slice);
            return Ok(DecodedValue::Id(AccountId32(account_id)));
        }
        SpecialtyTypeHinted::H256 => {
            let slice = read_slice(data, position, H256::len_bytes())?;
            return Ok(DecodedValue::H256(H256::from_slice(slice)));
        }
        SpecialtyTypeHinted::Era => {
            let mut tail = data.get(*position..).unwrap_or_default();
            let total = tail.len();
            let era = Era::decode(&mut tail)
                .map_err(|_| ParserError::InvalidEra { position: *position })?;
            *position += total - tail.len();
            return Ok(DecodedValue::Era(era));
        }
        SpecialtyTypeHinted::Option => {
            if let Some(value) = decode_option(ty, data, position, context, depth)? {
                return Ok(value);
            }
        }
        SpecialtyTypeHinted::None => {}
    }
    match &ty.type_def {
        TypeDef::Composite(x) => {
            if x.fields.len() == 1 && x.fields[0].name.is_none() {
                decode_with_type(x.fields[0].ty.id, data, position, context, depth + 1)
            } else {
                Ok(DecodedValue::Composite(decode_fields(
                    &x.fields,
                    data,
                    position,
                    context,
                    depth + 1,
                )?))
            }
        }
        TypeDef::Variant(x) => {
            let variant_position = *position;
            let index = read_byte(data, position)?;
            let variant = x
                .variants
                .iter()
                .find(|variant| variant.index == index)
                .ok_or(ParserError::UnexpectedEnumVariant {
                    position: variant_position,
                })?;
            Ok(DecodedValue::Variant(VariantValue {
                name: variant.name.to_string(),
                fields: decode_fields(&variant.fields, data, position, context, depth + 1)?,
            }))
        }
        TypeDef::Sequence(x) => {
            let number_of_elements = get_compact::<u32>(data, position)?;
            decode_elements_set(x.type_param.id, number_of_elements, data, position, context, depth)
        }
        TypeDef::Array(x) => {
            decode_elements_set(x.type_param.id, x.len, data, position, context, depth)
        }
        TypeDef::Tuple(x) => {
            let mut out = Vec::with_capacity(x.fields.len());
            for element in x.fields.iter() {
                out.push(decode_with_type(element.id, data, position, context, depth + 1)?);
            }
            Ok(DecodedValue::Tuple(out))
        }
        TypeDef::Primitive(x) => decode_type_def_primitive(x, data, position),
        TypeDef::Compact(x) => decode_compact(x.type_param.id, data, position, context, depth),
        TypeDef::BitSequence(_) => Err(MetadataError::UnsupportedType { id: ty_id }.into()),
    }
}

/// Decode `Option`, if the type has expected `None` and `Some` variants.
///
/// Returns `None` if the type is not an option after all.
fn decode_option(
    ty: &Type<PortableForm>,
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<Option<DecodedValue>, InspectError> {
    let variants = match &ty.type_def {
        TypeDef::Variant(x) => &x.variants,
        _ => return Ok(None),
    };
    let none = variants.iter().find(|v| v.name == NONE && v.fields.is_empty());
    let some = variants.iter().find(|v| v.name == SOME && v.fields.len() == 1);
    let (none, some) = match (none, some) {
        (Some(none), Some(some)) if variants.len() == 2 => (none, some),
        _ => return Ok(None),
    };
    let inner_ty_id = some.fields[0].ty.id;
    let option_position = *position;
    let index = read_byte(data, position)?;

    // `Option<bool>` is encoded as a single byte
    if let TypeDef::Primitive(TypeDefPrimitive::Bool) = context.resolve(inner_ty_id)?.type_def {
        return match index {
            0 => Ok(Some(DecodedValue::Option(None))),
            1 => Ok(Some(DecodedValue::Option(Some(Box::new(DecodedValue::Bool(true)))))),
            2 => Ok(Some(DecodedValue::Option(Some(Box::new(DecodedValue::Bool(false)))))),
            _ => Err(ParserError::UnexpectedEnumVariant {
                position: option_position,
            }
            .into()),
        };
    }

    if index == none.index {
        Ok(Some(DecodedValue::Option(None)))
    } else if index == some.index {
        let inner = decode_with_type(inner_ty_id, data, position, context, depth + 1)?;
        Ok(Some(DecodedValue::Option(Some(Box::new(inner)))))
    } else {
        Err(ParserError::UnexpectedEnumVariant {
            position: option_position,
        }
        .into())
    }
}

/// Decode set of identical elements, for sequences and arrays.
///
/// Sets of `u8` are collected into bytes. Sets of elements taking no data may
/// not announce more elements than the input length.
fn decode_elements_set(
    element_ty_id: u32,
    number_of_elements: u32,
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<DecodedValue, InspectError> {
    let element_ty = context.resolve(element_ty_id)?;
    if let TypeDef::Primitive(TypeDefPrimitive::U8) = element_ty.type_def {
        let slice = read_slice(data, position, number_of_elements as usize)?;
        return Ok(DecodedValue::Bytes(slice.to_vec()));
    }
    let mut out = Vec::new();
    let set_position = *position;
    for _ in 0..number_of_elements {
        let element_position = *position;
        let element = decode_with_type(element_ty_id, data, position, context, depth + 1)?;
        if *position == element_position {
            // element takes no data, all elements are the same
            if number_of_elements as usize > data.len() {
                return Err(ParserError::ZeroSizedElements {
                    position: set_position,
                    number_of_elements,
                }
                .into());
            }
            out.resize(number_of_elements as usize, element);
            break;
        }
        out.push(element);
    }
    Ok(DecodedValue::Sequence(out))
}

fn decode_compact(
    inner_ty_id: u32,
    data: &[u8],
    position: &mut usize,
    context: &Context,
    depth: u32,
) -> Result<DecodedValue, InspectError> {
    if depth > MAX_DEPTH {
        return Err(MetadataError::CyclicMetadata { id: inner_ty_id }.into());
    }
    let inner_ty = context.resolve(inner_ty_id)?;
    match &inner_ty.type_def {
        TypeDef::Primitive(
            TypeDefPrimitive::U8
            | TypeDefPrimitive::U16
            | TypeDefPrimitive::U32
            | TypeDefPrimitive::U64
            | TypeDefPrimitive::U128,
        ) => Ok(DecodedValue::Unsigned(get_compact::<u128>(data, position)?)),
        // compact of a wrapper, such as `Compact<Perbill>`
        TypeDef::Composite(x) if x.fields.len() == 1 => {
            decode_compact(x.fields[0].ty.id, data, position, context, depth + 1)
        }
        TypeDef::Tuple(x) if x.fields.is_empty() => Ok(DecodedValue::Tuple(Vec::new())),
        _ => Err(MetadataError::UnexpectedCompactInsides { id: inner_ty_id }.into()),
    }
}

macro_rules! decode_fixed {
    ($ty: ty, $data: expr, $position: expr) => {{
        let start = *$position;
        let slice = read_slice($data, $position, core::mem::size_of::<$ty>())?;
        <$ty>::decode(&mut &slice[..]).map_err(|_| ParserError::TypeFailure {
            position: start,
            ty: stringify!($ty),
        })?
    }};
}

fn decode_type_def_primitive(
    found_ty: &TypeDefPrimitive,
    data: &[u8],
    position: &mut usize,
) -> Result<DecodedValue, InspectError> {
    let start = *position;
    let value = match found_ty {
        TypeDefPrimitive::Bool => DecodedValue::Bool(decode_fixed!(bool, data, position)),
        TypeDefPrimitive::Char => {
            let code = decode_fixed!(u32, data, position);
            DecodedValue::Char(char::from_u32(code).ok_or(ParserError::TypeFailure {
                position: start,
                ty: "char",
            })?)
        }
        TypeDefPrimitive::Str => {
            let str_length = get_compact::<u32>(data, position)? as usize;
            let text_start = *position;
            let slice = read_slice(data, position, str_length)?;
            let text = String::from_utf8(slice.to_vec()).map_err(|_| ParserError::TypeFailure {
                position: text_start,
                ty: "str",
            })?;
            DecodedValue::Text(text)
        }
        TypeDefPrimitive::U8 => DecodedValue::Unsigned(decode_fixed!(u8, data, position) as u128),
        TypeDefPrimitive::U16 => DecodedValue::Unsigned(decode_fixed!(u16, data, position) as u128),
        TypeDefPrimitive::U32 => DecodedValue::Unsigned(decode_fixed!(u32, data, position) as u128),
        TypeDefPrimitive::U64 => DecodedValue::Unsigned(decode_fixed!(u64, data, position) as u128),
        TypeDefPrimitive::U128 => DecodedValue::Unsigned(decode_fixed!(u128, data, position)),
        TypeDefPrimitive::U256 => {
            DecodedValue::UnsignedBig(BigUint::from_bytes_le(read_slice(data, position, 32)?))
        }
        TypeDefPrimitive::I8 => DecodedValue::Signed(decode_fixed!(i8, data, position) as i128),
        TypeDefPrimitive::I16 => DecodedValue::Signed(decode_fixed!(i16, data, position) as i128),
        TypeDefPrimitive::I32 => DecodedValue::Signed(decode_fixed!(i32, data, position) as i128),
        TypeDefPrimitive::I64 => DecodedValue::Signed(decode_fixed!(i64, data, position) as i128),
        TypeDefPrimitive::I128 => DecodedValue::Signed(decode_fixed!(i128, data, position)),
        TypeDefPrimitive::I256 => {
            DecodedValue::SignedBig(BigInt::from_signed_bytes_le(read_slice(data, position, 32)?))
        }
    };
    Ok(value)
}

/// Type name for call argument without `type_name` in metadata.
fn describe_type(context: &Context, ty_id: u32, depth: u32) -> String {
    if depth > MAX_DEPTH {
        return String::from("Unknown");
    }
    let ty = match context.resolve(ty_id) {
        Ok(ty) => ty,
        Err(_) => return String::from("Unknown"),
    };
    if let Some(ident) = ty.path.segments.last() {
        return ident.to_string();
    }
    match &ty.type_def {
        TypeDef::Primitive(x) => String::from(primitive_name(x)),
        TypeDef::Compact(x) => format!("Compact<{}>", describe_type(context, x.type_param.id, depth + 1)),
        TypeDef::Sequence(x) => format!("Vec<{}>", describe_type(context, x.type_param.id, depth + 1)),
        TypeDef::Array(x) => format!("[{}; {}]", describe_type(context, x.type_param.id, depth + 1), x.len),
        TypeDef::Tuple(x) => format!(
            "({})",
            x.fields
                .iter()
                .map(|element| describe_type(context, element.id, depth + 1))
                .collect::<Vec<String>>()
                .join(", ")
        ),
        TypeDef::BitSequence(_) => String::from("BitVec"),
        TypeDef::Composite(_) | TypeDef::Variant(_) => String::from("Unknown"),
    }
}

fn primitive_name(primitive: &TypeDefPrimitive) -> &'static str {
    match primitive {
        TypeDefPrimitive::Bool => "bool",
        TypeDefPrimitive::Char => "char",
        TypeDefPrimitive::Str => "Text",
        TypeDefPrimitive::U8 => "u8",
        TypeDefPrimitive::U16 => "u16",
        TypeDefPrimitive::U32 => "u32",
        TypeDefPrimitive::U64 => "u64",
        TypeDefPrimitive::U128 => "u128",
        TypeDefPrimitive::U256 => "u256",
        TypeDefPrimitive::I8 => "i8",
        TypeDefPrimitive::I16 => "i16",
        TypeDefPrimitive::I32 => "i32",
        TypeDefPrimitive::I64 => "i64",
        TypeDefPrimitive::I128 => "i128",
        TypeDefPrimitive::I256 => "i256",
    }
}

pub(crate) fn read_slice<'a>(
    data: &'a [u8],
    position: &mut usize,
    slice_len: usize,
) -> Result<&'a [u8], ParserError> {
    match data.get(*position..*position + slice_len) {
        Some(slice) => {
            *position += slice_len;
            Ok(slice)
        }
        None => Err(ParserError::DataTooShort {
            position: *position,
            minimal_length: slice_len,
        }),
    }
}

pub(crate) fn read_byte(data: &[u8], position: &mut usize) -> Result<u8, ParserError> {
    Ok(read_slice(data, position, 1)?[0])
}
