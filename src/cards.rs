//! Flat cards to display inspected call and its extensions.
//!
//! Cards are formatted elements with indent, that could be printed or
//! otherwise displayed to user.
use num_bigint::{BigInt, BigUint};
use primitive_types::H256;

use crate::additional_types::Era;
use crate::error::InspectError;
use crate::extract::{extract, ExtractOptions, Extracted};
use crate::printing_balance::{AsBalance, Currency};
use crate::registry::{BalanceCallRegistry, DisplayOverride};
use crate::source::{CallSource, DecodedValue, FieldValue, Method};
use crate::std::{
    borrow::ToOwned,
    string::{String, ToString},
    vec::Vec,
};
use crate::ShortSpecs;

/// Static display rows, shown only when the value is present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallExtras {
    /// Transaction lifetime, as displayed text.
    pub mortality: Option<String>,

    /// Tip, in minimal chain units.
    pub tip: Option<u128>,
}

impl CallExtras {
    /// Extras of a signed extrinsic.
    ///
    /// Mortal era needs `current_block` to be displayed. Bare calls and
    /// unsigned extrinsics have no extras.
    pub fn from_source(source: &CallSource, current_block: Option<u64>) -> Self {
        let signature = match source {
            CallSource::SignedExtrinsic(extrinsic) => match extrinsic.signature {
                Some(ref signature) => signature,
                None => return Self::default(),
            },
            CallSource::UnsignedMethod(_) => return Self::default(),
        };
        let mortality = match (signature.era, current_block) {
            (Some(Era::Immortal), _) => Some(Era::Immortal.mortality(0)),
            (Some(era), Some(current_block)) => Some(era.mortality(current_block)),
            _ => None,
        };
        Self {
            mortality,
            tip: signature.tip,
        }
    }
}

/// Inspected call, ready to be displayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallDisplay {
    /// Call name, `Pallet.call`, if the call is described.
    pub call_name: Option<String>,
    pub extracted: Extracted,

    /// Label for the hash row.
    pub hash_label: String,
    pub extras: CallExtras,
}

impl CallDisplay {
    pub fn new<F>(
        source: &CallSource,
        options: ExtractOptions,
        hash_label: &str,
        extras: CallExtras,
        registry: &BalanceCallRegistry,
        on_error: F,
    ) -> Self
    where
        F: FnMut(&InspectError),
    {
        let call_name = source.method().call_name();
        let extracted = extract(source, options, call_name.as_deref(), registry, on_error);
        Self {
            call_name,
            extracted,
            hash_label: hash_label.to_string(),
            extras,
        }
    }

    pub fn card(&self, short_specs: &ShortSpecs) -> Vec<ExtendedCard> {
        let mut out = Vec::new();
        let mut indent = 0;
        if let Some(ref call_name) = self.call_name {
            out.push(ExtendedCard {
                parser_card: ParserCard::CallName(call_name.to_owned()),
                indent,
            });
            indent += 1;
        }
        for (i, (param, param_value)) in self
            .extracted
            .params
            .iter()
            .zip(self.extracted.values.iter())
            .enumerate()
        {
            out.push(ExtendedCard {
                parser_card: ParserCard::Param {
                    name: param.name.to_owned(),
                    type_name: param.type_def.type_name.to_owned(),
                },
                indent,
            });
            let display_balance = self
                .extracted
                .overrides
                .as_ref()
                .and_then(|overrides| overrides.at(i))
                == Some(DisplayOverride::Balance);
            out.extend(value_cards(
                &param_value.value,
                indent + 1,
                display_balance,
                short_specs,
            ));
        }
        if let Some(ref hash) = self.extracted.hash {
            out.push(ExtendedCard {
                parser_card: ParserCard::Hash {
                    label: self.hash_label.to_owned(),
                    value: hash.to_owned(),
                },
                indent: 0,
            });
        }
        if let Some(ref signature) = self.extracted.signature {
            out.push(ExtendedCard {
                parser_card: ParserCard::Signature {
                    scheme: self.extracted.signature_type.to_owned(),
                    value: signature.to_owned(),
                },
                indent: 0,
            });
        }
        if let Some(ref mortality) = self.extras.mortality {
            out.push(ExtendedCard {
                parser_card: ParserCard::Mortality(mortality.to_owned()),
                indent: 0,
            });
        }
        if let Some(tip) = self.extras.tip {
            out.push(ExtendedCard {
                parser_card: ParserCard::Tip(u128::convert_balance_pretty(
                    tip,
                    short_specs.decimals,
                    &short_specs.unit,
                )),
                indent: 0,
            });
        }
        out
    }

    pub fn show(&self, short_specs: &ShortSpecs) -> String {
        self.card(short_specs)
            .iter()
            .map(|card| card.show())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Card with display indent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedCard {
    pub parser_card: ParserCard,
    pub indent: u32,
}

impl ExtendedCard {
    pub fn show(&self) -> String {
        let (card_type, card_payload) = self.parser_card.readable_parts();
        readable(self.indent, card_type, &card_payload)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParserCard {
    Balance(Currency),
    CallName(String),
    EnumVariantName(String),
    Era(Era),
    FieldName(String),
    FieldNumber(usize),
    H256(H256),
    Hash { label: String, value: String },
    Id(String),
    Mortality(String),
    None,
    Param { name: String, type_name: String },
    PrimitiveBool(bool),
    PrimitiveChar(char),
    PrimitiveSigned(i128),
    PrimitiveSignedBig(BigInt),
    PrimitiveUnsigned(u128),
    PrimitiveUnsignedBig(BigUint),
    SequenceAnnounced(usize),
    SequenceU8 { hex: String, text: Option<String> },
    Signature { scheme: Option<String>, value: String },
    Text(String),
    Tip(Currency),
    UnknownCall,
}

impl ParserCard {
    fn readable_parts(&self) -> (&str, String) {
        match self {
            ParserCard::Balance(a) => ("balance", a.show()),
            ParserCard::CallName(a) => ("call", a.to_owned()),
            ParserCard::EnumVariantName(a) => ("enum_variant_name", a.to_owned()),
            ParserCard::Era(Era::Immortal) => ("era", String::from("immortal")),
            ParserCard::Era(Era::Mortal(period, phase)) => {
                ("era", format!("mortal, phase: {phase}, period: {period}"))
            }
            ParserCard::FieldName(a) => ("field_name", a.to_owned()),
            ParserCard::FieldNumber(a) => ("field_number", a.to_string()),
            ParserCard::H256(a) => ("h256", format!("0x{}", hex::encode(a.0))),
            ParserCard::Hash { label, value } => (label.as_str(), value.to_owned()),
            ParserCard::Id(a) => ("id", a.to_owned()),
            ParserCard::Mortality(a) => ("lifetime", a.to_owned()),
            ParserCard::None => ("none", String::new()),
            ParserCard::Param { name, type_name } => ("param", format!("{name}: {type_name}")),
            ParserCard::PrimitiveBool(a) => ("bool", a.to_string()),
            ParserCard::PrimitiveChar(a) => ("char", a.to_string()),
            ParserCard::PrimitiveSigned(a) => ("signed", a.to_string()),
            ParserCard::PrimitiveSignedBig(a) => ("signed", a.to_string()),
            ParserCard::PrimitiveUnsigned(a) => ("unsigned", a.to_string()),
            ParserCard::PrimitiveUnsignedBig(a) => ("unsigned", a.to_string()),
            ParserCard::SequenceAnnounced(a) => ("sequence", format!("{a} element(s)")),
            ParserCard::SequenceU8 { hex, text } => match text {
                Some(valid_text) => ("text", valid_text.to_owned()),
                None => ("bytes", hex.to_owned()),
            },
            ParserCard::Signature { scheme, value } => match scheme {
                Some(scheme) => ("signature", format!("{scheme} {value}")),
                None => ("signature", value.to_owned()),
            },
            ParserCard::Text(a) => ("text", a.to_owned()),
            ParserCard::Tip(a) => ("tip", a.show()),
            ParserCard::UnknownCall => ("call", String::from("unknown")),
        }
    }
}

/// Cards for a decoded value.
///
/// `display_balance` marks unsigned integers to be displayed as currency. It
/// passes through options, but not into composites and sequences.
pub fn value_cards(
    value: &DecodedValue,
    indent: u32,
    display_balance: bool,
    short_specs: &ShortSpecs,
) -> Vec<ExtendedCard> {
    let single = |parser_card| {
        vec![ExtendedCard {
            parser_card,
            indent,
        }]
    };
    match value {
        DecodedValue::Bool(a) => single(ParserCard::PrimitiveBool(*a)),
        DecodedValue::Bytes(a) => single(ParserCard::SequenceU8 {
            hex: hex::encode(a),
            text: String::from_utf8(a.to_owned()).ok(),
        }),
        DecodedValue::Call(method) => method_cards(method, indent, short_specs),
        DecodedValue::Char(a) => single(ParserCard::PrimitiveChar(*a)),
        DecodedValue::Composite(fields) => fields_cards(fields, indent, short_specs),
        DecodedValue::Era(a) => single(ParserCard::Era(*a)),
        DecodedValue::H256(a) => single(ParserCard::H256(*a)),
        DecodedValue::Id(a) => single(ParserCard::Id(a.as_base58(short_specs.base58prefix))),
        DecodedValue::Option(None) => single(ParserCard::None),
        DecodedValue::Option(Some(a)) => value_cards(a, indent, display_balance, short_specs),
        DecodedValue::Sequence(elements) => {
            let mut out = single(ParserCard::SequenceAnnounced(elements.len()));
            for element in elements.iter() {
                out.extend(value_cards(element, indent + 1, false, short_specs));
            }
            out
        }
        DecodedValue::Signed(a) => single(ParserCard::PrimitiveSigned(*a)),
        DecodedValue::SignedBig(a) => single(ParserCard::PrimitiveSignedBig(a.to_owned())),
        DecodedValue::Text(a) => single(ParserCard::Text(a.to_owned())),
        DecodedValue::Tuple(elements) => {
            let mut out = Vec::new();
            for (i, element) in elements.iter().enumerate() {
                out.push(ExtendedCard {
                    parser_card: ParserCard::FieldNumber(i),
                    indent,
                });
                out.extend(value_cards(element, indent + 1, false, short_specs));
            }
            out
        }
        DecodedValue::Unsigned(a) => {
            if display_balance {
                single(ParserCard::Balance(u128::convert_balance_pretty(
                    *a,
                    short_specs.decimals,
                    &short_specs.unit,
                )))
            } else {
                single(ParserCard::PrimitiveUnsigned(*a))
            }
        }
        DecodedValue::UnsignedBig(a) => single(ParserCard::PrimitiveUnsignedBig(a.to_owned())),
        DecodedValue::Variant(variant) => {
            let mut out = single(ParserCard::EnumVariantName(variant.name.to_owned()));
            out.extend(fields_cards(&variant.fields, indent + 1, short_specs));
            out
        }
    }
}

fn fields_cards(fields: &[FieldValue], indent: u32, short_specs: &ShortSpecs) -> Vec<ExtendedCard> {
    let mut out = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let parser_card = match field.name {
            Some(ref name) => ParserCard::FieldName(name.to_owned()),
            None => ParserCard::FieldNumber(i),
        };
        out.push(ExtendedCard {
            parser_card,
            indent,
        });
        out.extend(value_cards(&field.value, indent + 1, false, short_specs));
    }
    out
}

/// Cards for a nested call, such as the ones in `Utility.batch`.
fn method_cards(method: &Method, indent: u32, short_specs: &ShortSpecs) -> Vec<ExtendedCard> {
    let mut out = Vec::new();
    match method.meta {
        Ok(ref meta) => {
            out.push(ExtendedCard {
                parser_card: ParserCard::CallName(meta.call_name()),
                indent,
            });
            for (arg, value) in meta.args.iter().zip(method.values.iter()) {
                out.push(ExtendedCard {
                    parser_card: ParserCard::FieldName(arg.name.to_owned()),
                    indent: indent + 1,
                });
                out.extend(value_cards(value, indent + 2, false, short_specs));
            }
        }
        Err(_) => {
            out.push(ExtendedCard {
                parser_card: ParserCard::UnknownCall,
                indent,
            });
            for (i, value) in method.values.iter().enumerate() {
                out.push(ExtendedCard {
                    parser_card: ParserCard::FieldNumber(i),
                    indent: indent + 1,
                });
                out.extend(value_cards(value, indent + 2, false, short_specs));
            }
        }
    }
    out
}

fn readable(indent: u32, card_type: &str, card_payload: &str) -> String {
    format!(
        "{}{}: {}",
        "  ".repeat(indent as usize),
        card_type,
        card_payload
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::additional_types::AccountId32;
    use crate::registry::ComponentOverrides;
    use crate::source::{ArgDef, CallMeta, Extrinsic, ExtrinsicSignature, RawSignature};

    fn specs() -> ShortSpecs {
        ShortSpecs {
            base58prefix: 42,
            decimals: 12,
            unit: String::from("WND"),
        }
    }

    fn transfer() -> Method {
        Method::new(
            CallMeta {
                pallet: String::from("Balances"),
                call: String::from("transfer_keep_alive"),
                args: vec![
                    ArgDef {
                        name: String::from("dest"),
                        type_name: String::from("AccountIdLookupOf<T>"),
                    },
                    ArgDef {
                        name: String::from("value"),
                        type_name: String::from("Compact<T::Balance>"),
                    },
                ],
                docs: String::new(),
            },
            vec![
                DecodedValue::Id(AccountId32([0; 32])),
                DecodedValue::Unsigned(1_061_900_000_000),
            ],
            vec![4, 3],
        )
    }

    #[test]
    fn balance_at_overridden_position() {
        let source = CallSource::from(transfer());
        let display = CallDisplay::new(
            &source,
            ExtractOptions::default(),
            "call_hash",
            CallExtras::default(),
            &BalanceCallRegistry::default(),
            |_| panic!("no errors expected"),
        );
        assert_eq!(
            display.extracted.overrides,
            Some(ComponentOverrides::balance_at(&[1]))
        );
        let shown = display.show(&specs());
        assert!(shown.starts_with("call: Balances.transfer_keep_alive\n  param: dest: AccountIdLookupOf<T>\n    id: 5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM"));
        assert!(shown.ends_with("  param: value: Compact<T::Balance>\n    balance: 1.061900000000 WND"));
    }

    #[test]
    fn no_balance_without_override() {
        let source = CallSource::from(transfer());
        let display = CallDisplay::new(
            &source,
            ExtractOptions::default(),
            "call_hash",
            CallExtras::default(),
            &BalanceCallRegistry::empty(),
            |_| panic!("no errors expected"),
        );
        assert!(display.show(&specs()).ends_with("    unsigned: 1061900000000"));
    }

    #[test]
    fn static_rows() {
        let source = CallSource::from(Extrinsic {
            method: transfer(),
            signature: Some(ExtrinsicSignature {
                signer: DecodedValue::Id(AccountId32([0; 32])),
                signature: vec![7u8; 64],
                raw: Some(RawSignature::Tagged {
                    tag: String::from("Sr25519"),
                    bytes: vec![7u8; 64],
                }),
                era: Some(Era::Mortal(64, 27)),
                nonce: Some(3),
                tip: Some(500),
            }),
            encoded: vec![0; 8],
        });
        let extras = CallExtras::from_source(&source, Some(1000));
        assert_eq!(
            extras,
            CallExtras {
                mortality: Some(String::from("mortal, valid from #987 to #1,051")),
                tip: Some(500),
            }
        );
        let display = CallDisplay::new(
            &source,
            ExtractOptions {
                with_hash: true,
                with_signature: true,
            },
            "extrinsic_hash",
            extras,
            &BalanceCallRegistry::default(),
            |_| panic!("no errors expected"),
        );
        let cards = display.card(&specs());
        let static_rows: Vec<String> = cards
            .iter()
            .filter(|card| card.indent == 0)
            .skip(1)
            .map(|card| card.show())
            .collect();
        assert_eq!(static_rows.len(), 4);
        assert!(static_rows[0].starts_with("extrinsic_hash: 0x"));
        assert_eq!(
            static_rows[1],
            format!("signature: Sr25519 0x{}", hex::encode([7u8; 64]))
        );
        assert_eq!(static_rows[2], "lifetime: mortal, valid from #987 to #1,051");
        assert_eq!(static_rows[3], "tip: 500 pWND");
    }

    #[test]
    fn no_static_rows_for_bare_call() {
        let source = CallSource::from(transfer());
        assert_eq!(CallExtras::from_source(&source, Some(1000)), CallExtras::default());
        let display = CallDisplay::new(
            &source,
            ExtractOptions::default(),
            "call_hash",
            CallExtras::default(),
            &BalanceCallRegistry::default(),
            |_| panic!("no errors expected"),
        );
        assert_eq!(display.card(&specs()).len(), 5);
    }

    #[test]
    fn bytes_as_text() {
        let cards = value_cards(
            &DecodedValue::Bytes(b"hello".to_vec()),
            0,
            false,
            &specs(),
        );
        assert_eq!(cards[0].show(), "text: hello");
        let cards = value_cards(&DecodedValue::Bytes(vec![0xff, 0xfe]), 0, false, &specs());
        assert_eq!(cards[0].show(), "bytes: fffe");
    }
}
