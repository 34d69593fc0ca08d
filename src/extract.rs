//! Display-ready summary of an inspected call.
//!
//! [`extract`] never fails: if the call can not be described, the summary has
//! no parameters and the error goes into `on_error` callback.
use crate::error::InspectError;
use crate::registry::{BalanceCallRegistry, ComponentOverrides};
use crate::source::{CallSource, DecodedValue};
use crate::std::{borrow::ToOwned, string::String, vec::Vec};
use crate::type_descriptor::{parse_type_descriptor, TypeDescriptor};

/// What to include into [`Extracted`] besides parameters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExtractOptions {
    pub with_hash: bool,
    pub with_signature: bool,
}

/// Declared call parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_def: TypeDescriptor,
}

/// Actual call argument value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamValue {
    /// Argument validity. No check currently produces invalid values.
    pub is_valid: bool,
    pub value: DecodedValue,
}

/// Summary of an inspected call.
///
/// `params` and `values` always have the same length, `params[i]` describes
/// `values[i]`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extracted {
    /// Hexadecimal `0x`-prefixed content hash, if requested.
    pub hash: Option<String>,

    /// Display overrides, if the call is a known balance call.
    pub overrides: Option<ComponentOverrides>,
    pub params: Vec<Param>,

    /// Hexadecimal `0x`-prefixed signature, if requested and the source is a
    /// signed extrinsic.
    pub signature: Option<String>,

    /// Signature scheme, if signature wrapper is tagged.
    pub signature_type: Option<String>,
    pub values: Vec<ParamValue>,
}

/// Extract display-ready summary from the call source.
///
/// `call_name` is the `Pallet.call` name used to look up the balance call
/// `registry`.
pub fn extract<F>(
    source: &CallSource,
    options: ExtractOptions,
    call_name: Option<&str>,
    registry: &BalanceCallRegistry,
    mut on_error: F,
) -> Extracted
where
    F: FnMut(&InspectError),
{
    let overrides = call_name.and_then(|name| registry.get(name)).cloned();

    let (params, values) = match params_and_values(source) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("call parameters unavailable: {e}");
            on_error(&e);
            (Vec::new(), Vec::new())
        }
    };

    let hash = if options.with_hash {
        Some(format!("0x{}", hex::encode(source.hash().0)))
    } else {
        None
    };

    let (signature, signature_type) = match source {
        CallSource::SignedExtrinsic(extrinsic) if options.with_signature => {
            match extrinsic.signature {
                Some(ref extrinsic_signature) => (
                    Some(format!("0x{}", hex::encode(&extrinsic_signature.signature))),
                    extrinsic_signature
                        .raw
                        .as_ref()
                        .and_then(|raw| raw.tag())
                        .map(String::from),
                ),
                None => (None, None),
            }
        }
        _ => (None, None),
    };

    Extracted {
        hash,
        overrides,
        params,
        signature,
        signature_type,
        values,
    }
}

fn params_and_values(source: &CallSource) -> Result<(Vec<Param>, Vec<ParamValue>), InspectError> {
    let method = source.method();
    let meta = method.meta.as_ref().map_err(|e| e.clone())?;
    if meta.args.len() != method.values.len() {
        return Err(InspectError::ArgumentCountMismatch {
            declared: meta.args.len(),
            supplied: method.values.len(),
        });
    }
    let mut params = Vec::with_capacity(meta.args.len());
    for arg in meta.args.iter() {
        let type_def =
            parse_type_descriptor(&arg.type_name).map_err(|error| InspectError::TypeDescriptor {
                arg_name: arg.name.to_owned(),
                error,
            })?;
        params.push(Param {
            name: arg.name.to_owned(),
            type_def,
        });
    }
    let values = method
        .values
        .iter()
        .map(|value| ParamValue {
            is_valid: true,
            value: value.to_owned(),
        })
        .collect();
    Ok((params, values))
}

/// Inputs of the last extraction.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Inputs {
    source: CallSource,
    options: ExtractOptions,
    call_name: Option<String>,
}

/// Holds the last extraction result for repeated display.
///
/// Result is recomputed in full whenever any input changes, and reused
/// otherwise.
#[derive(Clone, Debug)]
pub struct Inspector {
    registry: BalanceCallRegistry,
    last: Option<(Inputs, Extracted)>,
}

impl Inspector {
    pub fn new(registry: BalanceCallRegistry) -> Self {
        Self {
            registry,
            last: None,
        }
    }

    pub fn registry(&self) -> &BalanceCallRegistry {
        &self.registry
    }

    /// Summary for given inputs. `on_error` is called only on recomputation.
    pub fn inspect<F>(
        &mut self,
        source: &CallSource,
        options: ExtractOptions,
        call_name: Option<&str>,
        on_error: F,
    ) -> &Extracted
    where
        F: FnMut(&InspectError),
    {
        let unchanged = match self.last {
            Some((ref inputs, _)) => {
                &inputs.source == source
                    && inputs.options == options
                    && inputs.call_name.as_deref() == call_name
            }
            None => false,
        };
        if !unchanged {
            self.last = None;
        }
        let registry = &self.registry;
        let (_, extracted) = self.last.get_or_insert_with(|| {
            log::debug!("inputs changed, extracting call summary");
            let extracted = extract(source, options, call_name, registry, on_error);
            let inputs = Inputs {
                source: source.to_owned(),
                options,
                call_name: call_name.map(String::from),
            };
            (inputs, extracted)
        });
        extracted
    }

    /// Last extraction result, if any.
    pub fn last(&self) -> Option<&Extracted> {
        self.last.as_ref().map(|(_, extracted)| extracted)
    }
}
