//! This crate inspects Substrate calls and extrinsics and prepares them for
//! display: ordered call parameters with parsed type descriptors, aligned
//! argument values, optional content hash, optional signature with signature
//! scheme, and display overrides for known balance-bearing calls.
//!
//! Currently only the `RuntimeMetadata` version `V14` is supported for the
//! chain metadata, as only the `V14` has conveniently in-built types database
//! in it, thus allowing to track types using metadata itself without any
//! additional information.
//!
//! # Assumptions
//!
//! Chain data is [SCALE-encoded](https://docs.substrate.io/reference/scale-codec/).
//! Data blobs entering decoder are expected to be decoded completely: all
//! provided `&[u8]` data must be used in decoding with no data remaining
//! unparsed.
//!
//! # Layers
//!
//! Decoding of calls and unchecked extrinsics with metadata is done in
//! [`decoding_sci`] and [`unchecked_extrinsic`] modules, and results in
//! [`CallSource`]. Whether the source is an extrinsic or a bare call is
//! decided once, at decoding.
//!
//! Extraction, [`extract`], turns the [`CallSource`] into display-ready
//! [`Extracted`] summary. Extraction never fails: call that could not be
//! described gets no parameters, and the error is reported into caller-provided
//! callback.
//!
//! Extracted summary gets carded in [`cards`]. Cards are **flat** formatted
//! elements that could be printed or otherwise displayed to user. Argument
//! positions marked in [`BalanceCallRegistry`] are displayed as currency, with
//! chain decimals and units from [`ShortSpecs`].
//!
//! Governance proposals, that may or may not have the call known, are
//! displayed with [`proposed_action`].
//!
//! # Features
//!
//! Crate supports `no_std` in `default-features = false` mode.
//!
//! # Examples
//!```
//! use call_inspector::{
//!     proposed_action, BalanceCallRegistry, ProposalId, ProposedAction, NO_DETAILS,
//! };
//!
//! // Proposal with unknown call gets a placeholder
//! let action = proposed_action(
//!     None,
//!     Some(&ProposalId::from(1234u32)),
//!     "proposal_hash",
//!     &BalanceCallRegistry::default(),
//!     |_| {},
//! );
//! assert_eq!(
//!     action,
//!     ProposedAction::Placeholder(format!("#1,234: {NO_DETAILS}"))
//! );
//!```
#![no_std]
#![deny(unused_crate_dependencies)]

use parity_scale_codec::{Decode, Encode};

pub mod additional_types;
pub mod cards;
pub mod compacts;
pub mod decoding_sci;
pub mod error;
pub mod extract;
pub mod printing_balance;
pub mod proposed_action;
pub mod registry;
pub mod source;
pub mod special_indicators;
pub mod type_descriptor;
pub mod unchecked_extrinsic;


#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate alloc as std;

use crate::std::string::String;

pub use cards::{CallDisplay, CallExtras, ExtendedCard, ParserCard};
pub use decoding_sci::{call_meta, decode_all_as_call, decode_as_call};
pub use error::{InspectError, MetadataError, ParserError, TypeDescriptorError};
pub use extract::{extract, ExtractOptions, Extracted, Inspector, Param, ParamValue};
pub use proposed_action::{proposed_action, ProposalId, ProposedAction, NO_DETAILS};
pub use registry::{BalanceCallRegistry, ComponentOverrides, DisplayOverride};
pub use source::{CallSource, DecodedValue, Extrinsic, Method};
pub use type_descriptor::{parse_type_descriptor, TypeDescriptor, TypeInfo};
pub use unchecked_extrinsic::decode_as_unchecked_extrinsic;

/// Chain display specs: address format, balance decimals and units.
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq)]
pub struct ShortSpecs {
    pub base58prefix: u16,
    pub decimals: u8,
    pub unit: String,
}
