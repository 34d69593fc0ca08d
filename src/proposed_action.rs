//! Display of a governance proposal that may or may not have its call known.
use crate::cards::{CallDisplay, CallExtras};
use crate::error::InspectError;
use crate::extract::ExtractOptions;
use crate::printing_balance::format_number;
use crate::registry::BalanceCallRegistry;
use crate::source::CallSource;
use crate::std::{
    borrow::ToOwned,
    string::{String, ToString},
};
use crate::ShortSpecs;

/// Message for proposals with unknown call.
pub const NO_DETAILS: &str = "No execution details available for this proposal";

/// Proposal identifier, as displayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposalId {
    Number(u128),
    Text(String),
}

impl ProposalId {
    /// Numbers get thousands grouping, text is shown unchanged.
    pub fn show(&self) -> String {
        match self {
            ProposalId::Number(a) => format_number(*a),
            ProposalId::Text(a) => a.to_owned(),
        }
    }
}

impl From<u128> for ProposalId {
    fn from(number: u128) -> Self {
        ProposalId::Number(number)
    }
}

impl From<u32> for ProposalId {
    fn from(number: u32) -> Self {
        ProposalId::Number(number as u128)
    }
}

impl From<&str> for ProposalId {
    fn from(text: &str) -> Self {
        ProposalId::Text(text.to_string())
    }
}

impl From<String> for ProposalId {
    fn from(text: String) -> Self {
        ProposalId::Text(text)
    }
}

/// Proposal display: either a placeholder text, or the inspected call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProposedAction {
    Placeholder(String),
    Call(CallDisplay),
}

impl ProposedAction {
    pub fn show(&self, short_specs: &ShortSpecs) -> String {
        match self {
            ProposedAction::Placeholder(a) => a.to_owned(),
            ProposedAction::Call(call_display) => call_display.show(short_specs),
        }
    }
}

/// Compose proposal display.
///
/// Known proposal call is always displayed with its hash, labelled with
/// `hash_label`, and never with signature.
pub fn proposed_action<F>(
    proposal: Option<&CallSource>,
    id: Option<&ProposalId>,
    hash_label: &str,
    registry: &BalanceCallRegistry,
    on_error: F,
) -> ProposedAction
where
    F: FnMut(&InspectError),
{
    match proposal {
        Some(source) => ProposedAction::Call(CallDisplay::new(
            source,
            ExtractOptions {
                with_hash: true,
                with_signature: false,
            },
            hash_label,
            CallExtras::default(),
            registry,
            on_error,
        )),
        None => match id {
            Some(id) => ProposedAction::Placeholder(format!("#{}: {NO_DETAILS}", id.show())),
            None => ProposedAction::Placeholder(NO_DETAILS.to_string()),
        },
    }
}
