//! Known balance calls.
//!
//! Some call arguments are plain unsigned integers in metadata, but are
//! actually currency amounts. Registry maps call name (`Pallet.call`) onto
//! the argument positions to be displayed as balance, with chain decimals and
//! units.
//!
//! Registry is a configuration value: it is built once, then passed by
//! reference into extraction.
use parity_scale_codec::{Decode, Encode};

use crate::std::{
    collections::btree_map::BTreeMap,
    string::{String, ToString},
};

/// Display override for a call argument.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq)]
pub enum DisplayOverride {
    Balance,
}

/// Argument position to display override.
#[derive(Clone, Debug, Decode, Default, Encode, Eq, PartialEq)]
pub struct ComponentOverrides(pub BTreeMap<u32, DisplayOverride>);

impl ComponentOverrides {
    /// Overrides with balance display at given argument positions.
    pub fn balance_at(positions: &[u32]) -> Self {
        Self(
            positions
                .iter()
                .map(|position| (*position, DisplayOverride::Balance))
                .collect(),
        )
    }

    pub fn at(&self, position: usize) -> Option<DisplayOverride> {
        u32::try_from(position)
            .ok()
            .and_then(|position| self.0.get(&position).copied())
    }
}

/// Balance calls known to the deployment.
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq)]
pub struct BalanceCallRegistry {
    entries: BTreeMap<String, ComponentOverrides>,
}

/// Balance calls with balance argument positions, used in
/// [`BalanceCallRegistry::default`].
pub const KNOWN_BALANCE_CALLS: &[(&str, &[u32])] = &[
    ("Balances.force_transfer", &[2]),
    ("Balances.transfer", &[1]),
    ("Balances.transfer_allow_death", &[1]),
    ("Balances.transfer_keep_alive", &[1]),
    ("ConvictionVoting.delegate", &[3]),
    ("Democracy.propose", &[1]),
    ("Staking.bond", &[0]),
    ("Staking.bond_extra", &[0]),
    ("Staking.rebond", &[0]),
    ("Staking.unbond", &[0]),
    ("Treasury.propose_spend", &[0]),
    ("Treasury.spend_local", &[0]),
];

impl BalanceCallRegistry {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ComponentOverrides)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, overrides)| (name.into(), overrides))
                .collect(),
        }
    }

    /// Registry with no entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, call_name: &str) -> Option<&ComponentOverrides> {
        self.entries.get(call_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BalanceCallRegistry {
    fn default() -> Self {
        Self::new(
            KNOWN_BALANCE_CALLS
                .iter()
                .map(|(name, positions)| (name.to_string(), ComponentOverrides::balance_at(positions))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry() {
        let registry = BalanceCallRegistry::default();
        assert_eq!(registry.len(), KNOWN_BALANCE_CALLS.len());
        let overrides = registry.get("Balances.transfer_keep_alive").unwrap();
        assert_eq!(overrides.at(1), Some(DisplayOverride::Balance));
        assert_eq!(overrides.at(0), None);
        assert!(registry.get("System.remark").is_none());
    }

    #[test]
    fn registry_as_config() {
        let registry = BalanceCallRegistry::new([(
            "Assets.transfer",
            ComponentOverrides::balance_at(&[2]),
        )]);
        let encoded = registry.encode();
        let decoded = BalanceCallRegistry::decode(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, registry);
        assert!(decoded.get("Balances.transfer").is_none());
    }
}
