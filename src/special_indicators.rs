//! Special decoding triggers and indicators.
//!
//! Although the [`RuntimeMetadataV14`](frame_metadata::v14::RuntimeMetadataV14)
//! has all sufficient data to decode the data for a known type, some types
//! are better decoded directly as the custom type mentioned in metadata
//! descriptors, rather than decoded as more generalized type, so that they
//! could be displayed properly.
use scale_info::{form::PortableForm, Path};

/// [`Type`](scale_info::Type)-associated [`Path`] `ident` for
/// `sp_core::crypto::AccountId32`.
pub const ACCOUNT_ID32: &str = "AccountId32";

/// [`Type`](scale_info::Type)-associated [`Path`] `ident` for
/// `sp_runtime::generic::Era`.
pub const ERA: &str = "Era";

/// [`Type`](scale_info::Type)-associated [`Path`] `ident` for
/// `primitive_types::H256`.
pub const H256: &str = "H256";

/// [`Type`](scale_info::Type)-associated [`Path`] `ident` indicating that the
/// data to follow *may* be an option.
pub const OPTION: &str = "Option";

/// [`Variant`](scale_info::Variant) name `None` that must be found for type to
/// be processed as `Option`.
pub const NONE: &str = "None";

/// [`Variant`](scale_info::Variant) name `Some` that must be found for type to
/// be processed as `Option`.
pub const SOME: &str = "Some";

/// Type parameter name of unchecked extrinsic type for signer address.
pub const EXTRINSIC_ADDRESS: &str = "Address";

/// Type parameter name of unchecked extrinsic type for call.
pub const EXTRINSIC_CALL: &str = "Call";

/// Type parameter name of unchecked extrinsic type for signature.
pub const EXTRINSIC_SIGNATURE: &str = "Signature";

/// Extensions `identifier` from
/// [`SignedExtensionMetadata`](frame_metadata::v14::SignedExtensionMetadata)
/// for `Era`.
pub const CHECK_MORTALITY: &str = "CheckMortality";

/// Extensions `identifier` for nonce.
pub const CHECK_NONCE: &str = "CheckNonce";

/// Extensions `identifier` for transaction tip.
pub const CHARGE_TRANSACTION_PAYMENT: &str = "ChargeTransactionPayment";

/// Extensions `identifier` for transaction tip, in chains paying fees in
/// assets.
pub const CHARGE_ASSET_TX_PAYMENT: &str = "ChargeAssetTxPayment";

/// Specialty found from `path` of the [`Type`](scale_info::Type).
///
/// Allows to decode data as as custom known types and to display data better.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecialtyTypeHinted {
    None,
    AccountId32,
    Era,
    H256,
    Option,
}

impl SpecialtyTypeHinted {
    pub fn from_path(path: &Path<PortableForm>) -> Self {
        match path.segments.last() {
            Some(a) => match a.as_str() {
                ACCOUNT_ID32 => Self::AccountId32,
                ERA => Self::Era,
                H256 => Self::H256,
                OPTION => Self::Option,
                _ => Self::None,
            },
            None => Self::None,
        }
    }
}

/// Signed extension with value to be displayed for the extrinsic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignedExtensionHint {
    None,
    Mortality,
    Nonce,
    Tip,
}

impl SignedExtensionHint {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            CHECK_MORTALITY => Self::Mortality,
            CHECK_NONCE => Self::Nonce,
            CHARGE_TRANSACTION_PAYMENT | CHARGE_ASSET_TX_PAYMENT => Self::Tip,
            _ => Self::None,
        }
    }
}
