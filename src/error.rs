//! Errors.
use crate::std::string::String;

#[cfg(feature = "std")]
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[cfg(not(feature = "std"))]
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Errors in call inspection.
///
/// Extraction itself never returns these: it reports them through the
/// caller-supplied error callback and degrades the extracted data instead.
/// Decoding functions return them directly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InspectError {
    ArgumentCountMismatch { declared: usize, supplied: usize },
    Metadata(MetadataError),
    NoCallMetadata,
    Parsing(ParserError),
    TypeDescriptor { arg_name: String, error: TypeDescriptorError },
    VersionMismatch { version_byte: u8, version: u8 },
}

impl InspectError {
    fn error_text(&self) -> String {
        match &self {
            InspectError::ArgumentCountMismatch { declared, supplied } => format!("Call declares {declared} argument(s), but {supplied} value(s) were supplied."),
            InspectError::Metadata(metadata_error) => format!("Metadata error. {metadata_error}"),
            InspectError::NoCallMetadata => String::from("No call metadata available to describe the call arguments."),
            InspectError::Parsing(parser_error) => format!("Parsing error. {parser_error}"),
            InspectError::TypeDescriptor { arg_name, error } => format!("Unable to parse type of argument `{arg_name}`. {error}"),
            InspectError::VersionMismatch { version_byte, version } => format!("Version byte in unchecked extrinsic {version_byte} does not match with version {version} from provided metadata. Last 7 bits were expected to be identical."),
        }
    }
}

/// Errors in SCALE data parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParserError {
    DataTooShort { position: usize, minimal_length: usize },
    InvalidEra { position: usize },
    NoCompact { position: usize },
    SomeDataNotUsedBlob { from: usize },
    TypeFailure { position: usize, ty: &'static str },
    UnexpectedEnumVariant { position: usize },
    ZeroSizedElements { position: usize, number_of_elements: u32 },
}

impl ParserError {
    fn error_text(&self) -> String {
        match &self {
            ParserError::DataTooShort { position, minimal_length } => {
                format!("Data is too short for expected content. Expected at least {minimal_length} element(s) after position {position}.")
            }
            ParserError::InvalidEra { position } => {
                format!("Unable to decode `Era` starting at position {position}.")
            }
            ParserError::NoCompact { position } => {
                format!("Expected compact starting at position {position}, not found one.")
            }
            ParserError::SomeDataNotUsedBlob { from } => {
                format!("Some data (input positions [{from}..]) remained unused after decoding.")
            }
            ParserError::TypeFailure { position, ty } => {
                format!("Unable to decode data starting at position {position} as {ty}.")
            }
            ParserError::UnexpectedEnumVariant { position } => {
                format!("Encountered unexpected enum variant at position {position}.")
            }
            ParserError::ZeroSizedElements { position, number_of_elements } => {
                format!("Set at position {position} announces {number_of_elements} element(s) taking no data, more than the input length.")
            }
        }
    }
}

/// Errors in metadata and its types registry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetadataError {
    CallNotFound { pallet: String, call_index: u8 },
    CyclicMetadata { id: u32 },
    NoCallsInPallet(String),
    NoExtrinsicParam(&'static str),
    NotACall { id: u32 },
    PalletNotFound(u8),
    TypeNotResolved { id: u32 },
    UnexpectedCompactInsides { id: u32 },
    UnsupportedType { id: u32 },
}

impl MetadataError {
    fn error_text(&self) -> String {
        match &self {
            MetadataError::CallNotFound { pallet, call_index } => format!("Pallet {pallet} has no call with index {call_index}."),
            MetadataError::CyclicMetadata { id } => format!("Resolving type id {id} in metadata type registry results in cycling."),
            MetadataError::NoCallsInPallet(pallet) => format!("Pallet {pallet} has no calls."),
            MetadataError::NoExtrinsicParam(param) => format!("Unchecked extrinsic type in provided metadata has no specified {param} parameter."),
            MetadataError::NotACall { id } => format!("Calls descriptor type {id} in metadata type registry is not an enum."),
            MetadataError::PalletNotFound(index) => format!("No pallet with index {index} in metadata."),
            MetadataError::TypeNotResolved { id } => format!("Unable to resolve type id {id} in metadata type registry."),
            MetadataError::UnexpectedCompactInsides { id } => format!("Compact type {id} in metadata type registry has unexpected type inside compact."),
            MetadataError::UnsupportedType { id } => format!("Type {id} in metadata type registry is not supported for display."),
        }
    }
}

/// Errors in type descriptor strings, such as `Compact<BalanceOf<T>>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeDescriptorError {
    ArrayLength { position: usize },
    Empty,
    TrailingCharacters { position: usize },
    UnbalancedBrackets { position: usize },
    UnexpectedCharacter { position: usize, found: char },
}

impl TypeDescriptorError {
    fn error_text(&self) -> String {
        match &self {
            TypeDescriptorError::ArrayLength { position } => {
                format!("Expected fixed array length at position {position}.")
            }
            TypeDescriptorError::Empty => String::from("Type descriptor is empty."),
            TypeDescriptorError::TrailingCharacters { position } => {
                format!("Unexpected characters after complete type descriptor at position {position}.")
            }
            TypeDescriptorError::UnbalancedBrackets { position } => {
                format!("Unbalanced brackets in type descriptor at position {position}.")
            }
            TypeDescriptorError::UnexpectedCharacter { position, found } => {
                format!("Unexpected character `{found}` in type descriptor at position {position}.")
            }
        }
    }
}

/// Implement [`Display`] and `Error` (`std` only).
macro_rules! impl_display_and_error {
    ($($ty: ty), *) => {
        $(
            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    write!(f, "{}", self.error_text())
                }
            }

            #[cfg(feature = "std")]
            impl Error for $ty {
                fn source(&self) -> Option<&(dyn Error + 'static)> {
                    None
                }
            }
        )*
    }
}

impl_display_and_error!(
    InspectError,
    MetadataError,
    ParserError,
    TypeDescriptorError
);

impl From<ParserError> for InspectError {
    fn from(parser_error: ParserError) -> Self {
        InspectError::Parsing(parser_error)
    }
}

impl From<MetadataError> for InspectError {
    fn from(metadata_error: MetadataError) -> Self {
        InspectError::Metadata(metadata_error)
    }
}
