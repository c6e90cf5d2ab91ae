use crate::types::{AttributeKind, AttributePath};

use thiserror::Error;

/// An [`AttributeValue`](crate::AttributeValue) was read as the wrong variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected `{expected}` but found `{actual}`")]
pub struct TypeMismatch {
    pub expected: AttributeKind,
    pub actual: AttributeKind,
}

/// Failure to turn a wire document back into an item.
///
/// Every variant carries the path of the offending node. The first failure
/// aborts the whole decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: AttributePath,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid base64 at `{path}`: {source}")]
    InvalidEncoding {
        path: AttributePath,
        source: base64::DecodeError,
    },
    #[error("unknown variant at `{path}`: {found}")]
    UnknownVariant { path: AttributePath, found: String },
    #[error("duplicate key at `{path}`")]
    DuplicateKey { path: AttributePath },
    #[error("malformed document: {source}")]
    MalformedDocument {
        path: AttributePath,
        source: serde_json::Error,
    },
}

impl DecodeError {
    pub fn path(&self) -> &AttributePath {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::InvalidEncoding { path, .. }
            | Self::UnknownVariant { path, .. }
            | Self::DuplicateKey { path }
            | Self::MalformedDocument { path, .. } => path,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> DecodeError {
        DecodeError::MalformedDocument {
            path: AttributePath::root(),
            source,
        }
    }
}

/// An SDK attribute value has no counterpart in this model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported attribute value `{kind}` at `{path}`")]
pub struct SdkConversionError {
    pub path: AttributePath,
    pub kind: String,
}
