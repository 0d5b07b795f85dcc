use thiserror::Error;

/// Errors surfaced by capability queries.
///
/// Only caller-input validation and "not supported" answers are surfaced. Driver anomalies never
/// reach callers; they degrade to documented defaults inside the capability layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum D3dError {
    /// Adapter index out of range, mode index out of range, or a malformed request.
    #[error("invalid call")]
    InvalidCall,
    /// The request is well-formed but the adapter cannot satisfy it.
    #[error("not available")]
    NotAvailable,
}

impl D3dError {
    /// The classic `HRESULT` value for this error.
    pub fn hresult(self) -> u32 {
        match self {
            // MAKE_D3DHRESULT(2156)
            Self::InvalidCall => 0x8876_086c,
            // MAKE_D3DHRESULT(2154)
            Self::NotAvailable => 0x8876_086a,
        }
    }
}

pub type D3dResult<T> = Result<T, D3dError>;
