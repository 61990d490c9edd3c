use crate::models::Prefix;
use crate::store::StoreError;

/// Why a candidate prefix cannot be added.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("'{0}' is not a valid prefix (3-6 digits, first digit 2-9)")]
    InvalidFormat(String),
    #[error("{0} is already blocked")]
    Duplicate(Prefix),
    #[error("{candidate} overlaps with blocked prefix {existing}")]
    Conflict { candidate: Prefix, existing: Prefix },
    #[error("{candidate} needs {requested} entries but only {available} remain")]
    BudgetExceeded {
        candidate: Prefix,
        requested: u64,
        available: u64,
    },
}

/// Failure of a registry mutation.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("failed to persist prefix list: {0}")]
    Storage(#[from] StoreError),
}

impl RegistryError {
    /// The rejection reason, if the candidate itself was refused.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RegistryError::Rejected(r) => Some(r),
            RegistryError::Storage(_) => None,
        }
    }
}
