use thiserror::Error;

use super::state::UpgradeKind;

/// Why a purchase was refused. The state is untouched when this is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuyError {
    #[error("cannot afford {kind}: costs {cost}, have {points}")]
    InsufficientFunds {
        kind: UpgradeKind,
        cost: f64,
        points: f64,
    },
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("malformed save: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage error: {0}")]
    Storage(String),
}

pub type SaveResult<T> = Result<T, SaveError>;
