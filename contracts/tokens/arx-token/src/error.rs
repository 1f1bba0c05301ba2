use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Token is paused")]
    Paused {},

    #[error("Token is not paused")]
    NotPaused {},

    #[error("Invalid zero amount")]
    InvalidZeroAmount {},

    #[error("Insufficient funds")]
    InsufficientFunds { balance: Uint128, required: Uint128 },
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
