use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::{ParseReplyError, PaymentError};
use sale_types::{ConfigurationError, VaultState};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    ParseReply(#[from] ParseReplyError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Sale is not open")]
    NotOpen {},

    #[error("Contribution below minimum")]
    BelowMinimum { minimum: Uint128, sent: Uint128 },

    #[error("Beneficiary {address} is not whitelisted")]
    NotWhitelisted { address: String },

    #[error("Contribution would exceed the cap")]
    CapExceeded { cap: Uint128, attempted: Uint128 },

    #[error("Sale has not ended yet")]
    NotEnded {},

    #[error("Sale is already finalized")]
    AlreadyFinalized {},

    #[error("Refunds are not open")]
    RefundsNotOpen {},

    #[error("Nothing to refund")]
    NothingToRefund {},

    #[error("Sale is not refundable")]
    NotRefundable {},

    #[error("Invalid zero amount")]
    InvalidZeroAmount {},

    #[error("Invalid vault transition from {from} to {to}")]
    InvalidVaultTransition { from: VaultState, to: VaultState },

    #[error("Vault is not accepting deposits")]
    VaultNotActive {},

    #[error("Owner is not set")]
    OwnerNotSet {},

    #[error("Unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> StdError {
        StdError::generic_err(err.to_string())
    }
}
