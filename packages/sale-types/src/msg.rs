use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_controllers::AdminResponse;

use crate::config::SaleConfig;
use crate::rates::RateSchedule;
use crate::types::VaultState;

#[cw_serde]
pub struct TokenDetails {
    pub code_id: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct InstantiateMsg {
    // Defaults to the instantiator
    pub owner: Option<String>,
    pub wallet: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub accepted_denom: String,
    pub min_contribution: Uint128,
    // Seconds
    pub min_duration: u64,
    pub cap: Option<Uint128>,
    // Only valid together with a cap, makes the sale refundable
    pub goal: Option<Uint128>,
    pub whitelist_required: bool,
    pub rate_schedule: RateSchedule,
    pub token: TokenDetails,
}

#[cw_serde]
pub enum ExecuteMsg {
    BuyTokens { beneficiary: String },
    AddAddressToWhitelist { address: String },
    AddAddressesToWhitelist { addresses: Vec<String> },
    RemoveAddressFromWhitelist { address: String },
    RemoveAddressesFromWhitelist { addresses: Vec<String> },
    CreateBountyToken { beneficiary: String, amount: Uint128 },
    Finalize {},
    ClaimRefund {},
    UpdateOwner { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(SaleConfig)]
    Config {},
    #[returns(SaleStateResponse)]
    State {},
    #[returns(bool)]
    HasEnded {},
    #[returns(RateResponse)]
    Rate {},
    #[returns(bool)]
    GoalReached {},
    #[returns(bool)]
    IsWhitelisted { address: String },
    #[returns(Uint128)]
    Deposit { address: String },
    #[returns(VaultResponse)]
    Vault {},
    #[returns(AdminResponse)]
    Owner {},
    #[returns(Addr)]
    Token {},
}

#[cw_serde]
pub struct SaleStateResponse {
    pub wei_raised: Uint128,
    pub is_finalized: bool,
    pub has_ended: bool,
}

#[cw_serde]
pub struct RateResponse {
    pub rate: u64,
}

#[cw_serde]
pub struct VaultResponse {
    pub state: VaultState,
    pub total_deposited: Uint128,
}
