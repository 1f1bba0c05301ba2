use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw_controllers::AdminResponse;

#[cw_serde]
pub struct TokenInstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    // Defaults to the instantiator
    pub owner: Option<String>,
    pub paused: bool,
}

#[cw_serde]
pub enum TokenExecuteMsg {
    Mint { recipient: String, amount: Uint128 },
    Transfer { recipient: String, amount: Uint128 },
    Pause {},
    Unpause {},
    TransferOwnership { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TokenQueryMsg {
    #[returns(BalanceResponse)]
    Balance { address: String },
    #[returns(AdminResponse)]
    Owner {},
    #[returns(bool)]
    IsPaused {},
    #[returns(TokenInfoResponse)]
    TokenInfo {},
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

pub fn token_execute_msg(token: &Addr, msg: &TokenExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

pub fn mint_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    token_execute_msg(
        token,
        &TokenExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
    )
}
