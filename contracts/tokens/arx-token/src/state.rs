use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");
pub const OWNER: Admin = Admin::new("owner");
pub const PAUSED: Item<bool> = Item::new("paused");
pub const BALANCES: Map<Addr, Uint128> = Map::new("balances");
