use cosmwasm_std::{Addr, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::Item;
use sale_types::{SaleConfig, SaleStatus};
use whitelist_gate::{Whitelist, WHITELIST_KEY};

use crate::vault::RefundVault;

pub const INSTANTIATE_TOKEN_REPLY_ID: u64 = 1;

pub const CONFIG: Item<SaleConfig> = Item::new("config");
pub const OWNER: Admin = Admin::new("owner");
pub const TOKEN: Item<Addr> = Item::new("token");
pub const WEI_RAISED: Item<Uint128> = Item::new("wei_raised");
pub const STATUS: Item<SaleStatus> = Item::new("status");
pub const WHITELIST: Whitelist = Whitelist::new(WHITELIST_KEY);
// Only initialised for sales with a goal
pub const VAULT: RefundVault = RefundVault::new("vault_state", "vault_deposits", "vault_total");
