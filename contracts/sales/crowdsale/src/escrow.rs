use cosmwasm_std::{coins, Addr, BankMsg, CosmosMsg, Event, StdResult, Storage, Timestamp, Uint128};
use sale_types::SaleConfig;

use crate::error::ContractError;
use crate::state::{VAULT, WEI_RAISED};

pub const CLOSED_EVENT: &str = "Closed";
pub const REFUNDS_ENABLED_EVENT: &str = "RefundsEnabled";
pub const REFUNDED_EVENT: &str = "Refunded";

/// Books an accepted contribution and routes its value.
///
/// Without a goal the value is forwarded to the wallet right away. A
/// refundable sale keeps it in the vault under the contributor's name.
pub fn accept_value(
    storage: &mut dyn Storage,
    config: &SaleConfig,
    contributor: &Addr,
    value: Uint128,
) -> Result<Option<CosmosMsg>, ContractError> {
    let wei_raised = WEI_RAISED.load(storage)?.checked_add(value)?;
    if let Some(cap) = config.cap {
        if wei_raised > cap {
            return Err(ContractError::CapExceeded {
                cap,
                attempted: wei_raised,
            });
        }
    }
    WEI_RAISED.save(storage, &wei_raised)?;

    if config.is_refundable() {
        VAULT.deposit(storage, contributor, value)?;
        Ok(None)
    } else {
        Ok(Some(send_msg(config, &config.wallet, value)))
    }
}

pub fn has_ended(storage: &dyn Storage, config: &SaleConfig, now: Timestamp) -> StdResult<bool> {
    let wei_raised = WEI_RAISED.load(storage)?;
    Ok(config.has_ended(now, wei_raised))
}

pub fn goal_reached(storage: &dyn Storage, config: &SaleConfig) -> Result<bool, ContractError> {
    let goal = config.goal.ok_or(ContractError::NotRefundable {})?;
    let wei_raised = WEI_RAISED.load(storage)?;
    Ok(wei_raised >= goal)
}

/// Decides what happens to escrowed funds once the sale is finalized.
/// Sales without a goal have nothing left to settle.
pub fn settle(
    storage: &mut dyn Storage,
    config: &SaleConfig,
) -> Result<(Vec<CosmosMsg>, Vec<Event>), ContractError> {
    if !config.is_refundable() {
        return Ok((vec![], vec![]));
    }
    if goal_reached(storage, config)? {
        let amount = VAULT.close(storage)?;
        let event = Event::new(CLOSED_EVENT).add_attribute("amount", amount);
        Ok((vec![send_msg(config, &config.wallet, amount)], vec![event]))
    } else {
        VAULT.enable_refunds(storage)?;
        Ok((vec![], vec![Event::new(REFUNDS_ENABLED_EVENT)]))
    }
}

pub fn claim_refund(
    storage: &mut dyn Storage,
    config: &SaleConfig,
    contributor: &Addr,
) -> Result<(CosmosMsg, Event), ContractError> {
    if !config.is_refundable() {
        return Err(ContractError::NotRefundable {});
    }
    let amount = VAULT.refund(storage, contributor)?;
    let event = Event::new(REFUNDED_EVENT)
        .add_attribute("beneficiary", contributor.to_string())
        .add_attribute("amount", amount);
    Ok((send_msg(config, contributor, amount), event))
}

fn send_msg(config: &SaleConfig, to: &Addr, amount: Uint128) -> CosmosMsg {
    CosmosMsg::Bank(BankMsg::Send {
        to_address: to.to_string(),
        amount: coins(amount.u128(), &config.accepted_denom),
    })
}
