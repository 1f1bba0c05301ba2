#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
    StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::{maybe_addr, must_pay, nonpayable, parse_reply_instantiate_data};
use sale_types::msg::{
    ExecuteMsg, InstantiateMsg, QueryMsg, RateResponse, SaleStateResponse, VaultResponse,
};
use sale_types::token::{mint_msg, token_execute_msg, TokenExecuteMsg, TokenInstantiateMsg};
use sale_types::{SaleConfig, SaleStatus};

use crate::error::ContractError;
use crate::escrow;
use crate::state::{
    CONFIG, INSTANTIATE_TOKEN_REPLY_ID, OWNER, STATUS, TOKEN, VAULT, WEI_RAISED, WHITELIST,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:arx-crowdsale";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TOKEN_PURCHASE_EVENT: &str = "TokenPurchase";
pub const BOUNTY_MINTED_EVENT: &str = "LogBountyTokenMinted";
pub const FINALIZED_EVENT: &str = "Finalized";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    let owner = maybe_addr(deps.api, msg.owner)?.unwrap_or(info.sender);
    let wallet = deps.api.addr_validate(&msg.wallet)?;
    let config = SaleConfig {
        start_time: msg.start_time,
        end_time: msg.end_time,
        wallet,
        accepted_denom: msg.accepted_denom,
        min_contribution: msg.min_contribution,
        min_duration: msg.min_duration,
        cap: msg.cap,
        goal: msg.goal,
        whitelist_required: msg.whitelist_required,
        rate_schedule: msg.rate_schedule,
    };
    config.check_integrity(env.block.time)?;

    CONFIG.save(deps.storage, &config)?;
    WEI_RAISED.save(deps.storage, &Uint128::zero())?;
    STATUS.save(deps.storage, &SaleStatus::Open)?;
    if config.is_refundable() {
        VAULT.initialize(deps.storage)?;
    }
    OWNER.set(deps, Some(owner.clone()))?;

    // The sale instantiates the token, so it owns it until finalization
    let token_instantiate_msg = WasmMsg::Instantiate {
        admin: Some(owner.to_string()),
        code_id: msg.token.code_id,
        msg: to_json_binary(&TokenInstantiateMsg {
            name: msg.token.name,
            symbol: msg.token.symbol.clone(),
            decimals: msg.token.decimals,
            owner: None,
            paused: true,
        })?,
        funds: vec![],
        label: format!("{} token", msg.token.symbol),
    };

    let res = Response::new()
        .add_submessage(SubMsg::reply_on_success(
            token_instantiate_msg,
            INSTANTIATE_TOKEN_REPLY_ID,
        ))
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("start_time", config.start_time.to_string())
        .add_attribute("end_time", config.end_time.to_string())
        .add_attribute("refundable", config.is_refundable().to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_TOKEN_REPLY_ID => {
            let res = parse_reply_instantiate_data(msg)?;
            let token = deps.api.addr_validate(&res.contract_address)?;
            TOKEN.save(deps.storage, &token)?;
            Ok(Response::new()
                .add_attribute("action", "token_instantiated")
                .add_attribute("token", token))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::BuyTokens { beneficiary } => execute_buy_tokens(deps, env, info, beneficiary),
        ExecuteMsg::AddAddressToWhitelist { address } => {
            execute_add_to_whitelist(deps, env, info, vec![address])
        }
        ExecuteMsg::AddAddressesToWhitelist { addresses } => {
            execute_add_to_whitelist(deps, env, info, addresses)
        }
        ExecuteMsg::RemoveAddressFromWhitelist { address } => {
            execute_remove_from_whitelist(deps, env, info, vec![address])
        }
        ExecuteMsg::RemoveAddressesFromWhitelist { addresses } => {
            execute_remove_from_whitelist(deps, env, info, addresses)
        }
        ExecuteMsg::CreateBountyToken {
            beneficiary,
            amount,
        } => execute_create_bounty_token(deps, env, info, beneficiary, amount),
        ExecuteMsg::Finalize {} => execute_finalize(deps, env, info),
        ExecuteMsg::ClaimRefund {} => execute_claim_refund(deps, env, info),
        ExecuteMsg::UpdateOwner { new_owner } => execute_update_owner(deps, env, info, new_owner),
    }
}

pub fn execute_buy_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let value = must_pay(&info, &config.accepted_denom)?;
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    let now = env.block.time;

    // Admission is decided on the totals before this contribution
    let wei_raised = WEI_RAISED.load(deps.storage)?;
    let status = STATUS.load(deps.storage)?;
    if status == SaleStatus::Finalized
        || !config.is_open(now, wei_raised)
        || config.presale_cap_reached(now, wei_raised)
    {
        return Err(ContractError::NotOpen {});
    }
    if value < config.min_contribution {
        return Err(ContractError::BelowMinimum {
            minimum: config.min_contribution,
            sent: value,
        });
    }
    if config.whitelist_required && !WHITELIST.is_whitelisted(deps.storage, &beneficiary) {
        return Err(ContractError::NotWhitelisted {
            address: beneficiary.to_string(),
        });
    }

    let rate = config.rate_at(now, wei_raised);
    let tokens = value.checked_mul(Uint128::from(rate))?;
    let forward_msg = escrow::accept_value(deps.storage, &config, &info.sender, value)?;

    let token = TOKEN.load(deps.storage)?;
    let event = Event::new(TOKEN_PURCHASE_EVENT)
        .add_attribute("purchaser", info.sender.to_string())
        .add_attribute("beneficiary", beneficiary.to_string())
        .add_attribute("value", value)
        .add_attribute("rate", rate.to_string())
        .add_attribute("amount", tokens);

    let res = Response::new()
        .add_message(mint_msg(&token, &beneficiary, tokens)?)
        .add_messages(forward_msg)
        .add_event(event)
        .add_attribute("action", "buy_tokens");
    Ok(res)
}

pub fn execute_add_to_whitelist(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    addresses: Vec<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let addresses = addresses
        .iter()
        .map(|address| deps.api.addr_validate(address))
        .collect::<StdResult<Vec<Addr>>>()?;

    let events = WHITELIST.add_many(deps.storage, &addresses)?;
    let res = Response::new()
        .add_events(events)
        .add_attribute("action", "add_to_whitelist")
        .add_attribute("count", addresses.len().to_string());
    Ok(res)
}

pub fn execute_remove_from_whitelist(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    addresses: Vec<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let addresses = addresses
        .iter()
        .map(|address| deps.api.addr_validate(address))
        .collect::<StdResult<Vec<Addr>>>()?;

    let events = WHITELIST.remove_many(deps.storage, &addresses)?;
    let res = Response::new()
        .add_events(events)
        .add_attribute("action", "remove_from_whitelist")
        .add_attribute("count", addresses.len().to_string());
    Ok(res)
}

pub fn execute_create_bounty_token(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    beneficiary: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    // Token ownership is handed over at finalization
    if STATUS.load(deps.storage)? == SaleStatus::Finalized {
        return Err(ContractError::AlreadyFinalized {});
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    let token = TOKEN.load(deps.storage)?;

    let event = Event::new(BOUNTY_MINTED_EVENT)
        .add_attribute("beneficiary", beneficiary.to_string())
        .add_attribute("amount", amount);
    let res = Response::new()
        .add_message(mint_msg(&token, &beneficiary, amount)?)
        .add_event(event)
        .add_attribute("action", "create_bounty_token");
    Ok(res)
}

pub fn execute_finalize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let status = STATUS.load(deps.storage)?;
    if !status.can_transition_to(SaleStatus::Finalized) {
        return Err(ContractError::AlreadyFinalized {});
    }
    let config = CONFIG.load(deps.storage)?;
    if !escrow::has_ended(deps.storage, &config, env.block.time)? {
        return Err(ContractError::NotEnded {});
    }
    STATUS.save(deps.storage, &SaleStatus::Finalized)?;

    let (settle_msgs, settle_events) = escrow::settle(deps.storage, &config)?;

    let owner = OWNER.get(deps.as_ref())?.ok_or(ContractError::OwnerNotSet {})?;
    let token = TOKEN.load(deps.storage)?;
    let unpause_msg = token_execute_msg(&token, &TokenExecuteMsg::Unpause {})?;
    let transfer_ownership_msg = token_execute_msg(
        &token,
        &TokenExecuteMsg::TransferOwnership {
            new_owner: owner.to_string(),
        },
    )?;

    let res = Response::new()
        .add_messages(settle_msgs)
        .add_message(unpause_msg)
        .add_message(transfer_ownership_msg)
        .add_events(settle_events)
        .add_event(Event::new(FINALIZED_EVENT))
        .add_attribute("action", "finalize");
    Ok(res)
}

pub fn execute_claim_refund(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let (refund_msg, event) = escrow::claim_refund(deps.storage, &config, &info.sender)?;

    let res = Response::new()
        .add_message(refund_msg)
        .add_event(event)
        .add_attribute("action", "claim_refund");
    Ok(res)
}

pub fn execute_update_owner(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let new_owner = deps.api.addr_validate(&new_owner)?;
    OWNER.set(deps, Some(new_owner.clone()))?;

    let res = Response::new()
        .add_attribute("action", "update_owner")
        .add_attribute("new_owner", new_owner);
    Ok(res)
}

fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    match OWNER.get(deps)? {
        Some(owner) if owner == *sender => Ok(()),
        Some(_) => Err(ContractError::Unauthorized {}),
        None => Err(ContractError::OwnerNotSet {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::State {} => to_json_binary(&query_state(deps, env)?),
        QueryMsg::HasEnded {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&escrow::has_ended(deps.storage, &config, env.block.time)?)
        }
        QueryMsg::Rate {} => to_json_binary(&query_rate(deps, env)?),
        QueryMsg::GoalReached {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&escrow::goal_reached(deps.storage, &config)?)
        }
        QueryMsg::IsWhitelisted { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&WHITELIST.is_whitelisted(deps.storage, &address))
        }
        QueryMsg::Deposit { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&VAULT.deposit_of(deps.storage, &address)?)
        }
        QueryMsg::Vault {} => to_json_binary(&query_vault(deps)?),
        QueryMsg::Owner {} => to_json_binary(&OWNER.query_admin(deps)?),
        QueryMsg::Token {} => to_json_binary(&TOKEN.load(deps.storage)?),
    }
}

fn query_state(deps: Deps, env: Env) -> StdResult<SaleStateResponse> {
    let config = CONFIG.load(deps.storage)?;
    let wei_raised = WEI_RAISED.load(deps.storage)?;
    let status = STATUS.load(deps.storage)?;
    Ok(SaleStateResponse {
        wei_raised,
        is_finalized: status == SaleStatus::Finalized,
        has_ended: config.has_ended(env.block.time, wei_raised),
    })
}

fn query_rate(deps: Deps, env: Env) -> StdResult<RateResponse> {
    let config = CONFIG.load(deps.storage)?;
    let wei_raised = WEI_RAISED.load(deps.storage)?;
    Ok(RateResponse {
        rate: config.rate_at(env.block.time, wei_raised),
    })
}

fn query_vault(deps: Deps) -> Result<VaultResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !config.is_refundable() {
        return Err(ContractError::NotRefundable {});
    }
    Ok(VaultResponse {
        state: VAULT.load_state(deps.storage)?,
        total_deposited: VAULT.total(deps.storage)?,
    })
}
