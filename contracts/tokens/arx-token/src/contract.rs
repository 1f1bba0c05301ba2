#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{maybe_addr, nonpayable};
use sale_types::token::{
    BalanceResponse, TokenExecuteMsg, TokenInfoResponse, TokenInstantiateMsg, TokenQueryMsg,
};

use crate::error::ContractError;
use crate::state::{TokenInfo, BALANCES, OWNER, PAUSED, TOKEN_INFO};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:arx-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: TokenInstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    let owner = maybe_addr(deps.api, msg.owner)?.unwrap_or(info.sender);
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol.clone(),
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
        },
    )?;
    PAUSED.save(deps.storage, &msg.paused)?;
    OWNER.set(deps, Some(owner.clone()))?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("symbol", msg.symbol)
        .add_attribute("owner", owner)
        .add_attribute("paused", msg.paused.to_string());
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: TokenExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    match msg {
        TokenExecuteMsg::Mint { recipient, amount } => {
            execute_mint(deps, env, info, recipient, amount)
        }
        TokenExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        TokenExecuteMsg::Pause {} => execute_pause(deps, env, info),
        TokenExecuteMsg::Unpause {} => execute_unpause(deps, env, info),
        TokenExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, env, info, new_owner)
        }
    }
}

// Minting is an owner operation and is allowed while paused
pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    BALANCES.update(
        deps.storage,
        recipient.clone(),
        |balance| -> StdResult<_> { Ok(balance.unwrap_or_default().checked_add(amount)?) },
    )?;
    TOKEN_INFO.update(deps.storage, |mut token_info| -> StdResult<_> {
        token_info.total_supply = token_info.total_supply.checked_add(amount)?;
        Ok(token_info)
    })?;

    let res = Response::new()
        .add_attribute("action", "mint")
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount);
    Ok(res)
}

pub fn execute_transfer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if PAUSED.load(deps.storage)? {
        return Err(ContractError::Paused {});
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let balance = BALANCES
        .may_load(deps.storage, info.sender.clone())?
        .unwrap_or_default();
    if balance < amount {
        return Err(ContractError::InsufficientFunds {
            balance,
            required: amount,
        });
    }
    BALANCES.save(
        deps.storage,
        info.sender.clone(),
        &balance.checked_sub(amount)?,
    )?;
    BALANCES.update(
        deps.storage,
        recipient.clone(),
        |balance| -> StdResult<_> { Ok(balance.unwrap_or_default().checked_add(amount)?) },
    )?;

    let res = Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount);
    Ok(res)
}

pub fn execute_pause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    if PAUSED.load(deps.storage)? {
        return Err(ContractError::Paused {});
    }
    PAUSED.save(deps.storage, &true)?;
    let res = Response::new().add_attribute("action", "pause");
    Ok(res)
}

pub fn execute_unpause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    if !PAUSED.load(deps.storage)? {
        return Err(ContractError::NotPaused {});
    }
    PAUSED.save(deps.storage, &false)?;
    let res = Response::new().add_attribute("action", "unpause");
    Ok(res)
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let new_owner = deps.api.addr_validate(&new_owner)?;
    // Checks the sender against the current owner
    let res: Response = OWNER.execute_update_admin(deps, info, Some(new_owner))?;
    Ok(res.add_attribute("action", "transfer_ownership"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: TokenQueryMsg) -> StdResult<Binary> {
    match msg {
        TokenQueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        TokenQueryMsg::Owner {} => to_json_binary(&OWNER.query_admin(deps)?),
        TokenQueryMsg::IsPaused {} => to_json_binary(&PAUSED.load(deps.storage)?),
        TokenQueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
    }
}

fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES.may_load(deps.storage, address)?.unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let token_info = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: token_info.name,
        symbol: token_info.symbol,
        decimals: token_info.decimals,
        total_supply: token_info.total_supply,
    })
}
