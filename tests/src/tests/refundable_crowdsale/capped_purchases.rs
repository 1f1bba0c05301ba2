#![cfg(test)]
use cosmwasm_std::Uint128;
use cw_controllers::AdminResponse;
use cw_multi_test::Executor;
use sale_types::msg::{ExecuteMsg, QueryMsg, SaleStateResponse, VaultResponse};
use sale_types::token::TokenQueryMsg;
use sale_types::VaultState;

use arx_crowdsale::error::ContractError as CrowdsaleError;

use crate::helpers::mock_messages::sale_mock_messages::{
    ether, return_refundable_crowdsale_instantiate_msg, ETHER,
};
use crate::helpers::setup::setup;
use crate::helpers::utils::{
    buy_tokens, instantiate_crowdsale, query_native_balance, query_token_balance, set_time,
    whitelist,
};

#[test]
fn cap_ends_the_sale() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let alice = res.test_accounts.alice;
    let bob = res.test_accounts.bob;
    let wallet = res.test_accounts.wallet;
    let mut app = res.app;
    let now = app.block_info().time;

    let crowdsale_inst_msg = return_refundable_crowdsale_instantiate_msg(res.token_code_id, now);
    let start_time = crowdsale_inst_msg.start_time;
    let (crowdsale_addr, token_addr) = instantiate_crowdsale(
        &mut app,
        res.crowdsale_code_id,
        &owner,
        &crowdsale_inst_msg,
    );
    whitelist(&mut app, &crowdsale_addr, &owner, &[&alice, &bob]);
    set_time(&mut app, start_time);

    // Minimum is 0.01
    let error = buy_tokens(
        &mut app,
        &crowdsale_addr,
        &alice,
        &alice,
        Uint128::new(ETHER / 200),
    )
    .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(
        error,
        &CrowdsaleError::BelowMinimum {
            minimum: Uint128::new(ETHER / 100),
            sent: Uint128::new(ETHER / 200)
        }
    );
    buy_tokens(
        &mut app,
        &crowdsale_addr,
        &alice,
        &alice,
        Uint128::new(ETHER / 100),
    )
    .unwrap();

    buy_tokens(&mut app, &crowdsale_addr, &alice, &alice, ether(9_999)).unwrap();

    // Overshooting the cap is rejected as a whole
    let error = buy_tokens(&mut app, &crowdsale_addr, &bob, &bob, ether(7_001)).unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(
        error,
        &CrowdsaleError::CapExceeded {
            cap: ether(17_000),
            attempted: ether(17_000) + Uint128::new(ETHER / 100)
        }
    );
    assert_eq!(query_token_balance(&app, &token_addr, &bob), ether(0));
    assert_eq!(query_native_balance(&app, &bob), ether(20_000));

    let remaining = ether(17_000) - ether(9_999) - Uint128::new(ETHER / 100);
    buy_tokens(&mut app, &crowdsale_addr, &bob, &bob, remaining).unwrap();
    assert_eq!(
        query_token_balance(&app, &token_addr, &bob),
        remaining * Uint128::new(5_000)
    );

    // Cap reached before end time
    let state: SaleStateResponse = app
        .wrap()
        .query_wasm_smart(crowdsale_addr.clone(), &QueryMsg::State {})
        .unwrap();
    assert_eq!(state.wei_raised, ether(17_000));
    assert!(state.has_ended);

    let error = buy_tokens(&mut app, &crowdsale_addr, &alice, &alice, ether(1)).unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(error, &CrowdsaleError::NotOpen {});

    // Funds are escrowed until finalization
    assert_eq!(query_native_balance(&app, &wallet), ether(0));
    assert_eq!(query_native_balance(&app, &crowdsale_addr), ether(17_000));
    let vault: VaultResponse = app
        .wrap()
        .query_wasm_smart(crowdsale_addr.clone(), &QueryMsg::Vault {})
        .unwrap();
    assert_eq!(
        vault,
        VaultResponse {
            state: VaultState::Active,
            total_deposited: ether(17_000),
        }
    );
    let deposit: Uint128 = app
        .wrap()
        .query_wasm_smart(
            crowdsale_addr.clone(),
            &QueryMsg::Deposit {
                address: bob.to_string(),
            },
        )
        .unwrap();
    assert_eq!(deposit, remaining);

    // Finalize inside the window, the cap already ended the sale
    assert!(app.block_info().time < crowdsale_inst_msg.end_time);
    app.execute_contract(
        alice.clone(),
        crowdsale_addr.clone(),
        &ExecuteMsg::Finalize {},
        &[],
    )
    .unwrap();

    let is_paused: bool = app
        .wrap()
        .query_wasm_smart(token_addr.clone(), &TokenQueryMsg::IsPaused {})
        .unwrap();
    assert!(!is_paused);
    let token_owner: AdminResponse = app
        .wrap()
        .query_wasm_smart(token_addr, &TokenQueryMsg::Owner {})
        .unwrap();
    assert_eq!(token_owner.admin, Some(owner.to_string()));

    // Goal is met, the vault is released to the wallet
    assert_eq!(query_native_balance(&app, &wallet), ether(17_000));
    assert_eq!(query_native_balance(&app, &crowdsale_addr), ether(0));
}
