#![cfg(test)]
use cosmwasm_std::Uint128;
use cw_multi_test::Executor;
use sale_types::msg::{ExecuteMsg, QueryMsg, VaultResponse};
use sale_types::VaultState;

use arx_crowdsale::error::ContractError as CrowdsaleError;

use crate::helpers::mock_messages::sale_mock_messages::{
    ether, return_refundable_crowdsale_instantiate_msg,
};
use crate::helpers::setup::setup;
use crate::helpers::utils::{
    attribute, buy_tokens, find_events, instantiate_crowdsale, query_native_balance, set_time,
    whitelist,
};

#[test]
fn goal_reached_forwards_funds() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let alice = res.test_accounts.alice;
    let wallet = res.test_accounts.wallet;
    let not_owner = res.test_accounts.not_owner;
    let mut app = res.app;
    let now = app.block_info().time;

    let crowdsale_inst_msg = return_refundable_crowdsale_instantiate_msg(res.token_code_id, now);
    let start_time = crowdsale_inst_msg.start_time;
    let end_time = crowdsale_inst_msg.end_time;
    let (crowdsale_addr, _) = instantiate_crowdsale(
        &mut app,
        res.crowdsale_code_id,
        &owner,
        &crowdsale_inst_msg,
    );
    whitelist(&mut app, &crowdsale_addr, &owner, &[&alice]);
    set_time(&mut app, start_time);

    buy_tokens(&mut app, &crowdsale_addr, &alice, &alice, ether(1_200)).unwrap();
    let goal_reached: bool = app
        .wrap()
        .query_wasm_smart(crowdsale_addr.clone(), &QueryMsg::GoalReached {})
        .unwrap();
    assert!(goal_reached);

    set_time(&mut app, end_time.plus_seconds(1));
    let res = app
        .execute_contract(
            not_owner.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::Finalize {},
            &[],
        )
        .unwrap();
    let closed = find_events(&res, "Closed");
    assert_eq!(closed.len(), 1);
    assert_eq!(attribute(closed[0], "amount"), ether(1_200).to_string());
    assert!(find_events(&res, "RefundsEnabled").is_empty());

    assert_eq!(query_native_balance(&app, &wallet), ether(1_200));
    assert_eq!(query_native_balance(&app, &crowdsale_addr), ether(0));
    let vault: VaultResponse = app
        .wrap()
        .query_wasm_smart(crowdsale_addr.clone(), &QueryMsg::Vault {})
        .unwrap();
    assert_eq!(
        vault,
        VaultResponse {
            state: VaultState::Closed,
            total_deposited: Uint128::zero(),
        }
    );

    // No refunds once the vault is closed
    let error = app
        .execute_contract(
            alice.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::ClaimRefund {},
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(error, &CrowdsaleError::RefundsNotOpen {});
}

#[test]
fn goal_missed_enables_refunds() {
    let res = setup();
    let owner = res.test_accounts.owner;
    let alice = res.test_accounts.alice;
    let bob = res.test_accounts.bob;
    let carol = res.test_accounts.carol;
    let wallet = res.test_accounts.wallet;
    let mut app = res.app;
    let now = app.block_info().time;

    let crowdsale_inst_msg = return_refundable_crowdsale_instantiate_msg(res.token_code_id, now);
    let start_time = crowdsale_inst_msg.start_time;
    let end_time = crowdsale_inst_msg.end_time;
    let (crowdsale_addr, _) = instantiate_crowdsale(
        &mut app,
        res.crowdsale_code_id,
        &owner,
        &crowdsale_inst_msg,
    );
    whitelist(&mut app, &crowdsale_addr, &owner, &[&alice, &carol]);
    set_time(&mut app, start_time);

    buy_tokens(&mut app, &crowdsale_addr, &alice, &alice, ether(600)).unwrap();
    // Bob pays for carol, the deposit is bob's
    buy_tokens(&mut app, &crowdsale_addr, &bob, &carol, ether(100)).unwrap();

    // Refunds open only after finalization
    let error = app
        .execute_contract(
            alice.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::ClaimRefund {},
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(error, &CrowdsaleError::RefundsNotOpen {});

    set_time(&mut app, end_time.plus_seconds(1));
    let res = app
        .execute_contract(
            owner.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::Finalize {},
            &[],
        )
        .unwrap();
    assert_eq!(find_events(&res, "RefundsEnabled").len(), 1);
    assert!(find_events(&res, "Closed").is_empty());
    assert_eq!(query_native_balance(&app, &wallet), ether(0));

    let vault: VaultResponse = app
        .wrap()
        .query_wasm_smart(crowdsale_addr.clone(), &QueryMsg::Vault {})
        .unwrap();
    assert_eq!(vault.state, VaultState::Refunding);
    assert_eq!(vault.total_deposited, ether(700));

    let res = app
        .execute_contract(
            alice.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::ClaimRefund {},
            &[],
        )
        .unwrap();
    let refunded = find_events(&res, "Refunded");
    assert_eq!(refunded.len(), 1);
    assert_eq!(attribute(refunded[0], "beneficiary"), alice.to_string());
    assert_eq!(attribute(refunded[0], "amount"), ether(600).to_string());
    assert_eq!(query_native_balance(&app, &alice), ether(20_000));

    // Second claim
    let error = app
        .execute_contract(
            alice.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::ClaimRefund {},
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(error, &CrowdsaleError::NothingToRefund {});

    // Carol only received tokens
    let error = app
        .execute_contract(
            carol.clone(),
            crowdsale_addr.clone(),
            &ExecuteMsg::ClaimRefund {},
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<CrowdsaleError>().unwrap();
    assert_eq!(error, &CrowdsaleError::NothingToRefund {});

    app.execute_contract(
        bob.clone(),
        crowdsale_addr.clone(),
        &ExecuteMsg::ClaimRefund {},
        &[],
    )
    .unwrap();
    assert_eq!(query_native_balance(&app, &bob), ether(20_000));
    assert_eq!(query_native_balance(&app, &crowdsale_addr), ether(0));
    let vault: VaultResponse = app
        .wrap()
        .query_wasm_smart(crowdsale_addr, &QueryMsg::Vault {})
        .unwrap();
    assert_eq!(vault.total_deposited, Uint128::zero());
}
