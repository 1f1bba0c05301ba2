use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};
use sale_types::VaultState;

use crate::error::ContractError;

/// Escrow for contributions of a refundable sale.
///
/// While `Active` the deposits sum up to `total_deposited`. Closing hands the
/// whole total to the caller for forwarding, enabling refunds lets every
/// contributor pull back its own deposit exactly once.
pub struct RefundVault<'a> {
    pub state: Item<'a, VaultState>,
    pub deposits: Map<'a, Addr, Uint128>,
    pub total_deposited: Item<'a, Uint128>,
}

impl<'a> RefundVault<'a> {
    pub const fn new(state_key: &'a str, deposits_key: &'a str, total_key: &'a str) -> Self {
        RefundVault {
            state: Item::new(state_key),
            deposits: Map::new(deposits_key),
            total_deposited: Item::new(total_key),
        }
    }

    pub fn initialize(&self, storage: &mut dyn Storage) -> StdResult<()> {
        self.state.save(storage, &VaultState::Active)?;
        self.total_deposited.save(storage, &Uint128::zero())
    }

    pub fn load_state(&self, storage: &dyn Storage) -> StdResult<VaultState> {
        self.state.load(storage)
    }

    pub fn total(&self, storage: &dyn Storage) -> StdResult<Uint128> {
        self.total_deposited.load(storage)
    }

    pub fn deposit_of(&self, storage: &dyn Storage, contributor: &Addr) -> StdResult<Uint128> {
        Ok(self
            .deposits
            .may_load(storage, contributor.clone())?
            .unwrap_or_default())
    }

    pub fn deposit(
        &self,
        storage: &mut dyn Storage,
        contributor: &Addr,
        amount: Uint128,
    ) -> Result<(), ContractError> {
        if self.load_state(storage)? != VaultState::Active {
            return Err(ContractError::VaultNotActive {});
        }
        let deposit = self.deposit_of(storage, contributor)?.checked_add(amount)?;
        self.deposits.save(storage, contributor.clone(), &deposit)?;
        let total = self.total(storage)?.checked_add(amount)?;
        self.total_deposited.save(storage, &total)?;
        Ok(())
    }

    /// Returns the amount released from escrow.
    pub fn close(&self, storage: &mut dyn Storage) -> Result<Uint128, ContractError> {
        self.transition(storage, VaultState::Closed)?;
        let total = self.total(storage)?;
        self.total_deposited.save(storage, &Uint128::zero())?;
        Ok(total)
    }

    pub fn enable_refunds(&self, storage: &mut dyn Storage) -> Result<(), ContractError> {
        self.transition(storage, VaultState::Refunding)
    }

    /// Zeroes the contributor's deposit and returns it.
    pub fn refund(
        &self,
        storage: &mut dyn Storage,
        contributor: &Addr,
    ) -> Result<Uint128, ContractError> {
        if self.load_state(storage)? != VaultState::Refunding {
            return Err(ContractError::RefundsNotOpen {});
        }
        let deposit = self.deposit_of(storage, contributor)?;
        if deposit.is_zero() {
            return Err(ContractError::NothingToRefund {});
        }
        self.deposits
            .save(storage, contributor.clone(), &Uint128::zero())?;
        let total = self.total(storage)?.checked_sub(deposit)?;
        self.total_deposited.save(storage, &total)?;
        Ok(deposit)
    }

    fn transition(&self, storage: &mut dyn Storage, next: VaultState) -> Result<(), ContractError> {
        let current = self.load_state(storage)?;
        if !current.can_transition_to(next) {
            return Err(ContractError::InvalidVaultTransition {
                from: current,
                to: next,
            });
        }
        self.state.save(storage, &next)?;
        Ok(())
    }
}
