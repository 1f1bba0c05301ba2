use cosmwasm_std::{Addr, Event, StdResult, Storage};
use cw_storage_plus::Map;

pub const WHITELIST_KEY: &str = "whitelist";

pub const WHITELISTED_ADDRESS_ADDED: &str = "WhitelistedAddressAdded";
pub const WHITELISTED_ADDRESS_REMOVED: &str = "WhitelistedAddressRemoved";

/// Set of beneficiary addresses allowed to receive tokens.
///
/// Every mutation returns one event per processed address, in input order,
/// whether or not the membership actually changed. Authorization is left to
/// the owning contract.
pub struct Whitelist<'a> {
    pub members: Map<'a, Addr, bool>,
}

impl<'a> Whitelist<'a> {
    pub const fn new(storage_key: &'a str) -> Self {
        Whitelist {
            members: Map::new(storage_key),
        }
    }

    pub fn add(&self, storage: &mut dyn Storage, address: &Addr) -> StdResult<Event> {
        self.members.save(storage, address.clone(), &true)?;
        Ok(Event::new(WHITELISTED_ADDRESS_ADDED).add_attribute("address", address.to_string()))
    }

    pub fn add_many(&self, storage: &mut dyn Storage, addresses: &[Addr]) -> StdResult<Vec<Event>> {
        addresses
            .iter()
            .map(|address| self.add(storage, address))
            .collect()
    }

    pub fn remove(&self, storage: &mut dyn Storage, address: &Addr) -> StdResult<Event> {
        self.members.remove(storage, address.clone());
        Ok(Event::new(WHITELISTED_ADDRESS_REMOVED).add_attribute("address", address.to_string()))
    }

    pub fn remove_many(
        &self,
        storage: &mut dyn Storage,
        addresses: &[Addr],
    ) -> StdResult<Vec<Event>> {
        addresses
            .iter()
            .map(|address| self.remove(storage, address))
            .collect()
    }

    /// Never fails. An entry that cannot be read or decoded counts as a
    /// non-member, so a corrupt entry rejects the beneficiary.
    pub fn is_whitelisted(&self, storage: &dyn Storage, address: &Addr) -> bool {
        matches!(self.members.may_load(storage, address.clone()), Ok(Some(true)))
    }
}
