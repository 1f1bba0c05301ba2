use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy)]
pub enum SaleStatus {
    Open,
    Finalized,
}

impl SaleStatus {
    pub fn can_transition_to(&self, next: SaleStatus) -> bool {
        matches!((self, next), (SaleStatus::Open, SaleStatus::Finalized))
    }
}

/// Lifecycle of the refund vault. Both exits from `Active` are final.
#[cw_serde]
#[derive(Copy)]
pub enum VaultState {
    Active,
    Refunding,
    Closed,
}

impl VaultState {
    pub fn can_transition_to(&self, next: VaultState) -> bool {
        matches!(
            (self, next),
            (VaultState::Active, VaultState::Closed) | (VaultState::Active, VaultState::Refunding)
        )
    }
}

impl std::fmt::Display for VaultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            VaultState::Active => "active",
            VaultState::Refunding => "refunding",
            VaultState::Closed => "closed",
        };
        write!(f, "{}", state)
    }
}
