pub mod contract;
pub mod error;
pub mod escrow;
pub mod state;
pub mod vault;
