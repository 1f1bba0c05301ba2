pub mod config;
pub mod msg;
pub mod rates;
pub mod token;
pub mod types;

pub use config::{ConfigurationError, SaleConfig};
pub use rates::{
    PresalePhase, RateContext, RateSchedule, RateScheduleError, RateTiers, TimeTier, VolumeTier,
};
pub use types::{SaleStatus, VaultState};
