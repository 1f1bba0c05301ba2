use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RateScheduleError {
    #[error("Default rate cannot be zero")]
    InvalidDefaultRate {},

    #[error("Tier rate cannot be zero")]
    InvalidTierRate {},

    #[error("Tier thresholds must be strictly increasing")]
    ThresholdsNotIncreasing {},

    #[error("Tier rates must not increase along the schedule")]
    RatesNotMonotonic {},

    #[error("Invalid presale phase")]
    InvalidPresale {},
}

#[cw_serde]
pub struct VolumeTier {
    // Applies while the raised volume is below this value
    pub threshold: Uint128,
    pub rate: u64,
}

#[cw_serde]
pub struct TimeTier {
    // Seconds after the sale start
    pub offset: u64,
    pub rate: u64,
}

#[cw_serde]
pub enum RateTiers {
    Volume(Vec<VolumeTier>),
    Time(Vec<TimeTier>),
}

#[cw_serde]
pub struct PresalePhase {
    pub duration: u64,
    pub rate: u64,
    pub cap: Uint128,
}

#[cw_serde]
pub struct RateSchedule {
    pub default_rate: u64,
    pub presale: Option<PresalePhase>,
    pub tiers: RateTiers,
}

/// Totals a rate is computed from. `wei_raised` is always the volume
/// accepted before the contribution being priced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateContext {
    pub wei_raised: Uint128,
    pub elapsed: u64,
}

impl RateSchedule {
    /// Schedule with a single flat rate.
    pub fn flat(rate: u64) -> Self {
        RateSchedule {
            default_rate: rate,
            presale: None,
            tiers: RateTiers::Volume(vec![]),
        }
    }

    pub fn is_presale(&self, elapsed: u64) -> bool {
        self.presale
            .as_ref()
            .map(|presale| elapsed < presale.duration)
            .unwrap_or(false)
    }

    pub fn rate_for(&self, ctx: &RateContext) -> u64 {
        if let Some(presale) = &self.presale {
            if ctx.elapsed < presale.duration {
                return presale.rate;
            }
        }
        let tier_rate = match &self.tiers {
            RateTiers::Volume(tiers) => tiers
                .iter()
                .find(|tier| ctx.wei_raised < tier.threshold)
                .map(|tier| tier.rate),
            RateTiers::Time(tiers) => tiers
                .iter()
                .find(|tier| ctx.elapsed < tier.offset)
                .map(|tier| tier.rate),
        };
        tier_rate.unwrap_or(self.default_rate)
    }

    pub fn check_integrity(&self) -> Result<(), RateScheduleError> {
        if self.default_rate == 0 {
            return Err(RateScheduleError::InvalidDefaultRate {});
        }
        if let Some(presale) = &self.presale {
            if presale.duration == 0 || presale.rate == 0 || presale.cap.is_zero() {
                return Err(RateScheduleError::InvalidPresale {});
            }
        }
        let rates: Vec<u64> = match &self.tiers {
            RateTiers::Volume(tiers) => {
                if tiers.windows(2).any(|w| w[0].threshold >= w[1].threshold) {
                    return Err(RateScheduleError::ThresholdsNotIncreasing {});
                }
                tiers.iter().map(|tier| tier.rate).collect()
            }
            RateTiers::Time(tiers) => {
                if tiers.windows(2).any(|w| w[0].offset >= w[1].offset) {
                    return Err(RateScheduleError::ThresholdsNotIncreasing {});
                }
                tiers.iter().map(|tier| tier.rate).collect()
            }
        };
        if rates.iter().any(|rate| *rate == 0) {
            return Err(RateScheduleError::InvalidTierRate {});
        }
        // Every tier rate must be >= the next one, and the last >= default
        let mut chain = rates.clone();
        chain.push(self.default_rate);
        if chain.windows(2).any(|w| w[0] < w[1]) {
            return Err(RateScheduleError::RatesNotMonotonic {});
        }
        Ok(())
    }
}
