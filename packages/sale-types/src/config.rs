use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use thiserror::Error;

use crate::rates::{RateContext, RateSchedule, RateScheduleError};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error(transparent)]
    RateSchedule(#[from] RateScheduleError),

    #[error("Invalid start time")]
    InvalidStartTime {},

    #[error("Invalid end time")]
    InvalidEndTime {},

    #[error("Sale must last at least {min_duration} seconds")]
    SaleTooShort { min_duration: u64 },

    #[error("Invalid cap")]
    InvalidCap {},

    #[error("Invalid goal")]
    InvalidGoal {},

    #[error("Invalid accepted denom")]
    InvalidDenom {},

    #[error("Presale must end before the sale does")]
    PresaleTooLong {},
}

#[cw_serde]
pub struct SaleConfig {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub wallet: Addr,
    pub accepted_denom: String,
    pub min_contribution: Uint128,
    pub min_duration: u64,
    pub cap: Option<Uint128>,
    pub goal: Option<Uint128>,
    pub whitelist_required: bool,
    pub rate_schedule: RateSchedule,
}

impl SaleConfig {
    pub fn check_integrity(&self, now: Timestamp) -> Result<(), ConfigurationError> {
        if self.start_time <= now {
            return Err(ConfigurationError::InvalidStartTime {});
        }
        if self.end_time <= self.start_time {
            return Err(ConfigurationError::InvalidEndTime {});
        }
        if self.duration() < self.min_duration {
            return Err(ConfigurationError::SaleTooShort {
                min_duration: self.min_duration,
            });
        }
        if self.accepted_denom.is_empty() {
            return Err(ConfigurationError::InvalidDenom {});
        }
        if self.cap == Some(Uint128::zero()) {
            return Err(ConfigurationError::InvalidCap {});
        }
        if let Some(goal) = self.goal {
            match self.cap {
                Some(cap) if !goal.is_zero() && goal <= cap => {}
                _ => return Err(ConfigurationError::InvalidGoal {}),
            }
        }
        if let Some(presale) = &self.rate_schedule.presale {
            if presale.duration > self.duration() {
                return Err(ConfigurationError::PresaleTooLong {});
            }
        }
        self.rate_schedule.check_integrity()?;
        Ok(())
    }

    pub fn duration(&self) -> u64 {
        self.end_time.seconds() - self.start_time.seconds()
    }

    pub fn is_refundable(&self) -> bool {
        self.goal.is_some()
    }

    /// Inside `[start_time, end_time]`, cap not filled.
    pub fn is_open(&self, now: Timestamp, wei_raised: Uint128) -> bool {
        let within_window = now >= self.start_time && now <= self.end_time;
        let below_cap = self.cap.map(|cap| wei_raised < cap).unwrap_or(true);
        within_window && below_cap
    }

    pub fn has_ended(&self, now: Timestamp, wei_raised: Uint128) -> bool {
        let cap_reached = self.cap.map(|cap| wei_raised >= cap).unwrap_or(false);
        now > self.end_time || cap_reached
    }

    pub fn presale_cap_reached(&self, now: Timestamp, wei_raised: Uint128) -> bool {
        match &self.rate_schedule.presale {
            Some(presale) => {
                self.rate_schedule.is_presale(self.elapsed(now)) && wei_raised >= presale.cap
            }
            None => false,
        }
    }

    pub fn rate_at(&self, now: Timestamp, wei_raised: Uint128) -> u64 {
        self.rate_schedule.rate_for(&RateContext {
            wei_raised,
            elapsed: self.elapsed(now),
        })
    }

    fn elapsed(&self, now: Timestamp) -> u64 {
        now.seconds().saturating_sub(self.start_time.seconds())
    }
}
