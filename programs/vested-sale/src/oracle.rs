//! SOL/USD price resolution.
//!
//! The oracle is only ever asked for its latest price. Any failure, a stale
//! reading or a non-positive value falls back to the operator's manual
//! price; resolution itself never fails.

use anchor_lang::prelude::*;
use pyth_sdk_solana::state::SolanaPriceAccount;

use crate::constants::{MAX_PRICE_AGE_SECS, PRICE_DECIMALS};
use crate::errors::SaleError;
use crate::state::SaleState;

/// Raw oracle reading: `price * 10^expo` USD per SOL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OraclePrice {
    pub price: i64,
    pub expo: i32,
}

pub trait PriceSource {
    fn latest_price(&self, now: i64) -> std::result::Result<OraclePrice, SaleError>;
}

/// Pyth price account read through the Solana SDK bindings.
pub struct PythPriceSource<'a, 'info> {
    account: &'a AccountInfo<'info>,
}

impl<'a, 'info> PythPriceSource<'a, 'info> {
    pub fn new(account: &'a AccountInfo<'info>) -> Self {
        Self { account }
    }
}

impl PriceSource for PythPriceSource<'_, '_> {
    fn latest_price(&self, now: i64) -> std::result::Result<OraclePrice, SaleError> {
        let feed = SolanaPriceAccount::account_info_to_feed(self.account)
            .map_err(|_| SaleError::InvalidPriceFeed)?;
        let price = feed
            .get_price_no_older_than(now, MAX_PRICE_AGE_SECS)
            .ok_or(SaleError::StalePrice)?;
        Ok(OraclePrice {
            price: price.price,
            expo: price.expo,
        })
    }
}

/// Rescales a reading to `PRICE_DECIMALS` fractional digits. `None` for
/// non-positive or unrepresentable readings.
pub fn scale_to_price_decimals(reading: OraclePrice) -> Option<u128> {
    if reading.price <= 0 {
        return None;
    }
    let price = reading.price as u128;
    let shift = PRICE_DECIMALS as i64 + reading.expo as i64;
    let scaled = if shift >= 0 {
        price.checked_mul(10u128.checked_pow(shift as u32)?)?
    } else {
        match 10u128.checked_pow(shift.unsigned_abs() as u32) {
            Some(divisor) => price / divisor,
            None => 0,
        }
    };
    (scaled > 0).then_some(scaled)
}

/// USD price of one SOL with 18 decimals.
pub fn resolve_price<S: PriceSource + ?Sized>(sale: &SaleState, source: &S, now: i64) -> u128 {
    if sale.use_fallback_price {
        return sale.native_price_usd;
    }
    match source.latest_price(now) {
        Ok(reading) => match scale_to_price_decimals(reading) {
            Some(price) => price,
            None => {
                msg!("Oracle price {:?} unusable, using fallback price", reading);
                sale.native_price_usd
            }
        },
        Err(err) => {
            msg!("Oracle unavailable ({}), using fallback price", err);
            sale.native_price_usd
        }
    }
}
