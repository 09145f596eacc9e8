//! Fixed-point pricing and vesting arithmetic.
//!
//! Amounts are `u64` base units; every product is taken in `u128` and
//! narrowed back with a checked conversion.

use solana_program::native_token::LAMPORTS_PER_SOL;

use crate::constants::VESTING_PORTIONS;
use crate::errors::SaleError;

pub type MathResult<T> = std::result::Result<T, SaleError>;

/// Token amounts produced by a single purchase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PurchaseQuote {
    /// Tokens bought at the resolved price, before the fee factor.
    pub gross: u64,
    /// `gross` scaled by the fee factor; this is what leaves inventory.
    pub adjusted: u64,
    /// One sixth of `adjusted`, released at purchase time.
    pub immediate: u64,
    /// `adjusted - immediate`, locked until vesting.
    pub vesting: u64,
    /// `immediate` scaled by the fee factor a second time; the amount
    /// actually transferred to the buyer.
    pub immediate_payout: u64,
}

fn narrow(value: u128) -> MathResult<u64> {
    u64::try_from(value).map_err(|_| SaleError::MathOverflow)
}

/// Scales `amount` by `numerator / denominator`, truncating.
pub fn apply_fee(amount: u64, numerator: u64, denominator: u64) -> MathResult<u64> {
    if denominator == 0 {
        return Err(SaleError::InvalidFee);
    }
    let scaled = (amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(SaleError::MathOverflow)?
        / denominator as u128;
    narrow(scaled)
}

/// Lamports needed for one whole sale token.
///
/// Both prices carry 18 fractional digits, so they cancel and the result is
/// expressed in the native asset's own base unit.
pub fn token_price_in_lamports(token_price_usd: u128, native_price_usd: u128) -> MathResult<u128> {
    if native_price_usd == 0 {
        return Err(SaleError::InvalidPrice);
    }
    let price = token_price_usd
        .checked_mul(LAMPORTS_PER_SOL as u128)
        .ok_or(SaleError::MathOverflow)?
        / native_price_usd;
    if price == 0 {
        return Err(SaleError::InvalidPrice);
    }
    Ok(price)
}

/// Sale-token base units bought with `lamports` at the given prices.
pub fn tokens_for_lamports(
    lamports: u64,
    token_price_usd: u128,
    native_price_usd: u128,
    token_decimals: u8,
) -> MathResult<u64> {
    let price_in_lamports = token_price_in_lamports(token_price_usd, native_price_usd)?;
    let one_token = 10u128
        .checked_pow(token_decimals as u32)
        .ok_or(SaleError::MathOverflow)?;
    let tokens = (lamports as u128)
        .checked_mul(one_token)
        .ok_or(SaleError::MathOverflow)?
        / price_in_lamports;
    narrow(tokens)
}

/// Full purchase breakdown: price conversion, fee factor, immediate/vesting
/// split and the second haircut on the immediate slice.
pub fn quote_purchase(
    lamports: u64,
    token_price_usd: u128,
    native_price_usd: u128,
    token_decimals: u8,
    fee_numerator: u64,
    fee_denominator: u64,
) -> MathResult<PurchaseQuote> {
    let gross = tokens_for_lamports(lamports, token_price_usd, native_price_usd, token_decimals)?;
    let adjusted = apply_fee(gross, fee_numerator, fee_denominator)?;
    let immediate = adjusted / VESTING_PORTIONS;
    let vesting = adjusted - immediate;
    let immediate_payout = apply_fee(immediate, fee_numerator, fee_denominator)?;

    Ok(PurchaseQuote {
        gross,
        adjusted,
        immediate,
        vesting,
        immediate_payout,
    })
}

/// Whole portions elapsed since launch, capped at `VESTING_PORTIONS`.
pub fn elapsed_portions(now: i64, launch_time: i64, portion_duration: i64) -> MathResult<u64> {
    if portion_duration <= 0 {
        return Err(SaleError::InvalidPortionDuration);
    }
    if now <= launch_time {
        return Ok(0);
    }
    let elapsed = now.checked_sub(launch_time).ok_or(SaleError::MathOverflow)?;
    let portions = (elapsed / portion_duration) as u64;
    Ok(portions.min(VESTING_PORTIONS))
}

/// Gross amount of `total_allocated` unlocked after `portions` intervals.
pub fn vested_amount(total_allocated: u64, portions: u64) -> MathResult<u64> {
    let portions = portions.min(VESTING_PORTIONS);
    let vested = (total_allocated as u128)
        .checked_mul(portions as u128)
        .ok_or(SaleError::MathOverflow)?
        / VESTING_PORTIONS as u128;
    narrow(vested)
}

/// Seconds until the next portion boundary; zero once every portion has
/// elapsed.
pub fn seconds_until_next_portion(
    now: i64,
    launch_time: i64,
    portion_duration: i64,
) -> MathResult<u64> {
    let portions = elapsed_portions(now, launch_time, portion_duration)?;
    if portions >= VESTING_PORTIONS {
        return Ok(0);
    }
    let next_boundary = portion_duration
        .checked_mul(portions as i64 + 1)
        .and_then(|offset| launch_time.checked_add(offset))
        .ok_or(SaleError::MathOverflow)?;
    let remaining = next_boundary.checked_sub(now).ok_or(SaleError::MathOverflow)?;
    Ok(remaining.max(0) as u64)
}

pub fn seconds_until_fully_vested(
    now: i64,
    launch_time: i64,
    portion_duration: i64,
) -> MathResult<u64> {
    if portion_duration <= 0 {
        return Err(SaleError::InvalidPortionDuration);
    }
    let vesting_end = portion_duration
        .checked_mul(VESTING_PORTIONS as i64)
        .and_then(|span| launch_time.checked_add(span))
        .ok_or(SaleError::MathOverflow)?;
    let remaining = vesting_end.checked_sub(now).ok_or(SaleError::MathOverflow)?;
    Ok(remaining.max(0) as u64)
}

/// Lamports an account holds above its rent-exempt floor.
pub fn recoverable_lamports(balance: u64, rent_exempt_minimum: u64) -> MathResult<u64> {
    match balance.saturating_sub(rent_exempt_minimum) {
        0 => Err(SaleError::NothingToRecover),
        amount => Ok(amount),
    }
}
