use anchor_lang::prelude::*;

#[constant]
pub const SEED_SALE_STATE: &[u8] = b"sale_state";
#[constant]
pub const SEED_SCHEDULE: &[u8] = b"schedule";
#[constant]
pub const SEED_VAULT: &[u8] = b"vault";

/// Number of equal vesting portions; also the immediate-release divisor.
pub const VESTING_PORTIONS: u64 = 6;

/// Fractional digits of every USD price held by the sale.
pub const PRICE_DECIMALS: u32 = 18;

/// Oracle prices older than this are treated as unavailable.
pub const MAX_PRICE_AGE_SECS: u64 = 60;
