use anchor_lang::prelude::*;

use crate::errors::SaleError;
use crate::instructions::SaleParams;
use crate::math::{self, PurchaseQuote};
use crate::state::VestingSchedule;

type SaleResult<T> = std::result::Result<T, SaleError>;

/// Global state of the sale.
///
/// Lifecycle: `Active ⇄ Paused → VestingLaunched`. The vesting latch is
/// one-way and ends purchasing for good; the launch time is the shared
/// epoch of every participant's vesting clock.
#[account]
#[derive(Default)]
pub struct SaleState {
    /// Operator allowed to pause, launch and reconfigure the sale
    pub admin: Pubkey,
    /// Wallet receiving every purchase's lamports
    pub treasury: Pubkey,
    /// Mint of the token being sold
    pub token_mint: Pubkey,
    /// Pyth SOL/USD price account
    pub price_feed: Pubkey,
    /// Decimals of the token being sold
    pub token_decimals: u8,
    /// USD price of one whole token, 18 decimals
    pub token_price_usd: u128,
    /// Manual USD price of one SOL, 18 decimals
    pub native_price_usd: u128,
    /// Skip the oracle and always use `native_price_usd`
    pub use_fallback_price: bool,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
    /// Inventory fixed at initialization
    pub total_supply_for_sale: u64,
    /// Inventory left; never exceeds `total_supply_for_sale`
    pub tokens_available: u64,
    /// Length of one vesting portion in seconds
    pub portion_duration: i64,
    pub paused: bool,
    pub vesting_launched: bool,
    pub vesting_launch_time: i64,
    /// Set while a guarded instruction runs
    pub entered: bool,
    /// Lamports forwarded to the treasury
    pub total_raised: u64,
    /// Gross tokens released by claims
    pub total_claimed: u64,
    /// PDA bump seed
    pub bump: u8,
}

/// Amounts recognised by one claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// Entitlement consumed, booked against `claimed`
    pub gross: u64,
    /// `gross` after the fee factor; the amount transferred
    pub net: u64,
}

impl SaleState {
    pub const LEN: usize = 8 +  // discriminator
        32 +  // admin
        32 +  // treasury
        32 +  // token_mint
        32 +  // price_feed
        1 +   // token_decimals
        16 +  // token_price_usd
        16 +  // native_price_usd
        1 +   // use_fallback_price
        8 +   // fee_numerator
        8 +   // fee_denominator
        8 +   // total_supply_for_sale
        8 +   // tokens_available
        8 +   // portion_duration
        1 +   // paused
        1 +   // vesting_launched
        8 +   // vesting_launch_time
        1 +   // entered
        8 +   // total_raised
        8 +   // total_claimed
        1 +   // bump
        64;   // padding for future use

    pub fn configure(
        &mut self,
        admin: Pubkey,
        token_mint: Pubkey,
        token_decimals: u8,
        params: &SaleParams,
        bump: u8,
    ) -> SaleResult<()> {
        if params.treasury == Pubkey::default() || params.price_feed == Pubkey::default() {
            return Err(SaleError::InvalidAddress);
        }
        if params.token_price_usd == 0 || params.native_price_usd == 0 {
            return Err(SaleError::InvalidPrice);
        }
        if params.fee_denominator == 0 {
            return Err(SaleError::InvalidFee);
        }
        if params.total_supply_for_sale == 0 {
            return Err(SaleError::ZeroAmount);
        }
        if params.portion_duration <= 0 {
            return Err(SaleError::InvalidPortionDuration);
        }

        *self = SaleState {
            admin,
            treasury: params.treasury,
            token_mint,
            price_feed: params.price_feed,
            token_decimals,
            token_price_usd: params.token_price_usd,
            native_price_usd: params.native_price_usd,
            use_fallback_price: false,
            fee_numerator: params.fee_numerator,
            fee_denominator: params.fee_denominator,
            total_supply_for_sale: params.total_supply_for_sale,
            tokens_available: params.total_supply_for_sale,
            portion_duration: params.portion_duration,
            bump,
            ..SaleState::default()
        };
        Ok(())
    }

    pub fn is_sale_active(&self) -> bool {
        !self.paused && self.tokens_available > 0 && !self.vesting_launched
    }

    // reentrancy guard

    pub fn enter_guard(&mut self) -> SaleResult<()> {
        if self.entered {
            return Err(SaleError::Reentrancy);
        }
        self.entered = true;
        Ok(())
    }

    pub fn release_guard(&mut self) {
        self.entered = false;
    }

    // purchases

    pub fn ensure_purchasable(&self) -> SaleResult<()> {
        if self.paused {
            return Err(SaleError::SalePaused);
        }
        if self.tokens_available == 0 {
            return Err(SaleError::SoldOut);
        }
        if self.vesting_launched {
            return Err(SaleError::VestingAlreadyLaunched);
        }
        Ok(())
    }

    /// Books a purchase of `lamports` at `native_price_usd` against the
    /// inventory and the buyer's schedule. Nothing is written unless every
    /// check passes.
    pub fn process_purchase(
        &mut self,
        schedule: &mut VestingSchedule,
        lamports: u64,
        native_price_usd: u128,
    ) -> SaleResult<PurchaseQuote> {
        self.ensure_purchasable()?;
        if lamports == 0 {
            return Err(SaleError::ZeroAmount);
        }
        if native_price_usd == 0 {
            return Err(SaleError::InvalidPrice);
        }

        let quote = math::quote_purchase(
            lamports,
            self.token_price_usd,
            native_price_usd,
            self.token_decimals,
            self.fee_numerator,
            self.fee_denominator,
        )?;
        if quote.adjusted == 0 {
            return Err(SaleError::ZeroTokenAmount);
        }
        if quote.adjusted > self.tokens_available {
            return Err(SaleError::InsufficientInventory);
        }
        let total_raised = self
            .total_raised
            .checked_add(lamports)
            .ok_or(SaleError::MathOverflow)?;

        schedule.add_allocation(quote.vesting)?;
        self.tokens_available -= quote.adjusted;
        self.total_raised = total_raised;

        Ok(quote)
    }

    // vesting

    pub fn elapsed_portions(&self, now: i64) -> SaleResult<u64> {
        if !self.vesting_launched {
            return Ok(0);
        }
        math::elapsed_portions(now, self.vesting_launch_time, self.portion_duration)
    }

    /// Gross amount `process_claim` would release at `now`.
    pub fn claimable_for(&self, schedule: &VestingSchedule, now: i64) -> SaleResult<u64> {
        schedule.claimable(self.elapsed_portions(now)?)
    }

    pub fn process_claim(
        &mut self,
        schedule: &mut VestingSchedule,
        now: i64,
    ) -> SaleResult<ClaimOutcome> {
        if !schedule.is_initialized() {
            return Err(SaleError::NoVestingSchedule);
        }
        if !self.vesting_launched {
            return Err(SaleError::VestingNotLaunched);
        }
        let portions = self.elapsed_portions(now)?;
        if portions == 0 {
            return Err(SaleError::NothingToClaim);
        }
        let gross = schedule.claimable(portions)?;
        if gross == 0 {
            return Err(SaleError::NothingToClaim);
        }
        let net = math::apply_fee(gross, self.fee_numerator, self.fee_denominator)?;
        let total_claimed = self
            .total_claimed
            .checked_add(gross)
            .ok_or(SaleError::MathOverflow)?;

        schedule.record_claim(gross)?;
        self.total_claimed = total_claimed;

        Ok(ClaimOutcome { gross, net })
    }

    /// `u64::MAX` until vesting launches.
    pub fn seconds_until_next_portion(&self, now: i64) -> SaleResult<u64> {
        if !self.vesting_launched {
            return Ok(u64::MAX);
        }
        math::seconds_until_next_portion(now, self.vesting_launch_time, self.portion_duration)
    }

    /// `u64::MAX` until vesting launches.
    pub fn seconds_until_fully_vested(&self, now: i64) -> SaleResult<u64> {
        if !self.vesting_launched {
            return Ok(u64::MAX);
        }
        math::seconds_until_fully_vested(now, self.vesting_launch_time, self.portion_duration)
    }

    // lifecycle

    pub fn pause(&mut self) -> SaleResult<()> {
        if self.paused {
            return Err(SaleError::AlreadyPaused);
        }
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> SaleResult<()> {
        if !self.paused {
            return Err(SaleError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }

    pub fn launch_vesting(&mut self, now: i64) -> SaleResult<()> {
        if self.vesting_launched {
            return Err(SaleError::VestingAlreadyLaunched);
        }
        self.vesting_launched = true;
        self.vesting_launch_time = now;
        Ok(())
    }

    pub fn set_portion_duration(&mut self, portion_duration: i64) -> SaleResult<()> {
        if portion_duration <= 0 {
            return Err(SaleError::InvalidPortionDuration);
        }
        if self.vesting_launched {
            return Err(SaleError::ParametersLocked);
        }
        self.portion_duration = portion_duration;
        Ok(())
    }

    // parameters

    pub fn set_fee(&mut self, numerator: u64, denominator: u64) -> SaleResult<()> {
        if denominator == 0 {
            return Err(SaleError::InvalidFee);
        }
        self.fee_numerator = numerator;
        self.fee_denominator = denominator;
        Ok(())
    }

    pub fn set_fallback_price(&mut self, native_price_usd: u128) -> SaleResult<()> {
        if native_price_usd == 0 {
            return Err(SaleError::InvalidPrice);
        }
        self.native_price_usd = native_price_usd;
        Ok(())
    }

    pub fn set_price_feed(&mut self, price_feed: Pubkey) -> SaleResult<()> {
        if price_feed == Pubkey::default() {
            return Err(SaleError::InvalidAddress);
        }
        self.price_feed = price_feed;
        Ok(())
    }
}

/// Sets the reentrancy flag and writes it to account data at once.
///
/// Anchor serializes `Account` data only when the instruction returns, so
/// the flag must be flushed here for an invocation nested under one of our
/// CPIs to load it set. Call before any CPI; `release_guard` is persisted by
/// the normal write-back.
pub fn acquire_guard(sale: &mut Account<'_, SaleState>, program_id: &Pubkey) -> Result<()> {
    sale.enter_guard()?;
    sale.exit(program_id)
}
