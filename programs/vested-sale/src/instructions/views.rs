use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::SaleError;
use crate::oracle::{resolve_price, PythPriceSource};
use crate::state::*;

// Read-only queries. Results are returned through Anchor return data; no
// account is writable.

pub fn current_price(ctx: Context<PriceView>) -> Result<u128> {
    let now = Clock::get()?.unix_timestamp;
    let price_feed = ctx.accounts.price_feed.to_account_info();
    Ok(resolve_price(
        &ctx.accounts.sale_state,
        &PythPriceSource::new(&price_feed),
        now,
    ))
}

pub fn sale_active(ctx: Context<SaleView>) -> Result<bool> {
    Ok(ctx.accounts.sale_state.is_sale_active())
}

pub fn seconds_until_next_portion(ctx: Context<SaleView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.sale_state.seconds_until_next_portion(now)?)
}

pub fn seconds_until_fully_vested(ctx: Context<SaleView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.sale_state.seconds_until_fully_vested(now)?)
}

pub fn locked_balance(ctx: Context<ScheduleView>, _participant: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.vesting_schedule.locked_balance())
}

pub fn claimed_amount(ctx: Context<ScheduleView>, _participant: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.vesting_schedule.claimed)
}

pub fn claimable_amount(ctx: Context<ScheduleView>, _participant: Pubkey) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx
        .accounts
        .sale_state
        .claimable_for(&ctx.accounts.vesting_schedule, now)?)
}

#[derive(Accounts)]
pub struct SaleView<'info> {
    #[account(seeds = [SEED_SALE_STATE], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,
}

#[derive(Accounts)]
pub struct PriceView<'info> {
    #[account(seeds = [SEED_SALE_STATE], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    /// CHECK: Must be the configured feed; parsed by the Pyth SDK
    #[account(
        constraint = price_feed.key() == sale_state.price_feed @ SaleError::InvalidPriceFeed
    )]
    pub price_feed: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct ScheduleView<'info> {
    #[account(seeds = [SEED_SALE_STATE], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        seeds = [SEED_SCHEDULE, participant.as_ref()],
        bump = vesting_schedule.bump,
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,
}
