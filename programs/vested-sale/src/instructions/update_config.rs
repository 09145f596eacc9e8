use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::SaleError;
use crate::state::*;

// Operator setters. Each takes effect immediately.

pub fn set_fee(ctx: Context<UpdateConfig>, numerator: u64, denominator: u64) -> Result<()> {
    ctx.accounts.sale_state.set_fee(numerator, denominator)?;

    emit!(crate::FeeUpdated {
        numerator,
        denominator,
    });

    Ok(())
}

pub fn update_price(ctx: Context<UpdateConfig>, native_price_usd: u128) -> Result<()> {
    ctx.accounts.sale_state.set_fallback_price(native_price_usd)?;

    emit!(crate::FallbackPriceUpdated { native_price_usd });

    Ok(())
}

pub fn set_price_feed(ctx: Context<UpdateConfig>, price_feed: Pubkey) -> Result<()> {
    ctx.accounts.sale_state.set_price_feed(price_feed)?;

    emit!(crate::PriceFeedUpdated { price_feed });

    Ok(())
}

pub fn set_use_fallback_price(ctx: Context<UpdateConfig>, use_fallback_price: bool) -> Result<()> {
    ctx.accounts.sale_state.use_fallback_price = use_fallback_price;

    emit!(crate::UseFallbackPriceUpdated { use_fallback_price });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = admin.key() == sale_state.admin @ SaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE_STATE],
        bump = sale_state.bump
    )]
    pub sale_state: Account<'info, SaleState>,
}
