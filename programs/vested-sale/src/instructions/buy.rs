use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount},
};

use crate::constants::*;
use crate::errors::SaleError;
use crate::oracle::{resolve_price, PythPriceSource};
use crate::state::*;

/// Buys tokens with `amount_in` lamports.
///
/// The lamports go straight to the treasury. One sixth of the fee-adjusted
/// amount is released now (after a second pass of the fee factor); the
/// rest is added to the buyer's vesting schedule.
pub fn buy(ctx: Context<Buy>, amount_in: u64) -> Result<()> {
    let clock = Clock::get()?;
    acquire_guard(&mut ctx.accounts.sale_state, ctx.program_id)?;

    let price_feed = ctx.accounts.price_feed.to_account_info();
    let price = resolve_price(
        &ctx.accounts.sale_state,
        &PythPriceSource::new(&price_feed),
        clock.unix_timestamp,
    );

    let buyer = ctx.accounts.buyer.key();
    ctx.accounts
        .vesting_schedule
        .open(buyer, ctx.bumps.vesting_schedule);
    let quote = ctx
        .accounts
        .sale_state
        .process_purchase(&mut ctx.accounts.vesting_schedule, amount_in, price)?;

    // ========================================================================
    // FORWARD PROCEEDS TO TREASURY
    // ========================================================================

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
            },
        ),
        amount_in,
    )?;

    // ========================================================================
    // IMMEDIATE RELEASE FROM VAULT
    // ========================================================================

    if quote.immediate_payout > 0 {
        let sale_key = ctx.accounts.sale_state.key();
        let seeds = &[SEED_VAULT, sale_key.as_ref(), &[ctx.bumps.token_vault]];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.token_vault.to_account_info(),
                    to: ctx.accounts.buyer_token_account.to_account_info(),
                    authority: ctx.accounts.token_vault.to_account_info(),
                },
                signer_seeds,
            ),
            quote.immediate_payout,
        )?;
    }

    emit!(crate::TokensPurchased {
        buyer,
        amount_in,
        token_amount: quote.adjusted,
        immediate_release: quote.immediate_payout,
        vesting_amount: quote.vesting,
        price,
    });

    ctx.accounts.sale_state.release_guard();
    Ok(())
}

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE_STATE],
        bump = sale_state.bump,
    )]
    pub sale_state: Box<Account<'info, SaleState>>,

    /// Buyer's schedule (created on first purchase)
    #[account(
        init_if_needed,
        payer = buyer,
        space = VestingSchedule::LEN,
        seeds = [SEED_SCHEDULE, buyer.key().as_ref()],
        bump
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    /// CHECK: Must be the configured feed; parsed by the Pyth SDK
    #[account(
        constraint = price_feed.key() == sale_state.price_feed @ SaleError::InvalidPriceFeed
    )]
    pub price_feed: UncheckedAccount<'info>,

    /// CHECK: Validated against sale_state.treasury
    #[account(
        mut,
        constraint = treasury.key() == sale_state.treasury @ SaleError::InvalidTreasury
    )]
    pub treasury: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale_state.key().as_ref()],
        bump,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = token_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        constraint = token_mint.key() == sale_state.token_mint @ SaleError::InvalidTokenMint
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
