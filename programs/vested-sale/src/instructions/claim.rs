use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Mint, Token, TokenAccount, Transfer},
};

use crate::constants::*;
use crate::errors::SaleError;
use crate::state::*;

/// Claims the vested portions unlocked since the last claim.
///
/// Vesting math, with `launch` the global vesting launch time:
/// ```text
/// portions  = min(6, (now - launch) / portion_duration)
/// unlocked  = total_allocated * portions / 6
/// claimable = unlocked - claimed
/// paid      = claimable * fee_numerator / fee_denominator
/// ```
/// `claimed` advances by `claimable`, not by what is paid.
pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    acquire_guard(&mut ctx.accounts.sale_state, ctx.program_id)?;

    let schedule_info = ctx.accounts.vesting_schedule.to_account_info();
    let mut schedule = load_schedule(&schedule_info, &ctx.accounts.claimant.key())?;
    let outcome = ctx.accounts.sale_state.process_claim(&mut schedule, now)?;

    let sale_key = ctx.accounts.sale_state.key();
    let seeds = &[SEED_VAULT, sale_key.as_ref(), &[ctx.bumps.token_vault]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_vault.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: ctx.accounts.token_vault.to_account_info(),
            },
            signer_seeds,
        ),
        outcome.net,
    )?;

    schedule.exit(ctx.program_id)?;
    emit!(crate::TokensClaimed {
        participant: schedule.participant,
        amount: outcome.gross,
        net_amount: outcome.net,
        total_claimed: schedule.claimed,
        total_allocated: schedule.total_allocated,
    });

    ctx.accounts.sale_state.release_guard();
    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE_STATE],
        bump = sale_state.bump,
    )]
    pub sale_state: Box<Account<'info, SaleState>>,

    /// CHECK: Loaded by `load_schedule`, which rejects a missing schedule
    #[account(
        mut,
        seeds = [SEED_SCHEDULE, claimant.key().as_ref()],
        bump,
    )]
    pub vesting_schedule: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale_state.key().as_ref()],
        bump,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = claimant,
        associated_token::mint = token_mint,
        associated_token::authority = claimant,
    )]
    pub claimant_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        constraint = token_mint.key() == sale_state.token_mint @ SaleError::InvalidTokenMint
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
