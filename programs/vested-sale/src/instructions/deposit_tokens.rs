use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::SaleError;
use crate::state::*;

/// Funds the vault that immediate releases and claims are paid from.
pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, SaleError::ZeroAmount);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.admin_token_account.to_account_info(),
                to: ctx.accounts.token_vault.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(crate::TokensDeposited {
        admin: ctx.accounts.admin.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(
        mut,
        constraint = admin.key() == sale_state.admin @ SaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(seeds = [SEED_SALE_STATE], bump = sale_state.bump)]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        mut,
        constraint = admin_token_account.owner == admin.key() @ SaleError::InvalidTokenAccount,
        constraint = admin_token_account.mint == sale_state.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale_state.key().as_ref()],
        bump,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
