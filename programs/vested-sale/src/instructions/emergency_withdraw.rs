use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::SaleError;
use crate::math;
use crate::state::*;

/// Sweeps lamports held by the sale account above its rent-exempt minimum.
pub fn emergency_withdraw_native(ctx: Context<EmergencyWithdrawNative>) -> Result<()> {
    acquire_guard(&mut ctx.accounts.sale_state, ctx.program_id)?;

    let sale_info = ctx.accounts.sale_state.to_account_info();
    let admin_info = ctx.accounts.admin.to_account_info();
    let rent_floor = Rent::get()?.minimum_balance(sale_info.data_len());
    let amount = math::recoverable_lamports(sale_info.lamports(), rent_floor)?;

    {
        let mut sale_lamports = sale_info.try_borrow_mut_lamports()?;
        **sale_lamports = (**sale_lamports)
            .checked_sub(amount)
            .ok_or(SaleError::MathOverflow)?;
        let mut admin_lamports = admin_info.try_borrow_mut_lamports()?;
        **admin_lamports = (**admin_lamports)
            .checked_add(amount)
            .ok_or(SaleError::MathOverflow)?;
    }

    emit!(crate::EmergencyWithdrawal {
        admin: admin_info.key(),
        mint: Pubkey::default(),
        amount,
    });

    ctx.accounts.sale_state.release_guard();
    Ok(())
}

/// Moves `amount` tokens out of the vault to the admin, bypassing the sale
/// and vesting bookkeeping.
pub fn emergency_withdraw_token(ctx: Context<EmergencyWithdrawToken>, amount: u64) -> Result<()> {
    acquire_guard(&mut ctx.accounts.sale_state, ctx.program_id)?;

    require!(amount > 0, SaleError::ZeroAmount);
    require!(ctx.accounts.token_vault.amount > 0, SaleError::NothingToRecover);
    require!(
        ctx.accounts.token_vault.amount >= amount,
        SaleError::InsufficientVaultBalance
    );

    let sale_key = ctx.accounts.sale_state.key();
    let seeds = &[SEED_VAULT, sale_key.as_ref(), &[ctx.bumps.token_vault]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_vault.to_account_info(),
                to: ctx.accounts.admin_token_account.to_account_info(),
                authority: ctx.accounts.token_vault.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(crate::EmergencyWithdrawal {
        admin: ctx.accounts.admin.key(),
        mint: ctx.accounts.sale_state.token_mint,
        amount,
    });

    ctx.accounts.sale_state.release_guard();
    Ok(())
}

#[derive(Accounts)]
pub struct EmergencyWithdrawNative<'info> {
    #[account(
        mut,
        constraint = admin.key() == sale_state.admin @ SaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE_STATE],
        bump = sale_state.bump,
    )]
    pub sale_state: Account<'info, SaleState>,
}

#[derive(Accounts)]
pub struct EmergencyWithdrawToken<'info> {
    #[account(
        constraint = admin.key() == sale_state.admin @ SaleError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_SALE_STATE],
        bump = sale_state.bump,
    )]
    pub sale_state: Account<'info, SaleState>,

    #[account(
        mut,
        seeds = [SEED_VAULT, sale_state.key().as_ref()],
        bump,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = admin_token_account.owner == admin.key() @ SaleError::InvalidTokenAccount,
        constraint = admin_token_account.mint == sale_state.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
