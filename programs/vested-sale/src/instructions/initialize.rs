use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::state::*;

/// Parameters for creating the sale.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SaleParams {
    /// Wallet receiving purchase proceeds
    pub treasury: Pubkey,
    /// Pyth SOL/USD price account
    pub price_feed: Pubkey,
    /// USD price of one whole token, 18 decimals
    pub token_price_usd: u128,
    /// Manual SOL/USD price, 18 decimals
    pub native_price_usd: u128,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
    /// Tokens available for sale, in base units
    pub total_supply_for_sale: u64,
    /// Length of one vesting portion in seconds
    pub portion_duration: i64,
}

pub fn initialize(ctx: Context<Initialize>, params: SaleParams) -> Result<()> {
    let sale = &mut ctx.accounts.sale_state;
    sale.configure(
        ctx.accounts.admin.key(),
        ctx.accounts.token_mint.key(),
        ctx.accounts.token_mint.decimals,
        &params,
        ctx.bumps.sale_state,
    )?;

    emit!(crate::SaleInitialized {
        admin: sale.admin,
        treasury: sale.treasury,
        token_mint: sale.token_mint,
        price_feed: sale.price_feed,
        token_price_usd: sale.token_price_usd,
        total_supply_for_sale: sale.total_supply_for_sale,
        portion_duration: sale.portion_duration,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = SaleState::LEN,
        seeds = [SEED_SALE_STATE],
        bump
    )]
    pub sale_state: Account<'info, SaleState>,

    /// The token being sold (must already exist)
    pub token_mint: Account<'info, Mint>,

    /// Vault PDA holding the tokens for sale
    #[account(
        init,
        payer = admin,
        seeds = [SEED_VAULT, sale_state.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = token_vault,
    )]
    pub token_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
