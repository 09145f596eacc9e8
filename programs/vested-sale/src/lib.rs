use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod oracle;
pub mod state;

#[cfg(test)]
mod tests;

pub use instructions::*;

declare_id!("5aMZUuH7SFHJVsQKyasmukiT67TQF7zdyazNHh8YeLqV");

// ============================================================================
// PROGRAM
// ============================================================================

#[program]
pub mod vested_sale {
    use super::*;

    /// Creates the sale state and the token vault.
    ///
    /// The sale starts active and unpaused with its whole inventory
    /// available. Tokens must be deposited into the vault before immediate
    /// releases and claims can be paid.
    pub fn initialize(ctx: Context<Initialize>, params: SaleParams) -> Result<()> {
        instructions::initialize(ctx, params)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens(ctx, amount)
    }

    /// Purchases tokens with native SOL at the resolved SOL/USD price.
    ///
    /// # Checks
    /// - Sale not paused, not sold out, vesting not launched
    /// - Non-zero payment and price
    /// - Fee-adjusted token amount non-zero and within remaining inventory
    ///
    /// # Effects
    /// - `adjusted / 6` released immediately (fee factor applied again)
    /// - The remainder added to the buyer's vesting schedule
    /// - The full payment forwarded to the treasury
    pub fn buy(ctx: Context<Buy>, amount_in: u64) -> Result<()> {
        instructions::buy(ctx, amount_in)
    }

    /// Claims vested tokens. Only after `launch_vesting`.
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim(ctx)
    }

    pub fn pause(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::pause(ctx)
    }

    pub fn unpause(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::unpause(ctx)
    }

    /// Starts the shared vesting clock. One-time and irreversible; no
    /// purchases are accepted afterwards.
    pub fn launch_vesting(ctx: Context<UpdateConfig>) -> Result<()> {
        instructions::launch_vesting(ctx)
    }

    /// Sets the length of one vesting portion. Locked once vesting launches.
    pub fn set_portion_duration(ctx: Context<UpdateConfig>, portion_duration: i64) -> Result<()> {
        instructions::set_portion_duration(ctx, portion_duration)
    }

    pub fn set_fee(ctx: Context<UpdateConfig>, numerator: u64, denominator: u64) -> Result<()> {
        instructions::set_fee(ctx, numerator, denominator)
    }

    /// Sets the manual SOL/USD fallback price (18 decimals).
    pub fn update_price(ctx: Context<UpdateConfig>, native_price_usd: u128) -> Result<()> {
        instructions::update_price(ctx, native_price_usd)
    }

    pub fn set_price_feed(ctx: Context<UpdateConfig>, price_feed: Pubkey) -> Result<()> {
        instructions::set_price_feed(ctx, price_feed)
    }

    pub fn set_use_fallback_price(
        ctx: Context<UpdateConfig>,
        use_fallback_price: bool,
    ) -> Result<()> {
        instructions::set_use_fallback_price(ctx, use_fallback_price)
    }

    pub fn emergency_withdraw_native(ctx: Context<EmergencyWithdrawNative>) -> Result<()> {
        instructions::emergency_withdraw_native(ctx)
    }

    pub fn emergency_withdraw_token(
        ctx: Context<EmergencyWithdrawToken>,
        amount: u64,
    ) -> Result<()> {
        instructions::emergency_withdraw_token(ctx, amount)
    }

    pub fn current_price(ctx: Context<PriceView>) -> Result<u128> {
        instructions::current_price(ctx)
    }

    pub fn sale_active(ctx: Context<SaleView>) -> Result<bool> {
        instructions::sale_active(ctx)
    }

    /// `u64::MAX` before vesting launches, zero once fully vested.
    pub fn seconds_until_next_portion(ctx: Context<SaleView>) -> Result<u64> {
        instructions::seconds_until_next_portion(ctx)
    }

    /// `u64::MAX` before vesting launches.
    pub fn seconds_until_fully_vested(ctx: Context<SaleView>) -> Result<u64> {
        instructions::seconds_until_fully_vested(ctx)
    }

    pub fn locked_balance(ctx: Context<ScheduleView>, participant: Pubkey) -> Result<u64> {
        instructions::locked_balance(ctx, participant)
    }

    pub fn claimed_amount(ctx: Context<ScheduleView>, participant: Pubkey) -> Result<u64> {
        instructions::claimed_amount(ctx, participant)
    }

    pub fn claimable_amount(ctx: Context<ScheduleView>, participant: Pubkey) -> Result<u64> {
        instructions::claimable_amount(ctx, participant)
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct SaleInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub token_mint: Pubkey,
    pub price_feed: Pubkey,
    pub token_price_usd: u128,
    pub total_supply_for_sale: u64,
    pub portion_duration: i64,
}

#[event]
pub struct TokensDeposited {
    pub admin: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TokensPurchased {
    pub buyer: Pubkey,
    /// Lamports paid
    pub amount_in: u64,
    /// Fee-adjusted tokens allocated, before the immediate-release haircut
    pub token_amount: u64,
    /// Tokens transferred to the buyer now
    pub immediate_release: u64,
    /// Tokens added to the buyer's schedule
    pub vesting_amount: u64,
    /// SOL/USD price used, 18 decimals
    pub price: u128,
}

#[event]
pub struct TokensClaimed {
    pub participant: Pubkey,
    /// Gross entitlement recognised
    pub amount: u64,
    /// Tokens transferred after the fee factor
    pub net_amount: u64,
    pub total_claimed: u64,
    pub total_allocated: u64,
}

#[event]
pub struct SalePaused {
    pub admin: Pubkey,
}

#[event]
pub struct SaleUnpaused {
    pub admin: Pubkey,
}

#[event]
pub struct VestingLaunched {
    pub launch_time: i64,
    pub portion_duration: i64,
    pub tokens_unsold: u64,
}

#[event]
pub struct PortionDurationUpdated {
    pub portion_duration: i64,
}

#[event]
pub struct FeeUpdated {
    pub numerator: u64,
    pub denominator: u64,
}

#[event]
pub struct FallbackPriceUpdated {
    pub native_price_usd: u128,
}

#[event]
pub struct PriceFeedUpdated {
    pub price_feed: Pubkey,
}

#[event]
pub struct UseFallbackPriceUpdated {
    pub use_fallback_price: bool,
}

#[event]
pub struct EmergencyWithdrawal {
    pub admin: Pubkey,
    /// Default key for lamports
    pub mint: Pubkey,
    pub amount: u64,
}
