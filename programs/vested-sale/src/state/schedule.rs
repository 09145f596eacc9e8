use anchor_lang::prelude::*;

use crate::errors::SaleError;
use crate::math;

/// Locked allocation of one participant.
///
/// Created by the participant's first purchase and never closed. `claimed`
/// is booked gross of the claim-time fee factor.
#[account]
#[derive(Default)]
pub struct VestingSchedule {
    /// Wallet that bought the allocation
    pub participant: Pubkey,
    /// Vesting portion of every purchase, accumulated
    pub total_allocated: u64,
    /// Gross amount already released by claims
    pub claimed: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl VestingSchedule {
    pub const LEN: usize = 8 +  // discriminator
        32 +  // participant
        8 +   // total_allocated
        8 +   // claimed
        1 +   // bump
        32;   // padding for future use

    pub fn is_initialized(&self) -> bool {
        self.participant != Pubkey::default()
    }

    /// Binds a freshly created schedule to its buyer. Later purchases leave
    /// an existing binding untouched.
    pub fn open(&mut self, participant: Pubkey, bump: u8) {
        if self.is_initialized() {
            return;
        }
        self.participant = participant;
        self.bump = bump;
    }

    pub fn add_allocation(&mut self, amount: u64) -> std::result::Result<(), SaleError> {
        self.total_allocated = self
            .total_allocated
            .checked_add(amount)
            .ok_or(SaleError::MathOverflow)?;
        Ok(())
    }

    /// Gross amount unlocked by `portions` elapsed intervals and not yet claimed.
    pub fn claimable(&self, portions: u64) -> std::result::Result<u64, SaleError> {
        let vested = math::vested_amount(self.total_allocated, portions)?;
        Ok(vested.saturating_sub(self.claimed))
    }

    pub fn record_claim(&mut self, gross: u64) -> std::result::Result<(), SaleError> {
        let claimed = self.claimed.checked_add(gross).ok_or(SaleError::MathOverflow)?;
        if claimed > self.total_allocated {
            return Err(SaleError::MathOverflow);
        }
        self.claimed = claimed;
        Ok(())
    }

    /// Allocation not yet released, gross.
    pub fn locked_balance(&self) -> u64 {
        self.total_allocated.saturating_sub(self.claimed)
    }
}

/// Loads `participant`'s schedule from its PDA. An account that was never
/// created, or one bound to another wallet, is `NoVestingSchedule`.
pub fn load_schedule<'info>(
    info: &'info AccountInfo<'info>,
    participant: &Pubkey,
) -> Result<Account<'info, VestingSchedule>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return err!(SaleError::NoVestingSchedule);
    }
    let schedule = Account::<VestingSchedule>::try_from(info)?;
    if schedule.participant != *participant {
        return err!(SaleError::NoVestingSchedule);
    }
    Ok(schedule)
}
