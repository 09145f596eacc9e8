use anchor_lang::prelude::*;

use crate::instructions::update_config::UpdateConfig;

/// Starts the global vesting clock. Irreversible; purchasing ends here.
pub fn launch_vesting(ctx: Context<UpdateConfig>) -> Result<()> {
    let clock = Clock::get()?;
    let sale = &mut ctx.accounts.sale_state;
    sale.launch_vesting(clock.unix_timestamp)?;

    emit!(crate::VestingLaunched {
        launch_time: sale.vesting_launch_time,
        portion_duration: sale.portion_duration,
        tokens_unsold: sale.tokens_available,
    });

    Ok(())
}
