use anchor_lang::prelude::*;

use crate::instructions::update_config::UpdateConfig;

pub fn set_portion_duration(ctx: Context<UpdateConfig>, portion_duration: i64) -> Result<()> {
    ctx.accounts.sale_state.set_portion_duration(portion_duration)?;

    emit!(crate::PortionDurationUpdated { portion_duration });

    Ok(())
}
