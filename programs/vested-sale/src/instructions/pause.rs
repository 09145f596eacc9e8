use anchor_lang::prelude::*;

use crate::instructions::update_config::UpdateConfig;

pub fn pause(ctx: Context<UpdateConfig>) -> Result<()> {
    let sale = &mut ctx.accounts.sale_state;
    sale.pause()?;
    emit!(crate::SalePaused { admin: sale.admin });
    Ok(())
}
