use anchor_lang::prelude::*;

use crate::instructions::update_config::UpdateConfig;

pub fn unpause(ctx: Context<UpdateConfig>) -> Result<()> {
    let sale = &mut ctx.accounts.sale_state;
    sale.unpause()?;
    emit!(crate::SaleUnpaused { admin: sale.admin });
    Ok(())
}
