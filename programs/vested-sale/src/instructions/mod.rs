pub mod initialize;
pub mod deposit_tokens;
pub mod buy;
pub mod claim;
pub mod update_config;
pub mod pause;
pub mod unpause;
pub mod launch_vesting;
pub mod set_portion_duration;
pub mod emergency_withdraw;
pub mod views;

pub use initialize::*;
pub use deposit_tokens::*;
pub use buy::*;
pub use claim::*;
pub use update_config::*;
pub use pause::*;
pub use unpause::*;
pub use launch_vesting::*;
pub use set_portion_duration::*;
pub use emergency_withdraw::*;
pub use views::*;
