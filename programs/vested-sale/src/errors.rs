use anchor_lang::prelude::*;

#[error_code]
pub enum SaleError {
    // configuration
    #[msg("Address must not be the default public key")]
    InvalidAddress,
    #[msg("Price must be greater than zero")]
    InvalidPrice,
    #[msg("Portion duration must be greater than zero")]
    InvalidPortionDuration,
    #[msg("Fee denominator must be greater than zero")]
    InvalidFee,

    // lifecycle
    #[msg("Sale is paused")]
    SalePaused,
    #[msg("Sale is already paused")]
    AlreadyPaused,
    #[msg("Sale is not paused")]
    NotPaused,
    #[msg("All tokens for sale have been sold")]
    SoldOut,
    #[msg("Vesting has already been launched")]
    VestingAlreadyLaunched,
    #[msg("Vesting has not been launched")]
    VestingNotLaunched,
    #[msg("Parameter is locked once vesting has launched")]
    ParametersLocked,
    #[msg("Reentrant call rejected")]
    Reentrancy,

    // economics
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Purchase resolves to zero tokens")]
    ZeroTokenAmount,
    #[msg("Not enough tokens left for sale")]
    InsufficientInventory,
    #[msg("No vesting schedule for this participant")]
    NoVestingSchedule,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // recovery
    #[msg("No balance to recover")]
    NothingToRecover,
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    // accounts
    #[msg("Unauthorized - admin only")]
    Unauthorized,
    #[msg("Price feed account does not match the configured feed")]
    InvalidPriceFeed,
    #[msg("Oracle price is older than the allowed age")]
    StalePrice,
    #[msg("Treasury account does not match the configured treasury")]
    InvalidTreasury,
    #[msg("Invalid token mint")]
    InvalidTokenMint,
    #[msg("Invalid token account")]
    InvalidTokenAccount,
}
