//! End-to-end sale scenarios driven through the account state machine.

use anchor_lang::prelude::*;
use solana_program::native_token::LAMPORTS_PER_SOL;

use crate::errors::SaleError;
use crate::instructions::SaleParams;
use crate::oracle::{resolve_price, OraclePrice, PriceSource};
use crate::state::{SaleState, VestingSchedule};

const ONE_USD: u128 = 1_000_000_000_000_000_000;
const DECIMALS: u8 = 9;
const ONE_TOKEN: u64 = 1_000_000_000;
const DAY: i64 = 86_400;
const T0: i64 = 1_700_000_000;

struct DownOracle;

impl PriceSource for DownOracle {
    fn latest_price(&self, _now: i64) -> std::result::Result<OraclePrice, SaleError> {
        Err(SaleError::InvalidPriceFeed)
    }
}

fn new_sale(total_supply_for_sale: u64) -> SaleState {
    let params = SaleParams {
        treasury: Pubkey::new_unique(),
        price_feed: Pubkey::new_unique(),
        token_price_usd: ONE_USD,
        native_price_usd: ONE_USD,
        fee_numerator: 1000,
        fee_denominator: 995,
        total_supply_for_sale,
        portion_duration: 30 * DAY,
    };
    let mut sale = SaleState::default();
    sale.configure(Pubkey::new_unique(), Pubkey::new_unique(), DECIMALS, &params, 255)
        .unwrap();
    sale
}

fn new_schedule() -> VestingSchedule {
    VestingSchedule {
        participant: Pubkey::new_unique(),
        bump: 254,
        ..Default::default()
    }
}

/// One SOL at $1, 1000/995 fee factor, 5M tokens of inventory.
#[test]
fn scenario_a_purchase_split() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    sale.use_fallback_price = true;
    let mut schedule = new_schedule();

    let price = resolve_price(&sale, &DownOracle, T0);
    assert_eq!(price, ONE_USD);

    let before = sale.tokens_available;
    let quote = sale
        .process_purchase(&mut schedule, LAMPORTS_PER_SOL, price)
        .unwrap();

    let adjusted = ONE_TOKEN * 1000 / 995;
    let immediate = adjusted / 6;
    assert_eq!(quote.gross, ONE_TOKEN);
    assert_eq!(quote.adjusted, adjusted);
    assert_eq!(quote.immediate, immediate);
    assert_eq!(quote.vesting, adjusted - immediate);
    assert_eq!(quote.immediate_payout, immediate * 1000 / 995);
    assert_eq!(before - sale.tokens_available, adjusted);
    assert_eq!(schedule.total_allocated, adjusted - immediate);
    assert_eq!(sale.total_raised, LAMPORTS_PER_SOL);
}

/// 30-day portions: nothing at day 29, one sixth at day 31.
#[test]
fn scenario_b_first_portion() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 6 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    sale.launch_vesting(T0).unwrap();

    assert!(matches!(
        sale.process_claim(&mut schedule, T0 + 29 * DAY),
        Err(SaleError::NothingToClaim)
    ));
    assert_eq!(schedule.claimed, 0);

    let outcome = sale.process_claim(&mut schedule, T0 + 31 * DAY).unwrap();
    assert_eq!(outcome.gross, schedule.total_allocated / 6);
    assert_eq!(outcome.net, outcome.gross * 1000 / 995);
    assert_eq!(schedule.claimed, outcome.gross);
}

/// Past the sixth portion the whole remainder is claimable exactly once.
#[test]
fn scenario_c_full_vesting() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 7 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    sale.launch_vesting(T0).unwrap();

    let first = sale.process_claim(&mut schedule, T0 + 65 * DAY).unwrap();
    assert_eq!(first.gross, schedule.total_allocated * 2 / 6);

    let last = sale.process_claim(&mut schedule, T0 + 181 * DAY).unwrap();
    assert_eq!(last.gross, schedule.total_allocated - first.gross);
    assert_eq!(schedule.claimed, schedule.total_allocated);
    assert_eq!(schedule.locked_balance(), 0);

    assert!(matches!(
        sale.process_claim(&mut schedule, T0 + 181 * DAY + 1),
        Err(SaleError::NothingToClaim)
    ));
    assert!(matches!(
        sale.process_claim(&mut schedule, T0 + 3_650 * DAY),
        Err(SaleError::NothingToClaim)
    ));
}

/// No purchases once vesting has launched, and nothing changes.
#[test]
fn scenario_d_purchase_after_launch() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.launch_vesting(T0).unwrap();

    let available = sale.tokens_available;
    assert!(matches!(
        sale.process_purchase(&mut schedule, LAMPORTS_PER_SOL, ONE_USD),
        Err(SaleError::VestingAlreadyLaunched)
    ));
    assert_eq!(sale.tokens_available, available);
    assert_eq!(sale.total_raised, 0);
    assert_eq!(schedule.total_allocated, 0);
}

#[test]
fn purchases_accumulate_and_conserve_supply() {
    let supply = 50 * ONE_TOKEN;
    let mut sale = new_sale(supply);
    let mut alice = new_schedule();
    let mut bob = new_schedule();
    let mut immediate_total = 0;

    for (i, lamports) in [LAMPORTS_PER_SOL, 3 * LAMPORTS_PER_SOL / 7, 11 * LAMPORTS_PER_SOL]
        .into_iter()
        .cycle()
        .take(12)
        .enumerate()
    {
        let schedule = if i % 2 == 0 { &mut alice } else { &mut bob };
        let before = sale.tokens_available;
        match sale.process_purchase(schedule, lamports, ONE_USD) {
            Ok(quote) => {
                assert_eq!(before - sale.tokens_available, quote.adjusted);
                immediate_total += quote.immediate;
            }
            Err(err) => {
                assert!(matches!(
                    err,
                    SaleError::InsufficientInventory | SaleError::SoldOut
                ));
                assert_eq!(sale.tokens_available, before);
            }
        }
        assert!(
            alice.total_allocated + bob.total_allocated + immediate_total
                == supply - sale.tokens_available
        );
        assert!(sale.tokens_available <= supply);
    }
}

#[test]
fn repeat_buyer_keeps_schedule_binding() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let buyer = Pubkey::new_unique();
    let mut schedule = VestingSchedule::default();

    schedule.open(buyer, 251);
    let first = sale
        .process_purchase(&mut schedule, LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();

    schedule.open(Pubkey::new_unique(), 9);
    let second = sale
        .process_purchase(&mut schedule, 2 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();

    assert_eq!(schedule.participant, buyer);
    assert_eq!(schedule.bump, 251);
    assert_eq!(schedule.total_allocated, first.vesting + second.vesting);

    sale.launch_vesting(T0).unwrap();
    let outcome = sale.process_claim(&mut schedule, T0 + 30 * DAY).unwrap();
    assert_eq!(outcome.gross, schedule.total_allocated / 6);
}

#[test]
fn purchase_rejections_leave_state_untouched() {
    let mut sale = new_sale(ONE_TOKEN);
    let mut schedule = new_schedule();

    assert!(matches!(
        sale.process_purchase(&mut schedule, 0, ONE_USD),
        Err(SaleError::ZeroAmount)
    ));
    assert!(matches!(
        sale.process_purchase(&mut schedule, LAMPORTS_PER_SOL, 0),
        Err(SaleError::InvalidPrice)
    ));
    assert!(matches!(
        // At $0.50 per SOL one lamport buys half a base unit.
        sale.process_purchase(&mut schedule, 1, ONE_USD / 2),
        Err(SaleError::ZeroTokenAmount)
    ));
    assert!(matches!(
        sale.process_purchase(&mut schedule, 2 * LAMPORTS_PER_SOL, ONE_USD),
        Err(SaleError::InsufficientInventory)
    ));
    assert_eq!(sale.tokens_available, ONE_TOKEN);
    assert_eq!(sale.total_raised, 0);
    assert_eq!(schedule.total_allocated, 0);
}

#[test]
fn sold_out_sale_is_inactive() {
    let mut sale = new_sale(1_005_025_125);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    assert_eq!(sale.tokens_available, 0);
    assert!(!sale.is_sale_active());
    assert!(matches!(
        sale.process_purchase(&mut schedule, LAMPORTS_PER_SOL, ONE_USD),
        Err(SaleError::SoldOut)
    ));
}

#[test]
fn claims_are_monotonic_and_capped() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 13 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    sale.launch_vesting(T0).unwrap();

    let mut last_claimed = 0;
    for day in (0..400).step_by(7) {
        let now = T0 + day * DAY;
        let _ = sale.process_claim(&mut schedule, now);
        assert!(schedule.claimed >= last_claimed);
        assert!(schedule.claimed <= schedule.total_allocated);
        assert!(sale.elapsed_portions(now).unwrap() <= 6);
        last_claimed = schedule.claimed;
    }
    assert_eq!(schedule.claimed, schedule.total_allocated);
    assert_eq!(sale.total_claimed, schedule.total_allocated);
}

#[test]
fn repeated_claim_in_same_portion_is_a_no_op() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 2 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    sale.launch_vesting(T0).unwrap();

    sale.process_claim(&mut schedule, T0 + 45 * DAY).unwrap();
    let claimed = schedule.claimed;
    let total_claimed = sale.total_claimed;

    assert!(matches!(
        sale.process_claim(&mut schedule, T0 + 50 * DAY),
        Err(SaleError::NothingToClaim)
    ));
    assert_eq!(schedule.claimed, claimed);
    assert_eq!(sale.total_claimed, total_claimed);
}

#[test]
fn claim_fee_uses_current_factor_and_books_gross() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 6 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    sale.launch_vesting(T0).unwrap();
    sale.set_fee(995, 1000).unwrap();

    let outcome = sale.process_claim(&mut schedule, T0 + 60 * DAY).unwrap();
    assert_eq!(outcome.net, outcome.gross * 995 / 1000);
    assert!(outcome.net < outcome.gross);
    assert_eq!(schedule.claimed, outcome.gross);
}

#[test]
fn queries_track_schedule() {
    let mut sale = new_sale(5_000_000 * ONE_TOKEN);
    let mut schedule = new_schedule();
    sale.process_purchase(&mut schedule, 6 * LAMPORTS_PER_SOL, ONE_USD)
        .unwrap();
    assert_eq!(sale.claimable_for(&schedule, T0).unwrap(), 0);

    sale.launch_vesting(T0).unwrap();
    let now = T0 + 95 * DAY;
    let claimable = sale.claimable_for(&schedule, now).unwrap();
    assert_eq!(claimable, schedule.total_allocated * 3 / 6);
    assert_eq!(sale.seconds_until_next_portion(now).unwrap(), (25 * DAY) as u64);
    assert_eq!(sale.seconds_until_fully_vested(now).unwrap(), (85 * DAY) as u64);

    sale.process_claim(&mut schedule, now).unwrap();
    assert_eq!(sale.claimable_for(&schedule, now).unwrap(), 0);
    assert_eq!(schedule.locked_balance(), schedule.total_allocated - claimable);
}
