use chrono::{Duration, Utc};

use super::*;
use crate::{
    config::BonusSettings,
    model::bonus::{BonusLedgers, Cents},
    service::bonus::BonusService,
};

/// Tests awards up to and past the daily limit.
///
/// Expected: three non-zero awards, then zero with the total unchanged
#[tokio::test]
async fn limits_awards_per_day() {
    let h = Harness::new().await;
    let svc = BonusService::new(&h.config, &h.store);
    let now = Utc::now();

    let mut total = 0;
    for _ in 0..3 {
        let amount = svc.award_bonus_at(42, now).await.unwrap();
        assert!(!amount.is_zero());
        total += amount.0;
    }

    let fourth = svc.award_bonus_at(42, now).await.unwrap();

    assert_eq!(fourth, Cents::ZERO);
    assert_eq!(svc.total_for(42).await.unwrap(), Cents(total));
}

/// Tests that awards are drawn from the configured range.
///
/// Expected: every amount within [min, max]
#[tokio::test]
async fn awards_within_range() {
    let mut config = config::test::config();
    config.bonus = BonusSettings {
        min_cents: 500,
        max_cents: 510,
    };
    config.thresholds.bonus_daily_limit = 50;
    let h = Harness::with_config(config).await;
    let svc = BonusService::new(&h.config, &h.store);

    for _ in 0..20 {
        let amount = svc.award_bonus(7).await.unwrap();
        assert!((500..=510).contains(&amount.0), "{}", amount);
    }
}

/// Tests a degenerate range.
///
/// Expected: exactly the single configured amount
#[tokio::test]
async fn fixed_amount() {
    let mut config = config::test::config();
    config.bonus = BonusSettings {
        min_cents: 1234,
        max_cents: 1234,
    };
    let h = Harness::with_config(config).await;

    let amount = BonusService::new(&h.config, &h.store)
        .award_bonus(7)
        .await
        .unwrap();

    assert_eq!(amount, Cents(1234));
}

/// Tests that the limit rolls over after 24 hours.
///
/// Old award times are pruned from the ledger once a new award is recorded.
///
/// Expected: non-zero award 24 hours after the limit was hit
#[tokio::test]
async fn window_resets() {
    let h = Harness::new().await;
    let svc = BonusService::new(&h.config, &h.store);
    let start = Utc::now() - Duration::hours(30);

    for _ in 0..3 {
        svc.award_bonus_at(42, start).await.unwrap();
    }
    assert!(svc.award_bonus_at(42, start).await.unwrap().is_zero());

    let later = start + Duration::hours(24);
    let amount = svc.award_bonus_at(42, later).await.unwrap();

    assert!(!amount.is_zero());
    let mut ledgers = h.store.load::<BonusLedgers>().await.unwrap();
    assert_eq!(ledgers.ledger_mut(42).timestamps, vec![later]);
}

/// Tests the bonus leaderboard and per-member totals.
///
/// Expected: recipients ordered by total, unknown members at zero
#[tokio::test]
async fn leaderboard_and_totals() {
    let mut config = config::test::config();
    config.bonus = BonusSettings {
        min_cents: 100,
        max_cents: 100,
    };
    let h = Harness::with_config(config).await;
    let svc = BonusService::new(&h.config, &h.store);

    svc.award_bonus(1).await.unwrap();
    svc.award_bonus(2).await.unwrap();
    svc.award_bonus(2).await.unwrap();

    assert_eq!(
        svc.leaderboard(10).await.unwrap(),
        vec![(2, Cents(200)), (1, Cents(100))]
    );
    assert_eq!(svc.leaderboard(1).await.unwrap().len(), 1);
    assert_eq!(svc.total_for(99).await.unwrap(), Cents::ZERO);
}

/// Tests concurrent awards to one recipient.
///
/// Expected: exactly the daily limit of non-zero awards out of five
#[tokio::test]
async fn concurrent_awards_respect_limit() {
    let h = Harness::new().await;
    let svc = BonusService::new(&h.config, &h.store);

    let (a, b, c, d, e) = tokio::join!(
        svc.award_bonus(42),
        svc.award_bonus(42),
        svc.award_bonus(42),
        svc.award_bonus(42),
        svc.award_bonus(42),
    );

    let non_zero = [a, b, c, d, e]
        .into_iter()
        .filter(|r| !r.as_ref().unwrap().is_zero())
        .count();
    assert_eq!(non_zero, 3);
}
