use chrono::{Duration, Utc};

use super::*;
use crate::{
    error::workflow::{InvalidInput, WorkflowError},
    model::moderation::BanRequest,
    service::ban::BanService,
};

fn request(duration_days: i64) -> BanRequest {
    BanRequest {
        member_id: 900,
        member_name: "Troublemaker".to_string(),
        duration_days,
        appealable: true,
        reason: "Repeated harassment".to_string(),
    }
}

fn moderator() -> Invoker {
    invoker(10, &[201], 102)
}

/// Tests banning a member.
///
/// The notice is delivered before the ban, and the ban is logged with its unban date.
///
/// Expected: Ok(unban date seven days out), DM, ban, and log entry
#[tokio::test]
async fn notifies_bans_and_logs() {
    let h = Harness::new().await;
    let before = Utc::now();

    let unban = BanService::new(&h.discord, &h.discord)
        .ban_member(&moderator(), request(7))
        .await
        .unwrap();

    assert!(unban >= before + Duration::days(7));
    assert!(unban <= Utc::now() + Duration::days(7));

    let directs = h.discord.directs.lock().unwrap().clone();
    assert_eq!(directs.len(), 1);
    let notice = directs[0].1.embed.as_ref().unwrap();
    assert_eq!(notice.field_value("Appeal Status"), Some("Yes"));
    assert_eq!(notice.field_value("Duration"), Some("7 days"));

    assert_eq!(
        *h.discord.bans.lock().unwrap(),
        vec![(900, "Repeated harassment".to_string())]
    );

    let log = h.discord.sent_to(Destination::ReportLog);
    assert_eq!(log.len(), 1);
    let entry = log[0].notification.embed.as_ref().unwrap();
    assert_eq!(entry.title, "Member Banned");
    assert_eq!(
        entry.footer.as_deref(),
        Some(format!("Unban Date: {}", unban.format("%Y-%m-%d %H:%M:%S UTC")).as_str())
    );
}

/// Tests a member who cannot be sent the notice.
///
/// Expected: Err(NotificationDeliveryFailed) and no ban
#[tokio::test]
async fn undeliverable_notice_aborts() {
    let h = Harness::new().await;
    h.discord.block_dms();

    let result = BanService::new(&h.discord, &h.discord)
        .ban_member(&moderator(), request(7))
        .await;

    assert!(matches!(
        result,
        Err(WorkflowError::NotificationDeliveryFailed(_))
    ));
    assert!(h.discord.bans.lock().unwrap().is_empty());
    assert_eq!(h.discord.total_sent(), 0);
}

/// Tests rejecting a ban shorter than a day.
///
/// Expected: Err(InvalidInput::BanDuration), nothing sent
#[tokio::test]
async fn rejects_short_duration() {
    let h = Harness::new().await;

    let result = BanService::new(&h.discord, &h.discord)
        .ban_member(&moderator(), request(0))
        .await;

    assert!(matches!(
        result,
        Err(WorkflowError::InvalidInput(InvalidInput::BanDuration(0)))
    ));
    assert!(h.discord.directs.lock().unwrap().is_empty());
}

/// Tests that a failed log entry does not undo the ban.
///
/// Expected: Ok with the ban applied
#[tokio::test]
async fn log_failure_is_tolerated() {
    let h = Harness::new().await;
    h.discord.fail_sends_to(Destination::ReportLog);

    let result = BanService::new(&h.discord, &h.discord)
        .ban_member(&moderator(), request(1))
        .await;

    assert!(result.is_ok());
    assert_eq!(h.discord.bans.lock().unwrap().len(), 1);
}

/// Tests a duration too long to compute an unban date for.
///
/// Expected: Err(InvalidInput::BanDuration), no notice and no ban
#[tokio::test]
async fn rejects_unrepresentable_duration() {
    let h = Harness::new().await;

    let result = BanService::new(&h.discord, &h.discord)
        .ban_member(&moderator(), request(1_000_000_000))
        .await;

    assert!(matches!(
        result,
        Err(WorkflowError::InvalidInput(InvalidInput::BanDuration(1_000_000_000)))
    ));
    assert!(h.discord.directs.lock().unwrap().is_empty());
    assert!(h.discord.bans.lock().unwrap().is_empty());
}
