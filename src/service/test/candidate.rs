use chrono::{Duration, Utc};

use super::*;
use crate::{
    config::CandidateSettings, error::workflow::WorkflowError,
    service::candidate::CandidateService,
};

const KEYWORD: &str = "has attended an operation";
const CANDIDATE: u64 = 700;

fn attended(id: u64, member_id: u64, hours_ago: i64) -> HistoryMessage {
    HistoryMessage {
        id,
        content: format!("<@{}> {} today", member_id, KEYWORD),
        mention_ids: vec![member_id],
        created_at: Utc::now() - Duration::hours(hours_ago),
    }
}

fn service(h: &Harness) -> CandidateService<'_> {
    CandidateService::new(&h.config, &h.discord, &h.discord)
}

fn curator() -> Invoker {
    invoker(20, &[202], 103)
}

/// Tests a candidate one operation short of promotion.
///
/// Expected: progress update saying one operation is left
#[tokio::test]
async fn announces_progress() {
    let h = Harness::new().await;
    h.discord
        .set_history(vec![attended(1, CANDIDATE, 48), attended(2, CANDIDATE, 24)]);

    let report = service(&h).track_candidate(&curator(), CANDIDATE).await.unwrap();

    assert_eq!(report.count, 2);
    assert!(!report.promoted);

    let posts = h.discord.sent_to(Destination::Commendations);
    assert_eq!(posts.len(), 1);
    let content = posts[0].notification.content.as_deref().unwrap();
    assert!(content.contains("They have 1 operation(s) left before becoming a Sigma Associate."));
    assert!(content.contains(KEYWORD));
    let embed = posts[0].notification.embed.as_ref().unwrap();
    assert_eq!(
        embed.field_value("Progress"),
        Some("2/3 operations counted before this one.")
    );
}

/// Tests a candidate reaching the promotion total.
///
/// Expected: promotion message tagging the staff role
#[tokio::test]
async fn announces_promotion() {
    let h = Harness::new().await;
    h.discord.set_history(vec![
        attended(1, CANDIDATE, 72),
        attended(2, CANDIDATE, 48),
        attended(3, CANDIDATE, 24),
    ]);

    let report = service(&h).track_candidate(&curator(), CANDIDATE).await.unwrap();

    assert!(report.promoted);
    let posts = h.discord.sent_to(Destination::Commendations);
    let content = posts[0].notification.content.as_deref().unwrap();
    assert!(content.contains("<@&201>"));
    assert!(content.contains("3 successful deployments"));
}

/// Tests that a fresh announcement blocks a second tracking request.
///
/// Expected: Err(AlreadyTracked), nothing posted
#[tokio::test]
async fn rejects_duplicate_within_window() {
    let h = Harness::new().await;
    let mut recent = attended(1, CANDIDATE, 0);
    recent.created_at = Utc::now() - Duration::minutes(10);
    h.discord.set_history(vec![recent]);

    let result = service(&h).track_candidate(&curator(), CANDIDATE).await;

    assert!(matches!(result, Err(WorkflowError::AlreadyTracked)));
    assert_eq!(h.discord.total_sent(), 0);
}

/// Tests that other members and messages without the keyword are not counted.
///
/// Expected: count 1
#[tokio::test]
async fn counts_only_matching_messages() {
    let h = Harness::new().await;
    h.discord.set_history(vec![
        attended(1, CANDIDATE, 30),
        attended(2, 999, 20),
        HistoryMessage {
            id: 3,
            content: format!("<@{}> great job", CANDIDATE),
            mention_ids: vec![CANDIDATE],
            created_at: Utc::now() - Duration::hours(10),
        },
    ]);

    let report = service(&h).track_candidate(&curator(), CANDIDATE).await.unwrap();

    assert_eq!(report.count, 1);
}

/// Tests that only the configured number of recent messages is scanned.
///
/// Expected: count limited to the history window
#[tokio::test]
async fn honours_history_limit() {
    let mut config = config::test::config();
    config.candidate = CandidateSettings {
        history_limit: 2,
        ..config.candidate
    };
    let h = Harness::with_config(config).await;
    h.discord.set_history(vec![
        attended(1, CANDIDATE, 10),
        attended(2, CANDIDATE, 20),
        attended(3, CANDIDATE, 30),
    ]);

    let report = service(&h).track_candidate(&curator(), CANDIDATE).await.unwrap();

    assert_eq!(report.count, 2);
    assert!(!report.promoted);
}

/// Tests a candidate with no history.
///
/// The announcement records this attendance for the next update without claiming it
/// was already counted.
///
/// Expected: count 0 with all operations remaining, progress shown as 0/3 so far
#[tokio::test]
async fn first_tracking() {
    let h = Harness::new().await;

    let report = service(&h).track_candidate(&curator(), CANDIDATE).await.unwrap();

    assert_eq!(report.count, 0);
    assert_eq!(report.remaining(), 3);

    let posts = h.discord.sent_to(Destination::Commendations);
    let content = posts[0].notification.content.as_deref().unwrap();
    assert!(content.contains("counts toward their next progress update"));
    assert!(content.contains("They have 3 operation(s) left"));
    let embed = posts[0].notification.embed.as_ref().unwrap();
    assert_eq!(
        embed.field_value("Progress"),
        Some("0/3 operations counted before this one.")
    );
}

/// Tests that advisors cannot track candidates.
///
/// Expected: Err(Unauthorized)
#[tokio::test]
async fn requires_permitted_role() {
    let h = Harness::new().await;

    let result = service(&h)
        .track_candidate(&invoker(12, &[203], 103), CANDIDATE)
        .await;

    assert!(matches!(result, Err(WorkflowError::Unauthorized { .. })));
}
