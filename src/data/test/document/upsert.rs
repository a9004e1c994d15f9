use super::*;

/// Tests writing a collection for the first time.
///
/// Expected: Ok with the row created
#[tokio::test]
async fn creates_new_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let stored = repo.upsert("incident_reports", 1, "[]".to_string()).await?;

    assert_eq!(stored.collection, "incident_reports");
    assert_eq!(stored.body, "[]");
    assert_eq!(entity::prelude::Document::find().count(db).await?, 1);

    Ok(())
}

/// Tests replacing an existing collection wholesale.
///
/// Expected: one row holding the new body and version
#[tokio::test]
async fn replaces_existing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    create_document(db, "incident_reports", "[]").await?;

    let repo = DocumentRepository::new(db);
    let stored = repo
        .upsert("incident_reports", 2, r#"[{"report_id":1}]"#.to_string())
        .await?;

    assert_eq!(stored.version, 2);
    assert_eq!(stored.body, r#"[{"report_id":1}]"#);
    assert_eq!(entity::prelude::Document::find().count(db).await?, 1);

    Ok(())
}

/// Tests that replacing a document moves its update timestamp forward.
///
/// Expected: second updated_at is not earlier than the first
#[tokio::test]
async fn refreshes_updated_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let first = repo.upsert("no_show_data", 1, "{}".to_string()).await?;
    let second = repo.upsert("no_show_data", 1, "{}".to_string()).await?;

    assert!(second.updated_at >= first.updated_at);

    Ok(())
}
