use super::*;

/// Tests initializing a collection that has no row yet.
///
/// Expected: row created with the given body
#[tokio::test]
async fn creates_missing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    repo.create_if_missing("performance_bonus", 1, "{}".to_string())
        .await?;

    let stored = repo.find("performance_bonus").await?;
    assert_eq!(stored.map(|d| d.body), Some("{}".to_string()));

    Ok(())
}

/// Tests that initialization never overwrites stored data.
///
/// Expected: the original body survives
#[tokio::test]
async fn keeps_existing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    create_document(db, "incident_reports", r#"[{"report_id":3}]"#).await?;

    let repo = DocumentRepository::new(db);
    repo.create_if_missing("incident_reports", 1, "[]".to_string())
        .await?;

    let stored = repo.find("incident_reports").await?.unwrap();
    assert_eq!(stored.body, r#"[{"report_id":3}]"#);
    assert_eq!(entity::prelude::Document::find().count(db).await?, 1);

    Ok(())
}
