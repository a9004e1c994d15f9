use super::*;

/// Tests finding a stored document by collection name.
///
/// Expected: Ok(Some(document)) with the stored body
#[tokio::test]
async fn returns_stored_document() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    create_document(db, "no_show_data", r#"{"42":{"count":0,"records":[]}}"#).await?;

    let repo = DocumentRepository::new(db);
    let result = repo.find("no_show_data").await?;

    assert!(result.is_some());
    let document = result.unwrap();
    assert_eq!(document.collection, "no_show_data");
    assert_eq!(document.version, 1);
    assert!(document.body.contains("\"42\""));

    Ok(())
}

/// Tests finding a collection that was never written.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_collection() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);

    assert!(repo.find("incident_reports").await?.is_none());

    Ok(())
}

/// Tests that collections are isolated from each other.
///
/// Expected: each name returns only its own body
#[tokio::test]
async fn returns_only_requested_collection() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_document_table().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    create_document(db, "incident_reports", "[]").await?;
    create_document(db, "performance_bonus", "{}").await?;

    let repo = DocumentRepository::new(db);

    assert_eq!(repo.find("incident_reports").await?.unwrap().body, "[]");
    assert_eq!(repo.find("performance_bonus").await?.unwrap().body, "{}");

    Ok(())
}
