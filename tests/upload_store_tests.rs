use trustboard::services::UploadStore;

#[tokio::test]
async fn test_save_writes_file_with_original_extension() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::new(dir.path().join("pictures"));

    let reference = store.save(Some("Me.JPG"), b"jpeg-bytes").await.unwrap();
    assert!(reference.starts_with("/uploads/"));
    assert!(reference.ends_with(".jpg"));

    let filename = reference.trim_start_matches("/uploads/");
    let stem = filename.trim_end_matches(".jpg");
    assert!(stem.chars().all(|c| c.is_ascii_digit()));

    let written = std::fs::read(dir.path().join("pictures").join(filename)).unwrap();
    assert_eq!(written, b"jpeg-bytes");
}

#[tokio::test]
async fn test_same_millisecond_uploads_do_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::new(dir.path());

    let mut references = Vec::new();
    for i in 0..5u8 {
        references.push(store.save(Some("a.png"), &[i]).await.unwrap());
    }

    let mut unique = references.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), references.len());

    for (i, reference) in references.iter().enumerate() {
        let filename = reference.trim_start_matches("/uploads/");
        assert_eq!(std::fs::read(dir.path().join(filename)).unwrap(), vec![i as u8]);
    }
}

#[tokio::test]
async fn test_discard_removes_only_upload_references() {
    let dir = tempfile::tempdir().unwrap();
    let store = UploadStore::new(dir.path());

    let reference = store.save(None, b"x").await.unwrap();
    let filename = reference.trim_start_matches("/uploads/").to_string();
    assert!(dir.path().join(&filename).exists());

    store.discard("/elsewhere/file").await;
    store.discard("/uploads/../secret").await;
    assert!(dir.path().join(&filename).exists());

    store.discard(&reference).await;
    assert!(!dir.path().join(&filename).exists());
}
