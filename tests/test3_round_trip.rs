use minio_object_mgr::config::{DEFAULT_REGION, StorageConfig};
use minio_object_mgr::interfaces::ObjectStore;
use minio_object_mgr::storage::{BoxError, StorageError, StorageFacade};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;

/// Bucket kept in memory, counting every call that would hit the network
#[derive(Default)]
struct MemoryStore {
    buckets: Vec<String>,
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    fn with_bucket(bucket: &str) -> Self {
        Self {
            buckets: vec![bucket.to_string()],
            ..Default::default()
        }
    }

    fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ObjectStore for MemoryStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError> {
        self.hit();
        Ok(self.buckets.iter().any(|b| b == bucket))
    }

    fn put_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        self.hit();
        let bytes = fs::read(local_path)?;
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    fn get_to_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        self.hit();
        let bytes = self
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| format!("NoSuchKey: {key}"))?;
        fs::write(local_path, bytes)?;
        Ok(())
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, BoxError> {
        self.hit();
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string())))
    }

    fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration) -> Result<String, BoxError> {
        self.hit();
        Ok(format!(
            "http://memory.local/{bucket}/{key}?X-Amz-Expires={}&X-Amz-Signature=00",
            expires_in.as_secs()
        ))
    }
}

fn facade(bucket: &str) -> StorageFacade<MemoryStore> {
    let config = StorageConfig {
        endpoint: "memory.local".to_string(),
        access_key: "admin".to_string(),
        secret_key: "admin".to_string(),
        bucket: bucket.to_string(),
        secure: false,
        region: DEFAULT_REGION.to_string(),
        presign_expiry_secs: 900,
    };
    StorageFacade::with_store(config, MemoryStore::with_bucket(bucket)).unwrap()
}

#[test]
fn test_round_trip_preserves_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");

    let samples: Vec<(&str, Vec<u8>)> = vec![
        ("empty.bin", Vec::new()),
        ("aa/bb/aa.txt", b"hello minio".to_vec()),
        ("binary/all-bytes.bin", (0..=255u8).collect()),
        ("large.bin", vec![0x5a; 256 * 1024]),
    ];

    for (object, content) in samples {
        let source = dir.path().join("source");
        fs::write(&source, &content)?;

        let uploaded = facade.upload(object, &source)?;
        let target = dir.path().join("target");
        let downloaded = facade.download(&uploaded, &target)?;

        assert_eq!(fs::read(downloaded)?, content, "object {object}");
    }

    Ok(())
}

#[test]
fn test_exists_before_and_after_upload() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");
    let source = dir.path().join("a.txt");
    fs::write(&source, "a")?;

    assert!(!facade.exists("aa/bb/aa.txt")?);
    assert!(!facade.exists("aa/bb/dd.txt")?);

    facade.upload("aa/bb/aa.txt", &source)?;

    assert!(facade.exists("aa/bb/aa.txt")?);
    assert!(!facade.exists("aa/bb/dd.txt")?);
    Ok(())
}

#[test]
fn test_upload_missing_local_file_leaves_bucket_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");
    let calls_after_init = facade.store().calls.load(Ordering::SeqCst);

    let result = facade.upload("ghost.txt", dir.path().join("ghost.txt"));

    assert!(matches!(result, Err(StorageError::LocalFileNotFound(_))));
    assert_eq!(facade.store().calls.load(Ordering::SeqCst), calls_after_init);
    assert_eq!(facade.store().object_count(), 0);
    Ok(())
}

#[test]
fn test_upload_overwrites_existing_object() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");
    let source = dir.path().join("v.txt");

    fs::write(&source, "version one")?;
    facade.upload("doc.txt", &source)?;
    fs::write(&source, "version two")?;
    facade.upload("doc.txt", &source)?;

    let target = facade.download("doc.txt", dir.path().join("out.txt"))?;
    assert_eq!(fs::read_to_string(target)?, "version two");
    Ok(())
}

#[test]
fn test_download_replaces_local_file_entirely() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");

    let source = dir.path().join("short.txt");
    fs::write(&source, "new")?;
    facade.upload("short.txt", &source)?;

    let target = dir.path().join("existing.txt");
    fs::write(&target, "a much longer piece of old content that must disappear")?;

    facade.download("short.txt", &target)?;

    assert_eq!(fs::read_to_string(&target)?, "new");
    Ok(())
}

#[test]
fn test_presigned_url_for_missing_object() -> Result<(), Box<dyn std::error::Error>> {
    let facade = facade("excel-files");

    let url = facade.presigned_download_url("never/uploaded.xlsx")?;

    assert!(url.contains("excel-files"));
    assert!(url.contains("never/uploaded.xlsx"));
    assert!(url.contains("X-Amz-Expires=900"));
    Ok(())
}

#[test]
fn test_unknown_bucket_rejected() {
    let config = StorageConfig {
        endpoint: "memory.local".to_string(),
        access_key: "admin".to_string(),
        secret_key: "admin".to_string(),
        bucket: "wrong-bucket".to_string(),
        secure: false,
        region: DEFAULT_REGION.to_string(),
        presign_expiry_secs: 900,
    };
    let store = MemoryStore::with_bucket("excel-files");

    let result = StorageFacade::with_store(config, store);

    assert!(matches!(result, Err(StorageError::BucketNotFound(b)) if b == "wrong-bucket"));
}

#[test]
fn test_concurrent_uploads_of_distinct_objects() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let facade = facade("excel-files");

    std::thread::scope(|scope| {
        for i in 0..8 {
            let facade = &facade;
            let path = dir.path().join(format!("f{i}.txt"));
            scope.spawn(move || {
                fs::write(&path, format!("payload {i}")).unwrap();
                facade.upload(&format!("batch/f{i}.txt"), &path).unwrap();
            });
        }
    });

    for i in 0..8 {
        assert!(facade.exists(&format!("batch/f{i}.txt"))?);
    }
    Ok(())
}
