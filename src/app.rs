use crate::args::{Args, Mode};
use crate::storage::{StorageError, StorageFacade};
use crate::utils::log_utils;
use std::io::Write;
use std::path::Path;

/// Run one storage command and print its result on stdout
///
/// # Errors
///
/// Returns a `StorageError` if the facade cannot be built or the command fails.
pub fn run_app(args: &Args) -> Result<(), StorageError> {
    log_utils::init_logging(args.verbose);

    let facade = StorageFacade::initialize(&args.config)?;
    let stdout = std::io::stdout();
    run_with_facade(&facade, args, &mut stdout.lock())
}

/// Dispatch `args.mode` against an already built facade
pub fn run_with_facade<S, W>(
    facade: &StorageFacade<S>,
    args: &Args,
    out: &mut W,
) -> Result<(), StorageError>
where
    S: crate::interfaces::ObjectStore,
    W: Write,
{
    let local_path = args.local_path.as_deref().unwrap_or(Path::new(""));

    let line = match args.mode {
        Mode::Upload => facade.upload(&args.object, local_path)?,
        Mode::Download => facade
            .download(&args.object, local_path)?
            .display()
            .to_string(),
        Mode::Exists => facade.exists(&args.object)?.to_string(),
        Mode::Url => facade.presigned_download_url(&args.object)?,
    };

    writeln!(out, "{line}").map_err(StorageError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_REGION, StorageConfig};
    use crate::interfaces::MockObjectStore;

    fn config() -> StorageConfig {
        StorageConfig {
            endpoint: "minio:9000".to_string(),
            access_key: "admin".to_string(),
            secret_key: "admin".to_string(),
            bucket: "excel-files".to_string(),
            secure: false,
            region: DEFAULT_REGION.to_string(),
            presign_expiry_secs: 3600,
        }
    }

    fn facade_with(mut store: MockObjectStore) -> StorageFacade<MockObjectStore> {
        store.expect_bucket_exists().returning(|_| Ok(true));
        StorageFacade::with_store(config(), store).unwrap()
    }

    #[test]
    fn test_exists_prints_bool() {
        let mut store = MockObjectStore::new();
        store
            .expect_object_exists()
            .withf(|bucket, key| bucket == "excel-files" && key == "a/b.txt")
            .times(1)
            .returning(|_, _| Ok(false));
        let facade = facade_with(store);

        let args = Args {
            mode: Mode::Exists,
            object: "a/b.txt".to_string(),
            ..Default::default()
        };
        let mut out = Vec::new();
        run_with_facade(&facade, &args, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "false\n");
    }

    #[test]
    fn test_url_prints_presigned_url() {
        let mut store = MockObjectStore::new();
        store
            .expect_presign_get()
            .withf(|_, key, expires| key == "a/b.txt" && expires.as_secs() == 3600)
            .times(1)
            .returning(|bucket, key, _| Ok(format!("http://minio:9000/{bucket}/{key}?X-Amz-Signature=x")));
        let facade = facade_with(store);

        let args = Args {
            mode: Mode::Url,
            object: "a/b.txt".to_string(),
            ..Default::default()
        };
        let mut out = Vec::new();
        run_with_facade(&facade, &args, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "http://minio:9000/excel-files/a/b.txt?X-Amz-Signature=x\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let mut store = MockObjectStore::new();
        store.expect_object_exists().times(1).returning(|_, _| Ok(true));
        let facade = facade_with(store);

        let args = Args {
            mode: Mode::Exists,
            object: "a/b.txt".to_string(),
            ..Default::default()
        };
        let err = run_with_facade(&facade, &args, &mut ClosedPipe).unwrap_err();

        assert!(matches!(err, StorageError::Output(_)));
        assert_eq!(err.to_string(), "Failed to write output: stdout closed");
    }

    #[test]
    fn test_upload_missing_file_propagates() {
        let mut store = MockObjectStore::new();
        store.expect_put_file().never();
        let facade = facade_with(store);

        let args = Args {
            mode: Mode::Upload,
            object: "a.txt".to_string(),
            local_path: Some("/definitely/not/here.txt".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let result = run_with_facade(&facade, &args, &mut out);

        assert!(matches!(result, Err(StorageError::LocalFileNotFound(_))));
        assert!(out.is_empty());
    }
}
