//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - HTTP → SlotStore → 磁盘 的端到端测试（临时目录）
//! - 配置文件驱动的端到端测试

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(contracts::DEFAULT_NUM_FILES, 10);
        assert_eq!(contracts::DEFAULT_MAX_FILE_SIZE, 1_000_000);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ServerConfig, SlotState, StoreConfig};
    use http_body_util::BodyExt;
    use report_server::{CAPACITY_EXHAUSTED_MESSAGE, WRITE_FAILURE_MESSAGE};
    use slot_store::SlotStore;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    const CAP: u64 = 32;

    fn small_store(root: &Path, num_files: usize) -> SlotStore {
        let config = StoreConfig {
            num_files,
            max_file_size: CAP,
            ..StoreConfig::with_root(root)
        };
        SlotStore::new("e2e", &config)
    }

    fn app_for(store: &SlotStore) -> Router {
        report_server::router(store.clone(), &ServerConfig::default())
    }

    /// POST `body` to the default route, returning status and response body
    async fn post(app: Router, body: &'static [u8]) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/error-report")
            .header("content-type", "text/xml")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn slot_contents(store: &SlotStore, index: usize) -> Vec<u8> {
        fs::read(store.layout().path(index)).unwrap()
    }

    /// End-to-end: first report creates the error directory and slot 0
    #[tokio::test]
    async fn test_e2e_first_report_creates_directory() {
        let root = tempdir().unwrap();
        let store = small_store(root.path(), 3);
        let error_dir = root.path().join("protected/emc-shopkeeper-errors");
        assert!(!error_dir.exists());

        let (status, body) = post(app_for(&store), b"<Error><Message>boom</Message></Error>").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");
        assert!(error_dir.join("errors.0.xml").is_file());
        assert_eq!(
            slot_contents(&store, 0),
            b"<Error><Message>boom</Message></Error>\n\n"
        );
    }

    /// End-to-end: reports fill slots in order until capacity is exhausted
    #[tokio::test]
    async fn test_e2e_rotation_until_exhausted() {
        let root = tempdir().unwrap();
        let store = small_store(root.path(), 2);
        let app = app_for(&store);

        // 30 + 2 bytes: exactly the cap, slot 0 retires
        let report: &'static [u8] = b"012345678901234567890123456789";
        assert_eq!(post(app.clone(), report).await.0, StatusCode::OK);
        assert_eq!(post(app.clone(), b"second").await.0, StatusCode::OK);
        assert_eq!(slot_contents(&store, 1), b"second\n\n");

        // slot 1 still below the cap: overrun it
        assert_eq!(post(app.clone(), report).await.0, StatusCode::OK);
        assert!(fs::metadata(store.layout().path(1)).unwrap().len() >= CAP);

        let (status, body) = post(app.clone(), b"one too many").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, CAPACITY_EXHAUSTED_MESSAGE);
        assert!(!store.layout().path(2).exists());

        let usage = store.usage().unwrap();
        assert!(usage.is_exhausted());
        assert_eq!(usage.retired, 2);

        let snapshot = store.metrics().snapshot();
        assert_eq!(snapshot.append_count, 3);
        assert_eq!(snapshot.capacity_rejections, 1);
    }

    /// End-to-end: empty body still appends a blank-line separator
    #[tokio::test]
    async fn test_e2e_empty_body() {
        let root = tempdir().unwrap();
        let store = small_store(root.path(), 2);

        let (status, _) = post(app_for(&store), b"").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slot_contents(&store, 0), b"\n\n");
    }

    /// End-to-end: a slot left full by a previous run is skipped
    #[tokio::test]
    async fn test_e2e_existing_full_slot_skipped() {
        let root = tempdir().unwrap();
        let store = small_store(root.path(), 3);
        fs::create_dir_all(store.layout().dir()).unwrap();
        fs::write(store.layout().path(0), vec![b'#'; CAP as usize]).unwrap();

        let (status, _) = post(app_for(&store), b"after restart").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(slot_contents(&store, 1), b"after restart\n\n");
        assert_eq!(store.slots().unwrap()[2].state, SlotState::Vacant);
    }

    /// End-to-end: error directory path occupied by a file
    #[tokio::test]
    async fn test_e2e_write_failure() {
        let root = tempdir().unwrap();
        let store = small_store(root.path(), 2);
        fs::create_dir_all(root.path().join("protected")).unwrap();
        fs::write(store.layout().dir(), b"in the way").unwrap();

        let (status, body) = post(app_for(&store), b"lost").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, WRITE_FAILURE_MESSAGE);
        assert_eq!(store.metrics().write_failures(), 1);
    }

    /// End-to-end: a directory squatting on every slot is a write failure, not a full store
    #[tokio::test]
    async fn test_e2e_directory_slots_report_write_failure() {
        let root = tempdir().unwrap();
        let config = StoreConfig {
            num_files: 2,
            ..StoreConfig::with_root(root.path())
        };
        let store = SlotStore::new("e2e", &config);
        for i in 0..2 {
            fs::create_dir_all(store.layout().path(i)).unwrap();
        }

        let (status, body) = post(app_for(&store), b"<Error/>").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, WRITE_FAILURE_MESSAGE);
        assert_eq!(store.metrics().capacity_rejections(), 0);
    }

    /// End-to-end: concurrent reports all land somewhere, nothing is truncated
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_concurrent_reports() {
        let root = tempdir().unwrap();
        let config = StoreConfig {
            num_files: 4,
            max_file_size: 1_000_000,
            ..StoreConfig::with_root(root.path())
        };
        let store = SlotStore::new("e2e", &config);
        let app = app_for(&store);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let app = app.clone();
            handles.push(tokio::spawn(async move { post(app, b"report").await.0 }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }

        let usage = store.usage().unwrap();
        assert_eq!(usage.total_bytes, 16 * 8);
        assert_eq!(slot_contents(&store, 0), b"report\n\n".repeat(16));
    }

    fn config_fixture(root: &TempDir) -> String {
        format!(
            r#"
[server]
route = "/emc-shopkeeper/error-report.php"

[store]
app_root = "{}"
error_dir = "reports"
num_files = 1
max_file_size = 10
file_extension = "log"
"#,
            root.path().display()
        )
    }

    /// End-to-end: configuration drives route, directory and naming
    #[tokio::test]
    async fn test_e2e_from_config_file() {
        let root = tempdir().unwrap();
        let blueprint =
            ConfigLoader::load_from_str(&config_fixture(&root), ConfigFormat::Toml).unwrap();
        let store = SlotStore::new("configured", &blueprint.store);
        let app = report_server::router(store.clone(), &blueprint.server);

        let request = |body: &'static [u8]| {
            Request::builder()
                .method("POST")
                .uri("/emc-shopkeeper/error-report.php")
                .body(Body::from(body))
                .unwrap()
        };

        let first = app.clone().oneshot(request(&b"12345678"[..])).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(
            fs::read(root.path().join("reports/errors.0.log")).unwrap(),
            b"12345678\n\n"
        );

        let second = app.oneshot(request(&b"x"[..])).await.unwrap();
        assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
