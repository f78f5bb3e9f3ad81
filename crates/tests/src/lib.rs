//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 端到端测试: 配置文件 -> 操作目录 -> HTTP 客户端 -> 分发器 -> 模块结果
//!   (设备 API 由 wiremock 模拟)

#[cfg(test)]
mod contract_tests {
    use contracts::{HttpMethod, OperationSpec};

    #[test]
    fn test_operation_spec_wire_shape() {
        let spec = OperationSpec::new(
            HttpMethod::Post,
            "/api/fdm/v2/action/uploadupgrade",
            "FileUploadStatus",
        );
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            serde_json::json!({
                "method": "POST",
                "url": "/api/fdm/v2/action/uploadupgrade",
                "model_name": "FileUploadStatus",
            })
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use config_loader::ConfigLoader;
    use contracts::UploadRequest;
    use dispatcher::{UploadDispatcher, UploadOutcome};
    use ftd_client::{FtdHttpClient, StaticCatalog};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN_PATH: &str = "/api/fdm/v2/fdm/token";
    const DISK_FILE_PATH: &str = "/api/fdm/v2/action/uploaddiskfile";

    struct Workspace {
        dir: tempfile::TempDir,
        config: PathBuf,
    }

    impl Workspace {
        fn file(&self, name: &str, content: &[u8]) -> PathBuf {
            let path = self.dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(content).unwrap();
            path
        }
    }

    /// Config file with an external catalog next to it
    fn workspace(host: &str) -> Workspace {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("operations.json"),
            r#"{
                "postuploaddiskfile": { "method": "POST", "url": "/api/fdm/v2/action/uploaddiskfile", "model_name": "UploadStatusWrapper" },
                "getsystemstatus": { "method": "GET", "url": "/api/fdm/v2/operational/systemstatus", "model_name": "SystemStatus" }
            }"#,
        )
        .unwrap();

        let config = dir.path().join("ftd.toml");
        std::fs::write(
            &config,
            format!(
                r#"
catalog_file = "operations.json"

[device]
host = "{host}"
username = "admin"
password = "Admin123"
timeout_secs = 5
"#
            ),
        )
        .unwrap();

        Workspace { dir, config }
    }

    async fn mount_device(server: &MockServer, upload: ResponseTemplate, upload_calls: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_partial_json(json!({"grant_type": "password"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "e2e-token"})))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_partial_json(json!({"grant_type": "revoke_token"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path(DISK_FILE_PATH))
            .and(header("authorization", "Bearer e2e-token"))
            .and(body_string_contains("filename=\"test1.txt\""))
            .respond_with(upload)
            .expect(upload_calls)
            .mount(server)
            .await;
    }

    async fn run(
        config: &Path,
        request: &UploadRequest,
        check_mode: bool,
    ) -> UploadOutcome {
        let config = ConfigLoader::load_from_path(config).unwrap();
        let catalog = StaticCatalog::from_config(&config);
        let client = FtdHttpClient::new(&config.device).unwrap();
        let dispatcher = UploadDispatcher::new(catalog, client).with_check_mode(check_mode);
        let outcome = dispatcher.execute(request).await;
        dispatcher.transport().logout().await;
        outcome
    }

    /// Upload disk file, response registered under its type/name
    #[tokio::test]
    async fn test_e2e_upload_disk_file() {
        let server = MockServer::start().await;
        let response = json!({
            "id": "d6a0",
            "name": "test1.txt",
            "type": "fileuploadstatus",
            "status": "queued",
        });
        mount_device(&server, ResponseTemplate::new(200).set_body_json(response.clone()), 1).await;

        let ws = workspace(&server.uri());
        let file = ws.file("test1.txt", b"disk file content");
        let request = UploadRequest::new("postuploaddiskfile", &file);

        let outcome = run(&ws.config, &request, false).await;

        let result = outcome.to_module_json();
        assert_eq!(result["changed"], true);
        assert_eq!(result["response"], response);
        assert_eq!(result["ansible_facts"]["fileuploadstatus_test1_txt"], response);
    }

    #[tokio::test]
    async fn test_e2e_register_as() {
        let server = MockServer::start().await;
        mount_device(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"status": "queued", "id": 42})),
            1,
        )
        .await;

        let ws = workspace(&server.uri());
        let file = ws.file("test1.txt", b"x");
        let request = UploadRequest::new("postuploaddiskfile", &file).with_register_as("uploaded");

        let outcome = run(&ws.config, &request, false).await;

        assert_eq!(
            outcome.to_module_json()["ansible_facts"],
            json!({"uploaded": {"status": "queued", "id": 42}})
        );
    }

    #[tokio::test]
    async fn test_e2e_server_error() {
        let server = MockServer::start().await;
        mount_device(&server, ResponseTemplate::new(400).set_body_string("bad file"), 1).await;

        let ws = workspace(&server.uri());
        let file = ws.file("test1.txt", b"x");
        let request = UploadRequest::new("postuploaddiskfile", &file);

        let outcome = run(&ws.config, &request, false).await;

        assert_eq!(
            outcome,
            UploadOutcome::failed(
                "Upload request for postuploaddiskfile operation failed. Status code: 400. Server response: bad file."
            )
        );
        assert_eq!(outcome.to_module_json()["failed"], true);
    }

    #[tokio::test]
    async fn test_e2e_check_mode_never_uploads() {
        let server = MockServer::start().await;
        mount_device(&server, ResponseTemplate::new(200), 0).await;

        let ws = workspace(&server.uri());
        let file = ws.file("test1.txt", b"x");
        let request = UploadRequest::new("postuploaddiskfile", &file);

        let outcome = run(&ws.config, &request, true).await;

        assert_eq!(outcome.to_module_json(), json!({"changed": false}));
    }

    #[tokio::test]
    async fn test_e2e_get_operation_rejected() {
        let server = MockServer::start().await;
        mount_device(&server, ResponseTemplate::new(200), 0).await;

        let ws = workspace(&server.uri());
        let request = UploadRequest::new("getsystemstatus", "/tmp/test1.txt");

        let outcome = run(&ws.config, &request, false).await;

        assert_eq!(
            outcome,
            UploadOutcome::failed(
                "Invalid upload operation: getsystemstatus. The operation must make POST request and return UploadStatus model."
            )
        );
    }

    #[tokio::test]
    async fn test_e2e_unknown_operation() {
        let server = MockServer::start().await;
        mount_device(&server, ResponseTemplate::new(200), 0).await;

        let ws = workspace(&server.uri());
        let request = UploadRequest::new("postuploadnothing", "/tmp/test1.txt");

        let outcome = run(&ws.config, &request, false).await;

        assert_eq!(
            outcome,
            UploadOutcome::failed("Operation with specified name is not found: postuploadnothing")
        );
    }
}
