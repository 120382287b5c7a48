use super::*;
use crate::executor::{CommandOutput, ExitInfo};
use std::sync::Mutex;

/// Executor that replays canned results and records invocations.
struct ScriptedExecutor {
    capture_result: Result<CommandOutput>,
    streamed_result: Result<ExitInfo>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedExecutor {
    fn capturing(result: Result<CommandOutput>) -> Self {
        Self {
            capture_result: result,
            streamed_result: Ok(ExitInfo {
                success: true,
                code: Some(0),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn streaming(result: Result<ExitInfo>) -> Self {
        Self {
            capture_result: Ok(CommandOutput {
                success: true,
                code: Some(0),
                stdout: Vec::new(),
            }),
            streamed_result: result,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

fn clone_result<T: Clone>(r: &Result<T>) -> Result<T> {
    match r {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(MirrorError::process_with_source(
            "scripted failure",
            std::io::Error::other(e.to_string()),
        )),
    }
}

#[async_trait]
impl ProcessExecutor for ScriptedExecutor {
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        clone_result(&self.capture_result)
    }

    async fn run_streamed(&self, program: &str, args: &[String]) -> Result<ExitInfo> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        clone_result(&self.streamed_result)
    }
}

fn ok_output(json: &str) -> Result<CommandOutput> {
    Ok(CommandOutput {
        success: true,
        code: Some(0),
        stdout: json.as_bytes().to_vec(),
    })
}

fn reference(s: &str) -> Reference {
    s.parse().unwrap()
}

fn copy_task() -> CopyTask {
    CopyTask {
        source: reference("docker.io/library/nginx"),
        destination: reference("hub.example/mirror/nginx"),
        tag: "1.25".to_string(),
    }
}

#[tokio::test]
async fn test_list_tags_parses_tool_output() {
    let executor = Arc::new(ScriptedExecutor::capturing(ok_output(
        r#"{"Repository": "docker.io/library/nginx", "Tags": ["latest", "1.25"]}"#,
    )));
    let client = SkopeoClient::new(Arc::clone(&executor) as Arc<dyn ProcessExecutor>, SkopeoConfig::default());

    let tag_set = client
        .list_tags(&reference("docker.io/library/nginx"))
        .await
        .unwrap();

    assert_eq!(tag_set.repository, "docker.io/library/nginx");
    assert_eq!(tag_set.tags, vec!["latest", "1.25"]);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "skopeo");
    assert_eq!(
        calls[0].1,
        vec!["list-tags", "docker://docker.io/library/nginx"]
    );
}

#[tokio::test]
async fn test_list_tags_missing_tags_field_defaults_to_empty() {
    let executor = Arc::new(ScriptedExecutor::capturing(ok_output(
        r#"{"Repository": "docker.io/library/nginx"}"#,
    )));
    let client = SkopeoClient::new(executor, SkopeoConfig::default());

    let tag_set = client
        .list_tags(&reference("docker.io/library/nginx"))
        .await
        .unwrap();
    assert!(tag_set.tags.is_empty());
}

#[tokio::test]
async fn test_list_tags_nonzero_exit_is_absent() {
    let executor = Arc::new(ScriptedExecutor::capturing(Ok(CommandOutput {
        success: false,
        code: Some(1),
        stdout: Vec::new(),
    })));
    let client = SkopeoClient::new(executor, SkopeoConfig::default());

    assert!(
        client
            .list_tags(&reference("docker.io/library/nginx"))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_list_tags_malformed_json_is_absent() {
    let executor = Arc::new(ScriptedExecutor::capturing(ok_output("not json at all")));
    let client = SkopeoClient::new(executor, SkopeoConfig::default());

    assert!(
        client
            .list_tags(&reference("docker.io/library/nginx"))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_list_tags_spawn_failure_is_absent() {
    let executor = Arc::new(ScriptedExecutor::capturing(Err(
        MirrorError::process_with_source(
            "failed to run skopeo",
            std::io::Error::other("No such file"),
        ),
    )));
    let client = SkopeoClient::new(executor, SkopeoConfig::default());

    assert!(
        client
            .list_tags(&reference("docker.io/library/nginx"))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_copy_uses_relaxed_tls_flags_by_default() {
    let executor = Arc::new(ScriptedExecutor::streaming(Ok(ExitInfo {
        success: true,
        code: Some(0),
    })));
    let client = SkopeoClient::new(Arc::clone(&executor) as Arc<dyn ProcessExecutor>, SkopeoConfig::default());

    client.copy_tag(&copy_task()).await.unwrap();

    let calls = executor.calls();
    assert_eq!(
        calls[0].1,
        vec![
            "copy",
            "--insecure-policy",
            "--src-tls-verify=false",
            "--dest-tls-verify=false",
            "-q",
            "docker://docker.io/library/nginx:1.25",
            "docker://hub.example/mirror/nginx:1.25",
        ]
    );
}

#[tokio::test]
async fn test_copy_with_tls_verify_drops_relaxed_flags() {
    let executor = Arc::new(ScriptedExecutor::streaming(Ok(ExitInfo {
        success: true,
        code: Some(0),
    })));
    let config = SkopeoConfig::new().with_tls_verify(true);
    let client = SkopeoClient::new(Arc::clone(&executor) as Arc<dyn ProcessExecutor>, config);

    client.copy_tag(&copy_task()).await.unwrap();

    let calls = executor.calls();
    assert_eq!(
        calls[0].1,
        vec![
            "copy",
            "-q",
            "docker://docker.io/library/nginx:1.25",
            "docker://hub.example/mirror/nginx:1.25",
        ]
    );
}

#[tokio::test]
async fn test_copy_nonzero_exit_is_a_copy_error() {
    let executor = Arc::new(ScriptedExecutor::streaming(Ok(ExitInfo {
        success: false,
        code: Some(125),
    })));
    let client = SkopeoClient::new(executor, SkopeoConfig::default());

    let err = client.copy_tag(&copy_task()).await.unwrap_err();
    assert!(matches!(err, MirrorError::Copy { .. }));
    assert!(err.to_string().contains("125"));
}

#[tokio::test]
async fn test_copy_uses_configured_binary() {
    let executor = Arc::new(ScriptedExecutor::streaming(Ok(ExitInfo {
        success: true,
        code: Some(0),
    })));
    let config = SkopeoConfig::new().with_binary("/opt/skopeo");
    let client = SkopeoClient::new(Arc::clone(&executor) as Arc<dyn ProcessExecutor>, config);

    client.copy_tag(&copy_task()).await.unwrap();
    assert_eq!(executor.calls()[0].0, "/opt/skopeo");
}
