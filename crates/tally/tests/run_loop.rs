use std::{fs, sync::Arc, time::Duration};

use focus_probe::{NullProbe, ScriptedProbe};
use tally::{ActivityStore, Error, SamplerConfig, run_until};
use tempfile::tempdir;

/// Fast timing for tests; the query timeout is generous so no scripted title is lost.
fn fast() -> SamplerConfig {
    SamplerConfig {
        interval: Duration::from_millis(5),
        probe_timeout: Duration::from_secs(5),
    }
}

/// Resolve once `probe` has answered at least `n` queries.
async fn after_queries(probe: Arc<ScriptedProbe>, n: usize) {
    while probe.queries() < n {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_flushes_accumulated_counts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    let probe = Arc::new(ScriptedProbe::new([
        "notes.txt - A",
        "A",
        "",
        "todo - A",
        "B",
    ]));

    let summary = run_until(&path, probe.clone(), fast(), after_queries(probe.clone(), 6))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({"A": 3, "B": 1}));
    assert_eq!(summary.labels, 2);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.path, path);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_restart_resumes_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, r#"{"Editor": 10, "Browser": 4}"#).unwrap();

    let probe = Arc::new(ScriptedProbe::new(["x - Editor", "Shell"]));
    run_until(&path, probe.clone(), fast(), after_queries(probe.clone(), 3))
        .await
        .unwrap();

    let store = ActivityStore::load(&path).unwrap();
    assert_eq!(store.get("Editor"), 11);
    assert_eq!(store.get("Browser"), 4);
    assert_eq!(store.get("Shell"), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fresh_start_with_nothing_focused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");

    let summary = run_until(&path, Arc::new(NullProbe), fast(), async {
        tokio::time::sleep(Duration::from_millis(30)).await;
    })
    .await
    .unwrap();

    assert_eq!(summary.labels, 0);
    assert!(ActivityStore::load(&path).unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_corrupt_store_aborts_without_sampling() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("db.json");
    fs::write(&path, "{\"Editor\": oops}").unwrap();
    let probe = Arc::new(ScriptedProbe::new(["Editor"]));

    let err = run_until(&path, probe.clone(), fast(), async {})
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Corrupt { .. }), "{err}");
    assert_eq!(probe.queries(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"Editor\": oops}");
}
