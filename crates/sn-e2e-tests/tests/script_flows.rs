//! E2E tests for script upserts driven by "@name, it's a <kind>" commands.

mod helpers;

use helpers::TestHarness;
use sn_agent::AgentError;
use sn_agent::mock::CallKind;
use sn_agent::plan::{self, CommandKind, RecordRequest};

#[tokio::test]
async fn e2e_existing_script_include_is_updated() {
    let h = TestHarness::with_sample_data();
    let row = h
        .service()
        .update_script(
            "update @my_script.js, it's a script include",
            "var x = 42;",
            None,
        )
        .await
        .unwrap();

    assert_eq!(row["sys_id"], "s1");
    assert_eq!(h.api.rows("sys_script_include")[0]["script"], "var x = 42;");
    assert!(h.api.calls_of(CallKind::Create).is_empty());
}

#[tokio::test]
async fn e2e_new_client_script_is_created() {
    let h = TestHarness::with_sample_data();
    h.service()
        .update_script(
            "update @form_script.js, it's a client script",
            "function onLoad() {}",
            None,
        )
        .await
        .unwrap();

    let call = h.last_call(CallKind::Create);
    assert_eq!(call.table, "sys_script_client");
    let data = call.data.unwrap();
    assert_eq!(data["name"], "form_script.js");
    assert_eq!(data["script"], "function onLoad() {}");
    assert!(!data.contains_key("description"));
}

#[tokio::test]
async fn e2e_planned_upsert_executes() {
    let h = TestHarness::with_sample_data();
    let request = plan::plan(
        CommandKind::Script,
        "push @nightly.js as a scheduled job",
        "gs.log('tick');",
    )
    .unwrap();
    assert!(matches!(request, RecordRequest::UpsertScript { .. }));

    let value = h.service().execute(&request).await.unwrap();
    assert_eq!(value["name"], "nightly.js");
    assert_eq!(h.api.rows("sysauto_script").len(), 1);
}

#[tokio::test]
async fn e2e_missing_marker_fails_before_backend() {
    let h = TestHarness::with_sample_data();
    let err = h
        .service()
        .update_script("update my_script.js", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Parse(_)));
    assert!(h.api.calls().is_empty());
}
