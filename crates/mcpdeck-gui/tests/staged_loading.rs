//! Staged loading behaviour of `ServerDetailController`.

mod common;

use std::sync::Arc;

use common::{
    FakePreferences, FakeServerApi, RecordingNotifier, controller, detail_with_tools, wait_until,
};
use mcpdeck_core::{ApiError, Notification, ServerDetail, ServerStatus, Tool};
use mcpdeck_gui::{BasicLoad, DetailOutcome, ServerDetailController};

fn setup(api: FakeServerApi) -> (Arc<FakeServerApi>, Arc<RecordingNotifier>, ServerDetailController) {
    let api = Arc::new(api);
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = controller(
        api.clone(),
        Arc::new(FakePreferences::default()),
        notifier.clone(),
    );
    (api, notifier, controller)
}

#[tokio::test]
async fn test_phase_one_publishes_loading_record() {
    let (api, _, controller) = setup(FakeServerApi::github());
    api.hold_details();

    let load = controller.load_server_detail().await;
    assert!(load.is_published());
    assert!(!controller.is_loading());

    let server = controller.server().unwrap();
    assert_eq!(server.name, "github");
    assert_eq!(server.status, ServerStatus::Loading);
    assert!(server.tools.is_empty());
    assert_eq!(server.tools_count, 0);
}

#[tokio::test]
async fn test_phase_one_emits_quiet_notification() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.hold_details();

    controller.load_server_detail().await;

    assert_eq!(
        notifier.seen(),
        vec![Notification::BasicInfoLoaded {
            server_name: "github".to_string()
        }]
    );
    assert!(notifier.shown().is_empty());
}

#[tokio::test]
async fn test_detail_success_sets_tools_and_count() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.push_detail(Ok(detail_with_tools(&["A", "B"])));

    let detail = controller.load_server_detail().await.into_detail().unwrap();
    assert_eq!(
        detail.outcome().await,
        DetailOutcome::Applied {
            status: ServerStatus::Online
        }
    );

    let server = controller.server().unwrap();
    let names: Vec<&str> = server.tool_names().collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(server.tools_count, 2);
    assert_eq!(server.name, "github");
    assert!(matches!(
        notifier.shown().as_slice(),
        [Notification::DetailLoaded { tools_count: 2, .. }]
    ));
}

#[tokio::test]
async fn test_timeout_without_body_keeps_basic_record() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.push_detail(Err(ApiError::Timeout { partial: None }));

    let detail = controller.load_server_detail().await.into_detail().unwrap();
    assert_eq!(detail.outcome().await, DetailOutcome::TimedOut);

    let server = controller.server().unwrap();
    assert_eq!(server.status, ServerStatus::Timeout);
    assert_eq!(server.name, "github");
    assert!(server.tools.is_empty());
    assert_eq!(
        notifier.shown(),
        vec![Notification::DetailTimedOut {
            server_name: "github".to_string()
        }]
    );
}

#[tokio::test]
async fn test_timeout_merges_partial_body() {
    let (api, _, controller) = setup(FakeServerApi::github());
    let partial = ServerDetail {
        last_error: Some("probe exceeded 10s".to_string()),
        tools: Some(vec![Tool::new("search")]),
        ..ServerDetail::default()
    };
    api.push_detail(Err(ApiError::Timeout {
        partial: Some(Box::new(partial)),
    }));

    let detail = controller.load_server_detail().await.into_detail().unwrap();
    detail.outcome().await;

    let server = controller.server().unwrap();
    assert_eq!(server.status, ServerStatus::Timeout);
    assert_eq!(server.last_error.as_deref(), Some("probe exceeded 10s"));
    assert_eq!(server.tools_count, 1);
}

#[tokio::test]
async fn test_other_failure_marks_error_and_keeps_fields() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.push_detail(Err(ApiError::remote(500, "probe crashed")));

    let detail = controller.load_server_detail().await.into_detail().unwrap();
    assert!(matches!(detail.outcome().await, DetailOutcome::Failed { .. }));

    let server = controller.server().unwrap();
    assert_eq!(server.status, ServerStatus::Error);
    assert_eq!(server.name, "github");
    assert!(matches!(
        notifier.shown().as_slice(),
        [Notification::DetailFailed { .. }]
    ));
}

#[tokio::test]
async fn test_detail_without_name_preserves_basic_name() {
    let (api, _, controller) = setup(FakeServerApi::github());
    api.push_detail(Ok(ServerDetail {
        name: None,
        status: Some(ServerStatus::Offline),
        ..ServerDetail::default()
    }));

    let detail = controller.load_server_detail().await.into_detail().unwrap();
    detail.outcome().await;

    let server = controller.server().unwrap();
    assert_eq!(server.name, "github");
    assert_eq!(server.status, ServerStatus::Offline);
}

#[tokio::test]
async fn test_overlapping_loads_last_started_wins() {
    let (api, _, controller) = setup(FakeServerApi::github());
    api.hold_details();

    let first = controller.load_server_detail().await.into_detail().unwrap();
    wait_until(|| api.held_count() == 1).await;
    let second = controller.load_server_detail().await.into_detail().unwrap();
    wait_until(|| api.held_count() == 2).await;

    // The newer request settles first, then the older, slower one arrives.
    api.release(1, Ok(detail_with_tools(&["fresh"])));
    assert!(matches!(second.outcome().await, DetailOutcome::Applied { .. }));
    api.release(0, Ok(detail_with_tools(&["stale-a", "stale-b"])));
    assert_eq!(first.outcome().await, DetailOutcome::Stale);

    let server = controller.server().unwrap();
    let names: Vec<&str> = server.tool_names().collect();
    assert_eq!(names, ["fresh"]);
    assert_eq!(server.tools_count, 1);
}

#[tokio::test]
async fn test_older_response_arriving_first_is_discarded() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.hold_details();

    let first = controller.load_server_detail().await.into_detail().unwrap();
    wait_until(|| api.held_count() == 1).await;
    let second = controller.load_server_detail().await.into_detail().unwrap();
    wait_until(|| api.held_count() == 2).await;

    api.release(0, Err(ApiError::remote(500, "old failure")));
    assert_eq!(first.outcome().await, DetailOutcome::Stale);
    assert_eq!(
        controller.server().unwrap().status,
        ServerStatus::Loading,
        "stale failure must not overwrite the newer load's record"
    );

    api.release(1, Err(ApiError::Timeout { partial: None }));
    assert_eq!(second.outcome().await, DetailOutcome::TimedOut);
    assert_eq!(controller.server().unwrap().status, ServerStatus::Timeout);

    // Only the applied outcome produced a notification.
    assert_eq!(notifier.shown().len(), 1);
}

#[tokio::test]
async fn test_unknown_server_resolves_not_found() {
    let (_, notifier, controller) = setup(FakeServerApi::with_servers(Vec::new()));

    let load = controller.load_server_detail().await;
    assert!(matches!(load, BasicLoad::NotFound));
    assert!(controller.server().is_none());
    assert!(!controller.is_loading());
    assert!(matches!(
        notifier.shown().as_slice(),
        [Notification::ServerNotFound { .. }]
    ));
}

#[tokio::test]
async fn test_list_failure_without_known_record() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.set_servers(Err(ApiError::network("connection refused")));

    let load = controller.load_server_detail().await;
    assert!(matches!(load, BasicLoad::Unavailable { .. }));
    assert!(controller.server().is_none());
    assert!(!controller.is_loading());
    assert!(matches!(
        notifier.shown().as_slice(),
        [Notification::BasicInfoUnavailable { .. }]
    ));
    assert_eq!(api.calls(), ["list_servers"]);
}

#[tokio::test]
async fn test_list_failure_keeps_known_record_as_timeout() {
    let (api, _, controller) = setup(FakeServerApi::github());
    api.push_detail(Ok(detail_with_tools(&["A"])));
    let detail = controller.load_server_detail().await.into_detail().unwrap();
    detail.outcome().await;

    api.set_servers(Err(ApiError::remote(503, "maintenance")));
    let load = controller.load_server_detail().await;
    assert!(matches!(load, BasicLoad::Unavailable { .. }));

    let server = controller.server().unwrap();
    assert_eq!(server.status, ServerStatus::Timeout);
    assert_eq!(server.name, "github");
    assert_eq!(server.tools_count, 1);
}

#[tokio::test]
async fn test_retry_notifies_then_reloads() {
    let (api, notifier, controller) = setup(FakeServerApi::github());
    api.push_detail(Err(ApiError::Timeout { partial: None }));
    controller
        .load_server_detail()
        .await
        .into_detail()
        .unwrap()
        .outcome()
        .await;

    let retry = controller.retry_connection().await.into_detail().unwrap();
    assert!(matches!(retry.outcome().await, DetailOutcome::Applied { .. }));

    let seen = notifier.shown();
    assert!(matches!(
        seen.as_slice(),
        [
            Notification::DetailTimedOut { .. },
            Notification::RetryingConnection { server_name },
            Notification::DetailLoaded { .. },
        ] if server_name == "github"
    ));
    assert_eq!(controller.server().unwrap().status, ServerStatus::Online);
}

#[tokio::test]
async fn test_subscribers_see_phase_one_publish() {
    let (api, _, controller) = setup(FakeServerApi::github());
    api.hold_details();
    let mut updates = controller.subscribe();

    controller.load_server_detail().await;

    assert!(updates.has_changed().unwrap());
    let view = updates.borrow_and_update().clone();
    assert!(!view.is_loading);
    assert_eq!(view.server.as_ref().unwrap().status, ServerStatus::Loading);
    assert_eq!(view.generation(), 1);
}
