//! Shared test doubles for controller integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcpdeck_core::{
    ApiError, BasicServerInfo, LogQuery, Notification, NotificationLevel, Notifier, ProjectId, RefreshResult,
    ServerApiPort, ServerDetail, ServerId, ServerLogEntry, ServerStatus, ToggleResult, Tool,
    ToolPreference, ToolPreferencePort,
};
use mcpdeck_gui::{ControllerDeps, ServerDetailController};
use mockall::mock;
use tokio::sync::oneshot;

type DetailReply = Result<ServerDetail, ApiError>;

/// Scripted server API that records every call.
pub struct FakeServerApi {
    servers: Mutex<Result<Vec<BasicServerInfo>, ApiError>>,
    details: Mutex<VecDeque<DetailReply>>,
    hold_details: AtomicBool,
    held: Mutex<Vec<Option<oneshot::Sender<DetailReply>>>>,
    toggle: Mutex<Result<ToggleResult, ApiError>>,
    restart: Mutex<Result<(), ApiError>>,
    refresh: Mutex<Result<RefreshResult, ApiError>>,
    delete: Mutex<Result<(), ApiError>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeServerApi {
    pub fn with_servers(servers: Vec<BasicServerInfo>) -> Self {
        Self {
            servers: Mutex::new(Ok(servers)),
            details: Mutex::new(VecDeque::new()),
            hold_details: AtomicBool::new(false),
            held: Mutex::new(Vec::new()),
            toggle: Mutex::new(Ok(ToggleResult::default())),
            restart: Mutex::new(Ok(())),
            refresh: Mutex::new(Ok(RefreshResult::default())),
            delete: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A project containing a single server `s1` named "github".
    pub fn github() -> Self {
        Self::with_servers(vec![BasicServerInfo::new("s1", "github")])
    }

    pub fn set_servers(&self, result: Result<Vec<BasicServerInfo>, ApiError>) {
        *self.servers.lock().unwrap() = result;
    }

    /// Queue the reply for the next detail request.
    pub fn push_detail(&self, reply: DetailReply) {
        self.details.lock().unwrap().push_back(reply);
    }

    /// Park detail requests until `release` is called.
    pub fn hold_details(&self) {
        self.hold_details.store(true, Ordering::SeqCst);
    }

    pub fn held_count(&self) -> usize {
        self.held.lock().unwrap().len()
    }

    /// Answer the `index`-th parked detail request.
    pub fn release(&self, index: usize, reply: DetailReply) {
        let sender = self.held.lock().unwrap()[index].take().unwrap();
        sender.send(reply).unwrap();
    }

    pub fn set_toggle(&self, result: Result<ToggleResult, ApiError>) {
        *self.toggle.lock().unwrap() = result;
    }

    pub fn set_restart(&self, result: Result<(), ApiError>) {
        *self.restart.lock().unwrap() = result;
    }

    pub fn set_refresh(&self, result: Result<RefreshResult, ApiError>) {
        *self.refresh.lock().unwrap() = result;
    }

    pub fn set_delete(&self, result: Result<(), ApiError>) {
        *self.delete.lock().unwrap() = result;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ServerApiPort for FakeServerApi {
    async fn list_servers(&self, _project: &ProjectId) -> Result<Vec<BasicServerInfo>, ApiError> {
        self.record("list_servers");
        self.servers.lock().unwrap().clone()
    }

    async fn get_server(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
    ) -> Result<ServerDetail, ApiError> {
        self.record("get_server");
        if self.hold_details.load(Ordering::SeqCst) {
            let (tx, rx) = oneshot::channel();
            self.held.lock().unwrap().push(Some(tx));
            return rx
                .await
                .unwrap_or_else(|_| Err(ApiError::network("reply dropped")));
        }
        self.details.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ServerDetail {
                status: Some(ServerStatus::Online),
                ..ServerDetail::default()
            })
        })
    }

    async fn toggle_server(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
    ) -> Result<ToggleResult, ApiError> {
        self.record("toggle_server");
        self.toggle.lock().unwrap().clone()
    }

    async fn restart_server(&self, _project: &ProjectId, _server: &ServerId) -> Result<(), ApiError> {
        self.record("restart_server");
        self.restart.lock().unwrap().clone()
    }

    async fn refresh_status(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
    ) -> Result<RefreshResult, ApiError> {
        self.record("refresh_status");
        self.refresh.lock().unwrap().clone()
    }

    async fn delete_server(&self, _project: &ProjectId, _server: &ServerId) -> Result<(), ApiError> {
        self.record("delete_server");
        self.delete.lock().unwrap().clone()
    }

    async fn server_logs(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
        _query: &LogQuery,
    ) -> Result<Vec<ServerLogEntry>, ApiError> {
        self.record("server_logs");
        Ok(Vec::new())
    }
}

/// Preference backend that accepts or rejects everything.
#[derive(Default)]
pub struct FakePreferences {
    pub reject_with: Mutex<Option<ApiError>>,
    pub bulk_requests: Mutex<Vec<Vec<ToolPreference>>>,
}

impl FakePreferences {
    fn outcome(&self) -> Result<(), ApiError> {
        self.reject_with.lock().unwrap().clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ToolPreferencePort for FakePreferences {
    async fn load_preferences(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
    ) -> Result<Vec<ToolPreference>, ApiError> {
        Ok(Vec::new())
    }

    async fn update_preference(
        &self,
        _project: &ProjectId,
        _server: &ServerId,
        _tool_name: &str,
        _is_enabled: bool,
    ) -> Result<(), ApiError> {
        self.outcome()
    }

    async fn update_preferences_bulk(
        &self,
        _project: &ProjectId,
        preferences: &[ToolPreference],
    ) -> Result<(), ApiError> {
        self.bulk_requests.lock().unwrap().push(preferences.to_vec());
        self.outcome()
    }
}

/// Notifier that keeps everything it was given.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    /// Everything above debug level, i.e. what a user would see.
    pub fn shown(&self) -> Vec<Notification> {
        self.seen()
            .into_iter()
            .filter(|n| n.level() != NotificationLevel::Debug)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

mock! {
    pub Notifier {}

    impl Notifier for Notifier {
        fn notify(&self, notification: Notification);
    }
}

pub fn project() -> ProjectId {
    ProjectId::new("p1")
}

pub fn server_id() -> ServerId {
    ServerId::new("s1")
}

pub fn controller(
    api: Arc<FakeServerApi>,
    preferences: Arc<FakePreferences>,
    notifier: Arc<dyn Notifier>,
) -> ServerDetailController {
    ServerDetailController::new(
        ControllerDeps::new(api, preferences, notifier),
        project(),
        server_id(),
    )
}

pub fn detail_with_tools(names: &[&str]) -> ServerDetail {
    let tools: Vec<Tool> = names.iter().map(|name| Tool::new(*name)).collect();
    ServerDetail {
        status: Some(ServerStatus::Online),
        tools_count: Some(u32::try_from(tools.len()).unwrap()),
        tools: Some(tools),
        ..ServerDetail::default()
    }
}

/// Yield until `condition` holds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}
