//! Two-phase staged loading of one server's state.
//!
//! Phase 1 fetches the project's server list, finds the target and publishes
//! a `Loading` record so the view can render immediately. Phase 2 fetches the
//! health-probe-backed detail in a spawned task and merges it in place.
//!
//! Overlapping loads are resolved last-requested-wins: every load takes the
//! next generation number, and a phase-2 result is only merged when its
//! generation is still the current one. The check and the merge happen
//! inside a single `watch::Sender::send_if_modified` call, so they cannot
//! interleave with a newer load starting.

use std::sync::Arc;

use mcpdeck_core::{
    ApiError, Notification, Notifier, ProjectId, ServerApiPort, ServerId, ServerRecord,
    ServerStatus,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Published state of the detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerView {
    /// Latest known record, if any.
    pub server: Option<ServerRecord>,
    /// True only while phase 1 is in flight.
    pub is_loading: bool,
    generation: u64,
}

impl ServerView {
    /// Generation of the most recently started load.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of phase 1.
#[derive(Debug)]
pub enum BasicLoad {
    /// A `Loading` record was published and phase 2 is running.
    Published { detail: DetailHandle },
    /// The server is not in the project's list. The view should navigate away.
    NotFound,
    /// The list could not be fetched. Any known record now shows `Timeout`.
    Unavailable { message: String },
    /// A newer load started while this one was fetching the list.
    Superseded,
}

impl BasicLoad {
    /// The phase-2 handle, when phase 2 was started.
    pub fn into_detail(self) -> Option<DetailHandle> {
        match self {
            Self::Published { detail } => Some(detail),
            _ => None,
        }
    }

    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Result of phase 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Detail merged; the record now carries this status.
    Applied { status: ServerStatus },
    /// The health probe timed out (HTTP 408).
    TimedOut,
    /// Any other failure; the record now shows `Error`.
    Failed { message: String },
    /// A newer load started first; nothing was merged.
    Stale,
}

/// Handle to a running phase 2.
///
/// Dropping it does not cancel the fetch.
#[derive(Debug)]
pub struct DetailHandle(JoinHandle<DetailOutcome>);

impl DetailHandle {
    /// Wait for phase 2 to settle.
    pub async fn outcome(self) -> DetailOutcome {
        self.0.await.unwrap_or_else(|err| DetailOutcome::Failed {
            message: err.to_string(),
        })
    }
}

/// Notification for a settled phase 2, if one should fire.
fn detail_notification(outcome: &DetailOutcome, record: &ServerRecord) -> Option<Notification> {
    let server_name = record.name.clone();
    match outcome {
        DetailOutcome::Applied { status } => Some(Notification::DetailLoaded {
            server_name,
            status: *status,
            tools_count: record.tools_count,
        }),
        DetailOutcome::TimedOut => Some(Notification::DetailTimedOut { server_name }),
        DetailOutcome::Failed { message } => Some(Notification::DetailFailed {
            server_name,
            message: message.clone(),
        }),
        DetailOutcome::Stale => None,
    }
}

/// Notification for a settled phase 1, if one should fire.
fn basic_notification(
    load: &BasicLoad,
    server_id: &ServerId,
    record: Option<&ServerRecord>,
) -> Option<Notification> {
    match load {
        BasicLoad::Published { .. } => Some(Notification::BasicInfoLoaded {
            server_name: record.map_or_else(|| server_id.to_string(), |r| r.name.clone()),
        }),
        BasicLoad::NotFound => Some(Notification::ServerNotFound {
            server_id: server_id.clone(),
        }),
        BasicLoad::Unavailable { message } => Some(Notification::BasicInfoUnavailable {
            server_id: server_id.clone(),
            message: message.clone(),
        }),
        BasicLoad::Superseded => None,
    }
}

struct LoaderInner {
    api: Arc<dyn ServerApiPort>,
    notifier: Arc<dyn Notifier>,
    project_id: ProjectId,
    server_id: ServerId,
    state: watch::Sender<ServerView>,
}

/// Owns the published `ServerView` and is its only writer.
#[derive(Clone)]
pub struct StagedLoader {
    inner: Arc<LoaderInner>,
}

impl StagedLoader {
    pub fn new(
        api: Arc<dyn ServerApiPort>,
        notifier: Arc<dyn Notifier>,
        project_id: ProjectId,
        server_id: ServerId,
    ) -> Self {
        let (state, _) = watch::channel(ServerView::default());
        Self {
            inner: Arc::new(LoaderInner {
                api,
                notifier,
                project_id,
                server_id,
                state,
            }),
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.inner.project_id
    }

    pub fn server_id(&self) -> &ServerId {
        &self.inner.server_id
    }

    /// Snapshot of the published view.
    pub fn view(&self) -> ServerView {
        self.inner.state.borrow().clone()
    }

    pub fn server(&self) -> Option<ServerRecord> {
        self.inner.state.borrow().server.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Receive every published change.
    pub fn subscribe(&self) -> watch::Receiver<ServerView> {
        self.inner.state.subscribe()
    }

    /// Run phase 1 and start phase 2.
    ///
    /// Never fails: every error resolves to a terminal variant plus a
    /// notification.
    pub async fn load(&self) -> BasicLoad {
        let token = self.begin();
        let server_id = &self.inner.server_id;
        debug!(server_id = %server_id, generation = token, "Loading basic server info");

        let load = match self.inner.api.list_servers(&self.inner.project_id).await {
            Ok(servers) => match servers.into_iter().find(|s| &s.id == server_id) {
                Some(info) => {
                    let record = ServerRecord::from_basic(info);
                    if self.settle_basic(token, |view| view.server = Some(record)) {
                        BasicLoad::Published {
                            detail: self.spawn_detail(token),
                        }
                    } else {
                        BasicLoad::Superseded
                    }
                }
                None => {
                    if self.settle_basic(token, |view| view.server = None) {
                        BasicLoad::NotFound
                    } else {
                        BasicLoad::Superseded
                    }
                }
            },
            Err(err) => {
                warn!(server_id = %server_id, error = %err, "Failed to load server list");
                let settled = self.settle_basic(token, |view| {
                    if let Some(record) = view.server.as_mut() {
                        record.apply_timeout(None);
                    }
                });
                if settled {
                    BasicLoad::Unavailable {
                        message: err.to_string(),
                    }
                } else {
                    BasicLoad::Superseded
                }
            }
        };

        if matches!(load, BasicLoad::Superseded) {
            debug!(server_id = %server_id, generation = token, "Basic load superseded");
        }
        let record = self.server();
        if let Some(notification) = basic_notification(&load, server_id, record.as_ref()) {
            self.inner.notifier.notify(notification);
        }
        load
    }

    /// Re-run the load after telling the user a retry is underway.
    pub async fn retry(&self) -> BasicLoad {
        let server_name = self
            .server()
            .map_or_else(|| self.inner.server_id.to_string(), |record| record.name);
        self.inner
            .notifier
            .notify(Notification::RetryingConnection { server_name });
        self.load().await
    }

    /// Take the next generation and mark phase 1 in flight.
    fn begin(&self) -> u64 {
        let mut token = 0;
        self.inner.state.send_modify(|view| {
            view.generation += 1;
            view.is_loading = true;
            token = view.generation;
        });
        token
    }

    /// Apply the phase-1 result if `token` is still current.
    fn settle_basic(&self, token: u64, apply: impl FnOnce(&mut ServerView)) -> bool {
        self.inner.state.send_if_modified(|view| {
            if view.generation != token {
                return false;
            }
            apply(view);
            view.is_loading = false;
            true
        })
    }

    fn spawn_detail(&self, token: u64) -> DetailHandle {
        let loader = self.clone();
        DetailHandle(tokio::spawn(async move { loader.load_detail(token).await }))
    }

    async fn load_detail(&self, token: u64) -> DetailOutcome {
        let server_id = &self.inner.server_id;
        let result = self
            .inner
            .api
            .get_server(&self.inner.project_id, server_id)
            .await;

        let mut outcome = DetailOutcome::Stale;
        let mut notification = None;
        self.inner.state.send_if_modified(|view| {
            if view.generation != token {
                return false;
            }
            let Some(record) = view.server.as_mut() else {
                return false;
            };

            outcome = match result {
                Ok(detail) => {
                    record.merge_detail(detail);
                    DetailOutcome::Applied {
                        status: record.status,
                    }
                }
                Err(ApiError::Timeout { partial }) => {
                    record.apply_timeout(partial.map(|p| *p));
                    DetailOutcome::TimedOut
                }
                Err(err) => {
                    record.mark_error();
                    DetailOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            };
            notification = detail_notification(&outcome, record);
            true
        });

        match &outcome {
            DetailOutcome::Stale => {
                debug!(server_id = %server_id, generation = token, "Discarding stale detail response");
            }
            DetailOutcome::TimedOut => {
                warn!(server_id = %server_id, "Health check timed out; showing last known config");
            }
            DetailOutcome::Failed { message } => {
                warn!(server_id = %server_id, error = %message, "Failed to load server detail");
            }
            DetailOutcome::Applied { status } => {
                debug!(server_id = %server_id, status = %status, "Server detail merged");
            }
        }
        if let Some(notification) = notification {
            self.inner.notifier.notify(notification);
        }
        outcome
    }
}
