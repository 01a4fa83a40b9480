//! Per-tool enable/disable preferences.
//!
//! The store is keyed by `(project, server, tool)` and lives apart from the
//! staged loader, so reloading a server never touches it. Entries are only
//! written after the backend accepted the change.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use mcpdeck_core::{
    Notification, Notifier, ProjectId, ServerId, Tool, ToolPreference, ToolPreferenceKey,
    ToolPreferencePort, ToolPreferenceSummary,
};
use tracing::{debug, info, warn};

use crate::error::GuiError;

/// Owns the tool preference store.
pub struct ToolPreferenceController {
    port: Arc<dyn ToolPreferencePort>,
    notifier: Arc<dyn Notifier>,
    store: RwLock<HashMap<ToolPreferenceKey, bool>>,
    in_flight: Mutex<HashMap<ServerId, InFlight>>,
}

/// Backend writes currently running for one server.
#[derive(Debug, Default)]
struct InFlight {
    bulk: bool,
    singles: usize,
}

impl InFlight {
    const fn is_idle(&self) -> bool {
        !self.bulk && self.singles == 0
    }
}

/// Registers an update as in flight for its servers until dropped.
struct UpdateGuard<'a> {
    in_flight: &'a Mutex<HashMap<ServerId, InFlight>>,
    servers: Vec<ServerId>,
    bulk: bool,
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        for server in &self.servers {
            let Some(entry) = in_flight.get_mut(server) else {
                continue;
            };
            if self.bulk {
                entry.bulk = false;
            } else {
                entry.singles = entry.singles.saturating_sub(1);
            }
            if entry.is_idle() {
                in_flight.remove(server);
            }
        }
    }
}

impl ToolPreferenceController {
    pub fn new(port: Arc<dyn ToolPreferencePort>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            port,
            notifier,
            store: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a tool is enabled. Tools without an entry are enabled.
    pub fn is_tool_enabled(&self, project: &ProjectId, server: &ServerId, tool_name: &str) -> bool {
        let key = ToolPreferenceKey::new(project, server, tool_name);
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied()
            .unwrap_or(true)
    }

    /// True while a bulk update for `server` is in flight. Toggle controls
    /// for that server should be disabled.
    pub fn is_bulk_updating(&self, server: &ServerId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(server)
            .is_some_and(|entry| entry.bulk)
    }

    /// Counts over `tools` under the current store. Never cached.
    pub fn summary(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tools: &[Tool],
    ) -> ToolPreferenceSummary {
        ToolPreferenceSummary::from_flags(
            tools
                .iter()
                .map(|tool| self.is_tool_enabled(project, server, &tool.name)),
        )
    }

    /// Fetch the stored flags for a server and merge them into the store.
    ///
    /// Returns how many entries were loaded.
    pub async fn load_tool_preferences(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<usize, GuiError> {
        let preferences = self
            .port
            .load_preferences(project, server)
            .await
            .map_err(|err| {
                warn!(server_id = %server, error = %err, "Failed to load tool preferences");
                GuiError::from(err)
            })?;

        let count = preferences.len();
        self.write_all(project, &preferences);
        debug!(server_id = %server, count, "Tool preferences loaded");
        Ok(count)
    }

    /// Set a single tool's flag.
    ///
    /// Refused with `Conflict` while a bulk update for the same server runs.
    pub async fn update_tool_preference(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tool_name: &str,
        is_enabled: bool,
    ) -> Result<(), GuiError> {
        let _guard = self.begin_single(server)?;

        if let Err(err) = self
            .port
            .update_preference(project, server, tool_name, is_enabled)
            .await
        {
            warn!(server_id = %server, tool = tool_name, error = %err, "Tool preference update failed");
            self.notifier.notify(Notification::ToolPreferenceFailed {
                message: err.to_string(),
            });
            return Err(err.into());
        }

        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ToolPreferenceKey::new(project, server, tool_name), is_enabled);
        info!(server_id = %server, tool = tool_name, is_enabled, "Tool preference updated");
        self.notifier.notify(Notification::ToolPreferenceUpdated {
            tool_name: tool_name.to_string(),
            enabled: is_enabled,
        });
        Ok(())
    }

    /// Apply a batch of flags as one unit.
    ///
    /// Either every entry is written to the store or none is. An empty batch
    /// is a no-op. Refused with `Conflict` while any other update for one of
    /// the batch's servers is still waiting on the backend.
    pub async fn update_tool_preferences_bulk(
        &self,
        project: &ProjectId,
        preferences: &[ToolPreference],
    ) -> Result<(), GuiError> {
        if preferences.is_empty() {
            return Ok(());
        }

        let _guard = self.begin_bulk(preferences)?;

        if let Err(err) = self.port.update_preferences_bulk(project, preferences).await {
            warn!(count = preferences.len(), error = %err, "Bulk tool preference update failed");
            self.notifier.notify(Notification::ToolPreferenceFailed {
                message: err.to_string(),
            });
            return Err(err.into());
        }

        self.write_all(project, preferences);

        let first = preferences[0].is_enabled;
        let uniform = preferences.iter().all(|p| p.is_enabled == first);
        info!(count = preferences.len(), "Tool preferences updated");
        self.notifier.notify(Notification::ToolPreferencesUpdated {
            count: preferences.len(),
            enabled: uniform.then_some(first),
        });
        Ok(())
    }

    /// Enable or disable every tool in `tools` for one server.
    pub async fn set_all_tools(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tools: &[Tool],
        enabled: bool,
    ) -> Result<(), GuiError> {
        let preferences: Vec<ToolPreference> = tools
            .iter()
            .map(|tool| ToolPreference::new(server.clone(), tool.name.clone(), enabled))
            .collect();
        self.update_tool_preferences_bulk(project, &preferences).await
    }

    fn begin_single(&self, server: &ServerId) -> Result<UpdateGuard<'_>, GuiError> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = in_flight.entry(server.clone()).or_default();
        if entry.bulk {
            return Err(GuiError::Conflict(format!(
                "a bulk tool update is in progress for server {server}"
            )));
        }
        entry.singles += 1;
        drop(in_flight);

        Ok(UpdateGuard {
            in_flight: &self.in_flight,
            servers: vec![server.clone()],
            bulk: false,
        })
    }

    fn begin_bulk(&self, preferences: &[ToolPreference]) -> Result<UpdateGuard<'_>, GuiError> {
        let servers: Vec<ServerId> = preferences
            .iter()
            .map(|p| p.server_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        for server in &servers {
            match in_flight.get(server) {
                Some(entry) if entry.bulk => {
                    return Err(GuiError::Conflict(format!(
                        "a bulk tool update is already in progress for server {server}"
                    )));
                }
                Some(entry) if entry.singles > 0 => {
                    return Err(GuiError::Conflict(format!(
                        "a tool update is still in progress for server {server}"
                    )));
                }
                _ => {}
            }
        }
        for server in &servers {
            in_flight.entry(server.clone()).or_default().bulk = true;
        }
        drop(in_flight);

        Ok(UpdateGuard {
            in_flight: &self.in_flight,
            servers,
            bulk: true,
        })
    }

    fn write_all(&self, project: &ProjectId, preferences: &[ToolPreference]) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        for pref in preferences {
            store.insert(
                ToolPreferenceKey::new(project, &pref.server_id, pref.tool_name.clone()),
                pref.is_enabled,
            );
        }
    }
}
