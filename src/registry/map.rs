use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use url::Url;

use crate::registry::event::{ZoomChangeEvent, ZoomChangeMode, ZoomLevelEntry};
use crate::registry::subscription::{ListenerCallback, ListenerTable, ZoomSubscription};
use crate::scale::levels_equal;
use crate::view::ViewKey;

/// Returns the URL's host, or the full URL string when it has none.
///
/// Hostless URLs (`data:`, `file:` without authority, ...) are keyed by
/// their complete spec so they can still carry a per-"host" override.
pub fn host_or_spec(url: &Url) -> &str {
    match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => url.as_str(),
    }
}

/// Everything the registry stores, behind one lock.
///
/// A single critical section covers all four pieces of state so a reader
/// always observes a consistent combination of maps and default. Keys are
/// opaque strings; the registry never validates schemes or hosts.
#[derive(Default)]
struct ZoomState {
    /// Host-only overrides. Sparse: entries equal to the default are
    /// pruned at write time.
    host_levels: HashMap<String, f64>,
    /// Scheme+host overrides, scheme first. Never pruned.
    scheme_host_levels: HashMap<String, HashMap<String, f64>>,
    /// Per-view temporary overrides, ordered by (process id, view id).
    temporary_levels: BTreeMap<ViewKey, f64>,
    /// Fallback when no tier matches.
    default_level: f64,
}

fn resolve(state: &ZoomState, scheme: &str, host: &str) -> f64 {
    if let Some(level) = state.scheme_host_levels.get(scheme).and_then(|m| m.get(host)) {
        return *level;
    }
    state.host_levels.get(host).copied().unwrap_or(state.default_level)
}

/// Per-browsing-context store for zoom level overrides.
///
/// Overrides are resolved most specific first: scheme+host, then host,
/// then the default level. A separate temporary tier keyed by
/// [`ViewKey`] shadows both maps for a single view (see
/// [`level_for_view`](Self::level_for_view)).
///
/// # Concurrency
///
/// Any thread may call the getters at any time; the intended discipline is
/// that all writes come from one owning context (typically the UI side of
/// the embedder). That contract is documented, not enforced: every
/// operation is internally synchronized either way, and a concurrent
/// writer cannot corrupt state, only interleave notifications.
///
/// Change listeners run synchronously on the mutating thread, after the
/// data lock has been released, so a listener may call back into the
/// registry freely.
pub struct ZoomLevelRegistry {
    state: Mutex<ZoomState>,
    listeners: Arc<Mutex<ListenerTable>>,
}

impl ZoomLevelRegistry {
    /// Creates an empty registry that falls back to `default_level`.
    pub fn new(default_level: f64) -> Self {
        Self {
            state: Mutex::new(ZoomState {
                default_level,
                ..ZoomState::default()
            }),
            listeners: Arc::new(Mutex::new(ListenerTable::default())),
        }
    }

    /// Resolves the zoom level for a scheme+host pair.
    ///
    /// `host` is "the most specific available identifier": callers pass
    /// the hostname when the URL has one and the full URL spec otherwise
    /// (see [`host_or_spec`]). Scheme and host are matched as opaque
    /// strings; an empty scheme is the literal empty-string key, not a
    /// wildcard.
    pub fn level_for(&self, scheme: &str, host: &str) -> f64 {
        let state = self.state.lock().unwrap();
        resolve(&state, scheme, host)
    }

    /// Whether an explicit override exists for this scheme+host or host.
    ///
    /// Distinguishes "explicitly set to some level" from "no override
    /// configured", which [`level_for`](Self::level_for) cannot: both look
    /// the same when the stored level happens to equal the default.
    pub fn has_level_for(&self, scheme: &str, host: &str) -> bool {
        let state = self.state.lock().unwrap();
        state
            .scheme_host_levels
            .get(scheme)
            .is_some_and(|m| m.contains_key(host))
            || state.host_levels.contains_key(host)
    }

    /// Point-in-time snapshot of every host and scheme+host override.
    ///
    /// Temporary levels are per-view ephemeral state and never appear
    /// here. Ordering is unspecified.
    pub fn all_levels(&self) -> Vec<ZoomLevelEntry> {
        let state = self.state.lock().unwrap();
        let mut entries = Vec::with_capacity(
            state.host_levels.len()
                + state.scheme_host_levels.values().map(HashMap::len).sum::<usize>(),
        );

        for (host, level) in &state.host_levels {
            entries.push(ZoomLevelEntry {
                mode: ZoomChangeMode::HostChanged,
                host: host.clone(),
                scheme: String::new(),
                level: *level,
            });
        }
        for (scheme, hosts) in &state.scheme_host_levels {
            for (host, level) in hosts {
                entries.push(ZoomLevelEntry {
                    mode: ZoomChangeMode::SchemeHostChanged,
                    host: host.clone(),
                    scheme: scheme.clone(),
                    level: *level,
                });
            }
        }

        entries
    }

    /// Sets (or resets) the host-only override for `host`.
    ///
    /// Writing a level equal to the current default removes the entry
    /// instead, keeping the map sparse. The notification fires either way
    /// with the requested level.
    ///
    /// `host` must be non-empty; an empty host is ignored with a warning.
    pub fn set_level_for_host(&self, host: &str, level: f64) {
        if host.is_empty() {
            log::warn!("set_level_for_host called with an empty host; ignored");
            return;
        }

        {
            let mut state = self.state.lock().unwrap();
            if levels_equal(level, state.default_level) {
                state.host_levels.remove(host);
            } else {
                state.host_levels.insert(host.to_string(), level);
            }
        }

        self.notify(ZoomChangeEvent {
            mode: ZoomChangeMode::HostChanged,
            host: host.to_string(),
            scheme: String::new(),
            level,
        });
    }

    /// Sets the override for the exact (scheme, host) pair.
    ///
    /// Unlike the host-only tier this always stores the entry, even when
    /// the level equals the current default; the scheme+host tier is never
    /// pruned.
    pub fn set_level_for_scheme_and_host(&self, scheme: &str, host: &str, level: f64) {
        {
            let mut state = self.state.lock().unwrap();
            state
                .scheme_host_levels
                .entry(scheme.to_string())
                .or_default()
                .insert(host.to_string(), level);
        }

        self.notify(ZoomChangeEvent {
            mode: ZoomChangeMode::SchemeHostChanged,
            host: host.to_string(),
            scheme: scheme.to_string(),
            level,
        });
    }

    /// Whether `view` currently carries a temporary override.
    pub fn uses_temporary_level(&self, view: ViewKey) -> bool {
        self.state.lock().unwrap().temporary_levels.contains_key(&view)
    }

    /// The temporary level for `view`, or the default level if none.
    pub fn temporary_level(&self, view: ViewKey) -> f64 {
        let state = self.state.lock().unwrap();
        state
            .temporary_levels
            .get(&view)
            .copied()
            .unwrap_or(state.default_level)
    }

    /// Sets the temporary override for `view`. Host and scheme maps are
    /// untouched.
    pub fn set_temporary_level(&self, view: ViewKey, level: f64) {
        self.state.lock().unwrap().temporary_levels.insert(view, level);

        self.notify(ZoomChangeEvent {
            mode: ZoomChangeMode::TemporaryChanged,
            host: String::new(),
            scheme: String::new(),
            level,
        });
    }

    /// Removes the temporary override for `view`.
    ///
    /// The registry does not observe view teardown; the embedder calls
    /// this when a view stops using its temporary level (and on view
    /// destruction, or the entry leaks until the context goes away).
    /// A no-op without notification when no entry exists; otherwise the
    /// notification carries the default level the view falls back to.
    pub fn clear_temporary_level(&self, view: ViewKey) {
        let fallback = {
            let mut state = self.state.lock().unwrap();
            if state.temporary_levels.remove(&view).is_none() {
                return;
            }
            state.default_level
        };

        self.notify(ZoomChangeEvent {
            mode: ZoomChangeMode::TemporaryChanged,
            host: String::new(),
            scheme: String::new(),
            level: fallback,
        });
    }

    /// The context-wide fallback level.
    pub fn default_level(&self) -> f64 {
        self.state.lock().unwrap().default_level
    }

    /// Replaces the context-wide fallback level.
    ///
    /// Existing host entries are not re-pruned against the new default:
    /// pruning happens only when a host entry is written. A host entry
    /// equal to the current default can therefore exist if the default
    /// changed after it was written, and
    /// [`has_level_for`](Self::has_level_for) will keep reporting it.
    pub fn set_default_level(&self, level: f64) {
        self.state.lock().unwrap().default_level = level;

        self.notify(ZoomChangeEvent {
            mode: ZoomChangeMode::DefaultChanged,
            host: String::new(),
            scheme: String::new(),
            level,
        });
    }

    /// Replaces this registry's host map, scheme+host map, and default
    /// level with a snapshot of `other`'s.
    ///
    /// Temporary levels are view-scoped, not context-scoped, and are never
    /// copied; this registry's own temporary entries survive. The snapshot
    /// of `other` is taken under its lock, so a consistent state is copied
    /// even if `other` has concurrent readers. No notifications fire.
    pub fn copy_from(&self, other: &ZoomLevelRegistry) {
        if std::ptr::eq(self, other) {
            return;
        }

        let (host_levels, scheme_host_levels, default_level) = {
            let source = other.state.lock().unwrap();
            (
                source.host_levels.clone(),
                source.scheme_host_levels.clone(),
                source.default_level,
            )
        };

        let mut state = self.state.lock().unwrap();
        state.host_levels = host_levels;
        state.scheme_host_levels = scheme_host_levels;
        state.default_level = default_level;
    }

    /// Registers `callback` to run on every successful mutation.
    ///
    /// Callbacks run synchronously on the mutating thread, outside the
    /// data lock, and may call back into the registry. The returned
    /// [`ZoomSubscription`] unregisters the callback when dropped;
    /// notifications that begin after the drop will not reach it.
    pub fn add_change_listener<F>(&self, callback: F) -> ZoomSubscription
    where
        F: Fn(&ZoomChangeEvent) + Send + Sync + 'static,
    {
        let callback: ListenerCallback = Arc::new(callback);
        let id = self.listeners.lock().unwrap().insert(callback);
        ZoomSubscription::new(id, Arc::downgrade(&self.listeners))
    }

    /// Effective level for a live view: its temporary override when it has
    /// one, else the resolution of the URL's scheme and host-or-spec.
    ///
    /// The whole read happens under one lock acquisition, so the answer is
    /// consistent even with a concurrent writer.
    pub fn level_for_view(&self, url: &Url, view: ViewKey) -> f64 {
        let state = self.state.lock().unwrap();
        if let Some(level) = state.temporary_levels.get(&view) {
            return *level;
        }
        resolve(&state, url.scheme(), host_or_spec(url))
    }

    /// Writes `level` to the narrowest scope currently active for `view`:
    /// its temporary entry when it uses one, else the host-only map under
    /// `host`.
    pub fn set_level_for_view(&self, view: ViewKey, host: &str, level: f64) {
        if self.uses_temporary_level(view) {
            self.set_temporary_level(view, level);
        } else {
            self.set_level_for_host(host, level);
        }
    }

    fn notify(&self, event: ZoomChangeEvent) {
        // Snapshot first so callbacks run without any registry lock held.
        let callbacks = self.listeners.lock().unwrap().snapshot();
        log::trace!(
            "zoom change {:?} host={:?} scheme={:?} level={} -> {} listener(s)",
            event.mode,
            event.host,
            event.scheme,
            event.level,
            callbacks.len()
        );
        for callback in callbacks {
            callback(&event);
        }
    }
}

impl Default for ZoomLevelRegistry {
    fn default() -> Self {
        Self::new(0.0)
    }
}
