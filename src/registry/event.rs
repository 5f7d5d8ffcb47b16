use serde::{Deserialize, Serialize};

/// Which override tier a mutation touched.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomChangeMode {
    /// The host-only map changed.
    HostChanged,
    /// The scheme+host map changed.
    SchemeHostChanged,
    /// A per-view temporary level was set or cleared.
    TemporaryChanged,
    /// The context-wide default level changed.
    DefaultChanged,
}

/// Describes one successful mutation of a
/// [`ZoomLevelRegistry`](crate::registry::ZoomLevelRegistry).
///
/// `host` and `scheme` are empty for the tiers they don't apply to
/// (temporary and default changes carry neither).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomChangeEvent {
    pub mode: ZoomChangeMode,
    pub host: String,
    pub scheme: String,
    pub level: f64,
}

/// One row of the enumerable override snapshot returned by
/// [`ZoomLevelRegistry::all_levels`](crate::registry::ZoomLevelRegistry::all_levels).
///
/// `mode` is [`ZoomChangeMode::HostChanged`] for host-scoped rows and
/// [`ZoomChangeMode::SchemeHostChanged`] for scheme+host-scoped rows;
/// temporary levels never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevelEntry {
    pub mode: ZoomChangeMode,
    pub host: String,
    pub scheme: String,
    pub level: f64,
}
