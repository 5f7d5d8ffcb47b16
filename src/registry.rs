//! Host zoom level registry.
//!
//! This module defines the types that resolve and store zoom level
//! overrides for a single browsing context. A zoom *level* is the exponent
//! of the page scale multiplier (see [`crate::scale`]); the registry never
//! interprets the value beyond comparing it against the default.
//!
//! # Concepts
//!
//! Overrides live in three tiers, most specific first:
//!
//! - **Scheme+host** — keyed by `(scheme, host)`, set by UI that wants a
//!   different level for e.g. `chrome://` pages than for the same host over
//!   `https://`. Never pruned.
//! - **Host** — keyed by host alone. Entries equal to the current default
//!   are pruned at write time so the map only stores deviations.
//! - **Temporary** — keyed by [`ViewKey`](crate::view::ViewKey), a per-view
//!   override that shadows both maps for that view only. Never enumerated,
//!   never copied between contexts.
//!
//! A lookup that matches no tier yields the registry's default level.
//!
//! # Available types
//!
//! - [`ZoomLevelRegistry`] — the per-context override store.
//! - [`ZoomChangeEvent`], [`ZoomChangeMode`] — describe a mutation.
//! - [`ZoomSubscription`] — handle returned by
//!   [`ZoomLevelRegistry::add_change_listener`]; dropping it unregisters.
//! - [`ZoomEventStream`] — async broadcast bridge returned by
//!   [`ZoomLevelRegistry::subscribe`].
//! - [`ZoomLevelEntry`] — one row of the enumerable override snapshot.
//!
//! # Example
//!
//! ```
//! use hostzoom::registry::ZoomLevelRegistry;
//!
//! let registry = ZoomLevelRegistry::new(0.0);
//! registry.set_level_for_scheme_and_host("https", "example.com", 1.5);
//! registry.set_level_for_host("example.com", 1.0);
//!
//! // scheme+host wins over host-only, host-only wins over the default
//! assert_eq!(registry.level_for("https", "example.com"), 1.5);
//! assert_eq!(registry.level_for("http", "example.com"), 1.0);
//! assert_eq!(registry.level_for("http", "other.example"), 0.0);
//! ```
//!
//! # See also
//!
//! - [`ZoomContextManager`](crate::context::ZoomContextManager) — owns one
//!   registry per browsing context.

/// Async event bridge over the listener list.
pub mod bus;
/// Change event types.
pub mod event;
/// The override store itself.
pub mod map;
/// Listener registration and the subscription handle.
pub mod subscription;

/// Capacity of the broadcast channel behind [`ZoomLevelRegistry::subscribe`].
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

pub use bus::ZoomEventStream;
pub use event::{ZoomChangeEvent, ZoomChangeMode, ZoomLevelEntry};
pub use map::{host_or_spec, ZoomLevelRegistry};
pub use subscription::ZoomSubscription;
