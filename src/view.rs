use std::fmt::Display;
use serde::{Deserialize, Serialize};

/// Identifies a single live renderer view by its (process id, view id) pair.
///
/// The pair is opaque to this crate: it is minted by whatever owns the
/// renderer processes and views, and only used as a lookup key for the
/// per-view temporary zoom tier. `Ord` is derived, so keys sort by process
/// id first and view id second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViewKey {
    pub process_id: i32,
    pub view_id: i32,
}

impl ViewKey {
    pub fn new(process_id: i32, view_id: i32) -> Self {
        Self { process_id, view_id }
    }
}

impl Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.process_id, self.view_id)
    }
}
