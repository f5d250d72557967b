//! Persistence and asset bridge for the floor-plan viewer.
//!
//! The canvas engine only emits `SaveRequested`; this crate decides where the
//! edits go. Saves are debounced, posted to the plan API, and written to a
//! local store whenever the API cannot take them. Loads prefer the API and
//! fall back to the same local store. The crate also resolves the base
//! drawing and model URLs from the host's state pushes and guards their
//! fetches against stale responses. [`PlanController`] ties these pieces to
//! the canvas engine and the 3D viewport.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `PLAN_*` environment configuration and base candidates |
//! | [`transport`] | `HttpTransport` seam and the `reqwest` implementation |
//! | [`api`] | Plan endpoints with remembered base resolution |
//! | [`store`] | `LocalStore` with file and in-memory backends |
//! | [`payload`] | `{ payload: { elements } }` wire shape and local keys |
//! | [`bridge`] | Save/load with local fallback |
//! | [`debounce`] | Debounced saver with flush |
//! | [`guard`] | Latest-request guard for asset loads |
//! | [`assets`] | Drawing and model fetches |
//! | [`session`] | Host state push and file URL resolution |
//! | [`controller`] | Engine, viewport, loads, and saves behind one host-facing owner |

pub mod api;
pub mod assets;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod guard;
pub mod payload;
pub mod session;
pub mod store;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use assets::AssetLoader;
pub use bridge::{LoadSource, Loaded, PersistenceBridge, SaveOutcome};
pub use config::SyncConfig;
pub use controller::{HostReport, PlanController};
pub use debounce::{DebouncedSaver, SaveReport};
pub use error::SyncError;
pub use guard::LatestRequest;
pub use payload::{NO_RUN_KEY, PlanPayload, local_key};
pub use session::{HostState, HostUpdate, PlanSession, ProjectInfo, RunInfo, RunOutputs, file_url};
pub use store::{FileStore, LocalStore, MemoryStore};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
