//! Public engine facade.

mod bootstrap;
mod cascade;
mod commit;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_snapshot;
mod resize;
mod stage_state;
mod view;

pub use cascade::{ChildFetch, FetchDisposition, FetchPolicy};
pub use engine::SelectionEngine;
pub use engine_config::SelectionEngineConfig;
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1, StageSnapshot,
};
pub use resize::ResizeDebouncer;
pub use stage_state::StagePlaceholder;
pub use view::{DrawerState, ViewMode, ViewState, ViewportClass};
