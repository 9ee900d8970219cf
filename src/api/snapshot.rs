use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CarouselPhase, LayoutState, VisibilityState};
use crate::error::{CarouselError, CarouselResult};
use crate::platform::CarouselHost;

use super::{CarouselController, EngineLifecycle, FetchStatus, LayoutMode, ScriptStatus};

pub const CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of one controller, for regression tests and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub mounted: bool,
    pub phase: CarouselPhase,
    pub layout_mode: LayoutMode,
    pub layout: LayoutState,
    pub visibility: VisibilityState,
    pub fetch_status: FetchStatus,
    pub script_status: ScriptStatus,
    pub engine: EngineLifecycle,
    pub item_ids: Vec<u64>,
    pub root_properties: IndexMap<String, String>,
    pub live_observers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ControllerSnapshot,
}

impl ControllerSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> CarouselResult<String> {
        let payload = ControllerSnapshotJsonContractV1 {
            schema_version: CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CarouselError::Serialization(format!("snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> CarouselResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ControllerSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ControllerSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                CarouselError::Serialization(format!("snapshot json payload: {e}"))
            })?;
        if payload.schema_version != CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(CarouselError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<H: CarouselHost> CarouselController<H> {
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            mounted: self.mounted,
            phase: self.state.phase().clone(),
            layout_mode: self.state.layout_mode(),
            layout: self.state.layout().clone(),
            visibility: self.state.visibility(),
            fetch_status: self.state.data_loader().status(),
            script_status: self.engine_loader.status(),
            engine: self.adapter.lifecycle(),
            item_ids: self.state.items().iter().map(|item| item.id).collect(),
            root_properties: self.root_properties.clone(),
            live_observers: self.live_observer_count(),
        }
    }
}
