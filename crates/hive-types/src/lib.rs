//! Shared type definitions for the Hive simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types flow downstream to `TypeScript` via `ts-rs` so the
//! presentation layer polls the same shapes the engine produces.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents and alliances
//! - [`enums`] -- Resources, actions and agent status
//! - [`structs`] -- Grid cells, agents, alliances and the world snapshot
//! - [`events`] -- World events and their typed payloads
//! - [`actions`] -- The normalized per-tick action
//! - [`perception`] -- What an agent sees when deciding

pub mod actions;
pub mod enums;
pub mod events;
pub mod ids;
pub mod perception;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::AgentAction;
pub use enums::{ActionType, AgentStatus, ResourceType};
pub use events::{
    AllyDetail, AllyOutcome, ChatDetail, EmergenceKind, EventDetail, ExhaustedDetail,
    GatherDetail, LargeAllianceDetail, LeaderDetail, MoveDetail, TradeDetail, VoteDetail,
    WorldEvent,
};
pub use ids::{AgentId, AllianceId};
pub use perception::{AllianceView, CellView, NeighborCell, Perception, VisibleAgent};
pub use structs::{
    Agent, AgentValues, Alliance, HexCell, HexCoord, ProviderCredentials, ValuesPatch,
    WorldSnapshot,
};

#[cfg(test)]
mod tests {
    //! Binding generation for the presentation layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes TypeScript bindings for every #[ts(export)] type to
        // `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::AllianceId::export_all();

        let _ = crate::enums::ResourceType::export_all();
        let _ = crate::enums::ActionType::export_all();
        let _ = crate::enums::AgentStatus::export_all();

        let _ = crate::structs::HexCoord::export_all();
        let _ = crate::structs::HexCell::export_all();
        let _ = crate::structs::AgentValues::export_all();
        let _ = crate::structs::ValuesPatch::export_all();
        let _ = crate::structs::Agent::export_all();
        let _ = crate::structs::Alliance::export_all();
        let _ = crate::structs::WorldSnapshot::export_all();

        let _ = crate::events::WorldEvent::export_all();
        let _ = crate::events::EventDetail::export_all();
        let _ = crate::events::EmergenceKind::export_all();

        let _ = crate::actions::AgentAction::export_all();

        let _ = crate::perception::Perception::export_all();
    }
}
