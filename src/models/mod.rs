// Domain models for zone analysis output
// These are pure value objects, serializable for webhook/alerting transport

pub mod cluster;
pub mod token_model;
pub mod zones;

// Re-export key types for convenience
pub use cluster::ClusterResult;
pub use token_model::TokenModel;
pub use zones::{OrderBlockZone, VolumeRange, ZoneKind, ZonePair};
