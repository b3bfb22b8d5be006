//! Pulls poses out of dataset records and emits engine-ready placements.  No file is opened here;
//! callers pass JSON strings or implement `ObjectConfigSource`.

pub mod dataset_literals;
pub mod entity_placement;
pub mod object_config_cache;
pub mod porting_config;
pub mod procthor;
pub mod replicacad;
