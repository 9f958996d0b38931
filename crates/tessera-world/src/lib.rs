//! Per-worker mirror of loaded chunk columns.
#![forbid(unsafe_code)]

pub mod column;
pub mod coords;
pub mod mirror;
pub mod payload;

pub use column::{Column, SECTION_VOLUME, Section};
pub use coords::{BlockPos, ColumnKey, SECTION_SIZE, SectionKey};
pub use mirror::WorldMirror;
pub use payload::{ColumnPayload, SectionPayload};

/// Sky light assumed where no light data was supplied.
pub const FULL_LIGHT: u8 = 15;
/// Vertical extent of worlds whose payloads omit it.
pub const LEGACY_MIN_Y: i32 = 0;
pub const LEGACY_WORLD_HEIGHT: u32 = 256;
