use std::collections::HashMap;

use tessera_meta::StateId;

use crate::column::{Column, Section};
use crate::coords::{BlockPos, ColumnKey, SectionKey};
use crate::payload::ColumnPayload;
use crate::{FULL_LIGHT, LEGACY_MIN_Y, LEGACY_WORLD_HEIGHT};

/// Columns known to one worker. Lookups outside loaded columns return None.
#[derive(Debug, Default)]
pub struct WorldMirror {
    columns: HashMap<ColumnKey, Column>,
    min_y: Option<i32>,
    world_height: Option<u32>,
}

impl WorldMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical extent: fixed by the first payload that carries one, legacy default otherwise.
    pub fn vertical_extent(&self) -> (i32, u32) {
        (
            self.min_y.unwrap_or(LEGACY_MIN_Y),
            self.world_height.unwrap_or(LEGACY_WORLD_HEIGHT),
        )
    }

    /// Replaces any column already at `(x, z)`.
    pub fn add_column(&mut self, x: i32, z: i32, payload: &ColumnPayload) {
        if self.min_y.is_none() {
            self.min_y = payload.min_y;
        }
        if self.world_height.is_none() {
            self.world_height = payload.world_height;
        }
        let (min_y, height) = self.vertical_extent();
        let key = ColumnKey::containing(x, z);
        let mut col = Column::new(min_y, height);
        for s in &payload.sections {
            if !col.insert_section(s) {
                log::warn!(target: "runtime", "column {} section y={} outside {}+{}", key, s.y, min_y, height);
            }
        }
        col.set_biomes(&payload.biomes);
        self.columns.insert(key, col);
    }

    pub fn remove_column(&mut self, x: i32, z: i32) -> bool {
        self.columns.remove(&ColumnKey::containing(x, z)).is_some()
    }

    pub fn get_column(&self, x: i32, z: i32) -> Option<&Column> {
        self.columns.get(&ColumnKey::containing(x, z))
    }

    pub fn has_column(&self, x: i32, z: i32) -> bool {
        self.columns.contains_key(&ColumnKey::containing(x, z))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn section(&self, key: SectionKey) -> Option<&Section> {
        self.get_column(key.x, key.z).and_then(|c| c.section(key.y))
    }

    /// State at `pos`; None when its column is not loaded.
    #[inline]
    pub fn get_block(&self, pos: BlockPos) -> Option<StateId> {
        let (lx, _, lz) = pos.local();
        self.get_column(pos.x, pos.z).map(|c| c.get(lx, pos.y, lz))
    }

    /// Returns false when the column is not loaded or `pos` is outside its height.
    pub fn set_block_state_id(&mut self, pos: BlockPos, state: StateId) -> bool {
        let (lx, _, lz) = pos.local();
        match self.columns.get_mut(&ColumnKey::containing(pos.x, pos.z)) {
            Some(c) => c.set(lx, pos.y, lz, state),
            None => false,
        }
    }

    pub fn biome_at(&self, pos: BlockPos) -> Option<u16> {
        let (lx, _, lz) = pos.local();
        self.get_column(pos.x, pos.z).map(|c| c.biome(lx, lz))
    }

    /// Combined light; full brightness outside loaded data.
    pub fn light_at(&self, pos: BlockPos) -> u8 {
        let (lx, _, lz) = pos.local();
        self.get_column(pos.x, pos.z)
            .map_or(FULL_LIGHT, |c| c.light(lx, pos.y, lz))
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.min_y = None;
        self.world_height = None;
    }
}
