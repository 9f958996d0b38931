use tessera_meta::{BlockInfo, Metadata, StateId, StateInfo};
use tessera_world::{BlockPos, WorldMirror};

/// Liquid families rendered by the liquid pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fluid {
    Water,
    Lava,
}

/// Decoded block at one world position.
#[derive(Clone, Copy, Debug)]
pub struct Sample<'a> {
    pub state: StateId,
    pub block: Option<&'a BlockInfo>,
    pub info: Option<&'a StateInfo>,
}

impl<'a> Sample<'a> {
    pub fn name(&self) -> &'a str {
        self.block.map_or("", |b| &b.name)
    }

    /// Ids the version tables do not know are not air; they render as the placeholder.
    pub fn is_air(&self) -> bool {
        self.block.is_some_and(BlockInfo::is_air)
    }

    /// Opaque full cube: hides faces and casts AO.
    pub fn is_solid_cube(&self) -> bool {
        self.block
            .is_some_and(|b| b.full_cube && !b.transparent && !b.is_air())
    }

    pub fn is_full_cube(&self) -> bool {
        self.block.is_some_and(|b| b.full_cube)
    }

    pub fn prop(&self, key: &str) -> Option<&'a str> {
        self.info.and_then(|s| s.prop(key))
    }

    pub fn waterlogged(&self) -> bool {
        self.prop("waterlogged") == Some("true")
    }

    pub fn material(&self) -> Option<&'a str> {
        self.block.and_then(|b| b.material.as_deref())
    }

    /// Own fluid family, if the block is a liquid block.
    pub fn liquid(&self) -> Option<Fluid> {
        match self.name() {
            "water" | "flowing_water" => Some(Fluid::Water),
            "lava" | "flowing_lava" => Some(Fluid::Lava),
            _ => None,
        }
    }

    /// Fluid occupying the cell, including water held by waterlogged blocks.
    pub fn fluid(&self) -> Option<Fluid> {
        self.liquid()
            .or_else(|| self.waterlogged().then_some(Fluid::Water))
    }

    /// Flow distance; 0 for sources and waterlogged blocks.
    pub fn fluid_level(&self) -> u8 {
        if self.liquid().is_none() {
            return 0;
        }
        self.prop("level")
            .and_then(|l| l.parse::<u8>().ok())
            .or_else(|| self.info.and_then(|s| s.legacy_meta))
            .unwrap_or(0)
    }
}

/// Read-only access to a worker's mirror plus the version tables.
#[derive(Clone, Copy)]
pub struct BlockView<'a> {
    pub world: &'a WorldMirror,
    pub meta: &'a Metadata,
}

impl<'a> BlockView<'a> {
    pub fn new(world: &'a WorldMirror, meta: &'a Metadata) -> Self {
        Self { world, meta }
    }

    /// None when the position lies in a column this worker has not loaded.
    #[inline]
    pub fn sample(&self, p: BlockPos) -> Option<Sample<'a>> {
        let state = self.world.get_block(p)?;
        Some(self.decode(state))
    }

    #[inline]
    pub fn decode(&self, state: StateId) -> Sample<'a> {
        let info = self.meta.state(state);
        Sample {
            state,
            block: info.and_then(|i| self.meta.block(i.block)),
            info,
        }
    }

    /// Unloaded cells never occlude.
    #[inline]
    pub fn occludes(&self, p: BlockPos) -> bool {
        self.sample(p).is_some_and(|s| s.is_solid_cube())
    }
}
