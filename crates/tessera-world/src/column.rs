use tessera_meta::{AIR_STATE, StateId};

use crate::payload::SectionPayload;
use crate::FULL_LIGHT;

pub const SECTION_VOLUME: usize = 16 * 16 * 16;

#[inline]
fn idx(x: usize, y: usize, z: usize) -> usize {
    (y * 16 + z) * 16 + x
}

#[derive(Clone, Debug)]
pub struct Section {
    blocks: Vec<StateId>,
    block_light: Vec<u8>,
    sky_light: Vec<u8>,
}

impl Section {
    pub fn empty() -> Self {
        Self {
            blocks: vec![AIR_STATE; SECTION_VOLUME],
            block_light: vec![0; SECTION_VOLUME],
            sky_light: vec![FULL_LIGHT; SECTION_VOLUME],
        }
    }

    /// Expands a paletted payload. Out-of-range palette indices read as air.
    pub fn from_payload(p: &SectionPayload) -> Self {
        let mut s = Self::empty();
        let first = p.palette.first().copied().unwrap_or(AIR_STATE);
        if p.indices.is_empty() {
            s.blocks.fill(first);
        } else {
            let mut bad = 0usize;
            for (dst, &i) in s.blocks.iter_mut().zip(&p.indices) {
                *dst = match p.palette.get(i as usize) {
                    Some(&st) => st,
                    None => {
                        bad += 1;
                        AIR_STATE
                    }
                };
            }
            if bad > 0 || p.indices.len() != SECTION_VOLUME {
                log::warn!(
                    target: "runtime",
                    "section y={} indices={} bad_palette_refs={}",
                    p.y,
                    p.indices.len(),
                    bad
                );
            }
        }
        copy_light(&mut s.block_light, &p.block_light);
        copy_light(&mut s.sky_light, &p.sky_light);
        s
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> StateId {
        self.blocks[idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, state: StateId) {
        self.blocks[idx(x, y, z)] = state;
    }

    /// Max of block and sky light.
    #[inline]
    pub fn light(&self, x: usize, y: usize, z: usize) -> u8 {
        let i = idx(x, y, z);
        self.block_light[i].max(self.sky_light[i])
    }
}

fn copy_light(dst: &mut [u8], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = s.min(FULL_LIGHT);
    }
}

/// All sections sharing one x/z, between `min_y` and `min_y + height`.
#[derive(Clone, Debug)]
pub struct Column {
    min_y: i32,
    height: u32,
    sections: Vec<Option<Box<Section>>>,
    biomes: Vec<u16>,
}

impl Column {
    pub fn new(min_y: i32, height: u32) -> Self {
        let n = height.div_ceil(16) as usize;
        Self {
            min_y,
            height,
            sections: vec![None; n],
            biomes: vec![0; 256],
        }
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.min_y && ((y - self.min_y) as i64) < self.height as i64
    }

    #[inline]
    fn slot(&self, y: i32) -> Option<usize> {
        self.contains_y(y).then(|| ((y - self.min_y) >> 4) as usize)
    }

    pub fn section(&self, y: i32) -> Option<&Section> {
        self.slot(y).and_then(|i| self.sections[i].as_deref())
    }

    pub fn has_section(&self, y: i32) -> bool {
        self.section(y).is_some()
    }

    pub fn insert_section(&mut self, p: &SectionPayload) -> bool {
        match self.slot(p.y) {
            Some(i) => {
                self.sections[i] = Some(Box::new(Section::from_payload(p)));
                true
            }
            None => false,
        }
    }

    /// Section origins present, bottom to top.
    pub fn section_ys(&self) -> impl Iterator<Item = i32> + '_ {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| self.min_y + (i as i32) * 16)
    }

    /// Absent sections and heights outside the column read as air.
    pub fn get(&self, x: usize, y: i32, z: usize) -> StateId {
        match self.section(y) {
            Some(s) => s.get(x, y.rem_euclid(16) as usize, z),
            None => AIR_STATE,
        }
    }

    /// Returns false when `y` lies outside the column.
    pub fn set(&mut self, x: usize, y: i32, z: usize, state: StateId) -> bool {
        let Some(i) = self.slot(y) else {
            return false;
        };
        let sec = self.sections[i].get_or_insert_with(|| Box::new(Section::empty()));
        sec.set(x, y.rem_euclid(16) as usize, z, state);
        true
    }

    pub fn light(&self, x: usize, y: i32, z: usize) -> u8 {
        match self.section(y) {
            Some(s) => s.light(x, y.rem_euclid(16) as usize, z),
            None => FULL_LIGHT,
        }
    }

    pub fn biome(&self, x: usize, z: usize) -> u16 {
        self.biomes[z * 16 + x]
    }

    pub fn set_biomes(&mut self, biomes: &[u16]) {
        for (d, &b) in self.biomes.iter_mut().zip(biomes) {
            *d = b;
        }
    }
}
