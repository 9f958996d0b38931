use serde::Deserialize;
use tessera_meta::StateId;

/// Column data as delivered by the transport layer.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPayload {
    // First payload that carries these fixes the world's vertical extent
    #[serde(default)]
    pub min_y: Option<i32>,
    #[serde(default)]
    pub world_height: Option<u32>,
    #[serde(default)]
    pub sections: Vec<SectionPayload>,
    // 16x16, index z * 16 + x; empty means biome 0 everywhere
    #[serde(default)]
    pub biomes: Vec<u16>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    /// World y of the section origin.
    pub y: i32,
    pub palette: Vec<StateId>,
    // 4096 entries in (y * 16 + z) * 16 + x order; empty means palette[0] everywhere
    #[serde(default)]
    pub indices: Vec<u16>,
    #[serde(default)]
    pub block_light: Vec<u8>,
    #[serde(default)]
    pub sky_light: Vec<u8>,
}

impl SectionPayload {
    /// Section filled with a single state.
    pub fn uniform(y: i32, state: StateId) -> Self {
        Self {
            y,
            palette: vec![state],
            ..Default::default()
        }
    }

    /// Dense section from a closure over local coordinates.
    pub fn from_fn(y: i32, mut f: impl FnMut(usize, usize, usize) -> StateId) -> Self {
        let mut palette: Vec<StateId> = Vec::new();
        let mut indices = Vec::with_capacity(crate::SECTION_VOLUME);
        for ly in 0..16 {
            for lz in 0..16 {
                for lx in 0..16 {
                    let s = f(lx, ly, lz);
                    let i = match palette.iter().position(|&p| p == s) {
                        Some(i) => i,
                        None => {
                            palette.push(s);
                            palette.len() - 1
                        }
                    };
                    indices.push(i as u16);
                }
            }
        }
        Self {
            y,
            palette,
            indices,
            ..Default::default()
        }
    }
}
