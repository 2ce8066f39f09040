use serde::Deserialize;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Block used for ids the catalog does not know. Falls back to `air`.
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    // 0 = clear, 15 = fully opaque. Defaults to 15 for solid blocks.
    #[serde(default)]
    pub opacity: Option<u8>,
    #[serde(default)]
    pub emission: Option<u8>,
    // Scatters sky light: the column below is no longer open sky even
    // though light still passes through.
    #[serde(default)]
    pub diffuses_skylight: Option<bool>,
}

impl BlockDef {
    pub fn named(name: &str) -> Self {
        BlockDef {
            name: name.into(),
            id: None,
            solid: None,
            opacity: None,
            emission: None,
            diffuses_skylight: None,
        }
    }
}
