//! JSON shapes returned by the Mojang/Yggdrasil session server. Grounded in
//! `original_source/src/mojang.go` and `original_source/src/util/yggdrasil.go`.

use serde::Deserialize;

/// A single entry in a profile's `properties` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub signature: Option<String>,
}

/// The profile returned by `GET /session/minecraft/profile/{uuid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

impl Profile {
    /// The `textures` property's base64 value, if present.
    pub fn textures_value(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == "textures")
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureMetadata {
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureEntry {
    pub url: String,
    #[serde(default)]
    pub metadata: TextureMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextureSet {
    #[serde(rename = "SKIN")]
    pub skin: Option<TextureEntry>,
    #[serde(rename = "CAPE")]
    pub cape: Option<TextureEntry>,
}

/// The base64-decoded JSON payload of a profile's `textures` property value.
#[derive(Debug, Clone, Deserialize)]
pub struct DecodedTextures {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub textures: TextureSet,
}
