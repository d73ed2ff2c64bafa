//! The identity collaborator (spec.md §6): username/UUID resolution and
//! profile+texture lookup against Mojang's session server. Grounded in
//! `original_source/src/mojang.go` and `original_source/src/util/yggdrasil.go`,
//! restyled on the teacher's `net::fetch` wrapper around `reqwest`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;

use crate::error::{EngineError, Result};
use crate::player::PlayerUuid;

use super::types::{DecodedTextures, Profile};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A resolved username → UUID mapping.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BasicProfile {
    pub id: String,
    pub name: String,
}

/// Resolves usernames and fetches the profile/texture metadata needed by the
/// skin-fetch pipeline.
pub trait IdentityClient: Send + Sync + 'static {
    /// 200 -> `Some(profile)`; 204/404 -> `None`; anything else is an error.
    async fn username_to_uuid(&self, username: &str) -> Result<Option<BasicProfile>>;

    /// 200 -> `Some(profile)`; 204/404 -> `None`; anything else is an error.
    async fn profile_textures(&self, uuid: &PlayerUuid) -> Result<Option<Profile>>;
}

/// Production identity client talking to Mojang's public APIs over `reqwest`.
pub struct MojangIdentityClient {
    http: reqwest::Client,
}

impl MojangIdentityClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for MojangIdentityClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl IdentityClient for MojangIdentityClient {
    async fn username_to_uuid(&self, username: &str) -> Result<Option<BasicProfile>> {
        let url = format!("https://api.mojang.com/users/profiles/minecraft/{username}");
        let resp = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(Some(resp.json::<BasicProfile>().await?)),
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(None),
            status => Err(EngineError::MalformedPayload(format!(
                "username_to_uuid: unexpected status {status}"
            ))),
        }
    }

    async fn profile_textures(&self, uuid: &PlayerUuid) -> Result<Option<Profile>> {
        let url = format!(
            "https://sessionserver.mojang.com/session/minecraft/profile/{}",
            uuid.as_hex()
        );
        let resp = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(Some(resp.json::<Profile>().await?)),
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(None),
            status => Err(EngineError::MalformedPayload(format!(
                "profile_textures: unexpected status {status}"
            ))),
        }
    }
}

/// Base64-decodes and parses a profile's `textures` property value.
pub fn decode_textures(base64_value: &str) -> Result<DecodedTextures> {
    let raw = BASE64
        .decode(base64_value)
        .map_err(|e| EngineError::MalformedPayload(format!("textures value not base64: {e}")))?;
    serde_json::from_slice(&raw)
        .map_err(|e| EngineError::MalformedPayload(format!("textures value not valid json: {e}")))
}
