//! Upstream identity collaborator: username/UUID and profile/texture lookup.

mod client;
mod types;

pub use client::{decode_textures, BasicProfile, IdentityClient, MojangIdentityClient};
pub use types::{DecodedTextures, Profile, ProfileProperty, TextureEntry, TextureSet};
