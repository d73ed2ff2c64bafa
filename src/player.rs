//! Player identity: UUID parsing/formatting and the default-skin model derivation.
//!
//! Grounded in `original_source/src/util.go`'s `FormatUUID`/`ParseUUID` (dash
//! stripping + lowercasing, 32 hex chars) and in the Java `UUID.hashCode()`
//! parity rule used by Mojang clients to pick Steve vs Alex when no profile
//! exists, as implemented in `other_examples/..player-face-api..skin-mod.rs.rs`.

use crate::error::{EngineError, Result};

/// A 32-hex-char Minecraft player UUID, normalized (dashes stripped, lowercased).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerUuid([u8; 32]);

impl PlayerUuid {
    /// Parses a UUID from any of the usual textual forms (with or without
    /// dashes, mixed case). Returns `EngineError::InvalidUuid` if the result
    /// is not exactly 32 hex characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let stripped: String = raw
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if stripped.len() != 32 || !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidUuid(raw.to_string()));
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(stripped.as_bytes());
        Ok(Self(bytes))
    }

    /// The 32-hex-char lowercase, dashless representation used as a cache key component.
    pub fn as_hex(&self) -> &str {
        // Safe: constructed only from ASCII hex digits in `parse`.
        std::str::from_utf8(&self.0).expect("PlayerUuid bytes are always valid ASCII hex")
    }

    fn as_u128(&self) -> u128 {
        u128::from_str_radix(self.as_hex(), 16).expect("PlayerUuid bytes are always valid hex")
    }

    /// Mirrors Java's `UUID.hashCode()` parity trick, used by Mojang's own
    /// client to decide the default skin model when a player has never set
    /// a skin: `hi = msb ^ lsb; hash = (hi >> 32) ^ hi; even -> classic`.
    pub fn is_slim_by_default(&self) -> bool {
        let value = self.as_u128();
        let msb = ((value >> 64) & u64::MAX as u128) as i64;
        let lsb = (value & u64::MAX as u128) as i64;
        let hilo = msb ^ lsb;
        let hash = ((hilo >> 32) as i32) ^ (hilo as i32);
        (hash & 1) != 0
    }
}

impl std::fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_dashes_and_lowercases() {
        let a = PlayerUuid::parse("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap();
        let b = PlayerUuid::parse("069A79F444E94726A5BEFCA90E38AAF5").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_hex(), "069a79f444e94726a5befca90e38aaf5");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PlayerUuid::parse("abcd").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(PlayerUuid::parse(&"g".repeat(32)).is_err());
    }

    #[test]
    fn default_model_is_deterministic() {
        let uuid = PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap();
        assert_eq!(uuid.is_slim_by_default(), uuid.is_slim_by_default());
    }
}
