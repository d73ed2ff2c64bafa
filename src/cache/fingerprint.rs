//! Render-cache fingerprinting (spec.md §4.6): a deterministic, order
//! independent cache key for a given set of render inputs.

use sha2::{Digest, Sha256};

use crate::player::PlayerUuid;
use crate::render::{RenderKind, RenderOptions};

/// Computes the `result:<sha256-hex>` cache key for one render request.
///
/// The encoding is a key-sorted `application/x-www-form-urlencoded` string
/// over every field that can change the output bytes, so two requests that
/// differ only in field order, or that omit a field defaulted the same way,
/// still collide onto the same key (spec.md, Invariant 10).
pub fn render_cache_key(
    uuid: PlayerUuid,
    kind: RenderKind,
    opts: RenderOptions,
    format: &str,
) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("uuid", uuid.as_hex().to_string()),
        ("kind", kind.cache_key().to_string()),
        ("scale", opts.scale.to_string()),
        ("overlay", opts.overlay.to_string()),
        ("format", format.to_string()),
    ];

    if opts.square {
        pairs.push(("square", "true".to_string()));
    }

    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let encoded = pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(&v)))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(encoded.as_bytes());
    format!("result:{:x}", digest)
}

/// Minimal `application/x-www-form-urlencoded` percent-encoding; every field
/// fed in here is already a plain ASCII token (hex uuid, digits, booleans,
/// lowercase kind segments), so this only needs to escape `/` cleanly.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid() -> PlayerUuid {
        PlayerUuid::parse("069a79f444e94726a5befca90e38aaf5").unwrap()
    }

    #[test]
    fn is_stable_for_identical_inputs() {
        let opts = RenderOptions::new(4, true, false, false).unwrap();
        let a = render_cache_key(uuid(), RenderKind::Face, opts, "png");
        let b = render_cache_key(uuid(), RenderKind::Face, opts, "png");
        assert_eq!(a, b);
    }

    #[test]
    fn differs_when_any_field_changes() {
        let opts_a = RenderOptions::new(4, true, false, false).unwrap();
        let opts_b = RenderOptions::new(8, true, false, false).unwrap();
        let a = render_cache_key(uuid(), RenderKind::Face, opts_a, "png");
        let b = render_cache_key(uuid(), RenderKind::Face, opts_b, "png");
        assert_ne!(a, b);
    }

    #[test]
    fn square_option_changes_the_key() {
        let without_square = RenderOptions::new(1, false, false, false).unwrap();
        let with_square = RenderOptions::new(1, false, false, true).unwrap();
        let a = render_cache_key(uuid(), RenderKind::FrontBody, without_square, "png");
        let b = render_cache_key(uuid(), RenderKind::FrontBody, with_square, "png");
        assert_ne!(a, b);
    }

    #[test]
    fn key_has_result_prefix_and_hex_digest() {
        let opts = RenderOptions::new(1, false, false, false).unwrap();
        let key = render_cache_key(uuid(), RenderKind::Head, opts, "png");
        let digest = key.strip_prefix("result:").expect("result: prefix");
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }
}
