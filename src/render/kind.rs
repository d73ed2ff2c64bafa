//! Closed set of render kinds and their dispatch.

use crate::image::{pad_to_square, Image};

use super::options::RenderOptions;
use super::{back_body, face, front_body, full_body, head, left_body, right_body};

/// The seven views the service can produce (spec.md §5). A closed enum
/// instead of a string/switch keeps every call site exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Face,
    Head,
    FullBody,
    FrontBody,
    BackBody,
    LeftBody,
    RightBody,
}

impl RenderKind {
    /// The path segment this kind is addressed by, e.g. `body/full`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Head => "head",
            Self::FullBody => "body/full",
            Self::FrontBody => "body/front",
            Self::BackBody => "body/back",
            Self::LeftBody => "body/left",
            Self::RightBody => "body/right",
        }
    }

    /// The key used inside the render-cache fingerprint; stable across
    /// releases since it feeds a content-addressed cache key.
    pub fn cache_key(&self) -> &'static str {
        self.route_segment()
    }
}

/// Renders `skin` as `kind` under `opts`, applying the optional square pad
/// last so it never perturbs any view's own geometry.
pub fn render(kind: RenderKind, skin: &Image, opts: RenderOptions) -> Image {
    let out = match kind {
        RenderKind::Face => face::render(skin, opts),
        RenderKind::Head => head::render(skin, opts),
        RenderKind::FullBody => full_body::render(skin, opts),
        RenderKind::FrontBody => front_body::render(skin, opts),
        RenderKind::BackBody => back_body::render(skin, opts),
        RenderKind::LeftBody => left_body::render(skin, opts),
        RenderKind::RightBody => right_body::render(skin, opts),
    };

    if opts.square {
        pad_to_square(&out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_option_pads_non_square_views_to_square() {
        let skin = Image::new(64, 64);
        let opts = RenderOptions::new(1, false, false, true).unwrap();
        let out = render(RenderKind::FrontBody, &skin, opts);
        let (w, h) = out.dimensions();
        assert_eq!(w, h);
    }

    #[test]
    fn every_kind_has_a_distinct_route_segment() {
        let kinds = [
            RenderKind::Face,
            RenderKind::Head,
            RenderKind::FullBody,
            RenderKind::FrontBody,
            RenderKind::BackBody,
            RenderKind::LeftBody,
            RenderKind::RightBody,
        ];
        let mut segments: Vec<_> = kinds.iter().map(|k| k.route_segment()).collect();
        segments.sort_unstable();
        segments.dedup();
        assert_eq!(segments.len(), kinds.len());
    }
}
