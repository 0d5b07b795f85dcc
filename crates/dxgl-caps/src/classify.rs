//! Vendor and card classification from driver identification strings.
//!
//! Both classifiers are ordered first-match tables: more specific markers precede the looser
//! ones they would otherwise be shadowed by (`"915GM"` before `"915G"`).

use crate::gl_info::{GlCard, GlVendor};

#[derive(Clone, Copy)]
enum Source {
    Vendor,
    Renderer,
}

const VENDOR_MARKERS: &[(Source, &str, GlVendor)] = &[
    (Source::Vendor, "NVIDIA", GlVendor::Nvidia),
    (Source::Vendor, "ATI", GlVendor::Ati),
    (Source::Vendor, "Intel(R)", GlVendor::Intel),
    (Source::Renderer, "Intel(R)", GlVendor::Intel),
    (Source::Vendor, "Intel Inc.", GlVendor::Intel),
    (Source::Vendor, "Mesa", GlVendor::Mesa),
];

/// Classifies the vendor from the vendor string, with the renderer string as a secondary
/// signal. Unrecognized strings map to [`GlVendor::Wine`].
pub fn classify_vendor(vendor: &str, renderer: &str) -> GlVendor {
    VENDOR_MARKERS
        .iter()
        .find(|(source, marker, _)| {
            let haystack = match source {
                Source::Vendor => vendor,
                Source::Renderer => renderer,
            };
            haystack.contains(marker)
        })
        .map_or(GlVendor::Wine, |(_, _, vendor)| *vendor)
}

struct CardFamily {
    markers: &'static [(&'static str, GlCard)],
    fallback: GlCard,
}

const NVIDIA_CARDS: CardFamily = CardFamily {
    markers: &[
        ("GeForce4 Ti", GlCard::NvidiaGeForce4Ti4600),
        ("GeForce FX", GlCard::NvidiaGeForceFx5900Ultra),
        ("Quadro FX 3000", GlCard::NvidiaQuadroFx3000),
        ("GeForce 6800", GlCard::NvidiaGeForce6800Ultra),
        ("Quadro FX 4000", GlCard::NvidiaQuadroFx4000),
        ("GeForce 7800", GlCard::NvidiaGeForce7800Ultra),
    ],
    fallback: GlCard::NvidiaGeForce4Ti4600,
};

const ATI_CARDS: CardFamily = CardFamily {
    markers: &[
        ("RADEON 9800 PRO", GlCard::AtiRadeon9800Pro),
        ("RADEON 9700 PRO", GlCard::AtiRadeon9700Pro),
    ],
    fallback: GlCard::AtiRadeon8500,
};

const INTEL_CARDS: CardFamily = CardFamily {
    markers: &[
        ("915GM", GlCard::IntelI915Gm),
        ("915G", GlCard::IntelI915G),
        ("865G", GlCard::IntelI865G),
        ("855G", GlCard::IntelI855G),
        ("830G", GlCard::IntelI830G),
    ],
    fallback: GlCard::IntelI915G,
};

/// Picks the adapter model for `vendor` from the renderer string.
pub fn classify_card(vendor: GlVendor, renderer: &str) -> GlCard {
    let family = match vendor {
        GlVendor::Nvidia => &NVIDIA_CARDS,
        GlVendor::Ati => &ATI_CARDS,
        GlVendor::Intel => &INTEL_CARDS,
        GlVendor::Mesa | GlVendor::Wine => return GlCard::Generic,
    };
    family
        .markers
        .iter()
        .find(|(marker, _)| renderer.contains(marker))
        .map_or(family.fallback, |(_, card)| *card)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_markers_in_priority_order() {
        assert_eq!(classify_vendor("NVIDIA Corporation", ""), GlVendor::Nvidia);
        assert_eq!(
            classify_vendor("ATI Technologies Inc.", "RADEON 9700 PRO"),
            GlVendor::Ati
        );
        assert_eq!(classify_vendor("Intel Inc.", ""), GlVendor::Intel);
        assert_eq!(
            classify_vendor("Tungsten Graphics, Inc", "Mesa DRI Intel(R) 915GM 20050225"),
            GlVendor::Intel
        );
        assert_eq!(classify_vendor("Mesa project: www.mesa3d.org", ""), GlVendor::Mesa);
        assert_eq!(classify_vendor("Brian Paul", "Mesa X11"), GlVendor::Wine);
        assert_eq!(classify_vendor("", ""), GlVendor::Wine);
    }

    #[test]
    fn nvidia_cards() {
        let card = |r| classify_card(GlVendor::Nvidia, r);
        assert_eq!(card("GeForce4 Ti 4200/AGP/SSE2"), GlCard::NvidiaGeForce4Ti4600);
        assert_eq!(card("GeForce FX 5700/AGP/SSE2"), GlCard::NvidiaGeForceFx5900Ultra);
        assert_eq!(card("Quadro FX 3000/AGP/SSE2"), GlCard::NvidiaQuadroFx3000);
        assert_eq!(card("GeForce 6800 GT/PCI/SSE2"), GlCard::NvidiaGeForce6800Ultra);
        assert_eq!(card("Quadro FX 4000/PCI/SSE2"), GlCard::NvidiaQuadroFx4000);
        assert_eq!(card("GeForce 7800 GTX/PCI/SSE2"), GlCard::NvidiaGeForce7800Ultra);
        assert_eq!(card("GeForce2 MX/AGP"), GlCard::NvidiaGeForce4Ti4600);
    }

    #[test]
    fn ati_cards() {
        let card = |r| classify_card(GlVendor::Ati, r);
        assert_eq!(card("RADEON 9800 PRO x86/SSE2"), GlCard::AtiRadeon9800Pro);
        assert_eq!(card("RADEON 9700 PRO Generic"), GlCard::AtiRadeon9700Pro);
        assert_eq!(card("RADEON 9600 XT"), GlCard::AtiRadeon8500);
    }

    #[test]
    fn intel_prefers_the_more_specific_model() {
        let card = |r| classify_card(GlVendor::Intel, r);
        assert_eq!(card("Intel(R) 915GM"), GlCard::IntelI915Gm);
        assert_eq!(card("Intel(R) 915G"), GlCard::IntelI915G);
        assert_eq!(card("Intel(R) 865G"), GlCard::IntelI865G);
        assert_eq!(card("Intel(R) 855GM"), GlCard::IntelI855G);
        assert_eq!(card("Intel(R) 830GM"), GlCard::IntelI830G);
        assert_eq!(card("Intel(R) 945G"), GlCard::IntelI915G);
    }

    #[test]
    fn vendors_without_tables_get_the_generic_card() {
        assert_eq!(classify_card(GlVendor::Mesa, "GeForce4 Ti"), GlCard::Generic);
        assert_eq!(classify_card(GlVendor::Wine, "anything"), GlCard::Generic);
    }
}
