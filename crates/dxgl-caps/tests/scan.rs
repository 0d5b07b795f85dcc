use dxgl_caps::extensions::recognized_extensions;
use dxgl_caps::{
    CapsConfig, Direct3D, DriverProfile, DriverVersion, Feature, FeatureSet, GlCard, GlVendor,
    GlWrap,
};
use dxgl_types::{MipFilter, TextureAddress, TextureFilter};
use pretty_assertions::assert_eq;

fn scanned(profile: DriverProfile) -> Direct3D {
    Direct3D::from_profile(profile, CapsConfig::default())
}

fn with_extensions(extensions: &str) -> DriverProfile {
    DriverProfile {
        context_already_current: true,
        extensions: Some(extensions.to_owned()),
        ..DriverProfile::default()
    }
}

#[test]
fn each_extension_sets_only_its_own_bits() {
    for (name, feature, implies) in recognized_extensions() {
        let info = scanned(with_extensions(name)).gl_info();
        let expected = std::iter::once(feature)
            .chain(implies.iter().copied())
            .collect::<FeatureSet>();
        assert_eq!(info.features, expected, "{name}");
    }
}

#[test]
fn unrecognized_and_padded_tokens_are_ignored() {
    let info =
        scanned(with_extensions("  GL_EXT_bgra   GL_ARB_multisample  GL_ARB_multisampleX ")).gl_info();
    assert_eq!(
        info.features.iter().collect::<Vec<_>>(),
        vec![Feature::ArbMultisample]
    );
}

#[test]
fn every_recognized_extension_together() {
    let all = recognized_extensions()
        .map(|(name, _, _)| name)
        .collect::<Vec<_>>()
        .join(" ");
    let info = scanned(with_extensions(&all)).gl_info();
    for (name, feature, _) in recognized_extensions() {
        assert!(info.supports(feature), "{name}");
    }
}

struct Driver {
    vendor: &'static str,
    renderer: &'static str,
    version: &'static str,
    expect_vendor: GlVendor,
    expect_card: GlCard,
    expect_version: (u32, u32),
}

#[test]
fn identity_and_version_per_vendor() {
    let drivers = [
        Driver {
            vendor: "NVIDIA Corporation",
            renderer: "GeForce FX 5900/AGP/SSE2",
            version: "1.5.2 NVIDIA 71.74",
            expect_vendor: GlVendor::Nvidia,
            expect_card: GlCard::NvidiaGeForceFx5900Ultra,
            expect_version: (10, 7174),
        },
        Driver {
            vendor: "ATI Technologies Inc.",
            renderer: "RADEON 9800 PRO x86/SSE2",
            version: "1.3.1026 (X4.3.0-3.2.0)",
            expect_vendor: GlVendor::Ati,
            expect_card: GlCard::AtiRadeon9800Pro,
            expect_version: (3, 2 * 256),
        },
        Driver {
            vendor: "Tungsten Graphics, Inc",
            renderer: "Mesa DRI Intel(R) 915GM",
            version: "1.4 Mesa 7.0.4",
            expect_vendor: GlVendor::Intel,
            expect_card: GlCard::IntelI915Gm,
            expect_version: (7, 0),
        },
        Driver {
            vendor: "Mesa Project",
            renderer: "Software Rasterizer",
            version: "1.3 Mesa 6.2",
            expect_vendor: GlVendor::Mesa,
            expect_card: GlCard::Generic,
            expect_version: (6, 2),
        },
        Driver {
            vendor: "Some Vendor",
            renderer: "Some Renderer",
            version: "2.1",
            expect_vendor: GlVendor::Wine,
            expect_card: GlCard::Generic,
            expect_version: (0, 9),
        },
    ];

    for driver in drivers {
        let d3d = scanned(DriverProfile {
            vendor: Some(driver.vendor.into()),
            renderer: Some(driver.renderer.into()),
            version: Some(driver.version.into()),
            extensions: Some(String::new()),
            ..DriverProfile::default()
        });
        let info = d3d.gl_info();
        assert!(info.is_authoritative(), "{}", driver.vendor);
        assert_eq!(info.vendor, driver.expect_vendor, "{}", driver.vendor);
        assert_eq!(info.card, driver.expect_card, "{}", driver.renderer);
        let (major, minor) = driver.expect_version;
        assert_eq!(info.driver_version, DriverVersion::new(major, minor), "{}", driver.version);

        let id = d3d.adapter_identifier(0, 0).unwrap();
        assert_eq!(id.vendor_id, driver.expect_vendor.pci_id());
        assert_eq!(id.device_id, driver.expect_card.pci_id());
        assert_eq!(id.driver_version_low(), info.driver_version.packed());
    }
}

#[test]
fn headless_scan_keeps_fallbacks() {
    let info = scanned(DriverProfile::headless()).gl_info();
    assert!(!info.valid);
    assert!(info.features.is_empty());
    assert_eq!(info.limits.max_textures, 1);
}

#[test]
fn lookup_tables_fall_back_to_core_modes() {
    let bare = scanned(with_extensions("")).lookup_tables().unwrap();
    for mode in TextureAddress::ALL {
        let wrap = bare.wrap(mode);
        assert!(
            matches!(wrap, GlWrap::Repeat | GlWrap::ClampToEdge),
            "{mode:?} -> {wrap:?}"
        );
    }
    for min in TextureFilter::ALL {
        for mip in MipFilter::ALL {
            assert_ne!(bare.min_mip_filter(min, mip).gl_enum(), 0);
        }
        assert_ne!(bare.mag_filter(min).gl_enum(), 0);
    }

    let full = scanned(with_extensions(
        "GL_ARB_texture_border_clamp GL_ARB_texture_mirrored_repeat \
         GL_ATI_texture_mirror_once GL_EXT_texture_filter_anisotropic",
    ))
    .lookup_tables()
    .unwrap();
    assert_eq!(full.wrap(TextureAddress::Border), GlWrap::ClampToBorder);
    assert_eq!(full.wrap(TextureAddress::Mirror), GlWrap::MirroredRepeat);
    assert_eq!(full.wrap(TextureAddress::MirrorOnce), GlWrap::MirrorClampToEdgeAti);
    assert_ne!(full, bare);
}
