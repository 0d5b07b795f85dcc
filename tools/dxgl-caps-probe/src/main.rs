use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dxgl_caps::config::{FORMAT_POLICY_ENV, PIXEL_SHADER_MODE_ENV, VERTEX_SHADER_MODE_ENV};
use dxgl_caps::format::{DEPTH_STENCIL_FORMATS, RENDER_TARGET_FORMATS};
use dxgl_caps::{
    CapsConfig, Direct3D, DriverProfile, FormatPolicy, GlInfo, LookupTables, ShaderMode,
};
use dxgl_types::{
    AdapterIdentifier, D3DFormat, D3dError, D3dResult, DevType, DeviceCaps, DisplayMode,
    MultiSampleType, ResourceType, Usage, ENUM_NO_WHQL_LEVEL,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dxgl-caps-probe",
    about = "Replay a recorded GL driver profile through the Direct3D 8 capability layer and print the result as JSON."
)]
struct Args {
    /// Driver profile (JSON) to replay
    profile: PathBuf,

    /// Device type to report caps for
    #[arg(long, value_enum, default_value_t = DeviceTypeArg::Hal)]
    device_type: DeviceTypeArg,

    /// Format matching policy (permissive|strict)
    #[arg(long, env = FORMAT_POLICY_ENV, default_value_t = FormatPolicy::Permissive)]
    format_policy: FormatPolicy,

    /// Vertex shader execution mode (hardware|emulated|disabled)
    #[arg(long, env = VERTEX_SHADER_MODE_ENV, default_value_t = ShaderMode::Hardware)]
    vertex_shader_mode: ShaderMode,

    /// Pixel shader execution mode (hardware|emulated|disabled)
    #[arg(long, env = PIXEL_SHADER_MODE_ENV, default_value_t = ShaderMode::Hardware)]
    pixel_shader_mode: ShaderMode,

    /// Skip the WHQL level in the adapter identifier
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_whql: bool,

    /// Write the report here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceTypeArg {
    Hal,
    Ref,
}

impl From<DeviceTypeArg> for DevType {
    fn from(arg: DeviceTypeArg) -> Self {
        match arg {
            DeviceTypeArg::Hal => DevType::Hal,
            DeviceTypeArg::Ref => DevType::Ref,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    identifier: AdapterIdentifier,
    gl_info: GlInfo,
    device_caps: DeviceCaps,
    lookup_tables: Option<LookupTables>,
    display_mode: Option<DisplayMode>,
    modes: Vec<DisplayMode>,
    format_checks: Vec<FormatCheck>,
    multisample_checks: Vec<MultiSampleCheck>,
}

#[derive(Debug, Serialize)]
struct FormatCheck {
    format: D3DFormat,
    depth_stencil: bool,
    result: &'static str,
}

#[derive(Debug, Serialize)]
struct MultiSampleCheck {
    samples: u32,
    result: &'static str,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.profile)
        .with_context(|| format!("read profile {}", args.profile.display()))?;
    let profile: DriverProfile = serde_json::from_str(&raw)
        .with_context(|| format!("parse profile {}", args.profile.display()))?;

    let config = CapsConfig {
        format_policy: args.format_policy,
        vertex_shader_mode: args.vertex_shader_mode,
        pixel_shader_mode: args.pixel_shader_mode,
    };
    debug!(?config, profile = %args.profile.display(), "replaying driver profile");
    let d3d = Direct3D::from_profile(profile, config);

    let report = probe(&d3d, args.device_type.into(), args.no_whql)?;
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;

    match &args.output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("write report {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("write report to stdout")?;
        }
    }
    Ok(())
}

fn probe(d3d: &Direct3D, device_type: DevType, no_whql: bool) -> anyhow::Result<ProbeReport> {
    const ADAPTER: u32 = 0;
    let flags = if no_whql { ENUM_NO_WHQL_LEVEL } else { 0 };

    let identifier = d3d
        .adapter_identifier(ADAPTER, flags)
        .context("query adapter identifier")?;
    let device_caps = d3d
        .device_caps(ADAPTER, device_type)
        .context("query device caps")?;
    let display_mode = d3d.adapter_display_mode(ADAPTER).ok();
    let adapter_format = display_mode.map_or(D3DFormat::X8R8G8B8, |m| m.format);

    let mode_count = d3d
        .adapter_mode_count(ADAPTER, D3DFormat::Unknown)
        .context("count display modes")?;
    let modes = (0..mode_count)
        .map(|i| d3d.enum_adapter_modes(ADAPTER, D3DFormat::Unknown, i))
        .collect::<D3dResult<Vec<_>>>()
        .context("enumerate display modes")?;

    let mut format_checks = Vec::new();
    let color = RENDER_TARGET_FORMATS
        .into_iter()
        .chain([D3DFormat::Dxt1, D3DFormat::Dxt5, D3DFormat::P8]);
    for format in color {
        let result = d3d.check_device_format(
            ADAPTER,
            device_type,
            adapter_format,
            Usage::empty(),
            ResourceType::Texture,
            format,
        );
        format_checks.push(FormatCheck {
            format,
            depth_stencil: false,
            result: outcome(result),
        });
    }
    for format in DEPTH_STENCIL_FORMATS {
        let result = d3d.check_device_format(
            ADAPTER,
            device_type,
            adapter_format,
            Usage::DEPTHSTENCIL,
            ResourceType::Surface,
            format,
        );
        format_checks.push(FormatCheck {
            format,
            depth_stencil: true,
            result: outcome(result),
        });
    }

    let multisample_checks = [2, 4, 8]
        .into_iter()
        .filter_map(MultiSampleType::new)
        .map(|ms| MultiSampleCheck {
            samples: ms.samples(),
            result: outcome(d3d.check_device_multi_sample_type(
                ADAPTER,
                device_type,
                adapter_format,
                true,
                ms,
            )),
        })
        .collect();

    Ok(ProbeReport {
        identifier,
        gl_info: d3d.gl_info(),
        device_caps,
        lookup_tables: d3d.lookup_tables(),
        display_mode,
        modes,
        format_checks,
        multisample_checks,
    })
}

fn outcome(result: D3dResult<()>) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(D3dError::InvalidCall) => "invalid-call",
        Err(D3dError::NotAvailable) => "not-available",
    }
}
