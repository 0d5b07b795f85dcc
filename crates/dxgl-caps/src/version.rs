//! Vendor-specific driver version extraction from `GL_VERSION`.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::gl_info::GlVendor;

/// A `(major, minor)` pair, stored packed as `major << 16 | minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct DriverVersion {
    pub major: u32,
    pub minor: u32,
}

impl DriverVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn packed(self) -> u32 {
        ((self.major & 0xffff) << 16) | (self.minor & 0xffff)
    }

    pub fn from_packed(packed: u32) -> Self {
        Self::new(packed >> 16, packed & 0xffff)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("version string does not contain {0:?}")]
    MissingMarker(&'static str),
    #[error("no version number after the vendor marker")]
    MissingNumber,
    #[error("expected '.' after major version {major}")]
    MissingSeparator { major: u32 },
    #[error("version component does not fit in 32 bits")]
    Overflow,
    #[error("expected a digit.digit.digit triple after '-'")]
    MalformedTriple,
}

/// Version reported for vendors whose strings carry no parsable driver version.
pub const UNKNOWN_VENDOR_VERSION: DriverVersion = DriverVersion::new(0, 9);

/// Extracts the driver version for `vendor` from a `GL_VERSION` string.
///
/// Malformed strings never fail the scan: they are logged and reported as `0.0`.
pub fn parse_driver_version(vendor: GlVendor, version: &str) -> DriverVersion {
    let parsed = match vendor {
        GlVendor::Nvidia => parse_nvidia(version),
        GlVendor::Ati => parse_ati(version),
        GlVendor::Intel | GlVendor::Mesa => parse_mesa(version),
        GlVendor::Wine => return UNKNOWN_VENDOR_VERSION,
    };
    parsed.unwrap_or_else(|err| {
        warn!(?vendor, version, %err, "unparsable driver version");
        DriverVersion::default()
    })
}

/// `"... NVIDIA 71.74"` -> `10.7174`: the driver's major/minor pair is folded into the minor
/// component under a fixed major of 10.
pub fn parse_nvidia(version: &str) -> Result<DriverVersion, VersionParseError> {
    let (major, minor) = marker_major_minor(version, "NVIDIA")?;
    let minor = major
        .checked_mul(100)
        .and_then(|m| m.checked_add(minor))
        .ok_or(VersionParseError::Overflow)?;
    Ok(DriverVersion::new(10, minor))
}

/// `"... -x.y.z ..."` with single digits -> `x.(y*256 + z)`.
pub fn parse_ati(version: &str) -> Result<DriverVersion, VersionParseError> {
    let dash = version.find('-').ok_or(VersionParseError::MissingMarker("-"))?;
    let triple = version.as_bytes().get(dash + 1..dash + 6);
    let Some(&[x, b'.', y, b'.', z]) = triple else {
        return Err(VersionParseError::MalformedTriple);
    };
    if !(x.is_ascii_digit() && y.is_ascii_digit() && z.is_ascii_digit()) {
        return Err(VersionParseError::MalformedTriple);
    }
    let digit = |b: u8| u32::from(b - b'0');
    Ok(DriverVersion::new(digit(x), digit(y) * 256 + digit(z)))
}

/// `"... Mesa 9.1.7"` -> `9.1`.
pub fn parse_mesa(version: &str) -> Result<DriverVersion, VersionParseError> {
    let (major, minor) = marker_major_minor(version, "Mesa")?;
    Ok(DriverVersion::new(major, minor))
}

/// Finds `marker`, skips to the next space run, then reads `<digits>.<digits>`.
///
/// Missing digits count as zero, like C's `atoi`.
fn marker_major_minor(version: &str, marker: &'static str) -> Result<(u32, u32), VersionParseError> {
    let start = version
        .find(marker)
        .ok_or(VersionParseError::MissingMarker(marker))?;
    let after_marker = &version[start..];
    let space = after_marker
        .find(' ')
        .ok_or(VersionParseError::MissingNumber)?;
    let rest = after_marker[space..].trim_start_matches(' ');
    if rest.is_empty() {
        return Err(VersionParseError::MissingNumber);
    }

    let (major, rest) = leading_number(rest)?;
    let Some(rest) = rest.strip_prefix('.') else {
        return Err(VersionParseError::MissingSeparator { major });
    };
    let (minor, _) = leading_number(rest)?;
    Ok((major, minor))
}

fn leading_number(s: &str) -> Result<(u32, &str), VersionParseError> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (digits, rest) = s.split_at(end);
    if digits.is_empty() {
        return Ok((0, rest));
    }
    let value = digits.parse().map_err(|_| VersionParseError::Overflow)?;
    Ok((value, rest))
}
