use serde::{Deserialize, Serialize};

use crate::D3DFormat;

/// Refresh rate reported when the OS does not expose one (`D3DADAPTER_DEFAULT`).
pub const ADAPTER_DEFAULT_REFRESH: u32 = 0;

/// `D3DENUM_NO_WHQL_LEVEL`: skip the (slow) WHQL level lookup.
pub const ENUM_NO_WHQL_LEVEL: u32 = 0x0000_0002;

/// One display mode (`D3DDISPLAYMODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: u32,
    pub format: D3DFormat,
}

/// Adapter identity (`D3DADAPTER_IDENTIFIER8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterIdentifier {
    pub driver: String,
    pub description: String,
    /// High dword is the product/version pair, low dword the packed driver version.
    pub driver_version: u64,
    pub vendor_id: u32,
    pub device_id: u32,
    pub subsys_id: u32,
    pub revision: u32,
    pub device_identifier: [u8; 16],
    pub whql_level: u32,
}

impl AdapterIdentifier {
    pub fn driver_version_high(&self) -> u32 {
        (self.driver_version >> 32) as u32
    }

    pub fn driver_version_low(&self) -> u32 {
        self.driver_version as u32
    }
}
