//! Session mode flags
//!
//! | Flag             | Default |
//! |------------------|---------|
//! | VPN              | Off     |
//! | Incognito        | Off     |
//! | Tracker blocking | On      |
//! | Ad blocking      | On      |
//! | DNS over HTTPS   | On      |
//! | Auto-delete data | Off     |

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlagError {
    #[error("Unknown flag: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFlag {
    Vpn,
    Incognito,
    TrackerBlocking,
    AdBlocking,
    DnsOverHttps,
    AutoDeleteData,
}

impl ModeFlag {
    pub const ALL: [ModeFlag; 6] = [
        ModeFlag::Vpn,
        ModeFlag::Incognito,
        ModeFlag::TrackerBlocking,
        ModeFlag::AdBlocking,
        ModeFlag::DnsOverHttps,
        ModeFlag::AutoDeleteData,
    ];

    pub fn default_state(&self) -> bool {
        match self {
            ModeFlag::Vpn => false,
            ModeFlag::Incognito => false,
            ModeFlag::TrackerBlocking => true,
            ModeFlag::AdBlocking => true,
            ModeFlag::DnsOverHttps => true,
            ModeFlag::AutoDeleteData => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeFlag::Vpn => "vpn",
            ModeFlag::Incognito => "incognito",
            ModeFlag::TrackerBlocking => "tracker_blocking",
            ModeFlag::AdBlocking => "ad_blocking",
            ModeFlag::DnsOverHttps => "dns_over_https",
            ModeFlag::AutoDeleteData => "auto_delete_data",
        }
    }

    /// Human-readable label for settings summaries
    pub fn label(&self) -> &'static str {
        match self {
            ModeFlag::Vpn => "VPN",
            ModeFlag::Incognito => "Incognito",
            ModeFlag::TrackerBlocking => "Tracker blocking",
            ModeFlag::AdBlocking => "Ad blocking",
            ModeFlag::DnsOverHttps => "DNS over HTTPS",
            ModeFlag::AutoDeleteData => "Auto-delete data",
        }
    }
}

impl std::fmt::Display for ModeFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModeFlag {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "vpn" => Ok(ModeFlag::Vpn),
            "incognito" | "private" => Ok(ModeFlag::Incognito),
            "tracker_blocking" | "trackers" => Ok(ModeFlag::TrackerBlocking),
            "ad_blocking" | "ads" => Ok(ModeFlag::AdBlocking),
            "dns_over_https" | "doh" => Ok(ModeFlag::DnsOverHttps),
            "auto_delete_data" | "auto_delete" => Ok(ModeFlag::AutoDeleteData),
            _ => Err(FlagError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFlags {
    vpn: bool,
    incognito: bool,
    tracker_blocking: bool,
    ad_blocking: bool,
    dns_over_https: bool,
    auto_delete_data: bool,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self {
            vpn: ModeFlag::Vpn.default_state(),
            incognito: ModeFlag::Incognito.default_state(),
            tracker_blocking: ModeFlag::TrackerBlocking.default_state(),
            ad_blocking: ModeFlag::AdBlocking.default_state(),
            dns_over_https: ModeFlag::DnsOverHttps.default_state(),
            auto_delete_data: ModeFlag::AutoDeleteData.default_state(),
        }
    }

    pub fn get(&self, flag: ModeFlag) -> bool {
        match flag {
            ModeFlag::Vpn => self.vpn,
            ModeFlag::Incognito => self.incognito,
            ModeFlag::TrackerBlocking => self.tracker_blocking,
            ModeFlag::AdBlocking => self.ad_blocking,
            ModeFlag::DnsOverHttps => self.dns_over_https,
            ModeFlag::AutoDeleteData => self.auto_delete_data,
        }
    }

    pub fn set(&mut self, flag: ModeFlag, enabled: bool) {
        let slot = match flag {
            ModeFlag::Vpn => &mut self.vpn,
            ModeFlag::Incognito => &mut self.incognito,
            ModeFlag::TrackerBlocking => &mut self.tracker_blocking,
            ModeFlag::AdBlocking => &mut self.ad_blocking,
            ModeFlag::DnsOverHttps => &mut self.dns_over_https,
            ModeFlag::AutoDeleteData => &mut self.auto_delete_data,
        };

        if *slot != enabled {
            tracing::info!(flag = %flag, enabled, "Session flag changed");
            *slot = enabled;
        }
    }

    /// Flip a flag and return its new value
    pub fn toggle(&mut self, flag: ModeFlag) -> bool {
        let enabled = !self.get(flag);
        self.set(flag, enabled);
        enabled
    }

    pub fn vpn(&self) -> bool {
        self.vpn
    }

    pub fn incognito(&self) -> bool {
        self.incognito
    }

    pub fn tracker_blocking(&self) -> bool {
        self.tracker_blocking
    }

    pub fn ad_blocking(&self) -> bool {
        self.ad_blocking
    }

    pub fn dns_over_https(&self) -> bool {
        self.dns_over_https
    }

    pub fn auto_delete_data(&self) -> bool {
        self.auto_delete_data
    }

    /// Protection settings in display order, as shown by the privacy dialog
    pub fn summary(&self) -> Vec<(&'static str, bool)> {
        [
            ModeFlag::TrackerBlocking,
            ModeFlag::AdBlocking,
            ModeFlag::DnsOverHttps,
            ModeFlag::AutoDeleteData,
        ]
        .iter()
        .map(|flag| (flag.label(), self.get(*flag)))
        .collect()
    }
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self::new()
    }
}
