//! @ai:module:intent Host metrics recorded in the report header
//! @ai:module:layer infrastructure
//! @ai:module:public_api SystemInfoProvider, HostSystemInfo, StaticSystemInfo
//!
//! Linux reads `/proc`; other platforms degrade to "Unknown" and 0.

/// @ai:intent Source of CPU, OS and memory facts about the host
pub trait SystemInfoProvider {
    fn os_display(&self) -> String;
    /// Total physical memory in bytes.
    fn total_physical_memory(&self) -> u64;
    fn cpu_brand_name(&self) -> String;
    fn cpuid(&self) -> String;
    fn cpuid_info(&self) -> String;
    /// Nominal clock speed in MHz.
    fn cpu_speed_mhz(&self) -> u32;
}

/// @ai:intent Best-effort introspection of the running machine
#[derive(Debug, Clone, Default)]
pub struct HostSystemInfo {
    cpuinfo: Option<String>,
    meminfo: Option<String>,
}

impl HostSystemInfo {
    /// @ai:intent Read host information once
    /// @ai:effects fs:read
    pub fn detect() -> Self {
        Self {
            cpuinfo: read_proc("/proc/cpuinfo"),
            meminfo: read_proc("/proc/meminfo"),
        }
    }

    fn cpu_field(&self, key: &str) -> Option<String> {
        self.cpuinfo.as_deref().and_then(|content| proc_field(content, key))
    }
}

fn read_proc(path: &str) -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string(path).ok()
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = path;
        None
    }
}

/// First `key : value` line in a `/proc` style listing.
fn proc_field(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim() == key)
        .map(|(_, value)| value.trim().to_string())
}

fn mem_total_bytes(meminfo: &str) -> Option<u64> {
    proc_field(meminfo, "MemTotal")
        .and_then(|value| value.split_whitespace().next().map(str::to_string))
        .and_then(|kb| kb.parse::<u64>().ok())
        .map(|kb| kb * 1024)
}

impl SystemInfoProvider for HostSystemInfo {
    fn os_display(&self) -> String {
        format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
    }

    fn total_physical_memory(&self) -> u64 {
        self.meminfo.as_deref().and_then(mem_total_bytes).unwrap_or(0)
    }

    fn cpu_brand_name(&self) -> String {
        self.cpu_field("model name")
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn cpuid(&self) -> String {
        let vendor = self.cpu_field("vendor_id");
        let family = self.cpu_field("cpu family");
        let model = self.cpu_field("model");
        let stepping = self.cpu_field("stepping");
        match (vendor, family, model, stepping) {
            (Some(vendor), Some(family), Some(model), Some(stepping)) => format!(
                "{}, family {}, model {}, stepping {}",
                vendor, family, model, stepping
            ),
            (Some(vendor), ..) => vendor,
            _ => "Unknown".to_string(),
        }
    }

    fn cpuid_info(&self) -> String {
        self.cpu_field("flags")
            .or_else(|| self.cpu_field("Features"))
            .unwrap_or_default()
    }

    fn cpu_speed_mhz(&self) -> u32 {
        self.cpu_field("cpu MHz")
            .and_then(|mhz| mhz.parse::<f64>().ok())
            .map(|mhz| mhz.round() as u32)
            .unwrap_or(0)
    }
}

/// @ai:intent Fixed system facts, for embedding and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSystemInfo {
    pub os_display: String,
    pub total_physical_memory: u64,
    pub cpu_brand_name: String,
    pub cpuid: String,
    pub cpuid_info: String,
    pub cpu_speed_mhz: u32,
}

impl SystemInfoProvider for StaticSystemInfo {
    fn os_display(&self) -> String {
        self.os_display.clone()
    }

    fn total_physical_memory(&self) -> u64 {
        self.total_physical_memory
    }

    fn cpu_brand_name(&self) -> String {
        self.cpu_brand_name.clone()
    }

    fn cpuid(&self) -> String {
        self.cpuid.clone()
    }

    fn cpuid_info(&self) -> String {
        self.cpuid_info.clone()
    }

    fn cpu_speed_mhz(&self) -> u32 {
        self.cpu_speed_mhz
    }
}
