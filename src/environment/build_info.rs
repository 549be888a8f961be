//! @ai:module:intent Describe the build: OS, compiler, architecture, SIMD level and profile
//! @ai:module:layer infrastructure
//! @ai:module:public_api BuildInfoProvider, CompileTimeBuildInfo, StaticBuildInfo, build_description
//! @ai:module:stateless true

/// @ai:intent Source of already-resolved build identifier strings
pub trait BuildInfoProvider {
    fn os(&self) -> String;
    fn compiler(&self) -> String;
    fn architecture(&self) -> String;
    fn simd(&self) -> String;
    /// One of `Debug`, `Release`, `RelWithDebInfo`, or empty when unknown.
    fn configuration(&self) -> String;
}

/// @ai:intent Join identifiers in the fixed order used to compare runs
/// @ai:effects pure
pub fn build_description(info: &dyn BuildInfoProvider) -> String {
    format!(
        "{} {} {} {} {}",
        info.os(),
        info.compiler(),
        info.architecture(),
        info.simd(),
        info.configuration()
    )
}

/// @ai:intent How the SIMD code path was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdDispatch {
    Automatic,
    Manual,
}

impl SimdDispatch {
    /// @ai:intent Suffix appended to the SIMD identifier
    /// @ai:effects pure
    pub fn suffix(&self) -> &'static str {
        match self {
            SimdDispatch::Automatic => "(auto)",
            SimdDispatch::Manual => "(manual)",
        }
    }
}

/// @ai:intent Combine a SIMD level with its dispatch suffix
/// @ai:effects pure
pub fn simd_identifier(level: Option<&str>, dispatch: SimdDispatch) -> String {
    match level {
        Some(level) => format!("{}{}", level, dispatch.suffix()),
        None => "No SIMD".to_string(),
    }
}

/// @ai:intent Map a cargo profile and debug-info level to a configuration name
/// @ai:effects pure
pub fn configuration_identifier(profile: &str, debug_info: &str) -> &'static str {
    let has_debug_info = !matches!(debug_info, "" | "false" | "0" | "none");
    match profile {
        "debug" => "Debug",
        "release" if has_debug_info => "RelWithDebInfo",
        "release" => "Release",
        _ => "",
    }
}

/// @ai:intent Identifiers resolved from the target this crate was compiled for
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileTimeBuildInfo;

impl CompileTimeBuildInfo {
    /// @ai:intent Create the compile-time provider
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn simd_level() -> Option<&'static str> {
        if cfg!(target_feature = "avx") {
            Some("AVX")
        } else if cfg!(target_feature = "sse4.1") {
            Some("SSE4.1")
        } else if cfg!(target_feature = "sse3") {
            Some("SSE3")
        } else if cfg!(target_feature = "sse2") {
            Some("SSE2")
        } else if cfg!(target_feature = "sse") {
            Some("SSE1")
        } else if cfg!(target_feature = "neon") {
            Some("NEON")
        } else {
            None
        }
    }

    fn simd_dispatch() -> SimdDispatch {
        if cfg!(feature = "automatic-simd") {
            SimdDispatch::Automatic
        } else {
            SimdDispatch::Manual
        }
    }
}

impl BuildInfoProvider for CompileTimeBuildInfo {
    fn os(&self) -> String {
        let os = if cfg!(target_os = "android") {
            "Android"
        } else if cfg!(target_os = "linux") {
            "Linux"
        } else if cfg!(target_os = "ios") {
            "iOS"
        } else if cfg!(target_os = "macos") {
            "OSX"
        } else if cfg!(target_os = "emscripten") {
            "Emscripten"
        } else if cfg!(unix) {
            "Unix"
        } else if cfg!(windows) {
            "Windows"
        } else {
            "unknown OS"
        };
        os.to_string()
    }

    fn compiler(&self) -> String {
        let version = env!("TESTREPORT_RUSTC_VERSION");
        if version.is_empty() {
            "unknown compiler".to_string()
        } else {
            version.to_string()
        }
    }

    fn architecture(&self) -> String {
        let arch = if cfg!(target_arch = "arm") {
            "ARM"
        } else if cfg!(target_arch = "aarch64") {
            "ARM64"
        } else if cfg!(target_arch = "x86_64") {
            "x86-64bit"
        } else if cfg!(target_arch = "x86") {
            "x86-32bit"
        } else {
            "unknown arch"
        };
        arch.to_string()
    }

    fn simd(&self) -> String {
        simd_identifier(Self::simd_level(), Self::simd_dispatch())
    }

    fn configuration(&self) -> String {
        configuration_identifier(env!("TESTREPORT_PROFILE"), env!("TESTREPORT_DEBUG_INFO"))
            .to_string()
    }
}

/// @ai:intent Fixed identifiers, for embedding and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBuildInfo {
    pub os: String,
    pub compiler: String,
    pub architecture: String,
    pub simd: String,
    pub configuration: String,
}

impl BuildInfoProvider for StaticBuildInfo {
    fn os(&self) -> String {
        self.os.clone()
    }

    fn compiler(&self) -> String {
        self.compiler.clone()
    }

    fn architecture(&self) -> String {
        self.architecture.clone()
    }

    fn simd(&self) -> String {
        self.simd.clone()
    }

    fn configuration(&self) -> String {
        self.configuration.clone()
    }
}
