//! @ai:module:intent Report which build-time flags were active
//! @ai:module:layer infrastructure
//! @ai:module:public_api DefinesProvider, CompileTimeDefines, StaticDefines
//! @ai:module:stateless true

/// @ai:intent Source of the active build-flag names, in a stable order
pub trait DefinesProvider {
    fn active_defines(&self) -> Vec<String>;
}

/// Checked flags in declaration order. Adding a flag here is a policy
/// decision of whoever consumes the reports.
const CHECKED_FLAGS: &[(&str, bool)] = &[
    ("debug_assertions", cfg!(debug_assertions)),
    ("windows", cfg!(windows)),
    ("unix", cfg!(unix)),
    ("target_os=android", cfg!(target_os = "android")),
    ("target_arch=arm", cfg!(target_arch = "arm")),
    ("target_arch=aarch64", cfg!(target_arch = "aarch64")),
    ("target_feature=avx", cfg!(target_feature = "avx")),
    ("target_feature=sse4.1", cfg!(target_feature = "sse4.1")),
    ("target_feature=sse3", cfg!(target_feature = "sse3")),
    ("target_feature=sse2", cfg!(target_feature = "sse2")),
    ("target_feature=sse", cfg!(target_feature = "sse")),
    ("target_feature=neon", cfg!(target_feature = "neon")),
    ("panic=abort", cfg!(panic = "abort")),
    ("feature=automatic-simd", cfg!(feature = "automatic-simd")),
];

/// @ai:intent Flags evaluated for the target this crate was compiled for
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileTimeDefines;

impl CompileTimeDefines {
    /// @ai:intent Create the compile-time provider
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl DefinesProvider for CompileTimeDefines {
    fn active_defines(&self) -> Vec<String> {
        CHECKED_FLAGS
            .iter()
            .filter(|(_, active)| *active)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// @ai:intent Explicit list of active flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDefines(pub Vec<String>);

impl StaticDefines {
    /// @ai:intent Build from flag names, keeping their order
    /// @ai:effects pure
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl DefinesProvider for StaticDefines {
    fn active_defines(&self) -> Vec<String> {
        self.0.clone()
    }
}
