use serde::{Deserialize, Serialize};

/// How the guest executable is started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    /// `wine64 program.exe`
    #[default]
    Loader,
    /// `proton <run mode> program.exe`, bundle-style distributions only
    Proton,
}

/// Verb handed to the `proton` shim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtonRunMode {
    #[default]
    RunInPrefix,
    Run,
    WaitForExitAndRun,
}

impl ProtonRunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunInPrefix => "runinprefix",
            Self::Run => "run",
            Self::WaitForExitAndRun => "waitforexitandrun",
        }
    }
}

/// Launch settings that shape the command prefix and the exported
/// environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchOptions {
    pub mode: LaunchMode,
    pub run_mode: ProtonRunMode,
    /// Start through the guest's `steam.exe` (loader mode only)
    pub use_steam: bool,
    /// Host command placed in front of everything (`gamemoderun`, ...)
    pub wrapper: Vec<String>,
}

impl LaunchOptions {
    pub fn proton(run_mode: ProtonRunMode) -> Self {
        Self {
            mode: LaunchMode::Proton,
            run_mode,
            ..Self::default()
        }
    }
}
