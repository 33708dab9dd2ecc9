//! Guest programs
//!
//! A [`Program`] is a Windows executable (or a built-in runtime command) with
//! its arguments. Rendering it against a [`Context`] yields the final command
//! line and a ready [`std::process::Command`]; spawning is left to the caller.
//!
//! ## Module Structure
//! - `types.rs`: Arg
//! - `pure/`: Shell quoting

mod pure;
mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::context::{Context, LaunchOptions};
use crate::dist::{Distribution, Executable};
use crate::error::{Error, Result};
use crate::winpath::is_windows_path;

pub use pure::{shell_join, shell_quote};
pub use types::Arg;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    exe: Executable,
    args: Vec<Arg>,
    launch: LaunchOptions,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
    isolated: bool,
}

impl Program {
    /// Program for `exe`: a built-in command name or a Windows executable.
    pub fn new(exe: impl AsRef<Path>) -> Result<Self> {
        let exe = exe.as_ref();
        let exe = Distribution::check_executable(exe)?
            .ok_or_else(|| Error::NotExecutable(exe.to_path_buf()))?;
        Ok(Self {
            exe,
            args: Vec::new(),
            launch: LaunchOptions::default(),
            env: BTreeMap::new(),
            cwd: None,
            isolated: false,
        })
    }

    pub fn executable(&self) -> &Executable {
        &self.exe
    }

    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(mut self, path: impl Into<PathBuf>) -> Self {
        self.args.push(Arg::Path(path.into()));
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_launch(mut self, launch: LaunchOptions) -> Self {
        self.launch = launch;
        self
    }

    pub fn launch(&self) -> &LaunchOptions {
        &self.launch
    }

    /// Extra variable applied after the context's environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Don't inherit the caller's environment.
    pub fn isolated(mut self, isolated: bool) -> Self {
        self.isolated = isolated;
        self
    }

    fn guest_arg(ctx: &Context, path: &Path) -> Result<String> {
        let raw = path.to_string_lossy();
        if is_windows_path(&raw) {
            return Ok(raw.into_owned());
        }
        Ok(ctx.to_windows_path(path)?.to_string())
    }

    /// Full argv: command prefix, executable, arguments.
    pub fn command_line(&self, ctx: &Context) -> Result<Vec<String>> {
        let mut argv = ctx.command_prefix(&self.launch);
        match &self.exe {
            Executable::Builtin(name) => argv.push(name.clone()),
            Executable::File(path) => argv.push(Self::guest_arg(ctx, path)?),
        }
        for arg in &self.args {
            match arg {
                Arg::Text(text) => argv.push(text.clone()),
                Arg::Path(path) => argv.push(Self::guest_arg(ctx, path)?),
            }
        }
        Ok(argv)
    }

    /// Command line as one shell-quoted string.
    pub fn shell_line(&self, ctx: &Context) -> Result<String> {
        Ok(shell_join(&self.command_line(ctx)?))
    }

    /// Environment the process will see on top of (or instead of) the caller's.
    pub fn environment(&self, ctx: &Context) -> BTreeMap<String, String> {
        let mut env = ctx.launch_env(&self.launch);
        env.extend(self.env.clone());
        env
    }

    /// Unspawned process for this program.
    pub fn command(&self, ctx: &Context) -> Result<Command> {
        let argv = self.command_line(ctx)?;
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| Error::NotExecutable(PathBuf::new()))?;

        let mut cmd = Command::new(program);
        cmd.args(rest);
        if self.isolated {
            cmd.env_clear();
        }
        cmd.envs(self.environment(ctx));
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        debug!("program command: {}", shell_join(&argv));
        Ok(cmd)
    }
}
