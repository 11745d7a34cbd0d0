//! Node.js version manager command lines
//!
//! nvm is a shell function, so every nvm command sources `nvm.sh` first.
//! Each command runs in a fresh shell and a switch does not carry over to
//! the next one; dependency and script commands go through the manager's
//! exec wrapper.

use crate::cli::VersionManagerKind;
use semver::Version;
use std::fmt;

/// Shell snippet that loads nvm into the current shell
const NVM_PRELUDE: &str = r#". "${NVM_DIR:-$HOME/.nvm}/nvm.sh""#;

/// Shell snippet that loads fnm's environment into the current shell
const FNM_PRELUDE: &str = r#"eval "$(fnm env)""#;

impl VersionManagerKind {
    /// Command that downloads and installs a version
    pub fn install_command(&self, version: &Version) -> String {
        match self {
            VersionManagerKind::Nvm => format!("{} && nvm install {}", NVM_PRELUDE, version),
            VersionManagerKind::Fnm => format!("fnm install {}", version),
        }
    }

    /// Command that activates an installed version
    pub fn use_command(&self, version: &Version) -> String {
        match self {
            VersionManagerKind::Nvm => format!("{} && nvm use {}", NVM_PRELUDE, version),
            VersionManagerKind::Fnm => format!("{} && fnm use {}", FNM_PRELUDE, version),
        }
    }

    /// Wrap a command so it runs under the given version
    pub fn exec_command(&self, version: &Version, command: &str) -> String {
        match self {
            VersionManagerKind::Nvm => {
                format!("{} && nvm exec {} {}", NVM_PRELUDE, version, command)
            }
            VersionManagerKind::Fnm => format!("fnm exec --using={} {}", version, command),
        }
    }
}

impl fmt::Display for VersionManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionManagerKind::Nvm => write!(f, "nvm"),
            VersionManagerKind::Fnm => write!(f, "fnm"),
        }
    }
}
