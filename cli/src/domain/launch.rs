//! Launch request and the phases a launch moves through.

use std::fmt;

use crate::domain::error::LaunchError;
use crate::domain::profile::ProfileSelection;
use crate::domain::remote::{RemoteRef, parse_remote_and_container};

/// One launch invocation, built once from the positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub image: RemoteRef,
    /// Empty `identifier` means the server picks the name.
    pub destination: RemoteRef,
    pub profiles: ProfileSelection,
}

impl LaunchRequest {
    /// Build a request from `<image> [<name>]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgumentCount` unless one or two arguments are given,
    /// and `MissingImage` when the image token has no identifier.
    pub fn from_args(args: &[String], profiles: ProfileSelection) -> Result<Self, LaunchError> {
        let (image, destination) = match args {
            [image] => (parse_remote_and_container(image), RemoteRef::default()),
            [image, name] => (
                parse_remote_and_container(image),
                parse_remote_and_container(name),
            ),
            _ => return Err(LaunchError::InvalidArgumentCount(args.len())),
        };
        if image.identifier.is_empty() {
            return Err(LaunchError::MissingImage);
        }
        Ok(Self {
            image,
            destination,
            profiles,
        })
    }

    /// Name given by the caller, if any.
    #[must_use]
    pub fn requested_name(&self) -> Option<&str> {
        Some(self.destination.identifier.as_str()).filter(|n| !n.is_empty())
    }
}

/// Everything the launch workflow needs, passed in by value.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub request: LaunchRequest,
    pub ephemeral: bool,
}

/// Phases of a launch. `Done` is terminal; a failure carries the phase it
/// happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    Init,
    Resolving,
    Creating,
    AwaitingCreate,
    ExtractingName,
    Starting,
    AwaitingStart,
    Done,
}

impl fmt::Display for LaunchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "preparing launch",
            Self::Resolving => "resolving remotes",
            Self::Creating => "creating container",
            Self::AwaitingCreate => "waiting for container creation",
            Self::ExtractingName => "reading container name",
            Self::Starting => "starting container",
            Self::AwaitingStart => "waiting for container start",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}
