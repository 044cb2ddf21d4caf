//! Application service: container launch use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! A launch is a small state machine:
//!
//! ```text
//! Init → Resolving → Creating → AwaitingCreate → [ExtractingName] → Starting → AwaitingStart → Done
//! ```
//!
//! Any phase may fail; the failure records the phase and whether the
//! container had already been created. Nothing is retried or rolled back;
//! a container left behind is reported as a warning.

use std::collections::HashMap;

use crate::application::ports::{ClientConnector, ClientError, ProgressReporter, RemoteClient};
use crate::domain::{
    ClientConfig, CreateResponse, ImageSource, LaunchError, LaunchFailure, LaunchOptions,
    LaunchPhase, LaunchRequest, OperationHandle, ProfileSelection, resource,
};

/// Outcome of a successful launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Container name, as given or as assigned by the server.
    pub name: String,
    /// Remote the container was created on.
    pub remote: String,
}

/// Launch state, carrying what the next phase needs.
enum State<C> {
    Init,
    Resolving,
    Creating {
        client: C,
        source: ImageSource,
    },
    AwaitingCreate {
        client: C,
        response: CreateResponse,
    },
    ExtractingName {
        client: C,
        resources: Option<HashMap<String, Vec<String>>>,
    },
    Starting {
        client: C,
        name: String,
    },
    AwaitingStart {
        client: C,
        name: String,
        operation: OperationHandle,
    },
    Done {
        name: String,
    },
}

impl<C> State<C> {
    fn phase(&self) -> LaunchPhase {
        match self {
            Self::Init => LaunchPhase::Init,
            Self::Resolving => LaunchPhase::Resolving,
            Self::Creating { .. } => LaunchPhase::Creating,
            Self::AwaitingCreate { .. } => LaunchPhase::AwaitingCreate,
            Self::ExtractingName { .. } => LaunchPhase::ExtractingName,
            Self::Starting { .. } => LaunchPhase::Starting,
            Self::AwaitingStart { .. } => LaunchPhase::AwaitingStart,
            Self::Done { .. } => LaunchPhase::Done,
        }
    }
}

/// Drives one launch from `Init` to `Done`.
struct Launch<'a, K: ClientConnector, R: ProgressReporter> {
    connector: &'a K,
    config: &'a ClientConfig,
    reporter: &'a R,
    request: LaunchRequest,
    ephemeral: bool,
    target: String,
}

/// Create a container from an image and start it.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches any presentation type.
///
/// # Errors
///
/// Returns a [`LaunchFailure`] naming the phase that failed. If the
/// failure came after creation, the container is left on the remote.
pub async fn launch(
    connector: &impl ClientConnector,
    config: &ClientConfig,
    reporter: &impl ProgressReporter,
    opts: LaunchOptions,
) -> Result<LaunchOutcome, LaunchFailure> {
    let LaunchOptions { request, ephemeral } = opts;
    let mut launch = Launch {
        connector,
        config,
        reporter,
        request,
        ephemeral,
        target: String::new(),
    };

    let mut state = State::Init;
    loop {
        let phase = state.phase();
        tracing::debug!(%phase, "launch phase");
        state = match launch.step(state).await {
            Ok(State::Done { name }) => {
                return Ok(LaunchOutcome {
                    name,
                    remote: launch.target,
                });
            }
            Ok(next) => next,
            Err(failure) => {
                tracing::debug!(phase = %failure.phase, error = %failure.error, "launch failed");
                if failure.created {
                    reporter.warn(&left_behind_message(&failure));
                }
                return Err(failure);
            }
        };
    }
}

impl<K: ClientConnector, R: ProgressReporter> Launch<'_, K, R> {
    async fn step(&mut self, state: State<K::Client>) -> Result<State<K::Client>, LaunchFailure> {
        match state {
            State::Init => {
                if self.ephemeral {
                    return Err(LaunchFailure::new(
                        LaunchPhase::Init,
                        LaunchError::EphemeralUnsupported,
                    ));
                }
                Ok(State::Resolving)
            }
            State::Resolving => self
                .resolve()
                .map_err(|e| LaunchFailure::new(LaunchPhase::Resolving, e)),
            State::Creating { client, source } => {
                self.reporter.step("Creating container...");
                let response = dispatch_create(
                    &client,
                    self.request.requested_name(),
                    &source,
                    &self.request.profiles,
                )
                .await
                .map_err(|e| LaunchFailure::new(LaunchPhase::Creating, e))?;
                Ok(State::AwaitingCreate { client, response })
            }
            State::AwaitingCreate { client, response } => {
                wait_for_operation(&client, &response.operation)
                    .await
                    .map_err(|e| LaunchFailure::new(LaunchPhase::AwaitingCreate, e))?;
                self.reporter.success("done");
                match self.request.requested_name() {
                    Some(name) => Ok(State::Starting {
                        client,
                        name: name.to_string(),
                    }),
                    None => Ok(State::ExtractingName {
                        client,
                        resources: response.resources,
                    }),
                }
            }
            State::ExtractingName { client, resources } => {
                let name = resource::container_name(resources.as_ref(), lxd_api::API_VERSION)
                    .map_err(|e| {
                        LaunchFailure::new(LaunchPhase::ExtractingName, e).after_create(None)
                    })?;
                tracing::debug!(%name, "server assigned container name");
                Ok(State::Starting { client, name })
            }
            State::Starting { client, name } => {
                self.reporter.step("Starting container...");
                let operation = dispatch_start(&client, &name).await.map_err(|e| {
                    LaunchFailure::new(LaunchPhase::Starting, e).after_create(Some(&name))
                })?;
                Ok(State::AwaitingStart {
                    client,
                    name,
                    operation,
                })
            }
            State::AwaitingStart {
                client,
                name,
                operation,
            } => {
                wait_for_operation(&client, &operation).await.map_err(|e| {
                    LaunchFailure::new(LaunchPhase::AwaitingStart, e).after_create(Some(&name))
                })?;
                self.reporter.success("done");
                Ok(State::Done { name })
            }
            State::Done { name } => Ok(State::Done { name }),
        }
    }

    /// Resolve both remotes and connect to the destination.
    fn resolve(&mut self) -> Result<State<K::Client>, LaunchError> {
        let target = self.config.resolve(&self.request.destination.remote)?;
        let image_remote = self.config.resolve(&self.request.image.remote)?;

        let server = (image_remote.name != target.name).then(|| image_remote.endpoint.addr.clone());
        let source = ImageSource {
            alias: self.request.image.identifier.clone(),
            server,
        };

        let client = self
            .connector
            .connect(&target)
            .map_err(|e| LaunchError::RemoteError(e.to_string()))?;
        tracing::debug!(remote = %target.name, addr = %target.endpoint.addr, "connected");
        self.target = target.name;
        Ok(State::Creating { client, source })
    }
}

/// Warning for a container that exists on the remote but was never started.
fn left_behind_message(failure: &LaunchFailure) -> String {
    match failure.instance.as_deref() {
        Some(name) => format!(
            "container '{name}' was created but not started; remove it manually if it is not wanted"
        ),
        None => {
            "a container was created but its name could not be determined; remove it manually"
                .to_string()
        }
    }
}

/// Issue the create request, classifying a 404 as a missing image.
async fn dispatch_create(
    client: &impl RemoteClient,
    name: Option<&str>,
    source: &ImageSource,
    profiles: &ProfileSelection,
) -> Result<CreateResponse, LaunchError> {
    client
        .create(name, source, profiles.as_request())
        .await
        .map_err(|e| {
            if e.is_not_found() {
                LaunchError::ImageNotFound
            } else {
                LaunchError::RemoteError(e.to_string())
            }
        })
}

/// Issue the start action for `name`.
async fn dispatch_start(
    client: &impl RemoteClient,
    name: &str,
) -> Result<OperationHandle, LaunchError> {
    client
        .start(name)
        .await
        .map_err(|e| LaunchError::RemoteError(e.to_string()))
}

/// Wait for an operation; shared by the create and start phases.
async fn wait_for_operation(
    client: &impl RemoteClient,
    operation: &OperationHandle,
) -> Result<(), LaunchError> {
    tracing::debug!(%operation, "waiting for operation");
    client
        .wait_for_success(operation)
        .await
        .map_err(|e| match e {
            ClientError::OperationFailed(msg) => LaunchError::OperationFailed(msg),
            other => LaunchError::RemoteError(other.to_string()),
        })
}
