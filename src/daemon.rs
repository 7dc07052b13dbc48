use crate::action::InputInjector;
use crate::config::schema::MacroConfig;
use crate::device::Connector;
use crate::engine::Engine;
use crate::error::Result;
use crate::window::ForegroundWindow;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Fixed delays between connection attempts. No growth, no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait after a failed open.
    pub connect_delay: Duration,
    /// Wait after a running connection fails.
    pub restart_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_secs(1),
            restart_delay: Duration::from_secs(5),
        }
    }
}

enum SupervisorState<D> {
    Connecting,
    Running(D),
    Backoff(Duration),
    Terminated,
}

/// Owns the device across connection epochs: connect with retry, run the
/// dispatch engine, and start over when it fails.
pub struct Supervisor<C, W, I> {
    config: Arc<MacroConfig>,
    connector: C,
    window: W,
    injector: I,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl<C, W, I> Supervisor<C, W, I>
where
    C: Connector,
    W: ForegroundWindow,
    I: InputInjector,
{
    pub fn new(
        config: Arc<MacroConfig>,
        connector: C,
        window: W,
        injector: I,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            connector,
            window,
            injector,
            policy: RetryPolicy::default(),
            cancel,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run until the cancellation token fires.
    ///
    /// # Errors
    /// Never fails today; every connection error is logged and retried.
    pub async fn run(mut self) -> Result<()> {
        let mut state = SupervisorState::Connecting;

        loop {
            state = match state {
                SupervisorState::Connecting => self.connect(),
                SupervisorState::Running(device) => self.run_epoch(device).await,
                SupervisorState::Backoff(delay) => {
                    tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => SupervisorState::Terminated,
                        () = tokio::time::sleep(delay) => SupervisorState::Connecting,
                    }
                }
                SupervisorState::Terminated => {
                    info!("supervisor stopped");
                    return Ok(());
                }
            };
        }
    }

    fn connect(&mut self) -> SupervisorState<C::Device> {
        if self.cancel.is_cancelled() {
            return SupervisorState::Terminated;
        }
        match self.connector.connect() {
            Ok(device) => SupervisorState::Running(device),
            Err(e) => {
                if e.is_discovery_failure() {
                    warn!("unable to connect to device: {e}");
                } else {
                    error!("unable to connect to device: {e}");
                }
                SupervisorState::Backoff(self.policy.connect_delay)
            }
        }
    }

    async fn run_epoch(&mut self, mut device: C::Device) -> SupervisorState<C::Device> {
        info!("dispatch engine starting");
        let mut engine = Engine::new(
            &self.config,
            &mut device,
            &mut self.window,
            &mut self.injector,
        );

        match engine.run(&self.cancel).await {
            Ok(()) => {
                debug!("dispatch engine cancelled");
                SupervisorState::Terminated
            }
            Err(e) => {
                error!(
                    "dispatch engine stopped: {e}; restarting in {:?}",
                    self.policy.restart_delay
                );
                SupervisorState::Backoff(self.policy.restart_delay)
            }
        }
    }
}
