use crate::action::{self, InputInjector};
use crate::config::schema::MacroConfig;
use crate::device::input::ButtonEdgeDetector;
use crate::device::MacroPad;
use crate::error::Result;
use crate::layout::LayoutResolver;
use crate::led;
use crate::window::ForegroundWindow;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Period of the dispatch loop.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// The per-connection dispatch loop: follow focus, keep LEDs in sync with
/// the active layout, and fire macros on button presses.
pub struct Engine<'a, D, W, I>
where
    D: MacroPad + ?Sized,
    W: ForegroundWindow + ?Sized,
    I: InputInjector + ?Sized,
{
    device: &'a mut D,
    window: &'a mut W,
    injector: &'a mut I,
    resolver: LayoutResolver<'a>,
    detector: ButtonEdgeDetector,
    report: Vec<u8>,
}

impl<'a, D, W, I> Engine<'a, D, W, I>
where
    D: MacroPad + ?Sized,
    W: ForegroundWindow + ?Sized,
    I: InputInjector + ?Sized,
{
    /// Fresh engine state: no application seen, default layout active,
    /// every button released.
    pub fn new(
        config: &'a MacroConfig,
        device: &'a mut D,
        window: &'a mut W,
        injector: &'a mut I,
    ) -> Self {
        let report_len = device.input_report_len();
        Self {
            device,
            window,
            injector,
            resolver: LayoutResolver::new(config),
            detector: ButtonEdgeDetector::new(report_len),
            report: vec![0; report_len],
        }
    }

    pub fn resolver(&self) -> &LayoutResolver<'a> {
        &self.resolver
    }

    /// Tick until cancelled.
    ///
    /// # Errors
    /// Returns the first device error; the connection is considered lost.
    /// Cancellation returns `Ok(())`.
    pub async fn run(&mut self, cancel: &CancellationToken) -> Result<()> {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(()),
                _ = interval.tick() => {}
            }
            self.tick()?;
        }
    }

    /// One pass: resolve layout, sync LEDs on change, fire pressed macros.
    ///
    /// # Errors
    /// Returns device read/write errors.
    pub fn tick(&mut self) -> Result<()> {
        match self.window.current_application() {
            Ok(app) => {
                if self.resolver.resolve(app.as_deref()) {
                    for frame in led::encode_sync(self.resolver.current_layout()) {
                        self.device.write_frame(&frame)?;
                    }
                }
            }
            Err(e) => warn!("foreground window lookup failed: {e}"),
        }

        let read = self.device.read_report(&mut self.report)?;
        let pressed = self.detector.poll(read.map(|n| &self.report[..n]));

        let layout = self.resolver.current_layout();
        for button in pressed {
            let Some(m) = layout.macro_for(button) else {
                debug!("button {button} not mapped");
                continue;
            };
            if let Err(e) = action::execute(button, m, &mut *self.injector) {
                error!("macro error (button {button}): {e}");
            }
        }

        Ok(())
    }
}
