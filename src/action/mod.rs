#[cfg(target_os = "linux")]
pub mod xtest;

use crate::config::schema::{ButtonId, KeyAction, Macro};
use crate::error::Result;
use tracing::info;

/// Replays key actions on the host, in order.
pub trait InputInjector {
    /// # Errors
    /// Returns `MacroError::Inject` if the host rejects the sequence.
    fn inject(&mut self, actions: &[KeyAction]) -> Result<()>;
}

/// Run the macro bound to a pressed button. Returns once every key action
/// has been handed to the injector.
///
/// # Errors
/// Propagates injector failures.
pub fn execute<I: InputInjector + ?Sized>(
    button: ButtonId,
    m: &Macro,
    injector: &mut I,
) -> Result<()> {
    if m.key_actions.is_empty() {
        return Ok(());
    }
    info!("button {button}: running {} key actions", m.key_actions.len());
    injector.inject(&m.key_actions)
}
