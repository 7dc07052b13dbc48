#![allow(dead_code)]

use macropadd::action::InputInjector;
use macropadd::config::schema::{Color, KeyAction, Layout, Macro, MacroConfig};
use macropadd::config::keycode::Keycode;
use macropadd::device::{Connector, MacroPad};
use macropadd::error::{MacroError, Result};
use macropadd::window::ForegroundWindow;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const REPORT_LEN: usize = 5;

/// What the fake pad does on one read.
#[derive(Debug, Clone)]
pub enum Step {
    Idle,
    Buttons(u32),
    Fail,
}

/// In-memory macro pad. Reads follow a script (then stay idle); written
/// frames are shared so tests can inspect them after the pad is moved.
pub struct FakePad {
    steps: VecDeque<Step>,
    pub frames: Arc<Mutex<Vec<Vec<u8>>>>,
    pub reads: Arc<Mutex<usize>>,
}

impl FakePad {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            frames: Arc::default(),
            reads: Arc::default(),
        }
    }

    pub fn frames(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        Arc::clone(&self.frames)
    }
}

impl MacroPad for FakePad {
    fn input_report_len(&self) -> usize {
        REPORT_LEN
    }

    fn read_report(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        *self.reads.lock().unwrap() += 1;
        match self.steps.pop_front().unwrap_or(Step::Idle) {
            Step::Idle => Ok(None),
            Step::Buttons(bits) => {
                let mut report = vec![0x05];
                report.extend_from_slice(&bits.to_le_bytes());
                let n = report.len().min(buf.len());
                buf[..n].copy_from_slice(&report[..n]);
                Ok(Some(n))
            }
            Step::Fail => Err(MacroError::DeviceIo("device unplugged".into())),
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.frames.lock().unwrap().push(frame.to_vec());
        Ok(())
    }
}

/// Hands out scripted pads; fails once the script runs out.
pub struct FakeConnector {
    pads: VecDeque<Option<FakePad>>,
    pub attempts: Arc<Mutex<Vec<Instant>>>,
    cancel_on_attempt: Option<CancellationToken>,
}

impl FakeConnector {
    /// `None` entries are failed connection attempts.
    pub fn new(pads: impl IntoIterator<Item = Option<FakePad>>) -> Self {
        Self {
            pads: pads.into_iter().collect(),
            attempts: Arc::default(),
            cancel_on_attempt: None,
        }
    }

    /// Cancel `token` from inside every connection attempt.
    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_attempt = Some(token);
        self
    }
}

impl Connector for FakeConnector {
    type Device = FakePad;

    fn connect(&mut self) -> Result<FakePad> {
        self.attempts.lock().unwrap().push(Instant::now());
        if let Some(token) = &self.cancel_on_attempt {
            token.cancel();
        }
        self.pads.pop_front().flatten().ok_or(MacroError::NoDevice)
    }
}

/// Focus that tests can move around.
#[derive(Clone, Default)]
pub struct ScriptedWindow {
    pub app: Arc<Mutex<Option<String>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl ScriptedWindow {
    pub fn focus(&self, app: Option<&str>) {
        *self.app.lock().unwrap() = app.map(str::to_string);
    }
}

impl ForegroundWindow for ScriptedWindow {
    fn current_application(&mut self) -> Result<Option<String>> {
        if *self.fail.lock().unwrap() {
            return Err(MacroError::Window("display gone".into()));
        }
        Ok(self.app.lock().unwrap().clone())
    }
}

/// Records every injected sequence.
#[derive(Clone, Default)]
pub struct RecordingInjector {
    pub sequences: Arc<Mutex<Vec<Vec<KeyAction>>>>,
    pub fail: bool,
}

impl InputInjector for RecordingInjector {
    fn inject(&mut self, actions: &[KeyAction]) -> Result<()> {
        self.sequences.lock().unwrap().push(actions.to_vec());
        if self.fail {
            return Err(MacroError::Inject("no X server".into()));
        }
        Ok(())
    }
}

pub fn tap(key: Keycode, color: Color) -> Macro {
    Macro {
        color,
        key_actions: vec![KeyAction::down(key), KeyAction::up(key)],
    }
}

/// Default layout from `MacroConfig::default()` (buttons 1-3), plus
/// `gimp` with a distinct layout on buttons 3 and 4 and `inkscape`
/// sharing gimp's layout.
pub fn test_config() -> MacroConfig {
    let mut config = MacroConfig::default();
    let gimp = Layout {
        macros: BTreeMap::from([
            (
                3,
                tap(
                    Keycode::KeyB,
                    Color {
                        red: 0xFF,
                        green: 0,
                        blue: 0,
                    },
                ),
            ),
            (
                4,
                tap(
                    Keycode::KeyE,
                    Color {
                        red: 0,
                        green: 0xFF,
                        blue: 0,
                    },
                ),
            ),
        ]),
    };
    config
        .application_layouts
        .insert("gimp".to_string(), gimp.clone());
    config
        .application_layouts
        .insert("inkscape".to_string(), gimp);
    config
}

pub fn gimp_sync_frames() -> Vec<Vec<u8>> {
    vec![
        vec![0xFF],
        vec![0x83, 0xFF, 0x00, 0x00, 0x84, 0x00, 0xFF, 0x00],
    ]
}
