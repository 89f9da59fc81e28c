//! Logging - tracing output routed to the browser console
//!
//! A `fmt` layer formats events as usual; the writer collects one event per
//! writer instance and hands the finished lines to `console.*` at the level the
//! event was emitted with.

use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::*,
    reload, EnvFilter, Registry,
};
use wasm_bindgen::JsValue;

/// Filter used until the page sets its own
pub const DEFAULT_FILTER: &str = "info";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Install the console subscriber. Later calls are no-ops.
pub fn init(filter: &str) {
    if FILTER_HANDLE.get().is_some() {
        return;
    }

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    let console = fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(MakeConsoleWriter);

    if tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .try_init()
        .is_ok()
    {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Swap the active filter directives, e.g. `"fleur_core=debug"`
pub fn set_filter(directives: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directives)?;
    let handle = FILTER_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("logging is not initialized"))?;
    handle.reload(filter)?;
    Ok(())
}

/// Hands out a [`ConsoleWriter`] per event
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers formatted output and flushes complete lines to the console
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn emit(&self, line: &str) {
        let line = JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for line in drain_lines(&mut self.buffer, false) {
            self.emit(&line);
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        for line in drain_lines(&mut self.buffer, true) {
            self.emit(&line);
        }
    }
}

/// Split complete lines off the front of `buffer`. With `all`, a trailing
/// partial line is returned too.
fn drain_lines(buffer: &mut Vec<u8>, all: bool) -> Vec<String> {
    let cut = if all {
        buffer.len()
    } else {
        match buffer.iter().rposition(|&b| b == b'\n') {
            Some(i) => i + 1,
            None => return Vec::new(),
        }
    };

    let rest = buffer.split_off(cut);
    let text = String::from_utf8_lossy(buffer).into_owned();
    *buffer = rest;

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
