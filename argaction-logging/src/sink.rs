//! Log line destinations

use crate::args::Facility;
use crate::error::{LoggingError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::Level;

/// Receives rendered log lines
pub trait LogSink: Send {
    fn emit(&mut self, level: &Level, line: &str) -> std::io::Result<()>;
}

/// Writes each line followed by a newline and flushes immediately
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl WriterSink<File> {
    /// Append to `path`, creating it if missing
    pub fn append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::File {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&mut self, _level: &Level, line: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Socket paths tried in order when connecting to the local syslog daemon
pub const SYSLOG_SOCKETS: &[&str] = &["/dev/log", "/var/run/syslog", "/var/run/log"];

/// RFC 3164 severity for a tracing level
pub fn syslog_severity(level: &Level) -> u8 {
    match *level {
        Level::ERROR => 3,
        Level::WARN => 4,
        Level::INFO => 6,
        _ => 7,
    }
}

/// `<PRI>tag[pid]: line` as sent to the syslog socket
pub fn syslog_datagram(facility: Facility, level: &Level, tag: &str, pid: u32, line: &str) -> String {
    let priority = u16::from(facility.code()) * 8 + u16::from(syslog_severity(level));
    format!("<{priority}>{tag}[{pid}]: {line}")
}

/// Sends one datagram per line to the local syslog daemon
#[cfg(unix)]
pub struct SyslogSink {
    socket: std::os::unix::net::UnixDatagram,
    facility: Facility,
    tag: String,
    pid: u32,
}

#[cfg(unix)]
impl SyslogSink {
    /// Connect to the first reachable socket in [`SYSLOG_SOCKETS`]
    pub fn connect(facility: Facility) -> Result<Self> {
        let socket = std::os::unix::net::UnixDatagram::unbound()
            .map_err(|e| LoggingError::SyslogUnavailable(e.to_string()))?;

        let connected = SYSLOG_SOCKETS.iter().any(|path| socket.connect(path).is_ok());
        if !connected {
            return Err(LoggingError::SyslogUnavailable(format!(
                "none of {} accepts connections",
                SYSLOG_SOCKETS.join(", ")
            )));
        }

        Ok(Self {
            socket,
            facility,
            tag: process_name(),
            pid: std::process::id(),
        })
    }
}

#[cfg(unix)]
impl LogSink for SyslogSink {
    fn emit(&mut self, level: &Level, line: &str) -> std::io::Result<()> {
        let datagram = syslog_datagram(self.facility, level, &self.tag, self.pid, line);
        self.socket.send(datagram.as_bytes()).map(|_| ())
    }
}

/// Stand-in on platforms without unix sockets; connecting always fails
#[cfg(not(unix))]
pub struct SyslogSink;

#[cfg(not(unix))]
impl SyslogSink {
    pub fn connect(_facility: Facility) -> Result<Self> {
        Err(LoggingError::SyslogUnavailable(
            "syslog sockets require a unix platform".to_string(),
        ))
    }
}

#[cfg(not(unix))]
impl LogSink for SyslogSink {
    fn emit(&mut self, _level: &Level, _line: &str) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg_attr(not(unix), allow(dead_code))]
fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "argaction".to_string())
}
