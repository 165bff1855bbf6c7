//! Tests for Tv
//!
//! These tests verify:
//! - End-to-end send for actions and status queries
//! - Toggle and level commands driven by device state
//! - Port lifecycle per send
//! - Debounced sends and their lock discipline
//! - Command listing

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tempfile::TempDir;
use tvctl::codes::CodeTable;
use tvctl::config::Config;
use tvctl::debounce::CommandLock;
use tvctl::transport::{Connector, Link, MockConnector};
use tvctl::{Reply, Tv, TvError};

// =============================================================================
// Helper Functions
// =============================================================================

fn test_config(temp_dir: &TempDir) -> Config {
    Config::builder()
        .model("42LW650S")
        .port("mock")
        .lock_dir(temp_dir.path())
        .open_retry_interval_ms(1)
        .default_settle_ms(50)
        .build()
}

fn setup_tv() -> (TempDir, MockConnector, Tv<MockConnector>) {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();
    let tv = Tv::with_connector(test_config(&temp_dir), mock.clone()).unwrap();
    (temp_dir, mock, tv)
}

/// Block until the mock has seen `count` connects
fn wait_for_connects(mock: &MockConnector, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while mock.connects() < count {
        assert!(Instant::now() < deadline, "timed out waiting for connect");
        thread::sleep(Duration::from_millis(5));
    }
}

/// Wraps the mock and records, whenever a link is dropped, whether the
/// debounce lock for `command` was still held at that moment
struct LockWatchConnector {
    inner: MockConnector,
    lock_dir: PathBuf,
    command: String,
    held_at_close: Arc<Mutex<Vec<bool>>>,
}

struct LockWatchLink {
    inner: Box<dyn Link>,
    lock_dir: PathBuf,
    command: String,
    held_at_close: Arc<Mutex<Vec<bool>>>,
}

impl Connector for LockWatchConnector {
    fn connect(&self) -> tvctl::Result<Box<dyn Link>> {
        Ok(Box::new(LockWatchLink {
            inner: self.inner.connect()?,
            lock_dir: self.lock_dir.clone(),
            command: self.command.clone(),
            held_at_close: Arc::clone(&self.held_at_close),
        }))
    }

    fn endpoint(&self) -> String {
        self.inner.endpoint()
    }
}

impl Read for LockWatchLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for LockWatchLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Drop for LockWatchLink {
    fn drop(&mut self) {
        let held = matches!(
            CommandLock::try_acquire(&self.lock_dir, &self.command),
            Err(TvError::Debounced(_))
        );
        self.held_at_close.lock().push(held);
    }
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_send_action_writes_code_and_returns_done() {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();
    let table = CodeTable::from_entries("custom", [("poweroff", "xb 0 00")]);
    let mut tv = Tv::with_table(test_config(&temp_dir), table, mock.clone());

    mock.respond("xb 0 00", b"b 00 OK00x");
    assert_eq!(tv.send("poweroff").unwrap(), Reply::Done);
    assert_eq!(mock.written(), vec!["xb 0 00".to_string()]);
}

#[test]
fn test_send_action_fails_without_ok_marker() {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();
    let table = CodeTable::from_entries("custom", [("poweroff", "xb 0 00")]);
    let mut tv = Tv::with_table(test_config(&temp_dir), table, mock.clone());

    mock.respond("xb 0 00", b"b 00 NG00x");
    let err = tv.send("poweroff").unwrap_err();
    assert!(matches!(err, TvError::ProtocolFailure(_)));
}

#[test]
fn test_send_unknown_command_does_no_io() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    let err = tv.send("frobnicate").unwrap_err();
    assert!(matches!(err, TvError::UnknownCommand(_)));
    assert_eq!(mock.connects(), 0);
    assert!(mock.written().is_empty());
}

#[test]
fn test_send_status_returns_payload() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    mock.set_state("kf 00 ff", "1e");
    assert_eq!(tv.send("volumelevel").unwrap(), Reply::Status("1e".to_string()));
}

#[test]
fn test_send_status_without_state_fails() {
    let (_temp_dir, _mock, mut tv) = setup_tv();
    assert!(tv.send("powerstatus").is_err());
}

// =============================================================================
// Stateful Command Tests
// =============================================================================

#[test]
fn test_volume_up_and_down() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    mock.set_state("kf 00 ff", "0a");

    assert_eq!(tv.send("volumeup").unwrap(), Reply::Done);
    assert_eq!(mock.state("kf 00 ff").as_deref(), Some("0b"));

    assert_eq!(tv.send("volumedown").unwrap(), Reply::Done);
    assert_eq!(mock.state("kf 00 ff").as_deref(), Some("0a"));

    assert_eq!(
        mock.written(),
        vec!["kf 00 ff", "kf 00 0b", "kf 00 ff", "kf 00 0a"]
    );
}

#[test]
fn test_volume_down_clamps_at_zero() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    mock.set_state("kf 00 ff", "00");
    tv.send("volumedown").unwrap();
    assert_eq!(mock.state("kf 00 ff").as_deref(), Some("00"));
}

#[test]
fn test_toggle_power_alternates_with_device_state() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    mock.set_state("ka 00 ff", "01");

    tv.send("togglepower").unwrap();
    assert_eq!(mock.state("ka 00 ff").as_deref(), Some("00"));

    tv.send("togglepower").unwrap();
    assert_eq!(mock.state("ka 00 ff").as_deref(), Some("01"));
}

#[test]
fn test_toggle_with_unknown_state_selects_first() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    tv.send("togglemute").unwrap();
    assert_eq!(mock.state("ke 00 ff").as_deref(), Some("00"));
}

#[test]
fn test_custom_toggle() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    tv.add_toggle("input", "inputrgbpc", "inputhdmi1").unwrap();
    mock.set_state("xb 00 ff", "60");

    tv.send("toggleinput").unwrap();
    assert_eq!(mock.state("xb 00 ff").as_deref(), Some("70"));
}

#[test]
fn test_add_toggle_rejects_mixed_families() {
    let (_temp_dir, _mock, mut tv) = setup_tv();
    let err = tv.add_toggle("odd", "inputhdmi1", "poweroff").unwrap_err();
    assert!(matches!(err, TvError::InvalidToggle(_)));
    assert!(!tv.toggles().contains_key("odd"));
}

#[test]
fn test_unknown_toggle_and_level() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    assert!(matches!(tv.send("togglefrob").unwrap_err(), TvError::UnknownToggle(_)));
    assert!(matches!(tv.send("frobup").unwrap_err(), TvError::UnknownLevel(_)));
    assert_eq!(mock.connects(), 0);
}

// =============================================================================
// Port Lifecycle Tests
// =============================================================================

#[test]
fn test_port_reopened_for_every_send() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    tv.send("poweron").unwrap();
    tv.send("poweroff").unwrap();
    assert_eq!(mock.connects(), 2);
}

#[test]
fn test_plain_send_waits_for_port() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    mock.refuse_connects(3);
    assert_eq!(tv.send("inputhdmi2").unwrap(), Reply::Done);
    assert_eq!(mock.written(), vec!["xb 00 71"]);
    assert_eq!(mock.connects(), 1);
}

// =============================================================================
// Debounce Tests
// =============================================================================

#[test]
fn test_debounced_send_succeeds_alone() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    tv.debounce_default("poweron");
    assert_eq!(tv.send("poweron").unwrap(), Reply::Done);
    assert_eq!(mock.connects(), 1);
}

#[test]
fn test_debounced_send_honours_settle_delay() {
    let (_temp_dir, _mock, mut tv) = setup_tv();
    tv.debounce("poweron", Duration::from_millis(150));
    let start = Instant::now();
    tv.send("poweron").unwrap();
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[test]
fn test_debounced_send_does_not_retry_open() {
    let (_temp_dir, mock, mut tv) = setup_tv();
    tv.debounce_default("poweron");
    mock.refuse_connects(1);

    let err = tv.send("poweron").unwrap_err();
    assert!(matches!(err, TvError::PortUnavailable(_)));

    // Lock released on the failure path
    assert_eq!(tv.send("poweron").unwrap(), Reply::Done);
}

#[test]
fn test_debounced_send_closes_port_before_unlocking() {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();
    let connector = LockWatchConnector {
        inner: mock.clone(),
        lock_dir: temp_dir.path().to_path_buf(),
        command: "poweron".to_string(),
        held_at_close: Arc::new(Mutex::new(Vec::new())),
    };
    let held_at_close = Arc::clone(&connector.held_at_close);

    let mut tv = Tv::with_connector(test_config(&temp_dir), connector).unwrap();
    tv.debounce("poweron", Duration::from_millis(10));

    assert_eq!(tv.send("poweron").unwrap(), Reply::Done);
    assert_eq!(*held_at_close.lock(), vec![true]);
    assert!(CommandLock::try_acquire(temp_dir.path(), "poweron").is_ok());
}

#[test]
fn test_concurrent_debounced_sends_execute_once() {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();
    mock.set_state("ka 00 ff", "00");

    let mut first = Tv::with_connector(test_config(&temp_dir), mock.clone()).unwrap();
    let mut second = Tv::with_connector(test_config(&temp_dir), mock.clone()).unwrap();
    first.debounce("togglepower", Duration::from_millis(500));
    second.debounce("togglepower", Duration::from_millis(500));

    let handle = thread::spawn(move || first.send("togglepower"));

    // The connect happens while the first send holds the lock
    wait_for_connects(&mock, 1);
    let err = second.send("togglepower").unwrap_err();
    assert!(matches!(err, TvError::Debounced(_)));

    assert_eq!(handle.join().unwrap().unwrap(), Reply::Done);
    assert_eq!(mock.connects(), 1);
    assert_eq!(mock.written(), vec!["ka 00 ff", "ka 00 01"]);
    assert_eq!(mock.state("ka 00 ff").as_deref(), Some("01"));
}

#[test]
fn test_debounce_is_per_command() {
    let temp_dir = TempDir::new().unwrap();
    let mock = MockConnector::new();

    let mut first = Tv::with_connector(test_config(&temp_dir), mock.clone()).unwrap();
    let mut second = Tv::with_connector(test_config(&temp_dir), mock.clone()).unwrap();
    first.debounce("poweron", Duration::from_millis(300));
    second.debounce("mute", Duration::from_millis(10));

    let handle = thread::spawn(move || first.send("poweron"));
    wait_for_connects(&mock, 1);

    assert_eq!(second.send("mute").unwrap(), Reply::Done);
    assert_eq!(handle.join().unwrap().unwrap(), Reply::Done);
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_available_commands() {
    let (_temp_dir, _mock, tv) = setup_tv();
    let commands = tv.available_commands();

    let find = |name: &str| {
        commands
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code.as_str())
    };

    assert_eq!(find("poweroff"), Some("ka 00 00"));
    assert_eq!(find("volumeup"), Some("kf 00 ??"));
    assert_eq!(find("volumedown"), Some("kf 00 ??"));
    assert_eq!(find("togglepower"), Some("poweron | poweroff"));
    assert_eq!(find("togglemute"), Some("mute | unmute"));
}

#[test]
fn test_available_commands_sorted() {
    let (_temp_dir, _mock, tv) = setup_tv();
    let commands = tv.available_commands();
    let mut sorted = commands.clone();
    sorted.sort();
    assert_eq!(commands, sorted);
}

#[test]
fn test_custom_table_skips_missing_default_toggles() {
    let temp_dir = TempDir::new().unwrap();
    let table = CodeTable::from_entries("custom", [("poweroff", "xb 0 00")]);
    let tv = Tv::with_table(test_config(&temp_dir), table, MockConnector::new());
    assert!(tv.toggles().is_empty());
}
