//! In-memory collaborators for host tests

use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

use cncpanel_display::Keypad;
use cncpanel_hal::storage::{STATUS_NO_FILE, STATUS_NO_PATH};
use cncpanel_hal::{CalendarTime, Clock, ClockError, DirEntry, FileStorage, StorageError};
use cncpanel_protocol::{KeyCode, TouchLayout};

use crate::traits::{LimitMask, MotionEngine, MotionError, RunMode, StatusSensors};

/// Open handle into [`MemStorage`]
#[derive(Debug)]
pub struct MemFile {
    name: String,
    pos: usize,
}

/// Flat in-memory volume
#[derive(Debug, Default)]
pub struct MemStorage {
    /// Files in directory order
    pub files: Vec<(String, Vec<u8>)>,
    /// Subdirectory names listed before the files
    pub dirs: Vec<String>,
    pub mounted: bool,
    pub mount_error: Option<StorageError>,
    pub list_error: Option<StorageError>,
    /// Fail the listing after this many entries
    pub list_fail_after: Option<(usize, StorageError)>,
    pub create_error: Option<StorageError>,
    pub list_calls: usize,
    pub deleted: Vec<String>,
    pub open_handles: usize,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(names: &[&str]) -> Self {
        let mut storage = Self::new();
        for name in names {
            storage.put(name, "");
        }
        storage
    }

    pub fn put(&mut self, name: &str, contents: &str) {
        if let Some(file) = self.files.iter_mut().find(|(n, _)| n == name) {
            file.1 = contents.as_bytes().to_vec();
        } else {
            self.files
                .push((name.to_string(), contents.as_bytes().to_vec()));
        }
    }

    pub fn contents(&self, name: &str) -> Option<String> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| String::from_utf8_lossy(data).into_owned())
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|(n, _)| n == name)
    }
}

impl FileStorage for MemStorage {
    type File = MemFile;
    type Entries<'a> = std::vec::IntoIter<Result<DirEntry, StorageError>>;

    fn mount(&mut self) -> Result<(), StorageError> {
        if let Some(e) = self.mount_error {
            return Err(e);
        }
        self.mounted = true;
        Ok(())
    }

    fn list_entries(&mut self, _path: &str) -> Result<Self::Entries<'_>, StorageError> {
        self.list_calls += 1;
        if let Some(e) = self.list_error {
            return Err(e);
        }

        let mut items: Vec<Result<DirEntry, StorageError>> = Vec::new();
        items.push(Ok(DirEntry::dir(".")));
        items.push(Ok(DirEntry::dir("..")));
        for dir in &self.dirs {
            items.push(Ok(DirEntry::dir(dir)));
        }
        for (name, _) in &self.files {
            items.push(Ok(DirEntry::file(name)));
        }
        if let Some((after, e)) = self.list_fail_after {
            items.truncate(after);
            items.push(Err(e));
        }
        Ok(items.into_iter())
    }

    fn open(&mut self, name: &str) -> Result<MemFile, StorageError> {
        self.find(name)
            .ok_or(StorageError::new(STATUS_NO_FILE))?;
        self.open_handles += 1;
        Ok(MemFile {
            name: name.to_string(),
            pos: 0,
        })
    }

    fn read_line<'b>(
        &mut self,
        file: &mut MemFile,
        buf: &'b mut [u8],
    ) -> Result<Option<&'b str>, StorageError> {
        let index = self
            .find(&file.name)
            .ok_or(StorageError::new(STATUS_NO_FILE))?;
        let data = &self.files[index].1;
        if file.pos >= data.len() {
            return Ok(None);
        }

        let rest = &data[file.pos..];
        let line_len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        let take = line_len.min(buf.len());
        buf[..take].copy_from_slice(&rest[..take]);
        file.pos += take;
        if take == line_len && file.pos < data.len() {
            // consume the newline
            file.pos += 1;
        }

        let mut end = take;
        if end > 0 && buf[end - 1] == b'\r' {
            end -= 1;
        }
        Ok(Some(core::str::from_utf8(&buf[..end]).unwrap_or("")))
    }

    fn create(&mut self, name: &str) -> Result<MemFile, StorageError> {
        if let Some(e) = self.create_error {
            return Err(e);
        }
        self.put(name, "");
        self.open_handles += 1;
        Ok(MemFile {
            name: name.to_string(),
            pos: 0,
        })
    }

    fn write_line(&mut self, file: &mut MemFile, line: &str) -> Result<(), StorageError> {
        let index = self
            .find(&file.name)
            .ok_or(StorageError::new(STATUS_NO_FILE))?;
        let data = &mut self.files[index].1;
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');
        Ok(())
    }

    fn close(&mut self, _file: MemFile) -> Result<(), StorageError> {
        self.open_handles -= 1;
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), StorageError> {
        self.deleted.push(name.to_string());
        let index = self
            .find(name)
            .ok_or(StorageError::new(STATUS_NO_PATH))?;
        self.files.remove(index);
        Ok(())
    }

    fn stat(&mut self, name: &str) -> Result<u32, StorageError> {
        self.find(name)
            .map(|i| self.files[i].1.len() as u32)
            .ok_or(StorageError::new(STATUS_NO_FILE))
    }
}

/// Keypad replaying a fixed script
///
/// `None` entries are empty polls. Once the script runs out `wait_key`
/// answers `9`, which no window accepts, so a test cannot hang.
#[derive(Debug, Default)]
pub struct ScriptedKeypad {
    pub script: VecDeque<Option<KeyCode>>,
    pub layouts: Vec<TouchLayout>,
    pub waits: usize,
}

impl ScriptedKeypad {
    pub fn new(keys: &[Option<KeyCode>]) -> Self {
        Self {
            script: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn keys(keys: &[KeyCode]) -> Self {
        Self {
            script: keys.iter().map(|&k| Some(k)).collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, key: KeyCode) {
        self.script.push_back(Some(key));
    }
}

impl Keypad for ScriptedKeypad {
    fn poll_key(&mut self) -> Option<KeyCode> {
        self.script.pop_front().flatten()
    }

    fn wait_key(&mut self) -> KeyCode {
        self.waits += 1;
        while let Some(entry) = self.script.pop_front() {
            if let Some(key) = entry {
                return key;
            }
        }
        KeyCode::Key9
    }

    fn set_touch_layout(&mut self, layout: TouchLayout) {
        self.layouts.push(layout);
    }

    // Scripted keys are never stale
    fn flush_keys(&mut self) {}
}

/// Recorded call on [`ScriptedMotion`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionCall {
    Run(String, RunMode),
    Poll,
    Remaining,
    Stop,
    Manual,
}

/// Motion engine that reports progress for a fixed number of polls
#[derive(Debug, Default)]
pub struct ScriptedMotion {
    pub calls: Vec<MotionCall>,
    /// Polls answered with "in progress" after a job starts
    pub busy_polls: usize,
    pub remaining: u32,
    pub run_error: Option<MotionError>,
    pub media_changed: bool,
    polls_left: usize,
}

impl ScriptedMotion {
    pub fn new(busy_polls: usize) -> Self {
        Self {
            busy_polls,
            ..Self::default()
        }
    }

    pub fn stop_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == MotionCall::Stop).count()
    }

    pub fn poll_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == MotionCall::Poll).count()
    }
}

impl MotionEngine for ScriptedMotion {
    fn run_file(&mut self, name: &str, mode: RunMode) -> Result<(), MotionError> {
        self.calls.push(MotionCall::Run(name.to_string(), mode));
        if let Some(e) = self.run_error {
            return Err(e);
        }
        if mode == RunMode::Execute {
            self.polls_left = self.busy_polls;
            self.remaining = self.busy_polls as u32;
        }
        Ok(())
    }

    fn is_in_progress(&mut self) -> bool {
        self.calls.push(MotionCall::Poll);
        if self.polls_left > 0 {
            self.polls_left -= 1;
            true
        } else {
            false
        }
    }

    fn remaining_count(&mut self) -> u32 {
        self.calls.push(MotionCall::Remaining);
        self.polls_left as u32
    }

    fn stop(&mut self) {
        self.calls.push(MotionCall::Stop);
        self.polls_left = 0;
    }

    fn manual_mode(&mut self) {
        self.calls.push(MotionCall::Manual);
    }

    fn take_media_changed(&mut self) -> bool {
        core::mem::take(&mut self.media_changed)
    }
}

/// Clock that advances one second every `ticks_per_second` reads
#[derive(Debug)]
pub struct FakeClock {
    pub seconds: u32,
    pub ticks_per_second: u32,
    pub calendar: Option<CalendarTime>,
    pub set_error: Option<ClockError>,
    ticks: u32,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            seconds: 0,
            ticks_per_second: 0,
            calendar: None,
            set_error: None,
            ticks: 0,
        }
    }

    pub fn with_calendar(time: CalendarTime) -> Self {
        Self {
            calendar: Some(time),
            ..Self::new()
        }
    }

    pub fn ticking(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second,
            ..Self::new()
        }
    }
}

impl Clock for FakeClock {
    fn now_seconds(&mut self) -> u32 {
        if self.ticks_per_second > 0 {
            self.ticks += 1;
            if self.ticks >= self.ticks_per_second {
                self.ticks = 0;
                self.seconds += 1;
            }
        }
        self.seconds
    }

    fn calendar(&mut self) -> Option<CalendarTime> {
        self.calendar
    }

    fn set_calendar(&mut self, time: &CalendarTime) -> Result<(), ClockError> {
        if let Some(e) = self.set_error {
            return Err(e);
        }
        self.calendar = Some(*time);
        Ok(())
    }
}

/// Fixed sensor readings
#[derive(Debug, Default)]
pub struct FakeSensors {
    pub temperature: Option<i16>,
    pub limits: LimitMask,
}

impl StatusSensors for FakeSensors {
    fn spindle_temperature_c(&mut self) -> Option<i16> {
        self.temperature
    }

    fn limit_switches(&mut self) -> LimitMask {
        self.limits
    }
}
