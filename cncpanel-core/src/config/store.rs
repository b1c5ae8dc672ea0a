//! Tuning file persistence
//!
//! The tuning record is kept as plain text on the storage medium:
//!
//! ```text
//! Axis0 (F:steps*100/sec): ramp_up_from_zero,ramp_down_to_zero,ramp_acceleration,max_feed_rate
//! 40000,40000,4000,400000
//! Axis1 ...
//! ...
//! Spindle switch-off temperature (C.degree)
//! 80
//! ```
//!
//! Label lines are not checked, only counted. There is no version field.

use core::fmt::Write;

use heapless::String;

use cncpanel_hal::{FileStorage, StorageError};

use super::tuning::{AxisTuning, MotionTuningParameters, AXIS_COUNT, K_FRQ};

/// Default tuning file name in the volume root
pub const CONFIG_FILE_NAME: &str = "sm.conf";

/// Longest line read back from the file
const LINE_BUFFER_SIZE: usize = 256;

/// Longest line written to the file
const MAX_LINE_LEN: usize = 128;

const TEMPERATURE_LABEL: &str = "Spindle switch-off temperature (C.degree)";

/// Tuning file errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No tuning file on the medium
    NotFound,
    /// Storage driver failure
    Storage(StorageError),
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        if e.is_not_found() {
            ConfigError::NotFound
        } else {
            ConfigError::Storage(e)
        }
    }
}

/// Result of reading a tuning file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadedConfig {
    /// Parameters read, defaults for anything missing
    pub params: MotionTuningParameters,
    /// Number of axis records read
    pub axes_read: usize,
    /// Whether the temperature record was read
    pub temperature_read: bool,
}

impl LoadedConfig {
    /// Check whether every record was present
    pub fn is_complete(&self) -> bool {
        self.axes_read == AXIS_COUNT && self.temperature_read
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    AxisLabel(usize),
    AxisValues(usize),
    TemperatureLabel,
    TemperatureValue,
    Done,
}

/// Line-at-a-time tuning file parser
///
/// Starts from a set of parameters and overwrites them record by record.
/// Parsing stops at the first value line that does not parse, the same
/// as if the file had ended there.
#[derive(Debug, Clone)]
pub struct ConfigParser {
    params: MotionTuningParameters,
    expect: Expect,
    axes_read: usize,
    temperature_read: bool,
}

impl ConfigParser {
    /// Create a new parser on top of `base`
    pub fn new(base: MotionTuningParameters) -> Self {
        Self {
            params: base,
            expect: Expect::AxisLabel(0),
            axes_read: 0,
            temperature_read: false,
        }
    }

    /// Feed one line (without terminator)
    ///
    /// Returns `false` once no more lines are wanted.
    pub fn feed(&mut self, line: &str) -> bool {
        self.expect = match self.expect {
            Expect::AxisLabel(axis) => Expect::AxisValues(axis),
            Expect::AxisValues(axis) => match parse_axis(line) {
                Some(values) => {
                    self.params.axes[axis] = values;
                    self.axes_read = axis + 1;
                    if axis + 1 < AXIS_COUNT {
                        Expect::AxisLabel(axis + 1)
                    } else {
                        Expect::TemperatureLabel
                    }
                }
                None => {
                    warn!("Malformed tuning values for axis {}", axis);
                    Expect::Done
                }
            },
            Expect::TemperatureLabel => Expect::TemperatureValue,
            Expect::TemperatureValue => {
                match parse_int(line.split(',').next().unwrap_or("")) {
                    Some(t) => {
                        self.params.max_spindle_temperature = t;
                        self.temperature_read = true;
                    }
                    None => warn!("Malformed spindle temperature"),
                }
                Expect::Done
            }
            Expect::Done => Expect::Done,
        };
        self.expect != Expect::Done
    }

    /// Finish parsing
    pub fn finish(self) -> LoadedConfig {
        LoadedConfig {
            params: self.params,
            axes_read: self.axes_read,
            temperature_read: self.temperature_read,
        }
    }
}

fn parse_int(field: &str) -> Option<i32> {
    field.trim().parse().ok()
}

/// Parse `a,b,c,d`; anything after the fourth field is ignored
fn parse_axis(line: &str) -> Option<AxisTuning> {
    let mut fields = line.split(',');
    let mut values = [0i32; 4];
    for value in values.iter_mut() {
        *value = parse_int(fields.next()?)?;
    }
    Some(AxisTuning::from_array(values))
}

/// Read the tuning file
///
/// Missing records keep their compiled-in defaults. A missing file is
/// [`ConfigError::NotFound`].
pub fn load<S: FileStorage>(storage: &mut S, name: &str) -> Result<LoadedConfig, ConfigError> {
    let mut file = storage.open(name)?;
    let mut parser = ConfigParser::new(MotionTuningParameters::default());
    let mut buf = [0u8; LINE_BUFFER_SIZE];

    loop {
        match storage.read_line(&mut file, &mut buf) {
            Ok(Some(line)) => {
                if !parser.feed(line) {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Tuning file read error: status {}", e.status);
                break;
            }
        }
    }

    if let Err(e) = storage.close(file) {
        warn!("Tuning file close failed: status {}", e.status);
    }

    let loaded = parser.finish();
    if loaded.is_complete() {
        info!("Loaded tuning from {}", name);
    } else {
        warn!(
            "Tuning file short: {} axes, temperature {}",
            loaded.axes_read,
            loaded.temperature_read
        );
    }
    Ok(loaded)
}

/// Write the tuning file
///
/// The old file is removed before the new one is created, so a failure
/// part way leaves no tuning file at all.
pub fn save<S: FileStorage>(
    storage: &mut S,
    name: &str,
    params: &MotionTuningParameters,
) -> Result<(), StorageError> {
    if let Err(e) = storage.delete(name) {
        if !e.is_not_found() {
            debug!("Removing old tuning file failed: status {}", e.status);
        }
    }

    let mut file = storage.create(name)?;
    let written = write_records(storage, &mut file, params);
    let closed = storage.close(file);
    written?;
    closed?;

    info!("Saved tuning to {}", name);
    Ok(())
}

fn write_records<S: FileStorage>(
    storage: &mut S,
    file: &mut S::File,
    params: &MotionTuningParameters,
) -> Result<(), StorageError> {
    let mut line: String<MAX_LINE_LEN> = String::new();

    for (i, axis) in params.axes.iter().enumerate() {
        line.clear();
        let _ = write!(
            line,
            "Axis{} (F:steps*{}/sec): ramp_up_from_zero,ramp_down_to_zero,ramp_acceleration,max_feed_rate",
            i, K_FRQ
        );
        storage.write_line(file, &line)?;

        line.clear();
        let [a, b, c, d] = axis.to_array();
        let _ = write!(line, "{},{},{},{}", a, b, c, d);
        storage.write_line(file, &line)?;
    }

    storage.write_line(file, TEMPERATURE_LABEL)?;
    line.clear();
    let _ = write!(line, "{}", params.max_spindle_temperature);
    storage.write_line(file, &line)
}
