//! Panel control loop
//!
//! One cooperative loop. Every call to [`Panel::poll`] services, in order:
//!
//! 1. a storage-medium change reported by the motion engine
//! 2. job supervision, while a job runs
//! 3. the status line
//! 4. operator input (non-blocking while browsing or running, blocking
//!    in question and message windows)
//! 5. pending directory reload and redraw, once back in the browser
//!
//! Faults never stop the loop; they end up in a message window.

use cncpanel_display::{Color, DisplayBackend, DisplayError, Keypad};
use cncpanel_hal::{Clock, FileStorage, StorageError};
use heapless::{String, Vec};

use crate::catalog::{EntryName, WINDOW_ROWS};
use crate::config::board::MAX_ROOT_LEN;
use crate::config::{store, ConfigError, PanelConfig};
use crate::error::SessionError;
use crate::input::Command;
use crate::traits::{MotionEngine, MotionError, RunMode, StatusSensors};
use crate::ui::layout::{FINISH_ROW, INFO_LINES};
use crate::ui::{format_line, Line, Notice, PanelDisplay};

use super::context::{AfterNotice, Session};
use super::job::JobOutcome;
use super::state::{SessionEvent, SessionState};
use super::time_editor::TimeEditor;

/// Longest file line read for the info window
const INFO_LINE_BUFFER: usize = 150;

/// Peripherals the panel drives
pub struct Peripherals<S, D, K, M, C, T> {
    pub storage: S,
    pub display: D,
    pub keypad: K,
    pub motion: M,
    pub clock: C,
    pub sensors: T,
}

/// File held open by the info window
struct InfoView<F> {
    file: F,
    at_end: bool,
}

/// Session control loop bound to its peripherals
pub struct Panel<S: FileStorage, D, K, M, C, T> {
    session: Session,
    io: Peripherals<S, D, K, M, C, T>,
    info: Option<InfoView<S::File>>,
}

impl<S, D, K, M, C, T> Panel<S, D, K, M, C, T>
where
    S: FileStorage,
    D: DisplayBackend,
    K: Keypad,
    M: MotionEngine,
    C: Clock,
    T: StatusSensors,
{
    /// Create a new panel
    pub fn new(config: PanelConfig, io: Peripherals<S, D, K, M, C, T>) -> Self {
        Self {
            session: Session::new(config),
            io,
            info: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn peripherals(&self) -> &Peripherals<S, D, K, M, C, T> {
        &self.io
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<S, D, K, M, C, T> {
        &mut self.io
    }

    /// Mount storage, load tuning and read the job directory
    ///
    /// A mount failure leaves the panel running without storage.
    pub fn start(&mut self) {
        info!("Panel starting");

        if self.session.config().capabilities.has_storage {
            if let Err(e) = self.io.storage.mount() {
                error!("Mount failed: status {}", e.status);
                self.session.set_degraded();
                let notice = Notice::error()
                    .line(format_args!("Mount SD error [code:{}]", e.status))
                    .line(format_args!("SD card used for any CNC process"))
                    .line(format_args!("Only RESET possible at now"));
                self.show_fault(notice, AfterNotice::Redraw);
                return;
            }
            self.load_tuning();
            self.session.request_reload();
        }

        self.service_pending();
    }

    /// Run one loop iteration
    pub fn poll(&mut self) {
        if self.io.motion.take_media_changed() {
            info!("Storage medium changed");
            self.session.request_reload();
        }

        if self.session.state() == SessionState::Executing {
            self.supervise_job();
        }

        self.service_status();
        self.service_input();
        self.service_pending();
    }

    fn load_tuning(&mut self) {
        let name = self.session.config().config_file.clone();
        match store::load(&mut self.io.storage, &name) {
            Ok(loaded) => {
                if !loaded.is_complete() {
                    debug!("{}", SessionError::ParseShort);
                }
                self.session.set_params(loaded.params);
            }
            Err(ConfigError::NotFound) => info!("No tuning file, using defaults"),
            Err(ConfigError::Storage(e)) => {
                warn!("Tuning file unreadable: status {}", e.status)
            }
        }
    }

    fn service_status(&mut self) {
        let caps = self.session.config().capabilities;
        let tuning = *self.session.params();
        let frame = self.session.status.poll(
            &mut self.io.clock,
            &mut self.io.sensors,
            &caps,
            &tuning,
        );
        if let Some(line) = &frame.line {
            let result = self.io.display.draw_status(line);
            self.note_display(result);
        }
        if let Some(limits) = frame.limits {
            let result = self.io.display.draw_limits(limits);
            self.note_display(result);
        }
    }

    fn service_input(&mut self) {
        let state = self.session.state();
        let key = if state.waits_for_key() {
            Some(self.io.keypad.wait_key())
        } else {
            self.io.keypad.poll_key()
        };
        let Some(key) = key else {
            return;
        };

        match self.session.keymap().command(state, key) {
            Some(command) => self.handle(command),
            None => trace!("Key {} ignored in {}", key, state),
        }
    }

    fn service_pending(&mut self) {
        if self.session.state() != SessionState::Browsing {
            return;
        }
        if self.session.reload_pending() {
            self.reload_catalog();
        }
        // A failed reload leaves a notice on screen
        if self.session.state() == SessionState::Browsing && self.session.take_redraw() {
            self.redraw();
        }
    }

    /// Act on a command valid in the current state
    fn handle(&mut self, command: Command) {
        let state = self.session.state();
        if command.needs_selection() && self.session.catalog().is_empty() {
            debug!("{} with no files", command);
            return;
        }

        match (state, command) {
            (SessionState::Browsing, Command::MoveUp) => self.move_selection(-1),
            (SessionState::Browsing, Command::MoveDown) => self.move_selection(1),
            (SessionState::Browsing, Command::PageUp) => {
                self.move_selection(-(WINDOW_ROWS as isize))
            }
            (SessionState::Browsing, Command::PageDown) => {
                self.move_selection(WINDOW_ROWS as isize)
            }
            (SessionState::Browsing, Command::Launch) => self.launch(),
            (SessionState::Browsing, Command::ManualMode) => self.manual_mode(),
            (SessionState::Browsing, Command::Preview) => self.preview(),
            (SessionState::Browsing, Command::Delete) => self.ask_delete(),
            (SessionState::Browsing, Command::EditTime) => self.open_time_editor(),
            (SessionState::Browsing, Command::Info) => self.open_info(),
            (SessionState::Browsing, Command::SaveConfig) => self.save_config(),

            (SessionState::ConfirmDelete, Command::Confirm) => self.confirm_delete(),
            (SessionState::ConfirmDelete, Command::Cancel) => {
                self.session.take_delete_target();
                self.session.apply(command.into());
                self.session.request_redraw();
            }

            (SessionState::EditTime, _) => self.edit_time(command),

            (SessionState::ShowInfo, Command::ScrollInfo) => self.show_info_page(),
            (SessionState::ShowInfo, Command::Acknowledge) => self.close_info(),

            (SessionState::Executing, Command::Cancel) => {
                info!("Job cancelled by operator");
                self.finish_job(JobOutcome::Cancelled);
            }

            (SessionState::Notice, Command::Acknowledge) => {
                self.session.apply(command.into());
                self.session.leave_notice();
            }

            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        self.session.catalog_mut().move_selection(delta);
        let result = self.io.display.draw_file_list(self.session.catalog());
        self.note_display(result);
    }

    fn selected_name(&self) -> Option<EntryName> {
        self.session.catalog().selected_entry().map(|e| e.to_name())
    }

    /// Start the selected job and supervise it from the next poll on
    fn launch(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        self.io.keypad.flush_keys();
        info!("Starting job {}", name.as_str());
        if let Err(e) = self.io.motion.run_file(&name, RunMode::Execute) {
            self.io.motion.stop();
            self.show_fault(motion_fault(&name, e), AfterNotice::Redraw);
            return;
        }

        let now = self.io.clock.now_seconds();
        self.session.start_job(name, now);
        self.session.apply(Command::Launch.into());
        self.install_touch_layout();
        let result = self.io.display.draw_progress(self.io.motion.remaining_count());
        self.note_display(result);
    }

    /// One supervision step
    fn supervise_job(&mut self) {
        if self.io.motion.is_in_progress() {
            let remaining = self.io.motion.remaining_count();
            let result = self.io.display.draw_progress(remaining);
            self.note_display(result);
        } else {
            self.finish_job(JobOutcome::Completed);
        }
    }

    /// Stop the engine and show the summary
    fn finish_job(&mut self, outcome: JobOutcome) {
        self.io.motion.stop();

        let now = self.io.clock.now_seconds();
        let Some(job) = self.session.take_job() else {
            self.session.apply(SessionEvent::JobEnded);
            self.session.enter_notice(None, AfterNotice::Reload);
            return;
        };
        let summary = job.finish(now, outcome);
        info!(
            "Job {} {} after {}s",
            summary.name.as_str(),
            outcome,
            summary.elapsed_seconds
        );

        self.io.keypad.flush_keys();
        let result = self
            .io
            .display
            .draw_job_finished(summary.elapsed_seconds, summary.was_cancelled());
        self.note_display(result);
        self.session.set_last_job(summary);

        let event = match outcome {
            JobOutcome::Completed => SessionEvent::JobEnded,
            JobOutcome::Cancelled => Command::Cancel.into(),
        };
        self.session.apply(event);
        self.session.enter_notice(None, AfterNotice::Reload);
        self.install_touch_layout();
    }

    fn manual_mode(&mut self) {
        info!("Entering manual mode");
        self.io.motion.manual_mode();
        self.session.apply(Command::ManualMode.into());
        self.session.request_redraw();
    }

    /// Let the engine draw the tool path, then wait for acknowledgement
    fn preview(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        self.io.keypad.flush_keys();
        if let Err(e) = self.io.motion.run_file(&name, RunMode::Preview) {
            self.show_fault(motion_fault(&name, e), AfterNotice::Redraw);
            return;
        }
        self.session.catalog_mut().remember_selection(name);

        self.io.keypad.flush_keys();
        self.session.apply(Command::Preview.into());
        self.session.enter_notice(None, AfterNotice::Redraw);
        let result = self.io.display.draw_row(
            FINISH_ROW + 1,
            "              PRESS C-KEY",
            Color::Yellow,
            Color::Blue,
        );
        self.note_display(result);
        self.install_touch_layout();
    }

    fn ask_delete(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };
        let result = self.io.display.draw_delete_question(&name);
        self.note_display(result);
        self.session.set_delete_target(name);
        self.session.apply(Command::Delete.into());
        self.install_touch_layout();
    }

    fn confirm_delete(&mut self) {
        let Some(name) = self.session.take_delete_target() else {
            return;
        };

        self.session.apply(Command::Confirm.into());
        match self.io.storage.delete(&name) {
            Ok(()) => {
                info!("Deleted {}", name.as_str());
                self.session.request_reload();
            }
            Err(e) => {
                warn!("Delete of {} failed: status {}", name.as_str(), e.status);
                let notice = storage_fault("Error delete file", &name, e);
                self.show_fault(notice, AfterNotice::Reload);
            }
        }
    }

    fn open_time_editor(&mut self) {
        let now = self.io.clock.calendar().unwrap_or_default();
        let editor = TimeEditor::new(now);
        let result = self.io.display.draw_time_editor(&editor);
        self.note_display(result);
        self.session.set_time_editor(editor);
        self.session.apply(Command::EditTime.into());
        self.install_touch_layout();
    }

    fn edit_time(&mut self, command: Command) {
        if matches!(command, Command::Confirm | Command::Cancel) {
            let editor = self.session.take_time_editor();
            self.session.apply(command.into());
            self.session.request_redraw();

            if let (Command::Confirm, Some(editor)) = (command, editor) {
                if let Err(e) = self.io.clock.set_calendar(editor.time()) {
                    warn!("Clock rejected new time: {}", e);
                    let notice = Notice::error()
                        .line(format_args!("Error set time"))
                        .line(format_args!("{:?}", SessionError::from(e)));
                    self.show_fault(notice, AfterNotice::Redraw);
                } else {
                    info!("Clock set");
                }
            }
            return;
        }

        let Some(editor) = self.session.time_editor_mut() else {
            return;
        };
        match command {
            Command::Increment => {
                editor.increment();
            }
            Command::Decrement => {
                editor.decrement();
            }
            Command::PreviousField => editor.previous_field(),
            Command::NextField => editor.next_field(),
            _ => return,
        }
        let editor = *editor;
        let result = self.io.display.draw_time_editor(&editor);
        self.note_display(result);
    }

    /// Show size and the first lines of the selected file
    fn open_info(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        let size = match self.io.storage.stat(&name) {
            Ok(size) => size,
            Err(e) => {
                debug!("stat {} failed: status {}", name.as_str(), e.status);
                0
            }
        };

        let file = match self.io.storage.open(&name) {
            Ok(file) => file,
            Err(e) => {
                let notice = storage_fault("Error open file", &name, e);
                self.show_fault(notice, AfterNotice::Reload);
                return;
            }
        };

        self.info = Some(InfoView {
            file,
            at_end: false,
        });
        self.session.apply(Command::Info.into());
        let result = self.io.display.draw_info_header(&name, size);
        self.note_display(result);
        self.show_info_page();
        self.install_touch_layout();
    }

    /// Show the next lines of the open file
    fn show_info_page(&mut self) {
        let Some(view) = self.info.as_mut() else {
            return;
        };
        if view.at_end {
            return;
        }

        let mut lines: Vec<Line, INFO_LINES> = Vec::new();
        let mut buf = [0u8; INFO_LINE_BUFFER];
        while !lines.is_full() {
            match self.io.storage.read_line(&mut view.file, &mut buf) {
                Ok(Some(text)) => {
                    let _ = lines.push(format_line(format_args!("{}", text.trim_end())));
                }
                Ok(None) => {
                    view.at_end = true;
                    break;
                }
                Err(e) => {
                    warn!("Read error in info view: status {}", e.status);
                    view.at_end = true;
                    break;
                }
            }
        }

        if !lines.is_empty() {
            let result = self.io.display.draw_info_lines(&lines);
            self.note_display(result);
        }
    }

    fn close_info(&mut self) {
        if let Some(view) = self.info.take() {
            if let Err(e) = self.io.storage.close(view.file) {
                warn!("Close failed: status {}", e.status);
            }
        }
        self.session.apply(Command::Acknowledge.into());
        self.session.request_reload();
    }

    /// Write the tuning file and report the result
    fn save_config(&mut self) {
        let name = self.session.config().config_file.clone();
        let params = *self.session.params();

        let notice = match store::save(&mut self.io.storage, &name, &params) {
            Ok(()) => Notice::message().line(format_args!("Save into {} - OK", name.as_str())),
            Err(e) => {
                warn!("Saving tuning failed: status {}", e.status);
                storage_fault("Error save file", &name, e)
            }
        };

        self.session.apply(Command::SaveConfig.into());
        self.show_notice(notice, AfterNotice::Redraw);
    }

    /// Re-read the job directory
    fn reload_catalog(&mut self) {
        if !self.session.config().capabilities.has_storage {
            let _ = self.session.reload_catalog(core::iter::empty::<Result<_, StorageError>>());
            return;
        }

        let root: String<MAX_ROOT_LEN> = self.session.config().root.clone();
        let result = match self.io.storage.list_entries(&root) {
            Ok(entries) => self.session.reload_catalog(entries),
            Err(e) => {
                let _ = self
                    .session
                    .reload_catalog(core::iter::empty::<Result<_, StorageError>>());
                Err(e)
            }
        };

        match result {
            Ok(summary) => {
                info!("Catalog: {} files", summary.count);
                if summary.pending_missed {
                    debug!("{}", SessionError::NotFound);
                }
            }
            Err(e) => {
                error!("Directory read failed: status {}", e.status);
                let notice = Notice::error()
                    .line(format_args!("f_opendir() error [code:{}]", e.status))
                    .line(format_args!("device [{}]", e.device_errno));
                self.show_fault(notice, AfterNotice::Redraw);
            }
        }
    }

    /// Draw the file browser from scratch
    fn redraw(&mut self) {
        self.session.status.invalidate();
        let result = self.io.display.clear(Color::Black);
        self.note_display(result);

        if !self.session.config().capabilities.is_touch() {
            let result = self.io.display.draw_menu_legend();
            self.note_display(result);
        }
        self.install_touch_layout();

        let result = self.io.display.draw_file_list(self.session.catalog());
        self.note_display(result);
    }

    fn install_touch_layout(&mut self) {
        if let Some(layout) = self.session.keymap().touch_layout(self.session.state()) {
            self.io.keypad.set_touch_layout(layout);
            let result = self.io.display.draw_touch_buttons(&layout);
            self.note_display(result);
        }
    }

    /// Show a fault window
    fn show_fault(&mut self, notice: Notice, after: AfterNotice) {
        self.session.apply(SessionEvent::Fault);
        self.show_notice(notice, after);
    }

    fn show_notice(&mut self, notice: Notice, after: AfterNotice) {
        self.io.keypad.flush_keys();
        let result = self.io.display.draw_notice(&notice);
        self.note_display(result);
        self.session.enter_notice(Some(notice), after);
        self.install_touch_layout();
    }

    fn note_display(&self, result: Result<(), DisplayError>) {
        if let Err(e) = result {
            warn!("Display error: {}", SessionError::from(e));
        }
    }
}

fn storage_fault(what: &str, name: &str, e: StorageError) -> Notice {
    Notice::error()
        .line(format_args!("{}:'{}'", what, name))
        .line(format_args!("Status:{} [{}]", e.status, e.device_errno))
}

fn motion_fault(name: &str, e: MotionError) -> Notice {
    match e {
        MotionError::Open(e) => storage_fault("Error open file", name, e),
        MotionError::Busy => Notice::error().line(format_args!("Motion engine busy")),
    }
}
