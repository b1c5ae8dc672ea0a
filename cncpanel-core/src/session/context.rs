//! Session aggregate

use crate::catalog::{Catalog, EntryName, ReloadSummary};
use crate::config::{MotionTuningParameters, PanelConfig};
use crate::input::KeyMap;
use crate::status::StatusReporter;
use crate::ui::Notice;

use super::job::{ActiveJob, JobSummary};
use super::state::{SessionEvent, SessionState};
use super::time_editor::TimeEditor;

/// What follows the acknowledgement of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AfterNotice {
    /// Redraw the file browser as it was
    #[default]
    Redraw,
    /// Re-read the directory first
    Reload,
}

/// Everything the panel keeps between loop iterations
///
/// There is exactly one of these; it is owned by the
/// [`Panel`](super::Panel) and handed around by reference.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    catalog: Catalog,
    params: MotionTuningParameters,
    config: PanelConfig,
    keymap: KeyMap,
    pub(crate) status: StatusReporter,
    degraded: bool,
    reload_pending: bool,
    redraw_pending: bool,
    notice: Option<Notice>,
    after_notice: AfterNotice,
    delete_target: Option<EntryName>,
    time_editor: Option<TimeEditor>,
    job: Option<ActiveJob>,
    last_job: Option<JobSummary>,
}

impl Session {
    /// Create a new session for a board
    pub fn new(config: PanelConfig) -> Self {
        Self {
            state: SessionState::Browsing,
            catalog: Catalog::new(),
            params: MotionTuningParameters::default(),
            keymap: KeyMap::new(&config.capabilities),
            config,
            status: StatusReporter::new(),
            degraded: false,
            reload_pending: false,
            redraw_pending: true,
            notice: None,
            after_notice: AfterNotice::Redraw,
            delete_target: None,
            time_editor: None,
            job: None,
            last_job: None,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply an event to the state machine
    pub fn apply(&mut self, event: SessionEvent) -> SessionState {
        let next = self.state.transition(event);
        if next != self.state {
            debug!("Session {} -> {}", self.state, next);
        }
        self.state = next;
        next
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Replace the catalog with a directory listing, hiding the tuning file
    pub fn reload_catalog<I, E>(&mut self, entries: I) -> Result<ReloadSummary, E>
    where
        I: IntoIterator<Item = Result<cncpanel_hal::DirEntry, E>>,
    {
        self.reload_pending = false;
        self.redraw_pending = true;
        self.catalog.reload(entries, &self.config.config_file)
    }

    pub fn params(&self) -> &MotionTuningParameters {
        &self.params
    }

    pub fn set_params(&mut self, params: MotionTuningParameters) {
        self.params = params;
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Check whether storage failed to mount
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub(crate) fn set_degraded(&mut self) {
        self.degraded = true;
    }

    /// Ask for a directory re-read once the browser is back
    pub fn request_reload(&mut self) {
        self.reload_pending = true;
    }

    /// Ask for a full browser redraw once the browser is back
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// Take the redraw request
    pub(crate) fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_pending)
    }

    /// Show a notice; `notice` is `None` when the screen already holds
    /// the message (job summary, preview)
    pub(crate) fn enter_notice(&mut self, notice: Option<Notice>, after: AfterNotice) {
        self.notice = notice;
        self.after_notice = after;
    }

    /// Close the current notice and queue what follows it
    pub(crate) fn leave_notice(&mut self) {
        self.notice = None;
        match core::mem::take(&mut self.after_notice) {
            AfterNotice::Reload => self.request_reload(),
            AfterNotice::Redraw => self.request_redraw(),
        }
    }

    /// Message currently on screen
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub(crate) fn set_delete_target(&mut self, name: EntryName) {
        self.delete_target = Some(name);
    }

    pub(crate) fn take_delete_target(&mut self) -> Option<EntryName> {
        self.delete_target.take()
    }

    pub(crate) fn set_time_editor(&mut self, editor: TimeEditor) {
        self.time_editor = Some(editor);
    }

    pub(crate) fn time_editor_mut(&mut self) -> Option<&mut TimeEditor> {
        self.time_editor.as_mut()
    }

    pub(crate) fn take_time_editor(&mut self) -> Option<TimeEditor> {
        self.time_editor.take()
    }

    /// Record a launched job and re-select it after the next reload
    pub(crate) fn start_job(&mut self, name: EntryName, now: u32) {
        self.catalog.remember_selection(name.clone());
        self.job = Some(ActiveJob::new(name, now));
    }

    pub(crate) fn take_job(&mut self) -> Option<ActiveJob> {
        self.job.take()
    }

    /// Job being supervised
    pub fn active_job(&self) -> Option<&ActiveJob> {
        self.job.as_ref()
    }

    pub(crate) fn set_last_job(&mut self, summary: JobSummary) {
        self.last_job = Some(summary);
    }

    /// Last finished job
    pub fn last_job(&self) -> Option<&JobSummary> {
        self.last_job.as_ref()
    }
}
