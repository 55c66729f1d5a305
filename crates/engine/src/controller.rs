//! Glue between raw input events and the selection model.
//!
//! The controller owns the model, the host capabilities and the last-known
//! settings. Every membership change is followed by an aggregation pass whose
//! result is pushed to the registered observers.

use std::time::Duration;

use selstat_config::store::load_or;
use selstat_config::{Messages, Settings, SettingsChange, SettingsStore};
use selstat_core::{CellResolver, Notify, SelectionModel, TableSource};

use crate::export::to_tsv;
use crate::format::NumberLocale;
use crate::number::ParseMode;
use crate::stats::{aggregate, classify, status_line, StatsResult};

/// How long hosts show the "copied" confirmation before calling
/// [`InteractionController::copy_feedback_expired`].
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

pub type StatsCallback = Box<dyn FnMut(&StatsResult)>;
pub type CopyCallback = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, meta: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, meta: false, shift: false };
    pub const META: Modifiers = Modifiers { ctrl: false, meta: true, shift: false };

    /// Ctrl or Cmd held: add to the selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Logical key value, e.g. `"c"`.
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerOutcome {
    /// Host should suppress its native text selection until pointer-up.
    pub suppress_native_selection: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The selection was serialized; the host writes it to the clipboard.
    Copied(String),
    Ignored,
}

pub struct InteractionController<H> {
    host: H,
    model: SelectionModel,
    settings: Settings,
    messages: Messages,
    attached: bool,
    suppressing: bool,
    last_stats: StatsResult,
    stats_observers: Vec<StatsCallback>,
    copy_observers: Vec<CopyCallback>,
}

impl<H> InteractionController<H>
where
    H: TableSource + CellResolver,
{
    pub fn new(host: H, settings: Settings) -> Self {
        let attached = settings.enabled;
        Self {
            host,
            model: SelectionModel::new(),
            settings,
            messages: Messages::default(),
            attached,
            suppressing: false,
            last_stats: StatsResult::Empty,
            stats_observers: Vec::new(),
            copy_observers: Vec::new(),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to edit cell text between gestures.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Whether input listeners are active (false while disabled).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_suppressing_native_selection(&self) -> bool {
        self.suppressing
    }

    pub fn last_stats(&self) -> &StatsResult {
        &self.last_stats
    }

    pub fn parse_mode(&self) -> ParseMode {
        ParseMode::from_strict(self.settings.strict_mode)
    }

    pub fn locale(&self) -> NumberLocale {
        NumberLocale::from_tag(&self.settings.locale)
    }

    /// Status bar text for the current stats, or `None` when hidden.
    pub fn status_line(&self) -> Option<String> {
        let display = self.last_stats.display(&self.locale())?;
        Some(status_line(&display, &self.messages))
    }

    pub fn on_selection_changed(&mut self, callback: impl FnMut(&StatsResult) + 'static) {
        self.stats_observers.push(Box::new(callback));
    }

    pub fn on_copy_requested(&mut self, callback: impl FnMut(&str) + 'static) {
        self.copy_observers.push(Box::new(callback));
    }

    pub fn pointer_down(&mut self, target: &H::Target, modifiers: Modifiers) -> PointerOutcome {
        if !self.attached {
            return PointerOutcome::default();
        }

        let Some(cell) = self.host.resolve(target) else {
            // Click outside every cell drops the selection.
            let notify = self.model.clear();
            self.publish(notify);
            return PointerOutcome::default();
        };

        let notify = self.model.begin_selection(cell, modifiers.additive());
        self.publish(notify);

        self.suppressing = self.settings.override_selection;
        PointerOutcome {
            suppress_native_selection: self.suppressing,
        }
    }

    pub fn pointer_move(&mut self, target: &H::Target, modifiers: Modifiers) {
        if !self.attached || !self.model.is_selecting() {
            return;
        }
        let Some(cell) = self.host.resolve(target) else {
            return;
        };

        let notify = self.model.extend_selection(cell, modifiers.additive(), &self.host);
        if notify == Notify::Skip {
            log::debug!("ignoring move into table {:?}", cell.table);
        }
        self.publish(notify);
    }

    pub fn pointer_up(&mut self) {
        if !self.attached || !self.model.is_selecting() {
            return;
        }
        self.suppressing = false;
        let notify = self.model.end_selection();
        self.publish(notify);
    }

    pub fn key_down(&mut self, input: &KeyInput) -> KeyOutcome {
        if !self.attached || !self.settings.smart_copy {
            return KeyOutcome::Ignored;
        }
        if !input.modifiers.additive() || !input.key.eq_ignore_ascii_case("c") {
            return KeyOutcome::Ignored;
        }

        match self.serialize_selection() {
            Some(text) => {
                log::debug!("copying {} cells", self.model.len());
                for observer in &mut self.copy_observers {
                    observer(&text);
                }
                KeyOutcome::Copied(text)
            }
            None => KeyOutcome::Ignored,
        }
    }

    /// TSV of the current selection, or `None` when nothing is selected.
    pub fn serialize_selection(&self) -> Option<String> {
        if self.model.is_empty() {
            return None;
        }
        Some(to_tsv(self.model.selection(), &self.host))
    }

    pub fn clear(&mut self) {
        let notify = self.model.clear();
        self.publish(notify);
    }

    /// Re-run aggregation and notify observers regardless of membership.
    pub fn refresh(&mut self) {
        self.publish(Notify::Publish);
    }

    /// The "copied" confirmation timed out; restore the stats display.
    pub fn copy_feedback_expired(&mut self) {
        self.refresh();
    }

    pub fn set_strict_mode(&mut self, strict: bool) -> SettingsChange {
        let next = Settings {
            strict_mode: strict,
            ..self.settings.clone()
        };
        self.apply_settings(next)
    }

    /// Apply a new configuration snapshot from the settings store.
    ///
    /// Disabling clears the selection and detaches input handling. Changing
    /// strict mode clears the selection so stale numbers are never shown
    /// under different parsing rules.
    pub fn apply_settings(&mut self, settings: Settings) -> SettingsChange {
        let change = Settings::diff(&self.settings, &settings);
        self.settings = settings;

        if change.enabled {
            if self.settings.enabled {
                log::debug!("attaching selection handlers");
                self.attached = true;
            } else {
                log::debug!("detaching selection handlers");
                self.clear();
                self.suppressing = false;
                self.attached = false;
            }
        }

        if self.attached {
            if change.strict_mode {
                self.clear();
            } else if change.locale {
                self.refresh();
            }
        }

        change
    }

    /// Pull settings from a store, keeping the current ones if it is gone.
    pub fn reload_settings(&mut self, store: &dyn SettingsStore) -> SettingsChange {
        let next = load_or(store, &self.settings);
        self.apply_settings(next)
    }

    /// The settings store went away. Keep running on last-known settings.
    pub fn settings_unavailable(&mut self, reason: &str) {
        log::warn!("settings store unavailable ({}); keeping last known settings", reason);
    }

    fn publish(&mut self, notify: Notify) {
        if !notify.should_publish() {
            return;
        }

        let mode = self.parse_mode();
        for (cell, kind) in classify(self.model.selection(), &self.host, mode) {
            self.model.mark_cell_kind(cell.cell, kind);
        }

        self.last_stats = aggregate(self.model.selection(), &self.host, mode);
        for observer in &mut self.stats_observers {
            observer(&self.last_stats);
        }
    }
}
