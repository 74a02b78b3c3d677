//! The boundary between the session and whatever displays it.
//!
//! A host shows three selection controls and one results container. The
//! session pushes snapshots to it; the host never reads session state
//! directly.

use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::state::{CascadeState, Generation, Slot};
use crate::types::{
    CategoryId, ColorId, FilterValue, ManufacturerId, OptionEntry, OptionSet, ResultSet,
};

use super::notice::Notice;

/// Receives UI updates from a session.
pub trait HostView {
    /// Redraw the three controls.
    fn render_controls(&mut self, controls: &ControlsView);

    /// Replace the results container with `results`.
    fn render_results(&mut self, results: &ResultSet);

    /// Show a non-blocking notice.
    fn notify(&mut self, notice: &Notice);
}

/// Snapshot of one selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView<T> {
    pub slot: Slot,
    pub value: FilterValue<T>,
    pub enabled: bool,
    /// The fetched options, without the implicit `all` entry.
    pub options: Vec<OptionEntry<T>>,
}

impl<T: Clone + PartialEq> ControlView<T> {
    fn new(
        slot: Slot,
        value: FilterValue<T>,
        enabled: bool,
        options: Option<&OptionSet<T>>,
    ) -> Self {
        let options = options.map(|set| set.entries().to_vec());
        ControlView {
            slot,
            value,
            enabled,
            options: options.unwrap_or_default(),
        }
    }

    /// The display name of the selected option, if it has one.
    pub fn selected_name(&self) -> Option<&str> {
        let id = self.value.id()?;
        self.options
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.name.as_str())
    }
}

impl<T: fmt::Display + Clone + PartialEq> fmt::Display for ControlView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} = {}", self.slot.name(), self.value)?;
        if let Some(name) = self.selected_name() {
            write!(f, " ({})", name)?;
        }
        if !self.enabled {
            return f.write_str("  [disabled]");
        }

        f.write_str("  options: all")?;
        for entry in &self.options {
            write!(f, ", {} {}", entry.id, entry.name)?;
        }
        Ok(())
    }
}

/// Snapshot of all three controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub generation: Generation,
    pub category: ControlView<CategoryId>,
    pub manufacturer: ControlView<ManufacturerId>,
    pub color: ControlView<ColorId>,
}

impl ControlsView {
    pub fn from_state(state: &CascadeState) -> Self {
        ControlsView {
            generation: state.generation(),
            category: ControlView::new(
                Slot::Category,
                state.category().value,
                state.category().enabled,
                state.categories(),
            ),
            manufacturer: ControlView::new(
                Slot::Manufacturer,
                state.manufacturer().value,
                state.manufacturer().enabled,
                Some(state.manufacturers()),
            ),
            color: ControlView::new(
                Slot::Color,
                state.color().value,
                state.color().enabled,
                Some(state.colors()),
            ),
        }
    }
}

impl fmt::Display for ControlsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.category)?;
        writeln!(f, "{}", self.manufacturer)?;
        write!(f, "{}", self.color)
    }
}

/// A host that writes plain text to a stream, typically stdout.
#[derive(Debug)]
pub struct TerminalHost<W> {
    out: W,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        TerminalHost { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(text).and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> HostView for TerminalHost<W> {
    fn render_controls(&mut self, controls: &ControlsView) {
        self.emit(format_args!("{}\n", controls));
    }

    fn render_results(&mut self, results: &ResultSet) {
        if results.is_empty() {
            self.emit(format_args!("--- results ---\n(no results)\n"));
        } else {
            self.emit(format_args!("--- results ---\n{}\n", results.as_str().trim_end()));
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.emit(format_args!("! {}\n", notice));
    }
}
