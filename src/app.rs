use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::editor::LineEditor;
use crate::flow::{Deadline, Effect, Flow, FlowEvent, FlowState, TimerSlot};
use crate::keybindings::KeybindingRegistry;
use crate::notify::Toaster;
use crate::shortcode::CodeSource;
use crate::theme::{StyleMap, ThemeVariant};
use crate::timer::{Scheduler, TimerHandle};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::collections::{HashMap, VecDeque};

// ============================================================================
// Events and Focus
// ============================================================================

/// Events delivered to the UI loop from outside the key stream.
#[derive(Debug)]
pub enum AppEvent {
    /// A scheduled timer fired.
    Deadline(Deadline),
}

/// Which control Enter activates.
///
/// The result controls are only focusable while a short link is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Copy,
    Another,
}

/// Number of frames in the loading spinner animation.
pub const SPINNER_FRAMES: usize = 10;

// ============================================================================
// Capabilities
// ============================================================================

/// Environment the app runs against: timers, clipboard and short codes.
pub struct Capabilities {
    pub scheduler: Box<dyn Scheduler>,
    pub clipboard: Box<dyn Clipboard>,
    pub codes: Box<dyn CodeSource>,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state: the flow, the link field, toasts and chrome.
pub struct App {
    pub flow: Flow,
    pub input: LineEditor,
    pub toasts: Toaster,
    pub focus: Focus,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI State
    pub show_help: bool,
    pub help_scroll_offset: usize,
    /// Terminal area of the last draw.
    pub viewport: Rect,
    pub needs_redraw: bool,
    pub spinner_frame: usize,

    scheduler: Box<dyn Scheduler>,
    clipboard: Box<dyn Clipboard>,
    codes: Box<dyn CodeSource>,
    /// Pending timer per slot; scheduling into a slot cancels its predecessor.
    timers: HashMap<TimerSlot, TimerHandle>,
}

impl App {
    pub fn new(config: &Config, capabilities: Capabilities) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!("{}", warning);
        }

        Self {
            flow: Flow::new(config.domain.trim(), config.flow_timings()),
            input: LineEditor::new(config.max_input_length),
            toasts: Toaster::new(config.toast_limit, config.toast_duration()),
            focus: Focus::Input,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            show_help: false,
            help_scroll_offset: 0,
            viewport: Rect::new(0, 0, 80, 24),
            needs_redraw: true,
            spinner_frame: 0,
            scheduler: capabilities.scheduler,
            clipboard: capabilities.clipboard,
            codes: capabilities.codes,
            timers: HashMap::new(),
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and return its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------------
    // Flow driving
    // ------------------------------------------------------------------------

    /// Feed an event to the flow and run the resulting effects.
    ///
    /// Effects that produce follow-up events (the clipboard write) are queued and
    /// processed in order, so the flow always sees events one at a time.
    pub fn dispatch(&mut self, event: FlowEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let before = state_name(self.flow.state());
            let effects = self.flow.apply(event);
            let after = state_name(self.flow.state());
            if before != after {
                tracing::debug!(from = before, to = after, "Flow transition");
            }

            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    queue.push_back(follow_up);
                }
            }
        }

        if self.flow.link().is_none() {
            self.focus = Focus::Input;
        }
        self.needs_redraw = true;
    }

    fn run_effect(&mut self, effect: Effect) -> Option<FlowEvent> {
        match effect {
            Effect::Notify(notice) => {
                self.toasts.push(notice);
                None
            }
            Effect::Schedule { deadline, after } => {
                let handle = self.scheduler.after(after, deadline);
                if let Some(previous) = self.timers.insert(deadline.slot(), handle) {
                    previous.cancel();
                }
                None
            }
            Effect::Cancel(slot) => {
                if let Some(handle) = self.timers.remove(&slot) {
                    handle.cancel();
                }
                None
            }
            Effect::WriteClipboard(text) => {
                let result = self.clipboard.write(&text);
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "Clipboard write failed");
                }
                Some(FlowEvent::CopyFinished(result))
            }
            Effect::ClearInput => {
                self.input.clear();
                None
            }
        }
    }

    /// Submit the current link field.
    pub fn submit(&mut self) {
        let input = self.input.text().to_owned();
        self.dispatch(FlowEvent::Submit { input });
    }

    pub fn copy(&mut self) {
        self.dispatch(FlowEvent::CopyRequested);
    }

    pub fn shorten_another(&mut self) {
        self.dispatch(FlowEvent::Reset);
    }

    /// Handle a timer that fired.
    pub fn on_deadline(&mut self, deadline: Deadline) {
        match deadline {
            Deadline::ShortenComplete { cycle } => {
                // Only draw a code for the cycle that is still loading.
                if !matches!(self.flow.state(), FlowState::Loading { cycle: c } if *c == cycle) {
                    tracing::debug!(cycle, "Ignoring stale shorten timer");
                    return;
                }
                let code = self.codes.next_code();
                tracing::info!(cycle, code = %code, "Fabricated short code");
                self.dispatch(FlowEvent::ShortenElapsed { cycle, code });
            }
            Deadline::CopiedExpired { token } => {
                self.dispatch(FlowEvent::CopiedElapsed { token });
            }
        }
    }

    /// Activate whichever control has focus.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Input => self.submit(),
            Focus::Copy => self.copy(),
            Focus::Another => self.shorten_another(),
        }
    }

    // ------------------------------------------------------------------------
    // Focus and input
    // ------------------------------------------------------------------------

    pub fn focus_next(&mut self) {
        self.focus = match (self.flow.link().is_some(), self.focus) {
            (false, _) => Focus::Input,
            (true, Focus::Input) => Focus::Copy,
            (true, Focus::Copy) => Focus::Another,
            (true, Focus::Another) => Focus::Input,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match (self.flow.link().is_some(), self.focus) {
            (false, _) => Focus::Input,
            (true, Focus::Input) => Focus::Another,
            (true, Focus::Copy) => Focus::Input,
            (true, Focus::Another) => Focus::Copy,
        };
    }

    /// The link field is read-only while a shorten is in flight.
    pub fn input_enabled(&self) -> bool {
        !self.flow.is_loading()
    }

    /// Apply `edit` to the link field unless it is disabled.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut LineEditor)) {
        if self.input_enabled() {
            edit(&mut self.input);
            self.needs_redraw = true;
        }
    }

    /// Close the help overlay, or failing that dismiss all toasts.
    pub fn dismiss(&mut self) {
        if self.show_help {
            self.show_help = false;
            self.help_scroll_offset = 0;
        } else {
            self.toasts.dismiss_all();
        }
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Periodic work
    // ------------------------------------------------------------------------

    /// Expire toasts and advance the spinner. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.toasts.clear_expired();
        if self.flow.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
            changed = true;
        }
        if changed {
            self.needs_redraw = true;
        }
        changed
    }
}

fn state_name(state: &FlowState) -> &'static str {
    match state {
        FlowState::Idle => "idle",
        FlowState::Loading { .. } => "loading",
        FlowState::Ready { copied: None, .. } => "ready",
        FlowState::Ready {
            copied: Some(_), ..
        } => "ready+copied",
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort pending timers so no task outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        for (slot, handle) in self.timers.drain() {
            handle.cancel();
            tracing::debug!(?slot, "Cancelled timer on App drop");
        }
    }
}
