//! The shorten flow: `Idle -> Loading -> Ready`, plus the copied window.
//!
//! [`Flow::transition`] is pure: it maps the current flow and one
//! [`FlowEvent`] to the next flow and a list of [`Effect`]s. Scheduling
//! timers, writing to the clipboard and showing notices are left to the caller
//! (see `App::dispatch`), which feeds the outcomes back in as new events.
//!
//! Every Loading phase and every successful copy gets a fresh generation
//! number. Deadline events carry the generation they were scheduled for, and a
//! deadline from a superseded phase is ignored, so a late timer can never
//! resurrect a link after a reset.
use crate::clipboard::ClipboardError;
use crate::notify::{Notice, NoticeKind};
use crate::shortcode::ShortLink;
use crate::util::{validate_input, InputError};
use std::time::Duration;

/// Delay between submitting a link and the fabricated result.
pub const DEFAULT_SHORTEN_DELAY: Duration = Duration::from_millis(1500);

/// How long the copy control shows its "copied" state.
pub const DEFAULT_COPIED_WINDOW: Duration = Duration::from_millis(2000);

/// Where the flow is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Loading {
        cycle: u64,
    },
    Ready {
        link: ShortLink,
        /// Generation of the copy whose window is still open.
        copied: Option<u64>,
    },
}

/// Timer deadlines the flow asks to be woken up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    ShortenComplete { cycle: u64 },
    CopiedExpired { token: u64 },
}

impl Deadline {
    pub fn slot(self) -> TimerSlot {
        match self {
            Self::ShortenComplete { .. } => TimerSlot::Shorten,
            Self::CopiedExpired { .. } => TimerSlot::Copied,
        }
    }
}

/// At most one pending timer exists per slot; scheduling replaces the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    Shorten,
    Copied,
}

/// Inputs to the flow.
#[derive(Debug)]
pub enum FlowEvent {
    /// Submit control or Enter in the input field.
    Submit { input: String },
    /// The loading delay for `cycle` elapsed; `code` is the freshly drawn short code.
    ShortenElapsed { cycle: u64, code: String },
    /// "Shorten another link".
    Reset,
    /// Copy control activated.
    CopyRequested,
    /// Outcome of the clipboard write requested by [`Effect::WriteClipboard`].
    CopyFinished(Result<(), ClipboardError>),
    /// The copied window for `token` elapsed.
    CopiedElapsed { token: u64 },
}

/// Side effects requested by a transition, in the order they should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notice),
    Schedule { deadline: Deadline, after: Duration },
    Cancel(TimerSlot),
    WriteClipboard(String),
    ClearInput,
}

/// Delays used by the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTimings {
    pub shorten_delay: Duration,
    pub copied_window: Duration,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            shorten_delay: DEFAULT_SHORTEN_DELAY,
            copied_window: DEFAULT_COPIED_WINDOW,
        }
    }
}

/// Flow state plus what it needs to build links and stamp generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    state: FlowState,
    generation: u64,
    domain: String,
    timings: FlowTimings,
}

/// Result of [`Flow::transition`].
#[derive(Debug)]
pub struct Transition {
    pub flow: Flow,
    pub effects: Vec<Effect>,
}

impl Flow {
    pub fn new(domain: impl Into<String>, timings: FlowTimings) -> Self {
        Self {
            state: FlowState::Idle,
            generation: 0,
            domain: domain.into(),
            timings,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn timings(&self) -> FlowTimings {
        self.timings
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FlowState::Loading { .. })
    }

    pub fn link(&self) -> Option<&ShortLink> {
        match &self.state {
            FlowState::Ready { link, .. } => Some(link),
            _ => None,
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self.state, FlowState::Ready { copied: Some(_), .. })
    }

    /// Compute the next flow for `event` without touching `self`.
    pub fn transition(&self, event: FlowEvent) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match (event, &self.state) {
            // Submit is a no-op while loading: no transition, no notice.
            (FlowEvent::Submit { .. }, FlowState::Loading { .. }) => {}

            (FlowEvent::Submit { input }, state) => match validate_input(&input) {
                Err(InputError::Missing) => {
                    effects.push(Effect::Notify(NoticeKind::MissingInput.into()));
                }
                Err(InputError::Invalid(_)) => {
                    effects.push(Effect::Notify(NoticeKind::InvalidInput.into()));
                }
                Ok(_) => {
                    if matches!(state, FlowState::Ready { .. }) {
                        effects.push(Effect::Cancel(TimerSlot::Copied));
                    }
                    next.generation += 1;
                    let cycle = next.generation;
                    next.state = FlowState::Loading { cycle };
                    effects.push(Effect::Schedule {
                        deadline: Deadline::ShortenComplete { cycle },
                        after: self.timings.shorten_delay,
                    });
                }
            },

            (FlowEvent::ShortenElapsed { cycle, code }, FlowState::Loading { cycle: current })
                if cycle == *current =>
            {
                next.state = FlowState::Ready {
                    link: ShortLink::new(self.domain.clone(), code),
                    copied: None,
                };
                effects.push(Effect::Notify(NoticeKind::Shortened.into()));
            }
            (FlowEvent::ShortenElapsed { .. }, _) => {}

            (FlowEvent::Reset, FlowState::Ready { .. }) => {
                next.state = FlowState::Idle;
                effects.push(Effect::Cancel(TimerSlot::Copied));
                effects.push(Effect::ClearInput);
            }
            (FlowEvent::Reset, _) => {}

            (FlowEvent::CopyRequested, FlowState::Ready { link, .. }) => {
                effects.push(Effect::WriteClipboard(link.url()));
            }
            (FlowEvent::CopyRequested, _) => {}

            (FlowEvent::CopyFinished(Ok(())), FlowState::Ready { link, .. }) => {
                next.generation += 1;
                let token = next.generation;
                next.state = FlowState::Ready {
                    link: link.clone(),
                    copied: Some(token),
                };
                effects.push(Effect::Notify(NoticeKind::Copied.into()));
                effects.push(Effect::Schedule {
                    deadline: Deadline::CopiedExpired { token },
                    after: self.timings.copied_window,
                });
            }
            (FlowEvent::CopyFinished(Err(_)), FlowState::Ready { link, .. }) => {
                next.state = FlowState::Ready {
                    link: link.clone(),
                    copied: None,
                };
                effects.push(Effect::Cancel(TimerSlot::Copied));
                effects.push(Effect::Notify(NoticeKind::CopyFailed.into()));
            }
            (FlowEvent::CopyFinished(_), _) => {}

            (
                FlowEvent::CopiedElapsed { token },
                FlowState::Ready {
                    link,
                    copied: Some(current),
                },
            ) if token == *current => {
                next.state = FlowState::Ready {
                    link: link.clone(),
                    copied: None,
                };
            }
            (FlowEvent::CopiedElapsed { .. }, _) => {}
        }

        Transition {
            flow: next,
            effects,
        }
    }

    /// Apply `event` in place and return the effects to run.
    pub fn apply(&mut self, event: FlowEvent) -> Vec<Effect> {
        let Transition { flow, effects } = self.transition(event);
        *self = flow;
        effects
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::new(crate::shortcode::DEFAULT_DOMAIN, FlowTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submit(input: &str) -> FlowEvent {
        FlowEvent::Submit {
            input: input.to_string(),
        }
    }

    fn notices(effects: &[Effect]) -> Vec<NoticeKind> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n.kind),
                _ => None,
            })
            .collect()
    }

    fn loading_cycle(flow: &Flow) -> u64 {
        match flow.state() {
            FlowState::Loading { cycle } => *cycle,
            other => panic!("expected Loading, got {:?}", other),
        }
    }

    fn ready_flow(code: &str) -> Flow {
        let mut flow = Flow::default();
        flow.apply(submit("https://example.com/a/b"));
        let cycle = loading_cycle(&flow);
        flow.apply(FlowEvent::ShortenElapsed {
            cycle,
            code: code.to_string(),
        });
        flow
    }

    #[test]
    fn test_starts_idle() {
        let flow = Flow::default();
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(!flow.is_loading());
        assert!(flow.link().is_none());
        assert!(!flow.is_copied());
    }

    #[test]
    fn test_missing_input_notifies_without_transition() {
        for input in ["", "   ", "\t"] {
            let t = Flow::default().transition(submit(input));
            assert_eq!(t.flow.state(), &FlowState::Idle);
            assert_eq!(notices(&t.effects), vec![NoticeKind::MissingInput]);
            assert_eq!(t.effects.len(), 1);
        }
    }

    #[test]
    fn test_invalid_input_notifies_without_transition() {
        for input in ["example", "example.com", "mailto:x@example.com", "http://"] {
            let t = Flow::default().transition(submit(input));
            assert_eq!(t.flow.state(), &FlowState::Idle);
            assert_eq!(notices(&t.effects), vec![NoticeKind::InvalidInput]);
        }
    }

    #[test]
    fn test_valid_submit_enters_loading_and_schedules() {
        let t = Flow::default().transition(submit("https://example.com/a/b"));
        assert_eq!(t.flow.state(), &FlowState::Loading { cycle: 1 });
        assert_eq!(
            t.effects,
            vec![Effect::Schedule {
                deadline: Deadline::ShortenComplete { cycle: 1 },
                after: DEFAULT_SHORTEN_DELAY,
            }]
        );
        assert!(t.flow.is_loading());
        assert!(t.flow.link().is_none());
    }

    #[test]
    fn test_transition_does_not_mutate_source() {
        let flow = Flow::default();
        let _ = flow.transition(submit("https://example.com"));
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_submit_while_loading_is_silent_noop() {
        let mut flow = Flow::default();
        flow.apply(submit("https://example.com"));
        let before = flow.clone();

        let t = flow.transition(submit("https://example.com"));
        assert_eq!(t.flow, before);
        assert!(t.effects.is_empty());

        // Even invalid input raises no notice while loading.
        let t = flow.transition(submit(""));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_elapsed_produces_ready_link() {
        let mut flow = Flow::default();
        flow.apply(submit("https://example.com/a/b"));
        let effects = flow.apply(FlowEvent::ShortenElapsed {
            cycle: 1,
            code: "abc123".into(),
        });

        assert_eq!(notices(&effects), vec![NoticeKind::Shortened]);
        assert!(!flow.is_loading());
        let link = flow.link().unwrap();
        assert_eq!(link.to_string(), "linklux.io/abc123");
        assert_eq!(link.url(), "https://linklux.io/abc123");
    }

    #[test]
    fn test_stale_elapsed_ignored() {
        let mut flow = Flow::default();
        flow.apply(submit("https://example.com"));
        let t = flow.transition(FlowEvent::ShortenElapsed {
            cycle: 99,
            code: "zzzzzz".into(),
        });
        assert!(t.flow.is_loading());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_elapsed_after_reset_does_not_resurrect_link() {
        let mut flow = ready_flow("first1");
        // Start a second cycle, then go back to Ready through a fresh cycle and reset.
        flow.apply(submit("https://example.com/again"));
        let stale_cycle = loading_cycle(&flow);
        flow.apply(submit("https://example.com/again")); // no-op while loading
        flow.apply(FlowEvent::ShortenElapsed {
            cycle: stale_cycle,
            code: "second".into(),
        });
        flow.apply(FlowEvent::Reset);
        assert_eq!(flow.state(), &FlowState::Idle);

        // A duplicate delivery of the old deadline must not bring the link back.
        let effects = flow.apply(FlowEvent::ShortenElapsed {
            cycle: stale_cycle,
            code: "ghost1".into(),
        });
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_resubmit_from_ready_discards_link() {
        let mut flow = ready_flow("abc123");
        let effects = flow.apply(submit("https://example.org"));
        assert!(flow.is_loading());
        assert!(flow.link().is_none());
        assert_eq!(effects[0], Effect::Cancel(TimerSlot::Copied));
        assert!(matches!(
            effects[1],
            Effect::Schedule {
                deadline: Deadline::ShortenComplete { cycle: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_resubmit_from_ready_keeps_link() {
        let mut flow = ready_flow("abc123");
        let effects = flow.apply(submit("nope"));
        assert_eq!(notices(&effects), vec![NoticeKind::InvalidInput]);
        assert_eq!(flow.link().map(|l| l.code()), Some("abc123"));
    }

    #[test]
    fn test_reset_from_ready_clears_everything() {
        let mut flow = ready_flow("abc123");
        flow.apply(FlowEvent::CopyFinished(Ok(())));
        assert!(flow.is_copied());

        let effects = flow.apply(FlowEvent::Reset);
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(!flow.is_copied());
        assert_eq!(
            effects,
            vec![Effect::Cancel(TimerSlot::Copied), Effect::ClearInput]
        );
    }

    #[test]
    fn test_reset_outside_ready_is_noop() {
        let t = Flow::default().transition(FlowEvent::Reset);
        assert!(t.effects.is_empty());

        let mut loading = Flow::default();
        loading.apply(submit("https://example.com"));
        let t = loading.transition(FlowEvent::Reset);
        assert!(t.flow.is_loading());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_copy_requires_link() {
        let t = Flow::default().transition(FlowEvent::CopyRequested);
        assert!(t.effects.is_empty());

        let t = Flow::default().transition(FlowEvent::CopyFinished(Ok(())));
        assert!(t.effects.is_empty());
        assert!(!t.flow.is_copied());
    }

    #[test]
    fn test_copy_writes_fully_qualified_link() {
        let flow = ready_flow("abc123");
        let t = flow.transition(FlowEvent::CopyRequested);
        assert_eq!(
            t.effects,
            vec![Effect::WriteClipboard("https://linklux.io/abc123".into())]
        );
        assert!(!t.flow.is_copied());
    }

    #[test]
    fn test_copy_success_sets_flag_and_schedules_reset() {
        let mut flow = ready_flow("abc123");
        let effects = flow.apply(FlowEvent::CopyFinished(Ok(())));
        assert!(flow.is_copied());
        assert_eq!(notices(&effects), vec![NoticeKind::Copied]);

        let token = match flow.state() {
            FlowState::Ready {
                copied: Some(t), ..
            } => *t,
            other => panic!("unexpected {:?}", other),
        };
        assert!(effects.contains(&Effect::Schedule {
            deadline: Deadline::CopiedExpired { token },
            after: DEFAULT_COPIED_WINDOW,
        }));

        flow.apply(FlowEvent::CopiedElapsed { token });
        assert!(!flow.is_copied());
        assert!(flow.link().is_some());
    }

    #[test]
    fn test_repeat_copy_restarts_window() {
        let mut flow = ready_flow("abc123");
        flow.apply(FlowEvent::CopyFinished(Ok(())));
        let first = match flow.state() {
            FlowState::Ready { copied, .. } => copied.unwrap(),
            _ => unreachable!(),
        };
        flow.apply(FlowEvent::CopyFinished(Ok(())));

        // The first window's deadline no longer clears the flag.
        flow.apply(FlowEvent::CopiedElapsed { token: first });
        assert!(flow.is_copied());
    }

    #[test]
    fn test_copy_failure_notifies_and_clears_flag() {
        let mut flow = ready_flow("abc123");
        flow.apply(FlowEvent::CopyFinished(Ok(())));
        let effects = flow.apply(FlowEvent::CopyFinished(Err(ClipboardError::Unavailable(
            "no display".into(),
        ))));
        assert!(!flow.is_copied());
        assert_eq!(notices(&effects), vec![NoticeKind::CopyFailed]);
        assert!(effects.contains(&Effect::Cancel(TimerSlot::Copied)));
    }

    #[test]
    fn test_custom_domain_and_timings() {
        let timings = FlowTimings {
            shorten_delay: Duration::from_millis(10),
            copied_window: Duration::from_millis(20),
        };
        let mut flow = Flow::new("go.example", timings);
        let effects = flow.apply(submit("https://example.com"));
        assert_eq!(
            effects,
            vec![Effect::Schedule {
                deadline: Deadline::ShortenComplete { cycle: 1 },
                after: Duration::from_millis(10),
            }]
        );
        flow.apply(FlowEvent::ShortenElapsed {
            cycle: 1,
            code: "x1y2z3".into(),
        });
        assert_eq!(flow.link().unwrap().url(), "https://go.example/x1y2z3");
    }

    #[test]
    fn test_deadline_slots() {
        assert_eq!(
            Deadline::ShortenComplete { cycle: 3 }.slot(),
            TimerSlot::Shorten
        );
        assert_eq!(Deadline::CopiedExpired { token: 3 }.slot(), TimerSlot::Copied);
    }
}
