//! The machine interpreter.
//!
//! A [`Machine`] owns the current configuration, the user context, the
//! pending internal event queue, and the macrostep trace. It advances in
//! run-to-completion steps: every external event is processed, and every
//! internal event it raises is drained, before the next external event is
//! accepted.
//!
//! The interpreter is value-oriented: [`Machine::init`] and
//! [`Machine::dispatch`] return a fresh machine and leave their input
//! untouched. There is no shared state, no suspension, and no timer; a
//! dispatch runs to quiescence on the calling thread.

mod error;
mod snapshot;
mod trace;

pub use error::MachineError;
pub use snapshot::{MachineSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use trace::{Macrostep, Microstep, TransitionRecord};

use crate::chart::{CompiledTransition, Statechart, ROOT};
use crate::core::{Context, Event};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// The event that stops the machine: completion of a final child of root.
const DONE_ROOT: &str = "done.state.root";

/// A running statechart instance.
///
/// # Example
///
/// ```rust
/// use statecraft::{Context, Machine, StateDef, Statechart};
///
/// let chart = Statechart::build(
///     StateDef::new()
///         .initial("off")
///         .substate("off", StateDef::new().on("toggle", "on"))
///         .substate("on", StateDef::new().on("toggle", "off")),
/// )
/// .unwrap();
///
/// let machine = Machine::init(chart, Context::new());
/// assert_eq!(machine.active_states(), ["off", "root"]);
///
/// let machine = machine.dispatch("toggle").unwrap();
/// assert_eq!(machine.active_states(), ["on", "root"]);
/// ```
#[derive(Clone, Debug)]
pub struct Machine {
    chart: Statechart,
    /// Branches of active states, leaf first, root last. Exactly one branch
    /// in this core; the outer list anticipates orthogonal regions.
    configuration: Vec<Vec<String>>,
    running: bool,
    /// Newest first.
    macrosteps: Vec<Macrostep>,
    /// Pending internal events, FIFO.
    queue: VecDeque<Event>,
    context: Context,
    /// Last active sub-configuration below each exited history-carrying
    /// composite, leaf first. Recorded for resume; not consumed by this core.
    state_histories: IndexMap<String, Vec<String>>,
}

impl Machine {
    /// Create a running machine from a compiled chart and an initial context.
    ///
    /// Enters the chart along root's initial chain, runs the entry actions,
    /// and drains any internal events those actions raised. The returned
    /// machine holds one macrostep covering this initialization.
    pub fn init(chart: Statechart, context: Context) -> Machine {
        let mut machine = Machine {
            chart,
            configuration: Vec::new(),
            running: false,
            macrosteps: vec![Macrostep::open(None)],
            queue: VecDeque::new(),
            context,
            state_histories: IndexMap::new(),
        };

        let entered = machine.chart.initial_chain(ROOT);
        let target = entered.last().cloned().unwrap_or_else(|| ROOT.to_string());
        let actions = machine.chart.entry_actions(&entered);
        machine.apply_microstep(Microstep {
            transition: Some(TransitionRecord { name: None, target }),
            params: None,
            entered,
            exited: Vec::new(),
            actions,
        });

        // Running before the drain so an initial chain that lands on a
        // top-level final state leaves the machine stopped.
        machine.running = true;
        machine.drain_internal();
        debug!(leaf = machine.active_leaf().unwrap_or(ROOT), "machine initialized");
        machine
    }

    /// Process one external event to quiescence, returning the new machine.
    ///
    /// Opens a fresh macrostep, runs the transition the event selects (if
    /// any), then drains internally raised events in FIFO order into the
    /// same macrostep. An event no state handles leaves configuration,
    /// context, and `running` untouched.
    ///
    /// # Errors
    ///
    /// [`MachineError::NotRunning`] when the machine has already reached a
    /// top-level final state.
    pub fn dispatch(&self, event: impl Into<Event>) -> Result<Machine, MachineError> {
        if !self.running {
            return Err(MachineError::NotRunning);
        }
        let event = event.into();
        debug!(event = event.name(), "dispatch");

        let mut next = self.clone();
        next.macrosteps.insert(0, Macrostep::open(Some(event.clone())));
        next.do_transition(event);
        next.drain_internal();
        Ok(next)
    }

    /// The macrostep opened by the most recent `init`/`dispatch`.
    pub fn last_macrostep(&self) -> Option<&Macrostep> {
        self.macrosteps.first()
    }

    /// Microsteps of the most recent macrostep, in execution order.
    pub fn last_microsteps(&self) -> &[Microstep] {
        self.macrosteps
            .first()
            .map(|m| m.microsteps.as_slice())
            .unwrap_or(&[])
    }

    /// Transitions taken by the most recent macrostep.
    pub fn last_transitions(&self) -> &[TransitionRecord] {
        self.macrosteps
            .first()
            .map(|m| m.transitions.as_slice())
            .unwrap_or(&[])
    }

    /// The active branch, leaf first, root last.
    pub fn active_states(&self) -> &[String] {
        self.configuration
            .first()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The deepest active state.
    pub fn active_leaf(&self) -> Option<&str> {
        self.active_states().first().map(String::as_str)
    }

    /// All branches of the configuration (a single branch in this core).
    pub fn configuration(&self) -> &[Vec<String>] {
        &self.configuration
    }

    /// The user context. Reserved engine keys are never present here
    /// between dispatches.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Whether the machine still accepts events.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The compiled chart this machine runs.
    pub fn chart(&self) -> &Statechart {
        &self.chart
    }

    /// All macrosteps, newest first.
    pub fn macrosteps(&self) -> &[Macrostep] {
        &self.macrosteps
    }

    /// The sub-configuration recorded when the history-carrying composite
    /// `name` was last exited, leaf first.
    pub fn saved_history(&self, name: &str) -> Option<&[String]> {
        self.state_histories.get(name).map(Vec::as_slice)
    }

    /// Run one transition step for `event`, appending its microstep (if a
    /// transition fires) to the head macrostep.
    fn do_transition(&mut self, event: Event) {
        if event.name() == DONE_ROOT {
            debug!("top-level final state reached, stopping");
            self.running = false;
            return;
        }

        // Params are visible to guards and actions for this microstep only.
        if let Some(params) = event.params() {
            let params = params.clone();
            self.update_context(|ctx| ctx.put_params(params));
        }

        if let Some(transition) = self.select_transition(&event) {
            trace!(
                event = event.name(),
                to = transition.target.as_str(),
                "transition selected"
            );
            let source = self
                .active_leaf()
                .map(str::to_string)
                .unwrap_or_else(|| ROOT.to_string());
            let lcca = self.chart.lcca(&[&source, &transition.target]);
            let exited = self.chart.exiting_states(&source, lcca.as_deref());
            let entered = self
                .chart
                .entering_states(&transition.target, lcca.as_deref());

            let mut actions = self.chart.exit_actions(&exited);
            if let Some(action) = &transition.action {
                actions.push(action.clone());
            }
            actions.extend(self.chart.entry_actions(&entered));

            self.apply_microstep(Microstep {
                transition: Some(TransitionRecord {
                    name: Some(transition.name.clone()),
                    target: transition.target.clone(),
                }),
                params: event.params().cloned(),
                entered,
                exited,
                actions,
            });
        } else {
            trace!(event = event.name(), "no transition fired");
        }

        self.update_context(Context::delete_params);
    }

    /// Walk the active branch from leaf to root looking for a transition on
    /// `event`. A guarded transition whose guard refuses does not stop the
    /// walk; the search continues on the ancestors.
    fn select_transition(&self, event: &Event) -> Option<CompiledTransition> {
        let branch = self.configuration.first()?;
        for state in branch {
            if let Some(transition) = self.chart.transition_for(state, event.name()) {
                match &transition.guard {
                    None => return Some(transition.clone()),
                    Some(guard) if guard.check(&self.context) => return Some(transition.clone()),
                    Some(_) => {}
                }
            }
        }
        None
    }

    /// Fold one microstep into the machine: new configuration, history
    /// bookkeeping, trace, actions, completion events, queue extraction.
    fn apply_microstep(&mut self, microstep: Microstep) {
        let Some(leaf) = microstep.entered.last().cloned() else {
            return;
        };

        let old_branch = self.configuration.first().cloned().unwrap_or_default();

        let mut branch = vec![leaf.clone()];
        branch.extend(self.chart.ancestors(&leaf));
        self.configuration = vec![branch];

        for name in &microstep.exited {
            if self.chart.node(name).is_some_and(|node| node.has_history) {
                let below: Vec<String> = old_branch
                    .iter()
                    .take_while(|state| *state != name)
                    .cloned()
                    .collect();
                self.state_histories.insert(name.clone(), below);
            }
        }

        if let Some(head) = self.macrosteps.first_mut() {
            head.absorb(microstep.clone());
        }

        let mut ctx = std::mem::take(&mut self.context);
        for action in &microstep.actions {
            ctx = action.apply(ctx);
        }

        // Entering a final state completes its parent.
        if let Some(node) = self.chart.node(&leaf) {
            if node.is_final() {
                if let Some(parent) = &node.parent {
                    ctx = ctx.raise_event(Event::done_state(parent));
                }
            }
        }

        let (ctx, raised) = ctx.take_events();
        self.context = ctx;
        self.queue.extend(raised);
    }

    /// Drain the internal queue in FIFO order. Each event's microstep lands
    /// in the same (head) macrostep. Stops when the queue is empty or the
    /// machine reaches a top-level final state. There is no step bound:
    /// quiescence is the author's responsibility.
    fn drain_internal(&mut self) {
        while self.running {
            let Some(event) = self.queue.pop_front() else {
                break;
            };
            self.do_transition(event);
        }
    }

    fn update_context(&mut self, f: impl FnOnce(Context) -> Context) {
        let ctx = std::mem::take(&mut self.context);
        self.context = f(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::definition::{FinalDef, StateDef, TransitionSpec};
    use serde_json::json;

    fn set(key: &'static str, value: i64) -> Action {
        Action::new(move |ctx| ctx.put(key, json!(value)))
    }

    fn raise(event: &'static str) -> Action {
        Action::new(move |ctx| ctx.raise_event(event))
    }

    #[test]
    fn init_enters_the_initial_chain() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new())
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());

        assert_eq!(machine.configuration(), [["s1", ROOT]]);
        assert_eq!(machine.context(), &Context::new());
        assert!(machine.is_running());
        assert_eq!(machine.macrosteps().len(), 1);
    }

    #[test]
    fn entry_raised_event_fires_within_the_init_macrostep() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(raise("evt")).on("evt", "s2"))
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());

        assert_eq!(machine.configuration(), [["s2", ROOT]]);
        assert_eq!(machine.macrosteps().len(), 1);
        assert_eq!(machine.last_microsteps().len(), 2);
    }

    #[test]
    fn dispatch_changes_state_and_runs_entries() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(set("foo", 1)).on("e1", "s2"))
                .substate("s2", StateDef::new().entry(set("foo", 2)).on("e2", "s1")),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new().put("foo", json!(0)));
        assert_eq!(machine.context().get("foo"), Some(&json!(1)));

        let machine = machine.dispatch("e1").unwrap();
        assert_eq!(machine.configuration(), [["s2", ROOT]]);
        assert_eq!(machine.context(), &Context::new().put("foo", json!(2)));

        let machine = machine.dispatch("e2").unwrap();
        assert_eq!(machine.configuration(), [["s1", ROOT]]);
        assert_eq!(machine.context(), &Context::new().put("foo", json!(1)));
    }

    #[test]
    fn unhandled_event_leaves_the_machine_unchanged() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(set("foo", 1)).on("e1", "s2"))
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let after = machine.dispatch("unknown").unwrap();

        assert_eq!(after.configuration(), machine.configuration());
        assert_eq!(after.context(), machine.context());
        assert!(after.is_running());
        assert!(after.last_transitions().is_empty());
        assert!(after.last_microsteps().is_empty());
    }

    #[test]
    fn run_to_completion_chain_drains_in_one_macrostep() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(set("foo", 1)).on("e1", "s2"))
                .substate("s2", StateDef::new().entry(raise("e2")).on("e2", "s3"))
                .substate("s3", StateDef::new().entry(raise("e3")).on("e3", "s4"))
                .substate("s4", StateDef::new().entry(set("foo", 4))),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new().put("foo", json!(0)));
        let machine = machine.dispatch("e1").unwrap();

        assert_eq!(machine.configuration(), [["s4", ROOT]]);
        assert_eq!(machine.context(), &Context::new().put("foo", json!(4)));
        assert_eq!(machine.last_microsteps().len(), 3);
        let names: Vec<_> = machine
            .last_transitions()
            .iter()
            .filter_map(|t| t.name.as_deref())
            .collect();
        assert_eq!(names, ["e1", "e2", "e3"]);
    }

    #[test]
    fn exit_runs_before_transition_action_before_entry() {
        let log = |tag: &'static str| {
            Action::new(move |ctx: Context| {
                let mut entries = ctx
                    .get("log")
                    .and_then(|v| v.as_array().cloned())
                    .unwrap_or_default();
                entries.push(json!(tag));
                ctx.put("log", json!(entries))
            })
        };

        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate(
                    "s1",
                    StateDef::new()
                        .entry(log("enter s1"))
                        .exit(log("exit s1"))
                        .on("e1", TransitionSpec::to("s2").action(log("action e1"))),
                )
                .substate("s2", StateDef::new().entry(log("enter s2"))),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch("e1").unwrap();

        assert_eq!(
            machine.context().get("log"),
            Some(&json!(["enter s1", "exit s1", "action e1", "enter s2"]))
        );
    }

    #[test]
    fn counters_follow_exit_action_entry_order() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate(
                    "s1",
                    StateDef::new()
                        .entry(set("foo", 1))
                        .exit(set("bar", 1))
                        .on("e1", TransitionSpec::to("s2").action(set("baz", 1))),
                )
                .substate(
                    "s2",
                    StateDef::new()
                        .entry(set("foo", 2))
                        .exit(set("bar", 2))
                        .on("e2", TransitionSpec::to("s1").action(set("baz", 2))),
                ),
        )
        .unwrap();

        let initial = Context::new()
            .put("foo", json!(0))
            .put("bar", json!(0))
            .put("baz", json!(0));
        let machine = Machine::init(chart, initial);
        assert_eq!(
            machine.context(),
            &Context::new()
                .put("foo", json!(1))
                .put("bar", json!(0))
                .put("baz", json!(0))
        );

        let machine = machine.dispatch("e1").unwrap();
        assert_eq!(
            machine.context(),
            &Context::new()
                .put("foo", json!(2))
                .put("bar", json!(1))
                .put("baz", json!(1))
        );
    }

    #[test]
    fn top_level_final_state_stops_the_machine() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(set("foo", 1)).on("e1", "exit"))
                .substate("exit", FinalDef::new().entry(set("bar", 2))),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new().put("foo", json!(0)));
        let machine = machine.dispatch("e1").unwrap();

        assert_eq!(machine.configuration(), [["exit", ROOT]]);
        assert_eq!(
            machine.context(),
            &Context::new().put("foo", json!(1)).put("bar", json!(2))
        );
        assert!(!machine.is_running());
        assert_eq!(machine.dispatch("e1").unwrap_err(), MachineError::NotRunning);
    }

    #[test]
    fn nested_final_state_raises_done_for_its_parent() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .on("done.state.s1", "s2")
                .substate(
                    "s1",
                    StateDef::new()
                        .initial("s11")
                        .substate("s11", StateDef::new().on("e1", "exit"))
                        .substate("exit", FinalDef::new().entry(set("bar", 0))),
                )
                .substate("s2", StateDef::new().entry(set("foo", 2))),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new().put("foo", json!(11)));
        assert_eq!(machine.configuration(), [["s11", "s1", ROOT]]);

        let machine = machine.dispatch("e1").unwrap();
        assert_eq!(machine.configuration(), [["s2", ROOT]]);
        assert_eq!(
            machine.context(),
            &Context::new().put("foo", json!(2)).put("bar", json!(0))
        );
        assert!(machine.is_running());
    }

    #[test]
    fn dispatch_leaves_the_input_machine_untouched() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(set("foo", 1)).on("e1", "s2"))
                .substate("s2", StateDef::new().entry(set("foo", 2))),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let _after = machine.dispatch("e1").unwrap();

        assert_eq!(machine.configuration(), [["s1", ROOT]]);
        assert_eq!(machine.macrosteps().len(), 1);
    }

    #[test]
    fn guard_refusal_lets_ancestors_handle_the_event() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .on("e1", "s3")
                .substate(
                    "s1",
                    StateDef::new().on(
                        "e1",
                        TransitionSpec::to("s2").when(|ctx| ctx.get("go") == Some(&json!(true))),
                    ),
                )
                .substate("s2", StateDef::new())
                .substate("s3", StateDef::new()),
        )
        .unwrap();

        // Guard refuses: the walk continues and root's transition fires.
        let machine = Machine::init(chart.clone(), Context::new());
        let machine = machine.dispatch("e1").unwrap();
        assert_eq!(machine.configuration(), [["s3", ROOT]]);

        // Guard accepts: the leaf's transition wins.
        let machine = Machine::init(chart, Context::new().put("go", json!(true)));
        let machine = machine.dispatch("e1").unwrap();
        assert_eq!(machine.configuration(), [["s2", ROOT]]);
    }

    #[test]
    fn all_guards_refusing_is_a_silent_no_op() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate(
                    "s1",
                    StateDef::new().on("e1", TransitionSpec::to("s2").when(|_| false)),
                )
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let after = machine.dispatch("e1").unwrap();

        assert_eq!(after.configuration(), [["s1", ROOT]]);
        assert!(after.last_transitions().is_empty());
    }

    #[test]
    fn guards_and_actions_see_event_params() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate(
                    "s1",
                    StateDef::new().on(
                        "pay",
                        TransitionSpec::to("s2")
                            .when(|ctx| {
                                ctx.get_params()
                                    .and_then(|p| p.get("amount"))
                                    .and_then(|v| v.as_i64())
                                    .unwrap_or(0)
                                    > 0
                            })
                            .action(Action::new(|ctx| {
                                let amount = ctx
                                    .get_params()
                                    .and_then(|p| p.get("amount"))
                                    .cloned()
                                    .unwrap_or(json!(0));
                                ctx.put("paid", amount)
                            })),
                    ),
                )
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart.clone(), Context::new());
        let machine = machine.dispatch(("pay", json!({ "amount": 40 }))).unwrap();
        assert_eq!(machine.configuration(), [["s2", ROOT]]);
        assert_eq!(machine.context(), &Context::new().put("paid", json!(40)));

        // Zero amount: guard refuses, nothing fires, params are stripped.
        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch(("pay", json!({ "amount": 0 }))).unwrap();
        assert_eq!(machine.configuration(), [["s1", ROOT]]);
        assert_eq!(machine.context(), &Context::new());
    }

    #[test]
    fn params_are_recorded_on_the_microstep() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().on("go", "s2"))
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch(("go", json!({ "n": 1 }))).unwrap();

        let microstep = &machine.last_microsteps()[0];
        assert_eq!(microstep.params, Some(json!({ "n": 1 })));
        assert_eq!(microstep.exited, ["s1"]);
        assert_eq!(microstep.entered, ["s2"]);
    }

    #[test]
    fn transition_between_nested_branches_exits_to_the_lcca() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("a")
                .substate(
                    "a",
                    StateDef::new()
                        .initial("a1")
                        .substate("a1", StateDef::new().on("cross", "b2")),
                )
                .substate(
                    "b",
                    StateDef::new()
                        .initial("b1")
                        .substate("b1", StateDef::new())
                        .substate("b2", StateDef::new()),
                ),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch("cross").unwrap();

        assert_eq!(machine.configuration(), [["b2", "b", ROOT]]);
        let microstep = &machine.last_microsteps()[0];
        assert_eq!(microstep.exited, ["a1", "a"]);
        assert_eq!(microstep.entered, ["b", "b2"]);
    }

    #[test]
    fn self_transition_exits_and_reenters_the_state() {
        let chart = Statechart::build(
            StateDef::new().initial("s1").substate(
                "s1",
                StateDef::new()
                    .entry(Action::new(|ctx| {
                        let n = ctx.get("entries").and_then(|v| v.as_i64()).unwrap_or(0);
                        ctx.put("entries", json!(n + 1))
                    }))
                    .exit(Action::new(|ctx| {
                        let n = ctx.get("exits").and_then(|v| v.as_i64()).unwrap_or(0);
                        ctx.put("exits", json!(n + 1))
                    }))
                    .on("again", "s1"),
            ),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch("again").unwrap();

        assert_eq!(machine.configuration(), [["s1", ROOT]]);
        assert_eq!(machine.context().get("entries"), Some(&json!(2)));
        assert_eq!(machine.context().get("exits"), Some(&json!(1)));
    }

    #[test]
    fn exiting_a_history_composite_records_its_configuration() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("work")
                .substate(
                    "work",
                    StateDef::new()
                        .initial("w1")
                        .substate("w1", StateDef::new().on("next", "w2"))
                        .substate("w2", StateDef::new())
                        .substate("h", crate::definition::HistoryDef::deep())
                        .on("pause", "idle"),
                )
                .substate("idle", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        let machine = machine.dispatch("next").unwrap();
        assert_eq!(machine.configuration(), [["w2", "work", ROOT]]);

        let machine = machine.dispatch("pause").unwrap();
        assert_eq!(machine.configuration(), [["idle", ROOT]]);
        assert_eq!(machine.saved_history("work"), Some(["w2".to_string()].as_slice()));
    }

    #[test]
    fn internal_queue_is_empty_between_dispatches() {
        let chart = Statechart::build(
            StateDef::new()
                .initial("s1")
                .substate("s1", StateDef::new().entry(raise("e2")).on("e1", "s1").on("e2", "s2"))
                .substate("s2", StateDef::new()),
        )
        .unwrap();

        let machine = Machine::init(chart, Context::new());
        assert!(machine.queue.is_empty());
        assert!(!machine.context().contains(crate::core::QUEUE_KEY));
        assert!(!machine.context().contains(crate::core::PARAMS_KEY));
    }
}
