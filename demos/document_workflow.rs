//! Document Review Workflow
//!
//! This demo shows guards, event parameters, transition actions, and
//! completion through a final state:
//! - `submit` carries the reviewer count as a parameter; a guard rejects
//!   submissions without enough reviewers
//! - entering the `archived` final state stops the machine
//!
//! Run with: cargo run --example document_workflow

use serde_json::json;
use statecraft::{Action, Context, FinalDef, Machine, StateDef, Statechart, TransitionSpec};

fn main() {
    println!("=== Document Review Workflow ===\n");

    let definition = StateDef::new()
        .initial("draft")
        .substate(
            "draft",
            StateDef::new().on(
                "submit",
                TransitionSpec::to("in_review")
                    .when(|ctx| {
                        ctx.get_params()
                            .and_then(|p| p.get("reviewers"))
                            .and_then(|v| v.as_i64())
                            .unwrap_or(0)
                            >= 2
                    })
                    .action(Action::new(|ctx| {
                        let reviewers = ctx
                            .get_params()
                            .and_then(|p| p.get("reviewers"))
                            .cloned()
                            .unwrap_or(json!(0));
                        ctx.put("reviewers", reviewers)
                    })),
            ),
        )
        .substate(
            "in_review",
            StateDef::new()
                .on("approve", "published")
                .on("reject", "draft"),
        )
        .substate("published", StateDef::new().on("archive", "archived"))
        .substate(
            "archived",
            FinalDef::new().entry(Action::new(|ctx| ctx.put("archived", json!(true)))),
        );

    let chart = Statechart::build(definition).expect("definition is valid");
    let machine = Machine::init(chart, Context::new());
    println!("Start:            {:?}", machine.active_leaf());

    // One reviewer is not enough: the guard refuses and nothing changes.
    let machine = machine.dispatch(("submit", json!({ "reviewers": 1 }))).unwrap();
    println!("Weak submit:      {:?} (unchanged)", machine.active_leaf());

    let machine = machine.dispatch(("submit", json!({ "reviewers": 3 }))).unwrap();
    println!("Proper submit:    {:?}", machine.active_leaf());
    println!("Reviewers stored: {}", machine.context().get("reviewers").unwrap());

    let machine = machine.dispatch("approve").unwrap();
    let machine = machine.dispatch("archive").unwrap();
    println!("Archived:         {:?}", machine.active_leaf());
    println!("Still running:    {}", machine.is_running());

    match machine.dispatch("submit") {
        Err(err) => println!("Further dispatch: {err}"),
        Ok(_) => unreachable!("stopped machines reject events"),
    }

    println!("\n=== Demo Complete ===");
}
