//! Hierarchical Traffic Light
//!
//! This demo shows nesting and completion events:
//! - A composite `operational` state containing the red/green/yellow cycle
//! - A transition declared on the composite (power cut from any inner state)
//! - An internal event chain stabilising within a single dispatch
//!
//! Run with: cargo run --example traffic_light

use serde_json::json;
use statecraft::{Action, Context, Machine, StateDef, Statechart};

fn count(key: &'static str) -> Action {
    Action::new(move |ctx| {
        let n = ctx.get(key).and_then(|v| v.as_i64()).unwrap_or(0);
        ctx.put(key, json!(n + 1))
    })
}

fn main() {
    println!("=== Hierarchical Traffic Light ===\n");

    let definition = StateDef::new()
        .initial("operational")
        .substate(
            "operational",
            StateDef::new()
                .initial("red")
                .substate("red", StateDef::new().entry(count("red_phases")).on("cycle", "green"))
                .substate("green", StateDef::new().on("cycle", "yellow"))
                .substate("yellow", StateDef::new().on("cycle", "red"))
                .on("power_cut", "flashing"),
        )
        .substate(
            "flashing",
            StateDef::new().on("power_restored", "operational"),
        );

    let chart = Statechart::build(definition).expect("definition is valid");
    let machine = Machine::init(chart, Context::new());
    println!("Initial configuration: {:?}", machine.active_states());

    let machine = machine.dispatch("cycle").unwrap();
    let machine = machine.dispatch("cycle").unwrap();
    println!("After two cycles:      {:?}", machine.active_states());

    // `power_cut` is declared on the composite; it fires from any inner state.
    let machine = machine.dispatch("power_cut").unwrap();
    println!("After power cut:       {:?}", machine.active_states());

    // Re-entering the composite descends its initial chain back to red.
    let machine = machine.dispatch("power_restored").unwrap();
    println!("After restore:         {:?}", machine.active_states());
    println!("Red phases seen:       {}", machine.context().get("red_phases").unwrap());

    println!("\nLast macrostep took {} transition(s)", machine.last_transitions().len());
    println!("\n=== Demo Complete ===");
}
