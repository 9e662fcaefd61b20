//! Counter
//!
//! This example demonstrates the basic unidirectional data flow.
//!
//! Key concepts:
//! - Intents as the only way to change state
//! - Queries returning plain data
//! - Services reached through the intent context
//! - Subscribers notified only on real changes
//!
//! Run with: RUST_LOG=flowcell=debug cargo run --example counter

use flowcell::{AppBuilder, IntentContext, QueryContext, Value};
use serde_json::json;
use std::cell::RefCell;
use tracing_subscriber::EnvFilter;

// Service context: side effects live outside the container
struct Audit {
    entries: RefCell<Vec<String>>,
}

fn record(audit: &Audit, line: String) {
    audit.entries.borrow_mut().push(line);
}

// Pure query
fn count(q: &QueryContext, _: ()) -> i64 {
    q.state().get("count").and_then(Value::as_i64).unwrap_or(0)
}

// Intent: read, transition, then report to the audit service
fn add(ctx: &IntentContext<Audit>, amount: i64) {
    let before = ctx.query_state(count, ());
    ctx.update_state(
        |t, next| t.state().set("count", next).ok(),
        before + amount,
    );
    ctx.invoke_service(record, format!("add({amount}): {before} -> {}", before + amount));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Example ===\n");

    let app = AppBuilder::new()
        .initial_state(json!({ "count": 0 }))
        .service_context(Audit {
            entries: RefCell::new(Vec::new()),
        })
        .build()
        .expect("initial state is a map");

    let subscription = app.subscribe(|view| {
        println!("  render: count = {}", view.query_state(count, ()));
    });

    println!("add(1):");
    app.invoke_intent(add, 1);

    println!("add(0) (no change, no render):");
    app.invoke_intent(add, 0);

    println!("add(5):");
    app.invoke_intent(add, 5);

    println!("forced re-render:");
    app.trigger_update();

    subscription.unsubscribe();
    println!("add(1) after unsubscribe (silent)");
    app.invoke_intent(add, 1);

    let audit = app.invoke_intent(
        |ctx, _| ctx.invoke_service(|audit: &Audit, _| audit.entries.borrow().clone(), ()),
        (),
    );
    println!("\nAudit log:");
    for line in audit {
        println!("  {line}");
    }

    println!("\n=== Example Complete ===");
}
