//! Form Binding
//!
//! This example demonstrates two-way value links for a rendering layer.
//!
//! Key concepts:
//! - Value links re-read the container on every access
//! - `request_change` runs a transition with the new value
//! - Subscriber failures are isolated and reported
//!
//! Run with: cargo run --example form_binding

use flowcell::{AppBuilder, QueryContext, TransitionContext, Value};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn email(q: &QueryContext, _: ()) -> String {
    q.state()
        .get_in(["form", "email"])
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn set_email(t: &TransitionContext, email: String) -> Option<Value> {
    t.state().set_in(&["form", "email"], email.trim()).ok()
}

fn main() {
    // RUST_LOG=flowcell=warn shows the isolated subscriber failures
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Form Binding Example ===\n");

    let app = AppBuilder::new()
        .initial_state(json!({ "form": { "email": "" } }))
        .build()
        .expect("initial state is a map");

    // Registered first, so it sees the empty field before the binder edits it
    app.subscribe(|view| -> Result<(), String> {
        let value = view.query_state(email, ());
        if value.contains('@') {
            Ok(())
        } else {
            Err(format!("validation widget rejected {value:?}"))
        }
    });

    // Simulated keystrokes typed into the bound input
    let keystrokes = Rc::new(Cell::new(0));
    let typed = Rc::clone(&keystrokes);

    app.subscribe(move |view| {
        let field = view.value_link(email, set_email);
        println!("  input shows {:?}", field.value());

        if typed.get() == 0 {
            typed.set(1);
            field.request_change("  ann@example.com ".to_string());
        }
    });

    println!("initial render:");
    let report = app.trigger_update();
    for failure in report.failures() {
        println!("  reported: {failure}");
    }

    println!("\nFinal email: {:?}", app.invoke_intent(|ctx, _| ctx.query_state(email, ()), ()));
    println!("\n=== Example Complete ===");
}
