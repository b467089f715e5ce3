//! Media Sharing Workflow
//!
//! This example walks a small media app through its screens.
//!
//! Key concepts:
//! - Closed set of states declared with `state_enum!`
//! - Branching transitions out of one state
//! - Enter/exit hooks with side effects
//! - Rejected transitions leave the machine where it was
//!
//! Run with: RUST_LOG=debug cargo run --example media_workflow

use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use waypoint::builder::StateMachineBuilder;
use waypoint::state_enum;

state_enum! {
    enum Screen {
        Sharing,
        Liking,
        Discovering,
        Uploading,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Media Sharing Workflow ===\n");

    let uploads = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&uploads);

    let mut machine = StateMachineBuilder::<Screen>::new()
        .transitions([
            (Screen::Sharing, Screen::Liking),
            (Screen::Sharing, Screen::Uploading),
            (Screen::Liking, Screen::Discovering),
            (Screen::Discovering, Screen::Sharing),
            (Screen::Uploading, Screen::Sharing),
        ])
        .on_enter(Screen::Sharing, || {
            println!("  [enter] share sheet opened");
            Ok(())
        })
        .on_exit(Screen::Sharing, || {
            println!("  [exit]  share sheet closed");
            Ok(())
        })
        .on_enter(Screen::Uploading, move || {
            *counter.lock().map_err(|e| e.to_string())? += 1;
            println!("  [enter] upload started");
            Ok(())
        })
        .initial(Screen::Sharing)
        .start()
        .expect("initial enter hook succeeds");

    println!("Initial state: {:?}\n", machine.current_state());

    for next in [
        Screen::Liking,
        Screen::Discovering,
        Screen::Sharing,
        Screen::Uploading,
        Screen::Liking,
        Screen::Sharing,
    ] {
        match machine.transition(next) {
            Ok(()) => println!("-> {:?}", next),
            Err(err) => println!("!! {}", err),
        }
    }

    println!("\nFinal state: {:?}", machine.current_state());
    println!("Path: {:?}", machine.history().get_path());
    println!("Uploads started: {}", uploads.lock().map(|n| *n).unwrap_or(0));

    println!("\n=== Example Complete ===");
}
