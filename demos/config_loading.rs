//! Config loading example - annotating failures as they cross layers
//!
//! Run with: cargo run --example config_loading

use serde::Serialize;
use verdict::matcher::match_failure;
use verdict::{attempt, capture, Cases, Fault, Outcome};

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Config {
    port: u16,
    workers: u8,
}

// ============================================================================
// Layers
// ============================================================================

fn read_source(name: &str) -> Outcome<String, Fault> {
    match name {
        "good" => Outcome::success("port=8080\nworkers=4".to_string()),
        "bad-port" => Outcome::success("port=http\nworkers=4".to_string()),
        _ => Outcome::failure(Fault::new("NotFound").with("source", name)),
    }
}

fn field<'a>(text: &'a str, key: &str) -> Outcome<&'a str, Fault> {
    let found = text
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v);
    Outcome::from_option(found, Fault::new("MissingField").with("field", key))
}

fn parse(text: &str) -> Outcome<Config, Fault> {
    field(text, "port")
        .flat_map(|raw| {
            capture(|| raw.parse::<u16>())
                .map_err(|e| e.to_string())
                .annotate_with("InvalidPort", [("input", raw)])
        })
        .flat_map(|port| {
            field(text, "workers")
                .flat_map(|raw| {
                    capture(|| raw.parse::<u8>())
                        .map_err(|e| e.to_string())
                        .annotate("InvalidWorkers")
                })
                .map(|workers| Config { port, workers })
        })
}

fn load(name: &str) -> Outcome<Config, Fault> {
    read_source(name)
        .flat_map(|text| parse(&text))
        .annotate_with("ConfigLoad", [("source", name)])
}

fn main() {
    for name in ["good", "bad-port", "missing"] {
        let outcome = load(name);
        println!("{}: {}", name, serde_json::to_string(&outcome).unwrap_or_default());

        let advice = match_failure(
            outcome,
            |config| format!("listening on {}", config.port),
            Cases::new()
                .on("ConfigLoad", |f: &Fault| {
                    let root = f.root_cause();
                    format!("fix {} ({})", root.kind(), f.depth())
                }),
        );
        println!("  -> {:?}", advice);
    }

    // A panicking plugin does not take the loader down with it.
    let plugin = attempt(|| -> Config { panic!("plugin crashed") }).annotate("PluginLoad");
    if let Outcome::Failure(fault) = &plugin {
        println!("plugin: {}", fault);
    }
}
