// Walkthrough of the pool, flyweight and composite components.
//
// Usage: catalog_demo [config.toml|config.json]

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use colored::Colorize;
use tracing::{debug, error};

use pattern_catalog::composite::{Component, Composite, Leaf};
use pattern_catalog::config::CatalogConfig;
use pattern_catalog::diagnostics::{init_tracing, ConsoleSink, Diagnostics};
use pattern_catalog::flyweight::Flyweight;
use pattern_catalog::pool::{Reusable, UseOutcome};
use pattern_catalog::{ConfigError, PatternError};

fn load_config() -> Result<CatalogConfig, ConfigError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CatalogConfig::from_file(&path)?,
        None => CatalogConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold().cyan());
}

fn pool_demo(config: &CatalogConfig, diagnostics: &Diagnostics) -> Result<(), PatternError> {
    section("Object Pool");

    let mut pool = config.build_pool(diagnostics);
    println!("Idle objects: {:?}", pool.available_ids());

    let mut first = pool.borrow_object()?;
    let second = pool.borrow_object().ok();

    if first.use_object() == UseOutcome::Used {
        // A second use while still borrowed is reported, not fatal.
        let _ = first.use_object();
    }
    println!("{} in use: {}", first.id(), first.in_use());

    pool.return_object(first);
    if let Some(second) = second {
        pool.return_object(second);
    }

    let again = pool.borrow_object()?;
    println!("Borrowed {} again, in use: {}", again.id(), again.in_use());
    pool.return_object(again);
    println!("Idle objects: {:?}", pool.available_ids());

    let mut empty = pattern_catalog::ObjectPool::<pattern_catalog::PooledObject>::new();
    if let Err(err) = empty.borrow_object() {
        println!("{} {}", "Empty pool:".red(), err);
    }
    Ok(())
}

fn flyweight_demo(config: &CatalogConfig, diagnostics: &Diagnostics) {
    section("Flyweight Factory");

    let mut factory = config.build_factory(diagnostics);
    let first = factory.get_flyweight("SharedState");
    let second = factory.get_flyweight("SharedState");
    let other = factory.get_flyweight("OtherState");

    first.operation("ExtrinsicState");
    other.operation("Elsewhere");
    println!("Same instance: {}", Rc::ptr_eq(&first, &second));

    factory.list_flyweights();
}

fn composite_demo(diagnostics: &Diagnostics) -> Result<(), PatternError> {
    section("Composite Tree");

    let leaf = |name: &str| Leaf::with_diagnostics(name, diagnostics.clone()).into_ref();

    let branch = Composite::with_diagnostics("ChildComposite", diagnostics.clone())
        .with_child(leaf("Leaf1"))
        .with_child(leaf("Leaf2"))
        .into_ref();

    let root = Composite::with_diagnostics("Root", diagnostics.clone()).into_ref();
    root.add(leaf("Leaf0"))?;
    root.add(Rc::clone(&branch))?;
    root.operation();

    // The branch is still reachable from the root, so this edits the live tree.
    branch.add(leaf("Leaf3"))?;
    root.operation();

    root.remove(&branch)?;
    println!("Root children after remove: {}", root.children_len());

    let lonely = Leaf::with_diagnostics("Lonely", diagnostics.clone());
    if let Err(err) = lonely.add(leaf("Nope")) {
        println!("{} {}", "Leaf refused child:".red(), err);
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", "Configuration error:".bold().red(), err);
            return ExitCode::FAILURE;
        }
    };

    colored::control::set_override(config.logging.color);
    init_tracing(&config.logging);
    if let Ok(rendered) = toml::to_string(&config) {
        debug!(config = %rendered, "effective configuration");
    }

    // With JSON logs on, records also go to the structured log stream.
    let diagnostics = if config.logging.json {
        Diagnostics::new(Rc::new(ConsoleSink::new().with_tracing()))
    } else {
        Diagnostics::console()
    };

    let outcome = pool_demo(&config, &diagnostics)
        .map(|()| flyweight_demo(&config, &diagnostics))
        .and_then(|()| composite_demo(&diagnostics));

    match outcome {
        Ok(()) => {
            println!("\n{}", "Done".green());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "demo failed");
            eprintln!("{} {}", "Error:".bold().red(), err);
            ExitCode::FAILURE
        }
    }
}
