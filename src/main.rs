mod cli;
mod ui;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use ui::Printer;
use wanted_status::bus::EventBus;
use wanted_status::error::WantedError;
use wanted_status::memory::MemoryHost;
use wanted_status::records::EntityId;
use wanted_status::scenario::Scenario;
use wanted_status::system::{AccuseWanted, MapInit, WantedStatusSystem};
use wanted_status::WantedConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,wanted_status=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => WantedConfig::load_from(path),
        None => WantedConfig::load(),
    }
    .context("failed to load configuration")?;
    if let Some(channel) = cli.channel {
        config
            .set_channel(channel)
            .context("invalid --channel override")?;
    }

    let printer = Printer::default();

    match cli.command {
        Command::Demo => run_demo(&config, &printer),
        Command::Accuse {
            scenario,
            accuser,
            accused,
            reason,
            visor,
            json,
        } => {
            let scenario = load_scenario(&scenario)?;
            let host = scenario.build_host(config.templates.clone());

            for id in [accuser, accused] {
                if !host.contains_actor(EntityId(id)) {
                    return Err(WantedError::UnknownActor(EntityId(id)).into());
                }
            }
            let visor = scenario.visor_id(visor.map(EntityId))?;

            run_accusations(
                &config,
                &host,
                &scenario,
                &[AccuseWanted {
                    item: visor,
                    performer: EntityId(accuser),
                    target: EntityId(accused),
                    reason,
                }],
            );

            if json {
                printer.broadcasts_json(&host.sent())?;
                return Ok(());
            }
            printer.heading("Broadcasts");
            printer.broadcasts(&host.sent());
            printer.rosters(&host);
            Ok(())
        }
        Command::Records { scenario } => {
            let scenario = load_scenario(&scenario)?;
            let host = scenario.build_host(config.templates.clone());
            printer.rosters(&host);
            Ok(())
        }
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    Scenario::load(path).with_context(|| format!("failed to load scenario {}", path.display()))
}

/// Wires a system for the scenario's visors on a fresh bus, runs map init,
/// then raises each accusation in order.
fn run_accusations(
    config: &WantedConfig,
    host: &MemoryHost,
    scenario: &Scenario,
    accusations: &[AccuseWanted],
) {
    let system = Rc::new(RefCell::new(WantedStatusSystem::new(host, config)));
    for (id, visor) in scenario.visors() {
        system.borrow_mut().add_visor(id, visor);
    }

    let mut bus = EventBus::new();
    WantedStatusSystem::subscribe(&system, &mut bus);

    for (id, _) in scenario.visors() {
        bus.raise(&mut MapInit { entity: id });
    }
    for accusation in accusations {
        bus.raise(&mut accusation.clone());
    }
}

fn run_demo(config: &WantedConfig, printer: &Printer) -> Result<()> {
    let scenario = Scenario::demo();
    let host = scenario.build_host(config.templates.clone());
    let visor = scenario.visor_id(None)?;

    let accuse = |target: u64, reason: Option<&str>| AccuseWanted {
        item: visor,
        performer: EntityId(10),
        target: EntityId(target),
        reason: reason.map(str::to_string),
    };

    printer.rosters(&host);

    printer.heading("Carol accuses Alice");
    run_accusations(config, &host, &scenario, &[accuse(20, None)]);
    printer.broadcasts(&host.sent());

    printer.heading("Carol accuses Bob twice");
    let before = host.sent().len();
    run_accusations(
        config,
        &host,
        &scenario,
        &[accuse(21, Some("assault")), accuse(21, Some("assault"))],
    );
    printer.broadcasts(&host.sent()[before..]);

    printer.rosters(&host);
    Ok(())
}
