pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod output;
pub mod pairing;
pub mod services;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;

use crate::api::models::{PairingItem, StandingItem};
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::services::registry::RegistryService;
use crate::services::rounds::RoundService;
use crate::services::server::ServerService;
use crate::services::validation::ValidationService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(cli: &Cli) -> AppConfig {
    AppConfig::new()
        .with_tie_break(cli.tie_break)
        .with_fallback_tie_break(cli.fallback_tie_break)
}

pub fn open_pool(config: &AppConfig) -> Result<DbPool> {
    database::create_pool(&config.database.path, config.database.pool_size)
}

pub fn handle_init(pool: DbPool) -> Result<()> {
    RegistryService::new(pool).reset_database()
}

pub fn handle_register_player(pool: DbPool, name: &str) -> Result<()> {
    let id = RegistryService::new(pool).register_player(name)?;
    println!("{}", id);
    Ok(())
}

pub fn handle_create_tournament(pool: DbPool, name: &str) -> Result<()> {
    let id = RegistryService::new(pool).create_tournament(name)?;
    println!("{}", id);
    Ok(())
}

pub fn handle_enroll(pool: DbPool, tournament: i64, player: i64) -> Result<()> {
    let id = RegistryService::new(pool).enroll(tournament, player)?;
    println!("{}", id);
    Ok(())
}

pub fn handle_report(pool: DbPool, tournament: i64, winner: i64, loser: i64) -> Result<()> {
    RegistryService::new(pool).report_match(tournament, winner, loser)
}

pub fn handle_report_tie(pool: DbPool, tournament: i64, first: i64, second: i64) -> Result<()> {
    RegistryService::new(pool).report_tie(tournament, first, second)
}

pub fn handle_report_bye(pool: DbPool, tournament: i64, enrollment: i64) -> Result<()> {
    RegistryService::new(pool).report_bye(tournament, enrollment)
}

pub fn handle_standings(pool: DbPool, config: &AppConfig, tournament: i64, json: bool) -> Result<()> {
    let standings = RoundService::new(pool, config.pairing.clone()).standings(tournament)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&StandingItem::ranked(&standings))?);
    } else {
        println!("{}", output::render_standings(&standings));
    }
    Ok(())
}

pub fn handle_pairings(pool: DbPool, config: &AppConfig, tournament: i64, json: bool) -> Result<()> {
    let service = RoundService::new(pool, config.pairing.clone());
    let pairs = service.compute_next_round_pairings(tournament)?;

    if json {
        let items: Vec<PairingItem> = pairs.iter().map(PairingItem::from).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("{}", output::render_pairings(&pairs));
    }
    Ok(())
}

pub fn handle_validate(pool: DbPool, tournament: Option<i64>) -> Result<()> {
    let violations = ValidationService::new(pool).run(tournament)?;

    for violation in &violations {
        println!("{}", violation);
    }
    if !violations.is_empty() {
        anyhow::bail!("{} data consistency violation(s) found", violations.len());
    }
    Ok(())
}

pub fn handle_count_players(pool: DbPool, tournament: Option<i64>) -> Result<()> {
    let registry = RegistryService::new(pool);
    let count = match tournament {
        Some(_) => registry.count_enrollments(tournament)?,
        None => registry.count_players()?,
    };
    println!("{}", count);
    Ok(())
}

pub fn handle_reset(pool: DbPool, tournament: Option<i64>, everything: bool) -> Result<()> {
    let registry = RegistryService::new(pool);
    registry.reset_matches(tournament)?;

    if everything {
        registry.delete_enrollments(tournament)?;
        registry.delete_tournaments(tournament)?;
        if tournament.is_none() {
            registry.delete_players()?;
        }
    }
    Ok(())
}

pub fn handle_serve(pool: DbPool, config: AppConfig, port: Option<u16>) -> Result<()> {
    let port = config.server.port(port);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, pool, config);
        service.run().await
    })
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
