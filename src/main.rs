use anyhow::Result;

use swiss_pairings::cli::{Cli, Command};
use swiss_pairings::{
    build_config, handle_completions, handle_count_players, handle_create_tournament, handle_enroll,
    handle_init, handle_pairings, handle_register_player, handle_report, handle_report_bye,
    handle_report_tie, handle_reset, handle_serve, handle_standings, handle_validate, interpret,
    open_pool,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return handle_completions(*shell);
    }

    let config = build_config(cli);
    let pool = open_pool(&config)?;

    match &cli.command {
        Command::Init => handle_init(pool),
        Command::RegisterPlayer { name } => handle_register_player(pool, name),
        Command::CreateTournament { name } => handle_create_tournament(pool, name),
        Command::Enroll { tournament, player } => handle_enroll(pool, *tournament, *player),
        Command::Report {
            tournament,
            winner,
            loser,
        } => handle_report(pool, *tournament, *winner, *loser),
        Command::ReportTie {
            tournament,
            first,
            second,
        } => handle_report_tie(pool, *tournament, *first, *second),
        Command::ReportBye {
            tournament,
            enrollment,
        } => handle_report_bye(pool, *tournament, *enrollment),
        Command::Standings { tournament, json } => handle_standings(pool, &config, *tournament, *json),
        Command::Pairings { tournament, json } => handle_pairings(pool, &config, *tournament, *json),
        Command::Validate { tournament } => handle_validate(pool, *tournament),
        Command::CountPlayers { tournament } => handle_count_players(pool, *tournament),
        Command::Reset {
            tournament,
            everything,
        } => handle_reset(pool, *tournament, *everything),
        Command::Serve { port } => handle_serve(pool, config, *port),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
