#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, is_broken_pipe, render_error};
use solargrid_core::config::{ConfigOverrides, resolve_config};
use solargrid_core::context::AppContext;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "solargrid",
    author,
    version,
    about = "solargrid: community solar grid dashboard in the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Display language (en, es, hi, bn, ta, te).
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Output mode requested on the command line, if any.
    fn output_flag(&self) -> Option<OutputMode> {
        if self.json {
            Some(OutputMode::Json)
        } else {
            self.format
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output: self.output_flag().map(|mode| mode.as_str().to_string()),
            locale: self.locale.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Grid",
        about = "Show the live sector map",
        long_about = "Show production and consumption for every sector on the live map, flagging sectors in surplus.",
        after_help = "EXAMPLES:\n    # Default map size from config (25 sectors)\n    solargrid map\n\n    # A smaller map\n    solargrid map --sectors 9\n\n    # Emit machine-readable output\n    solargrid map --format json"
    )]
    Map(cmd::map::MapArgs),

    #[command(
        next_help_heading = "Grid",
        about = "Show one sector's houses and grid nodes",
        long_about = "Lay out the houses and grid nodes of a sector with their positions, production and load.",
        after_help = "EXAMPLES:\n    # Sector 7\n    solargrid sector 7\n\n    # In Hindi\n    solargrid sector 7 --locale hi"
    )]
    Sector(cmd::sector::SectorArgs),

    #[command(
        next_help_heading = "Grid",
        about = "Show the city overview",
        long_about = "Show the 3x3 city overview around the grid hub with city-wide totals.",
        after_help = "EXAMPLES:\n    solargrid city\n    solargrid city --format json"
    )]
    City,

    #[command(
        next_help_heading = "Pages",
        about = "Show dashboard figures",
        long_about = "Show headline figures, the weekly production vs. consumption chart and recent trades.",
        after_help = "EXAMPLES:\n    solargrid dashboard\n    solargrid dashboard --locale es"
    )]
    Dashboard,

    #[command(
        next_help_heading = "Pages",
        about = "Show marketplace offers and prices",
        long_about = "Show open buy/sell offers and the price history for a week or a month.",
        after_help = "EXAMPLES:\n    # Past week (default)\n    solargrid market\n\n    # Past month\n    solargrid market --timeframe 1m"
    )]
    Market(cmd::market::MarketArgs),

    #[command(
        next_help_heading = "Pages",
        about = "Show wallet balance and transactions",
        after_help = "EXAMPLES:\n    solargrid wallet\n    solargrid wallet --format json"
    )]
    Wallet,

    #[command(
        next_help_heading = "Pages",
        about = "Show owned assets and panel health",
        after_help = "EXAMPLES:\n    solargrid portfolio"
    )]
    Portfolio,

    #[command(
        next_help_heading = "Language",
        about = "Translate one key",
        long_about = "Look up a key in the active locale, falling back to English and then to the key itself.",
        after_help = "EXAMPLES:\n    # Spanish label for the sector map\n    solargrid translate sector_map --locale es\n\n    # Missing from the Tamil table, so this prints the English text\n    solargrid translate account_details --locale ta"
    )]
    Translate(cmd::translate::TranslateArgs),

    #[command(
        next_help_heading = "Language",
        about = "List supported locales",
        after_help = "EXAMPLES:\n    solargrid locales"
    )]
    Locales,

    #[command(
        next_help_heading = "Tools",
        about = "Print raw seeded draws",
        long_about = "Print the state and value of successive draws from the seeded generator behind every grid view.",
        after_help = "EXAMPLES:\n    # First five draws for seed 42\n    solargrid draw --seed 42\n\n    # Negative seeds are accepted\n    solargrid draw --seed -5 -n 3"
    )]
    Draw(cmd::draw::DrawArgs),

    #[command(
        next_help_heading = "Tools",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    solargrid completions bash > ~/.local/share/bash-completion/completions/solargrid"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

const QUIET_DIRECTIVES: &str = "solargrid=warn,solargrid_core=warn";
const VERBOSE_DIRECTIVES: &str = "solargrid=debug,solargrid_core=debug,info";

/// `-v` wins over `SOLARGRID_LOG`, which wins over `DEBUG`.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_DIRECTIVES);
    }
    EnvFilter::try_from_env("SOLARGRID_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            VERBOSE_DIRECTIVES
        } else {
            QUIET_DIRECTIVES
        })
    })
}

fn init_tracing(verbose: bool) {
    let filter = log_filter(verbose);

    let format = env::var("SOLARGRID_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn dispatch(command: Commands, ctx: &AppContext, output: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Map(args) => cmd::map::run_map(&args, ctx, output),
        Commands::Sector(args) => cmd::sector::run_sector(&args, ctx, output),
        Commands::City => cmd::city::run_city(ctx, output),
        Commands::Dashboard => cmd::dashboard::run_dashboard(ctx, output),
        Commands::Market(args) => cmd::market::run_market(&args, ctx, output),
        Commands::Wallet => cmd::wallet::run_wallet(ctx, output),
        Commands::Portfolio => cmd::portfolio::run_portfolio(ctx, output),
        Commands::Translate(args) => cmd::translate::run_translate(&args, ctx, output),
        Commands::Locales => cmd::locales::run_locales(ctx, output),
        Commands::Draw(args) => cmd::draw::run_draw(&args, ctx, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(&args, &mut command)
        }
    }
}

fn fail(mode: OutputMode, err: &anyhow::Error) -> ! {
    // Nothing more can be reported if stderr itself is gone.
    let _ = render_error(mode, &CliError::from_anyhow(err));
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let early_mode = cli.output_flag().unwrap_or(OutputMode::Text);
    let setup = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|root| resolve_config(&root, &cli.overrides()))
        .and_then(AppContext::init);
    let ctx = match setup {
        Ok(ctx) => ctx,
        Err(err) => fail(early_mode, &err),
    };

    let output = OutputMode::from_resolved(&ctx.config().resolved_output);
    let result = dispatch(cli.command, &ctx, output);
    ctx.shutdown();

    if let Err(err) = result {
        // The reader went away (`solargrid map | head`); nothing left to say.
        if is_broken_pipe(&err) {
            return;
        }
        fail(output, &err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["solargrid", "--json", "map"]);
        assert_eq!(cli.output_flag(), Some(OutputMode::Json));
    }

    #[test]
    fn format_flag_after_subcommand() {
        let cli = Cli::parse_from(["solargrid", "city", "--format", "pretty"]);
        assert_eq!(cli.output_flag(), Some(OutputMode::Pretty));
        assert_eq!(cli.overrides().output.as_deref(), Some("pretty"));
    }

    #[test]
    fn json_flag_wins_over_format() {
        let cli = Cli::parse_from(["solargrid", "--format", "text", "--json", "wallet"]);
        assert_eq!(cli.output_flag(), Some(OutputMode::Json));
    }

    #[test]
    fn output_defers_to_config_by_default() {
        let cli = Cli::parse_from(["solargrid", "map"]);
        assert!(cli.output_flag().is_none());
        assert!(cli.overrides().output.is_none());
    }

    #[test]
    fn locale_flag_is_global() {
        let cli = Cli::parse_from(["solargrid", "sector", "3", "--locale", "ta"]);
        assert_eq!(cli.overrides().locale.as_deref(), Some("ta"));
    }

    #[test]
    fn draw_accepts_negative_seed() {
        let cli = Cli::parse_from(["solargrid", "draw", "--seed", "-5", "-n", "3"]);
        match cli.command {
            Commands::Draw(args) => {
                assert_eq!(args.seed, -5);
                assert_eq!(args.count, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn sector_requires_numeric_id() {
        assert!(Cli::try_parse_from(["solargrid", "sector", "seven"]).is_err());
        assert!(Cli::try_parse_from(["solargrid", "sector", "-1"]).is_err());
    }

    #[test]
    fn translate_collects_params() {
        let cli = Cli::parse_from(["solargrid", "translate", "k", "-p", "a=1", "--param", "b=2"]);
        match cli.command {
            Commands::Translate(args) => assert_eq!(args.params, ["a=1", "b=2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["solargrid", "-v", "city"]);
        assert!(cli.verbose);
        assert!(!Cli::parse_from(["solargrid", "city"]).verbose);
    }

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = log_filter(true).to_string();
        assert!(filter.contains("solargrid_core=debug"), "{filter}");
    }

    #[test]
    fn counts_are_bounded() {
        assert!(Cli::try_parse_from(["solargrid", "draw", "--seed", "1", "-n", "1000000"]).is_ok());
        assert!(Cli::try_parse_from(["solargrid", "draw", "--seed", "1", "-n", "1000001"]).is_err());
        assert!(
            Cli::try_parse_from(["solargrid", "draw", "--seed", "1", "-n", "18446744073709551615"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["solargrid", "map", "--sectors", "10000"]).is_ok());
        assert!(Cli::try_parse_from(["solargrid", "map", "--sectors", "10001"]).is_err());
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["solargrid", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["solargrid", "map"],
            vec!["solargrid", "sector", "1"],
            vec!["solargrid", "city"],
            vec!["solargrid", "dashboard"],
            vec!["solargrid", "market", "--timeframe", "1m"],
            vec!["solargrid", "wallet"],
            vec!["solargrid", "portfolio"],
            vec!["solargrid", "translate", "load"],
            vec!["solargrid", "locales"],
            vec!["solargrid", "draw", "--seed", "1"],
            vec!["solargrid", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(result.is_ok(), "Failed to parse: {args:?}: {:?}", result.err());
        }
    }
}
