use clap::Parser;

use payoff::adapter::inbound::cli::output::{self, OutputConfig};
use payoff::adapter::inbound::cli::{check, optimize, Cli, ColorChoice, Commands};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Optimize(args) => optimize::execute(args),
        Commands::Check(args) => check::execute(&args.config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
