use clap::Parser;
use credvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    credvault::cli::init_tracing();

    let result = match cli.command {
        Commands::Save {
            ref identifier,
            ref secret,
        } => credvault::cli::commands::save::execute(&cli, identifier, secret.as_deref()),
        Commands::Load { show_secret } => credvault::cli::commands::load::execute(&cli, show_secret),
        Commands::Status => credvault::cli::commands::status::execute(&cli),
        Commands::Delete => credvault::cli::commands::delete::execute(&cli),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
