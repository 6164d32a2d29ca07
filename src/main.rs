use clap::Parser;
use product_fallbacks::adapter::inbound::cli::command::Cli;
use product_fallbacks::adapter::inbound::cli::{self, output};

fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    output::configure(output::OutputConfig::new(args.json, args.quiet, args.verbose));

    if let Err(e) = cli::execute(&args) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
