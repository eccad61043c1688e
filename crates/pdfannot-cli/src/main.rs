mod cli;
mod validate_cmd;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        cli::Commands::Validate {
            ref file,
            mode,
            ref format,
            max_depth,
            pdf_version,
        } => {
            let options = cli::validation_options(mode, max_depth, pdf_version);
            validate_cmd::run(file, &options, format)
        }
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
