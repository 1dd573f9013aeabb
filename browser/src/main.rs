use std::{io, process};

use browser::cli::Cli;
use browser::command::SystemCommandRunner;
use browser::fetch::HttpFetcher;
use browser::{logging, proxy};
use clap::Parser;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
    let cli = Cli::parse();
    cli.color.apply();
    logging::init(cli.verbose);

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result {
    let resolver = proxy::resolver_for(cli.proxy_source, SystemCommandRunner);
    let mut stdout = io::stdout().lock();

    browser::run(&cli.url, resolver.as_ref(), &HttpFetcher, &mut stdout)?;

    Ok(())
}
