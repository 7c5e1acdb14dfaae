mod budget;
mod config;
mod error;
mod logging;
mod models;
mod report;
mod run;
mod store;
mod ui;

use anyhow::Result;

use config::Config;
use logging::LogTarget;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let config = Config::from_args(&mut args)?;

    let target = if args.len() > 1 {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_path.clone())
    };
    logging::init(target)?;

    let store = store::LedgerStore::open(&config.ledger_path);

    match args.len() {
        1 => run::as_tui(&store),
        2.. => run::as_cli(&args, &store),
        _ => {
            eprintln!("Usage: tally [command]");
            Ok(())
        }
    }
}
