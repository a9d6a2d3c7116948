mod config;
mod display;
mod error;
mod logging;
mod parser;
mod records;
mod session;
mod storage;
mod store;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};

use config::Config;
use display::GREETING;
use parser::parse_command;
use session::Session;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load(&args).context("Failed to load configuration")?;

    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {:#}", e);
    }
    info!("Starting with data directory {}", config.data_dir.display());

    let (mut session, skipped) = Session::open(&config).context("Failed to open save files")?;
    for (entity, line) in &skipped {
        println!(
            "Error parsing line {} of {} save file: {} ({})",
            line.line_number, entity, line.content, line.reason
        );
    }

    println!("{}", GREETING);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            info!("Input closed");
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(command) => {
                let reply = session.execute(command);
                println!("{}", reply.message);
                if reply.exit {
                    break;
                }
            }
            Err(e) => {
                warn!("Rejected input '{}': {}", line, e);
                println!("{}", e);
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
