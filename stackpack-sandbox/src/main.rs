//! A console sandbox for the stack packer: a single offline player driven by commands
//! read from the standard input.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod sandbox;
pub mod session;
pub mod command;

use command::CommandContext;
use sandbox::{ConsoleChat, Sandbox};


pub fn main() {

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut sandbox = Sandbox::new();
    if config::starter_kit() {
        sandbox.give_starter_kit();
        info!("starter kit given");
    }

    println!("Stack packer sandbox, type 'help' for a list of commands.");

    let stdin = io::stdin();
    let mut chat = ConsoleChat;
    let mut line = String::new();

    loop {

        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("failed to read command: {e}");
                break;
            }
        }

        let parts = line.split_whitespace().collect::<Vec<_>>();
        match parts.first() {
            None => continue,
            Some(&"quit" | &"exit") => break,
            Some(_) => {}
        }

        command::handle_command(CommandContext {
            parts: &parts,
            sandbox: &mut sandbox,
            chat: &mut chat,
        });

    }

    info!("sandbox stopped");

}
