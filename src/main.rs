use anyhow::Result;
use clap::Parser;
use std::env;
use std::process::ExitCode;

mod cli;
mod cmd;
mod fsdir;
mod modkind;
mod pm;
mod scaffold;
mod state;
mod ui;
mod util;

use cli::{Cli, Cmd, GenTarget, USAGE_TEXT};
use cmd::{cmd_db, cmd_detect, cmd_env, cmd_gen_migration, cmd_gen_seed};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("[sqz] ERROR: {e}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<i32> {
    let log = ui::Logger;

    let cli = Cli::parse();
    let Some(cmd) = cli.cmd else {
        eprintln!("{USAGE_TEXT}");
        return Ok(2);
    };

    if matches!(&cmd, Cmd::Help) {
        print!("{USAGE_TEXT}");
        return Ok(0);
    }

    let root = env::current_dir()?;

    match cmd {
        Cmd::Help => {
            print!("{USAGE_TEXT}");
            Ok(0)
        }

        Cmd::Detect => cmd_detect(&root),

        Cmd::Gen { target } => match target {
            GenTarget::Migration {
                name,
                table,
                columns,
            } => cmd_gen_migration(
                &log,
                &root,
                cmd::MigrationOpts {
                    name: &name,
                    table: table.as_deref(),
                    columns: columns.as_deref(),
                },
            ),
            GenTarget::Seed { name, env, print } => {
                let st = load_state(&log, &root)?;
                cmd_gen_seed(&log, &root, &st, &name, env.as_deref(), print)
            }
        },

        Cmd::Db { action } => {
            let st = load_state(&log, &root)?;
            cmd_db(&log, &root, &st, action)
        }

        Cmd::Env { name } => cmd_env(&log, &root, name.as_deref()),
    }
}

fn load_state(log: &ui::Logger, root: &std::path::Path) -> Result<state::State> {
    match state::State::load(root) {
        Ok(st) => Ok(st),
        Err(e) => {
            // A corrupt .sqz.json should not brick db commands.
            log.infof(&format!("{e}; ignoring saved environment"));
            Ok(state::State::default())
        }
    }
}
