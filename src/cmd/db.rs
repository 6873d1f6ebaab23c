use anyhow::Result;
use std::path::Path;

use crate::cli::DbAction;
use crate::fsdir::FsDir;
use crate::pm;
use crate::state::State;
use crate::ui;
use crate::util::run_status;

pub fn cmd_db(log: &ui::Logger, project_root: &Path, st: &State, action: DbAction) -> Result<i32> {
    let (subcommand, env, print) = match action {
        DbAction::Migrate { env, print } => ("db:migrate", env, print),
        DbAction::MigrateUndo { env, print } => ("db:migrate:undo", env, print),
        DbAction::Seed { env, print } => ("db:seed:all", env, print),
    };

    let env = env
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| st.environment());

    let args: Vec<String> = ["sequelize-cli", subcommand, "--env", env]
        .into_iter()
        .map(String::from)
        .collect();

    run_or_print(log, project_root, &args, print)
}

/// Route a logical sequelize-cli argument list through the detected package
/// manager: `--print` emits the shell-ready string, otherwise the argv is
/// spawned directly and its exit code propagated.
pub fn run_or_print(
    log: &ui::Logger,
    project_root: &Path,
    args: &[String],
    print: bool,
) -> Result<i32> {
    let root = FsDir::new(project_root);
    let manager = pm::detect(Some(&root));
    let is_windows = cfg!(windows);

    let rendered = pm::render_command(manager, args, is_windows);
    if print {
        println!("{rendered}");
        return Ok(0);
    }

    log.infof(&format!("running: {rendered}"));
    let (exe, argv) = pm::invocation(manager, args, is_windows);
    match run_status(project_root, &exe, &argv) {
        Ok(code) => Ok(code),
        Err(e) => {
            log.errorf(&format!("{e} (is {} installed?)", manager.as_str()));
            Ok(1)
        }
    }
}
