use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cmd::db::run_or_print;
use crate::fsdir::FsDir;
use crate::modkind;
use crate::scaffold;
use crate::state::State;
use crate::ui;

pub struct MigrationOpts<'a> {
    pub name: &'a str,
    pub table: Option<&'a str>,
    pub columns: Option<&'a str>,
}

pub fn cmd_gen_migration(
    log: &ui::Logger,
    project_root: &Path,
    opts: MigrationOpts<'_>,
) -> Result<i32> {
    if scaffold::slug(opts.name).is_empty() {
        log.errorf(&format!(
            "\"{}\" leaves nothing usable for a filename; pick a name with letters or digits",
            opts.name
        ));
        return Ok(2);
    }
    if opts.columns.is_some() && opts.table.is_none() {
        log.errorf("--columns requires --table");
        return Ok(2);
    }

    let root = FsDir::new(project_root);
    let det = modkind::detect(Some(&root));

    let rendered = match opts.table {
        Some(table) => {
            scaffold::render_create_table(det.kind, table, opts.columns.unwrap_or("{}"))
        }
        None => scaffold::render_blank(det.kind),
    };
    let content = match rendered {
        Ok(c) => c,
        Err(e) => {
            // Packaging defect; keep the user's workflow moving.
            log.errorf(&format!("{e}; using built-in fallback"));
            scaffold::fallback(det.kind).to_string()
        }
    };

    let path = scaffold::timestamped_path(project_root, det.ext, opts.name);
    let dir = path.parent().unwrap();
    fs::create_dir_all(dir).with_context(|| format!("mkdir {}", dir.display()))?;

    if path.exists() {
        log.errorf(&format!(
            "{} already exists (timestamps have second resolution; retry in a moment)",
            path.display()
        ));
        return Ok(2);
    }

    fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    log.infof(&format!(
        "created {} migration ({})",
        det.kind.as_str(),
        det.reason
    ));
    println!("{}", path.display());
    Ok(0)
}

pub fn cmd_gen_seed(
    log: &ui::Logger,
    project_root: &Path,
    st: &State,
    name: &str,
    env: Option<&str>,
    print: bool,
) -> Result<i32> {
    let env = env
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| st.environment());
    let args: Vec<String> = [
        "sequelize-cli",
        "seed:generate",
        "--name",
        name,
        "--env",
        env,
    ]
    .into_iter()
    .map(String::from)
    .collect();

    run_or_print(log, project_root, &args, print)
}
