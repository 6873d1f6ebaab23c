use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE_NAME: &str = ".sqz.json";
const CURRENT_VER: i32 = 1;

pub const DEFAULT_ENV: &str = "development";

/// The one piece of persisted state: which environment db commands target.
/// Last write wins; everything else the tool computes fresh per invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub version: i32,
    #[serde(default)]
    pub environment: Option<String>,
}

impl Default for State {
    fn default() -> State {
        State {
            version: CURRENT_VER,
            environment: None,
        }
    }
}

impl State {
    pub fn load(project_root: &Path) -> Result<State> {
        let p = file_path(project_root);
        let b = match fs::read(&p) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(State::default()),
            Err(e) => return Err(e).with_context(|| format!("read {}", p.display())),
        };

        let mut st: State =
            serde_json::from_slice(&b).with_context(|| format!("parse {}", p.display()))?;
        if st.version == 0 {
            st.version = CURRENT_VER;
        }
        Ok(st)
    }

    pub fn save(&self, project_root: &Path) -> Result<()> {
        let mut b = serde_json::to_vec_pretty(self).context("json format")?;
        b.push(b'\n');
        let p = file_path(project_root);
        fs::write(&p, &b).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    pub fn environment(&self) -> &str {
        self.environment
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENV)
    }
}

fn file_path(project_root: &Path) -> PathBuf {
    project_root.join(STATE_FILE_NAME)
}
