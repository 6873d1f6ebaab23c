use anyhow::Result;
use std::path::Path;

use crate::state::State;
use crate::ui;

pub fn cmd_env(log: &ui::Logger, project_root: &Path, name: Option<&str>) -> Result<i32> {
    let mut st = match State::load(project_root) {
        Ok(s) => s,
        Err(e) => {
            log.errorf(&format!("state load failed: {e}"));
            return Ok(1);
        }
    };

    let name = name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    let Some(name) = name else {
        println!("{}", st.environment());
        return Ok(0);
    };

    st.environment = Some(name.clone());
    if let Err(e) = st.save(project_root) {
        log.errorf(&format!("state save failed: {e}"));
        return Ok(1);
    }
    log.infof(&format!("environment set to \"{name}\""));
    Ok(0)
}
