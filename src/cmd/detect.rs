use anyhow::Result;
use std::path::Path;

use crate::fsdir::FsDir;
use crate::modkind;
use crate::pm;

pub fn cmd_detect(project_root: &Path) -> Result<i32> {
    let root = FsDir::new(project_root);
    let det = modkind::detect(Some(&root));
    let manager = pm::detect(Some(&root));

    println!("module system:   {} ({})", det.kind.as_str(), det.reason);
    println!("file extension:  {}", det.ext);
    println!("package manager: {}", manager.as_str());
    Ok(0)
}
