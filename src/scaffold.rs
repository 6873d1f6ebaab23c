use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::modkind::ModuleKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Blank,
    CreateTable,
}

const BLANK_CJS: &str = include_str!("../assets/templates/blank.cjs.js");
const BLANK_ESM: &str = include_str!("../assets/templates/blank.esm.js");
const CREATE_TABLE_CJS: &str = include_str!("../assets/templates/create-table.cjs.js");
const CREATE_TABLE_ESM: &str = include_str!("../assets/templates/create-table.esm.js");

static TEMPLATES: &[((ModuleKind, Variant), &str)] = &[
    ((ModuleKind::Cjs, Variant::Blank), BLANK_CJS),
    ((ModuleKind::Esm, Variant::Blank), BLANK_ESM),
    ((ModuleKind::Cjs, Variant::CreateTable), CREATE_TABLE_CJS),
    ((ModuleKind::Esm, Variant::CreateTable), CREATE_TABLE_ESM),
];

fn template(kind: ModuleKind, variant: Variant) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|((k, v), _)| *k == kind && *v == variant)
        .map(|(_, text)| *text)
}

/// Empty up/down skeleton for the given module system. A missing template is
/// a packaging defect; callers should fall back to `fallback()` and keep going.
pub fn render_blank(kind: ModuleKind) -> Result<String> {
    template(kind, Variant::Blank)
        .map(|t| t.to_string())
        .ok_or_else(|| anyhow!("template missing: {}/blank", kind.as_str()))
}

/// Create-table skeleton with `{{table}}` and `{{columns}}` substituted
/// verbatim. No escaping: the caller owns the validity of both fragments.
pub fn render_create_table(kind: ModuleKind, table: &str, columns: &str) -> Result<String> {
    let t = template(kind, Variant::CreateTable)
        .ok_or_else(|| anyhow!("template missing: {}/create-table", kind.as_str()))?;
    Ok(t.replace("{{table}}", table).replace("{{columns}}", columns))
}

/// Minimal inline migration body, used when a packaged template is missing.
pub fn fallback(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::Cjs => {
            "'use strict';\n\nmodule.exports = {\n  async up() {},\n  async down() {},\n};\n"
        }
        ModuleKind::Esm => "export default {\n  async up() {},\n  async down() {},\n};\n",
    }
}

/// Lowercase the name and collapse every run of non-alphanumerics into a
/// single hyphen, trimming hyphens at both ends.
pub fn slug(name: &str) -> String {
    let mut out = String::new();
    let mut prev_dash = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}

/// `<base>/migrations/<14-digit local timestamp>-<slug><ext>`.
///
/// Timestamp resolution is seconds, so two calls within the same second yield
/// the same path; the file-writing caller must treat that as "already exists"
/// rather than overwrite.
pub fn timestamped_path(base_dir: &Path, ext: &str, name: &str) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d%H%M%S");
    base_dir
        .join("migrations")
        .join(format!("{ts}-{}{ext}", slug(name)))
}
