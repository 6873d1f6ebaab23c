use regex::Regex;

use crate::fsdir::DirHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    Esm,
    Cjs,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Esm => "esm",
            ModuleKind::Cjs => "cjs",
        }
    }
}

/// Outcome of module-system detection. `reason` is one of a fixed vocabulary
/// of tags so callers (and tests) can tell which rule fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    pub kind: ModuleKind,
    pub reason: &'static str,
    pub ext: &'static str,
}

fn re_type_module() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""type"\s*:\s*"module""#).expect("regex"))
}

/// Decide the module system and the extension new migration files should use.
///
/// Precedence, strongest first:
/// 1. extensions already present in `<root>/migrations/` (`.mjs` > `.cjs` > `.js`),
/// 2. a `"type": "module"` declaration in the manifest,
/// 3. CJS with plain `.js`.
///
/// Existing extensions win because the surrounding tooling already loads those
/// files; mixing a second convention into the same directory would break it.
/// Never fails: unreadable manifests just contribute no evidence.
pub fn detect(root: Option<&dyn DirHandle>) -> Detection {
    let Some(root) = root else {
        return Detection {
            kind: ModuleKind::Cjs,
            reason: "no-root",
            ext: ".js",
        };
    };

    let pkg_esm = manifest_declares_esm(root);

    if let Some(migrations) = root.subdir("migrations") {
        let names = migrations.child_names();
        let has_ext =
            |ext: &str| names.iter().any(|n| n.to_lowercase().ends_with(ext));

        if has_ext(".mjs") {
            return Detection {
                kind: ModuleKind::Esm,
                reason: "existing-.mjs",
                ext: ".mjs",
            };
        }
        if has_ext(".cjs") {
            return Detection {
                kind: ModuleKind::Cjs,
                reason: "existing-.cjs",
                ext: ".cjs",
            };
        }
        if has_ext(".js") {
            return if pkg_esm {
                Detection {
                    kind: ModuleKind::Esm,
                    reason: "existing-.js+pkg:module",
                    ext: ".js",
                }
            } else {
                Detection {
                    kind: ModuleKind::Cjs,
                    reason: "existing-.js+default-cjs",
                    ext: ".js",
                }
            };
        }
    }

    if pkg_esm {
        Detection {
            kind: ModuleKind::Esm,
            reason: "package.json:type=module",
            ext: ".js",
        }
    } else {
        Detection {
            kind: ModuleKind::Cjs,
            reason: "default",
            ext: ".js",
        }
    }
}

// The manifest is matched as raw text, not parsed as JSON: a substring check is
// enough for one key and tolerates trailing commas or comments some setups carry.
fn manifest_declares_esm(root: &dyn DirHandle) -> bool {
    if let Some(text) = root.read_text("package.json") {
        return re_type_module().is_match(&text);
    }

    // Shallow monorepo scan: the first manifest found under apps/* or
    // packages/* decides. Child names come back sorted, so "first" is stable.
    for ws in ["apps", "packages"] {
        let Some(dir) = root.subdir(ws) else {
            continue;
        };
        for name in dir.child_names() {
            if !dir.is_dir(&name) {
                continue;
            }
            let Some(child) = dir.subdir(&name) else {
                continue;
            };
            if let Some(text) = child.read_text("package.json") {
                return re_type_module().is_match(&text);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsdir::mem::MemDir;
    use crate::fsdir::FsDir;
    use std::fs;
    use tempfile::TempDir;

    fn detect_mem(root: &MemDir) -> Detection {
        detect(Some(root))
    }

    #[test]
    fn no_root_defaults_to_cjs() {
        let d = detect(None);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "no-root");
        assert_eq!(d.ext, ".js");
    }

    #[test]
    fn empty_root_defaults_to_cjs() {
        let root = MemDir::new();
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "default");
        assert_eq!(d.ext, ".js");
    }

    #[test]
    fn manifest_type_module_is_esm() {
        let root = MemDir::new().file("package.json", r#"{ "type" : "module" }"#);
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Esm);
        assert_eq!(d.reason, "package.json:type=module");
        assert_eq!(d.ext, ".js");
    }

    #[test]
    fn manifest_without_type_module_is_cjs() {
        let root = MemDir::new().file("package.json", r#"{ "type": "commonjs" }"#);
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "default");
    }

    #[test]
    fn existing_mjs_dominates_manifest_and_cjs_files() {
        let root = MemDir::new()
            .file("package.json", r#"{ "type": "module" }"#)
            .dir(
                "migrations",
                MemDir::new()
                    .file("001-init.cjs", "")
                    .file("002-users.MJS", ""),
            );
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Esm);
        assert_eq!(d.reason, "existing-.mjs");
        assert_eq!(d.ext, ".mjs");
    }

    #[test]
    fn existing_cjs_wins_over_js_and_manifest() {
        let root = MemDir::new()
            .file("package.json", r#"{ "type": "module" }"#)
            .dir(
                "migrations",
                MemDir::new().file("a.js", "").file("b.cjs", ""),
            );
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "existing-.cjs");
        assert_eq!(d.ext, ".cjs");
    }

    #[test]
    fn existing_js_keeps_manifest_kind() {
        let root = MemDir::new()
            .file("package.json", r#"{"type":"module"}"#)
            .dir("migrations", MemDir::new().file("a.js", ""));
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Esm);
        assert_eq!(d.reason, "existing-.js+pkg:module");
        assert_eq!(d.ext, ".js");
    }

    #[test]
    fn existing_js_with_absent_manifest_is_cjs() {
        // "Manifest absent" and "manifest present but not ESM" must land in
        // the same branch.
        let root = MemDir::new().dir("migrations", MemDir::new().file("a.js", ""));
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "existing-.js+default-cjs");
        assert_eq!(d.ext, ".js");
    }

    #[test]
    fn empty_migrations_dir_falls_through_to_manifest() {
        let root = MemDir::new()
            .file("package.json", r#"{ "type": "module" }"#)
            .dir("migrations", MemDir::new().file("README.md", "docs"));
        let d = detect_mem(&root);
        assert_eq!(d.reason, "package.json:type=module");
    }

    #[test]
    fn monorepo_scan_finds_manifest_under_packages() {
        let root = MemDir::new().dir(
            "packages",
            MemDir::new().dir(
                "api",
                MemDir::new().file("package.json", r#"{ "type": "module" }"#),
            ),
        );
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Esm);
        assert_eq!(d.reason, "package.json:type=module");
    }

    #[test]
    fn monorepo_scan_takes_first_manifest_in_sorted_order() {
        // "alpha" sorts before "beta"; its non-ESM manifest terminates the scan.
        let root = MemDir::new().dir(
            "apps",
            MemDir::new()
                .dir("alpha", MemDir::new().file("package.json", "{}"))
                .dir(
                    "beta",
                    MemDir::new().file("package.json", r#"{ "type": "module" }"#),
                ),
        );
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
        assert_eq!(d.reason, "default");
    }

    #[test]
    fn root_manifest_shadows_monorepo_members() {
        let root = MemDir::new().file("package.json", "{}").dir(
            "apps",
            MemDir::new().dir(
                "web",
                MemDir::new().file("package.json", r#"{ "type": "module" }"#),
            ),
        );
        let d = detect_mem(&root);
        assert_eq!(d.kind, ModuleKind::Cjs);
    }

    #[test]
    fn detects_on_a_real_filesystem_root() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("package.json"), "{ \"type\": \"module\" }\n").unwrap();
        let mdir = td.path().join("migrations");
        fs::create_dir(&mdir).unwrap();
        fs::write(mdir.join("20240101000000-init.mjs"), "export default {};\n").unwrap();

        let root = FsDir::new(td.path());
        let d = detect(Some(&root));
        assert_eq!(d.kind, ModuleKind::Esm);
        assert_eq!(d.reason, "existing-.mjs");
        assert_eq!(d.ext, ".mjs");
    }
}
