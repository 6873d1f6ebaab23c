use crate::fsdir::DirHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Runner executable used to invoke project CLIs. Windows needs the
    /// `.cmd` shim because the bare names are shell scripts there.
    pub fn executable(&self, is_windows: bool) -> &'static str {
        match (self, is_windows) {
            (PackageManager::Npm, false) => "npx",
            (PackageManager::Npm, true) => "npx.cmd",
            (PackageManager::Yarn, false) => "yarn",
            (PackageManager::Yarn, true) => "yarn.cmd",
            (PackageManager::Pnpm, false) => "pnpm",
            (PackageManager::Pnpm, true) => "pnpm.cmd",
        }
    }
}

/// Prefer lockfiles for reliability; npm is the default when nothing matches
/// (or no root is available). With several lockfiles present, pnpm wins.
pub fn detect(root: Option<&dyn DirHandle>) -> PackageManager {
    let Some(root) = root else {
        return PackageManager::Npm;
    };
    if root.has_file("pnpm-lock.yaml") {
        return PackageManager::Pnpm;
    }
    if root.has_file("yarn.lock") {
        return PackageManager::Yarn;
    }
    PackageManager::Npm
}

/// Render a shell-ready command string: `<executable> [dlx] <quoted args...>`.
///
/// Pure in all inputs; `is_windows` is a parameter rather than a process-wide
/// read so both quoting dialects stay testable on one host. An empty argument
/// list renders the bare executable (`pnpm dlx` for pnpm).
pub fn render_command(pm: PackageManager, args: &[String], is_windows: bool) -> String {
    let mut body: Vec<String> = Vec::new();
    if pm == PackageManager::Pnpm {
        body.push("dlx".to_string());
    }
    for a in args {
        body.push(quote_arg(a, is_windows));
    }

    let exe = pm.executable(is_windows);
    if body.is_empty() {
        exe.to_string()
    } else {
        format!("{exe} {}", body.join(" "))
    }
}

/// Argv form of the same invocation, for spawning the process directly
/// without going through a shell.
pub fn invocation(pm: PackageManager, args: &[String], is_windows: bool) -> (String, Vec<String>) {
    let exe = pm.executable(is_windows).to_string();
    let mut argv: Vec<String> = Vec::new();
    if pm == PackageManager::Pnpm {
        argv.push("dlx".to_string());
    }
    argv.extend(args.iter().cloned());
    (exe, argv)
}

fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '&' | '|' | '>' | '<'))
}

fn quote_arg(arg: &str, is_windows: bool) -> String {
    if !needs_quoting(arg) {
        return arg.to_string();
    }
    if is_windows {
        quote_windows(arg)
    } else {
        // POSIX: close the quote, emit an escaped quote, reopen.
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

// Backslashes are only special in front of a double quote: those get doubled
// (plus one to escape the quote itself), and a trailing run is doubled so it
// cannot escape the closing quote. This is the CommandLineToArgvW rule.
fn quote_windows(arg: &str) -> String {
    let mut out = String::from("\"");
    let mut pending = 0usize;
    for ch in arg.chars() {
        if ch == '\\' {
            pending += 1;
            continue;
        }
        if ch == '"' {
            for _ in 0..pending * 2 + 1 {
                out.push('\\');
            }
            pending = 0;
            out.push('"');
            continue;
        }
        for _ in 0..pending {
            out.push('\\');
        }
        pending = 0;
        out.push(ch);
    }
    for _ in 0..pending * 2 {
        out.push('\\');
    }
    out.push('"');
    out
}
