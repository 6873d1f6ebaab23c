use clap::{Parser, Subcommand};

pub const USAGE_TEXT: &str = r#"sqz: sequelize-cli helper for Node projects

Usage:
  sqz detect
  sqz gen migration <name> [--table <table> --columns <columns>]
  sqz gen seed <name> [--env <env>] [--print]
  sqz db migrate|migrate-undo|seed [--env <env>] [--print]
  sqz env [<name>]
  sqz help

Conventions:
  - The project root is the current working directory.
  - Migration files land in <root>/migrations/ with a 14-digit timestamp prefix.
  - New files match the module system already in use: existing .mjs/.cjs/.js
    files in migrations/ win over the package.json "type" field.
  - Wrapped sequelize-cli calls go through npx, yarn, or pnpm dlx depending on
    which lockfile is present (pnpm-lock.yaml, then yarn.lock, else npm).
  - The selected environment persists in <root>/.sqz.json (default: development).
"#;

#[derive(Parser, Debug)]
#[command(name = "sqz")]
#[command(disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print usage
    Help,

    /// Show the detected module system and package manager for this project
    Detect,

    /// Generate project files
    Gen {
        #[command(subcommand)]
        target: GenTarget,
    },

    /// Run sequelize-cli database commands through the detected package manager
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print or set the selected environment
    Env { name: Option<String> },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GenTarget {
    /// Write a new timestamped migration file under migrations/
    Migration {
        name: String,
        /// Use the create-table template for this table
        #[arg(long)]
        table: Option<String>,
        /// Columns object literal substituted into the create-table template
        #[arg(long)]
        columns: Option<String>,
    },
    /// Invoke `sequelize-cli seed:generate` for a new seed file
    Seed {
        name: String,
        /// Target environment (overrides the persisted selection)
        #[arg(long)]
        env: Option<String>,
        /// Print the command that would be run and exit
        #[arg(long)]
        print: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DbAction {
    /// Apply pending migrations
    Migrate {
        /// Target environment (overrides the persisted selection)
        #[arg(long)]
        env: Option<String>,
        /// Print the command that would be run and exit
        #[arg(long)]
        print: bool,
    },
    /// Revert the most recent migration
    MigrateUndo {
        #[arg(long)]
        env: Option<String>,
        #[arg(long)]
        print: bool,
    },
    /// Run all seeders
    Seed {
        #[arg(long)]
        env: Option<String>,
        #[arg(long)]
        print: bool,
    },
}
