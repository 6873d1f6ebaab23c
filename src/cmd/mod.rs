mod db;
mod detect;
mod env;
mod gen;

pub use db::cmd_db;
pub use detect::cmd_detect;
pub use env::cmd_env;
pub use gen::{cmd_gen_migration, cmd_gen_seed, MigrationOpts};
