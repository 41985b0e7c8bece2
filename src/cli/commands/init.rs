use crate::cli::parser::Cli;
use crate::config::{BackendKind, Config};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with --test)
///  - the SQLite database and its schema when `--db` selects the local backend
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing infratrack…");
    println!("📄 Config file : {}", Config::config_file().display());

    if cfg.backend == BackendKind::Local {
        // apertura = migrazioni applicate
        cfg.connect()?;
        println!("🗄️  Database   : {}", cfg.database);
    } else {
        info("Remote backend selected: set supabase_url and supabase_key with `config --edit`.");
    }

    success("infratrack initialization completed!");
    Ok(())
}
