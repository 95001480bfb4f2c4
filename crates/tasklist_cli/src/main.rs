//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklist_core` linkage.
//! - Report what the configured device store currently holds.

use tasklist_core::{init_logging, CoreConfig, FieldRequirements, SqliteKeyValueStore, TaskStore};

fn main() {
    let config = CoreConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_ref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("tasklist logging disabled: {err}");
        }
    }

    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    match SqliteKeyValueStore::open(&config.db_path) {
        Ok(storage) => {
            let store = TaskStore::open(storage, FieldRequirements::title_only());
            println!(
                "tasklist db={} tasks={} completed={}",
                config.db_path.display(),
                store.len(),
                store.completed_count()
            );
        }
        Err(err) => {
            log::error!("event=cli_open module=cli status=error error={err}");
            eprintln!("tasklist db={} unavailable: {err}", config.db_path.display());
            std::process::exit(1);
        }
    }
}
