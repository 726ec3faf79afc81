use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

// Embed settings templates at compile time
// Path: src/commands/storage.rs -> ../../templates/
const FILE_DATABASES_PY: &str = include_str!("../../templates/file_databases.py");
const REFRESH_PY: &str = include_str!("../../templates/refresh.py");

/// Which settings module to write over the target application's config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageProfile {
    /// Main store in app.db, server settings left to the application
    FileDatabases,
    /// Main store in main.db, server name/host/port read from the environment
    Refresh,
}

impl StorageProfile {
    pub fn template(self) -> &'static str {
        match self {
            StorageProfile::FileDatabases => FILE_DATABASES_PY,
            StorageProfile::Refresh => REFRESH_PY,
        }
    }

    /// SQLite files the application will create once restarted.
    pub fn database_files(self) -> [(&'static str, &'static str); 3] {
        let main = match self {
            StorageProfile::FileDatabases => "app.db",
            StorageProfile::Refresh => "main.db",
        };
        [
            (main, "main database"),
            ("active_cases.db", "active cases"),
            ("completed_cases.db", "completed cases"),
        ]
    }
}

/// Overwrite `path` with the settings module for `profile`.
pub fn pin(path: &Path, profile: StorageProfile) -> Result<()> {
    fs::write(path, profile.template())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?profile, "settings file rewritten");
    Ok(())
}

pub fn run(path: &Path, profile: StorageProfile) -> Result<()> {
    println!("Forcing file-based databases");
    println!("{}", "=".repeat(50));

    pin(path, profile)?;

    println!("Updated {} to use file-based databases", path.display());
    println!("Database files that will be created:");
    for (file, purpose) in profile.database_files() {
        println!("   - {} ({})", file, purpose);
    }
    println!();
    println!("Restart the application now");
    Ok(())
}
