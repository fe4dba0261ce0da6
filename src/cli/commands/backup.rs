use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::backup_database;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let path = backup_database(cfg, file, *compress, *force)?;
        success(format!("Backup created: {}", path.display()));
    }
    Ok(())
}
