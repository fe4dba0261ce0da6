use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::session;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Browse) {
        let mut pool = DbPool::new(&cfg.database)?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        session::run(&mut pool, cfg, stdin.lock(), &mut stdout)?;
    }
    Ok(())
}
