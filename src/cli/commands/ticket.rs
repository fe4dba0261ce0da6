use crate::cli::parser::{Commands, TicketCmd};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::models::ticket::Ticket;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::formatting::ellipsize;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Ticket { action } = cmd else {
        return Ok(());
    };
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TicketCmd::Add { id, description } => {
            let ticket = Ticket::new(id, description, date::today())?;
            queries::create_ticket(&pool.conn, &ticket)?;
            let _ = log::insert_log(&pool.conn, "ticket_add", &ticket.id, &ticket.description);
            success(format!("Ticket {} created", ticket.id));
        }

        TicketCmd::List { all } => {
            print_tickets(&queries::list_tickets(&pool.conn, *all)?);
        }

        TicketCmd::Search { query, all } => {
            print_tickets(&queries::search_tickets(&pool.conn, query, *all)?);
        }

        TicketCmd::Archive { id } => {
            queries::set_ticket_archived(&pool.conn, &id.to_uppercase(), true)?;
            success(format!("Ticket {} archived", id.to_uppercase()));
        }

        TicketCmd::Unarchive { id } => {
            queries::set_ticket_archived(&pool.conn, &id.to_uppercase(), false)?;
            success(format!("Ticket {} unarchived", id.to_uppercase()));
        }

        TicketCmd::Del { id } => {
            let id = id.to_uppercase();
            // Refused while allocations still reference the ticket
            queries::delete_ticket(&pool.conn, &id)?;
            let _ = log::insert_log(&pool.conn, "ticket_del", &id, "Ticket deleted");
            success(format!("Ticket {id} deleted"));
        }
    }

    Ok(())
}

fn print_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("No tickets.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("Description", 40),
        Column::new("Status", 8),
    ]);
    for t in tickets {
        table.add_row(vec![
            t.id.clone(),
            ellipsize(&t.description, 40),
            if t.archived { "Archived" } else { "Active" }.to_string(),
        ]);
    }
    print!("{}", table.render());
}
