pub mod adjust_kind;
pub mod allocation;
pub mod day_entry;
pub mod period;
pub mod ticket;
