pub mod aggregate;
pub mod backup;
pub mod calendar;
pub mod coverage;
pub mod nav;
pub mod populate;
