pub mod entries;
pub mod health;
pub mod insights;
pub mod routines;
pub mod targets;
pub mod tasks;
pub mod trends;
