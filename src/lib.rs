pub mod cli;
pub mod connection;
pub mod netkill;
pub mod platform;
pub mod port;
pub mod select;
pub mod shell;
pub mod signal;
pub mod table;
pub mod unix;
pub mod windows;
