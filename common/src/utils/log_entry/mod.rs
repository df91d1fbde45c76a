pub mod database;
pub mod io;
pub mod system;
pub mod task;
