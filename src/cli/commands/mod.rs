pub mod migrate;
pub mod teachers;
pub mod users;
