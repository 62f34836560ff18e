pub mod delete;
pub mod load;
pub mod save;
pub mod status;
