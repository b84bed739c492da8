pub mod page;
pub mod repository;
pub mod todo;
