pub mod catalog;
pub mod office;
pub mod purchase;
pub mod user;
