pub mod articles;
pub mod health;
pub mod pages;
pub mod theme;
pub mod topics;
