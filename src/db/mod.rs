pub mod repository;
pub mod writer;
