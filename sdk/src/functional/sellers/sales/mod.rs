pub mod articles;
pub mod entire;
