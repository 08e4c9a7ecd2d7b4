pub mod photos;
pub mod reports;
