pub mod exam;
pub mod health;
