pub mod context;
pub mod exam;
pub mod question;
