pub mod identity;
pub mod other;
