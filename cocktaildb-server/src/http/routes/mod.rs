//! Route handlers organized by resource

pub mod cocktails;
pub mod health;
pub mod lookup;
