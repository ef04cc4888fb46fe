//! Town services.

pub mod shop;

pub use shop::ShopError;
