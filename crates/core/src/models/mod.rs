pub mod cart;
pub mod outcome;
pub mod product;
pub mod settings;
pub mod stock;
