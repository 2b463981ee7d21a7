//! Value Objects

pub mod display_type;
pub mod product_status;

pub use display_type::DisplayType;
pub use product_status::ProductStatus;
