//! Entities

pub mod category;
pub mod product;

pub use category::{Category, CategorySummary, NewCategory};
pub use product::{
    NewAttribute, NewImage, NewProduct, NewVariant, Product, ProductDetails, ProductPreview,
    ProductVariant, VariantAttribute, VariantDetails, VariantImage,
};
