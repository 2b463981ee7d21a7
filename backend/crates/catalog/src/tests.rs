//! Router-level tests for categories and products
//!
//! Run against in-memory repositories and a counting image store; no
//! database or network required.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use auth::domain::{User, UserRole};
use auth::{AuthConfig, TokenService};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use kernel::id::{CategoryId, ImageId, ProductId, UserId, VariantId};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::CatalogConfig;
use crate::application::image_batch::{CompletedImage, ImageCompensator};
use crate::application::product::{CreateProductInput, CreateProductUseCase};
use crate::domain::entity::{
    Category, CategorySummary, NewAttribute, NewCategory, NewImage, NewProduct, NewVariant,
    Product, ProductDetails, ProductPreview, ProductVariant, VariantAttribute, VariantDetails,
    VariantImage,
};
use crate::domain::image_store::{ImageStore, ImageUpload, UploadedImage};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::domain::value_object::ProductStatus;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::router::{categories_router_generic, products_router_generic};

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct State {
    next_id: i32,
    categories: Vec<Category>,
    products: Vec<Product>,
    variants: Vec<ProductVariant>,
    attributes: Vec<VariantAttribute>,
    images: Vec<VariantImage>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Emulates the schema's unique, foreign key and check constraints
#[derive(Clone, Default)]
struct MemoryCatalog {
    state: Arc<Mutex<State>>,
}

impl MemoryCatalog {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl CategoryRepository for MemoryCatalog {
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.state().categories.iter().any(|c| c.name == name))
    }

    async fn create(&self, category: &NewCategory) -> CatalogResult<CategoryId> {
        let mut state = self.state();
        if state.categories.iter().any(|c| c.name == category.name) {
            return Err(CatalogError::Conflict("duplicate category".into()));
        }
        let id = state.next_id + 1;
        if let Some(parent) = category.parent_id {
            if parent.value() == id {
                return Err(CatalogError::InvalidInput(
                    "A category cannot be its own parent.".into(),
                ));
            }
            if !state.categories.iter().any(|c| c.id == parent) {
                return Err(CatalogError::InvalidReference("missing parent".into()));
            }
        }
        let id = CategoryId::new(state.next_id());
        let now = Utc::now();
        state.categories.push(Category {
            id,
            name: category.name.clone(),
            description: Some(category.description.clone()),
            parent_id: category.parent_id,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.state().categories.clone())
    }

    async fn list_summaries(&self) -> CatalogResult<Vec<CategorySummary>> {
        Ok(self
            .state()
            .categories
            .iter()
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name.clone(),
            })
            .collect())
    }

    async fn delete(&self, id: CategoryId) -> CatalogResult<bool> {
        let mut state = self.state();
        if !state.categories.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            doomed.extend(
                state
                    .categories
                    .iter()
                    .filter(|c| c.parent_id == Some(parent))
                    .map(|c| c.id),
            );
            cursor += 1;
        }
        state.categories.retain(|c| !doomed.contains(&c.id));
        for product in &mut state.products {
            if product.category_id.is_some_and(|c| doomed.contains(&c)) {
                product.category_id = None;
            }
        }
        Ok(true)
    }
}

impl ProductRepository for MemoryCatalog {
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.state().products.iter().any(|p| p.name == name))
    }

    async fn exists(&self, id: ProductId) -> CatalogResult<bool> {
        Ok(self.state().products.iter().any(|p| p.id == id))
    }

    async fn category_exists(&self, id: CategoryId) -> CatalogResult<bool> {
        Ok(self.state().categories.iter().any(|c| c.id == id))
    }

    async fn variant_exists(&self, id: VariantId) -> CatalogResult<bool> {
        Ok(self.state().variants.iter().any(|v| v.id == id))
    }

    async fn create(&self, product: &NewProduct) -> CatalogResult<ProductId> {
        let mut state = self.state();
        if state.products.iter().any(|p| p.name == product.name) {
            return Err(CatalogError::Conflict(
                "A product with that name already exists.".into(),
            ));
        }
        if let Some(category) = product.category_id {
            if !state.categories.iter().any(|c| c.id == category) {
                return Err(CatalogError::InvalidReference("missing category".into()));
            }
        }
        let id = ProductId::new(state.next_id());
        let now = Utc::now();
        state.products.push(Product {
            id,
            name: product.name.clone(),
            description: Some(product.description.clone()),
            status: product.status,
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn create_variant(&self, variant: &NewVariant) -> CatalogResult<VariantId> {
        let mut state = self.state();
        if state.variants.iter().any(|v| v.sku_code == variant.sku_code) {
            return Err(CatalogError::Conflict("duplicate sku".into()));
        }
        let id = VariantId::new(state.next_id());
        state.variants.push(ProductVariant {
            id,
            product_id: variant.product_id,
            sku_code: variant.sku_code.clone(),
            price: variant.price,
            stock: variant.stock,
            is_default: variant.is_default,
        });
        Ok(id)
    }

    async fn create_attribute(&self, attribute: &NewAttribute) -> CatalogResult<()> {
        let mut state = self.state();
        let id = state.next_id();
        state.attributes.push(VariantAttribute {
            id,
            variant_id: attribute.variant_id,
            attribute_name: attribute.attribute_name.clone(),
            attribute_value: attribute.attribute_value.clone(),
            display_value: attribute.display_value.clone(),
            display_type: attribute.display_type,
            is_filterable: attribute.is_filterable,
            sort_order: attribute.sort_order,
        });
        Ok(())
    }

    async fn create_image(&self, image: &NewImage) -> CatalogResult<ImageId> {
        let mut state = self.state();
        if !state.variants.iter().any(|v| v.id == image.variant_id) {
            return Err(CatalogError::InvalidReference("missing variant".into()));
        }
        let id = ImageId::new(state.next_id());
        state.images.push(VariantImage {
            id,
            variant_id: image.variant_id,
            url: image.url.clone(),
            is_primary: image.is_primary,
            public_id: image.public_id.clone(),
        });
        Ok(id)
    }

    async fn list_previews(&self) -> CatalogResult<Vec<ProductPreview>> {
        let state = self.state();
        Ok(state
            .products
            .iter()
            .filter(|p| p.status == ProductStatus::Active)
            .filter_map(|p| {
                let variant = state
                    .variants
                    .iter()
                    .find(|v| v.product_id == p.id && v.is_default)?;
                let image = state
                    .images
                    .iter()
                    .find(|i| i.variant_id == variant.id && i.is_primary)?;
                Some(ProductPreview {
                    id: p.id,
                    name: p.name.clone(),
                    price: variant.price,
                    stock: variant.stock,
                    url: image.url.clone(),
                })
            })
            .collect())
    }

    async fn find_details(&self, id: ProductId) -> CatalogResult<Option<ProductDetails>> {
        let state = self.state();
        let Some(product) = state.products.iter().find(|p| p.id == id).cloned() else {
            return Ok(None);
        };
        let variants = state
            .variants
            .iter()
            .filter(|v| v.product_id == id)
            .map(|v| VariantDetails {
                variant: v.clone(),
                attributes: state
                    .attributes
                    .iter()
                    .filter(|a| a.variant_id == v.id)
                    .cloned()
                    .collect(),
                images: state
                    .images
                    .iter()
                    .filter(|i| i.variant_id == v.id)
                    .cloned()
                    .collect(),
            })
            .collect();
        Ok(Some(ProductDetails { product, variants }))
    }

    async fn deactivate(&self, id: ProductId) -> CatalogResult<bool> {
        let mut state = self.state();
        match state.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.status = ProductStatus::Inactive;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Image store and compensator doubles
// ============================================================================

/// Counts uploads; payloads equal to `b"fail"` are refused
#[derive(Clone, Default)]
struct CountingImageStore {
    calls: Arc<AtomicUsize>,
}

impl CountingImageStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageStore for CountingImageStore {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> CatalogResult<UploadedImage> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if image.bytes == b"fail" {
            return Err(CatalogError::Upload("refused".into()));
        }
        Ok(UploadedImage {
            secure_url: format!("https://img.test/{folder}/{n}.png"),
            public_id: format!("{folder}/{n}"),
        })
    }
}

#[derive(Clone, Default)]
struct RecordingCompensator {
    seen: Arc<Mutex<Vec<CompletedImage>>>,
}

impl ImageCompensator for RecordingCompensator {
    async fn compensate(&self, completed: &[CompletedImage]) {
        self.seen.lock().unwrap().extend_from_slice(completed);
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    categories: Router,
    products: Router,
    store: CountingImageStore,
    compensator: RecordingCompensator,
    tokens: Arc<TokenService>,
}

fn harness() -> Harness {
    harness_with(CatalogConfig::default())
}

fn harness_with(config: CatalogConfig) -> Harness {
    let tokens = Arc::new(TokenService::new(&AuthConfig::new("test-secret")));
    let catalog = MemoryCatalog::default();
    let store = CountingImageStore::default();
    let compensator = RecordingCompensator::default();

    Harness {
        categories: categories_router_generic(catalog.clone(), tokens.clone()),
        products: products_router_generic(
            catalog,
            store.clone(),
            compensator.clone(),
            config,
            tokens.clone(),
        ),
        store,
        compensator,
        tokens,
    }
}

enum Part<'a> {
    File(&'a str, &'a [u8]),
    Metadata(Value),
}

const BOUNDARY: &str = "catalog-test-boundary";

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File(content_type, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"files\"; filename=\"img{i}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Metadata(value) => {
                body.extend_from_slice(
                    b"Content-Disposition: form-data; name=\"metadata\"\r\n\r\n",
                );
                body.extend_from_slice(value.to_string().as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

impl Harness {
    fn token(&self, role: UserRole) -> String {
        let now = Utc::now();
        self.tokens
            .issue(&User {
                id: UserId::new(1),
                username: format!("{role}-user"),
                email: format!("{role}@example.com"),
                role,
                created_at: now,
                updated_at: now,
            })
            .unwrap()
    }

    async fn call(
        &self,
        app: &Router,
        request: Request<Body>,
    ) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn json(
        &self,
        app: &Router,
        method: &str,
        uri: &str,
        role: Option<UserRole>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(role)));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.call(app, request).await
    }

    async fn upload(&self, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/add-product-images")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token(UserRole::Admin)),
            )
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.call(&self.products, request).await
    }

    async fn add_category(&self, body: Value) -> (StatusCode, Value) {
        self.json(
            &self.categories,
            "POST",
            "/add-category",
            Some(UserRole::SuperAdmin),
            Some(body),
        )
        .await
    }

    async fn category_names(&self) -> Vec<String> {
        let (status, body) = self
            .json(
                &self.categories,
                "GET",
                "/get-categories-idname",
                Some(UserRole::Admin),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect()
    }

    async fn add_product(&self, body: Value) -> (StatusCode, Value) {
        self.json(&self.products, "POST", "/add-product", Some(UserRole::Admin), Some(body))
            .await
    }

    async fn add_variant(&self, body: Value) -> (StatusCode, Value) {
        self.json(
            &self.products,
            "POST",
            "/add-product-variant",
            Some(UserRole::Admin),
            Some(body),
        )
        .await
    }

    /// Product plus one default variant; returns (product_id, variant_id)
    async fn seed_product(&self, name: &str) -> (i64, i64) {
        let (status, body) = self
            .add_product(json!({ "name": name, "status": "active" }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let product_id = body["product_id"].as_i64().unwrap();

        let (status, body) = self
            .add_variant(json!({
                "product_id": product_id,
                "sku_code": format!("{name}-SKU"),
                "price": 12.34,
                "stock": 5,
                "is_default": true
            }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (product_id, body["variant_id"].as_i64().unwrap())
    }
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn category_names_are_lower_cased_and_unique() {
    let h = harness();

    let (status, body) = h.add_category(json!({ "name": "Shoes" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let shoes_id = body["category_id"].as_i64().unwrap();

    let (status, _) = h.add_category(json!({ "name": "shoes" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(h.category_names().await, vec!["shoes"]);

    let (status, _) = h
        .json(
            &h.categories,
            "DELETE",
            "/delete-category",
            Some(UserRole::SuperAdmin),
            Some(json!({ "id": shoes_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(h.category_names().await.is_empty());
}

#[tokio::test]
async fn deleting_a_category_removes_its_children() {
    let h = harness();
    let (_, parent) = h.add_category(json!({ "name": "Clothing" })).await;
    let parent_id = parent["category_id"].as_i64().unwrap();
    let (status, _) = h
        .add_category(json!({ "name": "Shirts", "parent_id": parent_id }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    h.add_category(json!({ "name": "Toys" })).await;

    let (status, _) = h
        .json(
            &h.categories,
            "DELETE",
            "/delete-category",
            Some(UserRole::SuperAdmin),
            Some(json!({ "id": parent_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.category_names().await, vec!["toys"]);
}

#[tokio::test]
async fn category_parent_must_exist_and_differ_from_itself() {
    let h = harness();

    let (status, _) = h
        .add_category(json!({ "name": "Orphan", "parent_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The next id handed out is 1, so this row would point at itself
    let (status, body) = h
        .add_category(json!({ "name": "Loop", "parent_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A category cannot be its own parent.");
}

#[tokio::test]
async fn category_description_defaults_to_placeholder() {
    let h = harness();
    h.add_category(json!({ "name": "Bags", "description": "" })).await;

    let (status, body) = h
        .json(
            &h.categories,
            "GET",
            "/get-categories",
            Some(UserRole::SuperAdmin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"][0]["description"], "No description");
    assert_eq!(body["categories"][0]["parent_id"], Value::Null);
}

#[tokio::test]
async fn category_routes_enforce_roles() {
    let h = harness();

    let (status, _) = h
        .json(&h.categories, "GET", "/get-categories", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = h
        .json(
            &h.categories,
            "GET",
            "/get-categories",
            Some(UserRole::Admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = h
        .json(
            &h.categories,
            "GET",
            "/get-categories-idname",
            Some(UserRole::Viewer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_unknown_category_is_not_found() {
    let h = harness();
    let (status, _) = h
        .json(
            &h.categories,
            "DELETE",
            "/delete-category",
            Some(UserRole::SuperAdmin),
            Some(json!({ "id": 42 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Product composite workflow
// ============================================================================

#[tokio::test]
async fn full_product_workflow_is_visible_in_details_and_preview() {
    let h = harness();
    let (_, category) = h.add_category(json!({ "name": "Shoes" })).await;

    let (status, body) = h
        .add_product(json!({
            "name": "Runner",
            "description": "Light trail shoe",
            "status": "active",
            "category_id": category["category_id"]
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = body["product_id"].as_i64().unwrap();

    let (status, body) = h
        .add_variant(json!({
            "product_id": product_id,
            "sku_code": "RUN-42",
            "price": 12.34,
            "stock": 7,
            "is_default": true
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let variant_id = body["variant_id"].as_i64().unwrap();

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-attribute",
            Some(UserRole::SuperAdmin),
            Some(json!({
                "variant_id": variant_id,
                "attribute_name": "color",
                "attribute_value": "red",
                "display_value": "Red",
                "display_type": "color_swatch",
                "is_filterable": true,
                "sort_order": 0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = h
        .upload(&[
            Part::File("image/png", b"png-bytes"),
            Part::Metadata(json!({ "variant_id": variant_id, "is_primary": true })),
        ])
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(h.store.calls(), 1);

    let (status, body) = h
        .json(
            &h.products,
            "GET",
            &format!("/get-products/{product_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["name"], "Runner");
    assert_eq!(data["description"], "Light trail shoe");
    assert_eq!(data["status"], "active");
    assert_eq!(data["variants"][0]["sku_code"], "RUN-42");
    assert_eq!(data["variants"][0]["price"], "12.34");
    assert_eq!(data["variants"][0]["attributes"][0]["display_type"], "color_swatch");
    assert_eq!(data["variants"][0]["images"][0]["is_primary"], true);

    let (status, body) = h
        .json(&h.products, "GET", "/get-products", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["id"], product_id);
    assert_eq!(body["products"][0]["stock"], 7);
    assert_eq!(
        body["products"][0]["url"],
        "https://img.test/mini_feria_products/1.png"
    );
}

#[tokio::test]
async fn product_names_are_unique_and_case_sensitive() {
    let h = harness();
    let (status, _) = h.add_product(json!({ "name": "Mug", "status": "draft" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = h.add_product(json!({ "name": "Mug", "status": "draft" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, _) = h.add_product(json!({ "name": "mug", "status": "draft" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn concurrent_duplicate_products_yield_one_conflict() {
    let catalog = Arc::new(MemoryCatalog::default());
    let input = || CreateProductInput {
        name: Some("Lamp".into()),
        description: None,
        status: Some("active".into()),
        category_id: None,
    };
    let first = CreateProductUseCase::new(catalog.clone());
    let second = CreateProductUseCase::new(catalog.clone());

    let (a, b) = tokio::join!(first.execute(input()), second.execute(input()));

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(CatalogError::Conflict(_))))
    );
}

#[tokio::test]
async fn product_creation_validates_status_and_category() {
    let h = harness();

    let (status, _) = h.add_product(json!({ "name": "", "status": "active" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .add_product(json!({ "name": "Hat", "status": "inactive" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .add_product(json!({ "name": "Hat", "status": "active", "category_id": 77 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn variant_price_follows_decimal_rule() {
    let h = harness();
    let (product_id, _) = h.seed_product("Desk").await;

    let variant = |sku: &str, price: Value| {
        json!({
            "product_id": product_id,
            "sku_code": sku,
            "price": price,
            "stock": 1,
            "is_default": false
        })
    };

    let (status, _) = h.add_variant(variant("A", json!(12.345))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h.add_variant(variant("B", json!(12_345_678_901_u64))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h.add_variant(variant("C", json!(-1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h.add_variant(variant("D", json!(1_234_567_890_u64))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = h.add_variant(variant("E", json!(12.34))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = h.add_variant(variant("E", json!(1))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn variant_requires_existing_product_and_whole_stock() {
    let h = harness();

    let (status, _) = h
        .add_variant(json!({
            "product_id": 404,
            "sku_code": "X",
            "price": 1,
            "stock": 1,
            "is_default": true
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (product_id, _) = h.seed_product("Chair").await;
    let (status, body) = h
        .add_variant(json!({
            "product_id": product_id,
            "sku_code": "Y",
            "price": 1,
            "stock": 1.5,
            "is_default": true
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Stock"));
}

#[tokio::test]
async fn attribute_checks_display_type_and_sort_order() {
    let h = harness();
    let (_, variant_id) = h.seed_product("Sofa").await;

    let attribute = |display_type: &str, sort_order: i64| {
        json!({
            "variant_id": variant_id,
            "attribute_name": "size",
            "attribute_value": "xl",
            "display_value": "XL",
            "display_type": display_type,
            "is_filterable": false,
            "sort_order": sort_order
        })
    };

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-attribute",
            Some(UserRole::Admin),
            Some(attribute("dropdown", 0)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-attribute",
            Some(UserRole::Admin),
            Some(attribute("select", -1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-attribute",
            Some(UserRole::Admin),
            Some(json!({ "variant_id": 999, "attribute_name": "size" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Image batch
// ============================================================================

#[tokio::test]
async fn metadata_count_mismatch_makes_no_uploads() {
    let h = harness();
    let (_, variant_id) = h.seed_product("Frame").await;

    let (status, body) = h
        .upload(&[
            Part::File("image/png", b"one"),
            Part::File("image/png", b"two"),
            Part::Metadata(json!({ "variant_id": variant_id, "is_primary": true })),
        ])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn invalid_metadata_makes_no_uploads() {
    let h = harness();
    let (_, variant_id) = h.seed_product("Vase").await;

    let (status, _) = h
        .upload(&[
            Part::File("image/png", b"one"),
            Part::File("image/png", b"two"),
            Part::Metadata(json!({ "variant_id": variant_id, "is_primary": true })),
            Part::Metadata(json!({ "variant_id": 0, "is_primary": false })),
        ])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn non_image_payload_is_unsupported_media_type() {
    let h = harness();
    let (status, _) = h
        .upload(&[
            Part::File("application/pdf", b"%PDF"),
            Part::Metadata(json!({ "variant_id": 1, "is_primary": true })),
        ])
        .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn oversized_payload_is_rejected() {
    let h = harness_with(CatalogConfig {
        max_image_bytes: 16,
        ..CatalogConfig::default()
    });
    let (status, _) = h
        .upload(&[
            Part::File("image/jpeg", &[0u8; 17]),
            Part::Metadata(json!({ "variant_id": 1, "is_primary": true })),
        ])
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn too_many_files_are_rejected() {
    let h = harness_with(CatalogConfig {
        max_images: 1,
        ..CatalogConfig::default()
    });
    let (status, _) = h
        .upload(&[
            Part::File("image/png", b"one"),
            Part::File("image/png", b"two"),
        ])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.store.calls(), 0);
}

#[tokio::test]
async fn partial_failure_reports_aggregate_and_compensates() {
    let h = harness();
    let (_, variant_id) = h.seed_product("Clock").await;

    let (status, body) = h
        .upload(&[
            Part::File("image/png", b"good"),
            Part::File("image/png", b"fail"),
            Part::Metadata(json!({ "variant_id": variant_id, "is_primary": true })),
            Part::Metadata(json!({ "variant_id": variant_id, "is_primary": false })),
        ])
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "1 of 2 images could not be uploaded and associated."
    );
    assert_eq!(h.store.calls(), 2);

    let seen = h.compensator.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].index, 0);
    assert!(seen[0].image_id.is_some());
}

#[tokio::test]
async fn failed_row_insert_still_reports_live_upload() {
    let h = harness();

    // Variant 999 does not exist, so the upload lands but the row does not
    let (status, _) = h
        .upload(&[
            Part::File("image/png", b"orphan"),
            Part::Metadata(json!({ "variant_id": 999, "is_primary": true })),
        ])
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let seen = h.compensator.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].public_id, "mini_feria_products/1");
    assert!(seen[0].image_id.is_none());
}

// ============================================================================
// Reads and soft delete
// ============================================================================

#[tokio::test]
async fn product_detail_ids_are_validated() {
    let h = harness();

    let (status, body) = h
        .json(&h.products, "GET", "/get-products/abc", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = h
        .json(&h.products, "GET", "/get-products/0", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .json(&h.products, "GET", "/get-products/999", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn soft_delete_hides_product_from_preview() {
    let h = harness();
    let (product_id, variant_id) = h.seed_product("Kettle").await;
    h.upload(&[
        Part::File("image/webp", b"kettle"),
        Part::Metadata(json!({ "variant_id": variant_id, "is_primary": true })),
    ])
    .await;

    let (_, body) = h
        .json(&h.products, "GET", "/get-products", None, None)
        .await;
    assert_eq!(body["products"].as_array().unwrap().len(), 1);

    let (status, _) = h
        .json(
            &h.products,
            "PUT",
            &format!("/delete-product/{product_id}"),
            Some(UserRole::Admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = h
        .json(&h.products, "GET", "/get-products", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "products": [] }));

    let (_, body) = h
        .json(
            &h.products,
            "GET",
            &format!("/get-products/{product_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(body["data"]["status"], "inactive");

    let (status, _) = h
        .json(
            &h.products,
            "PUT",
            "/delete-product/555",
            Some(UserRole::Admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_writes_require_staff_role() {
    let h = harness();

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-product",
            None,
            Some(json!({ "name": "Rug", "status": "active" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = h
        .json(
            &h.products,
            "POST",
            "/add-product",
            Some(UserRole::Viewer),
            Some(json!({ "name": "Rug", "status": "active" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
