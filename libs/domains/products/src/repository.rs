use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Storage for products.
///
/// Lookups by id return `None` for unknown ids; the service turns that into
/// a not-found error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new, available product and returns it with its id.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Every product, ordered by id.
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Overwrites name, price and availability.
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Sets availability to `Some(value)`, or flips it when `None`.
    async fn set_availability(
        &self,
        id: i32,
        availability: Option<bool>,
    ) -> ProductResult<Option<Product>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

/// In-memory implementation for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Default)]
struct InMemoryState {
    last_id: i32,
    products: BTreeMap<i32, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let product = Product {
            id: state.last_id,
            name: input.name,
            price: input.price,
            availability: true,
        };
        state.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(&id) else {
            return Ok(None);
        };

        product.name = input.name;
        product.price = input.price;
        product.availability = input.availability;

        Ok(Some(product.clone()))
    }

    async fn set_availability(
        &self,
        id: i32,
        availability: Option<bool>,
    ) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(&id) else {
            return Ok(None);
        };

        product.availability = availability.unwrap_or(!product.availability);

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("Monitor", 300.0)).await.unwrap();
        let second = repo.create(input("Teclado", 50.0)).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert!(first.availability);

        assert!(repo.delete(second.id).await.unwrap());
        let third = repo.create(input("Mouse", 20.0)).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["c", "a", "b"] {
            repo.create(input(name, 1.0)).await.unwrap();
        }

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_set_availability_toggles_or_sets() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Monitor", 300.0)).await.unwrap();

        let toggled = repo.set_availability(product.id, None).await.unwrap().unwrap();
        assert!(!toggled.availability);

        let set = repo.set_availability(product.id, Some(false)).await.unwrap().unwrap();
        assert!(!set.availability);

        let toggled = repo.set_availability(product.id, None).await.unwrap().unwrap();
        assert!(toggled.availability);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = InMemoryProductRepository::new();
        let update = UpdateProduct {
            name: "x".into(),
            price: 1.0,
            availability: true,
        };

        assert!(repo.get_by_id(7).await.unwrap().is_none());
        assert!(repo.update(7, update).await.unwrap().is_none());
        assert!(repo.set_availability(7, None).await.unwrap().is_none());
        assert!(!repo.delete(7).await.unwrap());
    }
}
