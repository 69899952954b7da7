//! PostgreSQL repository tests. Run with `cargo test -- --ignored` when Docker
//! is available.

use domain_products::{
    CreateProduct, PgProductRepository, ProductError, ProductRepository, ProductService,
    UpdateProduct,
};
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_price_eq};

fn new_product(builder: &TestDataBuilder, suffix: &str) -> CreateProduct {
    CreateProduct {
        name: builder.product_name(suffix),
        price: builder.price(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get() {
    let db = TestDatabase::new().await;
    let repository = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("test_create_and_get");

    let created = repository.create(new_product(&builder, "main")).await.unwrap();
    assert_eq!(created.id, 1);
    assert!(created.availability);
    assert_price_eq(created.price, builder.price(), "created price");

    let fetched = repository.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
    assert_eq!(repository.get_by_id(999).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_is_ordered_by_id() {
    let db = TestDatabase::new().await;
    let repository = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("test_list_is_ordered_by_id");

    for suffix in ["a", "b", "c"] {
        repository.create(new_product(&builder, suffix)).await.unwrap();
    }
    // An update moves the row physically; order must still follow ids.
    repository
        .update(
            1,
            UpdateProduct {
                name: builder.product_name("a2"),
                price: 5.0,
                availability: false,
            },
        )
        .await
        .unwrap();

    let ids: Vec<i32> = repository
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_availability() {
    let db = TestDatabase::new().await;
    let repository = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("test_update_and_availability");

    let created = repository.create(new_product(&builder, "main")).await.unwrap();

    let updated = repository
        .update(
            created.id,
            UpdateProduct {
                name: "Monitor 4K".to_string(),
                price: 450.5,
                availability: true,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Monitor 4K");
    assert_price_eq(updated.price, 450.5, "updated price");

    let toggled = repository
        .set_availability(created.id, None)
        .await
        .unwrap()
        .unwrap();
    assert!(!toggled.availability);

    let set = repository
        .set_availability(created.id, Some(false))
        .await
        .unwrap()
        .unwrap();
    assert!(!set.availability);

    assert!(repository.set_availability(999, None).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_and_id_sequence() {
    let db = TestDatabase::new().await;
    let repository = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("test_delete_and_id_sequence");

    let first = repository.create(new_product(&builder, "a")).await.unwrap();
    assert!(repository.delete(first.id).await.unwrap());
    assert!(!repository.delete(first.id).await.unwrap());

    let second = repository.create(new_product(&builder, "b")).await.unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_price_check_constraint() {
    let db = TestDatabase::new().await;
    let repository = PgProductRepository::new(db.connection());

    let result = repository
        .create(CreateProduct {
            name: "Gratis".to_string(),
            price: 0.0,
        })
        .await;

    assert!(matches!(result, Err(ProductError::Database(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_not_found_through_postgres() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let result = service.get_product(12).await;
    assert!(matches!(result, Err(ProductError::NotFound(12))));

    let result = service.delete_product(12).await;
    assert!(matches!(result, Err(ProductError::NotFound(12))));
}
