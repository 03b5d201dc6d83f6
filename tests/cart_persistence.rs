use chrono::Utc;
use storefront_api::{
    cart::{CartProduct, CartStore, JsonFileStorage, Session},
    models::Product,
};
use uuid::Uuid;

fn catalog_product(stock: i32, price: i64, discount_price: Option<i64>) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: "MacBook Air M1 (Refurbished)".into(),
        description: Some("Grade A".into()),
        price,
        discount_price,
        stock,
        image: Some("https://cdn.example.com/mba.png".into()),
        product_type: Some("Apple".into()),
        condition: Some("Refurbished Condition".into()),
        rating: 4.4,
        review_count: 18,
        collection: Some("Laptops".into()),
        collection_slug: Some("laptops".into()),
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session").join("cart.json");
    let session = Session::signed_in(Uuid::new_v4());

    let laptop = catalog_product(3, 6_500_000, Some(5_999_900));
    let charger = catalog_product(20, 249_900, None);

    {
        let mut cart = CartStore::open(JsonFileStorage::new(&path));
        cart.add_to_cart(&session, CartProduct::from(&laptop), 2).unwrap();
        cart.add_to_cart(&session, CartProduct::from(&charger), 1).unwrap();
        cart.update_quantity(charger.id, 4).unwrap();
    }

    let cart = CartStore::open(JsonFileStorage::new(&path));
    assert_eq!(cart.line_count(), 2);
    assert_eq!(cart.items()[0].product.id, laptop.id);
    assert_eq!(cart.items()[0].product.collection.as_deref(), Some("Laptops"));
    assert_eq!(cart.get(charger.id).unwrap().quantity, 4);
    assert_eq!(cart.subtotal(), 2 * 5_999_900 + 4 * 249_900);
    assert_eq!(cart.summary().total, cart.subtotal());
}

#[test]
fn clearing_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    let session = Session::signed_in(Uuid::new_v4());

    let mut cart = CartStore::open(JsonFileStorage::new(&path));
    cart.add_to_cart(&session, catalog_product(5, 1_000, None).into(), 1)
        .unwrap();
    cart.clear_cart().unwrap();

    let reopened = CartStore::open(JsonFileStorage::new(&path));
    assert!(reopened.is_empty());
}

#[test]
fn corrupt_file_opens_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    std::fs::write(&path, b"{\"items\": [oops").unwrap();

    let mut cart = CartStore::open(JsonFileStorage::new(&path));
    assert!(cart.is_empty());

    // the next save replaces the broken document
    let session = Session::signed_in(Uuid::new_v4());
    let product = catalog_product(2, 500, None);
    cart.add_to_cart(&session, product.clone().into(), 5).unwrap();
    let reopened = CartStore::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.get(product.id).unwrap().quantity, 2);
}
