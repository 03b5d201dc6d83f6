use uuid::Uuid;

use super::{AuthState, CartError, CartLineItem, CartProduct, CartStorage, CartSummary};

/// Owned cart state for one session.
///
/// Totals are never stored; every read recomputes them from `items`. Each
/// mutation saves the next item list first and only then replaces the
/// in-memory copy, so a failed save leaves the cart as it was.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<CartLineItem>,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the stored cart, falling back to an empty one if it is missing or unreadable.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(Some(items)) => normalize(items),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable stored cart");
                Vec::new()
            }
        };
        Self { items, storage }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, product_id: Uuid) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all line items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Sum of line totals, saturating at `i64::MAX`.
    pub fn subtotal(&self) -> i64 {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(0, i64::saturating_add)
    }

    pub fn summary(&self) -> CartSummary {
        let subtotal = self.subtotal();
        let shipping = 0;
        CartSummary {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }

    pub fn add_to_cart(
        &mut self,
        auth: &impl AuthState,
        product: CartProduct,
        quantity: i32,
    ) -> Result<&CartLineItem, CartError> {
        if !auth.is_authenticated() {
            return Err(CartError::AuthRequired);
        }
        if quantity <= 0 {
            return Err(CartError::Validation(quantity));
        }
        if let Some(price) = product.out_of_range_price() {
            return Err(CartError::InvalidPrice(price));
        }

        let mut next = self.items.clone();
        let index = match position(&next, product.id) {
            Some(index) => {
                let item = &mut next[index];
                let merged = item.quantity.saturating_add(quantity);
                // newest snapshot wins so the ceiling follows current stock
                item.product = product;
                item.quantity = item.product.clamp_quantity(merged);
                index
            }
            None => {
                let quantity = product.clamp_quantity(quantity);
                next.push(CartLineItem { product, quantity });
                next.len() - 1
            }
        };

        self.commit(next)?;
        let item = &self.items[index];
        tracing::debug!(
            product_id = %item.product.id,
            quantity = item.quantity,
            "cart item added"
        );
        Ok(item)
    }

    /// Removing a product that is not in the cart is a no-op.
    pub fn remove_from_cart(&mut self, product_id: Uuid) -> Result<(), CartError> {
        let Some(index) = position(&self.items, product_id) else {
            return Ok(());
        };
        let mut next = self.items.clone();
        next.remove(index);
        self.commit(next)?;
        tracing::debug!(product_id = %product_id, "cart item removed");
        Ok(())
    }

    /// Replace a line item's quantity; `quantity <= 0` removes it. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }
        let Some(index) = position(&self.items, product_id) else {
            return Ok(());
        };
        let mut next = self.items.clone();
        let item = &mut next[index];
        item.quantity = item.product.clamp_quantity(quantity);
        self.commit(next)?;
        tracing::debug!(product_id = %product_id, quantity, "cart quantity updated");
        Ok(())
    }

    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())?;
        tracing::debug!("cart cleared");
        Ok(())
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self, next: Vec<CartLineItem>) -> Result<(), CartError> {
        if let Err(err) = self.storage.save(&next) {
            tracing::warn!(error = %err, "cart save failed, keeping previous state");
            return Err(err.into());
        }
        self.items = next;
        Ok(())
    }
}

fn position(items: &[CartLineItem], product_id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.product.id == product_id)
}

/// Restore the cart invariants on data read back from storage.
fn normalize(stored: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut items: Vec<CartLineItem> = Vec::with_capacity(stored.len());
    for item in stored {
        if item.quantity <= 0 {
            tracing::warn!(product_id = %item.product.id, "dropping stored cart item with no quantity");
            continue;
        }
        if item.product.out_of_range_price().is_some() {
            tracing::warn!(product_id = %item.product.id, "dropping stored cart item with invalid price");
            continue;
        }
        match position(&items, item.product.id) {
            Some(index) => {
                let existing = &mut items[index];
                let merged = existing.quantity.saturating_add(item.quantity);
                existing.quantity = existing.product.clamp_quantity(merged);
            }
            None => {
                let quantity = item.product.clamp_quantity(item.quantity);
                items.push(CartLineItem {
                    product: item.product,
                    quantity,
                });
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{MAX_UNIT_PRICE, MemoryStorage, Session, StorageError};

    fn product(price: i64, discount: Option<i64>, stock: Option<i32>) -> CartProduct {
        CartProduct {
            id: Uuid::new_v4(),
            name: "Refurbished phone".into(),
            price,
            discount_price: discount,
            image: Some("/img/phone.png".into()),
            stock,
            product_type: Some("Smartphone".into()),
            collection: Some("Phones".into()),
        }
    }

    fn user() -> Session {
        Session::signed_in(Uuid::new_v4())
    }

    fn expected_subtotal<S: CartStorage>(cart: &CartStore<S>) -> i64 {
        cart.items()
            .iter()
            .map(|item| {
                item.product.discount_price.unwrap_or(item.product.price) * item.quantity as i64
            })
            .sum()
    }

    #[test]
    fn adding_same_product_merges_quantities() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(10));
        cart.add_to_cart(&user(), p.clone(), 2).unwrap();
        cart.add_to_cart(&user(), p.clone(), 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(p.id).unwrap().quantity, 5);
        assert_eq!(cart.subtotal(), 5_000);
    }

    #[test]
    fn add_clamps_to_stock() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(3));
        let item = cart.add_to_cart(&user(), p.clone(), 10).unwrap();
        assert_eq!(item.quantity, 3);

        cart.add_to_cart(&user(), p.clone(), 1).unwrap();
        assert_eq!(cart.get(p.id).unwrap().quantity, 3);
    }

    #[test]
    fn add_uses_fallback_ceiling_without_stock() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(10, None, None);
        let item = cart.add_to_cart(&user(), p, 5_000).unwrap();
        assert_eq!(item.quantity, 999);
    }

    #[test]
    fn add_requires_authentication() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let err = cart
            .add_to_cart(&Session::anonymous(), product(1_000, None, Some(5)), 1)
            .unwrap_err();
        assert!(matches!(err, CartError::AuthRequired));
        assert_eq!(err.user_message(), "Please login to add items to cart");
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(5));
        assert!(matches!(
            cart.add_to_cart(&user(), p.clone(), 0),
            Err(CartError::Validation(0))
        ));
        assert!(matches!(
            cart.add_to_cart(&user(), p, -2),
            Err(CartError::Validation(-2))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_out_of_range_price() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let huge = product(i64::MAX / 2, None, Some(5));
        let err = cart.add_to_cart(&user(), huge, 3).unwrap_err();
        assert!(matches!(err, CartError::InvalidPrice(p) if p == i64::MAX / 2));

        let negative = product(1_000, Some(-1), Some(5));
        assert!(matches!(
            cart.add_to_cart(&user(), negative, 1),
            Err(CartError::InvalidPrice(-1))
        ));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn subtotal_at_price_limit_does_not_overflow() {
        let mut cart = CartStore::open(MemoryStorage::new());
        for _ in 0..21 {
            let priciest = product(MAX_UNIT_PRICE, None, None);
            cart.add_to_cart(&user(), priciest, 999).unwrap();
        }

        let summary = cart.summary();
        assert_eq!(summary.subtotal, 21 * 999 * MAX_UNIT_PRICE);
        assert_eq!(summary.total, summary.subtotal);
    }

    #[test]
    fn update_to_zero_removes_item() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(5));
        cart.add_to_cart(&user(), p.clone(), 2).unwrap();
        cart.update_quantity(p.id, 0).unwrap();
        assert!(cart.get(p.id).is_none());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn update_clamps_and_ignores_unknown_ids() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(4));
        cart.add_to_cart(&user(), p.clone(), 1).unwrap();

        cart.update_quantity(p.id, 9).unwrap();
        assert_eq!(cart.get(p.id).unwrap().quantity, 4);

        cart.update_quantity(Uuid::new_v4(), 2).unwrap();
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.remove_from_cart(Uuid::new_v4()).unwrap();
        assert!(cart.is_empty());
        assert!(cart.into_storage().raw().is_none());
    }

    #[test]
    fn subtotal_tracks_every_mutation() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let session = user();
        let phone = product(20_000, Some(17_500), Some(3));
        let laptop = product(55_000, None, Some(2));
        let tablet = product(12_000, Some(9_999), None);

        enum Op {
            Add(CartProduct, i32),
            Update(Uuid, i32),
            Remove(Uuid),
            Clear,
        }

        let steps = vec![
            Op::Add(phone.clone(), 1),
            Op::Add(laptop.clone(), 5),
            Op::Add(phone.clone(), 4),
            Op::Update(laptop.id, 1),
            Op::Add(tablet.clone(), 7),
            Op::Update(phone.id, -1),
            Op::Remove(tablet.id),
            Op::Update(tablet.id, 3),
            Op::Add(laptop.clone(), 1),
            Op::Clear,
        ];

        for step in steps {
            match step {
                Op::Add(product, quantity) => {
                    cart.add_to_cart(&session, product, quantity).unwrap();
                }
                Op::Update(id, quantity) => cart.update_quantity(id, quantity).unwrap(),
                Op::Remove(id) => cart.remove_from_cart(id).unwrap(),
                Op::Clear => cart.clear_cart().unwrap(),
            }
            assert_eq!(cart.subtotal(), expected_subtotal(&cart));
            assert!(cart.items().iter().all(|item| item.quantity > 0));
            let mut ids: Vec<_> = cart.items().iter().map(|i| i.product.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), cart.line_count());
        }
    }

    #[test]
    fn summary_reports_free_shipping() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_to_cart(&user(), product(1_000, Some(800), Some(5)), 3)
            .unwrap();
        cart.add_to_cart(&user(), product(500, None, Some(5)), 1)
            .unwrap();

        let summary = cart.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.subtotal, 2_900);
        assert_eq!(summary.shipping, 0);
        assert_eq!(summary.total, 2_900);
    }

    #[test]
    fn mutations_are_saved() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let p = product(1_000, None, Some(5));
        cart.add_to_cart(&user(), p.clone(), 2).unwrap();

        let storage = cart.into_storage();
        let reopened = CartStore::open(storage);
        assert_eq!(reopened.get(p.id).unwrap().quantity, 2);
    }

    struct FailingStorage;

    impl CartStorage for FailingStorage {
        fn load(&self) -> Result<Option<Vec<CartLineItem>>, StorageError> {
            Ok(None)
        }

        fn save(&mut self, _items: &[CartLineItem]) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn failed_save_keeps_previous_state() {
        let mut cart = CartStore::open(FailingStorage);
        let err = cart
            .add_to_cart(&user(), product(1_000, None, Some(5)), 1)
            .unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn corrupt_storage_opens_empty() {
        let cart = CartStore::open(MemoryStorage::with_raw("{not json"));
        assert!(cart.is_empty());
    }

    #[test]
    fn open_normalizes_stored_items() {
        let p = product(1_000, None, Some(4));
        let other = product(300, None, None);
        let stored = vec![
            CartLineItem {
                product: p.clone(),
                quantity: 3,
            },
            CartLineItem {
                product: other.clone(),
                quantity: 0,
            },
            CartLineItem {
                product: p.clone(),
                quantity: 3,
            },
            CartLineItem {
                product: product(i64::MAX, None, Some(1)),
                quantity: 2,
            },
        ];
        let mut storage = MemoryStorage::new();
        storage.save(&stored).unwrap();

        let cart = CartStore::open(storage);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(p.id).unwrap().quantity, 4);
        assert!(cart.get(other.id).is_none());
        assert_eq!(cart.subtotal(), 4_000);
    }
}
