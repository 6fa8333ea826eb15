//! Macro-generated test suite for the `StockStore` contract.
//!
//! # Generated Tests
//!
//! - `test_insert_and_get_product`: stored product reads back unchanged
//! - `test_get_missing_product`: unknown id returns `None`
//! - `test_duplicate_product_rejected`: second insert fails, first survives
//! - `test_decrement_applied`: count drops by exactly the requested amount
//! - `test_decrement_to_zero`: reserving the whole stock leaves 0
//! - `test_decrement_insufficient_untouched`: rejected decrement writes nothing
//! - `test_decrement_missing`: unknown id reports `Missing`
//! - `test_concurrent_decrements_never_oversell`: N racing single-unit
//!   reservations against m < N units yield exactly m successes

/// Generate a `StockStore` conformance suite.
///
/// `$factory` must evaluate to a store implementing `StockStore + Clone + 'static`.
/// It is re-evaluated for each test.
#[macro_export]
macro_rules! stock_store_tests {
    ($factory:expr) => {
        mod stock_store_contract_tests {
            use super::*;
            use shop::core::service::{Decrement, StockStore};

            #[tokio::test]
            async fn test_insert_and_get_product() {
                let store = $factory;
                let product = sample_product("p-monitor", 7);

                store.insert_product(product.clone()).await.unwrap();

                let fetched = store.get_product("p-monitor").await.unwrap().unwrap();
                assert_eq!(fetched, product);
                assert!(store.product_exists("p-monitor").await.unwrap());
            }

            #[tokio::test]
            async fn test_get_missing_product() {
                let store = $factory;
                assert!(store.get_product("p-ghost").await.unwrap().is_none());
                assert!(!store.product_exists("p-ghost").await.unwrap());
            }

            #[tokio::test]
            async fn test_duplicate_product_rejected() {
                let store = $factory;
                store.insert_product(sample_product("p-monitor", 7)).await.unwrap();

                let err = store
                    .insert_product(sample_product("p-monitor", 99))
                    .await
                    .unwrap_err();
                assert!(matches!(err, shop::core::ShopError::AlreadyExists { .. }));

                let fetched = store.get_product("p-monitor").await.unwrap().unwrap();
                assert_eq!(fetched.available_count, 7);
            }

            #[tokio::test]
            async fn test_decrement_applied() {
                let store = $factory;
                store.insert_product(sample_product("p-monitor", 10)).await.unwrap();

                let outcome = store.decrement_if_available("p-monitor", 3).await.unwrap();
                assert_eq!(outcome, Decrement::Applied { remaining: 7 });

                let fetched = store.get_product("p-monitor").await.unwrap().unwrap();
                assert_eq!(fetched.available_count, 7);
            }

            #[tokio::test]
            async fn test_decrement_to_zero() {
                let store = $factory;
                store.insert_product(sample_product("p-monitor", 4)).await.unwrap();

                let outcome = store.decrement_if_available("p-monitor", 4).await.unwrap();
                assert_eq!(outcome, Decrement::Applied { remaining: 0 });
            }

            #[tokio::test]
            async fn test_decrement_insufficient_untouched() {
                let store = $factory;
                store.insert_product(sample_product("p-monitor", 2)).await.unwrap();

                let outcome = store.decrement_if_available("p-monitor", 3).await.unwrap();
                assert_eq!(outcome, Decrement::Insufficient { available: 2 });

                let fetched = store.get_product("p-monitor").await.unwrap().unwrap();
                assert_eq!(fetched.available_count, 2);
            }

            #[tokio::test]
            async fn test_decrement_missing() {
                let store = $factory;
                let outcome = store.decrement_if_available("p-ghost", 1).await.unwrap();
                assert_eq!(outcome, Decrement::Missing);
            }

            #[tokio::test]
            async fn test_concurrent_decrements_never_oversell() {
                let store = $factory;
                let units = 5u32;
                let requests = 20usize;
                store
                    .insert_product(sample_product("p-monitor", units))
                    .await
                    .unwrap();

                let mut handles = Vec::with_capacity(requests);
                for _ in 0..requests {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.decrement_if_available("p-monitor", 1).await.unwrap()
                    }));
                }

                let mut applied = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Decrement::Applied { .. } => applied += 1,
                        Decrement::Insufficient { available } => assert_eq!(available, 0),
                        Decrement::Missing => panic!("product vanished"),
                    }
                }

                assert_eq!(applied, units as usize);
                let fetched = store.get_product("p-monitor").await.unwrap().unwrap();
                assert_eq!(fetched.available_count, 0);
            }
        }
    };
}
