// ═══════════════════════════════════════════════════════════════════
// Model Tests — Product, Cart revisions, StockPolicy, CartSettings
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;
use shop_cart_core::errors::CartError;
use shop_cart_core::models::cart::Cart;
use shop_cart_core::models::outcome::{CartMessage, CartOutcome};
use shop_cart_core::models::product::{CatalogProduct, Product};
use shop_cart_core::models::settings::{
    CartSettings, StockPolicy, DEFAULT_API_BASE_URL, DEFAULT_STORAGE_KEY,
};
use shop_cart_core::models::stock::Stock;
use std::collections::HashMap;

fn line(id: u64, amount: u32) -> Product {
    Product {
        id,
        title: format!("Tênis {id}"),
        price: 100.0,
        image: format!("https://cdn.example/{id}.jpg"),
        amount,
        extra: serde_json::Map::new(),
    }
}

fn cart_of(lines: &[(u64, u32)]) -> Cart {
    let (cart, dropped) = Cart::from_lines(lines.iter().map(|&(id, a)| line(id, a)).collect());
    assert_eq!(dropped, 0);
    cart
}

fn ids(cart: &Cart) -> Vec<u64> {
    cart.iter().map(|l| l.id).collect()
}

// ═══════════════════════════════════════════════════════════════════
//  Product
// ═══════════════════════════════════════════════════════════════════

mod product {
    use super::*;

    #[test]
    fn from_catalog_sets_amount() {
        let entry = CatalogProduct {
            id: 1,
            title: "X".into(),
            price: 10.0,
            image: String::new(),
            extra: serde_json::Map::new(),
        };
        let p = Product::from_catalog(entry, 1);
        assert_eq!(p.id, 1);
        assert_eq!(p.title, "X");
        assert_eq!(p.price, 10.0);
        assert_eq!(p.amount, 1);
    }

    #[test]
    fn from_catalog_drops_stray_amount_field() {
        let entry: CatalogProduct =
            serde_json::from_value(json!({ "id": 3, "title": "Y", "price": 5, "amount": 99 }))
                .unwrap();
        assert!(entry.extra.contains_key("amount"));

        let p = Product::from_catalog(entry, 1);
        assert_eq!(p.amount, 1);
        assert!(!p.extra.contains_key("amount"));

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["amount"], json!(1));
    }

    #[test]
    fn catalog_entry_with_only_id_and_title() {
        let entry: CatalogProduct =
            serde_json::from_value(json!({ "id": 1, "title": "X", "price": 10 })).unwrap();
        assert_eq!(entry.image, "");
        assert_eq!(entry.price, 10.0);
    }

    #[test]
    fn unknown_fields_survive_serialization() {
        let raw = json!({
            "id": 7,
            "title": "Tênis",
            "price": 139.9,
            "image": "a.jpg",
            "amount": 2,
            "brand": "Rocket",
            "sizes": [38, 39]
        });
        let p: Product = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(p.extra.get("brand"), Some(&json!("Rocket")));
        assert_eq!(serde_json::to_value(&p).unwrap(), raw);
    }

    #[test]
    fn with_amount_keeps_other_fields() {
        let p = line(4, 1);
        let q = p.with_amount(3);
        assert_eq!(q.amount, 3);
        assert_eq!(q.title, p.title);
        assert_eq!(q.image, p.image);
        assert_eq!(p.amount, 1);
    }

    #[test]
    fn subtotal() {
        let mut p = line(1, 3);
        p.price = 12.5;
        assert_eq!(p.subtotal(), 37.5);
    }

    #[test]
    fn negative_amount_does_not_parse() {
        let res: Result<Product, _> = serde_json::from_value(json!({ "id": 1, "amount": -1 }));
        assert!(res.is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Stock
// ═══════════════════════════════════════════════════════════════════

mod stock {
    use super::*;

    #[test]
    fn parses_api_payload() {
        let s: Stock = serde_json::from_str(r#"{"id":1,"amount":5}"#).unwrap();
        assert_eq!(s, Stock { id: 1, amount: 5 });
    }

    #[test]
    fn missing_amount_is_an_error() {
        assert!(serde_json::from_str::<Stock>(r#"{"id":1}"#).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Cart
// ═══════════════════════════════════════════════════════════════════

mod cart {
    use super::*;

    #[test]
    fn new_is_empty() {
        let c = Cart::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert_eq!(c.item_count(), 0);
        assert_eq!(c.total(), 0.0);
    }

    #[test]
    fn from_lines_drops_zero_amounts_and_duplicates() {
        let (c, dropped) = Cart::from_lines(vec![line(1, 2), line(2, 0), line(1, 5), line(3, 1)]);
        assert_eq!(dropped, 2);
        assert_eq!(ids(&c), vec![1, 3]);
        assert_eq!(c.find(1).unwrap().amount, 2);
    }

    #[test]
    fn with_line_appends_at_end() {
        let c = cart_of(&[(1, 1), (2, 1)]);
        let next = c.with_line(line(3, 1));
        assert_eq!(ids(&next), vec![1, 2, 3]);
        // previous revision untouched
        assert_eq!(ids(&c), vec![1, 2]);
    }

    #[test]
    fn with_line_ignores_existing_id() {
        let c = cart_of(&[(1, 2)]);
        let next = c.with_line(line(1, 1));
        assert_eq!(next, c);
    }

    #[test]
    fn with_line_ignores_zero_amount() {
        let c = cart_of(&[(1, 2)]);
        assert_eq!(c.with_line(line(2, 0)), c);
    }

    #[test]
    fn with_amount_touches_only_matching_line() {
        let c = cart_of(&[(1, 1), (2, 4), (3, 2)]);
        let next = c.with_amount(2, 7);
        assert_eq!(next.find(2).unwrap().amount, 7);
        assert_eq!(next.find(1), c.find(1));
        assert_eq!(next.find(3), c.find(3));
        assert_eq!(ids(&next), vec![1, 2, 3]);
    }

    #[test]
    fn with_amount_zero_removes_line() {
        let c = cart_of(&[(1, 1), (2, 4)]);
        let next = c.with_amount(1, 0);
        assert_eq!(ids(&next), vec![2]);
    }

    #[test]
    fn with_amount_for_absent_id_is_identity() {
        let c = cart_of(&[(1, 1)]);
        assert_eq!(c.with_amount(9, 3), c);
    }

    #[test]
    fn without_preserves_order() {
        let c = cart_of(&[(1, 1), (2, 1), (3, 1), (4, 1)]);
        let next = c.without(2);
        assert_eq!(ids(&next), vec![1, 3, 4]);
    }

    #[test]
    fn without_absent_id_is_identity() {
        let c = cart_of(&[(1, 1), (2, 1)]);
        assert_eq!(c.without(42), c);
    }

    #[test]
    fn counts_and_total() {
        let mut a = line(1, 2);
        a.price = 10.0;
        let mut b = line(2, 3);
        b.price = 1.5;
        let (c, _) = Cart::from_lines(vec![a, b]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.item_count(), 5);
        assert_eq!(c.total(), 24.5);
    }

    #[test]
    fn serializes_as_plain_array() {
        let c = cart_of(&[(1, 2)]);
        let value = serde_json::to_value(&c).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], json!(1));
        assert_eq!(value[0]["amount"], json!(2));
    }

    #[test]
    fn deserializing_enforces_invariants() {
        let c: Cart = serde_json::from_value(json!([
            { "id": 1, "amount": 1 },
            { "id": 1, "amount": 4 },
            { "id": 2, "amount": 0 }
        ]))
        .unwrap();
        assert_eq!(ids(&c), vec![1]);
        assert_eq!(c.find(1).unwrap().amount, 1);
    }

    #[test]
    fn serde_preserves_lines() {
        let c = cart_of(&[(3, 1), (1, 2), (2, 5)]);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn iterates_by_reference() {
        let c = cart_of(&[(1, 1), (2, 2)]);
        let mut total = 0;
        for l in &c {
            total += l.amount;
        }
        assert_eq!(total, 3);
        assert_eq!(c.lines().len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StockPolicy
// ═══════════════════════════════════════════════════════════════════

mod stock_policy {
    use super::*;

    #[test]
    fn default_is_requested_within_stock() {
        assert_eq!(StockPolicy::default(), StockPolicy::RequestedWithinStock);
    }

    #[test]
    fn requested_within_stock_reaches_last_unit() {
        let p = StockPolicy::RequestedWithinStock;
        assert!(p.allows(4, 5, 5));
        assert!(!p.allows(5, 6, 5));
        assert!(!p.allows(2, 3, 2));
    }

    #[test]
    fn requested_within_stock_allows_lowering_below_shrunk_stock() {
        let p = StockPolicy::RequestedWithinStock;
        assert!(p.allows(5, 2, 3));
    }

    #[test]
    fn current_below_stock_is_strict() {
        let p = StockPolicy::CurrentBelowStock;
        assert!(p.allows(1, 10, 2));
        assert!(!p.allows(2, 3, 2));
        assert!(!p.allows(5, 2, 3));
    }

    #[test]
    fn policies_agree_on_single_increments() {
        for stock in 0..6 {
            for current in 0..6 {
                assert_eq!(
                    StockPolicy::RequestedWithinStock.allows(current, current + 1, stock),
                    StockPolicy::CurrentBelowStock.allows(current, current + 1, stock),
                    "current={current} stock={stock}"
                );
            }
        }
    }

    #[test]
    fn parse_and_display() {
        for p in [StockPolicy::RequestedWithinStock, StockPolicy::CurrentBelowStock] {
            assert_eq!(p.to_string().parse::<StockPolicy>().unwrap(), p);
        }
        assert_eq!(
            " Current-Below-Stock ".parse::<StockPolicy>().unwrap(),
            StockPolicy::CurrentBelowStock
        );
    }

    #[test]
    fn parse_unknown_is_config_error() {
        let err = "lenient".parse::<StockPolicy>().unwrap_err();
        assert!(matches!(err, CartError::Config(_)));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&StockPolicy::CurrentBelowStock).unwrap();
        assert_eq!(json, "\"current-below-stock\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CartSettings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let s = CartSettings::default();
        assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.storage_key, "@RocketShoes:cart");
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.stock_policy, StockPolicy::RequestedWithinStock);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let s = CartSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s, CartSettings::default());
    }

    #[test]
    fn overrides_from_variables() {
        let s = CartSettings::from_lookup(lookup(&[
            ("CART_API_URL", "https://api.shop.test"),
            ("CART_STORAGE_KEY", "cart-v2"),
            ("CART_REQUEST_TIMEOUT_SECS", "5"),
            ("CART_STOCK_POLICY", "current-below-stock"),
        ]))
        .unwrap();
        assert_eq!(s.api_base_url, "https://api.shop.test");
        assert_eq!(s.storage_key, "cart-v2");
        assert_eq!(s.request_timeout_secs, 5);
        assert_eq!(s.stock_policy, StockPolicy::CurrentBelowStock);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = CartSettings::from_lookup(lookup(&[("CART_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, CartError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err =
            CartSettings::from_lookup(lookup(&[("CART_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, CartError::Config(_)));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = CartSettings::from_lookup(lookup(&[("CART_API_URL", "ftp://x")])).unwrap_err();
        assert!(err.to_string().contains("ftp://x"));
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        let s = CartSettings {
            storage_key: "  ".into(),
            ..CartSettings::default()
        };
        assert!(matches!(s.validate(), Err(CartError::Config(_))));
    }

    #[test]
    fn serde_roundtrip() {
        let s = CartSettings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: CartSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Outcomes & messages
// ═══════════════════════════════════════════════════════════════════

mod outcome {
    use super::*;

    #[test]
    fn applied_variants() {
        assert!(CartOutcome::Added.is_applied());
        assert!(CartOutcome::Updated { amount: 2 }.is_applied());
        assert!(CartOutcome::Removed.is_applied());
        assert!(!CartOutcome::NotInCart.is_applied());
        assert!(!CartOutcome::OutOfStock { requested: 3, available: 2 }.is_applied());
        assert!(!CartOutcome::Failed(CartError::Network("down".into())).is_applied());
    }

    #[test]
    fn message_strings() {
        assert_eq!(
            CartMessage::OutOfStock.as_str(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(CartMessage::AddFailed.as_str(), "Erro na adição do produto");
        assert_eq!(CartMessage::RemoveFailed.as_str(), "Erro na remoção do produto");
        assert_eq!(
            CartMessage::UpdateFailed.as_str(),
            "Erro na alteração de quantidade do produto"
        );
        assert_eq!(CartMessage::AddFailed.to_string(), CartMessage::AddFailed.as_str());
    }
}
