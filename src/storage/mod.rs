use crate::models::Customer;
use serde::{Deserialize, Serialize};

/// localStorage key holding the logged-in customer.
pub(crate) const CUSTOMER_KEY: &str = "pg_customer";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    decode_json(&json)
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Some(storage) = local_storage() {
                if storage.set_item(key, &json).is_err() {
                    tracing::warn!("could not write {key} to localStorage");
                }
            }
        }
        Err(e) => tracing::warn!("could not serialize {key}: {e}"),
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// A corrupt entry reads as absent; it is overwritten on the next login.
fn decode_json<T: for<'de> Deserialize<'de>>(json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("ignoring unreadable stored value: {e}");
            None
        }
    }
}

pub(crate) fn save_customer_to_storage(customer: &Customer) {
    save_json_to_storage(CUSTOMER_KEY, customer);
}

pub(crate) fn load_customer_from_storage() -> Option<Customer> {
    load_json_from_storage::<Option<Customer>>(CUSTOMER_KEY).flatten()
}

pub(crate) fn clear_customer_storage() {
    remove_from_storage(CUSTOMER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_customer_roundtrip() {
        let c = Customer {
            id: 3,
            name: "Ram".to_string(),
            phone: "9999999999".to_string(),
            gender: "boy".to_string(),
        };
        let json = serde_json::to_string(&c).expect("should serialize");
        assert_eq!(decode_json::<Customer>(&json), Some(c));
    }

    #[test]
    fn test_decode_null_and_garbage_read_as_logged_out() {
        assert_eq!(decode_json::<Option<Customer>>("null"), Some(None));
        assert_eq!(decode_json::<Customer>("{not json"), None);
        assert_eq!(decode_json::<Customer>(r#"{"name":"no id"}"#), None);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_customer_storage_roundtrip() {
        clear_customer_storage();
        assert!(load_customer_from_storage().is_none());

        let c = Customer {
            id: 7,
            name: "Sita".to_string(),
            phone: "8888888888".to_string(),
            gender: "girl".to_string(),
        };
        save_customer_to_storage(&c);
        assert_eq!(load_customer_from_storage(), Some(c));

        clear_customer_storage();
        assert!(load_customer_from_storage().is_none());
    }
}
