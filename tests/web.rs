//! Pruebas en navegador: `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use sharebite_pwa::router::{guard, Navigation, Route};
use sharebite_pwa::state::SessionView;
use sharebite_pwa::utils::{KeyValueStore, LocalStorage, ROLE_STORAGE_KEY, TOKEN_STORAGE_KEY};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear(storage: &LocalStorage) {
    storage.remove(TOKEN_STORAGE_KEY).unwrap();
    storage.remove(ROLE_STORAGE_KEY).unwrap();
}

#[wasm_bindgen_test]
fn local_storage_roundtrip() {
    let storage = LocalStorage::open().unwrap();
    clear(&storage);

    storage.set(TOKEN_STORAGE_KEY, "tok123").unwrap();
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("tok123"));

    storage.remove(TOKEN_STORAGE_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn two_handles_see_the_same_storage() {
    let first = LocalStorage::open().unwrap();
    let second = LocalStorage::open().unwrap();
    clear(&first);

    first.set(ROLE_STORAGE_KEY, "ngo").unwrap();
    assert_eq!(second.get(ROLE_STORAGE_KEY).unwrap().as_deref(), Some("ngo"));
    clear(&first);
}

struct Anonymous;

impl SessionView for Anonymous {
    fn is_authenticated(&self) -> bool {
        false
    }

    fn role(&self) -> Option<sharebite_pwa::models::Role> {
        None
    }
}

#[wasm_bindgen_test]
fn guard_redirects_anonymous_visitor_in_browser() {
    let route = Route::parse("/notifications");
    match guard(&route, &Anonymous) {
        Navigation::Redirect { to, replace } => {
            assert!(replace);
            assert_eq!(to.path(), "/login?next=%2Fnotifications");
        }
        Navigation::Render => panic!("anonymous visitor must be redirected"),
    }
}
