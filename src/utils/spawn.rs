// ============================================================================
// SPAWNER - Ejecutar futures en el event loop del navegador
// ============================================================================

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};

/// `LocalSpawn` sobre `wasm_bindgen_futures::spawn_local`
#[derive(Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}
