// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_manager;
pub mod app_state;

pub use reactivity::*;
pub use session_manager::*;
pub use app_state::*;
