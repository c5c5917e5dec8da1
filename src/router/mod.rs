// ============================================================================
// ROUTER - Rutas, parseo de URL y guard de acceso
// ============================================================================

pub mod guard;
pub mod route;

pub use guard::{after_login, guard, Navigation};
pub use route::{landing_for, Access, Route};
