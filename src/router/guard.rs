// ============================================================================
// ROUTE GUARD - Decide si la sesión actual puede ver una ruta
// ============================================================================

use crate::models::Role;
use crate::state::SessionView;

use super::route::{landing_for, Access, Route};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render,
    /// `replace`: reemplazar la entrada del historial en vez de apilar
    Redirect { to: Route, replace: bool },
}

/// Evalúa la ruta pedida contra la sesión. Las redirecciones no se
/// muestran al usuario, sólo quedan en el log.
pub fn guard(route: &Route, session: &impl SessionView) -> Navigation {
    let navigation = match route.access() {
        Access::Public => Navigation::Render,
        _ if !session.is_authenticated() => Navigation::Redirect {
            to: Route::Login {
                next: Some(route.path()),
                role: None,
            },
            replace: true,
        },
        Access::Authenticated => Navigation::Render,
        Access::RoleOnly { role, fallback } => {
            if session.role() == Some(role) {
                Navigation::Render
            } else {
                Navigation::Redirect { to: fallback, replace: true }
            }
        }
    };

    if let Navigation::Redirect { to, .. } = &navigation {
        log::info!(
            "🚦 [GUARD] {} -> {} (rol: {})",
            route.path(),
            to.path(),
            session.role().map(|r| r.as_str()).unwrap_or("ninguno")
        );
    }
    navigation
}

/// Destino tras un login correcto: `next` explícito o la página del rol
pub fn after_login(next: Option<&str>, role: Option<Role>) -> Route {
    next.map(Route::parse)
        .filter(|route| !matches!(route, Route::Login { .. } | Route::Logout | Route::NotFound { .. }))
        .unwrap_or_else(|| landing_for(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSession {
        authenticated: bool,
        role: Option<Role>,
    }

    impl SessionView for FakeSession {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn role(&self) -> Option<Role> {
            self.role
        }
    }

    const ANONYMOUS: FakeSession = FakeSession { authenticated: false, role: None };

    fn signed_in(role: Option<Role>) -> FakeSession {
        FakeSession { authenticated: true, role }
    }

    #[test]
    fn public_pages_render_for_everyone() {
        for route in [Route::Home, Route::login(), Route::Register { role: None }, Route::Logout] {
            assert_eq!(guard(&route, &ANONYMOUS), Navigation::Render);
        }
        let missing = Route::parse("/nope");
        assert_eq!(guard(&missing, &ANONYMOUS), Navigation::Render);
    }

    #[test]
    fn anonymous_users_go_to_login_with_return_target() {
        for route in [Route::Donations, Route::Notifications, Route::Track { donation_id: 9 }, Route::NewDonation] {
            let expected = Navigation::Redirect {
                to: Route::Login { next: Some(route.path()), role: None },
                replace: true,
            };
            assert_eq!(guard(&route, &ANONYMOUS), expected);
        }
    }

    #[test]
    fn login_redirect_round_trips_through_the_url() {
        let route = Route::Track { donation_id: 9 };
        let Navigation::Redirect { to, .. } = guard(&route, &ANONYMOUS) else {
            panic!("expected redirect");
        };
        assert_eq!(to.path(), "/login?next=%2Ftrack%2F9");
        assert_eq!(Route::parse(&to.path()), to);
    }

    #[test]
    fn authenticated_pages_render_with_any_role() {
        for role in [None, Some(Role::Ngo), Some(Role::DeliveryAgent)] {
            assert_eq!(guard(&Route::Donations, &signed_in(role)), Navigation::Render);
        }
    }

    #[test]
    fn role_mismatch_redirects_to_the_page_fallback() {
        for role in [None, Some(Role::Ngo), Some(Role::DeliveryAgent)] {
            let session = signed_in(role);
            assert_eq!(
                guard(&Route::NewDonation, &session),
                Navigation::Redirect { to: Route::Donations, replace: true }
            );
            assert_eq!(
                guard(&Route::Restaurants, &session),
                Navigation::Redirect { to: Route::Home, replace: true }
            );
        }
        let restaurant = signed_in(Some(Role::Restaurant));
        assert_eq!(guard(&Route::NewDonation, &restaurant), Navigation::Render);
        assert_eq!(guard(&Route::Restaurants, &restaurant), Navigation::Render);
    }

    #[test]
    fn after_login_prefers_explicit_next() {
        assert_eq!(after_login(Some("/notifications"), Some(Role::Ngo)), Route::Notifications);
        assert_eq!(after_login(None, Some(Role::Ngo)), Route::Ngo);
        assert_eq!(after_login(None, Some(Role::DeliveryAgent)), Route::DeliveryScan);
        assert_eq!(after_login(None, None), Route::Restaurants);
        assert_eq!(after_login(Some("/login"), Some(Role::Ngo)), Route::Ngo);
    }
}
