use std::collections::HashMap;

use axum::handler::Handler;
use axum::routing::MethodRouter;
use http::Method;

use crate::inbound::http::router::AppState;

/// Access requirements attached to a route at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccess {
    /// Skip authentication entirely.
    pub is_public: bool,
    /// Require the `ADMIN` role once authenticated.
    pub is_admin_only: bool,
}

impl RouteAccess {
    pub const PUBLIC: Self = Self {
        is_public: true,
        is_admin_only: false,
    };

    pub const AUTHENTICATED: Self = Self {
        is_public: false,
        is_admin_only: false,
    };

    pub const ADMIN: Self = Self {
        is_public: false,
        is_admin_only: true,
    };
}

/// One HTTP endpoint: where it lives, who may call it and what runs.
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub access: RouteAccess,
    pub handler: MethodRouter<AppState>,
}

impl Endpoint {
    pub fn get<H, T>(path: &'static str, access: RouteAccess, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::GET, path, access, axum::routing::get(handler))
    }

    pub fn post<H, T>(path: &'static str, access: RouteAccess, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::POST, path, access, axum::routing::post(handler))
    }

    pub fn patch<H, T>(path: &'static str, access: RouteAccess, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::PATCH, path, access, axum::routing::patch(handler))
    }

    pub fn delete<H, T>(path: &'static str, access: RouteAccess, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self::new(Method::DELETE, path, access, axum::routing::delete(handler))
    }

    fn new(
        method: Method,
        path: &'static str,
        access: RouteAccess,
        handler: MethodRouter<AppState>,
    ) -> Self {
        Self {
            method,
            path,
            access,
            handler,
        }
    }
}

/// Immutable lookup from route template and method to its access rules.
///
/// Built once at startup from the same endpoint list the router is built
/// from, so a registered handler always has an entry.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<&'static str, HashMap<Method, RouteAccess>>,
}

impl RouteTable {
    pub fn from_endpoints(endpoints: &[Endpoint]) -> Self {
        let mut table = Self::default();
        for endpoint in endpoints {
            table.insert(endpoint.method.clone(), endpoint.path, endpoint.access);
        }
        table
    }

    pub fn insert(&mut self, method: Method, path: &'static str, access: RouteAccess) {
        self.entries.entry(path).or_default().insert(method, access);
    }

    /// Access rules for a matched route template.
    ///
    /// Unknown routes require authentication.
    pub fn access(&self, method: &Method, path: &str) -> RouteAccess {
        self.entries
            .get(path)
            .and_then(|methods| methods.get(method))
            .copied()
            .unwrap_or(RouteAccess::AUTHENTICATED)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_method_and_template() {
        let mut table = RouteTable::default();
        table.insert(Method::GET, "/api/products", RouteAccess::PUBLIC);
        table.insert(Method::POST, "/api/products", RouteAccess::ADMIN);

        assert_eq!(
            table.access(&Method::GET, "/api/products"),
            RouteAccess::PUBLIC
        );
        assert_eq!(
            table.access(&Method::POST, "/api/products"),
            RouteAccess::ADMIN
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unknown_route_requires_authentication() {
        let table = RouteTable::default();

        let access = table.access(&Method::GET, "/api/secret");
        assert!(!access.is_public);
        assert!(!access.is_admin_only);
        assert!(table.is_empty());
    }
}
