use std::collections::BTreeMap;
use std::fmt;

use axum::extract::State;
use axum::routing::{MethodFilter, MethodRouter};
use axum::{Json, Router};

use crate::context::NotionContext;
use crate::handlers::{self, blocks, databases, pages, search, users, HandlerSpec, ProxyRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered endpoint. Paths use `:param` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub handler: &'static HandlerSpec,
}

impl RouteDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: &'static HandlerSpec) -> Self {
        Self { method, path: path.into(), handler }
    }

    /// The same route mounted under `api_base` (already normalized).
    pub fn prefixed(&self, api_base: &str) -> Self {
        Self { path: format!("{}{}", api_base, self.path), ..self.clone() }
    }

    /// Path in the router's `{param}` syntax.
    pub fn router_path(&self) -> String {
        self.path
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => format!("{{{}}}", name),
                None => seg.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// All proxy endpoints, relative to the api base.
pub fn route_table() -> Vec<RouteDescriptor> {
    let mut routes = blocks::routes();
    routes.extend(pages::routes());
    routes.extend(users::routes());
    routes.extend(search::routes());
    routes.extend(databases::routes());
    routes
}

/// The route table mounted under a normalized api base.
pub fn mounted_routes(api_base: &str) -> Vec<RouteDescriptor> {
    route_table().iter().map(|r| r.prefixed(api_base)).collect()
}

/// Turn descriptors into an axum router. Methods sharing a path are merged
/// into one method router.
pub fn build_router(routes: &[RouteDescriptor]) -> Router<NotionContext> {
    let mut grouped: BTreeMap<String, MethodRouter<NotionContext>> = BTreeMap::new();
    for route in routes {
        let spec = route.handler;
        let handler = move |State(ctx): State<NotionContext>, req: ProxyRequest| async move {
            handlers::handle(&ctx, spec, req).await.map(Json)
        };
        let path = route.router_path();
        let method_router = grouped.remove(&path).unwrap_or_else(MethodRouter::new);
        grouped.insert(path, method_router.on(route.method.filter(), handler));
    }

    grouped.into_iter().fold(Router::new(), |router, (path, method_router)| router.route(&path, method_router))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_public_endpoints() {
        let table: Vec<(HttpMethod, String, &str)> =
            route_table().into_iter().map(|r| (r.method, r.path, r.handler.operation.name())).collect();
        let expected = vec![
            (HttpMethod::Get, "/blocks/:id", "blocks.retrieve"),
            (HttpMethod::Patch, "/blocks/:id", "blocks.update"),
            (HttpMethod::Delete, "/blocks/:id", "blocks.delete"),
            (HttpMethod::Get, "/blocks/:id/children", "blocks.children.list"),
            (HttpMethod::Patch, "/blocks/:id/children", "blocks.children.append"),
            (HttpMethod::Get, "/pages/:id", "pages.retrieve"),
            (HttpMethod::Patch, "/pages/:id", "pages.update"),
            (HttpMethod::Get, "/pages/:id/properties/:property_id", "pages.properties.retrieve"),
            (HttpMethod::Get, "/users", "users.list"),
            (HttpMethod::Get, "/users/:id", "users.retrieve"),
            (HttpMethod::Post, "/search", "search"),
            (HttpMethod::Get, "/databases/:id", "databases.retrieve"),
            (HttpMethod::Patch, "/databases/:id", "databases.update"),
            (HttpMethod::Post, "/databases/:id/query", "databases.query"),
        ];
        let expected: Vec<(HttpMethod, String, &str)> = expected.into_iter().map(|(m, p, o)| (m, p.to_string(), o)).collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn every_mounted_route_starts_with_api_base() {
        for route in mounted_routes("/api/notion") {
            assert!(route.path.starts_with("/api/notion/"), "{}", route.path);
        }
    }

    #[test]
    fn params_in_template_match_handler_bindings() {
        for route in route_table() {
            let names: Vec<&str> = route.path.split('/').filter_map(|s| s.strip_prefix(':')).collect();
            let bound: Vec<&str> = route.handler.params.iter().map(|b| b.route).collect();
            assert_eq!(names, bound, "{} {}", route.method, route.path);
        }
    }

    #[test]
    fn router_path_uses_braces() {
        let route = RouteDescriptor::new(HttpMethod::Get, "/pages/:id/properties/:property_id", &pages::RETRIEVE_PROPERTY);
        assert_eq!(route.prefixed("/api/notion").router_path(), "/api/notion/pages/{id}/properties/{property_id}");
    }
}
