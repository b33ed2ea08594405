//! Route policy for the gateway
//!
//! The allow-list is what the gate skips outright. The rules are checked in
//! order after the gate; anything unmatched is public.

use axum::http::Method;
use suppleit_auth::{Access, Role, RouteMatcher, RoutePolicy};

/// Endpoints that work for anonymous callers and across every method
const OPEN_ENDPOINTS: [&str; 4] = [
    "/api/social/login/**",
    "/api/member/verify-email",
    "/api/auth/refresh",
    "/api/auth/login",
];

pub fn default_policy() -> RoutePolicy {
    let admin = || Access::Roles(vec![Role::Admin]);

    let mut policy = RoutePolicy::new()
        .permit(RouteMatcher::method(Method::GET, "/api/notice/**"))
        .permit(RouteMatcher::method(Method::GET, "/api/reviews/**"));
    for endpoint in OPEN_ENDPOINTS {
        policy = policy.permit(RouteMatcher::any(endpoint));
    }

    policy = policy
        .rule(RouteMatcher::any("/admin/**"), admin())
        .rule(
            RouteMatcher::any("/api/member/auth/**"),
            Access::Roles(vec![Role::Admin, Role::User]),
        )
        .rule(RouteMatcher::any("/api/logout"), Access::Authenticated);
    for endpoint in OPEN_ENDPOINTS {
        policy = policy.rule(RouteMatcher::any(endpoint), Access::Public);
    }

    policy
        .rule(RouteMatcher::any("/api/reviews/**"), Access::Public)
        .rule(RouteMatcher::any("/api/notice/image/**"), Access::Public)
        .rule(RouteMatcher::any("/api/notice/attachment/**"), Access::Public)
        .rule(RouteMatcher::method(Method::GET, "/api/notice/**"), Access::Public)
        .rule(RouteMatcher::method(Method::POST, "/api/notice"), admin())
        .rule(RouteMatcher::method(Method::PUT, "/api/notice/**"), admin())
        .rule(RouteMatcher::method(Method::DELETE, "/api/notice/**"), admin())
        .fallback(Access::Public)
}
