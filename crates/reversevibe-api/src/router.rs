//! Route definitions for the ReverseVibe HTTP API.
//!
//! Every route is declared once as a [`RouteEntry`] carrying its access rule.
//! [`access_table`] exposes the same list without handlers so the whole
//! surface can be audited, and [`build_router`] wraps each entry in the
//! guard middleware for its rule.
//!
//! Static segments win over parameters, so `/posts/search` and
//! `/notifications/admin` are reachable next to their `{id}` siblings.

use axum::Router;
use axum::handler::Handler;
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::routing::{self, MethodRouter};
use tower_http::services::ServeDir;

use reversevibe_auth::RoleGate;

use crate::handlers;
use crate::middleware::guard::{RouteGuard, enforce};
use crate::state::AppState;

pub use crate::middleware::guard::RouteAccess;

/// One route as registered.
pub struct RouteEntry {
    method: Method,
    path: &'static str,
    access: RouteAccess,
    handler: MethodRouter<AppState>,
}

/// One route as audited: what it is and what guards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// HTTP method.
    pub method: Method,
    /// Path template, in axum syntax.
    pub path: &'static str,
    /// Access rule enforced before the handler.
    pub access: RouteAccess,
}

macro_rules! entry_ctor {
    ($name:ident, $method:ident) => {
        fn $name<H, T>(path: &'static str, access: RouteAccess, handler: H) -> Self
        where
            H: Handler<T, AppState>,
            T: 'static,
        {
            Self {
                method: Method::$method,
                path,
                access,
                handler: routing::$name(handler),
            }
        }
    };
}

impl RouteEntry {
    entry_ctor!(get, GET);
    entry_ctor!(post, POST);
    entry_ctor!(put, PUT);
    entry_ctor!(delete, DELETE);

    fn rule(&self) -> RouteRule {
        RouteRule {
            method: self.method.clone(),
            path: self.path,
            access: self.access,
        }
    }
}

/// Every route with its access rule, in registration order.
pub fn access_table() -> Vec<RouteRule> {
    routes().iter().map(RouteEntry::rule).collect()
}

/// Registers every route behind its guard, plus the root, static uploads,
/// and the not-found fallback.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let mut router = Router::new();
    for entry in routes() {
        let guard = RouteGuard {
            state: state.clone(),
            access: entry.access,
        };
        router = router.route(
            entry.path,
            entry.handler.route_layer(from_fn_with_state(guard, enforce)),
        );
    }

    router
        .route("/", routing::get(handlers::root::welcome))
        .nest_service("/uploads", ServeDir::new(&state.config.storage.upload_dir))
        .fallback(handlers::root::not_found)
}

fn routes() -> Vec<RouteEntry> {
    let mut routes = Vec::new();
    routes.extend(auth_routes());
    routes.extend(user_routes());
    routes.extend(post_routes());
    routes.extend(follow_routes());
    routes.extend(notification_routes());
    routes.extend(media_routes());
    routes.extend(moderation_routes());
    routes.extend(admin_routes());
    routes
}

/// Registration and login.
fn auth_routes() -> Vec<RouteEntry> {
    use RouteAccess::Public;
    use handlers::auth;

    vec![
        RouteEntry::post("/auth/register", Public, auth::register),
        RouteEntry::post("/auth/login", Public, auth::login),
    ]
}

/// User listing, lookup, and unrestricted update/delete.
fn user_routes() -> Vec<RouteEntry> {
    use RouteAccess::{Authenticated, Public};
    use handlers::user;

    vec![
        RouteEntry::get("/users", Public, user::list_users),
        RouteEntry::get("/users/search", Public, user::search_users),
        RouteEntry::get("/users/{id}", Public, user::get_user),
        RouteEntry::put("/users/{id}", Authenticated, user::update_user),
        RouteEntry::delete("/users/{id}", Authenticated, user::delete_user),
    ]
}

/// Posts and comments.
fn post_routes() -> Vec<RouteEntry> {
    use RouteAccess::{Authenticated, Public};
    use handlers::post;

    vec![
        RouteEntry::get("/posts", Public, post::list_posts),
        RouteEntry::post("/posts", Authenticated, post::create_post),
        RouteEntry::get("/posts/search", Public, post::search_posts),
        RouteEntry::get("/posts/{id}", Public, post::get_post),
        RouteEntry::put("/posts/{id}", Authenticated, post::update_post),
        RouteEntry::delete("/posts/{id}", Authenticated, post::delete_post),
        RouteEntry::post("/posts/{id}/comment", Authenticated, post::add_comment),
    ]
}

/// Follow graph.
fn follow_routes() -> Vec<RouteEntry> {
    use RouteAccess::{Authenticated, Public};
    use handlers::follow;

    vec![
        RouteEntry::post("/follow", Authenticated, follow::follow_user),
        RouteEntry::delete("/follow/{id}", Authenticated, follow::unfollow),
        RouteEntry::get("/follow/followers", Authenticated, follow::my_followers),
        RouteEntry::get("/follow/following", Authenticated, follow::my_following),
        RouteEntry::get("/follow/followers/{user_id}", Public, follow::followers_of),
        RouteEntry::get("/follow/following/{user_id}", Public, follow::following_of),
    ]
}

/// Notifications.
fn notification_routes() -> Vec<RouteEntry> {
    use RouteAccess::{Authenticated, Gated};
    use handlers::notification;

    vec![
        RouteEntry::get(
            "/notifications",
            Authenticated,
            notification::list_notifications,
        ),
        RouteEntry::post(
            "/notifications",
            Authenticated,
            notification::create_notification,
        ),
        RouteEntry::get(
            "/notifications/admin",
            Gated(RoleGate::RoleFieldPresent),
            notification::admin_notifications,
        ),
        RouteEntry::get(
            "/notifications/{id}",
            Authenticated,
            notification::get_notification,
        ),
        RouteEntry::put("/notifications/{id}", Authenticated, notification::mark_read),
        RouteEntry::delete(
            "/notifications/{id}",
            Authenticated,
            notification::delete_notification,
        ),
    ]
}

/// Media upload and retrieval.
fn media_routes() -> Vec<RouteEntry> {
    use RouteAccess::Authenticated;
    use handlers::media;

    vec![
        RouteEntry::post("/media/upload", Authenticated, media::upload_media),
        RouteEntry::get("/media", Authenticated, media::my_media),
        RouteEntry::get("/media/file/{id}", Authenticated, media::serve_media_file),
        RouteEntry::get("/media/{id}", Authenticated, media::get_media),
        RouteEntry::delete("/media/{id}", Authenticated, media::delete_media),
    ]
}

/// Post moderation.
fn moderation_routes() -> Vec<RouteEntry> {
    use RouteAccess::Gated;
    use handlers::moderation;

    let moderator = Gated(RoleGate::ModeratorOrAdministrator);
    vec![
        RouteEntry::get("/moderation/posts", moderator, moderation::list_all_posts),
        RouteEntry::put(
            "/moderation/posts/{id}/visibility",
            moderator,
            moderation::set_visibility,
        ),
    ]
}

/// Administration.
fn admin_routes() -> Vec<RouteEntry> {
    use RouteAccess::{Authenticated, Gated};
    use handlers::admin;

    let administrator = Gated(RoleGate::Administrator);
    vec![
        RouteEntry::get("/admin/users", administrator, admin::list_users),
        RouteEntry::delete("/admin/users/{id}", administrator, admin::delete_user),
        RouteEntry::get("/admin/posts", administrator, admin::list_posts),
        RouteEntry::delete("/admin/posts/{id}", administrator, admin::delete_post),
        RouteEntry::get("/admin/media", administrator, admin::list_media),
        RouteEntry::get("/admin/logs", administrator, admin::logs),
        RouteEntry::get("/admin/debug", Authenticated, admin::debug),
        RouteEntry::get(
            "/admin/challenges/secret",
            Authenticated,
            admin::secret_challenge,
        ),
    ]
}
