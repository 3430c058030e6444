use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod bans;
    pub mod keys;
    pub mod messages;
    pub mod metrics;
}
pub mod middleware {
    pub mod auth;
}
mod dtos {
    pub(crate) mod query;
}

#[cfg(test)]
mod tests;

pub fn mount_dash() -> actix_web::Scope {
    web::scope("")
        .service(routes::keys::get_keys)
        .service(routes::keys::post_create_key)
        .service(routes::keys::get_key_metrics)
        .service(routes::keys::get_key_detail)
        .service(routes::keys::delete_key)
        .service(routes::keys::patch_key)
        .service(routes::metrics::get_metrics)
        .service(routes::bans::get_bans)
        .service(routes::bans::get_user_bans)
        .service(routes::bans::post_ban_user)
        .service(routes::bans::post_ban_server)
        .service(routes::bans::post_unban_user)
        .service(routes::bans::post_unban_server)
        .service(routes::messages::get_message_info)
        .service(routes::messages::delete_message)
}
pub fn middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
