use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::auth::{AuthUser, TokenVerifier};
use crate::models::{
    CreateWishlistRequest, CreateWishlistResponse, DisplayType, GetWishlistResponse,
    GetWishlistsResponse, Status,
};
use crate::store::{StoreError, WishlistStore};

pub struct AppState {
    pub store: Arc<dyn WishlistStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}

// ==================== Health Check ====================

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// ==================== Wishlist Endpoints ====================

pub async fn create_wishlist(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    body: web::Bytes,
) -> impl Responder {
    if body.is_empty() {
        log::error!("request body is empty");
        return HttpResponse::Ok().json(Status::error("empty request"));
    }

    let req: CreateWishlistRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            log::error!("failed to parse request: {}", e);
            return HttpResponse::Ok().json(Status::error("failed to parse request"));
        }
    };

    let name = req.name.as_deref().unwrap_or("");
    if name.is_empty() {
        log::error!("failed to validate request: name is missing");
        return HttpResponse::Ok().json(Status::error("field Name is a required field"));
    }

    let display_type = match DisplayType::try_from(req.display_type) {
        Ok(dt) => dt,
        Err(e) => {
            log::error!("failed to parse display_type: {}", e);
            return HttpResponse::Ok().json(Status::error("failed to parse display_type"));
        }
    };

    // The owner is always the token identity; req.owner_id is ignored.
    match state
        .store
        .save_wishlist(auth_user.user_id, name, &req.description, display_type)
    {
        Ok(wishlist_id) => {
            log::info!("wishlist added: {}", wishlist_id);
            HttpResponse::Ok().json(CreateWishlistResponse {
                status: Status::ok(),
                wishlist_id,
            })
        }
        Err(StoreError::WishlistExists) => {
            log::error!("wishlist already exists");
            HttpResponse::Ok().json(Status::error("wishlist already exists"))
        }
        Err(e) => {
            log::error!("failed to create wishlist: {}", e);
            HttpResponse::Ok().json(Status::error("failed to create wishlist"))
        }
    }
}

pub async fn get_wishlist(
    state: web::Data<AppState>,
    _auth_user: AuthUser,
    path: web::Path<String>,
) -> impl Responder {
    let id = match path.into_inner().parse::<i64>() {
        Ok(id) => id,
        Err(e) => {
            log::error!("failed to parse id parameter: {}", e);
            return HttpResponse::Ok().json(Status::error("failed to parse id parameter from url"));
        }
    };

    // TODO: enforce ownership/visibility before returning other users' wishlists
    match state.store.get_wishlist(id) {
        Ok(wishlist) => {
            log::info!("wishlist fetched: {}", id);
            HttpResponse::Ok().json(GetWishlistResponse {
                status: Status::ok(),
                wishlist,
            })
        }
        Err(StoreError::NotFound(_)) => {
            log::error!("wishlist {} not found", id);
            HttpResponse::Ok().json(Status::error("failed to find wishlist"))
        }
        Err(e) => {
            log::error!("failed to get wishlist: {}", e);
            HttpResponse::Ok().json(Status::error("failed to get wishlist"))
        }
    }
}

pub async fn list_wishlists(state: web::Data<AppState>, auth_user: AuthUser) -> impl Responder {
    match state.store.get_wishlists(auth_user.user_id) {
        Ok(wishlists) => HttpResponse::Ok().json(GetWishlistsResponse {
            status: Status::ok(),
            wishlists,
        }),
        Err(e) => {
            log::error!("failed to get wishlists: {}", e);
            HttpResponse::Ok().json(Status::error("failed to get wishlists"))
        }
    }
}

// ==================== Route Configuration ====================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check (no auth required)
        .route("/health", web::get().to(health))
        // Wishlists
        .route("/api/wishlist", web::post().to(create_wishlist))
        .route("/api/wishlist", web::get().to(list_wishlists))
        .route("/api/wishlist/{wishlist_id}", web::get().to(get_wishlist));
}
