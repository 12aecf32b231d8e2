//! Social graph API handlers.
//!
//! ```text
//! POST   /api/v1/users/{user_id}/follow   Follow a user
//! DELETE /api/v1/users/{user_id}/follow   Stop following a user
//! POST   /api/v1/friends/{user_id}        Follow each other
//! GET    /api/v1/users?search=ada         People directory
//! GET    /api/v1/following                Users the caller follows
//! GET    /api/v1/followers                Users following the caller
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;

use crate::domain::{Candidate, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{CandidateSchema, ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

#[derive(Debug, Deserialize)]
pub struct UserPath {
    user_id: String,
}

/// Query string for the directory.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DirectoryQuery {
    /// Case-insensitive match against display name or email.
    pub search: Option<String>,
}

/// Follow a user.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/follow",
    params(("user_id" = String, Path, description = "User to follow")),
    responses(
        (status = 204, description = "Following"),
        (status = 400, description = "Invalid id or self-follow", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "followUser"
)]
#[post("/users/{user_id}/follow")]
pub async fn follow(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<UserPath>,
) -> ApiResult<HttpResponse> {
    let target = parse_user_id(&path.user_id)?;
    state.social.follow(auth.principal(), &target).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Stop following a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/follow",
    params(("user_id" = String, Path, description = "User to unfollow")),
    responses(
        (status = 204, description = "Not following"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "unfollowUser"
)]
#[delete("/users/{user_id}/follow")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<UserPath>,
) -> ApiResult<HttpResponse> {
    let target = parse_user_id(&path.user_id)?;
    state.social.unfollow(auth.principal(), &target).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record a friendship as two follow edges written together.
#[utoipa::path(
    post,
    path = "/api/v1/friends/{user_id}",
    params(("user_id" = String, Path, description = "New friend")),
    responses(
        (status = 204, description = "Friendship recorded"),
        (status = 400, description = "Invalid id or self-friendship", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "addFriend"
)]
#[post("/friends/{user_id}")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<UserPath>,
) -> ApiResult<HttpResponse> {
    let target = parse_user_id(&path.user_id)?;
    state.social.befriend(auth.principal(), &target).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// People the caller might want to follow.
///
/// Users sharing a group with the caller come first, then everyone else by
/// display name.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(DirectoryQuery),
    responses(
        (status = 200, description = "Directory candidates", body = [CandidateSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn directory(
    state: web::Data<HttpState>,
    auth: Authenticated,
    query: web::Query<DirectoryQuery>,
) -> ApiResult<web::Json<Vec<Candidate>>> {
    let search = query.into_inner().search;
    let candidates = state
        .social_query
        .directory(auth.principal(), search)
        .await?;
    Ok(web::Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/v1/following",
    responses(
        (status = 200, description = "Followed users by display name", body = [UserSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "listFollowing"
)]
#[get("/following")]
pub async fn following(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.social_query.following(auth.principal()).await?;
    Ok(web::Json(users))
}

#[utoipa::path(
    get,
    path = "/api/v1/followers",
    responses(
        (status = 200, description = "Followers by display name", body = [UserSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["social"],
    operation_id = "listFollowers"
)]
#[get("/followers")]
pub async fn followers(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.social_query.followers(auth.principal()).await?;
    Ok(web::Json(users))
}
