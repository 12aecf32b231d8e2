//! Group API handlers.
//!
//! ```text
//! POST /api/v1/groups {"name":"Saturday litter pickers"}
//! POST /api/v1/groups/{group_id}/join
//! POST /api/v1/groups/{group_id}/leave
//! GET  /api/v1/groups/mine
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Group, GroupName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, GroupSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, missing_field_error, parse_group_id,
};

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupBody {
    #[schema(example = "Saturday litter pickers")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroupPath {
    group_id: String,
}

/// Create a group; the caller becomes its first member.
#[utoipa::path(
    post,
    path = "/api/v1/groups",
    request_body = CreateGroupBody,
    responses(
        (status = 201, description = "Group created", body = GroupSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "createGroup"
)]
#[post("/groups")]
pub async fn create_group(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreateGroupBody>,
) -> ApiResult<HttpResponse> {
    let field = FieldName::new("name");
    let raw = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error(field))?;
    let name = GroupName::new(raw).map_err(|err| invalid_field_error(field, err))?;
    let group = state.groups.create_group(auth.principal(), name).await?;
    Ok(HttpResponse::Created().json(group))
}

#[utoipa::path(
    post,
    path = "/api/v1/groups/{group_id}/join",
    params(("group_id" = String, Path, description = "Group identifier")),
    responses(
        (status = 204, description = "Member"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "joinGroup"
)]
#[post("/groups/{group_id}/join")]
pub async fn join_group(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<GroupPath>,
) -> ApiResult<HttpResponse> {
    let group_id = parse_group_id(&path.group_id)?;
    state.groups.join_group(auth.principal(), &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/groups/{group_id}/leave",
    params(("group_id" = String, Path, description = "Group identifier")),
    responses(
        (status = 204, description = "Not a member"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Group not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "leaveGroup"
)]
#[post("/groups/{group_id}/leave")]
pub async fn leave_group(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<GroupPath>,
) -> ApiResult<HttpResponse> {
    let group_id = parse_group_id(&path.group_id)?;
    state.groups.leave_group(auth.principal(), &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/mine",
    responses(
        (status = 200, description = "Caller's groups by name", body = [GroupSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "listMyGroups"
)]
#[get("/groups/mine")]
pub async fn my_groups(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<Group>>> {
    let groups = state.groups_query.my_groups(auth.principal()).await?;
    Ok(web::Json(groups))
}
