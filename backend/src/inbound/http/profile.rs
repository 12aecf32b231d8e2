//! Profile and skills API handlers.
//!
//! ```text
//! GET /api/v1/profile/me
//! PUT /api/v1/profile        {"displayName":"Ada","profileImage":{"data":"...","extension":"png"}}
//! GET /api/v1/profile/skills
//! PUT /api/v1/profile/skills {"skills":["First Aid","Driving"]}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ProfileUpdate;
use crate::domain::{DisplayName, Error, SkillSet, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::ImagePayload;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

/// Partial profile update; omitted fields stay as they are.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    #[schema(example = "Ada Lovelace")]
    pub display_name: Option<String>,
    pub profile_image: Option<ImagePayload>,
}

/// Skill list used by both skill endpoints.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillsBody {
    #[schema(example = json!(["First Aid", "Driving"]))]
    pub skills: Option<Vec<String>>,
}

impl From<SkillSet> for SkillsBody {
    fn from(skills: SkillSet) -> Self {
        Self {
            skills: Some(skills.names()),
        }
    }
}

impl TryFrom<UpdateProfileBody> for ProfileUpdate {
    type Error = Error;

    fn try_from(body: UpdateProfileBody) -> Result<Self, Self::Error> {
        let field = FieldName::new("displayName");
        let display_name = body
            .display_name
            .map(|raw| DisplayName::new(raw.trim()).map_err(|err| invalid_field_error(field, err)))
            .transpose()?;
        let image = body
            .profile_image
            .map(|payload| payload.into_upload(FieldName::new("profileImage")))
            .transpose()?;
        Ok(Self {
            display_name,
            image,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/profile/me",
    responses(
        (status = 200, description = "Caller's account", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile/me")]
pub async fn current_profile(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<User>> {
    let user = state.profile_query.profile(auth.principal()).await?;
    Ok(web::Json(user))
}

/// Rename the caller or replace their profile image.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated account", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<User>> {
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let user = state
        .profile
        .update_profile(auth.principal(), update)
        .await?;
    Ok(web::Json(user))
}

#[utoipa::path(
    get,
    path = "/api/v1/profile/skills",
    responses(
        (status = 200, description = "Skills in alphabetical order", body = SkillsBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getSkills"
)]
#[get("/profile/skills")]
pub async fn get_skills(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<SkillsBody>> {
    let skills = state.profile_query.skills(auth.principal()).await?;
    Ok(web::Json(SkillsBody::from(skills)))
}

/// Replace the caller's skills. Duplicates collapse.
#[utoipa::path(
    put,
    path = "/api/v1/profile/skills",
    request_body = SkillsBody,
    responses(
        (status = 200, description = "Stored skills", body = SkillsBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "replaceSkills"
)]
#[put("/profile/skills")]
pub async fn replace_skills(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<SkillsBody>,
) -> ApiResult<web::Json<SkillsBody>> {
    let field = FieldName::new("skills");
    let raw = payload
        .into_inner()
        .skills
        .ok_or_else(|| missing_field_error(field))?;
    let skills = SkillSet::parse(raw).map_err(|err| invalid_field_error(field, err))?;
    let stored = state
        .profile
        .replace_skills(auth.principal(), skills)
        .await?;
    Ok(web::Json(SkillsBody::from(stored)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Principal, Role, UserId};
    use crate::inbound::http::test_utils::{MockPorts, bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn principal() -> Principal {
        Principal::new(UserId::random(), Role::Volunteer)
    }

    fn grace(principal: &Principal) -> User {
        User::new(
            principal.user_id,
            DisplayName::new("Grace").expect("name"),
            Email::new("grace@example.org").expect("email"),
            principal.role,
        )
    }

    async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(
                    web::scope("/api/v1")
                        .service(current_profile)
                        .service(update_profile)
                        .service(get_skills)
                        .service(replace_skills),
                ),
        )
        .await;
        let response =
            actix_test::call_service(&app, request.insert_header(bearer()).to_request()).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn current_profile_returns_the_account() {
        let me = principal();
        let mut ports = MockPorts::signed_in_as(me);
        ports
            .profile_query
            .expect_profile()
            .return_once(move |_| Ok(grace(&me)));

        let (status, body) = call(
            ports,
            actix_test::TestRequest::get().uri("/api/v1/profile/me"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("email"), Some(&json!("grace@example.org")));
        assert_eq!(body.get("role"), Some(&json!("Volunteer")));
    }

    #[actix_web::test]
    async fn update_passes_name_and_image() {
        let me = principal();
        let mut ports = MockPorts::signed_in_as(me);
        ports
            .profile
            .expect_update_profile()
            .withf(|_, update| {
                update
                    .display_name
                    .as_ref()
                    .is_some_and(|name| name.as_ref() == "Amazing Grace")
                    && update.image.is_some()
            })
            .return_once(move |_, _| Ok(grace(&me)));

        let (status, _) = call(
            ports,
            actix_test::TestRequest::put().uri("/api/v1/profile").set_json(json!({
                "displayName": " Amazing Grace ",
                "profileImage": {"data": "R0lGODlh", "extension": "gif"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn update_rejects_invalid_names() {
        let mut ports = MockPorts::signed_in_as(principal());
        ports.profile.expect_update_profile().never();

        let (status, body) = call(
            ports,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile")
                .set_json(json!({"displayName": "x"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.pointer("/details/field"), Some(&json!("displayName")));
    }

    #[actix_web::test]
    async fn skills_are_replaced_as_a_set() {
        let mut ports = MockPorts::signed_in_as(principal());
        ports
            .profile
            .expect_replace_skills()
            .withf(|_, skills| skills.names() == vec!["Cooking", "Driving"])
            .return_once(|_, skills| Ok(skills));

        let (status, body) = call(
            ports,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile/skills")
                .set_json(json!({"skills": ["Driving", " Cooking ", "Driving"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("skills"), Some(&json!(["Cooking", "Driving"])));
    }

    #[rstest]
    #[case(json!({}), "missing_field")]
    #[case(json!({"skills": ["   "]}), "invalid_value")]
    #[actix_web::test]
    async fn malformed_skill_lists_are_rejected(#[case] body: Value, #[case] code: &str) {
        let mut ports = MockPorts::signed_in_as(principal());
        ports.profile.expect_replace_skills().never();

        let (status, payload) = call(
            ports,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile/skills")
                .set_json(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.pointer("/details/code"), Some(&json!(code)));
    }
}
