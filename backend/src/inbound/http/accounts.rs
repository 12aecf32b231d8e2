//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.org","password":"correct horse","displayName":"Ada","role":"Volunteer"}
//! POST /api/v1/login {"email":"ada@example.org","password":"correct horse"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::LoginSession;
use crate::domain::{CredentialsValidationError, Error, LoginCredentials, Role, SignUp, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, RoleSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.org")]
    pub email: Option<String>,
    /// At least eight characters.
    pub password: Option<String>,
    /// 3 to 32 letters, digits, spaces or underscores.
    #[schema(example = "Ada Lovelace")]
    pub display_name: Option<String>,
    /// `Organizer` or `Volunteer`.
    #[schema(example = "Volunteer")]
    pub role: Option<String>,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response carrying the bearer token.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Send as `Authorization: Bearer <token>`.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    #[schema(value_type = RoleSchema)]
    pub role: Role,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        let LoginSession { token, user } = session;
        Self {
            token: token.token,
            expires_at: token.expires_at,
            role: user.role(),
            user,
        }
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(FieldName::new(field)))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    invalid_field_error(FieldName::new(err.field()), &err)
}

impl TryFrom<RegisterRequest> for SignUp {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, "email")?;
        let password = require(value.password, "password")?;
        let display_name = require(value.display_name, "displayName")?;
        let role = require(value.role, "role")?;
        Self::try_from_parts(&email, &password, &display_name, &role)
            .map_err(map_credentials_error)
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, "email")?;
        let password = require(value.password, "password")?;
        Self::try_from_parts(&email, &password).map_err(map_credentials_error)
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let form = SignUp::try_from(payload.into_inner())?;
    let user = state.accounts.register(form).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(LoginResponse::from(session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Email, IssuedToken, UserId};
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn ada() -> User {
        User::new(
            UserId::random(),
            DisplayName::new("Ada Lovelace").expect("name"),
            Email::new("ada@example.org").expect("email"),
            Role::Organizer,
        )
    }

    async fn post_json(ports: MockPorts, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api/v1").service(register).service(login)),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_json(body)
                .to_request(),
        )
        .await;
        let status = response.status();
        let value = actix_test::read_body_json(response).await;
        (status, value)
    }

    #[actix_web::test]
    async fn register_returns_created_user() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .withf(|form| form.email().as_ref() == "ada@example.org" && form.role() == Role::Organizer)
            .return_once(|_| Ok(ada()));

        let (status, body) = post_json(
            ports,
            "/api/v1/register",
            json!({
                "email": "  Ada@Example.org ",
                "password": "analytical",
                "displayName": "Ada Lovelace",
                "role": "Organizer"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.get("displayName"), Some(&json!("Ada Lovelace")));
        assert!(body.get("password").is_none());
    }

    #[rstest]
    #[case(json!({"password": "analytical", "displayName": "Ada", "role": "Volunteer"}), "email", "missing_field")]
    #[case(json!({"email": "ada@example.org", "password": "short", "displayName": "Ada", "role": "Volunteer"}), "password", "invalid_value")]
    #[case(json!({"email": "ada@example.org", "password": "analytical", "displayName": "Ada!", "role": "Volunteer"}), "displayName", "invalid_value")]
    #[case(json!({"email": "ada@example.org", "password": "analytical", "displayName": "Ada", "role": "Admin"}), "role", "invalid_value")]
    #[actix_web::test]
    async fn register_rejects_invalid_forms(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.accounts.expect_register().never();

        let (status, payload) = post_json(ports, "/api/v1/register", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.pointer("/details/field"), Some(&json!(field)));
        assert_eq!(payload.pointer("/details/code"), Some(&json!(code)));
    }

    #[actix_web::test]
    async fn duplicate_emails_conflict() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .return_once(|_| Err(Error::conflict("email already registered")));

        let (status, payload) = post_json(
            ports,
            "/api/v1/register",
            json!({
                "email": "ada@example.org",
                "password": "analytical",
                "displayName": "Ada",
                "role": "Volunteer"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(payload.get("message"), Some(&json!("email already registered")));
    }

    #[actix_web::test]
    async fn login_returns_token_role_and_user() {
        let mut ports = MockPorts::default();
        ports.accounts.expect_login().return_once(|_| {
            Ok(LoginSession {
                token: IssuedToken {
                    token: "signed.jwt.value".to_owned(),
                    expires_at: Utc
                        .with_ymd_and_hms(2030, 1, 2, 3, 4, 5)
                        .single()
                        .expect("valid timestamp"),
                },
                user: ada(),
            })
        });

        let (status, body) = post_json(
            ports,
            "/api/v1/login",
            json!({"email": "ada@example.org", "password": "analytical"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("token"), Some(&json!("signed.jwt.value")));
        assert_eq!(body.get("role"), Some(&json!("Organizer")));
        assert_eq!(body.pointer("/user/email"), Some(&json!("ada@example.org")));
    }

    #[actix_web::test]
    async fn wrong_credentials_are_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));

        let (status, body) = post_json(
            ports,
            "/api/v1/login",
            json!({"email": "ada@example.org", "password": "wrong-password"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.get("code"), Some(&json!("unauthorized")));
    }
}
