//! User CRUD handlers.
//!
//! ```text
//! POST   /create              {"full_name":"Alice","role":"admin","efficiency":5}
//! GET    /get?role=admin
//! GET    /get/{user_id}
//! PATCH  /update/{user_id}    {"efficiency":9}
//! DELETE /delete/{user_id}
//! DELETE /delete
//! ```
//!
//! Every success body is `{"success": true, ...}`; failures go through
//! [`Error`] and its `ResponseError` implementation.

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, FullName, NewUser, Role, USER_NOT_FOUND, User, UserField, UserFilter, UserId, UserPatch,
    UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::extract::{json_config, path_config, query_config};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_validation_error, optional, present, required};

/// Body for `POST /create`. All three fields are required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String, example = "Alice")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String, example = "admin")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = i32, example = 5)]
    pub efficiency: Option<Option<i32>>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let full_name = FullName::new(required(UserField::FullName, value.full_name)?)?;
        let role = Role::new(required(UserField::Role, value.role)?)?;
        let efficiency = required(UserField::Efficiency, value.efficiency)?;
        Ok(NewUser::new(full_name, role, efficiency))
    }
}

/// Body for `PATCH /update/{user_id}`. Omitted fields keep their value;
/// `null` is rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub efficiency: Option<Option<i32>>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let mut patch = UserPatch::default();
        if let Some(full_name) = optional(UserField::FullName, value.full_name)? {
            patch = patch.with_full_name(FullName::new(full_name)?);
        }
        if let Some(role) = optional(UserField::Role, value.role)? {
            patch = patch.with_role(Role::new(role)?);
        }
        if let Some(efficiency) = optional(UserField::Efficiency, value.efficiency)? {
            patch = patch.with_efficiency(efficiency);
        }
        Ok(patch)
    }
}

/// Query for `GET /get`. An empty `role` lists everyone.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Exact role to match.
    pub role: Option<String>,
}

/// Wire form of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub full_name: String,
    #[schema(example = "admin")]
    pub role: String,
    #[schema(example = 5)]
    pub efficiency: i32,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            full_name: user.full_name().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            efficiency: user.efficiency(),
        }
    }
}

/// Identifier assigned on creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedUser {
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersPayload {
    pub users: Vec<UserPayload>,
}

/// `{"success": true, "result": {"id": ..}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub success: bool,
    pub result: CreatedUser,
}

/// `{"success": true, "result": {"users": [..]}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub result: UsersPayload,
}

impl UsersResponse {
    fn from_users(users: Vec<User>) -> Self {
        Self {
            success: true,
            result: UsersPayload {
                users: users.into_iter().map(UserPayload::from).collect(),
            },
        }
    }
}

/// `{"success": true, "result": {"id": .., "full_name": .., ..}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub result: UserPayload,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            success: true,
            result: user.into(),
        }
    }
}

/// `{"success": true}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Ids the store can never have assigned are reported as missing rows.
fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::try_from(raw).map_err(|_| Error::not_found(USER_NOT_FOUND))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/create",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<CreateUserResponse>> {
    let new_user = NewUser::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state.users_command.create_user(new_user).await?;
    Ok(web::Json(CreateUserResponse {
        success: true,
        result: CreatedUser { id: user.id().get() },
    }))
}

/// List users, optionally filtered by role.
#[utoipa::path(
    get,
    path = "/get",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Matching users", body = UsersResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/get")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<UsersResponse>> {
    let filter = match query.into_inner().role {
        None => UserFilter::all(),
        Some(role) if role.is_empty() => UserFilter::all(),
        Some(role) => match Role::new(role) {
            Ok(role) => UserFilter::by_role(role),
            // No stored role is blank.
            Err(_) => return Ok(web::Json(UsersResponse::from_users(Vec::new()))),
        },
    };
    let users = state.users_query.list_users(&filter).await?;
    Ok(web::Json(UsersResponse::from_users(users)))
}

/// Fetch one user, wrapped in a single-element `users` array.
#[utoipa::path(
    get,
    path = "/get/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UsersResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/get/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UsersResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(UsersResponse::from_users(vec![user])))
}

/// Apply a partial update and return the full record.
#[utoipa::path(
    patch,
    path = "/update/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/update/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let patch = UserPatch::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state.users_command.update_user(id, patch).await?;
    Ok(web::Json(user.into()))
}

/// Delete one user and return the record as it was.
#[utoipa::path(
    delete,
    path = "/delete/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/delete/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.users_command.delete_user(id).await?;
    Ok(web::Json(user.into()))
}

/// Delete every user.
#[utoipa::path(
    delete,
    path = "/delete",
    responses(
        (status = 200, description = "All users deleted", body = SuccessResponse),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAllUsers"
)]
#[delete("/delete")]
pub async fn delete_all_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SuccessResponse>> {
    state.users_command.delete_all_users().await?;
    Ok(web::Json(SuccessResponse { success: true }))
}

/// Register the user routes and the JSON extractor error handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use userbase::inbound::http::{state::HttpState, users};
/// use userbase::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::for_repository(Arc::new(InMemoryUserRepository::new()));
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(users::configure);
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(delete_all_users);
}
