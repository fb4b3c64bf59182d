//! OpenAPI document for the user API.
//!
//! Served by Swagger UI at `/docs` (JSON at `/api-docs/openapi.json`) and
//! printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::{ProbeBody, StoreKind};
use crate::inbound::http::users::{
    CreateUserRequest, CreateUserResponse, CreatedUser, SuccessResponse, UpdateUserRequest,
    UserPayload, UserResponse, UsersPayload, UsersResponse,
};

/// OpenAPI document listing the user routes and health probes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "Create, read, update and delete user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::delete_all_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CreateUserRequest,
        UpdateUserRequest,
        UserPayload,
        CreatedUser,
        UsersPayload,
        CreateUserResponse,
        UsersResponse,
        UserResponse,
        SuccessResponse,
        ProbeBody,
        StoreKind,
    )),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;
