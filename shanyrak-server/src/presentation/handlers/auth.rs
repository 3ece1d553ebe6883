use axum::{Form, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, RegisterRequest, UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 5, max = 32))]
    pub(crate) phone: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) name: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) city: String,
}

/// Form body of the login endpoint. `username` is an email or a phone number.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginForm {
    #[validate(length(min = 1, max = 255))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) name: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) city: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenResponseDto {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) name: String,
    pub(crate) city: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            phone: user.phone,
            name: user.name,
            city: user.city,
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/users/",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or phone already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let req = RegisterRequest {
        email: dto.email,
        phone: dto.phone,
        name: dto.name,
        password: dto.password,
        city: dto.city,
    };

    let user = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/auth/users/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<(StatusCode, Json<TokenResponseDto>)> {
    form.validate()?;

    let req = LoginRequest {
        username: form.username,
        password: form.password,
    };

    let access_token = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(TokenResponseDto {
            access_token,
            token_type: "bearer".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/auth/users/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.auth_service.profile(auth.user_id).await?;
    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    patch,
    path = "/auth/users/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let req = UpdateProfileRequest {
        name: dto.name,
        city: dto.city,
    };

    let user = state.auth_service.update_profile(&auth.email, req).await?;
    Ok((StatusCode::OK, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/auth/users/",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registered users", body = [UserDto]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<UserDto>>)> {
    let users = state.auth_service.list_users().await?;
    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(UserDto::from).collect()),
    ))
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::{LoginForm, RegisterDto};

    fn register_dto(email: &str, password: &str) -> RegisterDto {
        RegisterDto {
            email: email.to_string(),
            phone: "+77001234567".to_string(),
            name: "Aigerim".to_string(),
            password: password.to_string(),
            city: "Almaty".to_string(),
        }
    }

    #[test]
    fn register_dto_checks_email_and_password_length() {
        assert!(register_dto("aigerim@example.kz", "long-enough").validate().is_ok());

        let errors = register_dto("not-an-email", "short")
            .validate()
            .expect_err("must fail");
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn login_form_requires_both_fields() {
        let form = LoginForm {
            username: String::new(),
            password: String::new(),
        };
        let errors = form.validate().expect_err("must fail");
        assert_eq!(errors.field_errors().len(), 2);
    }
}
