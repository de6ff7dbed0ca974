pub mod community;
pub mod login;
pub mod members;

use actix_identity::Identity;
use actix_web::{
    HttpResponse, Responder, ResponseError, dev::HttpServiceFactory, get,
    http::StatusCode, web,
};
use payloads::responses::{ErrorBody, FieldError};
use std::sync::{Mutex, MutexGuard};

use crate::store::{Store, StoreError, UserId};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(login::login)
        .service(login::logout)
        .service(login::user_profile)
        .service(community::create_community)
        .service(members::get_memberships)
        .service(members::request_membership)
        .service(members::change_role)
        .service(members::resolve_request)
        .service(members::remove_membership)
        .service(members::get_received_invitations)
        .service(members::get_invitation)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Invalid fields")]
    InvalidFields(Vec<FieldError>),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::InvalidFields(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::AuthError(e) | Self::BadRequest(e) | Self::NotFound(e) => {
                ErrorBody::message(format!("{self}: {e}"))
            }
            Self::InvalidFields(errors) => ErrorBody {
                message: None,
                errors: errors.clone(),
            },
            Self::UnexpectedError(e) => {
                tracing::error!("{e:#}");
                ErrorBody::message(self.to_string())
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidCommunity(errors) => APIError::InvalidFields(
                errors
                    .into_iter()
                    .map(|(field, error)| FieldError {
                        field: field.name().to_string(),
                        message: error.to_string(),
                    })
                    .collect(),
            ),
            StoreError::CommunityIdTaken => {
                APIError::InvalidFields(vec![FieldError {
                    field: "id".to_string(),
                    message: e.to_string(),
                }])
            }
            StoreError::MissingInviteEmail
            | StoreError::InvalidInviteEmail => {
                APIError::InvalidFields(vec![FieldError {
                    field: "email".to_string(),
                    message: e.to_string(),
                }])
            }
            // Non-administrators are not told the resource exists.
            StoreError::RequiresAdmin
            | StoreError::NotInvitee
            | StoreError::UserNotFound
            | StoreError::CommunityNotFound
            | StoreError::MembershipNotFound => APIError::NotFound(e.into()),
            StoreError::AlreadyMember
            | StoreError::PendingInvitation
            | StoreError::NotPending
            | StoreError::LastAdmin => APIError::BadRequest(e.into()),
        }
    }
}

fn get_user_id(user: &Identity) -> Result<UserId, APIError> {
    let id_str = user.id().map_err(|e| {
        APIError::AuthError(
            anyhow::Error::from(e).context("Invalid login session"),
        )
    })?;
    // recorded here, but attaches to the span for the api route itself
    tracing::Span::current()
        .record("user_id", tracing::field::display(&id_str));
    let id = id_str.parse::<u32>().map_err(|e| {
        APIError::AuthError(anyhow::Error::from(e).context("Malformed user id"))
    })?;
    Ok(UserId(id))
}

fn lock_store(
    store: &Mutex<Store>,
) -> Result<MutexGuard<'_, Store>, APIError> {
    store.lock().map_err(|_| {
        APIError::UnexpectedError(anyhow::anyhow!("Store poisoned"))
    })
}
