use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, get, post, web};
use payloads::{requests::LoginCredentials, responses::UserProfile};
use std::sync::Mutex;

use crate::store::Store;

use super::{APIError, get_user_id, lock_store};

/// Log in as one of the store's users. There are no passwords: this api
/// only exists for development and tests.
#[tracing::instrument(
    skip(request, credentials, store),
    fields(username = %credentials.username, user_id = tracing::field::Empty),
    ret
)]
#[post("/login")]
pub async fn login(
    request: HttpRequest,
    credentials: web::Json<LoginCredentials>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = lock_store(&store)?
        .user_by_name(&credentials.username)
        .map(|user| user.id)
        .map_err(|e| APIError::AuthError(e.into()))?;
    tracing::Span::current()
        .record("user_id", tracing::field::display(&user_id));
    Identity::login(&request.extensions(), user_id.to_string())
        .map_err(|e| APIError::UnexpectedError(e.into()))?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(user), fields(user_id = tracing::field::Empty))]
#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> Result<HttpResponse, APIError> {
    if let Some(user) = user {
        let _ = get_user_id(&user); // to instrument the user_id, if exists
        user.logout();
    }
    Ok(HttpResponse::Ok().finish())
}

/// The logged in user. Lets the ui restore its session after a reload.
#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/user_profile")]
pub async fn user_profile(
    user: Identity,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let store = lock_store(&store)?;
    let details = store
        .user(user_id)
        .map_err(|e| APIError::AuthError(e.into()))?;
    Ok(HttpResponse::Ok().json(UserProfile {
        username: details.username.clone(),
        email: details.email.clone(),
    }))
}
