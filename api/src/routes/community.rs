use actix_identity::Identity;
use actix_web::{HttpResponse, post, web};
use payloads::requests::CreateCommunity;
use std::sync::Mutex;

use crate::store::Store;

use super::{APIError, get_user_id, lock_store};

#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[post("/communities/")]
pub async fn create_community(
    user: Identity,
    details: web::Json<CreateCommunity>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let community = lock_store(&store)?.create_community(user_id, &details)?;
    Ok(HttpResponse::Created().json(community))
}
