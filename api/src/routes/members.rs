use actix_identity::Identity;
use actix_web::{HttpResponse, delete, get, post, put, web};
use payloads::{CommunityId, MembershipId, RequestAction, requests};
use std::sync::Mutex;

use crate::store::Store;

use super::{APIError, get_user_id, lock_store};

/// List a community's memberships with one status (administrators only).
#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/communities/{community_id}/members")]
pub async fn get_memberships(
    user: Identity,
    community_id: web::Path<CommunityId>,
    query: web::Query<requests::MembersQuery>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let memberships =
        lock_store(&store)?.list_memberships(user_id, &community_id, &query)?;
    Ok(HttpResponse::Ok().json(memberships))
}

/// Ask to join, or invite someone into, a community.
#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[post("/communities/{community_id}/members")]
pub async fn request_membership(
    user: Identity,
    community_id: web::Path<CommunityId>,
    details: web::Json<requests::CreateMembershipRequest>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let membership_id =
        lock_store(&store)?.create_request(user_id, &community_id, &details)?;
    Ok(HttpResponse::Ok().json(membership_id))
}

#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[put("/communities/{community_id}/members/requests/{membership_id}")]
pub async fn change_role(
    user: Identity,
    path: web::Path<(CommunityId, MembershipId)>,
    details: web::Json<requests::ChangeRole>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let (community_id, membership_id) = path.into_inner();
    lock_store(&store)?.change_role(
        user_id,
        &community_id,
        &membership_id,
        details.role,
    )?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[post("/communities/{community_id}/members/requests/{membership_id}/{action}")]
pub async fn resolve_request(
    user: Identity,
    path: web::Path<(CommunityId, MembershipId, RequestAction)>,
    details: web::Json<requests::ResolveRequest>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let (community_id, membership_id, action) = path.into_inner();
    lock_store(&store)?.resolve_request(
        user_id,
        &community_id,
        &membership_id,
        action,
        &details,
    )?;
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty),
    ret
)]
#[delete("/communities/{community_id}/members/requests/{membership_id}")]
pub async fn remove_membership(
    user: Identity,
    path: web::Path<(CommunityId, MembershipId)>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let (community_id, membership_id) = path.into_inner();
    lock_store(&store)?.remove_membership(
        user_id,
        &community_id,
        &membership_id,
    )?;
    Ok(HttpResponse::NoContent().finish())
}

/// Pending invitations addressed to the logged in user.
#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/invitations")]
pub async fn get_received_invitations(
    user: Identity,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let invitations = lock_store(&store)?.received_invitations(user_id)?;
    Ok(HttpResponse::Ok().json(invitations))
}

/// One invitation, for the invitee's accept/decline page.
#[tracing::instrument(
    skip(user, store),
    fields(user_id = tracing::field::Empty)
)]
#[get("/communities/members/requests/{membership_id}")]
pub async fn get_invitation(
    user: Identity,
    membership_id: web::Path<MembershipId>,
    store: web::Data<Mutex<Store>>,
) -> Result<HttpResponse, APIError> {
    let user_id = get_user_id(&user)?;
    let invitation = lock_store(&store)?.invitation(user_id, &membership_id)?;
    Ok(HttpResponse::Ok().json(invitation))
}
