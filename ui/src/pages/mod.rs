pub mod communities;
pub mod community_members;
pub mod create_community;
pub mod invitations;
pub mod login;
pub mod not_found;

pub use communities::CommunitiesPage;
pub use community_members::CommunityMembersPage;
pub use create_community::CreateCommunityPage;
pub use invitations::{InvitationPage, InvitationsPage};
pub use login::LoginPage;
pub use not_found::NotFoundPage;
