use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod forms;
mod hooks;
mod logs;
mod members;
mod pages;
mod state;

pub use state::{AuthState, State};

use components::layout::MainLayout;
use pages::{
    CommunitiesPage, CommunityMembersPage, CreateCommunityPage,
    InvitationPage, InvitationsPage, LoginPage, NotFoundPage,
};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default();

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| logs::init_logging());
    hooks::use_authentication();

    html! {
        <BrowserRouter>
            <MainLayout>
                <Switch<Route> render={switch} />
            </MainLayout>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/communities")]
    Communities,
    #[at("/communities/new")]
    CreateCommunity,
    #[at("/communities/:id/members")]
    CommunityMembers { id: String },
    #[at("/communities/members/requests/:id")]
    Invitation { id: String },
    #[at("/invitations")]
    Invitations,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Communities} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Communities => html! { <CommunitiesPage /> },
        Route::CreateCommunity => html! { <CreateCommunityPage /> },
        Route::CommunityMembers { id } => html! {
            <CommunityMembersPage community_id={payloads::CommunityId(id)} />
        },
        Route::Invitation { id } => match id.parse() {
            Ok(id) => html! {
                <InvitationPage membership_id={payloads::MembershipId(id)} />
            },
            Err(_) => html! { <NotFoundPage /> },
        },
        Route::Invitations => html! { <InvitationsPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
