pub mod styles;
pub mod pages;
pub mod config;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::{
   missions::MissionRewardPage,
   not_found::NotFound,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
   #[at("/missions/:mission_set_id/reward")] MissionReward { mission_set_id: String },
   #[not_found]
   #[at("/404")] NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full bg-gray-50 dark:bg-gray-900">
                <div class="mx-auto">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
   match route {
       Route::MissionReward { mission_set_id } => html! { <MissionRewardPage {mission_set_id} /> },
       Route::NotFound => html! { <NotFound /> },
   }
}
