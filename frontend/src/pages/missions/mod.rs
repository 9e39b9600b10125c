pub mod reward_roulette;

use yew::prelude::*;
use crate::styles;
use reward_roulette::RewardRoulette;

#[derive(Properties, PartialEq)]
pub struct MissionRewardPageProps {
    pub mission_set_id: String,
}

#[function_component(MissionRewardPage)]
pub fn mission_reward_page(props: &MissionRewardPageProps) -> Html {
    // Each open mounts a fresh roulette with freshly fetched options
    let is_open = use_state(|| false);

    let on_open = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(true))
    };

    let on_close = {
        let is_open = is_open.clone();
        Callback::from(move |_| is_open.set(false))
    };

    html! {
        <div class={styles::CONTAINER_LG}>
            <div class={classes!(styles::CARD, "max-w-xl", "mx-auto", "text-center")}>
                <h1 class={styles::TEXT_H2}>{"Mission complete"}</h1>
                <p class={classes!(styles::CARD_TEXT, "mt-2")}>
                    {"Spin the roulette to pick the reward for this mission set."}
                </p>
                <button class={classes!(styles::BUTTON_PRIMARY, "mt-6")} onclick={on_open}>
                    {"Open reward roulette"}
                </button>
            </div>
            if *is_open {
                <RewardRoulette mission_set_id={props.mission_set_id.clone()} {on_close} />
            }
        </div>
    }
}
