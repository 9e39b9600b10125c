use yew::prelude::*;
use crate::styles;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class={styles::CONTAINER_LG}>
            <div class={classes!(styles::CARD, "max-w-md", "mx-auto", "text-center")}>
                <h1 class={styles::TEXT_H2}>{"Page not found"}</h1>
                <p class={classes!(styles::TEXT_BODY, "mt-2")}>{"Open a reward from one of your missions."}</p>
            </div>
        </div>
    }
}
