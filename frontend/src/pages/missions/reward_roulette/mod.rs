mod frame_clock;
mod reward_client;
mod wheel_canvas;
mod wheel_utils;

use std::rc::Rc;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use shared::roulette_session::{
    OpenOutcome, RouletteError, RoulettePhase, RouletteSession, SessionCloser, SpinEvent, SpinOutcome,
};
use shared::shared_roulette::{ClaimResult, RewardOption};
use crate::styles;

use frame_clock::AnimationFrameClock;
use reward_client::HttpRewardService;
use wheel_canvas::WheelCanvas;
use wheel_utils::{ResultDisplay, SpinButton};

type Session = RouletteSession<HttpRewardService>;

// Add custom CSS for animations
const CUSTOM_CSS: &str = r#"
@keyframes pulse-subtle {
    0% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0.4);
    }
    70% {
        transform: scale(1.02);
        box-shadow: 0 0 0 10px rgba(255, 215, 0, 0);
    }
    100% {
        transform: scale(1);
        box-shadow: 0 0 0 0 rgba(255, 215, 0, 0);
    }
}

.animate-pulse-subtle {
    animation: pulse-subtle 2s infinite;
}
"#;

#[derive(Clone, PartialEq)]
enum LoadState {
    Checking,
    AlreadyClaimed(String),
    Failed(String),
    Ready,
}

#[derive(Properties, PartialEq)]
pub struct RewardRouletteProps {
    pub mission_set_id: String,
    pub on_close: Callback<()>,
}

/// Roulette modal. Mounting it opens a fresh session; unmounting closes it.
#[function_component(RewardRoulette)]
pub fn reward_roulette(props: &RewardRouletteProps) -> Html {
    // Apply custom CSS
    {
        use_effect_with((), move |_| {
            let style_element = window()
                .and_then(|w| w.document())
                .and_then(|document| {
                    let head = document.head()?;
                    let style = document.create_element("style").ok()?;
                    style.set_text_content(Some(CUSTOM_CSS));
                    head.append_child(&style).ok()?;
                    Some(style)
                });

            move || {
                if let Some(style) = style_element {
                    if let Some(parent) = style.parent_node() {
                        let _ = parent.remove_child(&style);
                    }
                }
            }
        });
    }

    let load_state = use_state(|| LoadState::Checking);
    let phase = use_state(|| RoulettePhase::Idle);
    let options = use_state(Vec::<RewardOption>::new);
    let rotation = use_state(|| 0.0);
    let highlight = use_state(|| None::<usize>);
    let claim_result = use_state(|| None::<ClaimResult>);
    let session = use_mut_ref(|| None::<Rc<Session>>);

    // Open the session on mount, close it on unmount
    {
        let load_state = load_state.clone();
        let phase = phase.clone();
        let options = options.clone();
        let session = session.clone();

        use_effect_with(props.mission_set_id.clone(), move |mission_set_id| {
            let closer = SessionCloser::new();
            let mission_set_id = mission_set_id.clone();
            let open_closer = closer.clone();

            load_state.set(LoadState::Checking);
            phase.set(RoulettePhase::Checking);

            spawn_local(async move {
                match RouletteSession::open(mission_set_id, HttpRewardService::new(), open_closer).await {
                    Ok(OpenOutcome::AlreadyClaimed { option_name }) => {
                        phase.set(RoulettePhase::AlreadyClaimed);
                        load_state.set(LoadState::AlreadyClaimed(option_name));
                    }
                    Ok(OpenOutcome::Ready(opened)) => {
                        options.set(opened.options().to_vec());
                        phase.set(opened.phase());
                        *session.borrow_mut() = Some(Rc::new(opened));
                        load_state.set(LoadState::Ready);
                    }
                    Err(RouletteError::Closed) => {}
                    Err(e) => {
                        phase.set(RoulettePhase::Idle);
                        load_state.set(LoadState::Failed(e.to_string()));
                    }
                }
            });

            move || closer.close()
        });
    }

    let on_spin = {
        let phase = phase.clone();
        let rotation = rotation.clone();
        let highlight = highlight.clone();
        let claim_result = claim_result.clone();
        let session = session.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(session) = session.borrow().clone() else {
                return;
            };
            if !session.can_spin() {
                return;
            }

            claim_result.set(None);
            highlight.set(None);
            phase.set(RoulettePhase::Spinning);

            let phase = phase.clone();
            let rotation = rotation.clone();
            let highlight = highlight.clone();
            let claim_result = claim_result.clone();

            spawn_local(async move {
                let mut clock = AnimationFrameClock::default();
                let outcome = session
                    .spin(&mut clock, |event| match event {
                        SpinEvent::Frame { angle } => rotation.set(angle),
                        SpinEvent::Landed { winner_index, .. } => {
                            highlight.set(Some(winner_index));
                            phase.set(RoulettePhase::Claiming);
                        }
                    })
                    .await;

                match outcome {
                    SpinOutcome::Ignored | SpinOutcome::Cancelled => {}
                    SpinOutcome::Claimed { result, .. } | SpinOutcome::ClaimFailed { result, .. } => {
                        claim_result.set(Some(result));
                        phase.set(session.phase());
                    }
                }
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match &*load_state {
        LoadState::Checking => html! {
            <div class="flex flex-col items-center justify-center py-16">
                <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                    <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                    <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                </svg>
                <span class={classes!(styles::TEXT_SMALL, "mt-3")}>{"Checking your rewards..."}</span>
            </div>
        },
        LoadState::AlreadyClaimed(option_name) => html! {
            <div class={styles::CARD_SUCCESS}>
                <p class="font-semibold">{"You already received a reward for this mission set."}</p>
                <p class="mt-1">{option_name.clone()}</p>
            </div>
        },
        LoadState::Failed(message) => html! {
            <div class={styles::CARD_ERROR}>{message.clone()}</div>
        },
        LoadState::Ready => html! {
            <>
                <div class="relative mx-auto mb-8 flex justify-center items-center">
                    <div class="w-full max-w-[450px] mx-auto">
                        <WheelCanvas
                            options={(*options).clone()}
                            rotation={*rotation}
                            is_spinning={*phase == RoulettePhase::Spinning}
                            highlight={*highlight}
                        />
                    </div>
                </div>
                <div class="flex justify-center mt-4">
                    <div class="w-full max-w-[300px]">
                        <SpinButton phase={*phase} onclick={on_spin} />
                    </div>
                </div>
                <ResultDisplay result={(*claim_result).clone()} />
            </>
        },
    };

    html! {
        <div class={styles::MODAL_BACKDROP}>
            <div class={styles::MODAL_PANEL} role="dialog" aria-modal="true">
                <button class={styles::MODAL_CLOSE} onclick={on_close} aria-label="Close">
                    <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" viewBox="0 0 20 20" fill="currentColor">
                        <path fill-rule="evenodd" d="M4.293 4.293a1 1 0 011.414 0L10 8.586l4.293-4.293a1 1 0 111.414 1.414L11.414 10l4.293 4.293a1 1 0 01-1.414 1.414L10 11.414l-4.293 4.293a1 1 0 01-1.414-1.414L8.586 10 4.293 5.707a1 1 0 010-1.414z" clip-rule="evenodd" />
                    </svg>
                </button>
                <h2 class={styles::ROULETTE_TITLE}>{"Reward Roulette"}</h2>
                {body}
            </div>
        </div>
    }
}
