use yew::prelude::*;
use web_sys::window;
use shared::roulette_session::RoulettePhase;
use shared::shared_roulette::ClaimResult;

const MAX_LABEL_CHARS: usize = 14;

// Get auth token from storage
pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item("token").ok().flatten()))
}

/// Shortens an option name so it fits inside its slice.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        name.to_string()
    } else {
        let mut label: String = name.chars().take(MAX_LABEL_CHARS - 1).collect();
        label.push('…');
        label
    }
}

pub fn spin_button_text(phase: RoulettePhase) -> &'static str {
    match phase {
        RoulettePhase::Spinning => "Spinning...",
        RoulettePhase::Claiming => "Claiming...",
        RoulettePhase::Claimed => "Reward claimed",
        _ => "Spin",
    }
}

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<ClaimResult>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(result) = &props.result else {
        return html! {};
    };

    let (message, gradient_classes, animation_class) = match result {
        ClaimResult::Claimed { option_name, .. } => (
            format!("You won {}!", option_name),
            "from-orange-400 to-orange-600 border-orange-300",
            "animate-bounce",
        ),
        ClaimResult::Failed { error } => (
            error.clone(),
            "from-red-400 to-red-600 border-red-300",
            "",
        ),
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class={classes!(
                "flex",
                "items-center",
                "justify-center",
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "text-white",
                "font-bold",
                "text-xl",
                "shadow-lg",
                "border-2",
                "transition-all",
                "duration-500",
                animation_class,
                gradient_classes
            )}>
                <span>{message}</span>
            </div>
            if matches!(result, ClaimResult::Failed { .. }) {
                <div class="text-sm text-gray-600 dark:text-gray-400 mt-3 bg-gray-100 dark:bg-gray-800 px-4 py-2 rounded-full">
                    {"You can spin again."}
                </div>
            }
        </div>
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub phase: RoulettePhase,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let is_busy = matches!(props.phase, RoulettePhase::Spinning | RoulettePhase::Claiming);
    let is_disabled = props.phase != RoulettePhase::OptionsLoaded;

    let button_class = if props.phase == RoulettePhase::Claimed {
        "bg-gradient-to-r from-green-400 to-green-500 opacity-90 cursor-not-allowed text-white"
    } else if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let animation_class = if !is_disabled { "animate-pulse-subtle" } else { "" };

    let spin_icon_class = if is_busy {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class="relative">
            <div class={classes!(
                "relative",
                "overflow-hidden",
                "rounded-full",
                "w-full",
                button_class,
                animation_class
            )}>
                <button
                    onclick={props.onclick.clone()}
                    disabled={is_disabled}
                    class={classes!(
                        "relative",
                        "w-full",
                        "px-8",
                        "py-4",
                        "font-bold",
                        "text-lg",
                        "transition-all",
                        "duration-300",
                        "border-2",
                        "border-transparent",
                        "hover:border-white",
                        "focus:outline-none",
                        "focus:ring-4",
                        "focus:ring-yellow-300",
                        "bg-transparent",
                    )}
                >
                    <div class="flex items-center justify-center relative z-10">
                        <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                            <circle cx="12" cy="12" r="10" />
                            <path d="M12 6v6l4 2" />
                        </svg>
                        <span>{spin_button_text(props.phase)}</span>
                    </div>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Coffee Coupon"), "Coffee Coupon");
        assert_eq!(truncate_label("Two night hotel voucher"), "Two night hot…");
        assert_eq!(truncate_label("Two night hotel voucher").chars().count(), 14);
    }

    #[test]
    fn test_spin_button_text() {
        assert_eq!(spin_button_text(RoulettePhase::OptionsLoaded), "Spin");
        assert_eq!(spin_button_text(RoulettePhase::Claiming), "Claiming...");
    }
}
