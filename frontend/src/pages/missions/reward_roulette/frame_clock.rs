use futures::channel::oneshot;
use gloo_render::{request_animation_frame, AnimationFrame};
use shared::roulette_session::FrameClock;

/// Frame clock backed by `requestAnimationFrame`.
///
/// Holds the pending frame request; dropping the clock cancels it.
#[derive(Default)]
pub struct AnimationFrameClock {
    pending: Option<AnimationFrame>,
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

impl FrameClock for AnimationFrameClock {
    async fn next_frame(&mut self) -> f64 {
        let (sender, receiver) = oneshot::channel();
        self.pending = Some(request_animation_frame(move |timestamp| {
            let _ = sender.send(timestamp);
        }));
        // The request only goes away if it was cancelled; fall back to the current time
        receiver.await.unwrap_or_else(|_| performance_now())
    }
}
