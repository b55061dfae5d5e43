use std::time::Duration;

use crate::auth::use_session;
use crate::session::ToastLevel;
use leptos::prelude::*;

/// 自动消失的调度记录
///
/// 每条提示拿到一个序号，只有最新一条的定时器可以关闭提示，
/// 较早的定时器到期时不会误关后来的提示。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DismissSchedule {
    latest: u64,
}

impl DismissSchedule {
    fn schedule(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

/// 提示消息容器，消息在 `duration` 后自动消失
#[component]
pub fn ToastHost(duration: Duration) -> impl IntoView {
    let session = use_session();
    let toast = session.toast;
    let schedule = StoredValue::new(DismissSchedule::default());

    Effect::new(move |_| {
        if toast.with(|t| t.is_some()) {
            let ticket = schedule
                .try_update_value(|s| s.schedule())
                .unwrap_or_default();
            set_timeout(
                move || {
                    if schedule.with_value(|s| s.is_current(ticket)) {
                        session.dismiss_toast();
                    }
                },
                duration,
            );
        }
    });

    view! {
        <Show when=move || toast.with(|t| t.is_some())>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    match toast.with(|t| t.as_ref().map(|t| t.level)) {
                        Some(ToastLevel::Error) => "alert alert-error shadow-lg",
                        Some(ToastLevel::Success) => "alert alert-success shadow-lg",
                        _ => "alert alert-info shadow-lg",
                    }
                }>
                    <span>{move || toast.with(|t| t.as_ref().map(|t| t.message.clone()).unwrap_or_default())}</span>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_timer_does_not_dismiss_newer_toast() {
        let mut schedule = DismissSchedule::default();
        let signed_out = schedule.schedule();
        let error = schedule.schedule();

        assert!(!schedule.is_current(signed_out));
        assert!(schedule.is_current(error));
    }

    #[test]
    fn single_toast_is_dismissed_by_its_timer() {
        let mut schedule = DismissSchedule::default();
        let ticket = schedule.schedule();
        assert!(schedule.is_current(ticket));
    }
}
