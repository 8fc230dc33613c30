//! 通知表示

use leptos::prelude::*;
use lumiere_common::{Toast, ToastKind};

#[component]
pub fn ToastStack(toasts: Signal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id.clone()
                children=move |toast| {
                    view! {
                        <div class=toast_class(toast.kind)>
                            <span class="toast-icon">{toast_icon(toast.kind)}</span>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

fn toast_class(kind: ToastKind) -> String {
    format!("toast toast-{}", kind.as_str())
}

fn toast_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✓",
        ToastKind::Info => "i",
        ToastKind::Error => "!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_class_per_kind() {
        assert_eq!(toast_class(ToastKind::Success), "toast toast-success");
        assert_eq!(toast_class(ToastKind::Info), "toast toast-info");
        assert_eq!(toast_class(ToastKind::Error), "toast toast-error");
    }
}
