use maud::{html, Markup};

pub mod error;

pub use error::html_error_response;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            (body)
        }
    }
}

/// One-line banner carried across a redirect in the `notice` query field.
pub fn notice(message: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = message.filter(|m| !m.is_empty()) {
            div class="notice" role="status" { (msg) }
        }
    }
}

pub fn error_notice(message: &str) -> Markup {
    html! {
        div class="notice error" role="alert" { (message) }
    }
}

/// A POST button carrying hidden fields.
pub fn action_button(action: &str, label: &str, fields: &[(&str, &str)]) -> Markup {
    html! {
        form class="inline" method="post" action=(action) {
            @for (name, value) in fields {
                input type="hidden" name=(name) value=(value);
            }
            button type="submit" { (label) }
        }
    }
}
