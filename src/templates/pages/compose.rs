use crate::compose::ComposedMessage;
use crate::domain::{Buyer, Lead};
use crate::templates::components::card;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ComposeVm<'a> {
    pub leads: Vec<&'a Lead>,
    pub selected: Option<&'a Lead>,
    pub message: Option<ComposedMessage>,
    pub mailto: String,
    pub sms: String,
    pub buyers: Vec<&'a Buyer>,
}

pub fn compose_page(vm: &ComposeVm) -> Markup {
    desktop_layout(
        "Compose",
        "/compose",
        html! {
            h1 { "Compose" }

            section class="card" {
                form method="get" action="/compose" {
                    select name="id" {
                        option value="" disabled selected[vm.selected.is_none()] { "Select a lead..." }
                        @for lead in &vm.leads {
                            option value=(lead.id) selected[vm.selected.map(|s| s.id == lead.id).unwrap_or(false)] {
                                (lead.address) " " (lead.zip)
                            }
                        }
                    }
                    " "
                    button type="submit" { "Preview" }
                }
            }

            @if let Some(msg) = &vm.message {
                (card("Email", html! {
                    p { strong { "Subject: " } span id="modalSubject" { (msg.subject) } }
                    pre id="modalEMAIL" { (msg.body) }
                    p {
                        a href=(vm.mailto) { "Open in mail app" }
                    }
                    details {
                        summary { "Copy text" }
                        pre id="copyEmail" { (msg.clipboard_email()) }
                    }
                }))

                (card("SMS", html! {
                    pre id="modalSMS" { (msg.sms) }
                    a href=(vm.sms) { "Open in messages" }
                }))

                (card("Buyers (BCC)", html! {
                    @if vm.buyers.is_empty() {
                        p { "No matching buyers with an email." }
                    } @else {
                        ul {
                            @for b in &vm.buyers {
                                li { (b.name) " <" (b.email) ">" }
                            }
                        }
                    }
                }))
            }
        },
    )
}
