use crate::domain::{money, Lead, Settings, LEAD_STATUSES};
use crate::templates::components::{action_button, notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct LeadsVm<'a> {
    pub leads: Vec<&'a Lead>,
    pub settings: &'a Settings,
    pub filter: String,
    /// Lead loaded into the form, if editing.
    pub editing: Option<&'a Lead>,
    pub notice: Option<String>,
}

fn number_value(n: f64) -> String {
    if n == 0.0 {
        String::new()
    } else {
        n.to_string()
    }
}

pub fn lead_form(editing: Option<&Lead>) -> Markup {
    let blank = Lead::default();
    let lead = editing.unwrap_or(&blank);
    html! {
        form class="grid" method="post" action="/leads" id="leadForm" {
            input type="hidden" name="id" value=(lead.id);
            input name="address" placeholder="Address" value=(lead.address) required;
            input name="city" placeholder="City" value=(lead.city);
            input name="zip" placeholder="Zip" value=(lead.zip);
            input name="list" type="number" step="any" placeholder="List price" value=(number_value(lead.list));
            input name="arv" type="number" step="any" placeholder="ARV" value=(number_value(lead.arv));
            input name="repairs" type="number" step="any" placeholder="Repairs" value=(number_value(lead.repairs));
            input name="offer" type="number" step="any" placeholder="Your offer" value=(number_value(lead.offer));
            input name="agent" placeholder="Agent" value=(lead.agent);
            input name="phone" placeholder="Agent phone" value=(lead.phone);
            input name="photos" placeholder="Photos link" value=(lead.photos);
            input name="comps" placeholder="Comps link" value=(lead.comps);
            select name="status" {
                @for status in LEAD_STATUSES {
                    option value=(status) selected[lead.status == status] { (status) }
                }
            }
            textarea name="notes" placeholder="Notes" { (lead.notes) }
            button type="submit" { @if editing.is_some() { "Update lead" } @else { "Save lead" } }
            @if editing.is_some() {
                a href="/leads" { "Cancel" }
            }
        }
    }
}

pub fn leads_table(leads: &[&Lead], settings: &Settings) -> Markup {
    html! {
        table id="leadsTable" {
            thead {
                tr {
                    th { "Address" } th { "Zip" } th { "ARV" } th { "Repairs" }
                    th { "MAO" } th { "Offer" } th { "Status" } th { "Agent" } th {}
                }
            }
            tbody {
                @for lead in leads {
                    tr {
                        td { (lead.address) @if !lead.city.is_empty() { ", " (lead.city) } }
                        td { (lead.zip) }
                        td { (money(lead.arv)) }
                        td { (money(lead.repairs)) }
                        td { (money(lead.mao(settings))) }
                        td { (money(lead.offer)) }
                        td { (lead.status) }
                        td { (lead.agent) }
                        td {
                            a href=(format!("/leads?edit={}", urlencoding::encode(&lead.id))) { "Edit" }
                            " "
                            a href=(format!("/compose?id={}", urlencoding::encode(&lead.id))) { "Preview" }
                            " "
                            (action_button("/leads/delete", "Delete", &[("id", lead.id.as_str())]))
                        }
                    }
                }
            }
        }
    }
}

pub fn leads_page(vm: &LeadsVm) -> Markup {
    desktop_layout(
        "Leads",
        "/leads",
        html! {
            h1 { "Leads" }
            (notice(vm.notice.as_deref()))

            section class="card" {
                h3 { @if vm.editing.is_some() { "Edit lead" } @else { "New lead" } }
                (lead_form(vm.editing))
            }

            section class="card" {
                form method="get" action="/leads" {
                    input type="search" name="q" placeholder="Filter leads" value=(vm.filter);
                    button type="submit" { "Filter" }
                    " "
                    a href="/leads/export.csv" { "Export CSV" }
                    " "
                    a href="/leads/export.xlsx" { "Export XLSX" }
                }
                @if vm.leads.is_empty() {
                    p { "No leads yet." }
                } @else {
                    (leads_table(&vm.leads, vm.settings))
                }
            }
        },
    )
}
