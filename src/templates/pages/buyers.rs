use crate::domain::Buyer;
use crate::templates::components::{action_button, notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct BuyersVm<'a> {
    pub buyers: Vec<&'a Buyer>,
    pub filter: String,
    pub editing: Option<&'a Buyer>,
    pub notice: Option<String>,
}

pub fn buyers_page(vm: &BuyersVm) -> Markup {
    let blank = Buyer::default();
    let buyer = vm.editing.unwrap_or(&blank);

    desktop_layout(
        "Buyers",
        "/buyers",
        html! {
            h1 { "Buyers" }
            (notice(vm.notice.as_deref()))

            section class="card" {
                h3 { @if vm.editing.is_some() { "Edit buyer" } @else { "New buyer" } }
                form class="grid" method="post" action="/buyers" id="buyerForm" {
                    input type="hidden" name="id" value=(buyer.id);
                    input name="name" placeholder="Name" value=(buyer.name) required;
                    input name="email" type="email" placeholder="Email" value=(buyer.email);
                    input name="phone" placeholder="Phone" value=(buyer.phone);
                    input name="zips" placeholder="Zips (comma separated)" value=(buyer.zips);
                    input name="criteria" placeholder="Buy box" value=(buyer.criteria);
                    textarea name="notes" placeholder="Notes" { (buyer.notes) }
                    button type="submit" { "Save buyer" }
                    @if vm.editing.is_some() {
                        a href="/buyers" { "Cancel" }
                    }
                }
            }

            section class="card" {
                form method="get" action="/buyers" {
                    input type="search" name="q" placeholder="Filter buyers" value=(vm.filter);
                    button type="submit" { "Filter" }
                    " "
                    a href="/buyers/export.csv" { "Export CSV" }
                }
                @if vm.buyers.is_empty() {
                    p { "No buyers yet." }
                } @else {
                    table id="buyersTable" {
                        thead {
                            tr { th { "Name" } th { "Email" } th { "Phone" } th { "Zips" } th { "Criteria" } th {} }
                        }
                        tbody {
                            @for b in &vm.buyers {
                                tr {
                                    td { (b.name) }
                                    td { (b.email) }
                                    td { (b.phone) }
                                    td { (b.zips) }
                                    td { (b.criteria) }
                                    td {
                                        a href=(format!("/buyers?edit={}", urlencoding::encode(&b.id))) { "Edit" }
                                        " "
                                        (action_button("/buyers/delete", "Delete", &[("id", b.id.as_str())]))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
