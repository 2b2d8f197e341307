use crate::domain::tasks::{is_done, TaskBoard};
use crate::domain::DAY_TASKS;
use crate::templates::components::{card, notice};
use crate::templates::desktop_layout;
use crate::workflow::Stage;
use maud::{html, Markup};

pub struct DashboardVm<'a> {
    pub tasks: &'a TaskBoard,
    pub progress: u32,
    pub lead_count: usize,
    pub buyer_count: usize,
    pub offers_target: i64,
    pub pipeline: Vec<(Stage, usize)>,
    pub sync_enabled: bool,
    pub notice: Option<String>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        "/",
        html! {
            h1 { "Dashboard" }
            (notice(vm.notice.as_deref()))

            section class="card" {
                h3 { "This week" }
                p {
                    strong { (vm.lead_count) } " leads · "
                    strong { (vm.buyer_count) } " buyers · target "
                    strong { (vm.offers_target) } " offers"
                }
                progress max="100" value=(vm.progress) {}
                span id="progress-label" { " " (vm.progress) "% complete" }
            }

            (card("Pipeline", html! {
                ul {
                    @for (stage, n) in &vm.pipeline {
                        li { a href="/pipeline" { (stage.as_str()) } ": " strong { (n) } }
                    }
                }
            }))

            @if vm.sync_enabled {
                section class="card" {
                    h3 { "Remote deals" }
                    form method="post" action="/sync" {
                        button type="submit" { "Sync now" }
                    }
                }
            }

            section class="card" id="days" {
                h3 { "7-day plan" }
                div class="board" {
                    @for (idx, tasks) in DAY_TASKS.iter().enumerate() {
                        @let day = idx + 1;
                        div class="day" {
                            h4 { "Day " (day) }
                            @for (slot, task) in tasks.iter().enumerate() {
                                @let done = is_done(vm.tasks, day as u8, slot);
                                form method="post" action="/tasks/toggle" {
                                    input type="hidden" name="day" value=(day);
                                    input type="hidden" name="slot" value=(slot);
                                    input type="hidden" name="checked" value=(if done { "0" } else { "1" });
                                    button type="submit" class="task" {
                                        (if done { "☑ " } else { "☐ " }) (task)
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
