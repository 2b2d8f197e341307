use crate::domain::{money, Lead, Settings};
use crate::templates::components::{action_button, notice};
use crate::templates::desktop_layout;
use crate::workflow::{checklist_for, in_pipeline, propose_transition, status_label, Stage, WorkflowConfig};
use maud::{html, Markup};

pub struct PipelineVm<'a> {
    pub config: &'a WorkflowConfig,
    pub settings: &'a Settings,
    pub leads: Vec<&'a Lead>,
    pub notice: Option<String>,
}

fn deal_card(config: &WorkflowConfig, settings: &Settings, deal: &Lead, stage: Stage) -> Markup {
    let proposal = propose_transition(config, stage, &deal.checklist);
    let has_next = config.flow(stage).and_then(|f| f.next_stage).is_some();

    html! {
        div class="card deal" id=(format!("deal-{}", deal.id)) {
            h4 { (deal.address) " " (deal.zip) }
            p { "Offer " (money(deal.offer)) " · MAO " (money(deal.mao(settings))) }
            p class="gate" { (status_label(config, stage, &deal.checklist)) }

            @for item in checklist_for(config, stage) {
                @let checked = deal.checklist.get(&item.id).copied().unwrap_or(false);
                form method="post" action="/pipeline/checklist" {
                    input type="hidden" name="id" value=(deal.id);
                    input type="hidden" name="item" value=(item.id);
                    input type="hidden" name="checked" value=(if checked { "0" } else { "1" });
                    button type="submit" class="check" {
                        (if checked { "☑ " } else { "☐ " }) (item.label)
                    }
                }
            }

            @if proposal.ready {
                p class="next" { (proposal.prompt_text) }
                (action_button("/pipeline/advance", "Advance", &[("id", deal.id.as_str())]))
            } @else if has_next {
                (action_button("/pipeline/advance", "Force advance", &[("id", deal.id.as_str()), ("force", "1")]))
            }
        }
    }
}

pub fn pipeline_page(vm: &PipelineVm) -> Markup {
    // Includes deals whose stage the loaded workflow does not list.
    let unstaged: Vec<&&Lead> = vm.leads.iter().filter(|l| !in_pipeline(vm.config, l)).collect();

    desktop_layout(
        "Pipeline",
        "/pipeline",
        html! {
            h1 { "Pipeline" }
            (notice(vm.notice.as_deref()))

            div class="board" {
                @for &stage in vm.config.stages() {
                    section class="column" {
                        h3 { (stage.as_str()) }
                        @for deal in vm.leads.iter().filter(|l| l.stage == Some(stage)) {
                            (deal_card(vm.config, vm.settings, deal, stage))
                        }
                    }
                }
            }

            @if !unstaged.is_empty() {
                section class="card" {
                    h3 { "Not in pipeline" }
                    ul {
                        @for deal in unstaged {
                            li {
                                (deal.address) " " (deal.zip) " "
                                (action_button("/pipeline/start", "Start", &[("id", deal.id.as_str())]))
                            }
                        }
                    }
                }
            }
        },
    )
}
