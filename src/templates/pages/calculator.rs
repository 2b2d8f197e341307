use crate::domain::money;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct CalculatorVm {
    pub arv: Option<f64>,
    pub repairs: Option<f64>,
    pub percent: f64,
    pub fee: f64,
    /// Present once the form has been submitted.
    pub mao: Option<f64>,
}

fn field(n: Option<f64>) -> String {
    n.map(|v| v.to_string()).unwrap_or_default()
}

pub fn calculator_page(vm: &CalculatorVm) -> Markup {
    desktop_layout(
        "Calculator",
        "/calculator",
        html! {
            h1 { "MAO calculator" }
            section class="card" {
                form class="grid" method="get" action="/calculator" id="calcForm" {
                    label { "ARV " input name="arv" type="number" step="any" value=(field(vm.arv)); }
                    label { "Repairs " input name="repairs" type="number" step="any" value=(field(vm.repairs)); }
                    label { "Percent " input name="percent" type="number" step="0.01" value=(vm.percent); }
                    label { "Fee " input name="fee" type="number" step="any" value=(vm.fee); }
                    button type="submit" { "Calculate" }
                }
                @if let Some(mao) = vm.mao {
                    p id="calcOut" { strong { "MAO: " (money(mao)) } }
                }
            }
        },
    )
}
