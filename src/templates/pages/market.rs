use crate::market::{MarketScore, MarketSummary};
use crate::templates::components::{card, error_notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct MarketVm {
    pub location: String,
    pub configured: bool,
    pub recent: Vec<String>,
    pub results: Option<Vec<MarketScore>>,
    pub error: Option<String>,
}

fn metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{v}{suffix}"),
        _ => "N/A".to_string(),
    }
}

fn market_card(m: &MarketScore) -> Markup {
    let classification = if m.classification.is_empty() {
        "UNKNOWN"
    } else {
        m.classification.as_str()
    };
    html! {
        div class="card market" {
            h4 { (m.city) ", " (m.state) " " (m.zip_code) }
            p { strong { (m.score) } " " span class=(format!("tag {}", classification.to_lowercase())) { (classification) } }
            table {
                tr {
                    th { "Days on Market" } th { "Months Supply" } th { "Sale to List" } th { "Price Reductions" }
                }
                tr {
                    td { (metric(m.data.avg_days_on_market, "")) }
                    td { (metric(m.data.months_of_supply, "")) }
                    td { (metric(m.data.sale_to_list_ratio, "%")) }
                    td { (metric(m.data.price_reductions, "%")) }
                }
            }
            @if !m.insights.is_empty() {
                p { "Insights:" }
                ul { @for i in &m.insights { li { (i) } } }
            }
            @if !m.evidence.is_empty() {
                p { "Evidence:" }
                ul { @for e in &m.evidence { li { (e) } } }
            }
        }
    }
}

pub fn market_page(vm: &MarketVm) -> Markup {
    desktop_layout(
        "Market Intel",
        "/market",
        html! {
            h1 { "Market Intel" }

            @if !vm.configured {
                p { "Set the API URL and token under " a href="/settings" { "Settings" } " first." }
            }

            section class="card" {
                form method="get" action="/market" {
                    input id="locationInput" name="location" placeholder="City, state or zip" value=(vm.location);
                    " "
                    button type="submit" { "Analyze" }
                }
                div id="quickZipCodes" {
                    @if vm.recent.is_empty() {
                        p { "Recently analyzed locations will appear here" }
                    } @else {
                        @for loc in &vm.recent {
                            a class="quick-location" href=(format!("/market?location={}", urlencoding::encode(loc))) { (loc) }
                            " "
                        }
                        form class="inline" method="post" action="/market/recent/clear" {
                            button type="submit" { "Clear" }
                        }
                    }
                }
            }

            @if let Some(err) = &vm.error {
                (error_notice(&format!("Analysis Failed: {err}")))
            }

            @if let Some(results) = &vm.results {
                @match MarketSummary::of(&vm.location, results) {
                    Some(summary) => (card("Insights", html! {
                        @for line in summary.lines() { p { (line) } }
                    })),
                    None => p { "No market data found for this location." },
                }
                div id="marketResults" {
                    @for m in results { (market_card(m)) }
                }
            }
        },
    )
}
