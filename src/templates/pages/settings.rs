use crate::domain::Settings;
use crate::market::MarketSettings;
use crate::templates::components::notice;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn settings_page(settings: &Settings, market: &MarketSettings, message: Option<&str>) -> Markup {
    desktop_layout(
        "Settings",
        "/settings",
        html! {
            h1 { "Settings" }
            (notice(message))

            section class="card" {
                form class="grid" method="post" action="/settings" id="settingsForm" {
                    label { "Target zips " input name="zips" value=(settings.zips); }
                    label { "Percent of ARV " input name="percent" type="number" step="0.01" min="0" max="1" value=(settings.percent); }
                    label { "Assignment fee " input name="fee" type="number" step="any" value=(settings.fee); }
                    label { "Offers per week " input name="offers" type="number" value=(settings.offers); }
                    label { "Company " input name="company" value=(settings.company); }
                    label { "Sender name " input name="sender" value=(settings.sender); }
                    label { "Reply email " input name="replyEmail" type="email" value=(settings.reply_email); }
                    label { "Phone " input name="phone" value=(settings.phone); }
                    label {
                        input name="zipFilter" type="checkbox" value="on" checked[settings.zip_filter];
                        " Only BCC buyers whose zips match the lead"
                    }
                    button type="submit" { "Save settings" }
                }
            }

            section class="card" {
                h3 { "Market Intel" }
                form class="grid" method="post" action="/market/settings" {
                    label { "API URL " input name="apiUrl" value=(market.api_url); }
                    label { "Token " input name="token" type="password" value=(market.token); }
                    label {
                        input name="evidence" type="checkbox" value="on" checked[market.evidence_mode];
                        " Evidence mode"
                    }
                    button type="submit" { "Save Market Intel settings" }
                }
            }

            section class="card" {
                h3 { "Danger zone" }
                form method="post" action="/settings/reset" {
                    label {
                        input name="confirm" type="checkbox" value="yes" required;
                        " Delete all local data (leads, buyers, tasks, settings)"
                    }
                    " "
                    button type="submit" { "Reset everything" }
                }
            }
        },
    )
}
