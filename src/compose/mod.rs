// src/compose/mod.rs
//
// Outreach text for a lead: email subject/body, SMS body, and the
// `mailto:` / `sms:` links handed to the browser. Pure string building.

use crate::domain::{money, Buyer, Lead, Settings};
use urlencoding::encode;

const CLOSE_TERMS: &str = "Close: ≤10 days | As-Is | Cash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub subject: String,
    pub body: String,
    pub sms: String,
    /// Buyer emails for the blind-copy line.
    pub bcc: Vec<String>,
}

impl ComposedMessage {
    pub fn for_lead(lead: &Lead, settings: &Settings, buyers: &[Buyer]) -> Self {
        Self {
            subject: email_subject(lead, settings),
            body: email_body(lead, settings),
            sms: sms_body(lead, settings),
            bcc: matching_buyer_emails(lead, settings, buyers),
        }
    }

    pub fn mailto_url(&self, settings: &Settings) -> String {
        mailto_url(&settings.reply_email, &self.subject, &self.body, &self.bcc)
    }

    pub fn sms_url(&self) -> String {
        sms_url(&self.sms)
    }

    /// Plain text for the clipboard.
    pub fn clipboard_email(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

fn signature(settings: &Settings) -> String {
    if settings.sender.is_empty() {
        settings.company.clone()
    } else {
        format!("{} | {}", settings.company, settings.sender)
    }
}

pub fn email_subject(lead: &Lead, settings: &Settings) -> String {
    format!(
        "{} — {} {} — ARV {} | Ask {}",
        settings.company,
        lead.address,
        lead.zip,
        money(lead.arv),
        money(lead.offer)
    )
}

pub fn email_body(lead: &Lead, settings: &Settings) -> String {
    let mao = lead.mao(settings);
    let mut lines: Vec<String> = Vec::new();

    let city = if lead.city.is_empty() {
        String::new()
    } else {
        format!(", {}", lead.city)
    };
    lines.push(format!("{}{} {}", lead.address, city, lead.zip));
    lines.push(String::new());
    lines.push(format!("ARV: {}", money(lead.arv)));
    lines.push(format!("Repairs: {}", money(lead.repairs)));
    lines.push(format!(
        "MAO (est.): {} @ {}% - fee",
        money(mao),
        settings.percent_label()
    ));
    lines.push(format!("Your Price (assign): {}", money(lead.offer)));
    if !lead.notes.is_empty() {
        lines.push(String::new());
        lines.push(format!("Notes: {}", lead.notes));
    }
    lines.push(String::new());
    lines.push(CLOSE_TERMS.to_string());

    let agent_phone = if lead.phone.is_empty() {
        String::new()
    } else {
        format!(" ({})", lead.phone)
    };
    lines.push(format!("Access: contact agent {}{}", lead.agent, agent_phone));

    if !lead.photos.is_empty() {
        lines.push(String::new());
        lines.push(format!("Photos: {}", lead.photos));
    }
    if !lead.comps.is_empty() {
        lines.push(format!("Comps: {}", lead.comps));
    }

    lines.push(String::new());
    lines.push("—".to_string());
    lines.push(signature(settings));
    if !settings.phone.is_empty() {
        lines.push(settings.phone.clone());
    }
    if !settings.reply_email.is_empty() {
        lines.push(settings.reply_email.clone());
    }

    lines.join("\n")
}

pub fn sms_body(lead: &Lead, settings: &Settings) -> String {
    let mao = lead.mao(settings);
    let mut lines = vec![
        format!("{} {}", lead.address, lead.zip),
        format!("ARV {} | Repairs {}", money(lead.arv), money(lead.repairs)),
        format!("Ask {} | MAO est. {}", money(lead.offer), money(mao)),
    ];
    if !lead.photos.is_empty() {
        lines.push(format!("Photos: {}", lead.photos));
    }
    if !lead.comps.is_empty() {
        lines.push(format!("Comps: {}", lead.comps));
    }
    lines.push(format!("As-Is | ≤10d close | Agent {} {}", lead.agent, lead.phone));

    let mut sig = signature(settings);
    if !settings.phone.is_empty() {
        sig.push_str(" | ");
        sig.push_str(&settings.phone);
    }
    lines.push(sig);

    lines.join("\n")
}

/// Buyers to blind-copy. With the zip filter on, only buyers whose zip list
/// has the lead's zip as a token; with it off, every buyer with an email.
pub fn matching_buyers<'a>(lead: &Lead, settings: &Settings, buyers: &'a [Buyer]) -> Vec<&'a Buyer> {
    buyers
        .iter()
        .filter(|b| !b.email.trim().is_empty())
        .filter(|b| !settings.zip_filter || b.wants_zip(&lead.zip))
        .collect()
}

pub fn matching_buyer_emails(lead: &Lead, settings: &Settings, buyers: &[Buyer]) -> Vec<String> {
    matching_buyers(lead, settings, buyers)
        .into_iter()
        .map(|b| b.email.trim().to_string())
        .collect()
}

pub fn mailto_url(to: &str, subject: &str, body: &str, bcc: &[String]) -> String {
    let mut url = format!(
        "mailto:{}?subject={}&body={}",
        encode(to),
        encode(subject),
        encode(body)
    );
    if !bcc.is_empty() {
        url.push_str("&bcc=");
        url.push_str(&encode(&bcc.join(",")));
    }
    url
}

pub fn sms_url(body: &str) -> String {
    format!("sms:?&body={}", encode(body))
}
