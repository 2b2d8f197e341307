// src/export/xlsx.rs
use crate::domain::{Lead, Settings};
use crate::errors::ServerError;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const HEADERS: [&str; 11] = [
    "Address", "City", "Zip", "List", "ARV", "Repairs", "MAO", "Offer", "Status", "Agent", "Stage",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

fn write_text(ws: &mut Worksheet, row: u32, col: u16, value: &str, what: &str) -> Result<(), ServerError> {
    ws.write_string(row, col, value).map_err(xlsx_err(what))?;
    Ok(())
}

fn write_money(ws: &mut Worksheet, row: u32, col: u16, value: f64, fmt: &Format, what: &str) -> Result<(), ServerError> {
    ws.write_number_with_format(row, col, value, fmt)
        .map_err(xlsx_err(what))?;
    Ok(())
}

/// Build the leads workbook. MAO is computed from the current settings at
/// export time.
pub fn leads_workbook(leads: &[&Lead], settings: &Settings) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Leads").map_err(xlsx_err("sheet name"))?;

    let bold = Format::new().set_bold();
    let dollars = Format::new().set_num_format("$#,##0");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write header '{header}': {e}")))?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;
        write_text(worksheet, r, 0, &lead.address, "address")?;
        write_text(worksheet, r, 1, &lead.city, "city")?;
        write_text(worksheet, r, 2, &lead.zip, "zip")?;
        write_money(worksheet, r, 3, lead.list, &dollars, "list price")?;
        write_money(worksheet, r, 4, lead.arv, &dollars, "ARV")?;
        write_money(worksheet, r, 5, lead.repairs, &dollars, "repairs")?;
        write_money(worksheet, r, 6, lead.mao(settings).round(), &dollars, "MAO")?;
        write_money(worksheet, r, 7, lead.offer, &dollars, "offer")?;
        write_text(worksheet, r, 8, &lead.status, "status")?;
        write_text(worksheet, r, 9, &lead.agent, "agent")?;
        let stage = lead.stage.map(|s| s.as_str()).unwrap_or("");
        write_text(worksheet, r, 10, stage, "stage")?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}
