// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{Sheet, cell_text};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use serde_json::Value;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Name of the single worksheet in every exported workbook.
pub(crate) const SHEET_NAME: &str = "Data";

/// Export XLSX con styling e auto-larghezza colonne.
pub(crate) fn export_xlsx(sheet: &Sheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    // ---------------------------
    // Calcolo larghezze colonne
    // ---------------------------
    let mut col_widths: Vec<usize> = sheet
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Scrittura righe
    // ---------------------------
    for (row_index, values) in sheet.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in values.iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, value, band_color)?;

            let w = UnicodeWidthStr::width(cell_text(value).as_str());
            col_widths[col] = col_widths[col].max(w);
        }
    }

    // ---------------------------
    // Set column widths
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, (*w).min(60) as f64 + 2.0)?;
    }

    workbook.save(path)?;

    let label = if sheet.rows.is_empty() {
        "XLSX (empty dataset)"
    } else {
        "XLSX"
    };
    notify_export_success(label, path);
    Ok(())
}

fn band(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Scrive una singola cella: numeri come numeri, date come seriali Excel, resto testo.
fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    bg: Color,
) -> AppResult<()> {
    match value {
        Value::Null => {
            worksheet.write_blank(row, col, &band(bg))?;
        }
        Value::Bool(b) => {
            worksheet.write_with_format(row, col, *b, &band(bg))?;
        }
        Value::Number(n) => {
            let fmt = band(bg).set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, n.as_f64().unwrap_or_default(), &fmt)?;
        }
        Value::String(s) => {
            if let Some((num_format, serial)) = parse_to_excel_date(s) {
                let fmt = band(bg).set_num_format(num_format);
                worksheet.write_with_format(row, col, serial, &fmt)?;
            } else {
                worksheet.write_with_format(row, col, s.as_str(), &band(bg))?;
            }
        }
        other => {
            worksheet.write_with_format(row, col, other.to_string(), &band(bg))?;
        }
    }
    Ok(())
}
