use crate::models::AdoptionRecord;
use crate::utils::{escape_xml, format_local};
use chrono::TimeZone;
use std::fmt::Display;

pub const SHEET_HEADERS: [&str; 9] = [
    "ID",
    "Nome",
    "E-mail",
    "Telefone",
    "Endereço",
    "Interesse",
    "Tem animais",
    "Mensagem",
    "Criado Em",
];

pub const DEFAULT_SHEET_NAME: &str = "Cadastros";

fn string_cell(out: &mut String, value: &str) {
    out.push_str(&format!(
        r#"<Cell><Data ss:Type="String">{}</Data></Cell>"#,
        escape_xml(value)
    ));
}

/// Single-sheet Excel 2003 XML workbook. `id` is a Number cell, the rest
/// are String cells; `criadoEm` is shown as local time in `tz`.
pub fn build_excel_xml<Tz>(records: &[AdoptionRecord], sheet_name: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut header_row = String::from("<Row>");
    for h in SHEET_HEADERS {
        string_cell(&mut header_row, h);
    }
    header_row.push_str("</Row>");

    let mut rows = Vec::with_capacity(records.len());
    for r in records {
        let mut row = String::from("<Row>\n      ");
        row.push_str(&format!(
            r#"<Cell><Data ss:Type="Number">{}</Data></Cell>"#,
            r.id
        ));
        for value in [
            r.nome.as_str(),
            r.email.as_str(),
            r.telefone.as_str(),
            r.endereco.as_str(),
            r.animal_interesse.as_str(),
            r.tem_animais.as_str(),
            r.mensagem.as_str(),
        ] {
            row.push_str("\n      ");
            string_cell(&mut row, value);
        }
        row.push_str("\n      ");
        string_cell(&mut row, &format_local(&r.criado_em, tz));
        row.push_str("\n    </Row>");
        rows.push(row);
    }

    format!(
        r#"<?xml version="1.0"?>
<?mso-application progid="Excel.Sheet"?>
<Workbook xmlns="urn:schemas-microsoft-com:office:spreadsheet"
    xmlns:o="urn:schemas-microsoft-com:office:office"
    xmlns:x="urn:schemas-microsoft-com:office:excel"
    xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
  <Worksheet ss:Name="{sheet}">
    <Table>
      {header_row}
      {rows}
    </Table>
  </Worksheet>
</Workbook>"#,
        sheet = escape_xml(sheet_name),
        rows = rows.join("\n"),
    )
}
