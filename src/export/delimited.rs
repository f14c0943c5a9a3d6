use crate::error::Result;
use crate::models::AdoptionRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADERS: [&str; 9] = [
    "id",
    "nome",
    "email",
    "telefone",
    "endereco",
    "animalInteresse",
    "temAnimais",
    "mensagem",
    "criadoEm",
];

/// Bare header line, then one fully quoted row per record. Rows end in
/// CRLF, including the last one.
pub fn to_csv(records: &[AdoptionRecord]) -> Result<String> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    header.write_record(CSV_HEADERS)?;
    let buf = header.into_inner().map_err(|e| e.into_error())?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(buf);
    for r in records {
        rows.write_record([
            r.id.to_string().as_str(),
            r.nome.as_str(),
            r.email.as_str(),
            r.telefone.as_str(),
            r.endereco.as_str(),
            r.animal_interesse.as_str(),
            r.tem_animais.as_str(),
            r.mensagem.as_str(),
            r.criado_em.as_str(),
        ])?;
    }
    let buf = rows.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
