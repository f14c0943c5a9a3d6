use crate::models::{AdoptionRecord, SupportRecord};
use crate::utils::{escape_html, format_local};
use chrono::TimeZone;
use std::fmt::Display;

const EMPTY_ADOPTIONS: &str = r#"<p class="muted">Nenhum cadastro ainda.</p>"#;
const EMPTY_SUPPORT: &str = r#"<p class="muted">Nenhuma mensagem ainda.</p>"#;

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

/// HTML list of adoption records in stored order. Every user-supplied
/// value goes through [`escape_html`].
pub fn render_records<Tz>(records: &[AdoptionRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return EMPTY_ADOPTIONS.to_string();
    }
    let mut html = String::new();
    for r in records {
        html.push_str(&format!(
            r#"
    <div class="record">
      <strong>{nome}</strong>
      <small class="muted">{criado}</small>
      <div>📧 {email} • 📞 {telefone}</div>
      <div>Interesse: {interesse} • Tem animais: {tem_animais}</div>
      <div class="muted">{endereco}</div>
      {mensagem}
    </div>
  "#,
            nome = escape_html(&r.nome),
            criado = escape_html(&format_local(&r.criado_em, tz)),
            email = escape_html(&r.email),
            telefone = escape_html(or_dash(&r.telefone)),
            interesse = escape_html(&r.animal_interesse),
            tem_animais = escape_html(&r.tem_animais),
            endereco = escape_html(&r.endereco),
            mensagem = message_block(&r.mensagem),
        ));
    }
    html
}

/// Same layout for support messages.
pub fn render_support<Tz>(records: &[SupportRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return EMPTY_SUPPORT.to_string();
    }
    let mut html = String::new();
    for r in records {
        html.push_str(&format!(
            r#"
    <div class="record">
      <strong>{nome}</strong>
      <small class="muted">{criado}</small>
      <div>📧 {email}</div>
      <div>Assunto: {assunto}</div>
      {mensagem}
    </div>
  "#,
            nome = escape_html(&r.nome),
            criado = escape_html(&format_local(&r.criado_em, tz)),
            email = escape_html(&r.email),
            assunto = escape_html(or_dash(&r.assunto)),
            mensagem = message_block(&r.mensagem),
        ));
    }
    html
}

fn message_block(mensagem: &str) -> String {
    if mensagem.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="margin-top:6px">{}</div>"#,
            escape_html(mensagem)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ana() -> AdoptionRecord {
        AdoptionRecord {
            id: 1,
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            animal_interesse: "Gato".into(),
            tem_animais: "Sim".into(),
            criado_em: "2025-10-18T12:00:00.000Z".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        assert_eq!(render_records(&[], &Utc), EMPTY_ADOPTIONS);
        assert_eq!(render_support(&[], &Utc), EMPTY_SUPPORT);
    }

    #[test]
    fn record_shows_fields_and_phone_dash() {
        let html = render_records(&[ana()], &Utc);
        assert!(html.contains("<strong>Ana</strong>"));
        assert!(html.contains("18/10/2025, 12:00:00"));
        assert!(html.contains("📞 —"));
        assert!(html.contains("Interesse: Gato • Tem animais: Sim"));
        assert!(!html.contains("margin-top"));
    }

    #[test]
    fn message_only_when_present() {
        let rec = AdoptionRecord {
            mensagem: "Adoro gatos".into(),
            telefone: "11 9999".into(),
            ..ana()
        };
        let html = render_records(&[rec], &Utc);
        assert!(html.contains(r#"<div style="margin-top:6px">Adoro gatos</div>"#));
        assert!(html.contains("📞 11 9999"));
    }

    #[test]
    fn stored_text_is_escaped() {
        let rec = AdoptionRecord {
            nome: "<b>Ana</b>".into(),
            mensagem: r#"<script>&'""#.into(),
            ..ana()
        };
        let html = render_records(&[rec], &Utc);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        assert!(html.contains("&lt;script&gt;&amp;'&quot;"));
    }

    #[test]
    fn records_keep_stored_order() {
        let newer = AdoptionRecord {
            id: 2,
            nome: "Bia".into(),
            ..ana()
        };
        let html = render_records(&[newer, ana()], &Utc);
        let bia = html.find("Bia").unwrap();
        let ana = html.find("Ana").unwrap();
        assert!(bia < ana);
    }

    #[test]
    fn support_record_shows_subject() {
        let rec = SupportRecord {
            id: 1,
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            assunto: "Doação & voluntariado".into(),
            mensagem: "Olá".into(),
            criado_em: "2025-10-18T12:00:00.000Z".into(),
        };
        let html = render_support(&[rec], &Utc);
        assert!(html.contains("Assunto: Doação &amp; voluntariado"));
        assert!(html.contains("Olá"));
    }
}
