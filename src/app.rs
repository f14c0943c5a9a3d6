use crate::clock::Clock;
use crate::download::Downloader;
use crate::error::{Error, Result};
use crate::export::{self, ExportFormat, DEFAULT_SHEET_NAME};
use crate::intake::{self, AdoptionForm, Submitted, SupportForm};
use crate::models::{AdoptionRecord, SupportRecord};
use crate::records::RecordStore;
use crate::storage::SlotStore;
use crate::ui;
use chrono::TimeZone;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("par-cadastros.toml"))
    }

    /// Reads the settings file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Writes the settings file under the user's config dir.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config dir",
            ))
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Overrides every field given in `other`.
    pub fn merge(&mut self, other: Settings) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.download_dir.is_some() {
            self.download_dir = other.download_dir;
        }
        if other.sheet_name.is_some() {
            self.sheet_name = other.sheet_name;
        }
    }

    pub fn sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }
}

/// Everything the site does with submissions, over injected storage,
/// time and download backends.
pub struct App<S, C, D> {
    slots: S,
    clock: C,
    downloader: D,
    sheet_name: String,
}

impl<S: SlotStore, C: Clock, D: Downloader> App<S, C, D> {
    pub fn new(slots: S, clock: C, downloader: D) -> Self {
        Self {
            slots,
            clock,
            downloader,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    fn adoption_store(&self) -> RecordStore<&S, AdoptionRecord> {
        RecordStore::new(&self.slots)
    }

    fn support_store(&self) -> RecordStore<&S, SupportRecord> {
        RecordStore::new(&self.slots)
    }

    pub fn submit_adoption(&self, form: AdoptionForm) -> Result<Submitted<AdoptionRecord>> {
        intake::submit(&self.slots, &self.clock, form)
    }

    pub fn submit_support(&self, form: SupportForm) -> Result<Submitted<SupportRecord>> {
        intake::submit(&self.slots, &self.clock, form)
    }

    pub fn adoptions(&self) -> Vec<AdoptionRecord> {
        self.adoption_store().read()
    }

    pub fn support_messages(&self) -> Vec<SupportRecord> {
        self.support_store().read()
    }

    pub fn render<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        ui::render_records(&self.adoptions(), tz)
    }

    pub fn render_support<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        ui::render_support(&self.support_messages(), tz)
    }

    /// Exports every adoption record and hands the file to the downloader.
    pub fn export<Tz>(&self, format: ExportFormat, tz: &Tz) -> Result<PathBuf>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let records = self.adoption_store().read_recovering()?;
        let file = export::export(&records, format, &self.sheet_name, self.clock.now(), tz)?;
        self.downloader.save(&file)
    }

    pub fn clear_records(&self) -> Result<()> {
        self.adoption_store().clear()?;
        log::info!("adoption records cleared");
        Ok(())
    }

    pub fn clear_support(&self) -> Result<()> {
        self.support_store().clear()?;
        log::info!("support messages cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::export::Export;
    use crate::storage::{MemStore, ADOPTION_SLOT};
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NOW: i64 = 1_760_788_800_000;

    #[derive(Default)]
    struct Captured(Mutex<Vec<Export>>);

    impl Downloader for &Captured {
        fn save(&self, export: &Export) -> Result<PathBuf> {
            self.0.lock().push(export.clone());
            Ok(PathBuf::from(&export.filename))
        }
    }

    #[derive(Default)]
    struct Counting {
        inner: MemStore,
        gets: AtomicUsize,
        sets: AtomicUsize,
    }

    impl SlotStore for Counting {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn ana() -> AdoptionForm {
        AdoptionForm {
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            telefone: "".into(),
            animal_interesse: "Cão".into(),
            tem_animais: "Não".into(),
            ..Default::default()
        }
    }

    #[test]
    fn submit_render_export_scenario() {
        let mem = MemStore::new();
        let captured = Captured::default();
        let app = App::new(&mem, FixedClock::from_millis(NOW), &captured);

        let out = app.submit_adoption(ana()).unwrap();
        assert_eq!(out.total, 1);
        assert_eq!(app.adoptions().len(), 1);

        let html = app.render(&Utc);
        assert!(html.contains("<strong>Ana</strong>"));
        assert!(html.contains("📞 —"));

        let path = app.export(ExportFormat::Csv, &Utc).unwrap();
        assert_eq!(path, PathBuf::from("par_cadastros_20251018_1200.csv"));
        let files = captured.0.lock();
        let csv = String::from_utf8(files[0].bytes.clone()).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(
            lines[0],
            "id,nome,email,telefone,endereco,animalInteresse,temAnimais,mensagem,criadoEm"
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(&format!("\"{NOW}\",\"Ana\",\"ana@x.com\",\"\"")));
    }

    #[test]
    fn accepted_submission_reads_once_and_writes_once() {
        let slots = Counting::default();
        let captured = Captured::default();
        let app = App::new(&slots, FixedClock::from_millis(NOW), &captured);

        app.submit_adoption(ana()).unwrap();
        assert_eq!(slots.gets.load(Ordering::SeqCst), 1);
        assert_eq!(slots.sets.load(Ordering::SeqCst), 1);

        let bad = AdoptionForm {
            email: String::new(),
            ..ana()
        };
        assert!(app.submit_adoption(bad).unwrap_err().is_validation());
        assert_eq!(slots.gets.load(Ordering::SeqCst), 1);
        assert_eq!(slots.sets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn export_of_empty_store_saves_nothing() {
        let mem = MemStore::new();
        let captured = Captured::default();
        let app = App::new(&mem, FixedClock::from_millis(NOW), &captured);

        for format in [ExportFormat::Csv, ExportFormat::Xls] {
            let err = app.export(format, &Utc).unwrap_err();
            assert!(matches!(err, Error::NothingToExport));
        }
        assert!(captured.0.lock().is_empty());
    }

    #[test]
    fn corrupt_store_renders_as_empty() {
        let mem = MemStore::new();
        mem.set(ADOPTION_SLOT, "not json").unwrap();
        let captured = Captured::default();
        let app = App::new(&mem, FixedClock::from_millis(NOW), &captured);
        assert!(app.render(&Utc).contains("Nenhum cadastro ainda."));

        // the next submission replaces the unreadable slot
        app.submit_adoption(ana()).unwrap();
        assert_eq!(app.adoptions().len(), 1);
    }

    #[test]
    fn clearing_adoptions_keeps_support_messages() {
        let mem = MemStore::new();
        let captured = Captured::default();
        let app = App::new(&mem, FixedClock::from_millis(NOW), &captured)
            .with_sheet_name("Planilha");
        app.submit_adoption(ana()).unwrap();
        app.submit_support(SupportForm {
            nome: "Ana".into(),
            email: "ana@x.com".into(),
            assunto: "".into(),
            mensagem: "Oi".into(),
        })
        .unwrap();
        app.export(ExportFormat::Xls, &Utc).unwrap();
        let xml = String::from_utf8(captured.0.lock()[0].bytes.clone()).unwrap();
        assert!(xml.contains(r#"ss:Name="Planilha""#));

        app.clear_records().unwrap();
        assert!(app.adoptions().is_empty());
        assert_eq!(app.support_messages().len(), 1);
        assert!(app.render_support(&Utc).contains("Oi"));

        app.clear_support().unwrap();
        assert!(app.support_messages().is_empty());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("par-cadastros.toml");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        let settings = Settings {
            database: Some(dir.path().join("slots.sqlite")),
            download_dir: None,
            sheet_name: Some("Adoções".into()),
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.sheet_name(), "Adoções");
        assert_eq!(Settings::default().sheet_name(), "Cadastros");
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let mut settings = Settings {
            database: Some(PathBuf::from("a.sqlite")),
            download_dir: Some(PathBuf::from("out")),
            sheet_name: None,
        };
        settings.merge(Settings {
            database: Some(PathBuf::from("b.sqlite")),
            download_dir: None,
            sheet_name: Some("Planilha".into()),
        });
        assert_eq!(settings.database, Some(PathBuf::from("b.sqlite")));
        assert_eq!(settings.download_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.sheet_name(), "Planilha");
    }

    #[test]
    fn export_surfaces_backend_failure() {
        struct Locked;

        impl SlotStore for Locked {
            fn get(&self, _key: &str) -> Result<Option<String>> {
                Err(Error::Io(std::io::Error::other("database is locked")))
            }

            fn set(&self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }

            fn remove(&self, _key: &str) -> Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let app = App::new(Locked, FixedClock::from_millis(NOW), &captured);
        let err = app.export(ExportFormat::Csv, &Utc).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(captured.0.lock().is_empty());
    }

    #[test]
    fn malformed_settings_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("par-cadastros.toml");
        fs::write(&path, "sheet_name = [").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(Error::Config(_))));
    }
}
