use crate::export::ExportFormat;
use crate::intake::{AdoptionForm, SupportForm};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "par-cadastros",
    version,
    about = "Adoption and support sign-ups, stored locally and exported as CSV/XLS"
)]
pub struct Cli {
    /// SQLite file holding the slots (overrides the settings file)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true, conflicts_with = "database")]
    pub memory: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit an adoption interest form
    Adopt(AdoptArgs),
    /// Submit a support message
    Support(SupportArgs),
    /// Print stored records as HTML
    List {
        /// List support messages instead of adoption records
        #[arg(long)]
        support: bool,
    },
    /// Save adoption records as a csv or xls file
    Export {
        format: ExportFormat,
        /// Target directory (default: settings, then the user's downloads)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Delete every stored record
    Clear {
        /// Clear support messages instead of adoption records
        #[arg(long)]
        support: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Save defaults to the settings file (`--database` included)
    Config {
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        #[arg(long, value_name = "NAME")]
        sheet_name: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AdoptArgs {
    #[arg(long, default_value = "")]
    pub nome: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub telefone: String,
    #[arg(long, default_value = "")]
    pub endereco: String,
    #[arg(long = "interesse", default_value = "")]
    pub animal_interesse: String,
    #[arg(long, default_value = "")]
    pub tem_animais: String,
    #[arg(long, default_value = "")]
    pub mensagem: String,
}

impl From<AdoptArgs> for AdoptionForm {
    fn from(a: AdoptArgs) -> Self {
        AdoptionForm {
            nome: a.nome,
            email: a.email,
            telefone: a.telefone,
            endereco: a.endereco,
            animal_interesse: a.animal_interesse,
            tem_animais: a.tem_animais,
            mensagem: a.mensagem,
        }
    }
}

#[derive(Debug, Args)]
pub struct SupportArgs {
    #[arg(long, default_value = "")]
    pub nome: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub assunto: String,
    #[arg(long, default_value = "")]
    pub mensagem: String,
}

impl From<SupportArgs> for SupportForm {
    fn from(a: SupportArgs) -> Self {
        SupportForm {
            nome: a.nome,
            email: a.email,
            assunto: a.assunto,
            mensagem: a.mensagem,
        }
    }
}

/// Accepts `s`, `sim`, `y` and `yes`, any case.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
