// src/main.rs
//
// Calculatrice texte — point d’entrée
// -----------------------------------
// - stdin  : une commande / expression par ligne
// - stdout : résultats et diagnostics (protocole)
// - stderr : journal (tracing) et erreur fatale

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod noyau;

use app::Session;

/// Calculatrice en ligne de commande : expressions entières, variables, décimaux exacts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Nombre minimal de décimales d’un quotient (0 = échelle du dividende)
    #[arg(long, default_value_t = 0)]
    scale: u32,

    /// Filtre de journalisation tracing (ex: "debug", "calculatrice_texte=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn installer_journal(filtre: &str) {
    // Filtre invalide => on retombe sur "warn" (jamais de variable d’environnement)
    let filter = EnvFilter::try_new(filtre).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    installer_journal(&args.log_level);

    let mut session = Session::new(args.scale);
    tracing::debug!(echelle = session.options.echelle_division, "session prête");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    match app::executer(&mut session, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(erreur = %e, "arrêt");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
