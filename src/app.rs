// src/app.rs
//
// Calculatrice texte — module App (racine)
// ----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + commande.rs)
// - Ré-exporter Session
// - Fournir la boucle ligne à ligne (générique : stdin/stdout ou mémoire pour les tests)
//
// Contrat : une ligne est entièrement traitée avant la lecture de la suivante.

pub mod commande;
pub mod etat;

#[cfg(test)]
mod tests_session;

use std::io::{self, BufRead, Write};

use thiserror::Error;

pub use commande::{Reponse, MESSAGE_AU_REVOIR};
pub use etat::Session;

use crate::noyau::ErreurCalcul;

#[derive(Debug, Error)]
pub enum ErreurBoucle {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fatale(#[from] ErreurCalcul),
}

/// Lit une ligne brute, sans "\n" ni "\r" final. `None` en fin d’entrée.
/// Octets non UTF-8 remplacés par U+FFFD : la ligne reste traitable.
fn lire_ligne<R: BufRead>(entree: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if entree.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Lit jusqu’à `/exit` ou fin d’entrée, puis écrit `Bye!`.
/// Une erreur fatale arrête la boucle sans message d’au revoir.
pub fn executer<R: BufRead, W: Write>(
    session: &mut Session,
    mut entree: R,
    sortie: &mut W,
) -> Result<(), ErreurBoucle> {
    let mut buf = Vec::new();

    while let Some(ligne) = lire_ligne(&mut entree, &mut buf)? {
        match session.traiter_ligne(&ligne)? {
            Reponse::Rien => {}
            Reponse::Afficher(texte) => writeln!(sortie, "{texte}")?,
            Reponse::Quitter => break,
        }
        sortie.flush()?;
    }

    writeln!(sortie, "{MESSAGE_AU_REVOIR}")?;
    sortie.flush()?;
    Ok(())
}
