// src/app/commande.rs
//
// Classement d’une ligne + exécution sur la session.
// ---------------------------------------------------
// Ordre de classement (ligne déjà rognée) :
//   vide -> /commande -> affectation (contient '=') -> identifiant seul
//        -> entier signé seul -> chiffres suivis d’un signe final -> expression
//
// Toute erreur non fatale devient une ligne de diagnostic ; seule une pile
// incohérente remonte à la boucle.

use thiserror::Error;
use tracing::debug;

use super::etat::Session;
use crate::noyau::{eval_expression, est_identifiant, Decimal, ErreurCalcul};

pub const MESSAGE_AIDE: &str =
    "The program evaluates expressions with + - * / ^, parentheses and variables (name = value)";

pub const MESSAGE_AU_REVOIR: &str = "Bye!";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErreurCommande {
    #[error("Invalid assignment")]
    AffectationInvalide,

    #[error("Invalid identifier")]
    IdentifiantInvalide,

    #[error("Unknown command")]
    CommandeInconnue,

    #[error(transparent)]
    Calcul(#[from] ErreurCalcul),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Ligne<'a> {
    Vide,
    Commande(&'a str),
    Affectation(&'a str),
    Identifiant(&'a str),
    Entier(&'a str),
    SigneFinal,
    Expression(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reponse {
    Rien,
    Afficher(String),
    Quitter,
}

/// `[+-]?\d+`
fn est_entier_signe(s: &str) -> bool {
    let chiffres = s.strip_prefix(['+', '-']).unwrap_or(s);
    !chiffres.is_empty() && chiffres.bytes().all(|b| b.is_ascii_digit())
}

/// `\d+[+-]` : nombre suivi d’un signe sans opérande ("125+").
fn est_signe_final(s: &str) -> bool {
    match s.strip_suffix(['+', '-']) {
        Some(chiffres) => !chiffres.is_empty() && chiffres.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

pub fn classer(ligne: &str) -> Ligne<'_> {
    if ligne.is_empty() {
        Ligne::Vide
    } else if ligne.starts_with('/') {
        Ligne::Commande(ligne)
    } else if ligne.contains('=') {
        Ligne::Affectation(ligne)
    } else if est_identifiant(ligne) {
        Ligne::Identifiant(ligne)
    } else if est_entier_signe(ligne) {
        Ligne::Entier(ligne)
    } else if est_signe_final(ligne) {
        Ligne::SigneFinal
    } else {
        Ligne::Expression(ligne)
    }
}

impl Session {
    /// Traite une ligne brute. `Err` uniquement pour une erreur fatale.
    pub fn traiter_ligne(&mut self, ligne: &str) -> Result<Reponse, ErreurCalcul> {
        match self.executer_ligne(ligne.trim()) {
            Ok(r) => Ok(r),
            Err(ErreurCommande::Calcul(e)) if e.est_fatale() => Err(e),
            Err(e) => {
                debug!(erreur = ?e, "ligne refusée");
                Ok(Reponse::Afficher(e.to_string()))
            }
        }
    }

    fn executer_ligne(&mut self, ligne: &str) -> Result<Reponse, ErreurCommande> {
        match classer(ligne) {
            Ligne::Vide => Ok(Reponse::Rien),

            Ligne::Commande("/exit") => Ok(Reponse::Quitter),
            Ligne::Commande("/help") => Ok(Reponse::Afficher(MESSAGE_AIDE.to_string())),
            Ligne::Commande(_) => Err(ErreurCommande::CommandeInconnue),

            Ligne::Affectation(texte) => {
                self.affecter(texte)?;
                Ok(Reponse::Rien)
            }

            Ligne::Identifiant(nom) => match self.variables.valeur(nom) {
                Some(v) => Ok(Reponse::Afficher(v.to_string())),
                None => Err(ErreurCalcul::VariableInconnue {
                    nom: nom.to_string(),
                }
                .into()),
            },

            Ligne::Entier(texte) => {
                // `[+-]?\d+` déjà vérifié : jamais refusé en pratique
                let v: Decimal = texte
                    .parse()
                    .map_err(|_| ErreurCalcul::ExpressionInvalide)?;
                Ok(Reponse::Afficher(v.to_string()))
            }

            Ligne::SigneFinal => Err(ErreurCalcul::ExpressionInvalide.into()),

            Ligne::Expression(texte) => {
                let (v, d) = eval_expression(
                    texte,
                    &self.variables,
                    &mut self.convertisseur,
                    &self.options,
                )?;
                debug!(jetons = %d.jetons, rpn = %d.rpn, resultat = %v, "expression évaluée");
                Ok(Reponse::Afficher(v.to_string()))
            }
        }
    }

    /// `nom = valeur` ou `nom = autre_nom` (exactement un '=').
    fn affecter(&mut self, texte: &str) -> Result<(), ErreurCommande> {
        let mut parties = texte.split('=').map(str::trim);
        let (Some(gauche), Some(droite), None) = (parties.next(), parties.next(), parties.next())
        else {
            return Err(ErreurCommande::AffectationInvalide);
        };
        if gauche.is_empty() || droite.is_empty() {
            return Err(ErreurCommande::AffectationInvalide);
        }

        if !est_identifiant(gauche) {
            return Err(ErreurCommande::IdentifiantInvalide);
        }

        // copie d’une variable connue, sinon littéral décimal
        let valeur = match self.variables.valeur(droite) {
            Some(v) => v.clone(),
            None => droite
                .parse::<Decimal>()
                .map_err(|_| ErreurCommande::AffectationInvalide)?,
        };

        debug!(nom = gauche, valeur = %valeur, "affectation");
        self.variables.definir(gauche, valeur);
        debug!(variables = self.variables.len(), "environnement");
        Ok(())
    }
}
