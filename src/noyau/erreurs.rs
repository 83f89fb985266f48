// src/noyau/erreurs.rs
//
// Erreurs du noyau.
// Le texte `Display` est exactement la ligne de diagnostic imprimée sur stdout.

use std::fmt;

use thiserror::Error;

/// Étape du pipeline où une pile incohérente a été détectée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etape {
    Conversion,
    Evaluation,
}

impl fmt::Display for Etape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Etape::Conversion => f.write_str("postfix conversion"),
            Etape::Evaluation => f.write_str("postfix evaluation"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Comptage opérandes/opérateurs ou parenthèses incohérent, signe final orphelin.
    #[error("Invalid expression")]
    ExpressionInvalide,

    #[error("Unknown variable")]
    VariableInconnue { nom: String },

    #[error("Division by zero")]
    DivisionParZero,

    /// `^` a produit l’infini ou NaN.
    #[error("Result is not a finite number")]
    ResultatNonFini,

    /// Contrat validateur/convertisseur rompu : seule erreur fatale.
    #[error("internal error: inconsistent stack during {etape}")]
    PileIncoherente { etape: Etape },
}

impl ErreurCalcul {
    pub fn est_fatale(&self) -> bool {
        matches!(self, ErreurCalcul::PileIncoherente { .. })
    }
}

/// Littéral décimal refusé par `Decimal::from_str`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurLitteral {
    #[error("empty decimal literal")]
    Vide,

    #[error("unexpected character '{0}' in decimal literal")]
    Caractere(char),

    #[error("decimal exponent out of range")]
    ExposantHorsBornes,
}
