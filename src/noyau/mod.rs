//! Noyau — évaluation d’expressions
//!
//! Organisation interne :
//! - decimal.rs    : Decimal (big int + échelle), division arrondie, puissance via f64
//! - erreurs.rs    : erreurs du pipeline (texte = diagnostic imprimé)
//! - jetons.rs     : normalisation des signes + tokenisation
//! - validation.rs : contrôle structurel (comptages)
//! - variables.rs  : environnement + résolution des identifiants
//! - rpn.rs        : shunting-yard
//! - eval.rs       : pile de valeurs + pipeline complet

pub mod decimal;
pub mod erreurs;
pub mod eval;
pub mod jetons;
pub mod rpn;
pub mod validation;
pub mod variables;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use decimal::Decimal;
pub use erreurs::ErreurCalcul;
pub use eval::{eval_expression, OptionsCalcul};
pub use rpn::ConvertisseurRpn;
pub use variables::{est_identifiant, Environnement};
