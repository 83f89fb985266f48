// src/noyau/validation.rs
//
// Contrôle structurel avant toute évaluation (comptages seulement) :
// - opérandes = opérateurs + 1
// - autant de '(' que de ')'
//
// Aucun contrôle de position : ")1+2(" passe.

use super::erreurs::ErreurCalcul;
use super::jetons::Jeton;

pub fn verifier_structure(jetons: &[Jeton]) -> Result<(), ErreurCalcul> {
    let operandes = jetons.iter().filter(|j| j.est_operande()).count();
    let operateurs = jetons.iter().filter(|j| matches!(j, Jeton::Op(_))).count();

    let ouvrantes = jetons.iter().filter(|j| matches!(j, Jeton::LPar)).count();
    let fermantes = jetons.iter().filter(|j| matches!(j, Jeton::RPar)).count();

    // opérandes == 0 => expression vide, refusée aussi
    if operandes != operateurs + 1 || ouvrantes != fermantes {
        return Err(ErreurCalcul::ExpressionInvalide);
    }
    Ok(())
}
