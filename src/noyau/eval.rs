//! Noyau — évaluation (pipeline réel)
//!
//! tokenize (signes normalisés) -> contrôle structurel -> résolution des variables
//!        -> RPN -> pile de valeurs -> Decimal
//!
//! Aucune étape ne modifie l’environnement : seules les affectations le font.

use super::decimal::Decimal;
use super::erreurs::{ErreurCalcul, Etape};
use super::jetons::{format_jetons, tokenize, Jeton, Operateur};
use super::rpn::ConvertisseurRpn;
use super::validation::verifier_structure;
use super::variables::{resoudre, Environnement};

/// Réglages de calcul transmis par la session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionsCalcul {
    /// Nombre minimal de décimales d’un quotient (0 = échelle du dividende).
    pub echelle_division: u32,
}

/// Trace textuelle du pipeline (journalisée en debug par la session).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

fn pile_incoherente() -> ErreurCalcul {
    ErreurCalcul::PileIncoherente {
        etape: Etape::Evaluation,
    }
}

/// Évalue une suite postfix avec une pile de valeurs.
///
/// Pour un opérateur, le premier dépilé est l’opérande de droite :
/// `a b -` vaut `a - b`.
pub fn evaluer_postfixe(rpn: &[Jeton], options: &OptionsCalcul) -> Result<Decimal, ErreurCalcul> {
    let mut pile: Vec<Decimal> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Jeton::Num(d) => pile.push(d.clone()),

            Jeton::Op(op) => {
                let droite = pile.pop().ok_or_else(pile_incoherente)?;
                let gauche = pile.pop().ok_or_else(pile_incoherente)?;

                let r = match op {
                    Operateur::Plus => gauche + droite,
                    Operateur::Moins => gauche - droite,
                    Operateur::Fois => gauche * droite,
                    Operateur::Divise => gauche.diviser(&droite, options.echelle_division)?,
                    Operateur::Puissance => gauche.puissance(&droite)?,
                };
                pile.push(r);
            }

            // identifiant non résolu ou parenthèse restée en sortie
            Jeton::Ident(_) | Jeton::LPar | Jeton::RPar => return Err(pile_incoherente()),
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(pile_incoherente()),
    }
}

/// API publique : évalue une expression infixe.
///
/// Le convertisseur est prêté par l’appelant pour être réutilisé d’une ligne à l’autre.
pub fn eval_expression(
    expr_str: &str,
    variables: &Environnement,
    convertisseur: &mut ConvertisseurRpn,
    options: &OptionsCalcul,
) -> Result<(Decimal, DemarcheNoyau), ErreurCalcul> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    let jetons_txt = format_jetons(&jetons);

    // 2) Contrôle structurel (avant toute évaluation)
    verifier_structure(&jetons)?;

    // 3) Variables
    let resolus = resoudre(jetons, variables)?;

    // 4) RPN
    let rpn = convertisseur.convertir(&resolus)?;
    let rpn_txt = format_jetons(&rpn);

    // 5) Pile de valeurs
    let valeur = evaluer_postfixe(&rpn, options)?;

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
    };
    Ok((valeur, d))
}
