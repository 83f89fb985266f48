// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
//
// Règles:
// - opérande        : sortie directe
// - '('             : empilée sans condition
// - ')'             : dépile vers la sortie jusqu’au '(' (jeté)
// - opérateur `op`  : dépile tant que le sommet est un opérateur de palier >= `op`, puis empile
// - fin             : vide la pile (LIFO) vers la sortie
//
// Paliers : {+, -} < {*, /} < {^}. Tous associatifs à gauche, `^` compris :
// "2 ^ 3 ^ 2" vaut (2 ^ 3) ^ 2.

use super::erreurs::{ErreurCalcul, Etape};
use super::jetons::{Jeton, Operateur};

fn palier(op: Operateur) -> u8 {
    match op {
        Operateur::Plus | Operateur::Moins => 1,
        Operateur::Fois | Operateur::Divise => 2,
        Operateur::Puissance => 3,
    }
}

/// Convertisseur réutilisable : la pile d’opérateurs est vidée à chaque sortie,
/// elle ne transporte aucun état d’une expression à l’autre.
#[derive(Debug, Default)]
pub struct ConvertisseurRpn {
    pile: Vec<Jeton>,
}

impl ConvertisseurRpn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn convertir(&mut self, jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurCalcul> {
        self.pile.clear();
        let res = self.convertir_interne(jetons);
        self.pile.clear();
        res
    }

    fn convertir_interne(&mut self, jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurCalcul> {
        let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());

        for tok in jetons.iter().cloned() {
            match tok {
                Jeton::Num(_) | Jeton::Ident(_) => out.push(tok),

                Jeton::LPar => self.pile.push(tok),

                Jeton::RPar => loop {
                    match self.pile.pop() {
                        Some(Jeton::LPar) => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(ErreurCalcul::PileIncoherente {
                                etape: Etape::Conversion,
                            })
                        }
                    }
                },

                Jeton::Op(op) => {
                    // '(' ou palier strictement inférieur au sommet : on arrête
                    while let Some(&Jeton::Op(sommet)) = self.pile.last() {
                        if palier(sommet) < palier(op) {
                            break;
                        }
                        self.pile.pop();
                        out.push(Jeton::Op(sommet));
                    }
                    self.pile.push(tok);
                }
            }
        }

        // vide la pile telle quelle (un '(' restant n’est pas attendu après validation)
        while let Some(op) = self.pile.pop() {
            out.push(op);
        }

        Ok(out)
    }
}
