// src/noyau/variables.rs
//
// Environnement des variables (nom -> Decimal) + résolution des identifiants.
// Possédé par la session : aucune globale.

use std::collections::HashMap;

use super::decimal::Decimal;
use super::erreurs::ErreurCalcul;
use super::jetons::Jeton;

/// Identifiant valide : lettres ASCII uniquement, non vide.
pub fn est_identifiant(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Clone, Debug, Default)]
pub struct Environnement {
    valeurs: HashMap<String, Decimal>,
}

impl Environnement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Une affectation ultérieure écrase la précédente.
    pub fn definir(&mut self, nom: impl Into<String>, valeur: Decimal) {
        self.valeurs.insert(nom.into(), valeur);
    }

    pub fn valeur(&self, nom: &str) -> Option<&Decimal> {
        self.valeurs.get(nom)
    }

    pub fn len(&self) -> usize {
        self.valeurs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valeurs.is_empty()
    }
}

/// Remplace chaque identifiant par sa valeur liée.
/// Le premier identifiant inconnu interrompt tout (aucun résultat partiel).
pub fn resoudre(jetons: Vec<Jeton>, env: &Environnement) -> Result<Vec<Jeton>, ErreurCalcul> {
    jetons
        .into_iter()
        .map(|j| match j {
            Jeton::Ident(nom) => match env.valeur(&nom) {
                Some(v) => Ok(Jeton::Num(v.clone())),
                None => Err(ErreurCalcul::VariableInconnue { nom }),
            },
            autre => Ok(autre),
        })
        .collect()
}
