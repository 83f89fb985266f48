//! src/app/etat.rs
//!
//! État de session (sans entrée/sortie).
//!
//! Rôle : posséder l’environnement des variables, le convertisseur RPN réutilisable
//! et les réglages de calcul, pour toute la durée du processus.

use crate::noyau::{ConvertisseurRpn, Environnement, OptionsCalcul};

/// Garde-fou : on borne l’échelle de division (anti-abus / anti-gel).
pub const ECHELLE_MAX: u32 = 200;

#[derive(Debug)]
pub struct Session {
    // --- état persistant (vie du processus) ---
    pub variables: Environnement,

    // --- outil réutilisé d’une ligne à l’autre ---
    pub convertisseur: ConvertisseurRpn,

    // --- paramètres ---
    pub options: OptionsCalcul,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            variables: Environnement::new(),
            convertisseur: ConvertisseurRpn::new(),
            options: OptionsCalcul::default(), // échelle 0 : échelle du dividende
        }
    }
}

impl Session {
    pub fn new(echelle_division: u32) -> Self {
        let mut s = Self::default();
        s.set_echelle_division(echelle_division);
        s
    }

    /// Garde-fou : limite l’échelle (évite des quotients démesurés).
    pub fn set_echelle_division(&mut self, echelle: u32) {
        self.options.echelle_division = echelle.min(ECHELLE_MAX);
    }
}
