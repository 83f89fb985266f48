// src/noyau/decimal.rs
//
// Décimal à précision arbitraire : mantisse entière × 10^-échelle.
//
// Contrats :
// - + et - : échelle = max des échelles (exact)
// - *      : échelle = somme des échelles (exact)
// - /      : quotient rationnel exact, arrondi demi-pair à l’échelle max(dividende, réglage)
// - ^      : passe par f64 (exposant entier en pratique), jamais d’infini silencieux

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreurs::{ErreurCalcul, ErreurLitteral};

/// Garde-fou : exposant max accepté dans un littéral (`1e1000`).
const EXPOSANT_MAX: i64 = 1000;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantisse: BigInt,
    echelle: u32,
}

impl Decimal {
    pub fn est_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    /// Mantisse ramenée à une échelle plus grande (ou égale).
    fn aligne(&self, echelle: u32) -> BigInt {
        &self.mantisse * pow10(echelle - self.echelle)
    }

    fn en_rationnel(&self) -> BigRational {
        BigRational::new(self.mantisse.clone(), pow10(self.echelle))
    }

    /// Retire les zéros de fin de partie fractionnaire, sans descendre sous `plancher`.
    fn reduire_zeros(mut self, plancher: u32) -> Self {
        let dix = BigInt::from(10);
        while self.echelle > plancher && (&self.mantisse % &dix).is_zero() {
            self.mantisse /= &dix;
            self.echelle -= 1;
        }
        self
    }

    /// Division : échelle du résultat = max(échelle du dividende, `echelle_min`).
    pub fn diviser(&self, diviseur: &Decimal, echelle_min: u32) -> Result<Decimal, ErreurCalcul> {
        if diviseur.est_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }

        let echelle = self.echelle.max(echelle_min);
        let quotient = self.en_rationnel() / diviseur.en_rationnel();
        let scale = BigRational::from_integer(pow10(echelle));

        let d = Decimal {
            mantisse: arrondi_demi_pair(&(quotient * scale)),
            echelle,
        };
        Ok(d.reduire_zeros(self.echelle))
    }

    /// Puissance via f64 puis retour en décimal (forme la plus courte du flottant).
    pub fn puissance(&self, exposant: &Decimal) -> Result<Decimal, ErreurCalcul> {
        let r = self.en_f64().powf(exposant.en_f64());
        Decimal::depuis_f64(r).ok_or(ErreurCalcul::ResultatNonFini)
    }

    /// Approximation flottante (les très grandes valeurs deviennent ±inf).
    pub fn en_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// `None` si `x` n’est pas fini.
    pub fn depuis_f64(x: f64) -> Option<Decimal> {
        if !x.is_finite() {
            return None;
        }
        // Display f64 : jamais de notation scientifique, entiers sans ".0"
        format!("{x}").parse().ok()
    }
}

/// r -> entier le plus proche, égalité vers le pair (HALF_EVEN).
fn arrondi_demi_pair(r: &BigRational) -> BigInt {
    let plancher = r.floor();
    let reste = r - &plancher;
    let base = plancher.to_integer();
    let demi = BigRational::new(BigInt::one(), BigInt::from(2));

    match reste.cmp(&demi) {
        Ordering::Less => base,
        Ordering::Greater => base + 1u32,
        Ordering::Equal => {
            if (&base % BigInt::from(2)).is_zero() {
                base
            } else {
                base + 1u32
            }
        }
    }
}

impl From<BigInt> for Decimal {
    fn from(mantisse: BigInt) -> Self {
        Self {
            mantisse,
            echelle: 0,
        }
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::from(BigInt::from(n))
    }
}

/* ------------------------ Opérations exactes ------------------------ */

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, autre: Decimal) -> Decimal {
        let echelle = self.echelle.max(autre.echelle);
        Decimal {
            mantisse: self.aligne(echelle) + autre.aligne(echelle),
            echelle,
        }
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, autre: Decimal) -> Decimal {
        let echelle = self.echelle.max(autre.echelle);
        Decimal {
            mantisse: self.aligne(echelle) - autre.aligne(echelle),
            echelle,
        }
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, autre: Decimal) -> Decimal {
        Decimal {
            mantisse: self.mantisse * autre.mantisse,
            echelle: self.echelle + autre.echelle,
        }
    }
}

/* ------------------------ Lecture d’un littéral ------------------------ */

fn lire_exposant(texte: &str) -> Result<i64, ErreurLitteral> {
    let chiffres = texte.strip_prefix(['+', '-']).unwrap_or(texte);
    if chiffres.is_empty() {
        return Err(ErreurLitteral::Vide);
    }
    if let Some(c) = chiffres.chars().find(|c| !c.is_ascii_digit()) {
        return Err(ErreurLitteral::Caractere(c));
    }

    let valeur: i64 = texte
        .parse()
        .map_err(|_| ErreurLitteral::ExposantHorsBornes)?;
    if valeur.abs() > EXPOSANT_MAX {
        return Err(ErreurLitteral::ExposantHorsBornes);
    }
    Ok(valeur)
}

/// Accepte `[+-]? (chiffres [. chiffres?] | . chiffres) ([eE] [+-]? chiffres)?`.
impl FromStr for Decimal {
    type Err = ErreurLitteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negatif, reste) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(ErreurLitteral::Vide),
        };

        let (corps, exposant) = match reste.find(['e', 'E']) {
            Some(i) => (&reste[..i], Some(&reste[i + 1..])),
            None => (reste, None),
        };

        let (entiere, fraction) = corps.split_once('.').unwrap_or((corps, ""));
        if entiere.is_empty() && fraction.is_empty() {
            return Err(ErreurLitteral::Vide);
        }

        let mut chiffres = String::with_capacity(entiere.len() + fraction.len());
        for c in entiere.chars().chain(fraction.chars()) {
            if !c.is_ascii_digit() {
                return Err(ErreurLitteral::Caractere(c));
            }
            chiffres.push(c);
        }

        let mut mantisse =
            BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or(ErreurLitteral::Vide)?;

        let mut echelle = fraction.len() as i64;
        if let Some(e) = exposant {
            echelle -= lire_exposant(e)?;
        }
        if echelle < 0 {
            mantisse *= pow10((-echelle) as u32);
            echelle = 0;
        }
        if negatif {
            mantisse = -mantisse;
        }

        Ok(Decimal {
            mantisse,
            echelle: echelle as u32,
        })
    }
}

/* ------------------------ Affichage (toujours en clair) ------------------------ */

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neg = self.mantisse.is_negative();
        let mut chiffres = self.mantisse.abs().to_str_radix(10);
        let echelle = self.echelle as usize;

        if neg {
            f.write_str("-")?;
        }
        if echelle == 0 {
            return f.write_str(&chiffres);
        }

        while chiffres.len() <= echelle {
            chiffres.insert(0, '0');
        }
        let (int_part, frac_part) = chiffres.split_at(chiffres.len() - echelle);
        write!(f, "{int_part}.{frac_part}")
    }
}
