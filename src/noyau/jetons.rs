// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::decimal::Decimal;
use super::erreurs::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    Num(Decimal),

    // Identifiant ASCII [a-zA-Z]+ : résolu plus tard via l’environnement
    Ident(String),

    Op(Operateur),

    LPar,
    RPar,
}

impl Jeton {
    /// Classe "opérande" du contrôle structurel.
    pub fn est_operande(&self) -> bool {
        matches!(self, Jeton::Num(_) | Jeton::Ident(_))
    }
}

/// Réduit les suites de signes, dans cet ordre :
/// 1. chaque paire `--` d’une suite de moins devient `+` (un moins impair reste derrière)
/// 2. une suite de `+` devient un seul `+`
/// 3. `+-` devient `-` (remplacement gauche-droite, sans chevauchement)
///
/// Les espaces coupent les suites : `5 - - 2` n’est pas normalisé.
pub fn normaliser_signes(s: &str) -> String {
    // 1) moins doublés
    let mut etape1 = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '-' {
            etape1.push(c);
            continue;
        }
        let mut n = 1;
        while chars.peek() == Some(&'-') {
            chars.next();
            n += 1;
        }
        if n >= 2 {
            etape1.push('+');
        }
        if n % 2 == 1 {
            etape1.push('-');
        }
    }

    // 2) plus répétés
    let mut etape2 = String::with_capacity(etape1.len());
    for c in etape1.chars() {
        if c == '+' && etape2.ends_with('+') {
            continue;
        }
        etape2.push(c);
    }

    // 3) plus-moins
    etape2.replace("+-", "-")
}

/// Tokenize une ligne (déjà reconnue comme expression).
/// Découpe en suites maximales de chiffres, de lettres ASCII, ou un seul de `( ) + - * / ^`.
/// Espaces et caractères hors de ces classes sont ignorés.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalcul> {
    let normalise = normaliser_signes(s);
    let chars: Vec<char> = normalise.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Jeton::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::RPar);
            i += 1;
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Jeton::Op(op));
            i += 1;
            continue;
        }

        // Identifiants : [a-zA-Z]+ (pas de chiffres : "x2" donne x puis 2)
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            out.push(Jeton::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Entier
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let int_str: String = chars[start..i].iter().collect();
            let n = BigInt::parse_bytes(int_str.as_bytes(), 10)
                .ok_or(ErreurCalcul::ExpressionInvalide)?;
            out.push(Jeton::Num(Decimal::from(n)));
            continue;
        }

        tracing::trace!(caractere = %c, "caractère ignoré");
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (journal de démarche) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for t in jetons {
        let s = match t {
            Jeton::Num(d) => d.to_string(),
            Jeton::Ident(name) => name.clone(),
            Jeton::Op(op) => op.symbole().to_string(),
            Jeton::LPar => "(".to_string(),
            Jeton::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
