//! Tests de propriétés : déterminisme + invariants du pipeline.
//!
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : le contrôle structurel accepte ssi opérateurs = opérandes - 1
//!   et parenthèses équilibrées

use std::time::{Duration, Instant};

use super::decimal::Decimal;
use super::erreurs::ErreurCalcul;
use super::eval::{eval_expression, OptionsCalcul};
use super::jetons::tokenize;
use super::rpn::ConvertisseurRpn;
use super::validation::verifier_structure;
use super::variables::Environnement;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération bornée ------------------------ */

const OPS: [&str; 5] = ["+", "-", "*", "/", "^"];

fn gen_operande(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 => "a".to_string(),
        1 => "b".to_string(),
        _ => format!("{}", 1 + rng.pick(9)),
    }
}

/// Expression bien formée (sans `^` pour garder des valeurs exactes et bornées).
fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 || rng.pick(3) == 0 {
        return gen_operande(rng);
    }
    let g = gen_expr(rng, profondeur - 1);
    let d = gen_expr(rng, profondeur - 1);
    let op = OPS[rng.pick(4) as usize];
    if rng.pick(2) == 0 {
        format!("({g} {op} {d})")
    } else {
        format!("{g} {op} {d}")
    }
}

/// Suite arbitraire de jetons (souvent mal formée).
fn gen_bruit(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(8);
    let mut out = Vec::new();
    for _ in 0..n {
        let s = match rng.pick(5) {
            0 => gen_operande(rng),
            1 => OPS[rng.pick(5) as usize].to_string(),
            2 => "(".to_string(),
            3 => ")".to_string(),
            _ => format!("{}", rng.pick(100)),
        };
        out.push(s);
    }
    out.join(" ")
}

fn env_de_test() -> Environnement {
    let mut e = Environnement::new();
    e.definir("a", Decimal::from(3));
    e.definir("b", Decimal::from(7));
    e
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn controle_structurel_par_comptage() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..2_000 {
        budget(start, max);
        let s = gen_bruit(&mut rng);
        let j = tokenize(&s).unwrap();

        // comptage sur le texte brut (chaque fragment séparé par un espace)
        let mut operandes = 0usize;
        let mut operateurs = 0usize;
        let mut equilibre = 0isize;
        for frag in s.split_whitespace() {
            match frag {
                "(" => equilibre += 1,
                ")" => equilibre -= 1,
                f if OPS.contains(&f) => operateurs += 1,
                _ => operandes += 1,
            }
        }
        let attendu = operandes == operateurs + 1 && equilibre == 0;

        assert_eq!(
            verifier_structure(&j).is_ok(),
            attendu,
            "contrôle structurel incohérent pour {s:?}"
        );
    }
}

#[test]
fn expressions_generees_jamais_fatales() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);
    let env = env_de_test();
    let mut c = ConvertisseurRpn::new();
    let options = OptionsCalcul::default();

    for _ in 0..1_000 {
        budget(start, max);
        let s = gen_expr(&mut rng, 4);
        match eval_expression(&s, &env, &mut c, &options) {
            Ok(_) | Err(ErreurCalcul::DivisionParZero) => {}
            Err(e) => panic!("{s:?} -> erreur inattendue: {e}"),
        }
    }
}

#[test]
fn idempotence_et_environnement_intact() {
    let env = env_de_test();
    let mut c = ConvertisseurRpn::new();
    let options = OptionsCalcul::default();

    let premier = eval_expression("a * (b - 2) / 5", &env, &mut c, &options)
        .unwrap()
        .0;
    for _ in 0..10 {
        let v = eval_expression("a * (b - 2) / 5", &env, &mut c, &options)
            .unwrap()
            .0;
        assert_eq!(v, premier);
    }
    assert_eq!(env.len(), 2);
    assert_eq!(env.valeur("a"), Some(&Decimal::from(3)));
    assert_eq!(env.valeur("b"), Some(&Decimal::from(7)));
}

#[test]
fn concordance_avec_i128() {
    // petites expressions entières sans division : résultat exact attendu
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(7);
    let mut c = ConvertisseurRpn::new();
    let env = Environnement::new();

    for _ in 0..500 {
        budget(start, max);
        let x = i128::from(rng.pick(50));
        let y = i128::from(1 + rng.pick(50));
        let z = i128::from(rng.pick(50));

        let s = format!("{x} - {y} * ({z} + {x}) - {y}");
        let attendu = x - y * (z + x) - y;

        let (v, _) = eval_expression(&s, &env, &mut c, &OptionsCalcul::default()).unwrap();
        assert_eq!(v.to_string(), attendu.to_string(), "pour {s:?}");
    }
}
