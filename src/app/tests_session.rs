//! Tests de session : scénarios complets ligne à ligne (entrée/sortie en mémoire).

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::{executer, ErreurBoucle, Session};

fn session(lignes: &[&str]) -> Vec<String> {
    session_avec(Session::default(), lignes)
}

fn session_avec(mut s: Session, lignes: &[&str]) -> Vec<String> {
    let entree = Cursor::new(lignes.join("\n"));
    let mut sortie = Vec::new();
    executer(&mut s, entree, &mut sortie)
        .unwrap_or_else(|e| panic!("session interrompue: {e}"));
    String::from_utf8(sortie)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn exit_imprime_bye() {
    assert_eq!(session(&["/exit"]), vec!["Bye!"]);
}

#[test]
fn lignes_apres_exit_ignorees() {
    assert_eq!(session(&["/exit", "1 + 1"]), vec!["Bye!"]);
}

#[test]
fn fin_d_entree_comme_exit() {
    assert_eq!(session(&["2 + 2"]), vec!["4", "Bye!"]);
}

#[test]
fn commandes() {
    assert_eq!(
        session(&["/help", "/go", "", "/exit"]),
        vec![super::commande::MESSAGE_AIDE, "Unknown command", "Bye!"]
    );
}

#[test]
fn calculs() {
    assert_eq!(
        session(&["3 + 4", "8 - 3 - 2", "(1 + 2) * 3", "2 + 3 * 4", "2 * 3 ^ 2", "/exit"]),
        vec!["7", "3", "9", "14", "18", "Bye!"]
    );
}

#[test]
fn signes_repetes() {
    assert_eq!(session(&["5---2", "5--2", "/exit"]), vec!["3", "7", "Bye!"]);
}

#[test]
fn affectation_puis_lecture() {
    assert_eq!(
        session(&["a = 5", "b = a", "b", "a = 7", "b", "a * b", "/exit"]),
        vec!["5", "5", "35", "Bye!"]
    );
}

#[test]
fn variables_inconnues() {
    assert_eq!(
        session(&["x", "x + 1", "/exit"]),
        vec!["Unknown variable", "Unknown variable", "Bye!"]
    );
}

#[test]
fn affectations_refusees() {
    assert_eq!(
        session(&["a2 = 5", "n = 22a", "n = m", "a = 1 = 2", "/exit"]),
        vec![
            "Invalid identifier",
            "Invalid assignment",
            "Invalid assignment",
            "Invalid assignment",
            "Bye!"
        ]
    );
}

#[test]
fn expressions_invalides() {
    assert_eq!(
        session(&["3 + ", "125+", "18 22", "(2 + 3", "2 ** 3", "/exit"]),
        vec![
            "Invalid expression",
            "Invalid expression",
            "Invalid expression",
            "Invalid expression",
            "Invalid expression",
            "Bye!"
        ]
    );
}

#[test]
fn entiers_seuls() {
    assert_eq!(
        session(&["-12", "+7", "007", "  42  ", "/exit"]),
        vec!["-12", "7", "7", "42", "Bye!"]
    );
}

#[test]
fn idempotence_sur_litteral() {
    assert_eq!(session(&["9", "9", "9"]), vec!["9", "9", "9", "Bye!"]);
}

#[test]
fn expression_sans_effet_sur_les_variables() {
    let mut s = Session::default();
    let entree = Cursor::new("a = 2\na + 3\na");
    let mut sortie = Vec::new();
    executer(&mut s, entree, &mut sortie).unwrap();
    assert_eq!(String::from_utf8(sortie).unwrap(), "5\n2\nBye!\n");
    assert_eq!(s.variables.len(), 1);
}

#[test]
fn division() {
    assert_eq!(
        session(&["8 / 2", "1 / 0", "/exit"]),
        vec!["4", "Division by zero", "Bye!"]
    );
    assert_eq!(
        session_avec(Session::new(2), &["1 / 4", "/exit"]),
        vec!["0.25", "Bye!"]
    );
}

#[test]
fn erreur_fatale_interrompt_la_session() {
    let mut s = Session::default();
    let entree = Cursor::new("1 + 1\n)1 + 2(\n2 + 2");
    let mut sortie = Vec::new();
    let r = executer(&mut s, entree, &mut sortie);
    assert!(matches!(r, Err(ErreurBoucle::Fatale(_))));
    // rien après la ligne fatale, pas de "Bye!"
    assert_eq!(String::from_utf8(sortie).unwrap(), "2\n");
}

#[test]
fn octets_non_utf8_sans_arret() {
    let mut s = Session::default();
    let mut octets = b"1 + 1\n".to_vec();
    octets.extend_from_slice(&[0xff, 0xfe, b'\n']);
    octets.extend_from_slice(b"2 + 2\r\n");
    let mut sortie = Vec::new();
    executer(&mut s, Cursor::new(octets), &mut sortie).unwrap();
    // la ligne illisible est une expression vide de jetons
    assert_eq!(
        String::from_utf8(sortie).unwrap(),
        "2\nInvalid expression\n4\nBye!\n"
    );
}
