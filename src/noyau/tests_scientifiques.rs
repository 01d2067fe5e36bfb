//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : figer le comportement observable du pipeline.
//! - associativité “penchée à droite” (découpage au premier opérateur)
//! - priorités entre catégories
//! - cas numériques IEEE (jamais d’erreur à l’évaluation)
//! - cohérence validation <-> construction
//! - registre par défaut (lettre dédiée, les autres tests tournent en parallèle)
//! - stress borné (budget temps global)

use std::time::{Duration, Instant};

use super::eval::{parse_equation, parse_equation_avec, parse_equation_detail, Fonction};
use super::registre::{self, TableVariables};
use super::validation::validate;

fn table() -> TableVariables {
    TableVariables::default()
}

fn fonction(expr: &str) -> Fonction {
    parse_equation_avec(expr, &table())
        .into_function()
        .unwrap_or_else(|| panic!("expr={expr:?} refusée"))
}

fn valeur(expr: &str, vars: &[f64]) -> f64 {
    fonction(expr).evaluate(vars)
}

fn assert_valeur(expr: &str, vars: &[f64], attendu: f64) {
    let v = valeur(expr, vars);
    assert_eq!(v, attendu, "expr={expr:?} vars={vars:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Associativité (figée) ------------------------ */

#[test]
fn sci_associativite_premier_operateur() {
    // découpage au PREMIER opérateur de la catégorie : a - (b - c)
    assert_valeur("10-3-2", &[], 9.0);
    // a - (b + c)
    assert_valeur("2-3+4", &[], -5.0);
    // a / (b / c)
    assert_valeur("100/10/5", &[], 50.0);
    // a / (b * c)
    assert_valeur("12/2*3", &[], 2.0);
    // a ^ (b ^ c)
    assert_valeur("2^3^2", &[], 512.0);

    // les parenthèses rétablissent la lecture gauche -> droite
    assert_valeur("(10-3)-2", &[], 5.0);
    assert_valeur("(2-3)+4", &[], 3.0);
    assert_valeur("(100/10)/5", &[], 2.0);
}

#[test]
fn sci_associativite_sans_effet_pour_plus_et_fois() {
    assert_valeur("1+2+3+4", &[], 10.0);
    assert_valeur("2*3*4", &[], 24.0);
    assert_valeur("2xyz", &[1.0, 2.0, 3.0], 12.0);
}

/* ------------------------ Priorités entre catégories ------------------------ */

#[test]
fn sci_priorites() {
    assert_valeur("2+3*4", &[], 14.0);
    assert_valeur("2*3+4*5", &[], 26.0);
    assert_valeur("2*3^2", &[], 18.0);
    assert_valeur("3^2*2", &[], 18.0);
    assert_valeur("1+2^3", &[], 9.0);
    assert_valeur("(1+2)^2", &[], 9.0);
    assert_valeur("x^2+2x+1", &[3.0], 16.0);
    assert_valeur("2(x+1)(x-1)", &[3.0], 16.0);
}

#[test]
fn sci_multiplication_implicite_moins_liante_que_puissance() {
    // "2^(y)(0.5)" -> "2^(y)*(0.5)" : (2^y)*0.5, pas 2^(y*0.5)
    assert_valeur("2^(y)(0.5)", &[0.0, 3.0], 4.0);
    assert_valeur("2^x3", &[2.0], 12.0);
    assert_valeur("2^(x3)", &[2.0], 64.0);
}

#[test]
fn sci_signes_en_tete_de_groupe() {
    assert_valeur("-x", &[5.0], -5.0);
    assert_valeur("-2^2", &[], 4.0);
    assert_valeur("x*(-y)", &[2.0, 3.0], -6.0);
    assert_valeur("(-x)^2", &[3.0], 9.0);
    assert_valeur("+3+x", &[1.0], 4.0);
}

/* ------------------------ Cas numériques ------------------------ */

#[test]
fn sci_ieee() {
    assert_eq!(valeur("1/0", &[]), f64::INFINITY);
    assert_eq!(valeur("-1/0", &[]), f64::NEG_INFINITY);
    assert!(valeur("0/0", &[]).is_nan());
    assert!(valeur("(-1)^0.5", &[]).is_nan());
    assert!((valeur("2^0.5", &[]) - 1.414_213_562_373_095).abs() < 1e-12);
    assert_eq!(valeur("x/y", &[1.0]), f64::INFINITY);
    assert_eq!(valeur("0^0", &[]), 1.0);
}

/* ------------------------ Cohérence validation / construction ------------------------ */

#[test]
fn sci_refus() {
    for s in [
        "", "(", ")", "()", "(x", "x)", ")x(", "2+", "+", "-", "*2", "2**3", "2*-3", "3 4", " x",
        "x ", "1.2.3", ".", "--x", "-(x)", "a", "sin(x)", "2^", "(+)", "x=1",
    ] {
        assert!(!validate(s, &table()), "validate({s:?}) devrait être faux");
        assert!(!parse_equation_avec(s, &table()).success(), "parse({s:?})");
    }
}

#[test]
fn sci_valide_implique_constructible() {
    for s in [
        "(x)", "(x)(y)", "((((1))))", "-x", "+x", "-3.5", ".5", "5.", "x3", "3x", "xy", "2(x)",
        "(x)2", "x(y)(z)", "-x^-0", "1-(-1)", "(-(1))", "((x+y)(x-y))^2/(z)",
    ] {
        if !validate(s, &table()) {
            continue;
        }
        if let Err(e) = parse_equation_detail(s, &table()) {
            panic!("{s:?} validée mais non constructible: {e}");
        }
    }

    assert!(validate("(x)(y)", &table()));
    assert!(validate("((x+y)(x-y))^2/(z)", &table()));
}

/* ------------------------ Aller-retour affichage ------------------------ */

#[test]
fn sci_aller_retour_display() {
    let vars = [1.5, -2.0, 0.25];
    for s in [
        "2+3*4",
        "10-3-2",
        "(10-3)-2",
        "-x+y",
        "2^3^2",
        "(2^3)^2",
        "x/y/z",
        "-2.5x(y-z)",
        "(x+1)(x-1)/(z^2)",
        "0-(x+1)",
        "0-x^2",
        "0-2*x",
        "x+(0-(y+1))",
        "(-x)^2*(0-(-2))",
    ] {
        assert!(validate(s, &table()), "échantillon invalide: {s:?}");
        let f = fonction(s);

        let rendu = f.to_string();
        let g = fonction(&rendu);
        assert_eq!(g, f, "s={s:?} rendu={rendu:?}");

        let joli = f.format_pretty();
        assert!(validate(&joli, &table()), "forme compacte non relisible: s={s:?} joli={joli:?}");
        assert_eq!(fonction(&joli), f, "s={s:?} joli={joli:?}");
        assert_eq!(f.evaluate(&vars), valeur(&joli, &vars), "s={s:?} joli={joli:?}");
    }
}

/* ------------------------ Registre par défaut ------------------------ */

#[test]
fn sci_registre_forget_puis_register() {
    // 'w' : lettre réservée à ce test (x/y/z restent intactes pour les autres)
    assert!(!parse_equation("w+1").success());

    registre::register('w', 3).unwrap();
    let f = parse_equation("w+1").into_function().unwrap();
    assert_eq!(f.evaluate(&[0.0, 0.0, 0.0, 4.0]), 5.0);

    registre::forget('w');
    assert!(!parse_equation("w+1").success());
    assert!(!parse_equation("2w").success());

    // un arbre déjà construit n’est pas affecté
    assert_eq!(f.evaluate(&[0.0, 0.0, 0.0, 4.0]), 5.0);

    registre::register('w', 0).unwrap();
    assert_eq!(parse_equation("w").into_function().unwrap().evaluate(&[7.0]), 7.0);
    registre::forget('w');
}

#[test]
fn sci_forget_x_table_explicite() {
    let mut t = table();
    t.forget('x');
    for s in ["x", "2x", "x+y", "(x)", "-x"] {
        assert!(!parse_equation_avec(s, &t).success(), "s={s:?}");
    }
    assert!(parse_equation_avec("y+z", &t).success());

    t.register('x', 0).unwrap();
    assert!(parse_equation_avec("2x", &t).success());
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // arbre penché à droite : profondeur = nombre de termes, on reste raisonnable
    let expr = ["1"; 300].join("+");
    budget(t0, max);

    assert_valeur(&expr, &[], 300.0);
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let profondeur = 200;
    let expr = format!("{}x{}", "(".repeat(profondeur), ")".repeat(profondeur));
    assert_valeur(&expr, &[4.0], 4.0);

    let desequilibre = format!("{}x{}", "(".repeat(profondeur), ")".repeat(profondeur - 1));
    assert!(!validate(&desequilibre, &table()));
    budget(t0, max);
}

#[test]
fn sci_stress_longs_nombres() {
    let big = "9".repeat(400);
    let v = valeur(&format!("{big}/{big}"), &[]);
    // 1e400 déborde en f64 : inf / inf
    assert!(v.is_nan());

    let long = format!("0.{}1", "0".repeat(50));
    assert!(valeur(&long, &[]) > 0.0);
}
