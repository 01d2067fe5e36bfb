//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * une expression générée (toute parenthésée) vaut exactement la valeur calculée à côté
//!   * Display -> re-parse donne la même valeur
//!   * texte aléatoire : jamais de panique, et "validé" => "construit"

use std::time::{Duration, Instant};

use super::eval::{parse_equation_avec, parse_equation_detail};
use super::registre::TableVariables;
use super::validation::validate;

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

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers ------------------------ */

const VARS: [f64; 3] = [1.5, -2.0, 0.25];

fn meme_valeur(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Atome + sa valeur attendue (x, y, z lus dans VARS).
fn gen_atom(rng: &mut Rng) -> (String, f64) {
    match rng.pick(9) {
        0 => ("3".into(), 3.0),
        1 => ("0.5".into(), 0.5),
        2 => ("12".into(), 12.0),
        3 => ("(-2)".into(), -2.0),
        4 => ("x".into(), VARS[0]),
        5 => ("y".into(), VARS[1]),
        6 => ("z".into(), VARS[2]),
        7 => ("(-x)".into(), -VARS[0]),
        _ => (".25".into(), 0.25),
    }
}

/// Expression toute parenthésée : le découpage n’a qu’une lecture possible,
/// la valeur attendue est calculée avec les mêmes opérations flottantes.
fn gen_expr(rng: &mut Rng, depth: usize) -> (String, f64) {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}+{b})"), va + vb)
        }
        2 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}-{b})"), va - vb)
        }
        3 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}*{b})"), va * vb)
        }
        4 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}/{b})"), va * (1.0 / vb))
        }
        5 => {
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("({a}^{b})"), va.powf(vb))
        }
        6 => {
            // multiplication implicite entre deux groupes, elle-même groupée :
            // sous un '^', "(a)(b)" se lirait (..^a)*b
            let (a, va) = gen_expr(rng, depth - 1);
            let (b, vb) = gen_expr(rng, depth - 1);
            (format!("(({a})({b}))"), va * vb)
        }
        _ => {
            // parenthèses redondantes
            let (a, va) = gen_expr(rng, depth - 1);
            (format!("(({a}))"), va)
        }
    }
}

/// Texte aléatoire sur un alphabet proche de la grammaire.
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '7', '.', '+', '-', '*', '/', '^', '(', ')', '(', ')', 'x', 'y', 'z', 'a',
        ' ',
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_valeur_attendue_et_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);
    let table = TableVariables::default();

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        let f = parse_equation_avec(&expr, &table)
            .into_function()
            .unwrap_or_else(|| panic!("expression générée refusée: {expr:?}"));

        let v = f.evaluate(&VARS);
        assert!(
            meme_valeur(v, attendu),
            "expr={expr:?} valeur={v} attendu={attendu}"
        );

        let rendu = f.to_string();
        let g = parse_equation_avec(&rendu, &table)
            .into_function()
            .unwrap_or_else(|| panic!("rendu non relisible: {rendu:?} (depuis {expr:?})"));
        assert!(
            meme_valeur(g.evaluate(&VARS), v),
            "aller-retour: expr={expr:?} rendu={rendu:?}"
        );
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique_et_coherence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);
    let table = TableVariables::default();

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..3000 {
        budget(t0, max);

        let longueur = 1 + rng.pick(6) as usize;
        let texte = gen_bruit(&mut rng, longueur);

        let valide = validate(&texte, &table);
        match parse_equation_detail(&texte, &table) {
            Ok((f, _d)) => {
                assert!(valide, "construit sans être validé: {texte:?}");
                // l’évaluation ne doit jamais paniquer
                let _ = f.evaluate(&VARS);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(!valide, "validé mais non construit: {texte:?} err={e}");
                seen_err += 1;
            }
        }

        assert_eq!(parse_equation_avec(&texte, &table).success(), valide, "texte={texte:?}");
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 50, "trop peu d’échecs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let table = TableVariables::default();

    let rendus = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        (0..40)
            .map(|_| {
                let (expr, _) = gen_expr(&mut rng, 4);
                parse_equation_avec(&expr, &table)
                    .into_function()
                    .map(|f| f.to_string())
                    .unwrap_or_default()
            })
            .collect()
    };

    // Même seed => mêmes expressions => mêmes arbres
    assert_eq!(rendus(42), rendus(42));
    assert_ne!(rendus(42), rendus(43));
}
