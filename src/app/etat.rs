//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, valeurs des variables,
//! résultats, erreur, démarche) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Garde-fou : valeurs de variables finies seulement.

/// Nombre de slots de variables proposés dans l’UI (x, y, z).
pub const NB_VARIABLES: usize = 3;

/// Valeurs au démarrage (et après AC).
const VALEURS_DEFAUT: [f64; NB_VARIABLES] = [0.0; NB_VARIABLES];

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub implicite: String,
    pub arbre: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub valeurs: [f64; NB_VARIABLES],

    // --- sorties ---
    pub valeur: String,  // valeur numérique (ou "indéfini")
    pub forme: String,   // arbre sous forme compacte
    pub erreur: String,  // message d’erreur (si parsing échoue)
    pub resultat_dispo: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            valeurs: VALEURS_DEFAUT,
            valeur: String::new(),
            forme: String::new(),
            erreur: String::new(),
            resultat_dispo: false, // au démarrage : rien à lire
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + valeurs des variables).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.valeurs = VALEURS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier caractère (tous les jetons saisis au pavé font un caractère).
    pub fn backspace_entree(&mut self) {
        self.entree.pop();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.valeur.clear();
        self.forme.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On coupe le résultat + la démarche (non fiables si le parse échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.valeur.clear();
        self.forme.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + forme + démarche).
    pub fn set_resultats(&mut self, valeur: impl Into<String>, forme: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.valeur = valeur.into();
        self.forme = forme.into();
        self.demarche = demarche;
        self.resultat_dispo = true;
        self.focus_entree = true;
    }

    /// Garde-fou : slot connu et valeur finie seulement.
    pub fn set_valeur(&mut self, slot: usize, v: f64) {
        if let Some(place) = self.valeurs.get_mut(slot) {
            if v.is_finite() {
                *place = v;
            }
        }
        self.focus_entree = true;
    }
}

/// Affichage d’une valeur flottante : NaN => "indéfini", ±∞ en toutes lettres.
pub fn format_valeur(v: f64) -> String {
    if v.is_nan() {
        "indéfini".to_string()
    } else if v == f64::INFINITY {
        "+∞".to_string()
    } else if v == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{v}")
    }
}
