// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Valeurs de x / y / z réglables à côté de l’entrée
//
// Note :
// - l’espace n’est pas un jeton : le pavé n’en insère jamais

use eframe::egui;

use calculatrice_equations::noyau::{parse_equation_detail, registre};

use super::etat::{format_valeur, AppCalc, Demarche, NB_VARIABLES};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice d’équations");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variables(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2x^2-3x+1, (x+1)(y-1), -z/2")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });

        ui.add_space(8.0);

        // Opérateurs + variables + "="
        ui.horizontal_wrapped(|ui| {
            for op in ["(", ")", "+", "-", "*", "/", "^"] {
                self.bouton_insert(ui, op);
            }

            ui.separator();

            for (lettre, slot) in registre::snapshot().lettres() {
                if slot < NB_VARIABLES {
                    self.bouton_insert(ui, &lettre.to_string());
                }
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7");
                self.bouton_insert(ui, "8");
                self.bouton_insert(ui, "9");
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4");
                self.bouton_insert(ui, "5");
                self.bouton_insert(ui, "6");
                self.bouton_insert(ui, "/");
                ui.end_row();

                self.bouton_insert(ui, "1");
                self.bouton_insert(ui, "2");
                self.bouton_insert(ui, "3");
                self.bouton_insert(ui, ".");
                ui.end_row();

                self.bouton_insert(ui, "0");
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Valeurs des variables connues du registre (slots affichables seulement).
    fn ui_variables(&mut self, ui: &mut egui::Ui) {
        ui.label("Variables :");

        ui.horizontal_wrapped(|ui| {
            for (lettre, slot) in registre::snapshot().lettres() {
                if slot >= NB_VARIABLES {
                    continue;
                }
                ui.label(format!("{lettre} ="));
                let mut v = self.valeurs[slot];
                let resp = ui.add(egui::DragValue::new(&mut v).speed(0.1));
                if resp.changed() {
                    self.set_valeur(slot, v);
                }
                ui.add_space(8.0);
            }
        });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Valeur :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "valeur_out", &self.valeur, 1);
        } else {
            ui.monospace("indisponible");
        }

        ui.add_space(6.0);

        ui.label("Forme :");
        Self::champ_monospace(ui, "forme_out", &self.forme, 1);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(
                    ui,
                    "Multiplications implicites",
                    "demarche_implicite",
                    &self.demarche.implicite,
                );
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    /// Chaque touche insère exactement son libellé (un jeton = un caractère).
    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.entree.push_str(label);
            self.focus_entree = true;
        }
    }

    /// Parse via le noyau, évalue avec les valeurs courantes, dépose le tout dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        let table = registre::snapshot();
        match parse_equation_detail(s, &table) {
            Ok((f, d_noyau)) => {
                let valeur = format_valeur(f.evaluate(&self.valeurs));

                // Variables réellement lues par l’arbre (les autres valeurs sont ignorées)
                let lues: Vec<String> = f
                    .variables()
                    .into_iter()
                    .map(|slot| match table.letter_of(slot) {
                        Some(lettre) => lettre.to_string(),
                        None => format!("#{slot}"),
                    })
                    .collect();
                let lues = if lues.is_empty() {
                    "aucune".to_string()
                } else {
                    lues.join(", ")
                };

                let d_ui = Demarche {
                    jetons: d_noyau.jetons,
                    implicite: d_noyau.implicite,
                    arbre: d_noyau.arbre,
                    note: format!("{}\nVariables lues : {lues}", d_noyau.note),
                };
                self.set_resultats(valeur, f.format_pretty(), d_ui);
            }
            Err(msg) => self.set_erreur(msg),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}
