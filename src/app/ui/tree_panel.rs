use eframe::egui::{self, RichText, Ui};

use crate::tree::{self, MatchMode, TreeNode, TreePath};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_tree_panel(&mut self, ui: &mut Ui) {
        ui.heading("Resources");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.tree_filter)
                    .hint_text("Filter")
                    .desired_width(ui.available_width() - 70.0),
            );
            let mut fuzzy = self.match_mode == MatchMode::Fuzzy;
            if ui.checkbox(&mut fuzzy, "Fuzzy").changed() {
                self.match_mode = if fuzzy {
                    MatchMode::Fuzzy
                } else {
                    MatchMode::Substring
                };
            }
        });
        self.refilter_tree();
        ui.separator();

        let mut clicked = None;
        let filter = self.tree_filter.clone();
        let expand = std::mem::take(&mut self.expand_tree);
        egui::ScrollArea::vertical()
            .id_salt("resource_tree_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut path = Vec::new();
                draw_node(
                    ui,
                    &self.filtered_tree,
                    &mut path,
                    &filter,
                    expand,
                    self.selected_path.as_ref(),
                    &mut clicked,
                );
            });

        if let Some(path) = clicked {
            self.session.select_tree_path(Some(&path));
            self.selected_path = Some(path);
        }
    }

    fn refilter_tree(&mut self) {
        if self.filtered_for.0 == self.tree_filter && self.filtered_for.1 == self.match_mode {
            return;
        }

        self.filtered_tree = tree::filter_tree(
            self.session.tree(),
            &self.tree_filter,
            self.match_mode,
            &tree::keep_all,
        );
        self.filtered_for = (self.tree_filter.clone(), self.match_mode);
        self.selected_path = None;
        self.expand_tree = true;
        self.session.select_tree_path(None);
    }
}

fn draw_node(
    ui: &mut Ui,
    node: &TreeNode,
    path: &mut Vec<String>,
    filter: &str,
    expand: bool,
    selected: Option<&TreePath>,
    clicked: &mut Option<TreePath>,
) {
    path.push(node.label().to_owned());
    let mut text = RichText::new(node.label());
    if tree::is_highlighted(node.label(), filter) {
        text = text.strong();
    }

    if node.is_leaf() && path.len() > 2 {
        let is_selected = selected.is_some_and(|selected| selected.labels() == path.as_slice());
        if ui.selectable_label(is_selected, text).clicked() {
            *clicked = Some(TreePath::new(path.clone()));
        }
    } else {
        egui::CollapsingHeader::new(text)
            .id_salt(path.join("\u{1f}"))
            .default_open(true)
            .open(expand.then_some(true))
            .show(ui, |ui| {
                for child in node.children() {
                    draw_node(ui, child, path, filter, expand, selected, clicked);
                }
            });
    }

    path.pop();
}
