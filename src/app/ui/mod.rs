mod details;
mod dialogs;
mod panels;
mod tree_panel;
