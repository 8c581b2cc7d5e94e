use std::sync::mpsc::Receiver;

use eframe::egui::{self, Context, Rect};
use tracing::{info, warn};

use crate::distance::{self, DistanceRow};
use crate::layout::LayoutKind;
use crate::picking::PickEvent;
use crate::prefs::PreferenceStore;
use crate::rdf::{EdgeId, NodeId, NodeKind};
use crate::session::{LoadedModel, Session};
use crate::tree::{MatchMode, TreeNode, TreePath};
use crate::viewer::{VIEWER_SIZE, ViewTransform};

mod graph;
mod render_utils;
mod task;
mod ui;

use self::task::{BackgroundTask, TaskOutput, TaskPoll};

pub struct SnailNavigatorApp {
    prefs: PreferenceStore,
    recent_uris: Vec<String>,
    seed: u64,
    view: Option<Box<ViewModel>>,
    task: Option<BackgroundTask>,
    error: Option<String>,
    open_dialog: Option<OpenDialog>,
    distance_window: Option<DistanceWindow>,
    show_about: bool,
}

struct OpenDialog {
    uri: String,
}

struct DistanceWindow {
    uri: String,
    rows: Vec<DistanceRow>,
    open: bool,
}

struct ViewModel {
    session: Session,
    transform: ViewTransform,
    viewport: Option<Rect>,
    tree_filter: String,
    match_mode: MatchMode,
    filtered_tree: TreeNode,
    filtered_for: (String, MatchMode),
    expand_tree: bool,
    selected_path: Option<TreePath>,
    vertex_events: Receiver<PickEvent<NodeId>>,
    edge_events: Receiver<PickEvent<EdgeId>>,
    vertex_details: Vec<VertexDetail>,
    edge_details: Vec<EdgeDetail>,
    dragging: Option<NodeId>,
    show_edge_labels: bool,
}

struct VertexDetail {
    kind: NodeKind,
    text: String,
}

struct EdgeDetail {
    subject: String,
    predicate: String,
    object: String,
}

impl SnailNavigatorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        prefs: PreferenceStore,
        seed: u64,
        initial_uri: Option<String>,
    ) -> Self {
        let mut app = Self::with_preferences(prefs, seed);
        if let Some(uri) = initial_uri {
            app.start_load(uri);
        }
        app
    }

    fn with_preferences(prefs: PreferenceStore, seed: u64) -> Self {
        let recent_uris = prefs.recent_uris();
        Self {
            prefs,
            recent_uris,
            seed,
            view: None,
            task: None,
            error: None,
            open_dialog: None,
            distance_window: None,
            show_about: false,
        }
    }

    pub(in crate::app) fn start_load(&mut self, uri: String) {
        let uri = uri.trim().to_owned();
        if uri.is_empty() || self.task.is_some() {
            return;
        }

        info!(%uri, "loading model");
        let message = format!("Loading {uri}...");
        self.task = Some(BackgroundTask::spawn(message, move || {
            LoadedModel::load(&uri).map(TaskOutput::Loaded)
        }));
    }

    pub(in crate::app) fn start_distances(&mut self) {
        if self.task.is_some() {
            return;
        }
        let Some(view) = &self.view else {
            self.error = Some("Open a model before computing measures.".to_owned());
            return;
        };

        let graph = view.session.graph().clone();
        let uri = view.session.uri().to_owned();
        self.task = Some(BackgroundTask::spawn("Computing distances...", move || {
            let rows = distance::average_distances(&graph);
            Ok(TaskOutput::Distances { uri, rows })
        }));
    }

    fn poll_task(&mut self) {
        let Some(task) = &self.task else {
            return;
        };

        let TaskPoll::Finished(result) = task.poll() else {
            return;
        };
        self.task = None;
        self.finish_task(result);
    }

    /// Only a successful load replaces the open session.
    fn finish_task(&mut self, result: Result<TaskOutput, String>) {
        match result {
            Ok(TaskOutput::Loaded(model)) => self.apply_loaded(model),
            Ok(TaskOutput::Distances { uri, rows }) => {
                self.distance_window = Some(DistanceWindow {
                    uri,
                    rows,
                    open: true,
                });
            }
            Err(error) => {
                warn!(%error, "background task failed");
                self.error = Some(error);
            }
        }
    }

    fn apply_loaded(&mut self, model: LoadedModel) {
        let uri = model.uri.clone();
        let kind = self
            .view
            .as_ref()
            .map(|view| view.session.layout_kind())
            .unwrap_or(LayoutKind::Isom);

        let session = Session::new(model, kind, VIEWER_SIZE, self.seed);
        self.view = Some(Box::new(ViewModel::new(session)));
        self.distance_window = None;

        match self.prefs.remember_uri(&uri) {
            Ok(recent) => self.recent_uris = recent,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to save recent URIs");
                crate::prefs::push_recent(&mut self.recent_uris, &uri);
            }
        }
    }

    fn open_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });

        if let Some(path) = dropped {
            self.start_load(path.display().to_string());
        }
    }
}

impl eframe::App for SnailNavigatorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_task();
        self.open_dropped_files(ctx);

        self.draw_menu_bar(ctx);

        match self.view.as_mut() {
            Some(view) => view.show(ctx),
            None => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("No model loaded");
                        ui.add_space(8.0);
                        ui.label("Use File → Open or drop an RDF file on the window.");
                    });
                });
            }
        }

        self.draw_open_dialog(ctx);
        self.draw_distance_window(ctx);
        self.draw_about(ctx);
        self.draw_error(ctx);
        self.draw_glass_pane(ctx);
    }
}
