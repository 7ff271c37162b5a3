use crate::config::Settings;
use crate::error::{RequestError, SolveError};
use crate::graph::network::{Network, NetworkKind, edges_to_text, parse_edges};
use crate::render::layout::LayoutKind;
use crate::render::surface::Canvas;
use crate::render::view::NetworkView;
use crate::scenario::lite::{self, ExerciseSettings};
use crate::scenario::statement;
use crate::simulation::playback::{PlaybackController, PlaybackEvent};
use crate::solver::SolverBackend;
use crate::solver::wire::NetworkRequest;
use crate::state::panels::EMPTY;
use crate::state::result::SolverResult;
use crate::state::sync::{Completion, Generated, RequestToken, ResultSynchronizer};
use crate::tui::tabs::{Panel, SurfaceId, TabCoordinator};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

const DEFAULT_EDGES: &str = "0 1 10
0 2 5
1 2 15
1 3 10
2 3 10
2 4 7
3 5 10
4 5 8
5 7 10
4 6 5
6 7 12";

const FORCE_ITERATIONS: usize = 300;
const SOLVER_PADDING: f64 = 30.0;
const LITE_PADDING: f64 = 20.0;

#[derive(Debug)]
pub enum AppEvent {
    Solved {
        token: RequestToken,
        outcome: Result<SolverResult, RequestError>,
    },
    Generated {
        token: RequestToken,
        outcome: Result<Network, RequestError>,
    },
    Health(Result<(), RequestError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    EditingEdges,
}

pub struct App<B: SolverBackend> {
    pub running: bool,
    backend: Arc<B>,
    settings: Settings,
    tabs: TabCoordinator,
    mode: Mode,
    solver: NetworkView<Canvas>,
    edges_text: String,
    lite: NetworkView<Canvas>,
    exercise: ExerciseSettings,
    exercise_text: String,
    statement: String,
    sync: ResultSynchronizer,
    playback: PlaybackController,
    notice: Option<Notice>,
    rng: StdRng,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    playback_tx: UnboundedSender<PlaybackEvent>,
    playback_rx: UnboundedReceiver<PlaybackEvent>,
}

impl<B: SolverBackend> App<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        let n = settings.initial_nodes;
        let mut network =
            Network::create_empty(NetworkKind::Solver, n, 0, n.saturating_sub(1));
        let edges = parse_edges(DEFAULT_EDGES).unwrap_or_default();
        network.set_edges(edges);

        let solver_layout = LayoutKind::Force {
            seed: settings.seed,
            iterations: FORCE_ITERATIONS,
        };
        let mut solver = NetworkView::new(network, solver_layout, SOLVER_PADDING, Canvas::new());
        solver.draw(None);

        let exercise = ExerciseSettings::new(settings.lite_min, settings.lite_max);
        let mut lite = NetworkView::new(
            lite::lite_network(exercise.source(), exercise.sink()),
            LayoutKind::Preset,
            LITE_PADDING,
            Canvas::new(),
        );
        lite.draw(None);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (playback_tx, playback_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            backend: Arc::new(backend),
            rng: StdRng::seed_from_u64(settings.seed),
            playback: PlaybackController::new(settings.timing),
            settings,
            tabs: TabCoordinator::new(),
            mode: Mode::Normal,
            solver,
            edges_text: DEFAULT_EDGES.to_string(),
            lite,
            exercise,
            exercise_text: String::new(),
            statement: EMPTY.to_string(),
            sync: ResultSynchronizer::new(),
            notice: None,
            events_tx,
            events_rx,
            playback_tx,
            playback_rx,
        }
    }

    pub fn tabs(&self) -> &TabCoordinator {
        &self.tabs
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn solver(&self) -> &NetworkView<Canvas> {
        &self.solver
    }

    pub fn lite(&self) -> &NetworkView<Canvas> {
        &self.lite
    }

    pub fn edges_text(&self) -> &str {
        &self.edges_text
    }

    pub fn exercise(&self) -> &ExerciseSettings {
        &self.exercise
    }

    pub fn exercise_text(&self) -> &str {
        &self.exercise_text
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn sync(&self) -> &ResultSynchronizer {
        &self.sync
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        });
    }

    pub fn probe_health(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::Health(backend.health().await));
        });
    }

    // ---- panels ----

    pub fn switch_panel(&mut self, panel: Panel) {
        let refit = self.tabs.switch(panel);
        self.refit(refit);
    }

    pub fn next_panel(&mut self) {
        let refit = self.tabs.next();
        self.refit(refit);
    }

    fn refit(&mut self, surface: Option<SurfaceId>) {
        match surface {
            Some(SurfaceId::Solver) => self.solver.adapter_mut().refit(),
            Some(SurfaceId::Lite) => self.lite.adapter_mut().refit(),
            None => {}
        }
    }

    // ---- solver network editing ----

    pub fn begin_edit(&mut self) {
        self.mode = Mode::EditingEdges;
    }

    pub fn edit_push(&mut self, c: char) {
        self.edges_text.push(c);
    }

    pub fn edit_backspace(&mut self) {
        self.edges_text.pop();
    }

    /// Leaves edit mode and applies the edge text to the solver network.
    pub fn commit_edit(&mut self) {
        self.mode = Mode::Normal;
        if self.apply_edges_text() {
            self.redraw_solver();
        }
    }

    fn apply_edges_text(&mut self) -> bool {
        match parse_edges(&self.edges_text) {
            Ok(edges) => {
                self.solver.network_mut().set_edges(edges);
                true
            }
            Err(err) => {
                self.error(format!("Invalid edges: {err}"));
                false
            }
        }
    }

    pub fn adjust_nodes(&mut self, delta: isize) {
        let current = self.solver.network();
        let n = current.node_count().saturating_add_signed(delta).max(2);
        let mut network = Network::create_empty(
            NetworkKind::Solver,
            n,
            current.source().index(),
            current.sink().index(),
        );
        network.set_edges(current.edges().to_vec());
        self.solver.replace(network);
        self.redraw_solver();
    }

    pub fn shift_source(&mut self, delta: isize) {
        let net = self.solver.network();
        let source = shift(net.source().index(), delta, net.node_count());
        let sink = net.sink().index();
        self.solver.network_mut().set_terminals(source, sink);
    }

    pub fn shift_sink(&mut self, delta: isize) {
        let net = self.solver.network();
        let sink = shift(net.sink().index(), delta, net.node_count());
        let source = net.source().index();
        self.solver.network_mut().set_terminals(source, sink);
    }

    fn redraw_solver(&mut self) {
        let overlay = self
            .sync
            .resolved()
            .filter(|r| r.network() == self.solver.network())
            .map(|r| Arc::clone(r.result()));
        self.solver.draw(overlay.as_deref());
    }

    // ---- solving ----

    pub fn solve(&mut self) {
        if self.sync.is_pending() {
            self.error(SolveError::Busy.to_string());
            return;
        }
        if self.apply_edges_text() {
            self.submit();
        }
    }

    fn submit(&mut self) {
        let ticket = match self.sync.begin(self.solver.network()) {
            Ok(ticket) => ticket,
            Err(SolveError::Invalid(err)) => {
                self.error(format!("Invalid network: {err}"));
                return;
            }
            Err(err) => {
                self.error(err.to_string());
                return;
            }
        };
        self.info("Solving…");
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        let request = NetworkRequest::from(&ticket.network);
        tokio::spawn(async move {
            let outcome = backend.solve(request).await;
            let _ = tx.send(AppEvent::Solved {
                token: ticket.token,
                outcome,
            });
        });
    }

    pub fn generate_random(&mut self) {
        let mut params = self.settings.random;
        params.n = self.solver.network().node_count();
        let token = match self.sync.begin_random(params.n) {
            Ok(token) => token,
            Err(SolveError::Invalid(err)) => {
                self.error(format!("Invalid network: {err}"));
                return;
            }
            Err(err) => {
                self.error(err.to_string());
                return;
            }
        };
        self.info("Requesting random network…");
        let backend = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.random_network(params).await;
            let _ = tx.send(AppEvent::Generated { token, outcome });
        });
    }

    pub fn clear_all(&mut self) {
        self.cancel_animation();
        self.sync.reset();
        self.solver
            .replace(Network::create_empty(NetworkKind::Solver, 8, 0, 7));
        self.edges_text.clear();
        self.statement = EMPTY.to_string();
        self.solver.adapter_mut().clear();
        self.switch_panel(Panel::Visualization);
        self.info("Cleared");
    }

    // ---- statements ----

    pub fn show_formal(&mut self) {
        if self.apply_edges_text() {
            self.statement = statement::formal(self.solver.network());
            self.switch_panel(Panel::Statement);
        }
    }

    pub fn show_narrative(&mut self) {
        if self.apply_edges_text() {
            let result = self
                .sync
                .resolved()
                .filter(|r| r.network() == self.solver.network())
                .map(|r| Arc::clone(r.result()));
            self.statement = statement::narrative(self.solver.network(), result.as_deref());
            self.switch_panel(Panel::Statement);
        }
    }

    // ---- playback ----

    pub fn animate(&mut self) {
        if self.sync.is_pending() {
            self.error(SolveError::Busy.to_string());
            return;
        }
        match self
            .playback
            .start(self.sync.result(), self.playback_tx.clone())
        {
            Ok(_) => self.info("Animating augmenting paths… (c to cancel)"),
            Err(err) => self.error(err.to_string()),
        }
    }

    pub fn cancel_animation(&mut self) {
        if self.playback.cancel() {
            self.solver.adapter_mut().clear_highlights();
            self.info("Animation cancelled");
        }
    }

    // ---- exercise ----

    pub fn new_exercise(&mut self) {
        let min = self.exercise.cap_min();
        let max = self.exercise.cap_max();
        match lite::randomize(self.lite.network(), min, max, &mut self.rng) {
            Ok(mut network) => {
                network.set_terminals(self.exercise.source(), self.exercise.sink());
                self.lite.replace(network);
                self.lite.draw(None);
                self.describe_exercise();
            }
            Err(err) => self.error(format!("Cannot generate exercise: {err}")),
        }
    }

    pub fn describe_exercise(&mut self) {
        let net = self.lite.network();
        self.exercise_text = statement::describe(net, net.source(), net.sink());
    }

    pub fn shift_exercise_source(&mut self, delta: isize) {
        self.exercise.shift_source(delta);
        self.sync_exercise_terminals();
    }

    pub fn shift_exercise_sink(&mut self, delta: isize) {
        self.exercise.shift_sink(delta);
        self.sync_exercise_terminals();
    }

    fn sync_exercise_terminals(&mut self) {
        let (s, t) = (self.exercise.source(), self.exercise.sink());
        self.lite.network_mut().set_terminals(s, t);
    }

    pub fn adjust_exercise_min(&mut self, delta: i64) {
        self.exercise.adjust_min(delta);
    }

    pub fn adjust_exercise_max(&mut self, delta: i64) {
        self.exercise.adjust_max(delta);
    }

    pub fn use_in_solver(&mut self) {
        if self.sync.is_pending() {
            self.error(SolveError::Busy.to_string());
            return;
        }
        let network = lite::promote(self.lite.network());
        info!(
            source = network.source().index(),
            sink = network.sink().index(),
            "exercise promoted"
        );
        self.edges_text = edges_to_text(network.edges());
        self.solver.replace(network);
        self.redraw_solver();
        self.submit();
    }

    // ---- events ----

    /// Applies every queued background event without blocking.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
        while let Ok(event) = self.playback_rx.try_recv() {
            self.handle_playback(event);
        }
    }

    /// Waits for and applies one background event.
    pub async fn next_event(&mut self) {
        tokio::select! {
            Some(event) = self.events_rx.recv() => self.handle_event(event),
            Some(event) = self.playback_rx.recv() => self.handle_playback(event),
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Solved { token, outcome } => match self.sync.complete(token, outcome) {
                Completion::Resolved => self.on_resolved(),
                Completion::Failed(reason) => self.error(format!("Solve failed: {reason}")),
                Completion::Stale => {}
            },
            AppEvent::Generated { token, outcome } => {
                match self.sync.complete_random(token, outcome) {
                    Generated::Network(network) => {
                        // an edit in progress is superseded by the generated network
                        self.mode = Mode::Normal;
                        self.edges_text = network.edges_text();
                        self.solver.replace(network);
                        self.submit();
                    }
                    Generated::Failed(reason) => {
                        self.error(format!("Random network failed: {reason}"))
                    }
                    Generated::Stale => {}
                }
            }
            AppEvent::Health(Ok(())) => self.info("Solver service is up"),
            AppEvent::Health(Err(err)) => self.error(format!("Solver service unreachable: {err}")),
        }
    }

    fn on_resolved(&mut self) {
        let Some(resolved) = self.sync.resolved() else {
            return;
        };
        let (network, result) = (resolved.network().clone(), Arc::clone(resolved.result()));
        self.solver.draw_network(&network, Some(result.as_ref()));
        self.statement = statement::narrative(&network, Some(result.as_ref()));
        self.switch_panel(Panel::Visualization);
        self.info(format!("Maximum flow = {}", result.max_flow()));
    }

    fn handle_playback(&mut self, event: PlaybackEvent) {
        if !self.playback.is_current(event.run()) {
            return;
        }
        match event {
            PlaybackEvent::Highlight { path, .. } => {
                self.solver.adapter_mut().set_highlight(&path, true)
            }
            PlaybackEvent::Unhighlight { path, .. } => {
                self.solver.adapter_mut().set_highlight(&path, false)
            }
            PlaybackEvent::Finished { run, .. } => {
                self.playback.finish(run);
                self.info("Animation finished");
            }
        }
    }
}

fn shift(current: usize, delta: isize, n: usize) -> usize {
    (current as isize + delta).rem_euclid(n.max(1) as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::{Edge, EdgeKey};
    use crate::graph::node::NodeId;
    use crate::render::surface::VisualClass;
    use crate::solver::wire::RandomParams;
    use crate::state::result::{AugmentingStep, FlowAssignment, MinCut};
    use crate::state::sync::SyncState;
    use std::collections::{BTreeSet, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeBackend {
        solves: AtomicUsize,
        randoms: AtomicUsize,
        solve_replies: Mutex<VecDeque<Result<SolverResult, u16>>>,
        random_replies: Mutex<VecDeque<Result<Network, u16>>>,
    }

    impl FakeBackend {
        fn with_solves(replies: Vec<Result<SolverResult, u16>>) -> Self {
            Self {
                solve_replies: Mutex::new(replies.into()),
                ..Default::default()
            }
        }
    }

    fn status(code: u16) -> RequestError {
        RequestError::Status {
            status: code,
            body: format!("status {code}"),
        }
    }

    impl SolverBackend for FakeBackend {
        async fn solve(&self, _request: NetworkRequest) -> Result<SolverResult, RequestError> {
            self.solves.fetch_add(1, Ordering::SeqCst);
            let reply = self.solve_replies.lock().unwrap().pop_front();
            reply.unwrap_or(Err(599)).map_err(status)
        }

        async fn random_network(&self, _params: RandomParams) -> Result<Network, RequestError> {
            self.randoms.fetch_add(1, Ordering::SeqCst);
            let reply = self.random_replies.lock().unwrap().pop_front();
            reply.unwrap_or(Err(599)).map_err(status)
        }

        async fn health(&self) -> Result<(), RequestError> {
            Ok(())
        }
    }

    /// The 4-node worked example, padded to the solver's minimum size.
    fn example_edges() -> &'static str {
        "0 1 10\n0 2 5\n1 3 10\n2 3 10"
    }

    fn example_result() -> SolverResult {
        SolverResult::new(
            10,
            vec![AugmentingStep::new(
                vec![EdgeKey::new(0, 1), EdgeKey::new(1, 3)],
                10,
                10,
            )],
            vec![
                FlowAssignment { edge: EdgeKey::new(0, 1), flow: 10 },
                FlowAssignment { edge: EdgeKey::new(0, 2), flow: 0 },
                FlowAssignment { edge: EdgeKey::new(1, 3), flow: 10 },
                FlowAssignment { edge: EdgeKey::new(2, 3), flow: 0 },
            ],
            MinCut::new(
                vec![NodeId(0)],
                vec![NodeId(1), NodeId(2), NodeId(3)],
                vec![EdgeKey::new(0, 1), EdgeKey::new(0, 2)],
            ),
        )
    }

    fn app(backend: FakeBackend) -> App<FakeBackend> {
        let mut app = App::new(backend, Settings::default());
        app.edges_text = example_edges().to_string();
        app.solver.network_mut().set_terminals(0, 3);
        app
    }

    fn solver_canvas(app: &App<FakeBackend>) -> &Canvas {
        app.solver().surface().unwrap()
    }

    #[tokio::test]
    async fn test_worked_example() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.switch_panel(Panel::Steps);
        app.solve();
        assert!(app.sync().is_pending());
        app.next_event().await;

        assert_eq!(&SyncState::Resolved, app.sync().state());
        assert_eq!("Maximum flow = 10", app.sync().panels().summary());
        assert_eq!(
            vec!["(0→1) = 10", "(0→2) = 0", "(1→3) = 10", "(2→3) = 0"],
            app.sync().panels().assignments()
        );
        assert_eq!(Panel::Visualization, app.tabs().active());
        assert_eq!(
            BTreeSet::from([EdgeKey::new(0, 1), EdgeKey::new(0, 2)]),
            solver_canvas(&app).edges_with(VisualClass::Cut)
        );
        assert!(app.statement().contains("Obtained value (for comparison): 10"));
    }

    #[tokio::test]
    async fn test_oversized_network_rejected_locally() {
        let mut app = app(FakeBackend::default());
        app.adjust_nodes(12);
        assert_eq!(20, app.solver().network().node_count());

        app.solve();

        assert_eq!(0, app.backend.solves.load(Ordering::SeqCst));
        assert_eq!(&SyncState::Idle, app.sync().state());
        let notice = app.notice().unwrap();
        assert_eq!(NoticeLevel::Error, notice.level);
        assert!(notice.text.contains("node count 20"));
    }

    #[tokio::test]
    async fn test_failed_solve_keeps_previous_panels() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result()), Err(500)]));
        app.solve();
        app.next_event().await;
        let panels = app.sync().panels().clone();

        app.solve();
        app.next_event().await;

        assert_eq!(&panels, app.sync().panels());
        assert_eq!(10, app.sync().result().unwrap().max_flow());
        let notice = app.notice().unwrap();
        assert_eq!(NoticeLevel::Error, notice.level);
        assert!(notice.text.starts_with("Solve failed"));
        assert_eq!(2, app.backend.solves.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_solve_rejected_while_pending() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.solve();
        app.solve();
        app.generate_random();
        assert!(app.notice().unwrap().text.contains("already pending"));

        app.next_event().await;
        assert_eq!(1, app.backend.solves.load(Ordering::SeqCst));
        assert_eq!(0, app.backend.randoms.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_malformed_edges_never_sent() {
        let mut app = app(FakeBackend::default());
        app.edges_text = "0 1\n".to_string();
        app.solve();
        assert_eq!(0, app.backend.solves.load(Ordering::SeqCst));
        assert!(app.notice().unwrap().text.contains("line 1"));
    }

    #[tokio::test]
    async fn test_switching_panels_preserves_state() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.solve();
        app.next_event().await;
        let network = app.solver().network().clone();
        let result = Arc::clone(app.sync().result().unwrap());
        let solver_edges = solver_canvas(&app).edges().clone();
        let lite_edges = app.lite().surface().unwrap().edges().clone();

        for panel in Panel::ALL.iter().rev().chain(Panel::ALL.iter()) {
            app.switch_panel(*panel);
        }

        assert_eq!(&network, app.solver().network());
        assert_eq!(&result, app.sync().result().unwrap());
        assert_eq!(&solver_edges, solver_canvas(&app).edges());
        assert_eq!(&lite_edges, app.lite().surface().unwrap().edges());
    }

    #[tokio::test]
    async fn test_panel_switch_refits_surface() {
        let mut app = app(FakeBackend::default());
        let solver_fits = solver_canvas(&app).fit_count();
        let lite_fits = app.lite().surface().unwrap().fit_count();

        app.switch_panel(Panel::Exercise);
        app.switch_panel(Panel::Summary);
        app.switch_panel(Panel::Visualization);

        assert_eq!(solver_fits + 1, solver_canvas(&app).fit_count());
        assert_eq!(lite_fits + 1, app.lite().surface().unwrap().fit_count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_leaves_no_highlight() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.solve();
        app.next_event().await;

        app.animate();
        assert!(app.playback().is_running());
        app.next_event().await;
        assert_eq!(
            BTreeSet::from([EdgeKey::new(0, 1), EdgeKey::new(1, 3)]),
            solver_canvas(&app).edges_with(VisualClass::Highlight)
        );
        while app.playback().is_running() {
            app.next_event().await;
        }
        assert!(solver_canvas(&app).edges_with(VisualClass::Highlight).is_empty());
        // the cut overlay survives playback
        assert_eq!(2, solver_canvas(&app).edges_with(VisualClass::Cut).len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_highlight() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.solve();
        app.next_event().await;
        app.animate();
        app.next_event().await;

        app.cancel_animation();
        assert!(solver_canvas(&app).edges_with(VisualClass::Highlight).is_empty());

        // events of the cancelled run are ignored
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        app.pump();
        assert!(solver_canvas(&app).edges_with(VisualClass::Highlight).is_empty());
        assert!(!app.playback().is_running());
    }

    #[tokio::test]
    async fn test_animate_without_result() {
        let mut app = app(FakeBackend::default());
        app.animate();
        assert_eq!(NoticeLevel::Error, app.notice().unwrap().level);
        assert!(app.notice().unwrap().text.contains("nothing to animate"));
    }

    #[tokio::test]
    async fn test_random_network_chains_into_solve() {
        let mut generated = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        generated.set_edges(vec![Edge::new(0, 7, 4)]);
        let backend = FakeBackend {
            random_replies: Mutex::new(VecDeque::from([Ok(generated.clone())])),
            solve_replies: Mutex::new(VecDeque::from([Ok(example_result())])),
            ..Default::default()
        };
        let mut app = app(backend);

        app.generate_random();
        app.next_event().await;
        assert_eq!("0 7 4", app.edges_text());
        assert_eq!(&generated, app.solver().network());
        assert!(app.sync().is_pending());

        app.next_event().await;
        assert_eq!(&SyncState::Resolved, app.sync().state());
        assert_eq!(&generated, app.sync().resolved().unwrap().network());
    }

    #[tokio::test]
    async fn test_oversized_random_request_rejected_locally() {
        let mut app = app(FakeBackend::default());
        app.adjust_nodes(12);

        app.generate_random();

        assert_eq!(0, app.backend.randoms.load(Ordering::SeqCst));
        assert!(!app.sync().is_pending());
        let notice = app.notice().unwrap();
        assert_eq!(NoticeLevel::Error, notice.level);
        assert!(notice.text.contains("node count 20"));
    }

    #[tokio::test]
    async fn test_generated_network_ends_edit() {
        let mut generated = Network::create_empty(NetworkKind::Solver, 8, 0, 7);
        generated.set_edges(vec![Edge::new(0, 7, 4)]);
        let backend = FakeBackend {
            random_replies: Mutex::new(VecDeque::from([Ok(generated)])),
            ..Default::default()
        };
        let mut app = app(backend);

        app.generate_random();
        app.begin_edit();
        app.edit_push('9');
        app.next_event().await;

        assert_eq!(Mode::Normal, app.mode());
        assert_eq!("0 7 4", app.edges_text());
        assert_eq!(&[Edge::new(0, 7, 4)], app.solver().network().edges());
    }

    #[tokio::test]
    async fn test_random_failure_keeps_network() {
        let mut app = app(FakeBackend::default());
        let before = app.solver().network().clone();
        app.generate_random();
        app.next_event().await;

        assert_eq!(&before, app.solver().network());
        assert!(app.notice().unwrap().text.starts_with("Random network failed"));
        assert!(!app.sync().is_pending());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.solve();
        app.next_event().await;
        app.switch_panel(Panel::Summary);

        app.clear_all();

        assert!(app.sync().result().is_none());
        assert_eq!("", app.edges_text());
        assert_eq!(EMPTY, app.statement());
        assert_eq!(Panel::Visualization, app.tabs().active());
        assert!(solver_canvas(&app).nodes().is_empty());
        assert_eq!(8, app.solver().network().node_count());
    }

    #[tokio::test]
    async fn test_exercise_flow_is_independent_of_solver() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        let solver_before = app.solver().network().clone();

        app.switch_panel(Panel::Exercise);
        app.new_exercise();
        let lite = app.lite().network();
        assert!(lite.edges().iter().all(|e| (3..=10).contains(&e.capacity())));
        assert!(app.exercise_text().contains("• O→A ; "));
        assert_eq!(&solver_before, app.solver().network());

        app.adjust_exercise_min(20);
        app.new_exercise();
        assert!(app.notice().unwrap().text.contains("Cannot generate exercise"));
        assert_eq!(&solver_before, app.solver().network());
    }

    #[tokio::test]
    async fn test_use_in_solver() {
        let mut app = app(FakeBackend::with_solves(vec![Ok(example_result())]));
        app.shift_exercise_sink(-1);
        app.use_in_solver();

        let solver = app.solver().network();
        assert_eq!(8, solver.node_count());
        assert_eq!(NodeId(0), solver.source());
        assert_eq!(NodeId(5), solver.sink());
        assert_eq!(12, solver.edges().len());
        assert!(app.sync().is_pending());
        assert_eq!(app.lite().network().edges(), solver.edges());

        app.next_event().await;
        assert_eq!(1, app.backend.solves.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_edit_commit_redraws() {
        let mut app = app(FakeBackend::default());
        app.begin_edit();
        assert_eq!(Mode::EditingEdges, app.mode());
        app.edges_text.clear();
        "0 7 9".chars().for_each(|c| app.edit_push(c));
        app.edit_push('x');
        app.edit_backspace();
        app.commit_edit();

        assert_eq!(Mode::Normal, app.mode());
        assert_eq!(&[Edge::new(0, 7, 9)], app.solver().network().edges());
        assert_eq!(
            "0→7 cap=9",
            solver_canvas(&app).edge(EdgeKey::new(0, 7)).unwrap().label()
        );
    }

    #[tokio::test]
    async fn test_statements() {
        let mut app = app(FakeBackend::default());
        app.show_formal();
        assert_eq!(Panel::Statement, app.tabs().active());
        assert!(app.statement().contains("(0,1; 10)"));
        app.show_narrative();
        assert!(app.statement().starts_with("Statement (narrative):"));
    }
}
