#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use carousel_rs::api::{
    CarouselController, CarouselEvent, CarouselServices, CarouselSettings, EngineEventKind,
    EventPoster, ScriptReply, TopicReply, TopicRequest,
};
use carousel_rs::core::ContentItem;
use carousel_rs::error::{EngineFault, FetchError, ScriptLoadFailure};
use carousel_rs::platform::{
    CarouselHost, ElementHandle, EngineFactory, EngineOptions, GlobalScope, ModuleBinding,
    ObserverHandle, ScriptFetcher, SlidingEngine, TopicSource, VisibilityOptions,
};
use carousel_rs::render::NullRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const VIEWPORT: ElementHandle = ElementHandle(7);

#[derive(Debug, Default)]
pub struct HostState {
    pub viewport: Option<ElementHandle>,
    pub viewport_width: f64,
    pub is_mobile: bool,
    pub styles: HashMap<String, String>,
    pub root_property_writes: Vec<(String, String)>,
    pub classes: BTreeMap<String, bool>,
    pub visibility_options: Option<VisibilityOptions>,
    pub visibility_poster: Option<EventPoster>,
    pub size_poster: Option<EventPoster>,
    pub media_poster: Option<EventPoster>,
    pub media_query: Option<String>,
    pub connected: Vec<&'static str>,
    pub disconnected: Vec<&'static str>,
}

pub struct FakeObserver {
    name: &'static str,
    state: Rc<RefCell<HostState>>,
}

impl ObserverHandle for FakeObserver {
    fn disconnect(&mut self) {
        self.state.borrow_mut().disconnected.push(self.name);
    }
}

pub struct FakeHost {
    pub state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    fn observer(&self, name: &'static str) -> Box<dyn ObserverHandle> {
        self.state.borrow_mut().connected.push(name);
        Box::new(FakeObserver {
            name,
            state: Rc::clone(&self.state),
        })
    }
}

impl CarouselHost for FakeHost {
    fn viewport_element(&self) -> Option<ElementHandle> {
        self.state.borrow().viewport
    }

    fn viewport_width(&self) -> f64 {
        self.state.borrow().viewport_width
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    fn set_root_property(&mut self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .root_property_writes
            .push((property.to_owned(), value.to_owned()));
    }

    fn set_container_class(&mut self, class: &str, enabled: bool) {
        self.state
            .borrow_mut()
            .classes
            .insert(class.to_owned(), enabled);
    }

    fn observe_visibility(
        &mut self,
        options: VisibilityOptions,
        poster: EventPoster,
    ) -> Box<dyn ObserverHandle> {
        {
            let mut state = self.state.borrow_mut();
            state.visibility_options = Some(options);
            state.visibility_poster = Some(poster);
        }
        self.observer("visibility")
    }

    fn observe_viewport_size(&mut self, poster: EventPoster) -> Box<dyn ObserverHandle> {
        self.state.borrow_mut().size_poster = Some(poster);
        self.observer("size")
    }

    fn watch_media_query(
        &mut self,
        query: &str,
        poster: EventPoster,
    ) -> (bool, Box<dyn ObserverHandle>) {
        let is_mobile = {
            let mut state = self.state.borrow_mut();
            state.media_query = Some(query.to_owned());
            state.media_poster = Some(poster);
            state.is_mobile
        };
        (is_mobile, self.observer("media"))
    }
}

#[derive(Debug, Default)]
pub struct TopicLog {
    pub requests: Vec<TopicRequest>,
    pub pending: VecDeque<TopicReply>,
    /// When set, every fetch resolves immediately with a clone of this.
    pub auto_reply: Option<Result<Vec<ContentItem>, FetchError>>,
}

pub struct FakeTopics {
    log: Rc<RefCell<TopicLog>>,
}

impl TopicSource for FakeTopics {
    fn fetch(&mut self, request: &TopicRequest, reply: TopicReply) {
        let mut log = self.log.borrow_mut();
        log.requests.push(request.clone());
        match log.auto_reply.clone() {
            Some(result) => reply.resolve(result),
            None => log.pending.push_back(reply),
        }
    }
}

#[derive(Default)]
pub struct FakeScope {
    pub bindings: Vec<ModuleBinding>,
    pub capability: Option<Rc<dyn EngineFactory>>,
    pub takes: usize,
    pub restores: usize,
}

impl FakeScope {
    pub fn with_module_globals() -> Self {
        Self {
            bindings: vec![
                ModuleBinding::new("define", Box::new("amd-loader")),
                ModuleBinding::new("module", Box::new(1_u8)),
            ],
            ..Self::default()
        }
    }

    pub fn binding_names(&self) -> Vec<String> {
        self.bindings.iter().map(|binding| binding.name.clone()).collect()
    }
}

impl GlobalScope for FakeScope {
    fn take_module_bindings(&mut self) -> Vec<ModuleBinding> {
        self.takes += 1;
        std::mem::take(&mut self.bindings)
    }

    fn restore_module_bindings(&mut self, bindings: Vec<ModuleBinding>) {
        self.restores += 1;
        self.bindings.extend(bindings);
    }

    fn engine_capability(&self) -> Option<Rc<dyn EngineFactory>> {
        self.capability.clone()
    }
}

#[derive(Default)]
pub struct ScriptLog {
    pub urls: Vec<String>,
    pub pending: VecDeque<ScriptReply>,
    /// Whether the module globals were absent while the script was fetched.
    pub suppressed_during_fetch: Vec<bool>,
}

pub struct FakeScripts {
    log: Rc<RefCell<ScriptLog>>,
    scope: Rc<RefCell<FakeScope>>,
}

pub fn recording_fetcher(
    scope: &Rc<RefCell<FakeScope>>,
) -> (Box<dyn ScriptFetcher>, Rc<RefCell<ScriptLog>>) {
    let log = Rc::new(RefCell::new(ScriptLog::default()));
    let fetcher = FakeScripts {
        log: Rc::clone(&log),
        scope: Rc::clone(scope),
    };
    (Box::new(fetcher), log)
}

impl ScriptFetcher for FakeScripts {
    fn load_script(&mut self, url: &str, reply: ScriptReply) {
        let suppressed = self.scope.borrow().bindings.is_empty();
        let mut log = self.log.borrow_mut();
        log.urls.push(url.to_owned());
        log.suppressed_during_fetch.push(suppressed);
        log.pending.push_back(reply);
    }
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub slide_count: usize,
    pub created: Vec<EngineOptions>,
    pub viewports: Vec<ElementHandle>,
    pub destroyed: usize,
    pub live: usize,
    pub selected: usize,
    pub snap_count: usize,
    pub navigation: Vec<String>,
    pub subscriptions: Vec<EngineEventKind>,
    pub posters: Vec<EventPoster>,
    pub fail_create: bool,
    pub fault_reads: bool,
    pub fault_navigation: bool,
    pub fault_destroy: bool,
}

impl EngineLog {
    fn emit(&self, kind: EngineEventKind) {
        for poster in &self.posters {
            poster.post(CarouselEvent::Engine(kind));
        }
    }
}

pub struct FakeEngineFactory {
    pub log: Rc<RefCell<EngineLog>>,
}

impl EngineFactory for FakeEngineFactory {
    fn create(
        &self,
        viewport: ElementHandle,
        options: &EngineOptions,
    ) -> Result<Box<dyn SlidingEngine>, EngineFault> {
        let mut log = self.log.borrow_mut();
        if log.fail_create {
            return Err(EngineFault::new("constructor threw"));
        }
        let per_snap = options.slides_to_scroll.max(1) as usize;
        log.snap_count = log.slide_count.div_ceil(per_snap);
        log.selected = 0;
        log.live += 1;
        log.posters.clear();
        log.created.push(*options);
        log.viewports.push(viewport);
        Ok(Box::new(FakeEngine {
            log: Rc::clone(&self.log),
        }))
    }
}

pub struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
    fn navigate(
        &mut self,
        action: &str,
        target: impl FnOnce(&EngineLog) -> usize,
    ) -> Result<(), EngineFault> {
        let mut log = self.log.borrow_mut();
        log.navigation.push(action.to_owned());
        if log.fault_navigation {
            return Err(EngineFault::new(format!("{action} threw")));
        }
        let next = target(&log).min(log.snap_count.saturating_sub(1));
        if next != log.selected {
            log.selected = next;
            log.emit(EngineEventKind::Select);
        }
        Ok(())
    }

    fn read<T>(&self, value: impl FnOnce(&EngineLog) -> T) -> Result<T, EngineFault> {
        let log = self.log.borrow();
        if log.fault_reads {
            return Err(EngineFault::new("read threw"));
        }
        Ok(value(&log))
    }
}

impl SlidingEngine for FakeEngine {
    fn scroll_prev(&mut self) -> Result<(), EngineFault> {
        self.navigate("prev", |log| log.selected.saturating_sub(1))
    }

    fn scroll_next(&mut self) -> Result<(), EngineFault> {
        self.navigate("next", |log| log.selected + 1)
    }

    fn scroll_to(&mut self, index: usize) -> Result<(), EngineFault> {
        self.navigate("to", |_| index)
    }

    fn selected_scroll_snap(&self) -> Result<usize, EngineFault> {
        self.read(|log| log.selected)
    }

    fn can_scroll_prev(&self) -> Result<bool, EngineFault> {
        self.read(|log| log.selected > 0)
    }

    fn can_scroll_next(&self) -> Result<bool, EngineFault> {
        self.read(|log| log.selected + 1 < log.snap_count)
    }

    fn scroll_snap_list(&self) -> Result<Vec<f64>, EngineFault> {
        self.read(|log| {
            let count = log.snap_count.max(1);
            (0..log.snap_count)
                .map(|index| index as f64 / count as f64)
                .collect()
        })
    }

    fn on(&mut self, kind: EngineEventKind, poster: EventPoster) -> Result<(), EngineFault> {
        let mut log = self.log.borrow_mut();
        log.subscriptions.push(kind);
        if kind == EngineEventKind::Select {
            log.posters.push(poster);
        }
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), EngineFault> {
        let mut log = self.log.borrow_mut();
        log.destroyed += 1;
        log.live = log.live.saturating_sub(1);
        log.posters.clear();
        if log.fault_destroy {
            return Err(EngineFault::new("destroy threw"));
        }
        Ok(())
    }
}

/// Shared handles onto every fake a controller was built with.
pub struct Harness {
    pub host: Rc<RefCell<HostState>>,
    pub topics: Rc<RefCell<TopicLog>>,
    pub scope: Rc<RefCell<FakeScope>>,
    pub scripts: Rc<RefCell<ScriptLog>>,
    pub engine: Rc<RefCell<EngineLog>>,
}

impl Harness {
    pub fn post_visibility(&self, is_intersecting: bool) {
        let poster = self.host.borrow().visibility_poster.clone();
        poster
            .expect("visibility observer connected")
            .post(CarouselEvent::Intersection { is_intersecting });
    }

    pub fn resize(&self, width: f64) {
        let poster = {
            let mut host = self.host.borrow_mut();
            host.viewport_width = width;
            host.size_poster.clone()
        };
        poster
            .expect("size observer connected")
            .post(CarouselEvent::ViewportResized { width });
    }

    pub fn change_breakpoint(&self, is_mobile: bool) {
        let poster = {
            let mut host = self.host.borrow_mut();
            host.is_mobile = is_mobile;
            host.media_poster.clone()
        };
        poster
            .expect("media listener connected")
            .post(CarouselEvent::BreakpointChanged { is_mobile });
    }

    pub fn resolve_topics(&self, result: Result<Vec<ContentItem>, FetchError>) {
        let reply = self.topics.borrow_mut().pending.pop_front();
        reply.expect("topic fetch pending").resolve(result);
    }

    /// Puts the engine constructor on the fake global scope.
    pub fn expose_engine(&self) {
        self.scope.borrow_mut().capability = Some(Rc::new(FakeEngineFactory {
            log: Rc::clone(&self.engine),
        }));
    }

    /// Resolves the pending script fetch, exposing the engine on success.
    pub fn resolve_script_ok(&self) {
        self.expose_engine();
        let reply = self.scripts.borrow_mut().pending.pop_front();
        reply.expect("script fetch pending").resolve(Ok(()));
    }

    pub fn resolve_script_err(&self, message: &str) {
        let reply = self.scripts.borrow_mut().pending.pop_front();
        reply
            .expect("script fetch pending")
            .resolve(Err(ScriptLoadFailure(message.to_owned())));
    }

    pub fn class(&self, name: &str) -> Option<bool> {
        self.host.borrow().classes.get(name).copied()
    }

    pub fn disconnected(&self) -> Vec<&'static str> {
        self.host.borrow().disconnected.clone()
    }
}

pub fn items(count: usize) -> Vec<ContentItem> {
    (1..=count as u64)
        .map(|id| ContentItem::new(id, format!("Topic {id}"), format!("/t/topic-{id}/{id}")))
        .collect()
}

pub fn controller(settings: CarouselSettings) -> (CarouselController<FakeHost>, Harness) {
    let host = Rc::new(RefCell::new(HostState {
        viewport: Some(VIEWPORT),
        viewport_width: 1000.0,
        ..HostState::default()
    }));
    let topics = Rc::new(RefCell::new(TopicLog::default()));
    let scope = Rc::new(RefCell::new(FakeScope::with_module_globals()));
    let scripts = Rc::new(RefCell::new(ScriptLog::default()));
    let engine = Rc::new(RefCell::new(EngineLog::default()));

    let scope_handle: Rc<RefCell<dyn GlobalScope>> = scope.clone();
    let services = CarouselServices {
        topics: Box::new(FakeTopics {
            log: Rc::clone(&topics),
        }),
        scripts: Box::new(FakeScripts {
            log: Rc::clone(&scripts),
            scope: Rc::clone(&scope),
        }),
        scope: scope_handle,
    };
    let controller = CarouselController::new(
        FakeHost {
            state: Rc::clone(&host),
        },
        &settings,
        services,
    )
    .with_rng(StdRng::seed_from_u64(7));

    (
        controller,
        Harness {
            host,
            topics,
            scope,
            scripts,
            engine,
        },
    )
}

/// Mounts, becomes visible and settles the first fetch with `count` items.
pub fn loaded(
    settings: CarouselSettings,
    count: usize,
) -> (CarouselController<FakeHost>, Harness) {
    let (mut controller, harness) = controller(settings);
    controller.mount();
    harness.post_visibility(true);
    controller.pump();
    harness.resolve_topics(Ok(items(count)));
    controller.pump();
    harness.engine.borrow_mut().slide_count = controller.items().len();
    (controller, harness)
}

/// `loaded`, then renders and settles the engine script successfully.
pub fn live(settings: CarouselSettings, count: usize) -> (CarouselController<FakeHost>, Harness) {
    let (mut controller, harness) = loaded(settings, count);
    controller
        .render(&mut NullRenderer::default())
        .expect("render ready frame");
    harness.resolve_script_ok();
    controller.pump();
    (controller, harness)
}
