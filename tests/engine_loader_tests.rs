mod support;

use std::cell::RefCell;
use std::rc::Rc;

use carousel_rs::api::{
    CarouselSettings, DEFAULT_ENGINE_SCRIPT_URL, EngineLoader, EventQueue, ScriptStatus,
};
use carousel_rs::error::ScriptLoadFailure;
use carousel_rs::interaction::{KeyDisposition, NavigationKey};
use carousel_rs::platform::{GlobalScope, ModuleSuppression};
use carousel_rs::render::NullRenderer;

use support::{FakeScope, live, loaded};

#[test]
fn module_globals_are_hidden_only_while_the_script_loads() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 3);
    controller
        .render(&mut NullRenderer::default())
        .expect("render");

    assert!(harness.scope.borrow().bindings.is_empty());
    assert_eq!(harness.scripts.borrow().suppressed_during_fetch, vec![true]);
    assert_eq!(
        harness.scripts.borrow().urls,
        vec![DEFAULT_ENGINE_SCRIPT_URL.to_owned()]
    );

    harness.resolve_script_ok();
    controller.pump();
    let scope = harness.scope.borrow();
    assert_eq!(scope.binding_names(), vec!["define", "module"]);
    assert_eq!((scope.takes, scope.restores), (1, 1));
}

#[test]
fn failed_script_restores_globals_and_disables_navigation() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 4);
    controller
        .render(&mut NullRenderer::default())
        .expect("render");
    harness.resolve_script_err("network error");
    controller.pump();

    assert_eq!(controller.script_status(), ScriptStatus::Unavailable);
    assert_eq!(
        harness.scope.borrow().binding_names(),
        vec!["define", "module"]
    );
    assert!(controller.phase().is_ready());
    assert!(!controller.next());
    assert!(!controller.previous());
    assert!(!controller.go_to(2));
    assert_eq!(
        controller.handle_key(NavigationKey::ArrowRight),
        KeyDisposition::PreventDefault
    );

    let mut renderer = NullRenderer::default();
    controller.render(&mut renderer).expect("static ready markup");
    assert_eq!(renderer.last_slide_count, 4);
    assert_eq!(renderer.last_dot_count, 0);
    assert_eq!(controller.script_fetches(), 1, "failure is not retried");
}

#[test]
fn script_without_capability_is_unavailable() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 2);
    controller
        .render(&mut NullRenderer::default())
        .expect("render");
    let reply = harness.scripts.borrow_mut().pending.pop_front();
    reply.expect("script fetch pending").resolve(Ok(()));
    controller.pump();

    assert_eq!(controller.script_status(), ScriptStatus::Unavailable);
    assert!(!controller.has_live_engine());
}

#[test]
fn teardown_mid_fetch_restores_globals_and_ignores_late_result() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 3);
    controller
        .render(&mut NullRenderer::default())
        .expect("render");
    assert!(harness.scope.borrow().bindings.is_empty());

    controller.teardown();
    assert_eq!(harness.scope.borrow().restores, 1);
    assert_eq!(controller.script_status(), ScriptStatus::Idle);

    harness.resolve_script_ok();
    controller.pump();
    assert_eq!(controller.script_status(), ScriptStatus::Idle);
    assert!(!controller.has_live_engine());
    assert_eq!(harness.scope.borrow().restores, 1);
}

#[test]
fn pre_exposed_capability_skips_the_fetch() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 3);
    harness.expose_engine();
    controller
        .render(&mut NullRenderer::default())
        .expect("render");

    assert_eq!(controller.script_fetches(), 0);
    assert_eq!(harness.scope.borrow().takes, 0);
    assert!(controller.has_live_engine());
}

#[test]
fn rebuilds_reuse_the_settled_script() {
    let (mut controller, harness) = live(CarouselSettings::default(), 5);
    harness.resize(672.0);
    controller.pump();
    controller
        .render(&mut NullRenderer::default())
        .expect("render");
    assert_eq!(controller.engine_builds(), 2);
    assert_eq!(harness.scripts.borrow().urls.len(), 1);
}

#[test]
fn suppression_guard_restores_on_drop() {
    let scope = Rc::new(RefCell::new(FakeScope::with_module_globals()));
    let handle: Rc<RefCell<dyn GlobalScope>> = scope.clone();
    {
        let guard = ModuleSuppression::acquire(handle);
        assert_eq!(guard.suppressed_count(), 2);
        assert!(scope.borrow().bindings.is_empty());
    }
    assert_eq!(scope.borrow().binding_names(), vec!["define", "module"]);
}

#[test]
fn loaders_do_not_share_cache_state() {
    let queue = EventQueue::new();
    let scope = Rc::new(RefCell::new(FakeScope::default()));
    let (first_fetcher, first_log) = support::recording_fetcher(&scope);
    let (second_fetcher, second_log) = support::recording_fetcher(&scope);
    let mut first = EngineLoader::new(scope.clone(), first_fetcher, "a.js");
    let mut second = EngineLoader::new(scope.clone(), second_fetcher, "b.js");

    assert_eq!(first.ensure(&queue.poster()), ScriptStatus::Pending);
    assert_eq!(first.ensure(&queue.poster()), ScriptStatus::Pending);
    assert_eq!(second.ensure(&queue.poster()), ScriptStatus::Pending);
    assert_eq!(first.fetches_started(), 1);
    assert_eq!(first_log.borrow().urls, vec!["a.js".to_owned()]);
    assert_eq!(second_log.borrow().urls, vec!["b.js".to_owned()]);

    assert_eq!(
        first.settle(first.epoch(), Err(ScriptLoadFailure("404".to_owned()))),
        ScriptStatus::Unavailable
    );
    assert_eq!(second.status(), ScriptStatus::Pending);
    assert!(!first.is_suppressing());
    assert!(second.is_suppressing());
    assert!(first.capability().is_none());
}

#[test]
fn released_load_ignores_its_own_late_reply() {
    let queue = EventQueue::new();
    let scope = Rc::new(RefCell::new(FakeScope::with_module_globals()));
    let (fetcher, _log) = support::recording_fetcher(&scope);
    let mut loader = EngineLoader::new(scope.clone(), fetcher, "engine.js");

    loader.ensure(&queue.poster());
    let abandoned = loader.epoch();
    loader.release();
    assert_eq!(loader.ensure(&queue.poster()), ScriptStatus::Pending);
    assert_ne!(loader.epoch(), abandoned);

    assert_eq!(
        loader.settle(abandoned, Err(ScriptLoadFailure("stale".to_owned()))),
        ScriptStatus::Pending
    );
    assert!(loader.is_suppressing(), "the reload keeps its guard");
    assert!(scope.borrow().bindings.is_empty());
}

#[test]
fn script_reply_from_before_teardown_does_not_settle_the_reload() {
    let (mut controller, harness) = loaded(CarouselSettings::default(), 3);
    controller
        .render(&mut NullRenderer::default())
        .expect("render");
    controller.teardown();

    controller.mount();
    controller
        .render(&mut NullRenderer::default())
        .expect("render after remount");
    assert_eq!(controller.script_fetches(), 2);
    assert!(harness.scope.borrow().bindings.is_empty());

    harness.resolve_script_err("stale");
    controller.pump();
    assert_eq!(controller.script_status(), ScriptStatus::Pending);
    assert!(harness.scope.borrow().bindings.is_empty());

    harness.resolve_script_ok();
    controller.pump();
    assert_eq!(controller.script_status(), ScriptStatus::Ready);
    assert!(controller.has_live_engine());
    assert_eq!(
        harness.scope.borrow().binding_names(),
        vec!["define", "module"]
    );
}
