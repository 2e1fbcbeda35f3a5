use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

thread_local! {
    static OS_DARK: Cell<bool> = const { Cell::new(false) };
}

fn thread_detector() -> bool {
    OS_DARK.with(Cell::get)
}

fn set_os_dark(value: bool) {
    OS_DARK.with(|cell| cell.set(value));
}

// =============================================================
// ManualPreference
// =============================================================

#[test]
fn manual_reports_initial_preference() {
    assert!(ManualPreference::new(true).prefers_dark());
    assert!(!ManualPreference::new(false).prefers_dark());
}

#[test]
fn manual_emit_updates_preference_and_calls_handlers_in_order() {
    let source = ManualPreference::new(false);
    let log = Rc::new(RefCell::new(Vec::new()));
    for tag in 0..3 {
        let log = log.clone();
        source.on_change(Box::new(move |matches| log.borrow_mut().push((tag, matches))));
    }

    source.emit(true);

    assert!(source.prefers_dark());
    assert_eq!(*log.borrow(), vec![(0, true), (1, true), (2, true)]);
    assert_eq!(source.handler_count(), 3);
}

#[test]
fn manual_clones_share_handlers() {
    let source = ManualPreference::new(false);
    let driver = source.clone();
    let seen = Rc::new(Cell::new(None));
    let slot = seen.clone();
    source.on_change(Box::new(move |matches| slot.set(Some(matches))));

    driver.emit(true);

    assert_eq!(seen.get(), Some(true));
    assert!(source.prefers_dark());
}

#[test]
fn manual_handler_may_register_another_handler() {
    let source = ManualPreference::new(false);
    let inner = source.clone();
    source.on_change(Box::new(move |_| inner.on_change(Box::new(|_| {}))));

    source.emit(true);

    assert_eq!(source.handler_count(), 2);
}

// =============================================================
// SystemPreference
// =============================================================

#[test]
fn system_reads_detector_at_construction() {
    set_os_dark(true);
    let source = SystemPreference::with_detector(thread_detector);
    assert!(source.prefers_dark());
}

#[test]
fn system_poll_without_change_returns_none() {
    set_os_dark(false);
    let source = SystemPreference::with_detector(thread_detector);
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    source.on_change(Box::new(move |_| counter.set(counter.get() + 1)));

    assert_eq!(source.poll(), None);
    assert_eq!(hits.get(), 0);
}

#[test]
fn system_poll_reports_change_once() {
    set_os_dark(false);
    let source = SystemPreference::with_detector(thread_detector);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    source.on_change(Box::new(move |matches| log.borrow_mut().push(matches)));

    set_os_dark(true);
    assert_eq!(source.poll(), Some(true));
    assert_eq!(source.poll(), None);
    assert!(source.prefers_dark());

    set_os_dark(false);
    assert_eq!(source.poll(), Some(false));

    assert_eq!(*seen.borrow(), vec![true, false]);
}
