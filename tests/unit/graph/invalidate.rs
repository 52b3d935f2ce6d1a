use super::*;
use std::cell::Cell;

#[derive(Default)]
struct Counter {
    hits: Cell<u32>,
}

impl Observer for Counter {
    fn on_invalidate(&self) {
        self.hits.set(self.hits.get() + 1);
    }
}

fn weak(counter: &Rc<Counter>) -> Weak<dyn Observer> {
    let rc: Rc<dyn Observer> = counter.clone();
    Rc::downgrade(&rc)
}

#[test]
fn broadcast_reaches_every_observer_once() {
    let bus = InvalidationBus::new();
    let a = Rc::new(Counter::default());
    let b = Rc::new(Counter::default());
    bus.add_observer(weak(&a));
    bus.add_observer(weak(&a));
    bus.add_observer(weak(&b));
    assert_eq!(bus.len(), 2);

    bus.invalidate();
    assert_eq!(a.hits.get(), 1);
    assert_eq!(b.hits.get(), 1);
}

#[test]
fn dropped_observers_are_pruned() {
    let bus = InvalidationBus::new();
    let a = Rc::new(Counter::default());
    bus.add_observer(weak(&a));
    drop(a);
    assert!(bus.is_empty());
    bus.invalidate();
}

#[test]
fn removed_observers_stop_receiving() {
    let bus = InvalidationBus::new();
    let a = Rc::new(Counter::default());
    let handle = weak(&a);
    bus.add_observer(handle.clone());
    assert!(bus.remove_observer(&handle));
    assert!(!bus.remove_observer(&handle));
    bus.invalidate();
    assert_eq!(a.hits.get(), 0);
}
