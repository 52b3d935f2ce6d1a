use super::*;
use crate::foundation::core::ObjectId;

fn counting(locker: Locker) -> (UpdaterHandle, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let updater = FunctionUpdater::new(move |_t: f64, _dt: f64| h.set(h.get() + 1)).locking(locker);
    (UpdaterHandle::new(updater), hits)
}

#[test]
fn handles_toggle_and_reject_redundant_toggles() {
    let (handle, hits) = counting(Locker::new());
    assert!(handle.is_active());
    assert!(matches!(
        handle.activate(),
        Err(SceneError::UpdaterAlreadyActive)
    ));

    let mut h = handle.clone();
    h.update(0.0, 0.1).unwrap();
    handle.deactivate().unwrap();
    h.update(0.1, 0.1).unwrap();
    assert_eq!(hits.get(), 1);
    assert!(matches!(
        handle.deactivate(),
        Err(SceneError::UpdaterAlreadyInactive)
    ));

    handle.activate().unwrap();
    h.update(0.2, 0.1).unwrap();
    assert_eq!(hits.get(), 2);
}

#[test]
fn bundle_runs_active_members_only() {
    let (a, a_hits) = counting(Locker::new());
    let (b, b_hits) = counting(Locker::new());
    let mut bundle = UpdaterBundle::new();
    bundle.push(a.clone()).unwrap();
    bundle.push(b.clone()).unwrap();
    b.deactivate().unwrap();

    bundle.update(0.0, 1.0 / 30.0).unwrap();
    assert_eq!(a_hits.get(), 1);
    assert_eq!(b_hits.get(), 0);
    assert_eq!(bundle.len(), 2);
}

#[test]
fn bundle_rejects_overlapping_lockers_until_removed() {
    let obj = ObjectId::next();
    let (a, _) = counting(Locker::of(obj, &["translation"]).unwrap());
    let (b, _) = counting(Locker::of(obj, &["translation"]).unwrap());
    let mut bundle = UpdaterBundle::new();
    bundle.push(a.clone()).unwrap();
    assert!(matches!(
        bundle.push(b.clone()),
        Err(SceneError::LockedProperty { .. })
    ));

    assert!(bundle.remove(&a));
    assert!(!bundle.remove(&a));
    assert!(bundle.locker().is_empty());
    bundle.push(b).unwrap();
    assert_eq!(bundle.len(), 1);

    bundle.clear();
    assert!(bundle.is_empty());
}
