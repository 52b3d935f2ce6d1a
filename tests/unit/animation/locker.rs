use super::*;

#[test]
fn strict_add_rejects_duplicates() {
    let obj = ObjectId::next();
    let mut locker = Locker::new();
    locker.add(obj, "translation", false).unwrap();
    assert!(matches!(
        locker.add(obj, "translation", false),
        Err(SceneError::LockedProperty { .. })
    ));
    locker.add(obj, "translation", true).unwrap();
    assert_eq!(locker.pairs().len(), 1);
}

#[test]
fn whole_object_claims_cover_every_property() {
    let obj = ObjectId::next();
    let all = Locker::of(obj, &[ALL_PROPERTIES]).unwrap();
    assert!(all.contains(obj, "anything"));

    let scale = Locker::of(obj, &["scale"]).unwrap();
    assert_eq!(all.conflict_with(&scale), Some((obj, "scale".to_owned())));
    assert_eq!(
        scale.conflict_with(&all),
        Some((obj, ALL_PROPERTIES.to_owned()))
    );

    let mut mixed = scale.clone();
    assert!(mixed.add(obj, ALL_PROPERTIES, false).is_err());
}

#[test]
fn disjoint_lockers_do_not_conflict() {
    let a = ObjectId::next();
    let b = ObjectId::next();
    let left = Locker::of(a, &["translation", "scale"]).unwrap();
    let right = Locker::of(a, &["rotation"]).unwrap();
    let other = Locker::of(b, &["translation"]).unwrap();
    assert_eq!(left.conflict_with(&right), None);
    assert_eq!(left.conflict_with(&other), None);
}

#[test]
fn failed_strict_merge_leaves_receiver_unchanged() {
    let obj = ObjectId::next();
    let mut left = Locker::of(obj, &["translation"]).unwrap();
    let right = Locker::of(obj, &["scale", "translation"]).unwrap();
    let before = left.clone();
    assert!(left.merge(&right, false).is_err());
    assert_eq!(left, before);

    left.merge(&right, true).unwrap();
    assert!(left.contains(obj, "scale"));
    assert_eq!(left.pairs().len(), 2);
}

#[test]
fn empty_lockers_are_empty() {
    assert!(Locker::new().is_empty());
    assert!(!Locker::of(ObjectId::next(), &["z"]).unwrap().is_empty());
    assert!(Locker::new().conflict_with(&Locker::new()).is_none());
}
