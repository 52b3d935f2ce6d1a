use super::*;

#[derive(Default)]
struct Flag {
    dirty: Cell<bool>,
}

impl Observer for Flag {
    fn on_invalidate(&self) {
        self.dirty.set(true);
    }
}

#[test]
fn clones_share_value_and_identity() {
    let t = TransformRef::at(Vec2::new(1.0, 2.0));
    let u = t.clone();
    u.set_rotation(45.0);
    assert_eq!(t.rotation(), 45.0);
    assert_eq!(t.id(), u.id());
    assert!(t.ptr_eq(&u));
    assert_ne!(t.id(), TransformRef::default().id());
}

#[test]
fn every_setter_notifies_observers() {
    let t = TransformRef::default();
    let flag = Rc::new(Flag::default());
    let rc: Rc<dyn Observer> = flag.clone();
    t.add_observer(Rc::downgrade(&rc));
    assert_eq!(t.observer_count(), 1);

    t.set_translation(Vec2::new(3.0, 4.0));
    assert!(flag.dirty.replace(false));
    t.set_scale(Vec2::new(2.0, 2.0));
    assert!(flag.dirty.replace(false));
    t.set(Transform::IDENTITY);
    assert!(flag.dirty.get());
}

#[test]
fn properties_round_trip_through_values() {
    let t = TransformRef::default();
    t.set_property(TRANSLATION, Value::Vec2(Vec2::new(5.0, 6.0)))
        .unwrap();
    t.set_property(ROTATION, Value::Number(90.0)).unwrap();
    assert_eq!(t.translation(), Vec2::new(5.0, 6.0));
    assert_eq!(
        t.get_property(ROTATION).unwrap().into_number(ROTATION).unwrap(),
        90.0
    );
}

#[test]
fn wrong_property_names_and_types_fail() {
    let t = TransformRef::default();
    assert!(matches!(
        t.get_property("skew"),
        Err(SceneError::UnknownProperty { .. })
    ));
    assert!(matches!(
        t.set_property(SCALE, Value::Number(2.0)),
        Err(SceneError::PropertyType { .. })
    ));
    assert_eq!(t.scale(), Vec2::new(1.0, 1.0));
}
