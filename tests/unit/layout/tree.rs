use super::*;

#[test]
fn slots_are_laid_out_level_by_level() {
    let tree = BinaryTreeOrganizer::new(3, 800.0, 100.0).unwrap();
    assert_eq!(tree.capacity(), 7);
    assert_eq!(tree.transform(0).unwrap().translation, Vec2::new(0.0, 0.0));
    assert_eq!(
        tree.transform(1).unwrap().translation,
        Vec2::new(-200.0, 100.0)
    );
    assert_eq!(
        tree.transform(2).unwrap().translation,
        Vec2::new(200.0, 100.0)
    );
    assert_eq!(
        tree.transform(3).unwrap().translation,
        Vec2::new(-300.0, 200.0)
    );
    assert_eq!(
        tree.transform(6).unwrap().translation,
        Vec2::new(300.0, 200.0)
    );
}

#[test]
fn heap_links_stay_inside_the_tree() {
    let tree = BinaryTreeOrganizer::new(3, 800.0, 100.0).unwrap();
    assert_eq!(tree.parent(0).unwrap(), None);
    assert_eq!(tree.parent(5).unwrap(), Some(2));
    assert_eq!(tree.left(2).unwrap(), Some(5));
    assert_eq!(tree.right(2).unwrap(), Some(6));
    assert_eq!(tree.left(3).unwrap(), None);
    assert_eq!(tree.level(6).unwrap(), 2);
    assert!(matches!(tree.parent(7), Err(SceneError::OutOfBounds(_))));
}

#[test]
fn depth_is_bounded() {
    assert!(BinaryTreeOrganizer::new(0, 1.0, 1.0).is_err());
    assert!(BinaryTreeOrganizer::new(32, 1.0, 1.0).is_err());
    assert_eq!(BinaryTreeOrganizer::new(1, 1.0, 1.0).unwrap().capacity(), 1);
}
