use super::*;

#[test]
fn cells_are_centred_on_the_origin() {
    let grid = GridOrganizer::new(2, 3, 10.0, 20.0).unwrap();
    assert_eq!(grid.len(), 6);
    assert_eq!(
        grid.transform_at(0, 0).unwrap().translation,
        Vec2::new(-10.0, -10.0)
    );
    assert_eq!(
        grid.transform_at(1, 2).unwrap().translation,
        Vec2::new(10.0, 10.0)
    );
    assert_eq!(grid.transform_at(0, 1).unwrap().translation.x, 0.0);
}

#[test]
fn index_walks_row_major() {
    let grid = GridOrganizer::new(2, 3, 10.0, 20.0).unwrap();
    assert_eq!(grid.index(4).unwrap(), grid.transform_at(1, 1).unwrap());
    assert!(matches!(grid.index(6), Err(SceneError::OutOfBounds(_))));
    assert!(matches!(
        grid.transform_at(2, 0),
        Err(SceneError::OutOfBounds(_))
    ));
}

#[test]
fn degenerate_grids_are_rejected() {
    assert!(GridOrganizer::new(0, 3, 1.0, 1.0).is_err());
    assert!(GridOrganizer::new(1, 1, 0.0, 1.0).is_err());
    assert!(GridOrganizer::new(1, 1, 1.0, f64::INFINITY).is_err());
}
