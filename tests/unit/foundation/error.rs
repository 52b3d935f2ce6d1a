use super::*;

#[test]
fn locked_property_names_object_and_property() {
    let id = ObjectId::next();
    let err = SceneError::locked(id, "translation");
    let msg = err.to_string();
    assert!(msg.contains("translation"));
    assert!(msg.contains(&id.to_string()));
}

#[test]
fn io_errors_convert_into_sink_errors() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
    let err: SceneError = io.into();
    assert!(matches!(err, SceneError::Sink(_)));
}

#[test]
fn anyhow_errors_are_transparent() {
    let err: SceneError = anyhow::anyhow!("decode failed").into();
    assert_eq!(err.to_string(), "decode failed");
}
