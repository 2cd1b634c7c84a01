use envbind::{FieldKind, IntWidth, Record};

#[derive(Debug, Default, envbind::EnvRecord)]
pub struct Inner {
    #[field(env = "INNER_LEVEL")]
    pub level: u8,
}

#[derive(Debug, Default, envbind::EnvRecord)]
pub struct Described {
    /// Port the server listens on
    #[field(env = "PORT")]
    pub port: u16,

    #[field(env = "HOST", doc = "  Host name  ", required = "yes")]
    pub host: String,

    #[field(env = "VERBOSE", required = false)]
    pub verbose: bool,

    pub untagged: String,

    #[field(nested)]
    pub inner: Inner,

    #[field(skip)]
    pub handle: Handle,
}

// Not bindable, only reachable through `skip`
#[derive(Debug, Default)]
pub struct Handle(u32);

#[test]
fn test_shape_lists_fields_in_order() {
    let shape = Described::describe();

    assert_eq!(shape.name, "Described");
    let names: Vec<&str> = shape.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["port", "host", "verbose", "untagged", "inner"]);
}

#[test]
fn test_shape_carries_annotations() {
    let shape = Described::describe();

    let port = shape.field("port").unwrap();
    assert_eq!(port.env, Some("PORT"));
    assert_eq!(port.kind, FieldKind::Unsigned(IntWidth::W16));
    assert_eq!(port.required, None);
    assert_eq!(port.doc, Some("Port the server listens on"));

    let host = shape.field("host").unwrap();
    assert_eq!(host.required, Some("yes"));
    assert_eq!(host.doc, Some("Host name"));
    assert!(host.is_required().unwrap());

    let verbose = shape.field("verbose").unwrap();
    assert_eq!(verbose.required, Some("false"));
    assert!(!verbose.is_required().unwrap());

    let untagged = shape.field("untagged").unwrap();
    assert_eq!(untagged.env, None);
    assert_eq!(untagged.kind, FieldKind::Text);
    assert!(shape.field("handle").is_none());

    let inner = shape.field("inner").unwrap();
    assert_eq!(inner.env, None);
    assert_eq!(inner.kind, FieldKind::Record(Inner::describe()));
    assert_eq!(inner.kind.to_string(), "Inner");
}

#[test]
fn test_shape_is_cached() {
    let first = Described::describe();
    let second = Described::default().shape();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_shape_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Described::describe() as *const _ as usize))
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_field_mut_indexes_follow_shape() {
    let mut described = Described::default();

    assert!(described.field_mut(0).is_some());
    assert!(described.field_mut(4).is_some());
    assert!(described.field_mut(5).is_none());
    assert_eq!(described.handle.0, 0);
}

#[cfg(feature = "serde")]
#[test]
fn test_shape_serializes() {
    let json = serde_json::to_value(Described::describe()).unwrap();

    assert_eq!(json["name"], "Described");
    assert_eq!(json["fields"][0]["env"], "PORT");
    assert_eq!(json["fields"][1]["required"], "yes");
    assert_eq!(json["fields"][4]["kind"]["Record"]["name"], "Inner");
}

#[cfg(feature = "serde")]
#[test]
fn test_bind_options_deserialize() {
    let options: envbind::BindOptions =
        serde_json::from_str(r#"{"optional_policy":"allocate"}"#).unwrap();
    assert_eq!(options.optional_policy, envbind::OptionalPolicy::Allocate);

    let options: envbind::BindOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.optional_policy, envbind::OptionalPolicy::Strict);
}
