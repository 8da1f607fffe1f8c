//! `#[record]` expansion: enumeration, discovery and both conversion paths.

use std::collections::BTreeMap;
use std::fmt;

use record_json::json::parse_object;
use record_json::output::class_of;
use record_json::{
    ConvertError, Map, Number, NumberKind, ObjectOutput, PojoConvertor, Receiver, Record, Value,
    record,
};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point {
    x: i32,
    y: i32,
}

#[record(type_name = "geometry.Point", default)]
impl Point {
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get_x(&self) -> i32 {
        self.x
    }

    pub fn get_y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (((self.x - other.x).pow(2) + (self.y - other.y).pow(2)) as f64).sqrt()
    }

    #[allow(dead_code)]
    fn get_private(&self) -> i32 {
        0
    }
}

#[test]
fn point_methods_are_enumerated() {
    let methods = Point::methods();
    let names: Vec<_> = methods.iter().map(|m| m.name).collect();
    assert_eq!(names, ["at", "get_x", "get_y", "set_x", "set_y", "distance"]);

    let at = methods.get("at").unwrap();
    assert_eq!(at.receiver, Receiver::Static);
    let distance = methods.get("distance").unwrap();
    assert_eq!(distance.receiver, Receiver::Ref);
    assert_eq!(distance.arity, 1);
    assert!(distance.returns);
}

#[test]
fn point_to_json() {
    let conv = PojoConvertor::<Point>::new().unwrap();
    let mut out = ObjectOutput::new();
    conv.to_json(&Point::at(3, 4), &mut out);
    let map = out.into_map();
    assert_eq!(class_of(&map), Some("geometry.Point"));
    assert_eq!(map["x"], Value::Number(Number::Int(3)));
    assert_eq!(map["y"], Value::Number(Number::Int(4)));
    assert_eq!(map.len(), 3);
}

#[test]
fn point_from_parsed_json() {
    let conv = PojoConvertor::<Point>::new().unwrap();
    let p = conv.from_json(&parse_object(r#"{"x": 3, "y": 4}"#).unwrap()).unwrap();
    assert_eq!(p, Point::at(3, 4));
}

#[test]
fn point_with_y_excluded() {
    let conv = PojoConvertor::<Point>::with_excluded(["y"]).unwrap();
    assert_eq!(conv.getter_count(), 1);
    assert_eq!(conv.setter_count(), 1);
    assert!(conv.getter("x").is_some());
    assert!(conv.setter("x").is_some());

    let mut out = ObjectOutput::new();
    conv.to_json(&Point::at(3, 4), &mut out);
    assert!(!out.as_map().contains_key("y"));
}

// ---------------------------------------------------------------------------
// Numeric widths
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Measurement {
    channel: i16,
    samples: i32,
    timestamp: i64,
    gain: f32,
    value: f64,
    offset: Option<i64>,
    label: String,
    valid: bool,
    tags: Vec<String>,
}

#[record(default)]
impl Measurement {
    pub fn get_channel(&self) -> i16 {
        self.channel
    }
    pub fn set_channel(&mut self, v: i16) {
        self.channel = v;
    }
    pub fn get_samples(&self) -> i32 {
        self.samples
    }
    pub fn set_samples(&mut self, v: i32) {
        self.samples = v;
    }
    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }
    pub fn set_timestamp(&mut self, v: i64) {
        self.timestamp = v;
    }
    pub fn get_gain(&self) -> f32 {
        self.gain
    }
    pub fn set_gain(&mut self, v: f32) {
        self.gain = v;
    }
    pub fn get_value(&self) -> f64 {
        self.value
    }
    pub fn set_value(&mut self, v: f64) {
        self.value = v;
    }
    pub fn get_offset(&self) -> Option<i64> {
        self.offset
    }
    pub fn set_offset(&mut self, v: Option<i64>) {
        self.offset = v;
    }
    pub fn get_label(&self) -> &str {
        &self.label
    }
    pub fn set_label(&mut self, v: String) {
        self.label = v;
    }
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    pub fn set_valid(&mut self, v: bool) {
        self.valid = v;
    }
    pub fn get_tags(&self) -> &[String] {
        &self.tags
    }
    pub fn set_tags(&mut self, v: Vec<String>) {
        self.tags = v;
    }
}

fn sample_measurement() -> Measurement {
    Measurement {
        channel: 7,
        samples: 1024,
        timestamp: 1_700_000_000_123,
        gain: 0.75,
        value: 0.1,
        offset: Some(-5),
        label: "sensor".into(),
        valid: true,
        tags: vec!["a".into(), "b".into()],
    }
}

/// Passes an object through text, as a real codec would.
fn through_text(map: Map) -> Map {
    let text = record_json::json::to_string(&Value::Object(map)).unwrap();
    parse_object(&text).unwrap()
}

#[test]
fn discovery_counts_getters_and_setters() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    assert_eq!(conv.getter_count(), 9);
    assert_eq!(conv.setter_count(), 9);

    let conv = PojoConvertor::<Measurement>::with_excluded(["gain", "valid", "nope"]).unwrap();
    assert_eq!(conv.getter_count(), 7);
    assert_eq!(conv.setter_count(), 7);
    assert_eq!(conv.excluded_count(), 3);
}

#[test]
fn setters_get_coercion_by_declared_type() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    let kind = |p: &str| conv.setter(p).unwrap().number_kind();
    assert_eq!(kind("channel"), Some(NumberKind::Short));
    assert_eq!(kind("samples"), Some(NumberKind::Int));
    assert_eq!(kind("timestamp"), Some(NumberKind::Long));
    assert_eq!(kind("gain"), Some(NumberKind::Float));
    assert_eq!(kind("value"), Some(NumberKind::Double));
    assert_eq!(kind("offset"), Some(NumberKind::Long));
    assert_eq!(kind("label"), None);
    assert_eq!(kind("tags"), None);
}

#[test]
fn round_trip_through_text_preserves_values() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    let original = sample_measurement();
    let mut out = ObjectOutput::new();
    conv.to_json(&original, &mut out);

    let (back, report) = conv.from_json_with_report(&through_text(out.into_map())).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.ignored, ["class"]);
    assert_eq!(back, original);
}

#[test]
fn double_into_float_setter_narrows() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    let m = conv
        .from_json(&parse_object(r#"{"gain": 0.1, "channel": 70000, "samples": 2.9}"#).unwrap())
        .unwrap();
    assert_eq!(m.gain, 0.1_f64 as f32);
    assert_eq!(m.channel, 70000_i64 as i16);
    assert_eq!(m.samples, 2);
}

#[test]
fn null_clears_optional_property() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    let m = conv
        .from_json(&parse_object(r#"{"offset": null, "timestamp": 9}"#).unwrap())
        .unwrap();
    assert_eq!(m.offset, None);
    assert_eq!(m.timestamp, 9);
}

#[test]
fn wrong_shapes_are_skipped_individually() {
    let conv = PojoConvertor::<Measurement>::new().unwrap();
    let (m, report) = conv
        .from_json_with_report(
            &parse_object(r#"{"label": 5, "valid": "yes", "tags": ["x", 1], "samples": 3}"#)
                .unwrap(),
        )
        .unwrap();
    assert_eq!(m.samples, 3);
    assert_eq!(m.label, "");
    assert!(!m.valid);
    assert!(m.tags.is_empty());
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.property.as_str()).collect();
    assert_eq!(skipped, ["label", "tags", "valid"]);
}

// ---------------------------------------------------------------------------
// Numeric containers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Series {
    points: Vec<i32>,
    weights: Vec<f64>,
    limits: BTreeMap<String, f32>,
}

#[record(default)]
impl Series {
    pub fn get_points(&self) -> &[i32] {
        &self.points
    }
    pub fn set_points(&mut self, points: Vec<i32>) {
        self.points = points;
    }
    pub fn get_weights(&self) -> &[f64] {
        &self.weights
    }
    pub fn set_weights(&mut self, weights: Vec<f64>) {
        self.weights = weights;
    }
    pub fn get_limits(&self) -> &BTreeMap<String, f32> {
        &self.limits
    }
    pub fn set_limits(&mut self, limits: BTreeMap<String, f32>) {
        self.limits = limits;
    }
}

#[test]
fn numeric_containers_round_trip_through_text() {
    let conv = PojoConvertor::<Series>::new().unwrap();
    let original = Series {
        points: vec![1, 2],
        weights: vec![0.5, 3.0],
        limits: BTreeMap::from([("hi".to_string(), 0.1_f32)]),
    };
    let mut out = ObjectOutput::new();
    conv.to_json(&original, &mut out);

    let (back, report) = conv.from_json_with_report(&through_text(out.into_map())).unwrap();
    assert!(report.is_complete(), "{:?}", report.skipped);
    assert_eq!(back, original);
}

#[test]
fn integer_literals_fill_float_containers() {
    let conv = PojoConvertor::<Series>::new().unwrap();
    let series = conv
        .from_json(&parse_object(r#"{"weights": [1, 2.5], "limits": {"lo": 2}}"#).unwrap())
        .unwrap();
    assert_eq!(series.weights, [1.0, 2.5]);
    assert_eq!(series.limits["lo"], 2.0);
}

// ---------------------------------------------------------------------------
// Fallible accessors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Locked;

impl fmt::Display for Locked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("locked")
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Account {
    owner: String,
    balance: i64,
    frozen: bool,
}

#[record(type_name = "bank.Account")]
impl Account {
    pub fn new() -> Self {
        Self {
            owner: "nobody".into(),
            ..Default::default()
        }
    }

    pub fn get_owner(&self) -> String {
        self.owner.clone()
    }

    pub fn set_owner(&mut self, owner: String) {
        self.owner = owner;
    }

    pub fn get_balance(&self) -> Result<i64, Locked> {
        if self.frozen { Err(Locked) } else { Ok(self.balance) }
    }

    pub fn set_balance(&mut self, balance: i64) -> Result<(), Locked> {
        if self.frozen {
            return Err(Locked);
        }
        self.balance = balance;
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    #[record(skip)]
    pub fn get_audit(&self) -> std::slice::Iter<'_, u8> {
        let empty: &'static [u8] = &[];
        empty.iter()
    }
}

#[test]
fn skipped_method_is_not_enumerated() {
    assert!(Account::methods().get("get_audit").is_none());
}

#[test]
fn failing_getter_does_not_abort_to_json() {
    let conv = PojoConvertor::<Account>::new().unwrap();
    let account = Account {
        owner: "ann".into(),
        balance: 10,
        frozen: true,
    };
    let mut out = ObjectOutput::new();
    let report = conv.to_json(&account, &mut out);

    let map = out.into_map();
    assert!(!map.contains_key("balance"));
    assert_eq!(map["owner"], Value::String("ann".into()));
    assert_eq!(map["frozen"], Value::Bool(true));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].property, "balance");
    assert_eq!(report.skipped[0].error.to_string(), "locked");
}

#[test]
fn constructor_new_is_used_for_from_json() {
    let conv = PojoConvertor::<Account>::new().unwrap();
    let account = conv.from_json(&Map::new()).unwrap();
    assert_eq!(account.owner, "nobody");
}

#[test]
fn failing_setter_keeps_constructed_value() {
    let conv = PojoConvertor::<Account>::new().unwrap();
    // "balance" sorts before "frozen", so the setter runs while unfrozen.
    let account = conv
        .from_json(&parse_object(r#"{"frozen": true, "balance": 5}"#).unwrap())
        .unwrap();
    assert_eq!(account.balance, 5);

    let mut frozen = Account::new();
    frozen.frozen = true;
    let setter = conv.setter("balance").unwrap();
    assert!(setter.invoke(&mut frozen, Value::Number(Number::Long(1))).is_err());
    assert_eq!(frozen.balance, 0);
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

pub struct Handle {
    id: i64,
}

#[record]
impl Handle {
    pub fn open(id: i64) -> Self {
        Self { id }
    }

    pub fn get_id(&self) -> i64 {
        self.id
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[test]
fn record_without_constructor_is_read_only_in_practice() {
    let conv = PojoConvertor::<Handle>::new().unwrap();
    let mut out = ObjectOutput::new();
    conv.to_json(&Handle::open(4), &mut out);
    assert_eq!(out.as_map()["id"], Value::Number(Number::Long(4)));

    let err = conv.from_json(&Map::new()).err().unwrap();
    assert!(matches!(err, ConvertError::NotConstructible { .. }));
}

#[derive(Debug)]
pub struct Config {
    port: i32,
}

#[record]
impl Config {
    pub fn new() -> Result<Self, String> {
        Err("environment not loaded".into())
    }

    pub fn get_port(&self) -> i32 {
        self.port
    }

    pub fn set_port(&mut self, port: i32) {
        self.port = port;
    }
}

#[test]
fn failing_constructor_is_fatal() {
    let conv = PojoConvertor::<Config>::new().unwrap();
    let err = conv.from_json(&parse_object(r#"{"port": 80}"#).unwrap()).err().unwrap();
    match err {
        ConvertError::Instantiate { reason, .. } => assert_eq!(reason, "environment not loaded"),
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Inheritance
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entity {
    id: i64,
    name: String,
}

#[record(default)]
impl Entity {
    pub fn get_id(&self) -> i64 {
        self.id
    }
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    pub fn get_name(&self) -> String {
        self.name.clone()
    }
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    entity: Entity,
    email: String,
}

#[record(default, extends = Entity, via = entity)]
impl User {
    pub fn get_email(&self) -> String {
        self.email.clone()
    }
    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }
    pub fn get_name(&self) -> String {
        self.entity.name.to_uppercase()
    }
}

#[test]
fn inherited_accessors_are_discovered() {
    let conv = PojoConvertor::<User>::new().unwrap();
    assert_eq!(conv.getter_count(), 3);
    assert_eq!(conv.setter_count(), 3);

    let user = conv
        .from_json(&parse_object(r#"{"id": 1, "name": "ann", "email": "a@b.c"}"#).unwrap())
        .unwrap();
    assert_eq!(user.entity.id, 1);
    assert_eq!(user.entity.name, "ann");
    assert_eq!(user.email, "a@b.c");

    let mut out = ObjectOutput::new();
    conv.to_json(&user, &mut out);
    assert_eq!(out.as_map()["name"], Value::String("ANN".into()));
    assert_eq!(out.as_map()["id"], Value::Number(Number::Long(1)));
}
