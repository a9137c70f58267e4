//! Integration tests for the class builder and accessor protocol
//!
//! Tests cover:
//! - Own-field sets of freshly built instances
//! - Strict validation at construction and through `set`
//! - Multi-name `get` and its failure modes
//! - Shallow `clone` (shared nested values, init re-run)
//! - Dynamic descriptions built from `Value` maps

use std::cell::Cell;
use std::rc::Rc;

use alpha_core::{
    create_class, AlphaError, Behavior, ClassDescription, PropertyMap, Value,
};

fn map<const N: usize>(entries: [(&str, Value); N]) -> PropertyMap {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn test_fresh_instance_owns_exactly_declared_fields() {
    let class = ClassDescription::new("Human")
        .field("name", "")
        .field("age", 0)
        .field("status", "alive")
        .behavior("dies", |this, _| {
            this.set("status", "dead")?;
            Ok(Value::Null)
        })
        .build()
        .unwrap();

    let human = class.new_instance().unwrap();
    assert_eq!(human.field_names(), vec!["name", "age", "status"]);

    human.call("dies", &[]).unwrap();
    assert_eq!(human.get("status").unwrap(), Value::from("dead"));
    assert_eq!(human.field_names(), vec!["name", "age", "status"]);
}

#[test]
fn test_strict_pair_construction() {
    let pair = ClassDescription::new("Pair")
        .strict(true)
        .field("a", 0)
        .field("b", 0)
        .build()
        .unwrap();

    let ok = pair
        .with_data(map([("a", Value::from(1)), ("b", Value::from(2))]))
        .unwrap();
    assert_eq!(
        ok.get_many(["a", "b"]).unwrap(),
        map([("a", Value::from(1)), ("b", Value::from(2))])
    );

    let err = pair
        .with_data(map([("a", Value::from(1)), ("c", Value::from(3))]))
        .unwrap_err();
    assert_eq!(
        err,
        AlphaError::UndeclaredProperty {
            class: "Pair".to_string(),
            name: "c".to_string()
        }
    );
}

#[test]
fn test_strict_set_accepts_declared_and_rejects_new() {
    let class = ClassDescription::new("Strict")
        .strict(true)
        .field("a", 0)
        .build()
        .unwrap();
    let obj = class.new_instance().unwrap();

    obj.set("a", 5).unwrap();
    assert_eq!(obj.get("a").unwrap(), Value::from(5));

    assert!(matches!(
        obj.set("b", 1),
        Err(AlphaError::UndeclaredProperty { .. })
    ));
    assert!(!obj.has_own("b"));

    let err = obj
        .set_all(map([("a", Value::from(6)), ("nope", Value::from(0))]))
        .unwrap_err();
    assert!(matches!(err, AlphaError::UndeclaredProperty { .. }));
    assert_eq!(obj.get("a").unwrap(), Value::from(6));
}

#[test]
fn test_strict_set_rejects_behavior_names() {
    let class = ClassDescription::new("Human")
        .strict(true)
        .field("status", "alive")
        .behavior("dies", |this, _| {
            this.set("status", "dead")?;
            Ok(Value::Null)
        })
        .build()
        .unwrap();
    let human = class.new_instance().unwrap();

    let err = human
        .set("dies", Behavior::new(|_, _| Ok(Value::Null)))
        .unwrap_err();
    assert_eq!(
        err,
        AlphaError::UndeclaredProperty {
            class: "Human".to_string(),
            name: "dies".to_string()
        }
    );
    assert!(!human.has_own("dies"));

    human.call("dies", &[]).unwrap();
    assert_eq!(human.get("status").unwrap(), Value::from("dead"));
}

#[test]
fn test_non_strict_accepts_anything_anytime() {
    let class = ClassDescription::new("Loose").field("a", 0).build().unwrap();
    let obj = class
        .with_data(map([("extra", Value::from("x"))]))
        .unwrap();

    obj.set("later", 1).unwrap();
    assert_eq!(obj.field_names(), vec!["a", "extra", "later"]);
}

#[test]
fn test_strict_accepts_inherited_fields() {
    let base = ClassDescription::new("Base").field("label", "").build().unwrap();
    let child = ClassDescription::new("Child")
        .strict(true)
        .with_parent(&base)
        .field("size", 1)
        .build()
        .unwrap();

    let obj = child.with_data(map([("label", Value::from("hi"))])).unwrap();
    assert_eq!(obj.get("label").unwrap(), Value::from("hi"));
    obj.set("label", "bye").unwrap().set("size", 3).unwrap();
    assert!(obj.set("other", 0).is_err());
}

#[test]
fn test_get_many_matches_single_gets() {
    let class = ClassDescription::new("P").field("a", 1).field("b", "two").build().unwrap();
    let p = class.new_instance().unwrap();

    let many = p.get_many(["a", "b"]).unwrap();
    assert_eq!(many.get("a"), Some(&p.get("a").unwrap()));
    assert_eq!(many.get("b"), Some(&p.get("b").unwrap()));

    assert_eq!(
        p.get_many(Vec::<String>::new()).unwrap_err(),
        AlphaError::EmptySequence
    );
    assert!(matches!(
        p.get_many(["a", "missing"]),
        Err(AlphaError::PropertyNotFound { .. })
    ));
}

#[test]
fn test_get_rejects_other_shapes() {
    let p = ClassDescription::new("P").build().unwrap().new_instance().unwrap();
    assert!(matches!(
        p.call("get", &[Value::from(true)]),
        Err(AlphaError::InvalidParameter { operation: "get", .. })
    ));
}

#[test]
fn test_set_arity_other_than_one_or_two_fails() {
    let p = ClassDescription::new("P").field("a", 0).build().unwrap().new_instance().unwrap();
    assert!(matches!(
        p.call("set", &[]),
        Err(AlphaError::InvalidParameter { operation: "set", .. })
    ));
    assert!(matches!(
        p.call("set", &[Value::from("a"), Value::from(1), Value::from(2)]),
        Err(AlphaError::InvalidParameter { operation: "set", .. })
    ));
    assert_eq!(p.get("a").unwrap(), Value::from(0));
}

#[test]
fn test_set_map_follows_iteration_order() {
    let log = Rc::new(std::cell::RefCell::new(Vec::new()));
    let seen = log.clone();
    let class = ClassDescription::new("Ordered")
        .behavior("set", move |this, args| {
            if let [name, _] = args {
                seen.borrow_mut().push(name.to_string());
            }
            alpha_core::protocol::set(this, args)
        })
        .build()
        .unwrap();

    let obj = class.new_instance().unwrap();
    obj.set_all(map([
        ("z", Value::from(1)),
        ("a", Value::from(2)),
        ("m", Value::from(3)),
    ]))
    .unwrap();

    assert_eq!(*log.borrow(), vec!["z", "a", "m"]);
}

#[test]
fn test_clone_is_shallow_and_distinct() {
    let class = ClassDescription::new("Modal")
        .field("title", "Title")
        .field("buttons", Value::list(vec![]))
        .build()
        .unwrap();

    let x = class.new_instance().unwrap();
    x.set("title", "Hello").unwrap();
    let y = x.clone_instance().unwrap();

    assert!(!y.ptr_eq(&x));
    assert!(y.is_instance_of(&class));
    for name in x.field_names() {
        assert_eq!(y.get(&name).unwrap(), x.get(&name).unwrap());
    }

    let buttons = x.get("buttons").unwrap();
    buttons
        .as_list()
        .unwrap()
        .borrow_mut()
        .push(Value::from("OK"));

    let cloned = y.get("buttons").unwrap();
    assert!(cloned.ptr_eq(&buttons));
    assert_eq!(cloned.as_list().unwrap().borrow().len(), 1);

    y.set("title", "Other").unwrap();
    assert_eq!(x.get("title").unwrap(), Value::from("Hello"));
}

#[test]
fn test_clone_reruns_init() {
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let class = ClassDescription::new("Counted")
        .field("n", 0)
        .with_init(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        })
        .build()
        .unwrap();

    let a = class.new_instance().unwrap();
    assert_eq!(runs.get(), 1);
    let _b = a.clone_instance().unwrap();
    assert_eq!(runs.get(), 2);
}

#[test]
fn test_clone_of_strict_instance() {
    let class = ClassDescription::new("Pair")
        .strict(true)
        .field("a", 0)
        .field("b", 0)
        .build()
        .unwrap();
    let x = class.with_data(map([("a", Value::from(1))])).unwrap();
    let y = x.clone_instance().unwrap();
    assert_eq!(y.get_many(["a", "b"]).unwrap(), x.get_many(["a", "b"]).unwrap());
}

#[test]
fn test_init_sees_hydrated_instance() {
    let class = ClassDescription::new("Box")
        .field("width", 1)
        .field("area", 0)
        .with_init(|this| {
            let w = this.get("width")?.as_int().unwrap_or(0);
            this.set("area", w * w)?;
            Ok(())
        })
        .build()
        .unwrap();

    let b = class.with_data(map([("width", Value::from(4))])).unwrap();
    assert_eq!(b.get("area").unwrap(), Value::from(16));
}

#[test]
fn test_init_error_aborts_construction() {
    let class = ClassDescription::new("Side")
        .field("direction", "left")
        .with_init(|this| match this.get("direction")?.as_str() {
            Some("left") | Some("right") => Ok(()),
            _ => Err("direction must be either left or right".into()),
        })
        .build()
        .unwrap();

    assert!(class.new_instance().is_ok());
    let err = class
        .with_data(map([("direction", Value::from("up"))]))
        .unwrap_err();
    assert_eq!(
        err,
        AlphaError::Custom("direction must be either left or right".to_string())
    );
}

#[test]
fn test_non_structured_data_fails() {
    let class = ClassDescription::new("P").build().unwrap();
    let err = class.instantiate(Some(&Value::from(42))).unwrap_err();
    assert_eq!(
        err,
        AlphaError::InvalidData {
            class: "P".to_string(),
            got: "int".to_string()
        }
    );
    assert!(class.instantiate(Some(&Value::Null)).is_ok());
}

#[test]
fn test_dynamic_description() {
    let greet = Behavior::new(|_, _| Ok(Value::from("hi")));
    let desc = Value::map_from([
        ("name", Value::from("Base")),
        ("strict", Value::from(false)),
        (
            "properties",
            Value::map_from([("greet", Value::from(greet)), ("mood", Value::from("calm"))]),
        ),
    ]);
    let base = create_class(&desc).unwrap();
    assert_eq!(base.name(), "Base");

    let derived = create_class(&Value::map_from([
        ("name", Value::from("Derived")),
        ("parents", Value::list(vec![Value::from(base.clone())])),
    ]))
    .unwrap();

    let d = derived.new_instance().unwrap();
    assert_eq!(d.call("greet", &[]).unwrap(), Value::from("hi"));
    assert_eq!(d.get("mood").unwrap(), Value::from("calm"));
}

#[test]
fn test_dynamic_init_must_be_invocable() {
    let class = create_class(&Value::map_from([
        ("name", Value::from("Broken")),
        ("init", Value::from("not a function")),
    ]))
    .unwrap();

    assert_eq!(
        class.new_instance().unwrap_err(),
        AlphaError::InitNotCallable {
            class: "Broken".to_string(),
            got: "text".to_string()
        }
    );
}

#[test]
fn test_dynamic_description_errors() {
    assert!(matches!(
        create_class(&Value::Null),
        Err(AlphaError::InvalidDescription(_))
    ));
    assert_eq!(
        create_class(&Value::map_from([("name", "")])).unwrap_err(),
        AlphaError::MissingName
    );
    assert!(matches!(
        create_class(&Value::map_from([
            ("name", Value::from("X")),
            ("properties", Value::list(vec![]))
        ])),
        Err(AlphaError::InvalidDescription(_))
    ));
}
