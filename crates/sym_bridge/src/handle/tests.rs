#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use sym_value::SymError;

#[test]
fn inspect_without_reconstructing() {
    let mut bridge = HeapHandleBridge::new();
    let value = Value::symbolic(sym_value::BuiltinOp::Sin, Value::identifier("x"));
    let handle = bridge.alloc(&value).unwrap();
    assert_eq!(bridge.print(&handle).unwrap(), "sin(x)");
    assert_eq!(bridge.tag(&handle).unwrap(), Tag::Symbolic);
    assert_eq!(bridge.reconstruct(&handle).unwrap(), value);
    assert_eq!(bridge.live_count(), 1);
    bridge.free(handle).unwrap();
    assert_eq!(bridge.live_count(), 0);
}

#[test]
fn handles_are_independent() {
    let mut bridge = HeapHandleBridge::new();
    let a = bridge.alloc(&Value::int(1)).unwrap();
    let b = bridge.alloc(&Value::int(2)).unwrap();
    bridge.free(a).unwrap();
    assert_eq!(bridge.reconstruct(&b).unwrap(), Value::int(2));
}

#[test]
fn stale_ids_are_rejected() {
    let mut bridge = HeapHandleBridge::new();
    let raw = bridge.alloc(&Value::int(7)).unwrap().into_raw();
    bridge.free(HeapHandle::from_raw(raw)).unwrap();

    // The slot is reused under a new generation.
    let fresh = bridge.alloc(&Value::string("new")).unwrap();
    let stale = HeapHandle::from_raw(raw);
    assert_eq!(bridge.print(&stale).unwrap_err(), SymError::InvalidHandle { raw });
    assert!(bridge.free(stale).is_err());
    assert_eq!(bridge.tag(&fresh).unwrap(), Tag::String);
}

#[test]
fn foreign_ids_are_rejected() {
    let bridge = HeapHandleBridge::new();
    assert!(matches!(
        bridge.reconstruct(&HeapHandle::from_raw(42)),
        Err(SymError::InvalidHandle { raw: 42 })
    ));
}

#[test]
fn full_slab_refuses_new_handles() {
    let mut bridge = HeapHandleBridge::with_max_slots(2);
    let a = bridge.alloc(&Value::int(1)).unwrap();
    let b = bridge.alloc(&Value::int(2)).unwrap();
    assert!(matches!(
        bridge.alloc(&Value::int(3)),
        Err(SymError::Evaluation { .. })
    ));
    assert_eq!(bridge.reconstruct(&a).unwrap(), Value::int(1));

    bridge.free(a).unwrap();
    let c = bridge.alloc(&Value::int(3)).unwrap();
    assert_eq!(bridge.reconstruct(&c).unwrap(), Value::int(3));
    assert_eq!(bridge.reconstruct(&b).unwrap(), Value::int(2));
    assert_eq!(bridge.live_count(), 2);
}
