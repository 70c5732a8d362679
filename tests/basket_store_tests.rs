mod common;

use common::{memory_stores, product, ReadOnlyStorage};
use rust_decimal::Decimal;
use shopfront_core::storage::{KeyValueStore, MemoryKeyValueStore, BASKET_KEY};
use shopfront_core::viewmodel::BasketViewModel;
use shopfront_core::BasketStore;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn add_same_product_twice_keeps_one_line() {
    let (_, basket, _) = memory_stores();
    let p = product(1, "Mug", 10, "kitchen");
    basket.add(p.snapshot(), 2).unwrap();
    let lines = basket.add(p.snapshot(), 3).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity.value(), 5);
}

#[test]
fn unique_lines_for_any_add_sequence() {
    let (_, basket, _) = memory_stores();
    for id in [1u64, 2, 1, 3, 2, 1] {
        basket.add(product(id, "x", 1, "c").snapshot(), 1).unwrap();
    }
    let ids: Vec<String> = basket.current_basket().iter().map(|l| l.product.id.clone()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(basket.current_basket()[0].quantity.value(), 3);
}

#[test]
fn remove_twice_equals_remove_once() {
    let (_, basket, _) = memory_stores();
    basket.add(product(1, "a", 1, "c").snapshot(), 1).unwrap();
    basket.add(product(2, "b", 1, "c").snapshot(), 1).unwrap();
    let once = basket.remove("1").unwrap();
    let twice = basket.remove("1").unwrap();
    assert_eq!(once, twice);
}

#[test]
fn repeated_decrease_floors_at_removal() {
    let (_, basket, _) = memory_stores();
    basket.add(product(1, "a", 1, "c").snapshot(), 3).unwrap();
    for _ in 0..3 {
        basket.decrease("1").unwrap();
        assert!(basket.current_basket().iter().all(|l| l.quantity.value() >= 1));
    }
    assert!(basket.current_basket().is_empty());
    assert!(basket.decrease("1").unwrap().is_empty());
}

#[test]
fn basket_survives_reconstruction() {
    let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKeyValueStore::new());
    let store = BasketStore::open(Rc::clone(&kv));
    store.add(product(2, "Sofa", 80, "f").with_discount(Decimal::new(20, 0)).snapshot(), 2).unwrap();
    store.add(product(1, "Mug", 5, "k").snapshot(), 1).unwrap();

    let reloaded = BasketStore::open(kv);
    assert_eq!(reloaded.current_basket(), store.current_basket());
}

#[test]
fn persisted_shape_is_ordered_line_list() {
    let kv = Rc::new(MemoryKeyValueStore::new());
    let store = BasketStore::open(kv.clone());
    store.add(product(7, "Lamp", 80, "f").with_discount(Decimal::new(20, 0)).snapshot(), 1).unwrap();

    let raw = kv.get(BASKET_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let line = &json.as_array().unwrap()[0];
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["product"]["id"], "7");
    assert_eq!(line["product"]["title"], "Lamp");
    assert!(line["product"].get("oldPrice").is_some());
}

#[test]
fn failed_writes_still_update_memory_and_subscribers() {
    let storage = Rc::new(ReadOnlyStorage::default());
    let store = Rc::new(BasketStore::open(storage.clone()));
    let vm = BasketViewModel::new(Rc::clone(&store));

    store.add(product(1, "Mug", 12, "k").snapshot(), 2).unwrap();
    assert_eq!(store.current_basket().len(), 1);
    assert_eq!(vm.total_text(), "24,00 TL");

    // Nothing reached storage, so a fresh store starts empty.
    assert!(BasketStore::open(storage).current_basket().is_empty());
}

#[test]
fn every_mutation_is_broadcast_after_persisting() {
    let kv = Rc::new(MemoryKeyValueStore::new());
    let store = Rc::new(BasketStore::open(kv.clone()));
    let persisted_at_notify = Rc::new(RefCell::new(Vec::new()));
    let (probe, sink) = (kv.clone(), persisted_at_notify.clone());
    let _sub = store.subscribe(move |lines| {
        let stored = probe.get(BASKET_KEY).unwrap().map(|raw| {
            serde_json::from_slice::<Vec<serde_json::Value>>(&raw).unwrap().len()
        });
        sink.borrow_mut().push((lines.len(), stored));
    });

    store.add(product(1, "a", 1, "c").snapshot(), 1).unwrap();
    store.add(product(2, "b", 1, "c").snapshot(), 1).unwrap();
    store.clear().unwrap();

    assert_eq!(
        *persisted_at_notify.borrow(),
        vec![(0, None), (1, Some(1)), (2, Some(2)), (0, Some(0))]
    );
}

#[test]
fn total_never_drops_on_add_nor_grows_on_removal() {
    let (_, basket, _) = memory_stores();
    let vm = BasketViewModel::new(Rc::clone(&basket));
    let sofa = product(2, "Sofa", 2500, "furniture").with_discount(Decimal::new(20, 0));
    let lamp = product(5, "Lamp", 45, "furniture").with_discount(Decimal::new(10, 0));
    let mug = product(1, "Mug", 10, "kitchen");

    let mut last = vm.total();
    for (snapshot, qty) in [(mug.snapshot(), 1), (sofa.snapshot(), 2), (lamp.snapshot(), 3), (mug.snapshot(), 4)] {
        basket.add(snapshot, qty).unwrap();
        assert!(vm.total() >= last);
        last = vm.total();
    }
    for id in ["5", "1", "2"] {
        vm.increase(id);
        assert!(vm.total() >= last);
        last = vm.total();
    }

    vm.decrease("2");
    assert!(vm.total() <= last);
    last = vm.total();
    for id in ["5", "9", "1", "2"] {
        vm.remove(id);
        assert!(vm.total() <= last);
        last = vm.total();
    }
    assert!(vm.is_empty());
    assert_eq!(vm.total_text(), "0,00 TL");
}
