//! Property tests for the algebra of stages, dispatchers and reducers.

use crate::attributes::{AttrSet, AttrValue};
use crate::dispatch::{AttrPredicate, Dispatcher, FilterOp};
use crate::pipeline::{compose, compute, filter, Stage, Transforms};
use crate::reducer::{Action, Reducer, TableReducer};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

const KEYS: &[&str] = &["a", "b", "c", "heading", "items", "loading"];
const TAGS: &[&str] = &["ADD", "SUB", "SET", "NOOP"];

fn arb_key() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS).prop_map(String::from)
}

fn arb_value() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        Just(AttrValue::Null),
        any::<bool>().prop_map(AttrValue::Bool),
        (-100i64..100).prop_map(AttrValue::Int),
        "[a-z]{0,5}".prop_map(AttrValue::Text),
        prop::collection::vec((0i64..5).prop_map(AttrValue::Int), 0..3).prop_map(AttrValue::List),
    ]
}

fn arb_attrs() -> impl Strategy<Value = AttrSet> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..6).prop_map(AttrSet::from)
}

fn arb_keys() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(arb_key(), 0..6)
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        arb_keys().prop_map(|keys| Stage::<AttrValue>::pick(keys)),
        arb_attrs().prop_map(Stage::assign),
        arb_key().prop_map(|key| {
            Stage::evolve(Transforms::new().on(key, |v: &AttrValue| {
                AttrValue::Bool(!v.is_truthy())
            }))
        }),
    ]
}

fn arb_predicate() -> impl Strategy<Value = AttrPredicate> {
    let ops = [
        FilterOp::Truthy,
        FilterOp::Falsy,
        FilterOp::Empty,
        FilterOp::Present,
        FilterOp::Absent,
    ];
    (arb_key(), prop::sample::select(ops.to_vec()))
        .prop_map(|(key, op)| AttrPredicate::new(key, op, None))
}

fn arb_table() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(
        (prop::sample::select(TAGS).prop_map(String::from), -10i64..10),
        0..6,
    )
}

fn arb_action() -> impl Strategy<Value = Action<i64>> {
    (prop::sample::select(TAGS), -10i64..10)
        .prop_map(|(tag, payload)| Action::new(tag).with_payload(payload))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Property: filtering keeps exactly the allowed keys that are present,
    /// with their values unchanged.
    #[test]
    fn prop_filter_is_key_intersection(attrs in arb_attrs(), allowed in arb_keys()) {
        let out = filter(&allowed, &attrs);

        let expected: BTreeSet<&str> = attrs
            .keys()
            .filter(|key| allowed.contains(*key))
            .collect();
        prop_assert_eq!(out.keys().collect::<BTreeSet<_>>(), expected);
        for (key, value) in out.iter() {
            prop_assert_eq!(Some(value), attrs.get(key));
        }
    }

    /// Property: filtering by a set's own keys returns the set.
    #[test]
    fn prop_filter_by_own_keys_is_identity(attrs in arb_attrs()) {
        let own: BTreeSet<String> = attrs.keys().map(String::from).collect();
        prop_assert_eq!(filter(&own, &attrs), attrs);
    }

    /// Property: derived values win, everything else passes through.
    #[test]
    fn prop_compute_prefers_derived(attrs in arb_attrs(), derived in arb_attrs()) {
        let out = compute(|_| Ok(derived.clone()), &attrs).unwrap();

        for (key, value) in derived.iter() {
            prop_assert_eq!(out.get(key), Some(value));
        }
        for (key, value) in attrs.iter() {
            if !derived.contains_key(key) {
                prop_assert_eq!(out.get(key), Some(value));
            }
        }
        let union: BTreeSet<&str> = attrs.keys().chain(derived.keys()).collect();
        prop_assert_eq!(out.keys().collect::<BTreeSet<_>>(), union);
    }

    /// Property: evolving never adds or removes keys.
    #[test]
    fn prop_evolve_preserves_keys(attrs in arb_attrs(), stage_key in arb_key()) {
        let stage = Stage::evolve(Transforms::new().on(stage_key, |v: &AttrValue| {
            AttrValue::Text(v.to_string())
        }));
        let out = stage.apply(&attrs).unwrap();
        prop_assert_eq!(out.keys().collect::<Vec<_>>(), attrs.keys().collect::<Vec<_>>());
    }

    /// Property: grouping does not change a composition's result.
    #[test]
    fn prop_compose_is_associative(
        a in arb_stage(),
        b in arb_stage(),
        c in arb_stage(),
        attrs in arb_attrs(),
    ) {
        let flat = compose(vec![a.clone(), b.clone(), c.clone()]).apply(&attrs).unwrap();
        let right = compose(vec![a.clone(), compose(vec![b.clone(), c.clone()])])
            .apply(&attrs)
            .unwrap();
        let left = compose(vec![compose(vec![a, b]), c]).apply(&attrs).unwrap();

        prop_assert_eq!(&right, &flat);
        prop_assert_eq!(&left, &flat);
    }

    /// Property: the identity stage is neutral on both sides.
    #[test]
    fn prop_compose_identity(stage in arb_stage(), attrs in arb_attrs()) {
        let plain = stage.apply(&attrs).unwrap();
        let before = compose(vec![stage.clone(), Stage::identity()]).apply(&attrs).unwrap();
        let after = compose(vec![Stage::identity(), stage]).apply(&attrs).unwrap();

        prop_assert_eq!(&before, &plain);
        prop_assert_eq!(&after, &plain);
    }

    /// Property: a dispatcher picks the first matching route, or the default,
    /// the same way every time.
    #[test]
    fn prop_dispatch_is_first_match(
        predicates in prop::collection::vec(arb_predicate(), 0..5),
        attrs in arb_attrs(),
    ) {
        let mut dispatcher: Dispatcher<AttrValue, usize> = Dispatcher::new("prop");
        for (index, predicate) in predicates.iter().enumerate() {
            dispatcher = dispatcher.route(index.to_string(), predicate.clone().into_fn(), index);
        }
        let dispatcher = dispatcher.fallback(usize::MAX);

        let expected = predicates
            .iter()
            .position(|p| p.matches(&attrs))
            .unwrap_or(usize::MAX);
        prop_assert_eq!(dispatcher.dispatch(&attrs).unwrap(), expected);
        prop_assert_eq!(dispatcher.dispatch(&attrs).unwrap(), expected);
    }

    /// Property: a table reducer behaves like the equivalent if/else chain.
    #[test]
    fn prop_table_reducer_matches_conditional_chain(
        table in arb_table(),
        initial in -10i64..10,
        state in -100i64..100,
        action in arb_action(),
    ) {
        let mut reducer: TableReducer<i64, i64> = TableReducer::new(initial);
        for (tag, delta) in &table {
            let delta = *delta;
            reducer = reducer.on(tag.clone(), move |s, _| s + delta);
        }

        let mut expected = state;
        for (tag, delta) in &table {
            if *tag == action.kind {
                expected = state + delta;
                break;
            }
        }

        prop_assert_eq!(reducer.reduce(Some(state), &action).unwrap(), expected);
        prop_assert_eq!(reducer.reduce(None, &action).unwrap(), initial);
    }
}
