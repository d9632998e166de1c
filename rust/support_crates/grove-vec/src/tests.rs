use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::buffer::probe;
use crate::testing::{self, Tracked, tracked};
use crate::{
    Error, InlineBuffer, MoveBuffer, RawBuffer, RelocVector, RelocateBuffer, SmallRelocVector,
    SmallVector, Vector,
};

fn values<B: RawBuffer<Tracked>>(v: &Vector<Tracked, B>) -> Vec<u32> {
    v.iter().map(|t| t.0).collect()
}

#[test]
fn test_push_preserves_order() {
    let mut v = Vector::<u32>::new();
    for i in 0..100 {
        v.push(i);
    }
    assert_eq!(v.len(), 100);
    assert!(v.iter().copied().eq(0..100));
    assert_eq!(v.front(), &0);
    assert_eq!(v.back(), &99);
}

#[test]
fn test_growth_capacities() {
    let mut v = Vector::<u8>::new();
    assert_eq!(v.capacity(), 0);
    let mut seen = Vec::new();
    for i in 0..40 {
        v.push(i);
        if seen.last() != Some(&v.capacity()) {
            seen.push(v.capacity());
        }
    }
    assert_eq!(seen, [4, 10, 19, 32, 52]);
}

#[test]
fn test_exact_capacity_constructors() {
    let v = Vector::<String>::from_elem("x".to_string(), 7);
    assert_eq!(v.len(), 7);
    assert_eq!(v.capacity(), 7);

    let v = Vector::<u32>::from_fn(5, |i| i as u32 * 2);
    assert_eq!(v, [0, 2, 4, 6, 8]);
    assert_eq!(v.capacity(), 5);

    let v = RelocVector::<u64>::with_len(3);
    assert_eq!(v, [0, 0, 0]);
    assert_eq!(v.capacity(), 3);

    let v = Vector::<u32>::from([1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    let v = Vector::<u32>::from(vec![1, 2]);
    assert_eq!(v, vec![1, 2]);
}

#[test]
fn test_reserve_never_shrinks() {
    let mut v: Vector<u32> = (0..6).collect();
    let capacity = v.capacity();
    v.reserve(2);
    assert_eq!(v.capacity(), capacity);
    assert_eq!(v.len(), 6);

    v.reserve(100);
    assert_eq!(v.capacity(), 100);
    assert_eq!(v.len(), 6);
    assert!(v.iter().copied().eq(0..6));
}

#[test]
fn test_resize_shrink_keeps_capacity() {
    let mut v: Vector<Tracked> = tracked(0..10).collect();
    let capacity = v.capacity();
    testing::reset();

    v.resize(4, Tracked(0));

    // The unused fill value is dropped as well.
    assert_eq!(testing::counters().drops, 7);
    assert_eq!(v.capacity(), capacity);
    assert_eq!(values(&v), [0, 1, 2, 3]);
}

#[test]
fn test_resize_grow_reserves_exactly() {
    let mut v: Vector<Tracked> = Vector::with_capacity(2);
    v.push(Tracked(1));
    testing::reset();

    v.resize(6, Tracked(7));

    assert_eq!(v.capacity(), 6);
    assert_eq!(values(&v), [1, 7, 7, 7, 7, 7]);
    assert_eq!(testing::counters().clones, 4);

    let mut n = 0;
    v.resize_with(8, || {
        n += 1;
        Tracked(100 + n)
    });
    assert_eq!(values(&v), [1, 7, 7, 7, 7, 7, 101, 102]);
}

fn check_insert_positions<B: RawBuffer<Tracked>>() {
    let cases: [(usize, &[u32]); 3] = [
        (0, &[9, 1, 2, 3, 4]),
        (2, &[1, 2, 9, 3, 4]),
        (4, &[1, 2, 3, 4, 9]),
    ];
    for (index, expected) in cases {
        let mut v: Vector<Tracked, B> = Vector::with_capacity(8);
        v.extend(tracked(1..=4));
        let inserted = v.insert(index, Tracked(9));
        assert_eq!(inserted.0, 9);
        assert_eq!(values(&v), expected);
        assert_eq!(v.capacity(), 8);

        let mut v: Vector<Tracked, B> = Vector::with_capacity(4);
        v.extend(tracked(1..=4));
        v.insert(index, Tracked(9));
        assert_eq!(values(&v), expected);
        assert_eq!(v.capacity(), 5);
    }
}

#[test]
fn test_insert_at_each_position() {
    check_insert_positions::<MoveBuffer<Tracked>>();
    check_insert_positions::<RelocateBuffer<Tracked>>();
}

#[test]
fn test_insert_shift_costs_follow_strategy() {
    let mut v: Vector<Tracked> = Vector::with_capacity(8);
    v.extend(tracked(0..4));
    testing::reset();
    v.insert(0, Tracked(9));
    assert_eq!(testing::counters().moves, 4);

    let mut v: RelocVector<Tracked> = Vector::with_capacity(8);
    v.extend(tracked(0..4));
    testing::reset();
    v.insert(0, Tracked(9));
    assert_eq!(testing::counters().moves, 0);
    assert_eq!(testing::counters().drops, 0);
}

#[test]
#[should_panic(expected = "insertion index")]
fn test_insert_past_end_panics() {
    let mut v: Vector<u32> = (0..3).collect();
    v.insert(4, 0);
}

#[test]
fn test_growth_costs_follow_strategy() {
    let mut v = Vector::<Tracked>::new();
    v.extend(tracked(0..4));
    testing::reset();
    v.push(Tracked(4));
    assert_eq!(testing::counters().moves, 4);
    assert_eq!(testing::counters().drops, 0);

    let mut v = RelocVector::<Tracked>::new();
    v.extend(tracked(0..4));
    testing::reset();
    v.push(Tracked(4));
    assert_eq!(testing::counters().moves, 0);
    assert_eq!(testing::counters().drops, 0);
}

#[test]
fn test_clone_has_exact_capacity() {
    let mut v: Vector<Tracked> = Vector::with_capacity(10);
    v.extend(tracked(0..5));
    testing::reset();

    let copy = v.clone();

    assert_eq!(copy.capacity(), 5);
    assert_eq!(copy, v);
    assert_eq!(testing::counters().clones, 5);

    let mut target: Vector<Tracked> = tracked(0..2).collect();
    target.clone_from(&v);
    assert_eq!(values(&target), [0, 1, 2, 3, 4]);
}

#[test]
fn test_take_heap_is_constant_time() {
    let mut v: Vector<Tracked> = tracked(0..6).collect();
    let ptr = v.as_ptr();
    probe::reset();

    let moved = v.take();

    assert_eq!(probe::element_moves(), 0);
    assert_eq!(moved.as_ptr(), ptr);
    assert_eq!(values(&moved), [0, 1, 2, 3, 4, 5]);
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 0);

    v.push(Tracked(1));
    assert_eq!(values(&v), [1]);
}

#[test]
fn test_move_from_drops_previous_content() {
    let mut a: Vector<Tracked> = tracked(0..3).collect();
    let mut b: Vector<Tracked> = tracked(10..12).collect();
    testing::reset();

    a.move_from(&mut b);

    assert_eq!(testing::counters().drops, 3);
    assert_eq!(values(&a), [10, 11]);
    assert!(b.is_empty());
}

#[test]
fn test_swap_with() {
    let mut a: Vector<u32> = (0..3).collect();
    let mut b: Vector<u32> = Vector::new();
    a.swap_with(&mut b);
    assert!(a.is_empty());
    assert_eq!(b, [0, 1, 2]);
}

fn run_scenario<B: RawBuffer<u32>>() {
    let mut v = Vector::<u32, B>::new();
    for i in 1..=5 {
        v.push(i);
    }
    v.insert(2, 99);
    assert_eq!(v, [1, 2, 99, 3, 4, 5]);

    let capacity = v.capacity();
    v.resize(3, 0);
    assert_eq!(v, [1, 2, 99]);
    assert_eq!(v.capacity(), capacity);

    v.shrink_to_fit();
    assert_eq!(v.capacity(), 3);
    assert_eq!(v, [1, 2, 99]);
}

#[test]
fn test_end_to_end_scenario() {
    run_scenario::<MoveBuffer<u32>>();
    run_scenario::<RelocateBuffer<u32>>();
}

#[test]
fn test_checked_access() {
    let mut v: Vector<u32> = (0..3).collect();
    assert_eq!(v.at(2), Ok(&2));
    assert_eq!(v.at(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    *v.at_mut(1).unwrap() = 10;
    assert_eq!(v, [0, 10, 2]);
    assert!(v.at_mut(7).is_err());
    assert_eq!(v.get(7), None);
}

#[test]
#[should_panic(expected = "empty vector")]
fn test_back_of_empty_panics() {
    let v = Vector::<u32>::new();
    v.back();
}

#[test]
#[should_panic(expected = "empty vector")]
fn test_front_mut_of_empty_panics() {
    let mut v = RelocVector::<u32>::new();
    v.front_mut();
}

#[test]
fn test_emplace_panic_leaves_vector_unchanged() {
    let mut v: Vector<Tracked> = tracked(0..3).collect();
    testing::reset();

    let result = catch_unwind(AssertUnwindSafe(|| {
        v.emplace(|| panic!("constructor failed"));
    }));

    assert!(result.is_err());
    assert_eq!(values(&v), [0, 1, 2]);
    assert_eq!(testing::counters().drops, 0);

    let slot = v.emplace(|| Tracked(3));
    slot.0 += 1;
    assert_eq!(values(&v), [0, 1, 2, 4]);
}

#[derive(Debug, PartialEq)]
enum BuildError {
    Storage(Error),
    Invalid,
}

impl From<Error> for BuildError {
    fn from(e: Error) -> Self {
        BuildError::Storage(e)
    }
}

#[test]
fn test_try_emplace_reports_constructor_failure() {
    let mut v: Vector<u32> = (0..2).collect();

    let result = v.try_emplace(|| Err(BuildError::Invalid));
    assert!(matches!(result, Err(BuildError::Invalid)));
    assert_eq!(v, [0, 1]);

    *v.try_emplace(|| Ok::<_, BuildError>(5)).unwrap() += 1;
    assert_eq!(v, [0, 1, 6]);
}

#[test]
fn test_failed_growth_leaves_vector_unchanged() {
    let mut v: Vector<u64> = (0..3).collect();
    let capacity = v.capacity();
    assert!(matches!(
        v.try_reserve(isize::MAX as usize / 8),
        Err(Error::AllocFailed { .. })
    ));
    assert!(matches!(
        v.try_reserve(usize::MAX),
        Err(Error::CapacityOverflow { .. })
    ));
    assert_eq!(v.capacity(), capacity);
    assert_eq!(v, [0, 1, 2]);

    let mut v: RelocVector<u64> = (0..3).collect();
    assert!(v.try_reserve(isize::MAX as usize / 8).is_err());
    assert_eq!(v, [0, 1, 2]);
    assert!(v.try_insert(1, 7).is_ok());
    assert_eq!(v, [0, 7, 1, 2]);
}

#[test]
fn test_range_inserts() {
    let mut v: Vector<String> = ["a", "e"].iter().map(|s| s.to_string()).collect();
    v.insert_slice(1, &["b".to_string(), "c".to_string()]);
    v.insert_n(3, 2, "d".to_string());
    v.insert_iter(v.len(), ["f", "g"].iter().map(|s| s.to_string()));
    assert_eq!(v, ["a", "b", "c", "d", "d", "e", "f", "g"]);

    let mut v: RelocVector<Tracked> = tracked([0, 4]).collect();
    testing::reset();
    v.insert_iter(1, tracked(1..4));
    assert_eq!(testing::counters().drops, 0);
    assert_eq!(values(&v), [0, 1, 2, 3, 4]);
    assert_eq!(v.capacity(), 5);
}

#[test]
fn test_range_insert_panic_leaves_vector_unchanged() {
    let mut v: Vector<Tracked> = tracked(0..3).collect();
    testing::reset();

    let result = catch_unwind(AssertUnwindSafe(|| {
        v.insert_iter(
            1,
            (0..5).map(|i| if i == 3 { panic!("iterator failed") } else { Tracked(i) }),
        );
    }));

    assert!(result.is_err());
    assert_eq!(testing::counters().drops, 3);
    assert_eq!(values(&v), [0, 1, 2]);
}

#[derive(Debug)]
struct Fragile {
    value: Tracked,
    breaks: bool,
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        assert!(!self.breaks, "clone failed");
        Fragile {
            value: self.value.clone(),
            breaks: false,
        }
    }
}

fn fragile(value: u32, breaks: bool) -> Fragile {
    Fragile {
        value: Tracked(value),
        breaks,
    }
}

fn check_clone_panic_restores<B: RawBuffer<Fragile>>() {
    let mut v: Vector<Fragile, B> = (0..4).map(|i| fragile(i, false)).collect();
    let items = [fragile(10, false), fragile(11, false), fragile(12, true)];
    testing::reset();

    let result = catch_unwind(AssertUnwindSafe(|| v.insert_slice(2, &items)));

    assert!(result.is_err());
    assert_eq!(testing::counters().clones, 2);
    assert_eq!(testing::counters().drops, 2);
    assert!(v.iter().map(|f| f.value.0).eq(0..4));

    v.insert_n(4, 2, fragile(5, false));
    assert!(v.iter().map(|f| f.value.0).eq([0, 1, 2, 3, 5, 5]));
}

#[test]
fn test_clone_panic_during_range_insert_restores_vector() {
    check_clone_panic_restores::<MoveBuffer<Fragile>>();
    check_clone_panic_restores::<InlineBuffer<Fragile, 8>>();
}

#[test]
fn test_inline_range_inserts_do_not_allocate() {
    let mut v: SmallVector<u32, 16> = Vector::from([1, 4]);
    testing::reset();

    v.insert_slice(1, &[2, 3]);
    v.insert_n(0, 2, 0);
    v.insert_iter(6, [5, 6, 7]);

    assert_eq!(testing::counters().allocations, 0);
    assert!(v.is_inline());
    assert_eq!(v, [0, 0, 1, 2, 3, 4, 5, 6, 7]);

    let mut v: SmallRelocVector<u32, 16> = Vector::new();
    testing::reset();
    v.insert_iter(0, [7, 8, 9]);
    assert_eq!(testing::counters().allocations, 0);
    assert_eq!(v, [7, 8, 9]);
}

/// An iterator whose exact size hint may not match what it yields.
struct Announced<I> {
    inner: I,
    claim: usize,
}

impl<I: Iterator> Iterator for Announced<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.claim, Some(self.claim))
    }
}

#[test]
fn test_insert_iter_survives_wrong_size_hint() {
    let mut v = Vector::<u32>::from([0, 9]);

    v.insert_iter(1, Announced { inner: 1..3, claim: 5 });
    assert_eq!(v, [0, 1, 2, 9]);

    v.insert_iter(3, Announced { inner: 3..9, claim: 2 });
    assert_eq!(v, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    v.insert_iter(0, (10..16).filter(|x| x % 2 == 0));
    assert_eq!(v.len(), 13);
    assert_eq!(v[..4], [10, 12, 14, 0]);
}

#[test]
fn test_assign() {
    let mut v: Vector<u32> = (0..10).collect();
    let capacity = v.capacity();

    v.assign([7, 8]);
    assert_eq!(v, [7, 8]);
    assert_eq!(v.capacity(), capacity);

    v.assign_slice(&[1, 2, 3]);
    assert_eq!(v, [1, 2, 3]);

    v.assign_n(40, 5);
    assert_eq!(v.len(), 40);
    assert_eq!(v.capacity(), 40);
    assert!(v.iter().all(|&x| x == 5));

    // Slice methods stay reachable through `Deref`.
    v.fill(1);
    v.swap(0, 39);
    assert!(v.iter().all(|&x| x == 1));
}

#[test]
fn test_pop_and_clear_keep_capacity() {
    let mut v: Vector<Tracked> = tracked(0..5).collect();
    let capacity = v.capacity();

    assert_eq!(v.pop().map(|t| t.0), Some(4));
    assert_eq!(v.capacity(), capacity);

    testing::reset();
    v.clear();
    assert_eq!(testing::counters().drops, 4);
    assert_eq!(v.capacity(), capacity);
    assert!(v.pop().is_none());
}

#[test]
fn test_drop_destroys_each_element_once() {
    let v: RelocVector<Tracked> = tracked(0..17).collect();
    testing::reset();
    drop(v);
    assert_eq!(testing::counters().drops, 17);
}

#[test]
fn test_zero_sized_elements() {
    let mut v = Vector::<()>::new();
    for _ in 0..1000 {
        v.push(());
    }
    v.insert(500, ());
    assert_eq!(v.len(), 1001);
    assert_eq!(v.pop(), Some(()));
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 1000);
}

#[test]
fn test_as_bytes() {
    let v = RelocVector::<u16>::from([1, 0x0203]);
    let expected = [1u16.to_ne_bytes(), 0x0203u16.to_ne_bytes()].concat();
    assert_eq!(v.as_bytes(), expected);
    assert!(Vector::<u32>::new().as_bytes().is_empty());
}

#[test]
fn test_std_traits() {
    let a: Vector<u32> = (0..4).collect();
    let b: RelocVector<u32> = (0..4).collect();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "[0, 1, 2, 3]");
    assert!(a < Vector::from([0, 1, 3]));

    let mut set = HashSet::new();
    set.insert(a.clone());
    assert!(set.contains(&a));

    let mut c = Vector::<u32>::default();
    c.extend(&[1, 2]);
    c.extend_from_slice(&[3]);
    for x in &mut c {
        *x *= 10;
    }
    let total: u32 = (&c).into_iter().sum();
    assert_eq!(total, 60);
    let slice: &[u32] = c.as_ref();
    assert_eq!(slice, [10, 20, 30]);
}

fn compare_against_std<B: RawBuffer<u32>>(seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut expected: Vec<u32> = Vec::new();
    let mut actual = Vector::<u32, B>::new();

    for _ in 0..2000 {
        match rng.u32(0..10) {
            0..=2 => {
                let x = rng.u32(..);
                expected.push(x);
                actual.push(x);
            }
            3 => {
                assert_eq!(actual.pop(), expected.pop());
            }
            4 => {
                let index = rng.usize(0..=expected.len());
                let x = rng.u32(..);
                expected.insert(index, x);
                actual.insert(index, x);
            }
            5 => {
                let index = rng.usize(0..=expected.len());
                let items: Vec<u32> = (0..rng.usize(0..6)).map(|_| rng.u32(..)).collect();
                expected.splice(index..index, items.iter().copied());
                actual.insert_slice(index, &items);
            }
            6 => {
                let new_len = rng.usize(0..=expected.len() + 8);
                let x = rng.u32(..);
                expected.resize(new_len, x);
                actual.resize(new_len, x);
            }
            7 => {
                let new_len = rng.usize(0..=expected.len());
                expected.truncate(new_len);
                actual.truncate(new_len);
            }
            8 => {
                actual.shrink_to_fit();
                assert!(actual.capacity() <= expected.len().max(8));
            }
            _ => {
                if rng.u32(0..20) == 0 {
                    expected.clear();
                    actual.clear();
                }
            }
        }
        assert_eq!(actual.as_slice(), expected.as_slice());
        assert!(actual.capacity() >= actual.len());
    }
}

#[test]
fn test_randomized_against_std_vec() {
    for seed in 0..4 {
        compare_against_std::<MoveBuffer<u32>>(seed);
        compare_against_std::<RelocateBuffer<u32>>(seed);
        compare_against_std::<crate::InlineBuffer<u32, 8>>(seed);
    }
}

#[test]
fn test_small_vector_behaves_like_vector() {
    let mut v: SmallVector<Tracked, 3> = Vector::new();
    v.extend(tracked(0..3));
    assert!(v.is_inline());
    v.insert(1, Tracked(9));
    assert!(!v.is_inline());
    assert_eq!(values(&v), [0, 9, 1, 2]);
    assert_eq!(v.capacity(), 4);
}
