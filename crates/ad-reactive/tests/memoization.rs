use std::cell::Cell;
use std::rc::Rc;

use ad_reactive::ReactiveGraph;
use proptest::prelude::*;

fn diamond(calls: Rc<Cell<u32>>) -> ReactiveGraph<i64> {
    let mut graph = ReactiveGraph::new();
    graph.add_input("x", 0).unwrap();
    graph.add_input("k", 1).unwrap();
    graph.add_derived("left", &["x"], |v| Ok(v[0] + 1)).unwrap();
    graph.add_derived("right", &["x", "k"], |v| Ok(v[0] * v[1])).unwrap();
    graph
        .add_derived("total", &["left", "right"], move |v| {
            calls.set(calls.get() + 1);
            Ok(v[0] + v[1])
        })
        .unwrap();
    graph
}

#[test]
fn diamond_recomputes_join_once_per_change() {
    let calls = Rc::new(Cell::new(0));
    let mut graph = diamond(calls.clone());

    assert_eq!(*graph.get("total").unwrap(), 1);
    graph.set_input("x", 3).unwrap();
    graph.set_input("k", 2).unwrap();
    assert_eq!(*graph.get("total").unwrap(), 4 + 6);
    assert_eq!(calls.get(), 2);

    let before = graph.revision("total").unwrap();
    graph.propagate().unwrap();
    assert_eq!(graph.revision("total").unwrap(), before);
}

proptest! {
    #[test]
    fn graph_matches_direct_evaluation(
        steps in prop::collection::vec((any::<bool>(), -50_i64..50), 1..30),
    ) {
        let calls = Rc::new(Cell::new(0));
        let mut graph = diamond(calls.clone());
        let (mut x, mut k) = (0_i64, 1_i64);

        for (set_x, value) in steps {
            if set_x {
                graph.set_input("x", value).unwrap();
                x = value;
            } else {
                graph.set_input("k", value).unwrap();
                k = value;
            }
            prop_assert_eq!(*graph.get("total").unwrap(), (x + 1) + x * k);
        }
    }

    #[test]
    fn repeated_reads_are_free(value in -100_i64..100, reads in 1_usize..10) {
        let calls = Rc::new(Cell::new(0));
        let mut graph = diamond(calls.clone());
        graph.set_input("x", value).unwrap();
        for _ in 0..reads {
            graph.get("total").unwrap();
        }
        prop_assert_eq!(calls.get(), 1);
    }
}
