//! Property tests for viewport scrolling.

use proptest::prelude::*;

use appsweep::viewport::{Geometry, Viewport};

fn geometry() -> impl Strategy<Value = Geometry> {
    (0i32..200, 1i32..1000, 0i32..200, 1i32..150).prop_map(|(top, span, inset, row_height)| {
        Geometry::new(top, top + span, top + inset, row_height)
    })
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Up,
    Down,
}

fn moves() -> impl Strategy<Value = Vec<Move>> {
    proptest::collection::vec(prop_oneof![Just(Move::Up), Just(Move::Down)], 0..300)
}

fn assert_cursor_visible(vp: &Viewport, len: usize) -> Result<(), TestCaseError> {
    let g = vp.geometry();
    prop_assert!(vp.cursor() >= vp.window_start());
    prop_assert!(vp.cursor() < vp.window_start() + vp.capacity());
    prop_assert!(len == 0 || vp.cursor() < len);
    prop_assert!(vp.cursor_y() >= g.top());
    prop_assert!(vp.cursor_y() + g.row_height() <= g.bottom());

    let cursor_slot = vp.visible_rows(len).find(|slot| slot.index == vp.cursor());
    if len > 0 {
        prop_assert_eq!(cursor_slot.map(|slot| slot.y), Some(vp.cursor_y()));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the cursor row is always fully inside the viewport.
    #[test]
    fn property_cursor_stays_in_window(
        geometry in geometry(),
        len in 0usize..120,
        moves in moves()
    ) {
        let mut vp = Viewport::new(geometry);
        assert_cursor_visible(&vp, len)?;

        for m in moves {
            let before = vp.cursor();
            let moved = match m {
                Move::Up => vp.move_up(),
                Move::Down => vp.move_down(len),
            };
            match (m, moved) {
                (Move::Up, true) => prop_assert_eq!(vp.cursor() + 1, before),
                (Move::Down, true) => prop_assert_eq!(vp.cursor(), before + 1),
                (_, false) => prop_assert_eq!(vp.cursor(), before),
            }
            assert_cursor_visible(&vp, len)?;
        }
    }

    /// PROPERTY: re-fitting to a new layout keeps the cursor index and keeps it visible.
    #[test]
    fn property_geometry_change_keeps_cursor(
        first in geometry(),
        second in geometry(),
        len in 1usize..120,
        downs in 0usize..150
    ) {
        let mut vp = Viewport::new(first);
        for _ in 0..downs {
            vp.move_down(len);
        }
        let cursor = vp.cursor();

        vp.set_geometry(second);
        prop_assert_eq!(vp.cursor(), cursor);
        assert_cursor_visible(&vp, len)?;
    }
}
