use space_invaders::collision::collide;
use space_invaders::entities::Rect;

#[test]
fn overlapping_rects_collide() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 10, 10);
    assert!(collide(&a, &b));
}

#[test]
fn corner_touching_rects_do_not_collide() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(10, 10, 10, 10);
    assert!(!collide(&a, &b));
}

#[test]
fn edge_touching_rects_do_not_collide() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!collide(&a, &Rect::new(10, 0, 10, 10))); // right edge
    assert!(!collide(&a, &Rect::new(0, 10, 10, 10))); // bottom edge
    assert!(!collide(&a, &Rect::new(-10, 0, 10, 10))); // left edge
    assert!(!collide(&a, &Rect::new(0, -10, 10, 10))); // top edge
}

#[test]
fn one_unit_overlap_collides() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(collide(&a, &Rect::new(9, 9, 10, 10)));
}

#[test]
fn contained_rect_collides() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(40, 40, 6, 15);
    assert!(collide(&outer, &inner));
    assert!(collide(&inner, &outer));
}

#[test]
fn overlap_on_one_axis_only_is_a_miss() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!collide(&a, &Rect::new(5, 50, 10, 10)));
    assert!(!collide(&a, &Rect::new(50, 5, 10, 10)));
}

#[test]
fn collide_is_symmetric() {
    let base = Rect::new(20, 20, 10, 10);
    for x in 0..40 {
        for y in 0..40 {
            let other = Rect::new(x, y, 6, 15);
            assert_eq!(collide(&base, &other), collide(&other, &base), "at ({x}, {y})");
        }
    }
}
