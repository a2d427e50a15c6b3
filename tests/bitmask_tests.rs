use ships::{BitMask, Mask, MaskError};

#[test]
fn test_set_and_clear() {
    let mut mask = Mask::new(7, 9);
    assert!(mask.is_empty());

    mask.set(1, 1).unwrap();
    assert!(mask.contains(1, 1));
    assert_eq!(mask.count_ones(), 1);

    mask.clear_all();
    assert!(mask.is_empty());

    mask.set(6, 8).unwrap();
    assert!(mask.contains(6, 8));
}

#[test]
fn test_out_of_bounds() {
    let mut mask = Mask::new(7, 7);
    assert_eq!(
        mask.set(7, 0),
        Err(MaskError::IndexOutOfBounds { row: 7, col: 0 })
    );
    assert!(mask.set(0, 7).is_err());
    assert!(!mask.contains(9, 9));
    assert!(!mask.contains_at(-1, 0));
}

#[test]
fn test_spans_several_words() {
    // 25x25 needs ten 64-bit words.
    let mut mask = BitMask::<u64>::new(25, 25);
    mask.set(24, 24).unwrap();
    mask.set(0, 0).unwrap();
    mask.set(12, 13).unwrap();
    let bits: Vec<_> = mask.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 0), (12, 13), (24, 24)]);
}

#[test]
fn test_narrow_words() {
    let mut mask = BitMask::<u8>::new(7, 7);
    mask.fill_row(3);
    assert_eq!(mask.count_ones(), 7);
    assert!((0..7).all(|c| mask.contains(3, c)));
}

#[test]
fn test_rect_is_clamped() {
    let mut mask = Mask::new(7, 7);
    mask.fill_rect(5, 5, 9, 9);
    assert_eq!(mask.count_ones(), 4);
    mask.clear_rect(6, 0, 20, 20);
    assert_eq!(mask.count_ones(), 2);
    assert!(mask.contains(5, 5) && mask.contains(5, 6));
}

#[test]
fn test_set_algebra() {
    let mut a = Mask::new(8, 8);
    let mut b = Mask::new(8, 8);
    a.fill_row(2);
    b.fill_col(4);

    assert!(a.intersects(&b));
    let union = a.clone() | b.clone();
    assert_eq!(union.count_ones(), 15);
    assert!(a.is_subset(&union));
    assert!(!union.is_subset(&a));

    let rest = a.and_not(&b);
    assert_eq!(rest.count_ones(), 7);
    assert!(!rest.contains(2, 4));
    assert!(!rest.intersects(&b));
}
