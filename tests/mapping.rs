#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for the matrix wiring.
#![cfg(feature = "host")]

use bitdog_matrix::Error;
use bitdog_matrix::led_matrix::layout::MatrixLayout;

const BITDOG: MatrixLayout<25, 5, 5> = MatrixLayout::reverse_serpentine();

#[test]
fn bitdog_wiring_matches_board() {
    let expected = [
        [24, 23, 22, 21, 20],
        [15, 16, 17, 18, 19],
        [14, 13, 12, 11, 10],
        [5, 6, 7, 8, 9],
        [4, 3, 2, 1, 0],
    ];
    for (y_index, row) in expected.iter().enumerate() {
        for (x_index, &led_index) in row.iter().enumerate() {
            assert_eq!(BITDOG.index_of(x_index, y_index), Ok(led_index), "({x_index}, {y_index})");
        }
    }
}

#[test]
fn reverse_serpentine_follows_formula() {
    for y_index in 0..5 {
        for x_index in 0..5 {
            let raster = if y_index % 2 == 0 {
                y_index * 5 + x_index
            } else {
                y_index * 5 + (4 - x_index)
            };
            assert_eq!(BITDOG.index_of(x_index, y_index), Ok(24 - raster));
        }
    }
}

#[test]
fn every_index_hit_exactly_once() {
    let mut hits = [0_u8; 25];
    for y_index in 0..5 {
        for x_index in 0..5 {
            let led_index = BITDOG.index_of(x_index, y_index).expect("in range");
            hits[led_index] += 1;
        }
    }
    assert!(hits.iter().all(|&count| count == 1));
}

#[test]
fn xy_of_inverts_index_of() {
    for led_index in 0..25 {
        let (x, y) = BITDOG.xy_of(led_index).expect("in range");
        assert_eq!(BITDOG.index_of(usize::from(x), usize::from(y)), Ok(led_index));
    }
}

#[test]
fn out_of_range_coordinates_rejected() {
    assert_eq!(
        BITDOG.index_of(5, 0),
        Err(Error::CoordinateOutOfRange {
            x: 5,
            y: 0,
            width: 5,
            height: 5
        })
    );
    assert!(BITDOG.index_of(0, 5).is_err());
    assert_eq!(
        BITDOG.xy_of(25),
        Err(Error::IndexOutOfRange { index: 25, len: 25 })
    );
}

#[test]
fn rectangular_reverse_serpentine() {
    const MAP: MatrixLayout<6, 3, 2> = MatrixLayout::reverse_serpentine();
    assert_eq!(
        *MAP.index_to_xy(),
        [(0, 1), (1, 1), (2, 1), (2, 0), (1, 0), (0, 0)]
    );
}

#[test]
#[should_panic(expected = "W*H must equal N")]
fn size_mismatch_panics() {
    let _ = MatrixLayout::<5, 2, 2>::new([(0, 0), (1, 0), (0, 1), (1, 1), (0, 0)]);
}

#[test]
#[should_panic(expected = "duplicate (col,row) in mapping")]
fn duplicate_cell_panics() {
    let _ = MatrixLayout::<4, 2, 2>::new([(0, 0), (1, 0), (0, 1), (0, 1)]);
}

#[test]
#[should_panic(expected = "column out of bounds")]
fn column_out_of_bounds_panics() {
    let _ = MatrixLayout::<4, 2, 2>::new([(0, 0), (2, 0), (0, 1), (1, 1)]);
}

#[test]
#[should_panic(expected = "row out of bounds")]
fn row_out_of_bounds_panics() {
    let _ = MatrixLayout::<4, 2, 2>::new([(0, 0), (1, 0), (0, 2), (1, 1)]);
}
