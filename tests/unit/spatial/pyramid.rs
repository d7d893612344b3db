//! Tests for block-majority downsampling and tie handling

use multipoint::spatial::grid::BinaryImage;
use multipoint::spatial::pyramid::{TieBreak, downsample, downsampled_dimensions};

#[test]
fn test_downsampled_dimensions_round_up() {
    assert_eq!(downsampled_dimensions((6, 6), 2), Some((3, 3)));
    assert_eq!(downsampled_dimensions((7, 5), 2), Some((4, 3)));
    assert_eq!(downsampled_dimensions((6, 6), 4), Some((2, 2)));
    assert_eq!(downsampled_dimensions((6, 6), 0), None);
}

#[test]
fn test_factor_one_is_identity() {
    let image = BinaryImage::from_fn(4, 4, |row, col| (row * col) % 3 == 0).unwrap();
    let reduced = downsample(&image, 1, TieBreak::Zero).unwrap();

    assert_eq!(reduced, image);
}

#[test]
fn test_clear_majorities() {
    // Top-left block has three ones, bottom-right has one
    let image = BinaryImage::from_bits(
        &[
            1, 1, 0, 0, //
            1, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 1,
        ],
        4,
        4,
    )
    .unwrap();

    let reduced = downsample(&image, 2, TieBreak::Zero).unwrap();

    assert_eq!(reduced.dimensions(), (2, 2));
    assert_eq!(reduced.get(0, 0), Some(true));
    assert_eq!(reduced.get(0, 1), Some(false));
    assert_eq!(reduced.get(1, 0), Some(false));
    assert_eq!(reduced.get(1, 1), Some(false));
}

#[test]
fn test_tie_break_direction() {
    // Every 2x2 block holds exactly two ones
    let image = BinaryImage::from_bits(&[1, 0, 0, 1], 2, 2).unwrap();

    let toward_zero = downsample(&image, 2, TieBreak::Zero).unwrap();
    assert_eq!(toward_zero.get(0, 0), Some(false));

    let toward_one = downsample(&image, 2, TieBreak::One).unwrap();
    assert_eq!(toward_one.get(0, 0), Some(true));
}

#[test]
fn test_truncated_edge_blocks_vote_over_their_extent() {
    // 3x3 at factor 2: the corner block is the single bottom-right pixel
    let image = BinaryImage::from_bits(
        &[
            0, 0, 1, //
            0, 0, 0, //
            1, 0, 1,
        ],
        3,
        3,
    )
    .unwrap();

    let reduced = downsample(&image, 2, TieBreak::Zero).unwrap();

    assert_eq!(reduced.dimensions(), (2, 2));
    // Top-right block is the column [1, 0]: tied, resolves to zero
    assert_eq!(reduced.get(0, 1), Some(false));
    // Bottom-left block is the row [1, 0]: tied, resolves to zero
    assert_eq!(reduced.get(1, 0), Some(false));
    // Corner block is the lone one
    assert_eq!(reduced.get(1, 1), Some(true));
}

#[test]
fn test_zero_factor_is_rejected() {
    let image = BinaryImage::from_bits(&[0, 1, 1, 0], 2, 2).unwrap();
    assert!(downsample(&image, 0, TieBreak::Zero).is_err());
}
