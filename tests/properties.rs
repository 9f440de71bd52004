//! Property tests for tiling, permutation and scramble round trips.

use jigscramble::geometry::{factor_pairs, plan};
use jigscramble::grid::{generate, IndexGrid};
use jigscramble::{scramble, unscramble, Error};
use ndarray::prelude::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Largest area coverable by `t` square tiles in any rows x cols layout.
fn best_area(t: usize, height: usize, width: usize) -> usize {
    (1..=t)
        .filter(|r| t % r == 0)
        .map(|rows| {
            let cols = t / rows;
            let length = (height / rows).min(width / cols);
            length * length * t
        })
        .max()
        .unwrap_or(0)
}

fn is_permutation(grid: &IndexGrid, n: usize) -> bool {
    let mut ids: Vec<_> = grid.view().iter().copied().collect();
    ids.sort_unstable();
    ids == (0..n).collect::<Vec<_>>()
}

#[test]
fn full_hd_plan_is_optimal() {
    let p = plan(1000, 1080, 1920).unwrap();
    assert_eq!(p.covered_area(), best_area(1000, 1080, 1920));
}

#[test]
fn factor_pairs_multiply_back() {
    for n in 1..500 {
        for (low, high) in factor_pairs(n) {
            assert!(low <= high);
            assert_eq!(low * high, n);
        }
    }
}

proptest! {
    #[test]
    fn plan_fits_inside_image(t in 1usize..400, h in 1usize..2000, w in 1usize..2000) {
        match plan(t, h, w) {
            Ok(p) => {
                prop_assert_eq!(p.rows * p.cols, t);
                prop_assert_eq!(p.tile.height, p.tile.width);
                prop_assert!(p.tile.height > 0);
                prop_assert!(p.covered_height() <= h);
                prop_assert!(p.covered_width() <= w);
            }
            Err(Error::InvalidInput { .. }) => prop_assert_eq!(best_area(t, h, w), 0),
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    #[test]
    fn plan_is_deterministic(t in 1usize..400, h in 1usize..2000, w in 1usize..2000) {
        let a = plan(t, h, w).ok();
        let b = plan(t, h, w).ok();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn plan_maximizes_coverage(t in 1usize..200, h in 1usize..1000, w in 1usize..1000) {
        let best = best_area(t, h, w);
        prop_assume!(best > 0);
        let p = plan(t, h, w).unwrap();
        prop_assert_eq!(p.covered_area(), best);
    }

    #[test]
    fn longer_side_gets_more_tiles(t in 1usize..200, h in 1usize..1000, w in 1usize..1000) {
        prop_assume!(h != w);
        if let Ok(p) = plan(t, h, w) {
            if h > w {
                prop_assert!(p.rows >= p.cols);
            } else {
                prop_assert!(p.cols >= p.rows);
            }
        }
    }

    #[test]
    fn generate_gives_two_permutations(
        t in 1usize..300,
        h in 100usize..800,
        w in 100usize..800,
        seed in any::<u64>(),
    ) {
        prop_assume!(best_area(t, h, w) > 0);
        let p = plan(t, h, w).unwrap();
        let mut random = Xoshiro256StarStar::seed_from_u64(seed);
        let (original, scrambled) = generate(&p, &mut random).unwrap();

        prop_assert_eq!(original.shape(), (p.rows, p.cols));
        prop_assert_eq!(scrambled.shape(), (p.rows, p.cols));
        prop_assert!(is_permutation(&original, t));
        prop_assert!(is_permutation(&scrambled, t));
    }

    #[test]
    fn scramble_round_trips_bit_for_bit(
        t in 1usize..40,
        h in 8usize..64,
        w in 8usize..64,
        depth in 1usize..5,
        seed in any::<u64>(),
    ) {
        prop_assume!(best_area(t, h, w) > 0);
        let image = Array3::from_shape_fn((h, w, depth), |(y, x, c)| {
            (y * 131 + x * 17 + c * 3) as u8
        });
        let mut random = Xoshiro256StarStar::seed_from_u64(seed);
        let puzzle = scramble(image.view(), t, &mut random).unwrap();

        let p = puzzle.plan;
        prop_assert_eq!(
            &puzzle.original,
            &image.slice(s![..p.covered_height(), ..p.covered_width(), ..])
        );

        let restored = unscramble(
            puzzle.scrambled.view(),
            &puzzle.original_ids,
            &puzzle.scrambled_ids,
            p.tile,
        )
        .unwrap();
        prop_assert_eq!(restored, puzzle.original);
    }
}
