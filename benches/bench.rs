#![feature(test)]
#![allow(non_snake_case)]
extern crate test;

use grid_hampath::{Grid, Solver};

fn solve_run(size: [usize; 2], start: usize, end: usize, b: &mut test::Bencher) {
    let solver = Solver::new(Grid::new(size).unwrap());
    b.iter(|| -> usize {
        solver
            .solve_pair(start, end)
            .unwrap()
            .outcome
            .into_path()
            .map_or(0, |path| path.len())
    })
}

#[bench]
fn solve____4____4(b: &mut test::Bencher) {
    solve_run([4, 4], 0, 3, b);
}

#[bench]
fn solve___16___16(b: &mut test::Bencher) {
    solve_run([16, 16], 0, 15, b);
}

#[bench]
fn solve___30___30(b: &mut test::Bencher) {
    solve_run([30, 30], 0, 29, b);
}

#[bench]
fn solve____6____6_backtracking(b: &mut test::Bencher) {
    solve_run([6, 6], 26, 32, b);
}
