//! Criterion benchmarks for the method-scheduling engine.
//!
//! Uses a OneMax boolean-vector problem (maximize count of `true` bits) to
//! measure pure scheduler/driver overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::RngCore;

use mh_scheduler::error::MhResult;
use mh_scheduler::gvns::GVNSDriver;
use mh_scheduler::lns::LNSDriver;
use mh_scheduler::method::{MHMethod, MethodResult};
use mh_scheduler::scheduler::{Scheduler, SchedulerParameters};
use mh_scheduler::selector::UniformRandomMethodSelector;
use mh_scheduler::solution::{BoolVectorSolution, Solution, VectorSolution};

#[derive(Clone)]
struct OneMax {
    bits: Vec<bool>,
    obj_val: f64,
    obj_val_valid: bool,
}

impl PartialEq for OneMax {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl OneMax {
    fn new(n: usize) -> Self {
        Self {
            bits: vec![false; n],
            obj_val: 0.0,
            obj_val_valid: false,
        }
    }
}

impl Solution for OneMax {
    fn calc_objective(&self) -> f64 {
        self.bits.iter().filter(|&&b| b).count() as f64
    }
    fn obj_val_cache(&self) -> (f64, bool) {
        (self.obj_val, self.obj_val_valid)
    }
    fn set_obj_val_cache(&mut self, val: f64, valid: bool) {
        self.obj_val = val;
        self.obj_val_valid = valid;
    }
    fn to_maximize(&self) -> bool {
        true
    }
    fn dist(&self, other: &Self) -> f64 {
        self.hamming_dist(other)
    }
    fn check(&self) -> MhResult<()> {
        Ok(())
    }
}

impl VectorSolution<bool> for OneMax {
    fn sequence(&self) -> &[bool] {
        &self.bits
    }
    fn sequence_mut(&mut self) -> &mut Vec<bool> {
        &mut self.bits
    }
}

impl BoolVectorSolution for OneMax {}

fn random_init(sol: &mut OneMax, _par: i32, rng: &mut dyn RngCore, result: &mut MethodResult) {
    sol.initialize(rng);
    result.changed = true;
}

fn one_flip_best(sol: &mut OneMax, _par: i32, rng: &mut dyn RngCore, result: &mut MethodResult) {
    result.changed = sol.k_flip_neighborhood_search(1, true, rng);
}

fn k_random_flips(sol: &mut OneMax, par: i32, rng: &mut dyn RngCore, result: &mut MethodResult) {
    sol.k_random_flips(par as usize, rng);
    result.changed = true;
}

fn destroy(sol: &mut OneMax, par: i32, rng: &mut dyn RngCore, result: &mut MethodResult) {
    sol.k_random_flips(par as usize, rng);
    result.changed = true;
}

fn repair_noop(_sol: &mut OneMax, _par: i32, _rng: &mut dyn RngCore, result: &mut MethodResult) {
    result.changed = false;
}

fn bench_perform_method(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler_perform_method");
    for &n in &[20usize, 100, 500] {
        let methods = vec![MHMethod::new("flip1", one_flip_best, 0)];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut sched = Scheduler::new(
                    OneMax::new(n),
                    true,
                    methods.clone(),
                    SchedulerParameters::default().with_titer(200),
                    42,
                );
                let mut sol = OneMax::new(n);
                while !sched.check_termination() {
                    sched.perform_method(0, &mut sol, false);
                }
                black_box(sched.incumbent().clone())
            })
        });
    }
    group.finish();
}

fn bench_gvns_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("gvns_onemax");
    group.sample_size(20);
    for &n in &[20usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut driver = GVNSDriver::new(
                    OneMax::new(n),
                    vec![MHMethod::new("construct", random_init, 0)],
                    vec![MHMethod::new("li1", one_flip_best, 0)],
                    vec![
                        MHMethod::new("sh1", k_random_flips, 1),
                        MHMethod::new("sh2", k_random_flips, 2),
                        MHMethod::new("sh3", k_random_flips, 3),
                    ],
                    false,
                    SchedulerParameters::default().with_titer(300),
                    7,
                )
                .unwrap();
                black_box(driver.run())
            })
        });
    }
    group.finish();
}

fn bench_lns_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("lns_onemax");
    group.sample_size(20);
    for &n in &[20usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut driver = LNSDriver::new(
                    OneMax::new(n),
                    vec![],
                    vec![
                        MHMethod::new("de1", destroy, (n / 10).max(1) as i32),
                        MHMethod::new("de2", destroy, (n / 5).max(1) as i32),
                    ],
                    vec![MHMethod::new("re1", repair_noop, 0)],
                    None,
                    true,
                    SchedulerParameters::default().with_titer(300),
                    Default::default(),
                    Box::new(UniformRandomMethodSelector::new()),
                    13,
                )
                .unwrap();
                black_box(driver.run())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_perform_method, bench_gvns_onemax, bench_lns_onemax);
criterion_main!(benches);
