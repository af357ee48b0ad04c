//! Benchmarks for element assembly.
//!
//! Run with: `cargo bench --bench assembly_bench`
//!
//! Compares residual-only and full Jacobian assembly, and serial against
//! parallel batch assembly.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use emwave_rs::{
    BoundaryPoint, Component, ElementContext, ElementDofs, EmWaveConfig, EmWaveParameters,
    FarFieldData, FarFieldKind, LinearOptics, LinearTetrahedron, OpticalConstants,
    ProblemDescription, ScaleFactor, TimeStep, apply_em_farfield, assemble_element,
    assemble_elements,
};
use num_complex::Complex64;

/// Generate a batch of perturbed tetrahedra with smooth nodal fields.
fn generate_elements(n: usize, n_species: usize) -> Vec<Vec<ElementContext>> {
    (0..n)
        .map(|e| {
            let phase = e as f64 * 0.1;
            let tet = LinearTetrahedron::new([
                [1.0 + 0.1 * phase.sin(), 0.0, 0.0],
                [2.0, 0.1 * phase.cos(), 0.0],
                [1.2, 1.0, 0.05 * phase.sin()],
                [1.1, 0.2, 1.0 + 0.1 * phase.cos()],
            ]);
            let dofs = ElementDofs::from_fn(LinearTetrahedron::N_NODES, n_species, |u, j| {
                (phase + 0.3 * u.slot() as f64 + 0.7 * j as f64).sin()
            });
            tet.contexts(
                &LinearTetrahedron::four_point_rule(),
                ScaleFactor::Radial(Component::X),
                &dofs,
            )
        })
        .collect()
}

fn optics() -> LinearOptics {
    LinearOptics::new(1.45, 0.01)
        .with_temperature(0.0, 1e-4, 1e-5)
        .with_gradient([1.0, 0.0, 0.0], [0.01, 0.0, 0.0], [0.0; 3])
}

/// Benchmark single-element assembly with and without the Jacobian.
fn bench_element(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_assembly");

    let params = EmWaveParameters::normalized(2.0);
    let optics = optics();
    let step = TimeStep::new(0.0);
    let points = &generate_elements(1, 0)[0];

    let problems = [
        ("fields_only", ProblemDescription::full_wave(3)),
        (
            "fully_coupled",
            ProblemDescription::full_wave(3)
                .with_temperature(true)
                .with_mesh_motion(true),
        ),
    ];

    for (name, problem) in &problems {
        let residual = EmWaveConfig::new(&params, problem, &optics).with_jacobian(false);
        group.bench_with_input(BenchmarkId::new("residual", name), points, |b, points| {
            b.iter(|| assemble_element(black_box(&step), black_box(points), &residual));
        });

        let full = EmWaveConfig::new(&params, problem, &optics);
        group.bench_with_input(BenchmarkId::new("jacobian", name), points, |b, points| {
            b.iter(|| assemble_element(black_box(&step), black_box(points), &full));
        });
    }

    group.finish();
}

/// Benchmark serial vs parallel batch assembly.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_assembly");
    group.sample_size(20);

    let params = EmWaveParameters::normalized(2.0);
    let problem = ProblemDescription::full_wave(3).with_mesh_motion(true);
    let optics = optics();
    let config = EmWaveConfig::new(&params, &problem, &optics);
    let step = TimeStep::new(0.0);

    for n in [64, 512] {
        let elements = generate_elements(n, 0);

        group.bench_with_input(BenchmarkId::new("serial", n), &elements, |b, elements| {
            b.iter(|| assemble_elements(black_box(&step), black_box(elements), &config));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", n), &elements, |b, elements| {
            b.iter(|| {
                emwave_rs::assemble_elements_parallel(black_box(&step), black_box(elements), &config)
            });
        });
    }

    group.finish();
}

/// Benchmark the far-field kernel.
fn bench_farfield(c: &mut Criterion) {
    let params = EmWaveParameters::normalized(2.0);
    let problem = ProblemDescription::full_wave(3);
    let optics = optics();
    let config = EmWaveConfig::new(&params, &problem, &optics);
    let data = FarFieldData::new(
        OpticalConstants::new(1.0, 0.0),
        [
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.5),
            Complex64::new(0.0, 0.0),
        ],
    );

    let tet = LinearTetrahedron::reference();
    let dofs = ElementDofs::from_fn(LinearTetrahedron::N_NODES, 0, |u, j| {
        (0.3 * u.slot() as f64 + 0.7 * j as f64).cos()
    });
    let point: BoundaryPoint = tet.boundary_point(0, &[0.3, 0.3, 0.4], 0.0, &dofs);

    c.bench_function("farfield_all_kinds", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for kind in FarFieldKind::ALL {
                if let Ok(out) = apply_em_farfield(black_box(&point), kind, &data, &config) {
                    total += out.residual[0];
                }
            }
            total
        });
    });
}

criterion_group!(benches, bench_element, bench_batch, bench_farfield);
criterion_main!(benches);
