use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use qgrad_core::{GateKind, GateOp};
use qgrad_state::{NamedObservable, Observable, ObservableTerm, StateVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn create_random_state(num_qubits: usize, seed: u64) -> StateVector {
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitudes: Vec<Complex64> = (0..1usize << num_qubits)
        .map(|_| Complex64::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)))
        .collect();
    let mut state = StateVector::from_amplitudes(amplitudes).unwrap();
    state.normalize();
    state
}

fn bench_apply_by_arity(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_op");

    for &num_qubits in [10, 16, 20].iter() {
        let dimension = 1 << num_qubits;
        group.throughput(Throughput::Elements(dimension as u64));

        let ops = [
            ("single", GateOp::parametric(GateKind::RY, &[num_qubits / 2], 0.3).unwrap()),
            ("two", GateOp::parametric(GateKind::CRX, &[1, num_qubits - 1], 0.3).unwrap()),
            ("three", GateOp::fixed(GateKind::Toffoli, &[0, num_qubits / 2, num_qubits - 1]).unwrap()),
        ];

        for (label, op) in ops.iter() {
            group.bench_with_input(
                BenchmarkId::new(*label, format!("{}_qubits", num_qubits)),
                op,
                |b, op| {
                    let mut state = create_random_state(num_qubits, 42);
                    b.iter(|| {
                        state.apply_op(op, false).unwrap();
                        black_box(state.amplitudes()[0]);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_tensor_expectation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tensor_expectation");

    for &num_qubits in [5, 10, 15, 20].iter() {
        let dimension = 1 << num_qubits;
        group.throughput(Throughput::Elements(dimension as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_qubits", num_qubits)),
            &num_qubits,
            |b, &num_qubits| {
                let state = create_random_state(num_qubits, 42);
                let terms = (0..num_qubits)
                    .map(|w| ObservableTerm::named(NamedObservable::PauliZ, w))
                    .collect();
                let all_z = Observable::tensor(terms).unwrap();

                b.iter(|| black_box(all_z.expectation_value(&state).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_apply_by_arity, bench_tensor_expectation);
criterion_main!(benches);
