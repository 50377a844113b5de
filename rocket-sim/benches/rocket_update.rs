// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for a full rocket frame
//!
//! These benchmarks measure:
//! - Per-frame cost as the part count grows
//! - Input handling cost when the torque direction is pushed to every wheel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rocket_sim::components::{
    FuelComponent, GeometryComponent, ParticleComponent, ThrottleState, ThrustComponent,
    TorqueAxis, TorqueComponent,
};
use rocket_sim::physics::{BodyHandle, RecordingPhysics};
use rocket_sim::Rocket;

/// Rocket with `count` parts, every part carrying every updatable component
fn build_rocket(count: usize) -> Rocket {
    let mut rocket = Rocket::new(1.0);
    for i in 0..count {
        rocket
            .part_builder()
            .with(GeometryComponent::new(BodyHandle(i as u64)))
            .and_then(|part| part.with(FuelComponent::new(1.0e9)))
            .and_then(|part| part.with(ThrustComponent::new(100.0, 1.0)))
            .and_then(|part| part.with(TorqueComponent::new(0.5, 0.9)))
            .and_then(|part| part.with(ParticleComponent::exhaust("Fire")))
            .and_then(|part| part.attach())
            .expect("bench part");
    }
    rocket.set_throttle_state(ThrottleState::Up);
    rocket.add_torque_axis(TorqueAxis::PitchUp);
    rocket
}

/// Benchmark: one update pass for N parts
fn bench_rocket_update(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("rocket_update");

    for part_count in [1, 10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*part_count as u64));

        group.bench_with_input(
            BenchmarkId::new("frame", part_count),
            part_count,
            |b, &count| {
                let mut rocket = build_rocket(count);
                let mut physics = RecordingPhysics::new();
                b.iter(|| {
                    rocket.update(black_box(1.0 / 60.0), &mut physics);
                    physics.clear_requests();
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: key down and key up with N wheels attached
fn bench_torque_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("torque_input");

    for part_count in [10, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("press_release", part_count),
            part_count,
            |b, &count| {
                let mut rocket = build_rocket(count);
                b.iter(|| {
                    rocket.add_torque_axis(black_box(TorqueAxis::YawLeft));
                    rocket.remove_torque_axis(black_box(TorqueAxis::YawLeft));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rocket_update, bench_torque_input);
criterion_main!(benches);
