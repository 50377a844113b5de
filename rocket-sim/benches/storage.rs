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
//! Benchmarks for the entity arena
//!
//! These benchmarks measure:
//! - Entity creation with component insertion
//! - Typed component lookup through the fixed-size table
//! - Batched iteration through a component system

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rocket_sim::components::{FuelComponent, ThrustComponent};
use rocket_sim::ecs::{ComponentSystem, Entity};
use rocket_sim::World;

fn populated_world(count: usize) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let entities = (0..count)
        .map(|i| {
            let entity = world.create_entity();
            world
                .add_component(entity, FuelComponent::new(i as f64))
                .expect("fresh entity");
            if i % 2 == 0 {
                world
                    .add_component(entity, ThrustComponent::new(10.0, 1.0))
                    .expect("fresh entity");
            }
            entity
        })
        .collect();
    (world, entities)
}

/// Benchmark: create N entities with components
fn bench_world_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_insert");

    for entity_count in [100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::new("create_and_add", entity_count),
            entity_count,
            |b, &count| {
                b.iter(|| black_box(populated_world(count)));
            },
        );
    }

    group.finish();
}

/// Benchmark: typed lookup of every entity's tank
fn bench_world_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_get");

    for entity_count in [100, 1000, 10000].iter() {
        let (world, entities) = populated_world(*entity_count);
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::new("component", entity_count),
            &entities,
            |b, entities| {
                b.iter(|| {
                    let total: f64 = entities
                        .iter()
                        .filter_map(|&entity| world.component::<FuelComponent>(entity))
                        .map(FuelComponent::remaining_amount)
                        .sum();
                    black_box(total);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: iterate the tanks registered in a system
fn bench_system_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_iteration");

    for entity_count in [100, 1000, 10000].iter() {
        let (world, entities) = populated_world(*entity_count);
        let mut tanks = ComponentSystem::<FuelComponent>::new();
        for &entity in &entities {
            tanks.add_component_found_in(&world, entity);
        }

        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_function(BenchmarkId::new("components", entity_count), |b| {
            b.iter(|| {
                let total: f64 = tanks
                    .components(&world)
                    .map(FuelComponent::remaining_amount)
                    .sum();
                black_box(total);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_world_insert, bench_world_get, bench_system_iteration);
criterion_main!(benches);
