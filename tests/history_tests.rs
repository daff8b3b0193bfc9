/// Integration tests for undo/redo
/// These tests record real world edits into a `CommandHistory` and check that
/// undo and redo walk the world back and forth through the same states.
mod common;

use cgmath::Point3;
use common::{snapshot, world, GLASS, STONE};
use voxel_sculpt::voxels::block::{Rotation, AIR};
use voxel_sculpt::{ChangeSet, CommandHistory, PlacedBlock, VoxelWorld};

fn random_change_set(world: &mut VoxelWorld, rng: &mut fastrand::Rng) -> ChangeSet {
    let palette = [AIR, 1, STONE, GLASS, 17];
    let id = palette[rng.usize(..palette.len())];
    let rotation = Rotation::from_bits(rng.u8(..));

    if rng.bool() {
        let a = Point3::new(rng.i32(-6..6), rng.i32(-6..6), rng.i32(-6..6));
        let b = Point3::new(a.x + rng.i32(0..3), a.y + rng.i32(0..3), a.z + rng.i32(0..3));
        world.fill_region(a, b, id, rotation)
    } else {
        // Several single edits in one action, some hitting the same voxel.
        world.begin_batch();
        let mut changes = ChangeSet::new();
        for _ in 0..rng.usize(1..6) {
            let (x, y, z) = (rng.i32(-2..2), rng.i32(-2..2), rng.i32(-2..2));
            let id = palette[rng.usize(..palette.len())];
            changes.extend(world.place_block(x, y, z, id, Rotation::from_bits(rng.u8(..))));
        }
        world.end_batch();
        changes
    }
}

#[test]
fn test_undo_redo_walks_through_every_state() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut world = world();
    let mut history = CommandHistory::new();

    let mut states: Vec<Vec<PlacedBlock>> = vec![snapshot(&world)];
    while states.len() <= 40 {
        let changes = random_change_set(&mut world, &mut rng);
        if history.push(changes) {
            states.push(snapshot(&world));
        } else {
            assert_eq!(&snapshot(&world), states.last().unwrap());
        }
    }

    for expected in states.iter().rev().skip(1) {
        assert!(history.undo(&mut world));
        assert_eq!(&snapshot(&world), expected);
    }
    assert!(!history.can_undo());
    assert!(!history.undo(&mut world));

    for expected in states.iter().skip(1) {
        assert!(history.redo(&mut world));
        assert_eq!(&snapshot(&world), expected);
    }
    assert!(!history.can_redo());
}

#[test]
fn test_undo_restores_rotation_and_meshes() {
    let mut world = world();
    let mut history = CommandHistory::new();

    history.push(world.place_block(0, 0, 0, STONE, Rotation::R0).into_iter().collect());
    history.push(world.place_block(0, 0, 0, 16, Rotation::R270).into_iter().collect());
    let faces = world.face_count();

    assert!(history.undo(&mut world));
    assert_eq!(world.get_block(0, 0, 0), STONE);
    assert_eq!(world.get_block_rotation(0, 0, 0), Rotation::R0);

    assert!(history.undo(&mut world));
    assert_eq!(world.get_block(0, 0, 0), AIR);
    assert_eq!(world.face_count(), 0);

    history.redo(&mut world);
    history.redo(&mut world);
    assert_eq!(world.get_block_rotation(0, 0, 0), Rotation::R270);
    assert_eq!(world.face_count(), faces);
}

#[test]
fn test_undo_notifies_once_per_change_set() {
    let mut world = world();
    let mut history = CommandHistory::new();
    let changes = world.fill_region(Point3::new(0, 0, 0), Point3::new(20, 1, 1), STONE, Rotation::R0);
    history.push(changes);

    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = calls.clone();
    world.subscribe(move |_| counter.set(counter.get() + 1));

    history.undo(&mut world);
    assert_eq!(calls.get(), 1);
    history.redo(&mut world);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_undo_inside_an_open_batch_joins_it() {
    let mut world = world();
    let mut history = CommandHistory::new();
    history.push(world.place_block(0, 0, 0, STONE, Rotation::R0).into_iter().collect());
    let rebuilds = world.mesh_rebuilds();

    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = calls.clone();
    world.subscribe(move |_| counter.set(counter.get() + 1));

    world.begin_batch();
    world.place_block(5, 5, 5, STONE, Rotation::R0);
    assert!(history.undo(&mut world));
    assert!(world.is_batching());
    world.place_block(6, 5, 5, STONE, Rotation::R0);
    assert_eq!(world.mesh_rebuilds(), rebuilds);
    assert_eq!(calls.get(), 0);

    world.end_batch();
    assert!(!world.is_batching());
    assert_eq!(calls.get(), 1);
    assert_eq!(world.get_block(0, 0, 0), AIR);
    assert_eq!(world.mesh(Point3::new(0, 0, 0)).unwrap().face_count(), 10);
}

#[test]
fn test_history_capacity_evicts_oldest() {
    let mut world = world();
    let mut history = CommandHistory::with_capacity(2);

    for x in 0..3 {
        history.push(world.place_block(x, 0, 0, STONE, Rotation::R0).into_iter().collect());
    }
    while history.undo(&mut world) {}

    // The first placement fell off the stack and stays.
    assert_eq!(world.get_block(0, 0, 0), STONE);
    assert_eq!(world.get_block(1, 0, 0), AIR);
    assert_eq!(world.get_block(2, 0, 0), AIR);
}
